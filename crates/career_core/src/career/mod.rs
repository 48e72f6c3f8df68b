//! Career mode: the state machine plus squad, academy and transfer tools.

pub mod orchestrator;
pub mod squad;
pub mod state;
pub mod transfers;
pub mod youth;

pub use orchestrator::{
    accept_incoming_bid, advance_matchday, club_team_setup, complete_transfer, end_season,
    fixture_setup, initialize_career, initialize_career_with_config, negotiate_transfer,
    play_match, refresh_transfer_market, simulate_other_fixtures, submit_transfer_offer,
};
pub use squad::{
    analyze_squad_balance, club_reputation_multiplier, project_squad_strength,
    squad_average_by_position, AgeProfile, SquadBalance, SquadProjection, WageBudget, WageStatus,
};
pub use state::{CareerGameState, RecentResult, SeasonPhase};
pub use transfers::{
    ai_negotiation_response, filter_by_budget, filter_by_position, filter_by_rating,
    generate_counter_offer, generate_incoming_bids, generate_transfer_market, market_value,
    negotiate, respond_to_offer, search_players, DealLikelihood, IncomingBid, MarketActivity,
    NegotiationResponse, OfferStatus, TransferOffer, TransferTarget,
};
pub use youth::{
    generate_youth_intake, promote_youth, promotion_candidates, PromotionCandidate,
    PromotionReadiness, YouthAcademy,
};
