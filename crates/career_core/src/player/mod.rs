//! Player rating, statistics and development models.

pub mod development;
pub mod rating;
pub mod stats;

pub use development::{
    advance_week, apply_growth, apply_match_outcome, calculate_player_growth,
    develop_for_new_season, development_status, potential_growth, should_offer_new_contract,
    update_form_from_rating, update_morale_from_result, AttributeGrowth, DevelopmentStatus,
    MatchDevelopment, MatchPerformance,
};
pub use rating::{
    form_multiplier, mean_rating, overall_from_attributes, position_weight, team_strength,
    StatWeights, NEUTRAL_TEAM_STRENGTH,
};
pub use stats::{
    estimate_transfer_value, expected_match_stats, performance_multiplier, player_match_rating,
    ExpectedMatchStats,
};
