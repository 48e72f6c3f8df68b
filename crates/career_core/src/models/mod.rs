pub mod club;
pub mod fixture;
pub mod formation;
pub mod match_result;
pub mod match_setup;
pub mod player;
pub mod season_stats;

pub use club::{Club, Facilities, LeagueClub, ManagerProfile};
pub use fixture::{Fixture, FixtureResult, LeagueStanding};
pub use formation::{BuildUp, Formation, FormationCode, FormationStyle, Pressing};
pub use match_result::{
    CardCount, ManOfTheMatch, MatchDuration, MatchEvent, MatchEventType, MatchOutcome,
    MatchResult, MatchStatistics, TeamStats,
};
pub use match_setup::{select_starting_xi, LineupPlayer, MatchSetup, TeamSetup, TeamSide, STARTING_XI};
pub use player::{Attribute, Player, PlayerAttributes, Position, MAX_ATTRIBUTE};
pub use season_stats::{BestPlayer, SeasonStats, TopScorer};
