use thiserror::Error;

/// Precondition violations raised by the career engine.
///
/// None of these are transient: the engine never retries, callers decide
/// whether to surface the message or abort the season flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CareerError {
    #[error("Fixture not found: {0}")]
    FixtureNotFound(u32),

    #[error("Fixture {0} has already been played")]
    FixtureAlreadyPlayed(u32),

    #[error("Club {club_id} does not take part in fixture {fixture_id}")]
    ClubNotInFixture { fixture_id: u32, club_id: u32 },

    #[error("Match setup for fixture {fixture_id} lists clubs {home}-{away}, fixture expects {expected_home}-{expected_away}")]
    SetupMismatch { fixture_id: u32, home: u32, away: u32, expected_home: u32, expected_away: u32 },

    #[error("Lineup for {side} is empty")]
    EmptyLineup { side: String },

    #[error("Squad is empty")]
    EmptySquad,

    #[error("Unknown club in league table: {0}")]
    UnknownClub(u32),

    #[error("Objective not found: {0}")]
    ObjectiveNotFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for CareerError {
    fn from(err: serde_json::Error) -> Self {
        CareerError::InvalidConfig(err.to_string())
    }
}

impl From<serde_yaml::Error> for CareerError {
    fn from(err: serde_yaml::Error) -> Self {
        CareerError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CareerError>;
