//! Board expectations: season objectives and the manager's standing.

pub mod expectation;
pub mod objectives;

pub use expectation::{expected_position, manager_job_status, manager_rating, BoardExpectation};
pub use objectives::{
    generate_objectives, Difficulty, DifficultySettings, ObjectiveType, SeasonObjective,
};
