//! Match simulation and random-source helpers.

pub mod match_engine;
pub mod rng;

pub use match_engine::{
    expected_goals, morale_impact, points_awarded, recommend_formation, simulate,
    simulate_with_config, FormationRecommendation,
};
pub use rng::seeded;
