//! # career_core - Deterministic Football Career Simulation
//!
//! Turns a squad, a fixture calendar and managerial decisions into match
//! results, league tables, player development, club finances and the
//! board's verdict, season after season.
//!
//! ## Features
//! - Deterministic under a seeded random source (same seed = same career)
//! - Pure state-in/state-out orchestration, no hidden globals
//! - Tunable balance presets loadable from YAML or JSON
//! - Compact integrity-checked snapshots of the whole career
//!
//! ```rust
//! use career_core::engine::{seeded, simulate};
//! use career_core::models::{Formation, FormationCode, MatchSetup, Player, PlayerAttributes, Position, TeamSetup};
//!
//! let squad: Vec<Player> = (1..=11)
//!     .map(|id| Player::new(id, "A", "B", Position::CM, 25, PlayerAttributes::uniform(70)))
//!     .collect();
//! let formation = Formation::preset(FormationCode::F433);
//! let setup = MatchSetup::new(
//!     TeamSetup::from_squad(1, "Home", &squad, formation),
//!     TeamSetup::from_squad(2, "Away", &squad, formation),
//! );
//! let result = simulate(&setup, &mut seeded(7));
//! assert!(result.man_of_the_match.rating >= 7.5);
//! ```

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Simulation APIs take many tunables
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

pub mod board;
pub mod career;
pub mod config;
pub mod engine;
pub mod error;
pub mod finance;
pub mod models;
pub mod player;
pub mod save;
pub mod season;
pub mod staff;
pub mod tactics;

pub use config::BalanceConfig;
pub use error::{CareerError, Result};

// Re-export the career loop
pub use career::{
    advance_matchday, end_season, initialize_career, initialize_career_with_config, play_match,
    simulate_other_fixtures, CareerGameState, SeasonPhase,
};

// Re-export the match engine
pub use engine::{seeded, simulate, simulate_with_config};

// Re-export snapshot codec
pub use save::{decode_snapshot, encode_snapshot, SaveError};
