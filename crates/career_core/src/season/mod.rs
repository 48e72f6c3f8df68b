//! League calendar and table.

pub mod schedule;
pub mod standings;

pub use schedule::{
    circle_schedule, generate_fixtures, initialize_season, organize_by_week, Season, SeasonWeek,
};
pub use standings::{initial_standings, position_of, sort_standings, update_standings};
