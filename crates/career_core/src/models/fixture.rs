use serde::{Deserialize, Serialize};

use super::formation::FormationCode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FixtureResult {
    pub home_score: u8,
    pub away_score: u8,
}

/// A league fixture. Identity is fixed at creation; only the result is recorded later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    pub id: u32,
    pub matchday: u32,
    pub home_club_id: u32,
    pub home_club_name: String,
    pub away_club_id: u32,
    pub away_club_name: String,
    #[serde(default)]
    pub played: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<FixtureResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_formation: Option<FormationCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_formation: Option<FormationCode>,
}

impl Fixture {
    pub fn involves(&self, club_id: u32) -> bool {
        self.home_club_id == club_id || self.away_club_id == club_id
    }

    pub fn record_result(&mut self, home_score: u8, away_score: u8) {
        self.played = true;
        self.result = Some(FixtureResult { home_score, away_score });
    }
}

/// One league table row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeagueStanding {
    pub position: u32,
    pub club_id: u32,
    pub club_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl LeagueStanding {
    pub fn new(position: u32, club_id: u32, club_name: impl Into<String>) -> Self {
        Self {
            position,
            club_id,
            club_name: club_name.into(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }

    pub fn points_per_game(&self) -> f32 {
        if self.played == 0 {
            0.0
        } else {
            self.points as f32 / self.played as f32
        }
    }
}
