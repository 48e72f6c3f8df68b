use serde::{Deserialize, Serialize};

use super::player::Player;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagerProfile {
    pub name: String,
    pub experience: u32,
    pub reputation: u32,
}

impl Default for ManagerProfile {
    fn default() -> Self {
        Self { name: "Manager".to_string(), experience: 0, reputation: 50 }
    }
}

/// Facility quality levels, each 1-5.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Facilities {
    pub training_ground: u8,
    pub medical: u8,
    pub youth_academy: u8,
}

impl Default for Facilities {
    fn default() -> Self {
        Self { training_ground: 2, medical: 2, youth_academy: 2 }
    }
}

/// The managed club.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Club {
    pub id: u32,
    pub name: String,
    pub country: String,
    pub division: String,
    pub budget: f64,
    pub weekly_wages: f64,
    pub players: Vec<Player>,
    #[serde(default)]
    pub manager: ManagerProfile,
    #[serde(default = "default_capacity")]
    pub stadium_capacity: u32,
    #[serde(default = "default_fan_base")]
    pub fan_base: u32,
    #[serde(default)]
    pub facilities: Facilities,
}

fn default_capacity() -> u32 {
    40_000
}

fn default_fan_base() -> u32 {
    500_000
}

impl Club {
    pub fn new(id: u32, name: impl Into<String>, budget: f64, players: Vec<Player>) -> Self {
        Self {
            id,
            name: name.into(),
            country: "England".to_string(),
            division: "Premier Division".to_string(),
            budget,
            weekly_wages: 0.0,
            players,
            manager: ManagerProfile::default(),
            stadium_capacity: default_capacity(),
            fan_base: default_fan_base(),
            facilities: Facilities::default(),
        }
    }

    pub fn league_entry(&self) -> LeagueClub {
        let rating = crate::player::rating::mean_rating(&self.players);
        LeagueClub { id: self.id, name: self.name.clone(), overall_rating: rating }
    }
}

/// Rating-only view of a league member, used for AI opponents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeagueClub {
    pub id: u32,
    pub name: String,
    pub overall_rating: f32,
}

impl LeagueClub {
    pub fn new(id: u32, name: impl Into<String>, overall_rating: f32) -> Self {
        Self { id, name: name.into(), overall_rating }
    }
}
