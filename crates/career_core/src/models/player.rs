use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CareerError;

/// Upper bound for every attribute score.
pub const MAX_ATTRIBUTE: u8 = 99;
/// Ratings never decay below this floor.
pub const MIN_RATING: f32 = 40.0;
pub const MAX_RATING: f32 = 99.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    CB,
    LB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
}

impl Position {
    pub const ALL: [Position; 15] = [
        Position::GK,
        Position::CB,
        Position::LB,
        Position::RB,
        Position::LWB,
        Position::RWB,
        Position::CDM,
        Position::CM,
        Position::CAM,
        Position::LM,
        Position::RM,
        Position::LW,
        Position::RW,
        Position::CF,
        Position::ST,
    ];

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(
            self,
            Position::CB | Position::LB | Position::RB | Position::LWB | Position::RWB
        )
    }

    pub fn is_midfielder(&self) -> bool {
        matches!(
            self,
            Position::CDM | Position::CM | Position::CAM | Position::LM | Position::RM
        )
    }

    /// Forwards are the xG-generating line: strikers and wingers.
    pub fn is_forward(&self) -> bool {
        matches!(self, Position::ST | Position::CF | Position::LW | Position::RW)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::CB => "CB",
            Position::LB => "LB",
            Position::RB => "RB",
            Position::LWB => "LWB",
            Position::RWB => "RWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::LM => "LM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = CareerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CareerError::InvalidParameter(format!("unknown position '{}'", s)))
    }
}

/// The six core attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defense,
    Physical,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Pace,
        Attribute::Shooting,
        Attribute::Passing,
        Attribute::Dribbling,
        Attribute::Defense,
        Attribute::Physical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Pace => "pace",
            Attribute::Shooting => "shooting",
            Attribute::Passing => "passing",
            Attribute::Dribbling => "dribbling",
            Attribute::Defense => "defense",
            Attribute::Physical => "physical",
        }
    }
}

/// Attribute scores, each in `0..=99`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PlayerAttributes {
    pub pace: u8,
    pub shooting: u8,
    pub passing: u8,
    pub dribbling: u8,
    pub defense: u8,
    pub physical: u8,
}

impl PlayerAttributes {
    /// Values above 99 are clamped.
    pub fn new(pace: u8, shooting: u8, passing: u8, dribbling: u8, defense: u8, physical: u8) -> Self {
        Self { pace, shooting, passing, dribbling, defense, physical }.clamped()
    }

    /// Same score for every attribute.
    pub fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn clamped(self) -> Self {
        Self {
            pace: self.pace.min(MAX_ATTRIBUTE),
            shooting: self.shooting.min(MAX_ATTRIBUTE),
            passing: self.passing.min(MAX_ATTRIBUTE),
            dribbling: self.dribbling.min(MAX_ATTRIBUTE),
            defense: self.defense.min(MAX_ATTRIBUTE),
            physical: self.physical.min(MAX_ATTRIBUTE),
        }
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Pace => self.pace,
            Attribute::Shooting => self.shooting,
            Attribute::Passing => self.passing,
            Attribute::Dribbling => self.dribbling,
            Attribute::Defense => self.defense,
            Attribute::Physical => self.physical,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: u8) {
        let value = value.min(MAX_ATTRIBUTE);
        match attribute {
            Attribute::Pace => self.pace = value,
            Attribute::Shooting => self.shooting = value,
            Attribute::Passing => self.passing = value,
            Attribute::Dribbling => self.dribbling = value,
            Attribute::Defense => self.defense = value,
            Attribute::Physical => self.physical = value,
        }
    }

    /// Stamina used by tactic suitability is the physical score.
    pub fn stamina(&self) -> u8 {
        self.physical
    }

    pub fn average(&self) -> f32 {
        Attribute::ALL.iter().map(|a| self.get(*a) as f32).sum::<f32>() / 6.0
    }
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self::uniform(50)
    }
}

/// A squad member.
///
/// Ratings stay `f32` for the whole career; use [`Player::display_rating`]
/// when a whole number is needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub age: u8,
    pub attributes: PlayerAttributes,
    pub overall_rating: f32,
    pub potential: f32,
    /// 0-100, decays weekly
    pub form: f32,
    /// 0-100, driven by results
    pub morale: f32,
    #[serde(default)]
    pub injury_weeks: u8,
    pub contract_end_year: u16,
    #[serde(default)]
    pub is_youth_player: bool,
}

impl Player {
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        position: Position,
        age: u8,
        attributes: PlayerAttributes,
    ) -> Self {
        let overall = crate::player::rating::overall_from_attributes(&attributes, position);
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            position,
            age,
            attributes: attributes.clamped(),
            overall_rating: overall,
            potential: overall,
            form: 50.0,
            morale: 50.0,
            injury_weeks: 0,
            contract_end_year: 0,
            is_youth_player: false,
        }
    }

    /// Override the derived rating. Potential is raised to keep `potential >= overall`.
    pub fn with_overall(mut self, overall: f32) -> Self {
        self.overall_rating = overall.clamp(0.0, MAX_RATING);
        self.potential = self.potential.max(self.overall_rating);
        self
    }

    pub fn with_potential(mut self, potential: f32) -> Self {
        self.potential = potential.clamp(self.overall_rating, MAX_RATING);
        self
    }

    pub fn with_condition(mut self, form: f32, morale: f32) -> Self {
        self.form = form.clamp(0.0, 100.0);
        self.morale = morale.clamp(0.0, 100.0);
        self
    }

    pub fn with_contract_end(mut self, year: u16) -> Self {
        self.contract_end_year = year;
        self
    }

    pub fn youth(mut self) -> Self {
        self.is_youth_player = true;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_available(&self) -> bool {
        self.injury_weeks == 0
    }

    pub fn display_rating(&self) -> u8 {
        self.overall_rating.round().clamp(0.0, MAX_RATING) as u8
    }

    /// Whole seasons left on the contract, negative once expired.
    pub fn contract_years_remaining(&self, current_season: u16) -> i32 {
        self.contract_end_year as i32 - current_season as i32
    }

    /// Set overall rating without ever lowering potential below it.
    pub fn set_overall(&mut self, rating: f32) {
        self.overall_rating = rating.clamp(0.0, MAX_RATING);
        if self.potential < self.overall_rating {
            self.potential = self.overall_rating;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_groups_are_disjoint() {
        for pos in Position::ALL {
            let groups = [pos.is_goalkeeper(), pos.is_defender(), pos.is_midfielder(), pos.is_forward()];
            assert_eq!(groups.iter().filter(|g| **g).count(), 1, "{pos} must be in one group");
        }
    }

    #[test]
    fn test_position_parse() {
        assert_eq!("st".parse::<Position>().unwrap(), Position::ST);
        assert_eq!(" CAM ".parse::<Position>().unwrap(), Position::CAM);
        assert!("XX".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_serde_uppercase() {
        let json = serde_json::to_string(&Position::LWB).unwrap();
        assert_eq!(json, "\"LWB\"");
    }

    #[test]
    fn test_attributes_clamped() {
        let attrs = PlayerAttributes::new(120, 50, 99, 100, 0, 255);
        assert_eq!(attrs.pace, 99);
        assert_eq!(attrs.dribbling, 99);
        assert_eq!(attrs.physical, 99);
        assert_eq!(attrs.defense, 0);

        let mut attrs = PlayerAttributes::uniform(60);
        attrs.set(Attribute::Shooting, 150);
        assert_eq!(attrs.get(Attribute::Shooting), 99);
    }

    #[test]
    fn test_player_potential_never_below_overall() {
        let p = Player::new(1, "Ada", "Stone", Position::CM, 20, PlayerAttributes::uniform(60))
            .with_potential(50.0);
        assert!(p.potential >= p.overall_rating);

        let p = p.with_overall(80.0);
        assert!((p.potential - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_display_rating_rounds() {
        let p = Player::new(1, "A", "B", Position::ST, 25, PlayerAttributes::uniform(70))
            .with_overall(72.6);
        assert_eq!(p.display_rating(), 73);
        assert_eq!(p.full_name(), "A B");
    }
}
