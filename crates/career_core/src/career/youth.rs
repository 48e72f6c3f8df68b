//! Youth academy: intake, readiness for the first team, promotion.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CareerError, Result};
use crate::models::player::{Player, PlayerAttributes, Position};

pub const MIN_FACILITY_LEVEL: u8 = 1;
pub const MAX_FACILITY_LEVEL: u8 = 5;
pub const INTAKE_AGE: u8 = 16;
/// Seasons on a first professional contract.
pub const YOUTH_CONTRACT_YEARS: u16 = 3;

const FIRST_NAMES: &[&str] = &[
    "Alfie", "Mason", "Leo", "Jayden", "Kai", "Rio", "Tyler", "Harvey", "Ollie", "Callum", "Reece",
    "Noah",
];
const LAST_NAMES: &[&str] = &[
    "Walker", "Hughes", "Bennett", "Carter", "Reid", "Morgan", "Doyle", "Fletcher", "Nolan", "Pryce",
    "Hartley", "Okafor",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouthAcademy {
    pub players: Vec<Player>,
    /// 1-5
    pub facilities: u8,
}

impl Default for YouthAcademy {
    fn default() -> Self {
        Self { players: Vec::new(), facilities: 2 }
    }
}

impl YouthAcademy {
    pub fn new(players: Vec<Player>, facilities: u8) -> Self {
        Self { players, facilities: facilities.clamp(MIN_FACILITY_LEVEL, MAX_FACILITY_LEVEL) }
    }

    /// Development speed multiplier, +5% per facility level.
    pub fn development_boost(&self) -> f32 {
        1.0 + self.facilities as f32 * 0.05
    }

    /// One level up; fails at the top level.
    pub fn upgrade_facilities(&mut self) -> Result<u8> {
        if self.facilities >= MAX_FACILITY_LEVEL {
            return Err(CareerError::InvalidParameter(format!(
                "academy already at level {MAX_FACILITY_LEVEL}"
            )));
        }
        self.facilities += 1;
        Ok(self.facilities)
    }

    pub fn average_age(&self) -> f32 {
        if self.players.is_empty() {
            return 0.0;
        }
        self.players.iter().map(|p| p.age as f32).sum::<f32>() / self.players.len() as f32
    }
}

/// A fresh intake of `count` 16-18 year olds with ids from `first_id`.
///
/// Better facilities raise both the starting rating and the ceiling.
pub fn generate_youth_intake(
    facility_level: u8,
    count: usize,
    first_id: u32,
    current_season: u16,
    rng: &mut impl Rng,
) -> Vec<Player> {
    let level = facility_level.clamp(MIN_FACILITY_LEVEL, MAX_FACILITY_LEVEL);
    (0..count)
        .map(|i| {
            let position = Position::ALL.choose(rng).copied().unwrap_or(Position::CM);
            let age = rng.gen_range(INTAKE_AGE..=INTAKE_AGE + 2);
            let rating = rng.gen_range(40.0..50.0) + level as f32 * 2.0;
            let potential = (rating + rng.gen_range(15.0..30.0) + level as f32 * 2.0).min(95.0);
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Sam");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");

            Player::new(first_id + i as u32, first, last, position, age, PlayerAttributes::uniform(rating as u8))
                .with_overall(rating.round())
                .with_potential(potential.round())
                .with_contract_end(current_season + YOUTH_CONTRACT_YEARS)
                .youth()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionReadiness {
    Ready,
    Close,
    Developing,
    TooYoung,
}

impl PromotionReadiness {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => PromotionReadiness::Ready,
            65..=79 => PromotionReadiness::Close,
            50..=64 => PromotionReadiness::Developing,
            _ => PromotionReadiness::TooYoung,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionCandidate {
    pub player_id: u32,
    pub name: String,
    pub age: u8,
    pub overall_rating: f32,
    pub position: Position,
    /// 0-100
    pub readiness_score: u8,
    pub recommendation: PromotionReadiness,
}

/// Readiness = 30% age (23 counts as full), 40% rating against the senior
/// average, 30% potential against 95. Best candidates first.
pub fn promotion_candidates(youth: &[Player], senior_average: f32) -> Vec<PromotionCandidate> {
    let senior_average = if senior_average > 0.0 { senior_average } else { 50.0 };
    let mut candidates: Vec<PromotionCandidate> = youth
        .iter()
        .filter(|p| p.is_youth_player)
        .map(|p| {
            let age_score = (p.age as f32 / 23.0 * 100.0).min(100.0);
            let rating_score = p.overall_rating / senior_average * 100.0;
            let potential_score = p.potential / 95.0 * 100.0;
            let score = (age_score * 0.3 + rating_score * 0.4 + potential_score * 0.3).round().clamp(0.0, 100.0) as u8;
            PromotionCandidate {
                player_id: p.id,
                name: p.full_name(),
                age: p.age,
                overall_rating: p.overall_rating,
                position: p.position,
                readiness_score: score,
                recommendation: PromotionReadiness::from_score(score),
            }
        })
        .collect();
    candidates.sort_by(|a, b| b.readiness_score.cmp(&a.readiness_score).then(a.player_id.cmp(&b.player_id)));
    candidates
}

/// Move an academy player into the senior squad on a fresh contract.
pub fn promote_youth(
    academy: &mut YouthAcademy,
    squad: &mut Vec<Player>,
    player_id: u32,
    current_season: u16,
) -> Result<()> {
    let index = academy
        .players
        .iter()
        .position(|p| p.id == player_id)
        .ok_or_else(|| CareerError::InvalidParameter(format!("no academy player with id {player_id}")))?;

    let mut player = academy.players.remove(index);
    player.is_youth_player = false;
    player.contract_end_year = player.contract_end_year.max(current_season + YOUTH_CONTRACT_YEARS);
    log::info!("Promoted {} to the first team", player.full_name());
    squad.push(player);
    Ok(())
}
