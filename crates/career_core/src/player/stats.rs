use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::player::{Player, PlayerAttributes, Position};
use crate::player::rating::overall_from_attributes;

/// Rating scaled by form (+-20%) and morale (+-10%).
pub fn performance_multiplier(overall_rating: f32, form: f32, morale: f32) -> f32 {
    let rating = overall_rating / 100.0;
    let form_effect = (form - 50.0) / 250.0;
    let morale_effect = (morale - 50.0) / 500.0;
    rating * (1.0 + form_effect + morale_effect)
}

/// Position-specific output a player is expected to produce in one match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedMatchStats {
    pub expected_goals: f32,
    pub expected_assists: f32,
    /// percentages
    pub shot_accuracy: f32,
    pub pass_accuracy: f32,
    pub tackle_success: f32,
}

pub fn expected_match_stats(
    position: Position,
    attrs: &PlayerAttributes,
    form: f32,
    morale: f32,
) -> ExpectedMatchStats {
    let perf = performance_multiplier(overall_from_attributes(attrs, position), form, morale);
    let pct = |v: u8| (v as f32 / 100.0).min(1.0);

    match position {
        Position::ST | Position::CF => ExpectedMatchStats {
            expected_goals: pct(attrs.shooting) * 0.6 * perf,
            expected_assists: pct(attrs.passing) * 0.2 * perf,
            shot_accuracy: pct(attrs.shooting) * 70.0 + 30.0,
            pass_accuracy: pct(attrs.passing) * 65.0 + 50.0,
            tackle_success: 20.0,
        },
        Position::LW | Position::RW => ExpectedMatchStats {
            expected_goals: pct(attrs.shooting) * 0.4 * perf,
            expected_assists: pct(attrs.passing) * 0.3 * perf,
            shot_accuracy: pct(attrs.dribbling) * 60.0 + 40.0,
            pass_accuracy: pct(attrs.passing) * 70.0 + 45.0,
            tackle_success: 30.0,
        },
        Position::CAM => ExpectedMatchStats {
            expected_goals: pct(attrs.shooting) * 0.2 * perf,
            expected_assists: pct(attrs.passing) * 0.5 * perf,
            shot_accuracy: pct(attrs.shooting) * 60.0 + 40.0,
            pass_accuracy: pct(attrs.passing) * 90.0 + 40.0,
            tackle_success: 40.0,
        },
        Position::CM | Position::LM | Position::RM => ExpectedMatchStats {
            expected_goals: pct(attrs.shooting) * 0.15 * perf,
            expected_assists: pct(attrs.passing) * 0.25 * perf,
            shot_accuracy: pct(attrs.shooting) * 55.0 + 45.0,
            pass_accuracy: pct(attrs.passing) * 85.0 + 50.0,
            tackle_success: 60.0,
        },
        Position::CDM => ExpectedMatchStats {
            expected_goals: pct(attrs.defense) * 0.05 * perf,
            expected_assists: pct(attrs.passing) * 0.1 * perf,
            shot_accuracy: pct(attrs.shooting) * 45.0 + 50.0,
            pass_accuracy: pct(attrs.passing) * 80.0 + 55.0,
            tackle_success: 75.0,
        },
        Position::LB | Position::RB | Position::LWB | Position::RWB => ExpectedMatchStats {
            expected_goals: pct(attrs.physical) * 0.02 * perf,
            expected_assists: pct(attrs.passing) * 0.15 * perf,
            shot_accuracy: pct(attrs.shooting) * 40.0 + 50.0,
            pass_accuracy: pct(attrs.passing) * 80.0 + 55.0,
            tackle_success: 70.0,
        },
        Position::CB => ExpectedMatchStats {
            expected_goals: pct(attrs.physical) * 0.01 * perf,
            expected_assists: pct(attrs.passing) * 0.05 * perf,
            shot_accuracy: pct(attrs.shooting) * 30.0 + 50.0,
            pass_accuracy: pct(attrs.passing) * 85.0 + 55.0,
            tackle_success: 80.0,
        },
        Position::GK => ExpectedMatchStats {
            expected_goals: 0.0,
            expected_assists: 0.0,
            shot_accuracy: 0.0,
            pass_accuracy: pct(attrs.passing) * 70.0 + 50.0,
            tackle_success: 85.0,
        },
    }
}

/// Rough market value: `rating^2 * 1000`, adjusted for age and contract,
/// rounded to the nearest 100k with a 100k floor.
pub fn estimate_transfer_value(
    age: u8,
    overall_rating: f32,
    potential: f32,
    contract_years_remaining: i32,
) -> f64 {
    let rating = overall_rating.max(1.0) as f64;
    let mut value = rating * rating * 1000.0;

    if age < 23 {
        value *= 1.2 * (potential.max(overall_rating) as f64 / rating);
    } else if age > 32 {
        value *= 0.5;
    } else if age > 30 {
        value *= 0.7;
    }

    if contract_years_remaining < 1 {
        value *= 0.5;
    } else if contract_years_remaining < 2 {
        value *= 0.75;
    }

    ((value / 100_000.0).round() * 100_000.0).max(100_000.0)
}

/// Post-match rating on a 1-10 scale: rating/99*10, +-0.5 for the result, +-1 noise.
pub fn player_match_rating(
    player: &Player,
    goals_for: u8,
    goals_against: u8,
    rng: &mut impl Rng,
) -> f32 {
    let mut rating = player.overall_rating / 99.0 * 10.0;
    if goals_for > goals_against {
        rating += 0.5;
    } else if goals_for < goals_against {
        rating -= 0.5;
    }
    rating += rng.gen_range(-1.0f32..1.0);
    (rating.clamp(1.0, 10.0) * 10.0).round() / 10.0
}
