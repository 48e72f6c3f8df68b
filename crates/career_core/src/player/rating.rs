//! Rating model: attribute-weighted overall ratings and team strength.
//!
//! - `overall_from_attributes`: position-specific stat weights (sum to 1.0)
//! - `team_strength`: position weight x form multiplier, averaged per player
//! - `mean_rating`: plain mean used by the match engine

use serde::{Deserialize, Serialize};

use crate::models::player::{Player, PlayerAttributes, Position};

/// Strength reported for an empty squad.
pub const NEUTRAL_TEAM_STRENGTH: f32 = 50.0;

/// Importance of each attribute for a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatWeights {
    pub pace: f32,
    pub shooting: f32,
    pub passing: f32,
    pub dribbling: f32,
    pub defense: f32,
    pub physical: f32,
}

impl StatWeights {
    pub fn for_position(position: Position) -> Self {
        let (pace, shooting, passing, dribbling, defense, physical) = match position {
            Position::GK => (0.10, 0.00, 0.15, 0.00, 0.30, 0.45),
            Position::CB => (0.10, 0.05, 0.20, 0.05, 0.45, 0.15),
            Position::LB | Position::RB | Position::LWB | Position::RWB => {
                (0.20, 0.05, 0.20, 0.15, 0.25, 0.15)
            }
            Position::CDM => (0.15, 0.05, 0.25, 0.10, 0.30, 0.15),
            Position::CM | Position::LM | Position::RM => (0.15, 0.10, 0.30, 0.15, 0.15, 0.15),
            Position::CAM => (0.15, 0.15, 0.35, 0.25, 0.05, 0.05),
            Position::LW | Position::RW => (0.25, 0.15, 0.15, 0.30, 0.05, 0.10),
            Position::ST => (0.15, 0.35, 0.15, 0.20, 0.05, 0.10),
            Position::CF => (0.20, 0.30, 0.20, 0.15, 0.05, 0.10),
        };
        Self { pace, shooting, passing, dribbling, defense, physical }
    }

    pub fn total(&self) -> f32 {
        self.pace + self.shooting + self.passing + self.dribbling + self.defense + self.physical
    }
}

/// Overall rating from attributes, unrounded.
pub fn overall_from_attributes(attrs: &PlayerAttributes, position: Position) -> f32 {
    let w = StatWeights::for_position(position);
    let weighted = attrs.pace as f32 * w.pace
        + attrs.shooting as f32 * w.shooting
        + attrs.passing as f32 * w.passing
        + attrs.dribbling as f32 * w.dribbling
        + attrs.defense as f32 * w.defense
        + attrs.physical as f32 * w.physical;
    weighted / w.total()
}

/// Team-strength weight of a position.
pub fn position_weight(position: Position) -> f32 {
    match position {
        Position::ST | Position::CF => 1.4,
        Position::CM => 1.3,
        Position::CB | Position::CDM | Position::CAM | Position::LW | Position::RW => 1.2,
        Position::LB | Position::RB | Position::LWB | Position::RWB | Position::LM | Position::RM => 1.0,
        Position::GK => 0.8,
    }
}

/// `0.5 + 0.5 * form/100`, so a zero-form player still counts half.
pub fn form_multiplier(form: f32) -> f32 {
    0.5 + 0.5 * (form.clamp(0.0, 100.0) / 100.0)
}

/// Position- and form-weighted strength of a squad.
///
/// Returns [`NEUTRAL_TEAM_STRENGTH`] for an empty squad.
pub fn team_strength(squad: &[Player]) -> f32 {
    if squad.is_empty() {
        return NEUTRAL_TEAM_STRENGTH;
    }
    let total: f32 = squad
        .iter()
        .map(|p| p.overall_rating * position_weight(p.position) * form_multiplier(p.form))
        .sum();
    total / squad.len() as f32
}

pub fn mean_rating(players: &[Player]) -> f32 {
    if players.is_empty() {
        return NEUTRAL_TEAM_STRENGTH;
    }
    players.iter().map(|p| p.overall_rating).sum::<f32>() / players.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, position: Position, rating: f32, form: f32) -> Player {
        Player::new(id, "Test", format!("{id}"), position, 25, PlayerAttributes::uniform(60))
            .with_overall(rating)
            .with_condition(form, 50.0)
    }

    #[test]
    fn test_stat_weights_sum_to_one() {
        for pos in Position::ALL {
            let total = StatWeights::for_position(pos).total();
            assert!((total - 1.0).abs() < 1e-4, "{pos} weights sum to {total}");
        }
    }

    #[test]
    fn test_uniform_attributes_give_same_overall() {
        let attrs = PlayerAttributes::uniform(72);
        for pos in Position::ALL {
            assert!((overall_from_attributes(&attrs, pos) - 72.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_striker_values_shooting() {
        let attrs = PlayerAttributes::new(60, 90, 60, 60, 30, 60);
        let st = overall_from_attributes(&attrs, Position::ST);
        let cb = overall_from_attributes(&attrs, Position::CB);
        assert!(st > cb);
    }

    #[test]
    fn test_empty_squad_is_neutral() {
        assert_eq!(team_strength(&[]), NEUTRAL_TEAM_STRENGTH);
        assert_eq!(mean_rating(&[]), NEUTRAL_TEAM_STRENGTH);
    }

    #[test]
    fn test_team_strength_single_player() {
        // 80 * 1.4 * (0.5 + 0.5 * 1.0)
        let squad = vec![player(1, Position::ST, 80.0, 100.0)];
        assert!((team_strength(&squad) - 112.0).abs() < 1e-3);

        // Zero form halves the contribution
        let squad = vec![player(1, Position::GK, 80.0, 0.0)];
        assert!((team_strength(&squad) - 32.0).abs() < 1e-3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Raising one player's rating never lowers team strength
            #[test]
            fn prop_strength_monotonic_in_rating(
                ratings in prop::collection::vec(40.0f32..99.0, 1..15),
                forms in prop::collection::vec(0.0f32..100.0, 15),
                idx in 0usize..15,
                bump in 0.0f32..20.0,
            ) {
                let squad: Vec<Player> = ratings
                    .iter()
                    .enumerate()
                    .map(|(i, r)| player(i as u32, Position::ALL[i % Position::ALL.len()], *r, forms[i]))
                    .collect();
                let idx = idx % squad.len();
                let before = team_strength(&squad);

                let mut improved = squad.clone();
                let raised = (improved[idx].overall_rating + bump).min(99.0);
                improved[idx].set_overall(raised);
                let after = team_strength(&improved);

                prop_assert!(after + 1e-3 >= before);
            }
        }
    }
}
