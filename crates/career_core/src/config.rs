//! # Balance Configuration
//!
//! Every tuning constant used by the match engine, the development model and
//! the career orchestrator lives here, grouped per subsystem.
//!
//! ```rust
//! use career_core::config::BalanceConfig;
//!
//! let config = BalanceConfig::default();
//! let arcade = BalanceConfig::arcade();
//! assert!(arcade.match_sim.bonus_goal_chance > config.match_sim.bonus_goal_chance);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CareerError, Result};

/// Match engine tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Multiplier on the home side's mean rating (default: 1.1)
    pub home_field_advantage: f32,
    /// Chance of the single bonus goal per side (default: 0.5)
    pub bonus_goal_chance: f64,
    /// Possession points added or removed per formation style (default: 10)
    pub style_possession_swing: f32,
    /// xG multiplier for attacking style (default: 1.3)
    pub attacking_xg_factor: f32,
    /// xG multiplier for defensive style (default: 0.6)
    pub defensive_xg_factor: f32,
    pub min_yellow_cards: u8,
    pub max_yellow_cards: u8,
    /// Chance of exactly one red card (default: 0.15)
    pub red_card_chance: f64,
    /// Chance of exactly one injury event (default: 0.2)
    pub injury_event_chance: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            home_field_advantage: 1.1,
            bonus_goal_chance: 0.5,
            style_possession_swing: 10.0,
            attacking_xg_factor: 1.3,
            defensive_xg_factor: 0.6,
            min_yellow_cards: 2,
            max_yellow_cards: 5,
            red_card_chance: 0.15,
            injury_event_chance: 0.2,
        }
    }
}

/// Player development and morale tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentConfig {
    /// Form points per unit of event impact (default: 5)
    pub form_impact_scale: f32,
    pub win_morale: f32,
    pub draw_morale: f32,
    pub loss_morale: f32,
    /// Per-player injury roll after every match (default: 0.02)
    pub injury_chance: f64,
    pub max_injury_weeks: u8,
    /// Form lost every matchday (default: 2)
    pub weekly_form_decay: f32,
    /// Chance an out-of-contract player leaves at season end (default: 0.5)
    pub contract_departure_chance: f64,
    pub contract_extension_years: u16,
}

impl Default for DevelopmentConfig {
    fn default() -> Self {
        Self {
            form_impact_scale: 5.0,
            win_morale: 10.0,
            draw_morale: -5.0,
            loss_morale: -15.0,
            injury_chance: 0.02,
            max_injury_weeks: 4,
            weekly_form_decay: 2.0,
            contract_departure_chance: 0.5,
            contract_extension_years: 3,
        }
    }
}

/// Season cadence tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Finances are recalculated every N matchdays (default: 4)
    pub matchdays_per_month: u32,
    /// Size of the recent-results ring (default: 5)
    pub recent_results_len: usize,
    /// Annual television deal credited at season end
    pub television_deal: f64,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self { matchdays_per_month: 4, recent_results_len: 5, television_deal: 5_000_000.0 }
    }
}

/// Full balance configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BalanceConfig {
    #[serde(default)]
    pub match_sim: MatchConfig,
    #[serde(default)]
    pub development: DevelopmentConfig,
    #[serde(default)]
    pub season: SeasonConfig,
}

impl BalanceConfig {
    /// Standard balance (default)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// More goals, fewer injuries
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.match_sim.bonus_goal_chance = 0.7;
        cfg.match_sim.attacking_xg_factor = 1.5;
        cfg.match_sim.injury_event_chance = 0.1;
        cfg.development.injury_chance = 0.01;
        cfg
    }

    /// Harsher morale swings and more injuries
    pub fn hardcore() -> Self {
        let mut cfg = Self::default();
        cfg.development.injury_chance = 0.04;
        cfg.development.loss_morale = -20.0;
        cfg.development.win_morale = 8.0;
        cfg.development.contract_departure_chance = 0.65;
        cfg.match_sim.injury_event_chance = 0.3;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would break engine invariants.
    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("match_sim.bonus_goal_chance", self.match_sim.bonus_goal_chance),
            ("match_sim.red_card_chance", self.match_sim.red_card_chance),
            ("match_sim.injury_event_chance", self.match_sim.injury_event_chance),
            ("development.injury_chance", self.development.injury_chance),
            ("development.contract_departure_chance", self.development.contract_departure_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(CareerError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.match_sim.min_yellow_cards > self.match_sim.max_yellow_cards {
            return Err(CareerError::InvalidConfig(format!(
                "min_yellow_cards {} exceeds max_yellow_cards {}",
                self.match_sim.min_yellow_cards, self.match_sim.max_yellow_cards
            )));
        }
        if self.match_sim.home_field_advantage <= 0.0 {
            return Err(CareerError::InvalidConfig(
                "home_field_advantage must be positive".to_string(),
            ));
        }
        if self.development.max_injury_weeks == 0 {
            return Err(CareerError::InvalidConfig("max_injury_weeks must be >= 1".to_string()));
        }
        if self.season.matchdays_per_month == 0 || self.season.recent_results_len == 0 {
            return Err(CareerError::InvalidConfig(
                "season cadence values must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = BalanceConfig::default();
        assert!((cfg.match_sim.home_field_advantage - 1.1).abs() < 1e-6);
        assert_eq!(cfg.development.max_injury_weeks, 4);
        assert_eq!(cfg.season.recent_results_len, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_differ_in_expected_direction() {
        let realistic = BalanceConfig::realistic();
        let arcade = BalanceConfig::arcade();
        let hardcore = BalanceConfig::hardcore();

        assert!(arcade.match_sim.attacking_xg_factor > realistic.match_sim.attacking_xg_factor);
        assert!(arcade.development.injury_chance < realistic.development.injury_chance);
        assert!(hardcore.development.injury_chance > realistic.development.injury_chance);
        assert!(hardcore.development.loss_morale < realistic.development.loss_morale);
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = "match_sim:\n  home_field_advantage: 1.2\n  bonus_goal_chance: 0.3\n  style_possession_swing: 10.0\n  attacking_xg_factor: 1.3\n  defensive_xg_factor: 0.6\n  min_yellow_cards: 1\n  max_yellow_cards: 3\n  red_card_chance: 0.1\n  injury_event_chance: 0.2\n";
        let cfg = BalanceConfig::from_yaml_str(yaml).unwrap();
        assert!((cfg.match_sim.home_field_advantage - 1.2).abs() < 1e-6);
        assert_eq!(cfg.match_sim.max_yellow_cards, 3);
        // Sections missing from the document fall back to defaults
        assert_eq!(cfg.development, DevelopmentConfig::default());
    }

    #[test]
    fn test_invalid_probability_rejected() {
        let mut cfg = BalanceConfig::default();
        cfg.development.injury_chance = 1.5;
        assert!(matches!(cfg.validate(), Err(CareerError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_serialization() {
        let cfg = BalanceConfig::hardcore();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed = BalanceConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
