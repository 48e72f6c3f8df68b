use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = crate::error::CareerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(crate::error::CareerError::InvalidParameter(format!(
                "unknown difficulty '{other}'"
            ))),
        }
    }
}

/// Targets and reward scale per board difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    pub position_target: u32,
    pub points_target: u32,
    pub bonus_multiplier: f64,
}

impl DifficultySettings {
    pub const EASY: Self = Self { position_target: 10, points_target: 45, bonus_multiplier: 1.0 };
    pub const MEDIUM: Self = Self { position_target: 6, points_target: 60, bonus_multiplier: 1.5 };
    pub const HARD: Self = Self { position_target: 3, points_target: 75, bonus_multiplier: 2.0 };

    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::EASY,
            Difficulty::Medium => Self::MEDIUM,
            Difficulty::Hard => Self::HARD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveType {
    LeaguePosition,
    PointsTarget,
    CupWin,
    PlayerDevelopment,
    Financial,
}

/// One board objective for a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonObjective {
    pub id: String,
    pub objective_type: ObjectiveType,
    pub title: String,
    pub description: String,
    pub target: u32,
    pub current: u32,
    pub reward: f64,
    pub penalty: f64,
    pub difficulty: Difficulty,
    pub completed: bool,
    /// Percent, may exceed 100 for counting objectives
    pub progress: f32,
}

impl SeasonObjective {
    /// Set the current value and recompute progress. Completion is sticky.
    ///
    /// League position counts down: finishing at or above the target is
    /// 100%, and 0 means no position yet.
    pub fn set_current(&mut self, value: u32) {
        self.current = value;
        self.progress = match self.objective_type {
            ObjectiveType::LeaguePosition => position_progress(self.target, value),
            _ if self.target == 0 => 100.0,
            _ => value as f32 / self.target as f32 * 100.0,
        };
        if self.progress >= 100.0 {
            self.completed = true;
        }
    }

    pub fn earned_reward(&self) -> f64 {
        if self.completed {
            self.reward
        } else {
            0.0
        }
    }
}

fn position_progress(target: u32, position: u32) -> f32 {
    if position == 0 {
        return 0.0;
    }
    (target as f32 / position as f32 * 100.0).min(100.0)
}

/// The five objectives for a season, ids `obj_1` to `obj_5`.
pub fn generate_objectives(
    season_year: u16,
    difficulty: Difficulty,
    current_position: u32,
    season_matches: u32,
) -> Vec<SeasonObjective> {
    let settings = DifficultySettings::for_difficulty(difficulty);
    let m = settings.bonus_multiplier;

    let specs = [
        (
            ObjectiveType::LeaguePosition,
            format!("Finish in Top {}", settings.position_target),
            format!("Finish the {season_year} season in the top {} positions", settings.position_target),
            settings.position_target,
            50_000.0,
            20_000.0,
        ),
        (
            ObjectiveType::PointsTarget,
            "Accumulate Points".to_string(),
            format!("Earn at least {} points this season", settings.points_target),
            settings.points_target,
            75_000.0,
            30_000.0,
        ),
        (
            ObjectiveType::CupWin,
            "Win Domestic Cup".to_string(),
            "Win the domestic cup competition".to_string(),
            1,
            100_000.0,
            50_000.0,
        ),
        (
            ObjectiveType::PlayerDevelopment,
            "Develop Young Talent".to_string(),
            "Develop 3 young players (under 23) to 80+ overall rating".to_string(),
            3,
            40_000.0,
            15_000.0,
        ),
        (
            ObjectiveType::Financial,
            "Maintain Financial Health".to_string(),
            "Keep monthly profit positive throughout the season".to_string(),
            season_matches,
            30_000.0,
            25_000.0,
        ),
    ];

    specs
        .into_iter()
        .enumerate()
        .map(|(i, (objective_type, title, description, target, reward, penalty))| {
            let mut objective = SeasonObjective {
                id: format!("obj_{}", i + 1),
                objective_type,
                title,
                description,
                target,
                current: 0,
                reward: reward * m,
                penalty,
                difficulty,
                completed: false,
                progress: 0.0,
            };
            if objective_type == ObjectiveType::LeaguePosition {
                objective.current = current_position;
                objective.progress = position_progress(target, current_position);
            }
            objective
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_objectives_with_ids() {
        let objectives = generate_objectives(2025, Difficulty::Medium, 0, 38);
        assert_eq!(objectives.len(), 5);
        let ids: Vec<&str> = objectives.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["obj_1", "obj_2", "obj_3", "obj_4", "obj_5"]);
        assert_eq!(objectives[0].target, 6);
        assert_eq!(objectives[0].title, "Finish in Top 6");
        assert_eq!(objectives[1].target, 60);
        assert_eq!(objectives[1].reward, 112_500.0);
        assert_eq!(objectives[4].target, 38);
        assert!(objectives.iter().all(|o| !o.completed));
    }

    #[test]
    fn test_difficulty_scales_targets() {
        let easy = generate_objectives(2025, Difficulty::Easy, 0, 38);
        let hard = generate_objectives(2025, Difficulty::Hard, 0, 38);
        assert_eq!((easy[0].target, easy[1].target), (10, 45));
        assert_eq!((hard[0].target, hard[1].target), (3, 75));
        assert_eq!(hard[2].reward, 200_000.0);
        assert_eq!(easy[2].reward, 100_000.0);
    }

    #[test]
    fn test_position_progress_counts_down() {
        let mut obj = generate_objectives(2025, Difficulty::Medium, 12, 38).remove(0);
        assert!((obj.progress - 50.0).abs() < 1e-4);
        obj.set_current(4);
        assert!(obj.completed);
        obj.set_current(15);
        assert!(obj.completed, "completion is never revoked");
        assert!((obj.progress - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_points_progress() {
        let mut obj = generate_objectives(2025, Difficulty::Easy, 0, 38).remove(1);
        obj.set_current(30);
        assert!((obj.progress - 66.666_67).abs() < 1e-3);
        assert!(!obj.completed);
        assert_eq!(obj.earned_reward(), 0.0);
        obj.set_current(45);
        assert!(obj.completed);
        assert_eq!(obj.earned_reward(), 75_000.0);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
