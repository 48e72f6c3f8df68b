use serde::{Deserialize, Serialize};

use crate::error::{CareerError, Result};
use crate::models::season_stats::SeasonStats;

use super::objectives::{generate_objectives, Difficulty, SeasonObjective};

/// The board's view of the manager for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardExpectation {
    pub season_year: u16,
    pub difficulty: Difficulty,
    pub objectives: Vec<SeasonObjective>,
    /// 0-100
    pub job_security: f32,
    /// 0-100
    pub manager_rating: f32,
    /// 0-100
    pub board_confidence: f32,
    /// 0-100
    pub pressure_level: f32,
}

impl BoardExpectation {
    pub fn new(season_year: u16, difficulty: Difficulty, current_position: u32, season_matches: u32) -> Self {
        let mut expectation = Self {
            season_year,
            difficulty,
            objectives: generate_objectives(season_year, difficulty, current_position, season_matches),
            job_security: 50.0,
            manager_rating: 50.0,
            board_confidence: 50.0,
            pressure_level: 0.0,
        };
        expectation.pressure_level = expectation.pressure_level_for(expectation.job_security);
        expectation
    }

    pub fn objective(&self, id: &str) -> Option<&SeasonObjective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    /// Set an objective's current value.
    pub fn update_progress(&mut self, objective_id: &str, value: u32) -> Result<()> {
        let objective = self
            .objectives
            .iter_mut()
            .find(|o| o.id == objective_id)
            .ok_or_else(|| CareerError::ObjectiveNotFound(objective_id.to_string()))?;
        objective.set_current(value);
        Ok(())
    }

    pub fn completed_count(&self) -> usize {
        self.objectives.iter().filter(|o| o.completed).count()
    }

    /// 50 base, +10 per completed objective, win-rate and points-per-game
    /// adjustments, clamped to 0-100.
    pub fn job_security_for(&self, played: u32, won: u32, drawn: u32) -> f32 {
        let (win_rate, ppg) = if played > 0 {
            (won as f32 / played as f32 * 100.0, (won * 3 + drawn) as f32 / played as f32)
        } else {
            (0.0, 0.0)
        };

        let mut score = 50.0 + self.completed_count() as f32 * 10.0;

        if win_rate >= 60.0 {
            score += 15.0;
        } else if win_rate >= 45.0 {
            score += 5.0;
        } else if win_rate < 30.0 {
            score -= 20.0;
        }

        if ppg >= 2.0 {
            score += 10.0;
        } else if ppg < 1.5 {
            score -= 15.0;
        }

        score.clamp(0.0, 100.0)
    }

    /// 50 base plus up to 30 from mean objective progress, up to 15 from the
    /// manager rating, and up to 10 once more than half the season is gone.
    pub fn board_confidence_for(&self, manager_rating: f32, matchdays_played: u32, season_matches: u32) -> f32 {
        let mut confidence = 50.0;

        if !self.objectives.is_empty() {
            let mean_progress =
                self.objectives.iter().map(|o| o.progress.min(100.0)).sum::<f32>() / self.objectives.len() as f32;
            confidence += mean_progress / 100.0 * 30.0;
        }

        confidence += manager_rating.clamp(0.0, 100.0) / 100.0 * 15.0;

        if season_matches > 0 {
            let completion = matchdays_played as f32 / season_matches as f32 * 100.0;
            if completion > 50.0 {
                confidence += ((completion - 50.0) / 5.0).min(10.0);
            }
        }

        confidence.clamp(0.0, 100.0)
    }

    pub fn pressure_level_for(&self, job_security: f32) -> f32 {
        let mut pressure = if self.objectives.is_empty() {
            0.0
        } else {
            let open = self.objectives.iter().filter(|o| !o.completed).count();
            open as f32 / self.objectives.len() as f32 * 50.0
        };

        if job_security < 30.0 {
            pressure += 40.0;
        } else if job_security < 50.0 {
            pressure += 20.0;
        } else if job_security > 80.0 {
            pressure -= 10.0;
        }

        pressure.clamp(0.0, 100.0)
    }

    /// Recompute every derived metric from the season so far.
    pub fn refresh(&mut self, stats: &SeasonStats, season_matches: u32) {
        self.manager_rating = manager_rating(stats, expected_position(self.difficulty));
        self.job_security = self.job_security_for(stats.matches_played, stats.wins, stats.draws);
        self.board_confidence =
            self.board_confidence_for(self.manager_rating, stats.matches_played, season_matches);
        self.pressure_level = self.pressure_level_for(self.job_security);
    }

    /// Sacked below 10 security, or with three hard objectives open under 25%.
    pub fn check_for_sacking(&self) -> bool {
        if self.job_security < 10.0 {
            return true;
        }
        let failing = self
            .objectives
            .iter()
            .filter(|o| o.difficulty == Difficulty::Hard && !o.completed && o.progress < 25.0)
            .count();
        failing >= 3
    }

    pub fn total_season_bonus(&self) -> f64 {
        self.objectives.iter().map(|o| o.earned_reward()).sum()
    }

    pub fn job_status(&self) -> &'static str {
        manager_job_status(self.job_security)
    }
}

/// League finish the board treats as par for a difficulty.
pub fn expected_position(difficulty: Difficulty) -> u32 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 5,
        Difficulty::Hard => 3,
    }
}

pub fn manager_job_status(job_security: f32) -> &'static str {
    if job_security >= 80.0 {
        "Secure"
    } else if job_security >= 60.0 {
        "Stable"
    } else if job_security >= 40.0 {
        "Under Scrutiny"
    } else if job_security >= 20.0 {
        "In Danger"
    } else {
        "Critical"
    }
}

/// 0-100 rating from points efficiency, league position against
/// expectation, and win rate. 50 before any match.
pub fn manager_rating(stats: &SeasonStats, expected_position: u32) -> f32 {
    if stats.matches_played == 0 {
        return 50.0;
    }
    let mut rating: f32 = 50.0;

    let efficiency = stats.points_total as f32 / (stats.matches_played * 3) as f32 * 100.0;
    if efficiency > 70.0 {
        rating += 30.0;
    } else if efficiency > 60.0 {
        rating += 20.0;
    } else if efficiency > 50.0 {
        rating += 10.0;
    }

    if stats.league_position > 0 {
        if stats.league_position < expected_position {
            rating += 15.0;
        } else if stats.league_position > expected_position + 3 {
            rating -= 15.0;
        }
    }

    let win_rate = stats.win_rate() as f32 * 100.0;
    if win_rate > 50.0 {
        rating += 10.0;
    } else if win_rate < 30.0 {
        rating -= 15.0;
    }

    rating.clamp(0.0, 100.0)
}
