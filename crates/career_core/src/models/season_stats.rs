use serde::{Deserialize, Serialize};

use super::match_result::MatchOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BestPlayer {
    pub name: String,
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TopScorer {
    pub player_id: u32,
    pub name: String,
    pub goals: u32,
}

/// The managed club's running totals for one season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonStats {
    pub year: u16,
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// 0 until the first table update
    pub league_position: u32,
    pub points_total: u32,
    #[serde(default)]
    pub best_player: BestPlayer,
    #[serde(default)]
    pub top_scorer: TopScorer,
    pub win_streak: u32,
    /// Wins in the last five
    pub current_form: u32,
}

impl SeasonStats {
    pub fn new(year: u16) -> Self {
        Self {
            year,
            matches_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            league_position: 0,
            points_total: 0,
            best_player: BestPlayer::default(),
            top_scorer: TopScorer::default(),
            win_streak: 0,
            current_form: 0,
        }
    }

    pub fn record(&mut self, goals_for: u8, goals_against: u8) -> MatchOutcome {
        let outcome = MatchOutcome::from_scores(goals_for, goals_against);
        self.matches_played += 1;
        self.goals_for += u32::from(goals_for);
        self.goals_against += u32::from(goals_against);
        self.points_total += outcome.points();
        match outcome {
            MatchOutcome::Win => {
                self.wins += 1;
                self.win_streak += 1;
            }
            MatchOutcome::Draw => {
                self.draws += 1;
                self.win_streak = 0;
            }
            MatchOutcome::Loss => {
                self.losses += 1;
                self.win_streak = 0;
            }
        }
        outcome
    }

    /// 0.0-1.0; zero before the first match.
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.matches_played as f64
        }
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for as i32 - self.goals_against as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tracks_streak_and_points() {
        let mut stats = SeasonStats::new(2025);
        assert_eq!(stats.record(2, 0), MatchOutcome::Win);
        assert_eq!(stats.record(3, 1), MatchOutcome::Win);
        assert_eq!(stats.win_streak, 2);
        assert_eq!(stats.record(1, 1), MatchOutcome::Draw);
        assert_eq!(stats.win_streak, 0);
        stats.record(0, 2);

        assert_eq!((stats.wins, stats.draws, stats.losses), (2, 1, 1));
        assert_eq!(stats.points_total, 7);
        assert_eq!(stats.goal_difference(), 2);
        assert!((stats.win_rate() - 0.5).abs() < 1e-9);
    }
}
