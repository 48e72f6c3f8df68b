use serde::{Deserialize, Serialize};

use super::match_setup::TeamSide;
use super::player::Position;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchEventType {
    Goal,
    Assist,
    YellowCard,
    RedCard,
    Injury,
}

impl MatchEventType {
    /// Form impact attached to each event kind.
    pub fn impact(&self) -> i8 {
        match self {
            MatchEventType::Goal => 5,
            MatchEventType::Assist => 3,
            MatchEventType::YellowCard => -1,
            MatchEventType::RedCard => -3,
            MatchEventType::Injury => -2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchEvent {
    pub minute: u8,
    pub event_type: MatchEventType,
    pub team: TeamSide,
    pub player_id: u32,
    pub player_name: String,
    pub position: Position,
    pub description: String,
    /// -5..=5
    pub impact: i8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CardCount {
    pub yellow: u8,
    pub red: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchStatistics {
    pub team: TeamSide,
    pub possession: f32,
    pub expected_goals: f32,
    pub shots: u16,
    pub shots_on_target: u16,
    pub passes: u16,
    pub pass_accuracy: f32,
    pub tackles: u16,
    pub interceptions: u16,
    pub fouls: u16,
    pub cards: CardCount,
    pub injuries: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManOfTheMatch {
    pub player_id: u32,
    pub name: String,
    pub team: TeamSide,
    /// 7.5-10.0
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamStats {
    pub home: MatchStatistics,
    pub away: MatchStatistics,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchDuration {
    #[default]
    FullTime,
    ExtraTime,
    Penalties,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub home_club_id: u32,
    pub away_club_id: u32,
    pub home_score: u8,
    pub away_score: u8,
    pub events: Vec<MatchEvent>,
    pub stats: TeamStats,
    pub man_of_the_match: ManOfTheMatch,
    #[serde(default)]
    pub duration: MatchDuration,
}

/// Result from one side's point of view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    pub fn from_scores(own: u8, opponent: u8) -> Self {
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            MatchOutcome::Win => 3,
            MatchOutcome::Draw => 1,
            MatchOutcome::Loss => 0,
        }
    }
}

impl MatchResult {
    pub fn outcome_for(&self, side: TeamSide) -> MatchOutcome {
        match side {
            TeamSide::Home => MatchOutcome::from_scores(self.home_score, self.away_score),
            TeamSide::Away => MatchOutcome::from_scores(self.away_score, self.home_score),
        }
    }

    /// (goals for, goals against) for a side.
    pub fn score_for(&self, side: TeamSide) -> (u8, u8) {
        match side {
            TeamSide::Home => (self.home_score, self.away_score),
            TeamSide::Away => (self.away_score, self.home_score),
        }
    }

    pub fn events_for_player(&self, player_id: u32) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(move |e| e.player_id == player_id)
    }

    pub fn goals_by(&self, player_id: u32) -> usize {
        self.events_for_player(player_id)
            .filter(|e| e.event_type == MatchEventType::Goal)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_points() {
        assert_eq!(MatchOutcome::from_scores(2, 1), MatchOutcome::Win);
        assert_eq!(MatchOutcome::from_scores(1, 1), MatchOutcome::Draw);
        assert_eq!(MatchOutcome::from_scores(0, 3), MatchOutcome::Loss);
        assert_eq!(MatchOutcome::Win.points(), 3);
        assert_eq!(MatchOutcome::Draw.points(), 1);
        assert_eq!(MatchOutcome::Loss.points(), 0);
    }

    #[test]
    fn test_event_impacts_within_bounds() {
        for kind in [
            MatchEventType::Goal,
            MatchEventType::Assist,
            MatchEventType::YellowCard,
            MatchEventType::RedCard,
            MatchEventType::Injury,
        ] {
            assert!((-5..=5).contains(&kind.impact()));
        }
    }
}
