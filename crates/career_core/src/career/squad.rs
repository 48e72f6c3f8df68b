//! Squad analytics for the managed club.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::player::{Player, Position};

/// Mean overall of the players at `position`, 0 if there are none.
pub fn squad_average_by_position(players: &[Player], position: Position) -> f32 {
    let ratings: Vec<f32> =
        players.iter().filter(|p| p.position == position).map(|p| p.overall_rating).collect();
    if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f32>() / ratings.len() as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeProfile {
    VeryYoung,
    Young,
    Balanced,
    SlightlyAging,
    Aging,
}

impl AgeProfile {
    pub fn from_average_age(avg_age: f32) -> Self {
        if avg_age < 26.0 {
            AgeProfile::VeryYoung
        } else if avg_age < 28.0 {
            AgeProfile::Young
        } else if avg_age > 31.0 {
            AgeProfile::Aging
        } else if avg_age > 29.0 {
            AgeProfile::SlightlyAging
        } else {
            AgeProfile::Balanced
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeProfile::VeryYoung => "Very Young",
            AgeProfile::Young => "Young",
            AgeProfile::Balanced => "Balanced",
            AgeProfile::SlightlyAging => "Slightly Aging",
            AgeProfile::Aging => "Aging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadBalance {
    pub strong_positions: Vec<Position>,
    pub weak_positions: Vec<Position>,
    pub age_profile: AgeProfile,
    pub suggestions: Vec<String>,
}

/// Positions more than 5 points above or below the mean of position
/// averages, an age profile, and depth warnings per line.
pub fn analyze_squad_balance(players: &[Player]) -> SquadBalance {
    if players.is_empty() {
        return SquadBalance {
            strong_positions: Vec::new(),
            weak_positions: Vec::new(),
            age_profile: AgeProfile::Balanced,
            suggestions: vec!["Squad is empty; sign players before the season starts".to_string()],
        };
    }

    let mut by_position: BTreeMap<&str, (Position, Vec<f32>)> = BTreeMap::new();
    for p in players {
        by_position
            .entry(p.position.as_str())
            .or_insert_with(|| (p.position, Vec::new()))
            .1
            .push(p.overall_rating);
    }
    let averages: Vec<(Position, f32)> = by_position
        .values()
        .map(|(pos, ratings)| (*pos, ratings.iter().sum::<f32>() / ratings.len() as f32))
        .collect();
    let overall = averages.iter().map(|(_, a)| a).sum::<f32>() / averages.len() as f32;

    let strong_positions = averages.iter().filter(|(_, a)| *a > overall + 5.0).map(|(p, _)| *p).collect();
    let weak_positions: Vec<Position> =
        averages.iter().filter(|(_, a)| *a < overall - 5.0).map(|(p, _)| *p).collect();

    let avg_age = players.iter().map(|p| p.age as f32).sum::<f32>() / players.len() as f32;

    let mut suggestions = Vec::new();
    if !weak_positions.is_empty() {
        let names: Vec<&str> = weak_positions.iter().map(|p| p.as_str()).collect();
        suggestions.push(format!("Strengthen {} positions", names.join(", ")));
    }
    if avg_age > 30.0 {
        suggestions.push("Consider rejuvenating squad with younger players".to_string());
    }
    if avg_age < 25.0 {
        suggestions.push("Squad may lack experience; consider adding experienced players".to_string());
    }

    let defenders = players.iter().filter(|p| p.position.is_defender()).count();
    let midfielders = players.iter().filter(|p| p.position.is_midfielder()).count();
    let forwards = players.iter().filter(|p| p.position.is_forward()).count();
    if defenders < 4 {
        suggestions.push("Critical: Add defenders to squad".to_string());
    }
    if midfielders < 3 {
        suggestions.push("Critical: Add midfielders to squad".to_string());
    }
    if forwards < 2 {
        suggestions.push("Add forwards/wingers for depth".to_string());
    }

    SquadBalance {
        strong_positions,
        weak_positions,
        age_profile: AgeProfile::from_average_age(avg_age),
        suggestions,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquadProjection {
    pub projected_rating: f32,
    pub players_leaving: u32,
    pub players_staying: u32,
    /// Share of the squad still under contract, percent
    pub confidence: u8,
}

/// Next season's average for players still under contract after
/// `current_year`.
pub fn project_squad_strength(players: &[Player], current_year: u16) -> SquadProjection {
    let mut total = 0.0;
    let mut leaving = 0;
    let mut staying = 0;

    for p in players {
        if p.contract_end_year <= current_year {
            leaving += 1;
            continue;
        }
        staying += 1;
        total += if p.age < 25 {
            p.overall_rating + ((p.potential - p.overall_rating) * 0.1).min(3.0)
        } else if p.age < 30 {
            p.overall_rating + 0.5
        } else {
            (p.overall_rating - 1.0).max(40.0)
        };
    }

    let confidence = if players.is_empty() { 0.0 } else { staying as f32 / players.len() as f32 };
    SquadProjection {
        projected_rating: if staying == 0 { 0.0 } else { total / staying as f32 },
        players_leaving: leaving,
        players_staying: staying,
        confidence: (confidence * 100.0).round() as u8,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageStatus {
    Overspent,
    Critical,
    Tight,
    Comfortable,
    Abundant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WageBudget {
    pub percentage_used: f64,
    pub remaining: f64,
    pub status: WageStatus,
}

impl WageBudget {
    pub fn new(available_budget: f64, used_wages: f64) -> Self {
        let percentage_used = if available_budget > 0.0 {
            used_wages / available_budget * 100.0
        } else if used_wages > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };
        let status = if percentage_used > 100.0 {
            WageStatus::Overspent
        } else if percentage_used > 90.0 {
            WageStatus::Critical
        } else if percentage_used > 75.0 {
            WageStatus::Tight
        } else if percentage_used > 50.0 {
            WageStatus::Comfortable
        } else {
            WageStatus::Abundant
        };
        Self { percentage_used, remaining: available_budget - used_wages, status }
    }

    pub fn can_sign(&self, wage: f64) -> bool {
        wage <= self.remaining
    }
}

/// Development multiplier from how far the club's average sits above the league's.
pub fn club_reputation_multiplier(club_average: f32, league_average: f32) -> f32 {
    1.0 + (club_average - league_average) * 0.005
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::PlayerAttributes;

    fn p(id: u32, position: Position, age: u8, rating: f32) -> Player {
        Player::new(id, "A", "B", position, age, PlayerAttributes::uniform(60)).with_overall(rating)
    }

    #[test]
    fn test_average_by_position() {
        let squad = vec![p(1, Position::CB, 25, 70.0), p(2, Position::CB, 25, 80.0), p(3, Position::ST, 25, 90.0)];
        assert_eq!(squad_average_by_position(&squad, Position::CB), 75.0);
        assert_eq!(squad_average_by_position(&squad, Position::GK), 0.0);
    }

    #[test]
    fn test_balance_flags_thin_lines() {
        let squad = vec![
            p(1, Position::GK, 33, 60.0),
            p(2, Position::CB, 32, 70.0),
            p(3, Position::CM, 31, 70.0),
            p(4, Position::ST, 34, 85.0),
        ];
        let balance = analyze_squad_balance(&squad);
        assert_eq!(balance.strong_positions, vec![Position::ST]);
        assert_eq!(balance.weak_positions, vec![Position::GK]);
        assert_eq!(balance.age_profile, AgeProfile::Aging);
        assert!(balance.suggestions.iter().any(|s| s == "Strengthen GK positions"));
        assert!(balance.suggestions.iter().any(|s| s.contains("defenders")));
        assert!(balance.suggestions.iter().any(|s| s.contains("midfielders")));
        assert!(balance.suggestions.iter().any(|s| s.contains("forwards")));
        assert!(balance.suggestions.iter().any(|s| s.contains("rejuvenating")));
    }

    #[test]
    fn test_projection() {
        let squad = vec![
            p(1, Position::CM, 22, 70.0).with_potential(90.0).with_contract_end(2027),
            p(2, Position::CM, 27, 70.0).with_contract_end(2027),
            p(3, Position::CM, 33, 70.0).with_contract_end(2027),
            p(4, Position::CM, 29, 70.0).with_contract_end(2025),
        ];
        let proj = project_squad_strength(&squad, 2025);
        assert_eq!(proj.players_leaving, 1);
        assert_eq!(proj.players_staying, 3);
        assert_eq!(proj.confidence, 75);
        // (72 + 70.5 + 69) / 3
        assert!((proj.projected_rating - 70.5).abs() < 1e-4);
    }

    #[test]
    fn test_wage_budget() {
        let tight = WageBudget::new(1_000_000.0, 800_000.0);
        assert_eq!(tight.status, WageStatus::Tight);
        assert!(tight.can_sign(200_000.0));
        assert!(!tight.can_sign(200_001.0));
        assert_eq!(WageBudget::new(0.0, 10.0).status, WageStatus::Overspent);
        assert_eq!(WageBudget::new(100.0, 10.0).status, WageStatus::Abundant);
    }

    #[test]
    fn test_reputation_multiplier() {
        assert!((club_reputation_multiplier(80.0, 70.0) - 1.05).abs() < 1e-6);
    }
}
