use serde::{Deserialize, Serialize};

use super::formation::Formation;
use super::player::{Player, Position};
use crate::error::{CareerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// Minimal per-player view the engine needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineupPlayer {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub overall_rating: f32,
    /// Falls back to a fraction of the overall rating when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shooting: Option<u8>,
}

impl LineupPlayer {
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.full_name(),
            position: player.position,
            overall_rating: player.overall_rating,
            shooting: Some(player.attributes.shooting),
        }
    }

    /// Forwards default to 80% of the rating, everyone else to 60%.
    pub fn shooting_or_estimate(&self) -> f32 {
        match self.shooting {
            Some(value) => value as f32,
            None if self.position.is_forward() => self.overall_rating * 0.8,
            None => self.overall_rating * 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamSetup {
    pub club_id: u32,
    pub club_name: String,
    pub players: Vec<LineupPlayer>,
    pub formation: Formation,
    /// 0-100
    pub morale: f32,
}

impl TeamSetup {
    /// Starting XI from the available players of a squad, morale averaged
    /// over all of them.
    ///
    /// Picks the best-rated goalkeeper, then the best players of each line
    /// the formation asks for. Lines the squad cannot fill are made up from
    /// the best remaining available players.
    pub fn from_squad(club_id: u32, club_name: impl Into<String>, squad: &[Player], formation: Formation) -> Self {
        let players = select_starting_xi(squad, &formation).into_iter().map(LineupPlayer::from_player).collect();
        let morale = if squad.is_empty() {
            50.0
        } else {
            squad.iter().map(|p| p.morale).sum::<f32>() / squad.len() as f32
        };
        Self { club_id, club_name: club_name.into(), players, formation, morale }
    }

    pub fn mean_rating(&self) -> f32 {
        if self.players.is_empty() {
            return 0.0;
        }
        self.players.iter().map(|p| p.overall_rating).sum::<f32>() / self.players.len() as f32
    }
}

/// Players on the pitch at kick-off.
pub const STARTING_XI: usize = 11;

/// Best available players by line, in lineup order (GK, defence, midfield,
/// attack, then fillers). Ties keep squad order.
pub fn select_starting_xi<'a>(squad: &'a [Player], formation: &Formation) -> Vec<&'a Player> {
    let mut pool: Vec<&Player> = squad.iter().filter(|p| p.is_available()).collect();
    // sort_by is stable
    pool.sort_by(|a, b| b.overall_rating.total_cmp(&a.overall_rating));

    let lines: [(usize, fn(&Position) -> bool); 4] = [
        (1, Position::is_goalkeeper),
        (usize::from(formation.defenders), Position::is_defender),
        (usize::from(formation.midfielders), Position::is_midfielder),
        (usize::from(formation.forwards), Position::is_forward),
    ];

    let mut picked = vec![false; pool.len()];
    let mut lineup = Vec::with_capacity(STARTING_XI);
    for (count, in_line) in lines {
        let mut taken = 0;
        for (i, player) in pool.iter().enumerate() {
            if taken == count || lineup.len() == STARTING_XI {
                break;
            }
            if !picked[i] && in_line(&player.position) {
                picked[i] = true;
                lineup.push(*player);
                taken += 1;
            }
        }
    }

    for (i, player) in pool.iter().enumerate() {
        if lineup.len() == STARTING_XI {
            break;
        }
        if !picked[i] {
            picked[i] = true;
            lineup.push(*player);
        }
    }
    lineup
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSetup {
    pub home: TeamSetup,
    pub away: TeamSetup,
    /// 1.0-1.2 multiplier applied to the home side
    pub home_field_advantage: f32,
    #[serde(default)]
    pub neutral_venue: bool,
}

impl MatchSetup {
    pub fn new(home: TeamSetup, away: TeamSetup) -> Self {
        Self { home, away, home_field_advantage: 1.1, neutral_venue: false }
    }

    pub fn with_home_advantage(mut self, factor: f32) -> Self {
        self.home_field_advantage = factor;
        self
    }

    pub fn neutral(mut self) -> Self {
        self.neutral_venue = true;
        self
    }

    /// Both lineups must have at least one player.
    pub fn validate(&self) -> Result<()> {
        if self.home.players.is_empty() {
            return Err(CareerError::EmptyLineup { side: "home".to_string() });
        }
        if self.away.players.is_empty() {
            return Err(CareerError::EmptyLineup { side: "away".to_string() });
        }
        Ok(())
    }

    pub fn team(&self, side: TeamSide) -> &TeamSetup {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::formation::FormationCode;
    use crate::models::player::PlayerAttributes;

    fn lineup_player(id: u32, position: Position, rating: f32) -> LineupPlayer {
        LineupPlayer { id, name: format!("P{id}"), position, overall_rating: rating, shooting: None }
    }

    #[test]
    fn test_validate_rejects_empty_lineups() {
        let full = TeamSetup {
            club_id: 1,
            club_name: "A".into(),
            players: vec![lineup_player(1, Position::ST, 70.0)],
            formation: Formation::default(),
            morale: 50.0,
        };
        let empty = TeamSetup { club_id: 2, club_name: "B".into(), players: vec![], ..full.clone() };

        assert!(MatchSetup::new(full.clone(), full.clone()).validate().is_ok());
        assert_eq!(
            MatchSetup::new(full.clone(), empty.clone()).validate(),
            Err(CareerError::EmptyLineup { side: "away".into() })
        );
        assert_eq!(
            MatchSetup::new(empty, full).validate(),
            Err(CareerError::EmptyLineup { side: "home".into() })
        );
    }

    #[test]
    fn test_shooting_fallback() {
        assert!((lineup_player(1, Position::ST, 80.0).shooting_or_estimate() - 64.0).abs() < 1e-4);
        assert!((lineup_player(2, Position::CM, 80.0).shooting_or_estimate() - 48.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_squad_skips_injured() {
        let mut injured = Player::new(2, "I", "Njured", Position::CB, 28, PlayerAttributes::uniform(60));
        injured.injury_weeks = 2;
        let squad = vec![
            Player::new(1, "F", "It", Position::ST, 24, PlayerAttributes::uniform(70)),
            injured,
        ];
        let team = TeamSetup::from_squad(9, "Club", &squad, Formation::default());
        assert_eq!(team.players.len(), 1);
        assert_eq!(team.players[0].id, 1);
    }

    fn squad_of(positions: &[Position], rating: f32) -> Vec<Player> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| Player::new(i as u32 + 1, "S", format!("P{i}"), pos, 25, PlayerAttributes::uniform(60)).with_overall(rating))
            .collect()
    }

    #[test]
    fn test_from_squad_picks_eleven_by_formation() {
        let shape = [
            Position::GK,
            Position::CB,
            Position::CB,
            Position::LB,
            Position::RB,
            Position::CM,
            Position::CM,
            Position::CAM,
            Position::LW,
            Position::RW,
            Position::ST,
        ];
        let mut squad = squad_of(&shape, 65.0);
        // Stronger understudies, ids 12..=22
        squad.extend(squad_of(&shape, 75.0).into_iter().map(|mut p| {
            p.id += 11;
            p
        }));

        let team = TeamSetup::from_squad(1, "Club", &squad, Formation::preset(FormationCode::F433));
        assert_eq!(team.players.len(), STARTING_XI);
        assert!(team.players.iter().all(|p| p.id > 11));
        assert_eq!(team.players[0].position, Position::GK);
        assert_eq!(team.players.iter().filter(|p| p.position.is_goalkeeper()).count(), 1);
        assert_eq!(team.players.iter().filter(|p| p.position.is_defender()).count(), 4);
        assert_eq!(team.players.iter().filter(|p| p.position.is_midfielder()).count(), 3);
        assert_eq!(team.players.iter().filter(|p| p.position.is_forward()).count(), 3);
    }

    #[test]
    fn test_from_squad_fills_short_lines() {
        // No goalkeeper, no defenders: the best of the rest make up the XI
        let mut squad = squad_of(&[Position::ST; 8], 70.0);
        squad.extend(squad_of(&[Position::CM; 6], 60.0).into_iter().map(|mut p| {
            p.id += 8;
            p
        }));
        let team = TeamSetup::from_squad(1, "Club", &squad, Formation::preset(FormationCode::F433));
        assert_eq!(team.players.len(), STARTING_XI);
        assert_eq!(team.players.iter().filter(|p| p.position == Position::ST).count(), 8);

        let small = squad_of(&[Position::GK, Position::CB, Position::ST], 70.0);
        assert_eq!(TeamSetup::from_squad(1, "Club", &small, Formation::default()).players.len(), 3);
    }
}
