//! In-match tactical instructions.
//!
//! Each instruction shifts possession, attacking power and defensive
//! strength by a fixed delta scaled by how well the formation and the
//! players suit it. Morale cost is paid in full regardless of effectiveness.

use serde::{Deserialize, Serialize};

use crate::models::formation::{BuildUp, FormationCode, FormationStyle, Pressing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TacticalInstruction {
    #[default]
    Balanced,
    Attacking,
    Defensive,
    CounterAttack,
    Possession,
    HighPress,
    ParkTheBus,
    LongBall,
}

impl TacticalInstruction {
    pub const ALL: [TacticalInstruction; 8] = [
        TacticalInstruction::Balanced,
        TacticalInstruction::Attacking,
        TacticalInstruction::Defensive,
        TacticalInstruction::CounterAttack,
        TacticalInstruction::Possession,
        TacticalInstruction::HighPress,
        TacticalInstruction::ParkTheBus,
        TacticalInstruction::LongBall,
    ];

    pub fn impact(&self) -> InstructionImpact {
        let (possession, attacking, defensive, injury, morale) = match self {
            TacticalInstruction::Balanced => (0.0, 0.0, 0.0, 0.0, 0.0),
            TacticalInstruction::Attacking => (10.0, 25.0, -20.0, 0.02, -5.0),
            TacticalInstruction::Defensive => (-10.0, -15.0, 25.0, 0.0, 0.0),
            TacticalInstruction::CounterAttack => (-15.0, 20.0, 15.0, 0.03, -10.0),
            TacticalInstruction::Possession => (20.0, 10.0, -5.0, 0.01, 0.0),
            TacticalInstruction::HighPress => (5.0, 15.0, -10.0, 0.05, -15.0),
            TacticalInstruction::ParkTheBus => (-25.0, -30.0, 35.0, 0.0, -20.0),
            TacticalInstruction::LongBall => (-20.0, 15.0, 10.0, 0.02, -5.0),
        };
        InstructionImpact {
            possession_change: possession,
            attacking_power_change: attacking,
            defensive_strength_change: defensive,
            injury_risk_increase: injury,
            morale_cost: morale,
        }
    }

    pub fn description(&self) -> TacticalDescription {
        match self {
            TacticalInstruction::Balanced => TacticalDescription {
                name: "Balanced",
                description: "Standard tactical approach with equal focus on attack and defense",
                pros: &["Stable", "Flexible", "No morale cost"],
                cons: &["No particular advantage", "Predictable"],
            },
            TacticalInstruction::Attacking => TacticalDescription {
                name: "Attacking",
                description: "Push forward with more players in attacking positions",
                pros: &["Increased goal-scoring chances", "Morale boost"],
                cons: &["Defensive vulnerability", "Higher injury risk"],
            },
            TacticalInstruction::Defensive => TacticalDescription {
                name: "Defensive",
                description: "Prioritize defensive solidity and counter-attacks",
                pros: &["Strong defense", "Compact shape"],
                cons: &["Less possession", "Limited attacking opportunities"],
            },
            TacticalInstruction::CounterAttack => TacticalDescription {
                name: "Counter Attack",
                description: "Absorb pressure and exploit spaces on the break",
                pros: &["Effective against strong teams", "Quick transitions"],
                cons: &["Requires fast players", "Morale cost", "High injury risk"],
            },
            TacticalInstruction::Possession => TacticalDescription {
                name: "Possession",
                description: "Control the game through ball possession and passing",
                pros: &["Dominates possession", "Reduces opponent chances"],
                cons: &["Requires skilled passers", "Can be slow to break down defenses"],
            },
            TacticalInstruction::HighPress => TacticalDescription {
                name: "High Press",
                description: "Aggressively press opponents high up the pitch",
                pros: &["Regain possession quickly", "Disrupt opponent play"],
                cons: &["Very tiring", "High injury risk", "Leaves space behind"],
            },
            TacticalInstruction::ParkTheBus => TacticalDescription {
                name: "Park the Bus",
                description: "Extreme defensive setup with minimal attacking intent",
                pros: &["Nearly impenetrable defense", "Effective for holding leads"],
                cons: &["Very low morale", "Boring for fans", "Limited attacking chances"],
            },
            TacticalInstruction::LongBall => TacticalDescription {
                name: "Long Ball",
                description: "Bypass midfield with direct long passes",
                pros: &["Quick transitions", "Effective against possession-focused teams"],
                cons: &["Less possession", "Requires tall strikers", "Unpredictable"],
            },
        }
    }
}

/// Raw deltas of an instruction before effectiveness scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstructionImpact {
    pub possession_change: f32,
    pub attacking_power_change: f32,
    pub defensive_strength_change: f32,
    pub injury_risk_increase: f32,
    pub morale_cost: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TacticalDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
}

/// Squad averages that decide how well an instruction is executed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSkills {
    pub pace: f32,
    pub passing: f32,
    pub defense: f32,
    pub dribbling: f32,
}

impl PlayerSkills {
    pub fn from_squad(squad: &[crate::models::player::Player]) -> Self {
        let profile = super::advanced::SquadProfile::from_squad(squad);
        Self {
            pace: profile.pace,
            passing: profile.passing,
            defense: profile.defense,
            dribbling: profile.dribbling,
        }
    }
}

fn formation_bonus(formation: FormationCode, instruction: TacticalInstruction) -> f32 {
    use TacticalInstruction::*;
    // Columns: balanced, attacking, defensive, counter, possession, high press, park, long ball
    let row: [f32; 8] = match formation {
        FormationCode::F433 => [10.0, 5.0, 0.0, 5.0, 10.0, 5.0, -5.0, 0.0],
        FormationCode::F4231 => [5.0, 0.0, 15.0, 10.0, 5.0, 0.0, 10.0, 5.0],
        FormationCode::F352 => [5.0, 15.0, 0.0, 5.0, 15.0, 10.0, -10.0, 0.0],
        FormationCode::F532 => [0.0, -10.0, 20.0, 15.0, 0.0, -5.0, 15.0, 10.0],
        FormationCode::F4141 | FormationCode::F343 => return 0.0,
    };
    let col = match instruction {
        Balanced => 0,
        Attacking => 1,
        Defensive => 2,
        CounterAttack => 3,
        Possession => 4,
        HighPress => 5,
        ParkTheBus => 6,
        LongBall => 7,
    };
    row[col]
}

/// 50 plus formation fit plus the skill the instruction leans on, clamped to 0-100.
pub fn tactical_effectiveness(
    instruction: TacticalInstruction,
    skills: &PlayerSkills,
    formation: FormationCode,
) -> f32 {
    let mut effectiveness = 50.0 + formation_bonus(formation, instruction);

    effectiveness += match instruction {
        TacticalInstruction::Possession => (skills.passing - 70.0) * 0.3,
        TacticalInstruction::HighPress => (skills.pace - 70.0) * 0.3,
        TacticalInstruction::Defensive | TacticalInstruction::ParkTheBus => {
            (skills.defense - 70.0) * 0.3
        }
        TacticalInstruction::CounterAttack => {
            (skills.pace - 70.0) * 0.2 + (skills.dribbling - 70.0) * 0.2
        }
        _ => 0.0,
    };

    effectiveness.clamp(0.0, 100.0)
}

/// Live scalars a tactical change acts on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// 20-80
    pub possession: f32,
    pub attacking_power: f32,
    pub defensive_strength: f32,
    /// 0-100
    pub player_morale: f32,
    pub injury_risk: f32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            possession: 50.0,
            attacking_power: 50.0,
            defensive_strength: 50.0,
            player_morale: 50.0,
            injury_risk: 0.0,
        }
    }
}

/// Apply an instruction to the live match state.
pub fn apply_tactical_adjustment(
    state: &MatchState,
    instruction: TacticalInstruction,
    skills: &PlayerSkills,
    formation: FormationCode,
) -> MatchState {
    let impact = instruction.impact();
    let scale = tactical_effectiveness(instruction, skills, formation) / 100.0;

    MatchState {
        possession: (state.possession + impact.possession_change * scale).clamp(20.0, 80.0),
        attacking_power: (state.attacking_power + impact.attacking_power_change * scale).max(0.0),
        defensive_strength: (state.defensive_strength + impact.defensive_strength_change * scale)
            .max(0.0),
        player_morale: (state.player_morale + impact.morale_cost).clamp(0.0, 100.0),
        injury_risk: state.injury_risk + impact.injury_risk_increase.max(0.0),
    }
}

/// Snapshot used to suggest instructions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSituation {
    pub home_score: u8,
    pub away_score: u8,
    pub is_home: bool,
    pub possession: f32,
    /// minutes
    pub time_remaining: u8,
    pub squad_rating: f32,
    pub opponent_rating: f32,
}

/// Suggested instructions for the current scoreline and clock. Never empty.
pub fn recommended_instructions(situation: &MatchSituation) -> Vec<TacticalInstruction> {
    let (own, opponent) = if situation.is_home {
        (situation.home_score, situation.away_score)
    } else {
        (situation.away_score, situation.home_score)
    };
    let rating_gap = situation.squad_rating - situation.opponent_rating;
    let t = situation.time_remaining;

    let mut out = Vec::new();
    if own > opponent {
        out.push(if t < 15 {
            TacticalInstruction::ParkTheBus
        } else if t < 30 {
            TacticalInstruction::Defensive
        } else {
            TacticalInstruction::Balanced
        });
    } else if own < opponent {
        if t < 20 {
            out.push(TacticalInstruction::Attacking);
            out.push(TacticalInstruction::HighPress);
        } else if rating_gap > 5.0 {
            out.push(TacticalInstruction::CounterAttack);
        } else {
            out.push(TacticalInstruction::Attacking);
        }
    } else if t < 10 {
        out.push(TacticalInstruction::Attacking);
    } else if situation.possession > 55.0 {
        out.push(TacticalInstruction::Possession);
    } else if situation.possession < 45.0 {
        out.push(TacticalInstruction::CounterAttack);
    } else {
        out.push(TacticalInstruction::Balanced);
    }
    out
}

/// A timed change of instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TacticalAdjustment {
    pub instruction: TacticalInstruction,
    pub minute: u8,
    pub expected_impact: InstructionImpact,
}

/// A side's tactical plan for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTactics {
    pub formation: FormationCode,
    pub base_style: FormationStyle,
    pub pressing: Pressing,
    pub build_up: BuildUp,
    pub adjustments: Vec<TacticalAdjustment>,
    pub current_instruction: TacticalInstruction,
}

impl MatchTactics {
    pub fn new(formation: crate::models::formation::Formation) -> Self {
        Self {
            formation: formation.code,
            base_style: formation.style,
            pressing: formation.pressing,
            build_up: formation.build_up,
            adjustments: Vec::new(),
            current_instruction: TacticalInstruction::Balanced,
        }
    }

    /// Switch instruction, record it, and return the updated match state.
    pub fn adjust(
        &mut self,
        minute: u8,
        instruction: TacticalInstruction,
        state: &MatchState,
        skills: &PlayerSkills,
    ) -> MatchState {
        self.adjustments.push(TacticalAdjustment {
            instruction,
            minute,
            expected_impact: instruction.impact(),
        });
        self.current_instruction = instruction;
        apply_tactical_adjustment(state, instruction, skills, self.formation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::formation::Formation;

    fn skills(v: f32) -> PlayerSkills {
        PlayerSkills { pace: v, passing: v, defense: v, dribbling: v }
    }

    #[test]
    fn test_effectiveness_formation_and_skill_terms() {
        // 50 + 10 (4-3-3 possession) + (80-70)*0.3
        let e = tactical_effectiveness(TacticalInstruction::Possession, &skills(80.0), FormationCode::F433);
        assert!((e - 63.0).abs() < 1e-4);

        // 50 + 15 + (75-70)*0.2*2
        let e = tactical_effectiveness(TacticalInstruction::CounterAttack, &skills(75.0), FormationCode::F532);
        assert!((e - 67.0).abs() < 1e-4);

        // Unknown formation row contributes nothing
        let e = tactical_effectiveness(TacticalInstruction::Balanced, &skills(70.0), FormationCode::F343);
        assert_eq!(e, 50.0);
    }

    #[test]
    fn test_effectiveness_clamped() {
        let e = tactical_effectiveness(TacticalInstruction::ParkTheBus, &skills(0.0), FormationCode::F433);
        assert_eq!(e, 24.0);
        let e = tactical_effectiveness(TacticalInstruction::ParkTheBus, &skills(500.0), FormationCode::F532);
        assert_eq!(e, 100.0);
    }

    #[test]
    fn test_adjustment_scaled_and_clamped() {
        let state = MatchState { possession: 75.0, player_morale: 10.0, ..Default::default() };
        let next = apply_tactical_adjustment(&state, TacticalInstruction::Possession, &skills(80.0), FormationCode::F433);
        // 75 + 20 * 0.63 clamps to 80
        assert_eq!(next.possession, 80.0);
        assert!((next.attacking_power - (50.0 + 10.0 * 0.63)).abs() < 1e-3);
        assert!((next.injury_risk - 0.01).abs() < 1e-6);

        let bus = apply_tactical_adjustment(&state, TacticalInstruction::ParkTheBus, &skills(70.0), FormationCode::F433);
        assert_eq!(bus.player_morale, 0.0);
        assert!(bus.possession >= 20.0);
    }

    #[test]
    fn test_injury_risk_never_decreases() {
        let mut state = MatchState::default();
        for instruction in TacticalInstruction::ALL {
            let next = apply_tactical_adjustment(&state, instruction, &skills(70.0), FormationCode::F4231);
            assert!(next.injury_risk >= state.injury_risk);
            assert!((20.0..=80.0).contains(&next.possession));
            assert!(next.attacking_power >= 0.0 && next.defensive_strength >= 0.0);
            state = next;
        }
    }

    #[test]
    fn test_recommendations_by_situation() {
        let base = MatchSituation {
            home_score: 1,
            away_score: 0,
            is_home: true,
            possession: 50.0,
            time_remaining: 10,
            squad_rating: 70.0,
            opponent_rating: 70.0,
        };
        assert_eq!(recommended_instructions(&base), vec![TacticalInstruction::ParkTheBus]);

        let losing_late = MatchSituation { is_home: false, ..base };
        assert_eq!(
            recommended_instructions(&losing_late),
            vec![TacticalInstruction::Attacking, TacticalInstruction::HighPress]
        );

        let losing_early_stronger = MatchSituation { time_remaining: 60, squad_rating: 80.0, ..losing_late };
        assert_eq!(recommended_instructions(&losing_early_stronger), vec![TacticalInstruction::CounterAttack]);

        let level = MatchSituation { away_score: 1, time_remaining: 50, possession: 60.0, ..base };
        assert_eq!(recommended_instructions(&level), vec![TacticalInstruction::Possession]);
    }

    #[test]
    fn test_match_tactics_records_adjustments() {
        let mut tactics = MatchTactics::new(Formation::default());
        let state = tactics.adjust(70, TacticalInstruction::Defensive, &MatchState::default(), &skills(70.0));
        assert_eq!(tactics.current_instruction, TacticalInstruction::Defensive);
        assert_eq!(tactics.adjustments.len(), 1);
        assert!(state.defensive_strength > 50.0);
        assert_eq!(TacticalInstruction::LongBall.description().name, "Long Ball");
    }
}
