//! Advanced Tactical Systems
//!
//! Named systems (Gegenpressing, Tiki-Taka, ...) with squad attribute
//! requirements and their effect on a match. A squad is scored against
//! each system's thresholds to decide which ones it can actually play.

use serde::{Deserialize, Serialize};

use crate::models::formation::FormationCode;
use crate::models::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvancedTactic {
    Gegenpressing,
    TikiTaka,
    FalseNine,
    InvertedFullbacks,
    WingBacks,
}

impl AdvancedTactic {
    pub fn system(&self) -> &'static AdvancedTacticalSystem {
        match self {
            AdvancedTactic::Gegenpressing => &GEGENPRESSING,
            AdvancedTactic::TikiTaka => &TIKI_TAKA,
            AdvancedTactic::FalseNine => &FALSE_NINE,
            AdvancedTactic::InvertedFullbacks => &INVERTED_FULLBACKS,
            AdvancedTactic::WingBacks => &WING_BACKS,
        }
    }
}

/// Minimum squad averages a system needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeRequirements {
    pub pace: f32,
    pub passing: f32,
    pub dribbling: f32,
    pub defense: f32,
    pub stamina: f32,
}

impl AttributeRequirements {
    fn entries(&self) -> [(&'static str, f32); 5] {
        [
            ("pace", self.pace),
            ("passing", self.passing),
            ("dribbling", self.dribbling),
            ("defense", self.defense),
            ("stamina", self.stamina),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TacticalMatchImpact {
    /// Possession points relative to normal
    pub possession: f32,
    pub pressure_intensity: f32,
    pub build_up_speed: f32,
    pub defensive_vulnerability: f32,
    /// Per-match injury probability
    pub injury_risk: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRoleModification {
    pub role_name: &'static str,
    pub position: &'static str,
    pub key_responsibilities: &'static [&'static str],
    pub attribute_boosts: &'static [(&'static str, i8)],
    pub attribute_penalties: &'static [(&'static str, i8)],
    /// 0-100
    pub stamina_drain: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedTacticalSystem {
    pub tactic: AdvancedTactic,
    pub display_name: &'static str,
    pub description: &'static str,
    pub required_formations: &'static [FormationCode],
    pub requirements: AttributeRequirements,
    pub match_impact: TacticalMatchImpact,
    pub roles: &'static [PlayerRoleModification],
}

impl AdvancedTacticalSystem {
    pub fn supports_formation(&self, code: FormationCode) -> bool {
        self.required_formations.contains(&code)
    }
}

// ============================================================================
// Systems
// ============================================================================

/// High-intensity pressing focused on immediate ball recovery
pub const GEGENPRESSING: AdvancedTacticalSystem = AdvancedTacticalSystem {
    tactic: AdvancedTactic::Gegenpressing,
    display_name: "Gegenpressing",
    description: "Intense pressing system where players immediately pressure the ball after losing possession. Requires high pace, stamina, and coordination.",
    required_formations: &[FormationCode::F433, FormationCode::F4231, FormationCode::F352],
    requirements: AttributeRequirements { pace: 78.0, passing: 75.0, dribbling: 72.0, defense: 76.0, stamina: 85.0 },
    match_impact: TacticalMatchImpact {
        possession: -15.0,
        pressure_intensity: 95.0,
        build_up_speed: 85.0,
        defensive_vulnerability: 25.0,
        injury_risk: 0.08,
    },
    roles: &[
        PlayerRoleModification {
            role_name: "Gegenpressing Forward",
            position: "ST",
            key_responsibilities: &["First line of press", "Cut off passing lanes", "Force turnovers in attacking third", "Quick transition to counter-attack"],
            attribute_boosts: &[("pace", 5), ("defense", 8), ("stamina", 10)],
            attribute_penalties: &[("dribbling", -3)],
            stamina_drain: 90,
        },
        PlayerRoleModification {
            role_name: "Gegenpressing Midfielder",
            position: "CM",
            key_responsibilities: &["Second line of press", "Cover passing lanes", "Immediate recovery runs", "Support transitions"],
            attribute_boosts: &[("pace", 3), ("defense", 6), ("stamina", 12), ("passing", 4)],
            attribute_penalties: &[],
            stamina_drain: 95,
        },
        PlayerRoleModification {
            role_name: "Gegenpressing Defender",
            position: "CB",
            key_responsibilities: &["Organize pressing structure", "Cover for pressing midfielders", "Quick distribution", "High line management"],
            attribute_boosts: &[("pace", 4), ("passing", 5)],
            attribute_penalties: &[("positioning", -2)],
            stamina_drain: 85,
        },
    ],
};

/// Possession through short, quick passes
pub const TIKI_TAKA: AdvancedTacticalSystem = AdvancedTacticalSystem {
    tactic: AdvancedTactic::TikiTaka,
    display_name: "Tiki-Taka",
    description: "Possession-dominant system based on short, quick passes. Requires excellent technical ability, passing accuracy, and positional intelligence.",
    required_formations: &[FormationCode::F433, FormationCode::F352, FormationCode::F4141],
    requirements: AttributeRequirements { pace: 72.0, passing: 88.0, dribbling: 82.0, defense: 70.0, stamina: 80.0 },
    match_impact: TacticalMatchImpact {
        possession: 25.0,
        pressure_intensity: 35.0,
        build_up_speed: 45.0,
        defensive_vulnerability: 40.0,
        injury_risk: 0.02,
    },
    roles: &[
        PlayerRoleModification {
            role_name: "Tiki-Taka Forward",
            position: "ST",
            key_responsibilities: &["Link-up play", "One-touch passes", "Create space for midfielders", "Intelligent movement"],
            attribute_boosts: &[("passing", 8), ("dribbling", 6), ("positioning", 7)],
            attribute_penalties: &[("pace", -2), ("defense", -3)],
            stamina_drain: 70,
        },
        PlayerRoleModification {
            role_name: "Tiki-Taka Midfielder",
            position: "CM",
            key_responsibilities: &["Ball circulation", "Possession retention", "Creative passing", "Tempo control"],
            attribute_boosts: &[("passing", 10), ("dribbling", 8), ("positioning", 6)],
            attribute_penalties: &[("defense", -4)],
            stamina_drain: 75,
        },
        PlayerRoleModification {
            role_name: "Tiki-Taka Defender",
            position: "CB",
            key_responsibilities: &["Build from the back", "Short passing", "Possession retention", "Sweeper role"],
            attribute_boosts: &[("passing", 8), ("positioning", 5)],
            attribute_penalties: &[("pace", -3)],
            stamina_drain: 65,
        },
    ],
};

/// Striker drops deep to open space for the wingers
pub const FALSE_NINE: AdvancedTacticalSystem = AdvancedTacticalSystem {
    tactic: AdvancedTactic::FalseNine,
    display_name: "False Nine",
    description: "Striker drops deep to midfield, creating space for wingers. Requires technical wingers and intelligent striker positioning.",
    required_formations: &[FormationCode::F433, FormationCode::F352],
    requirements: AttributeRequirements { pace: 75.0, passing: 80.0, dribbling: 85.0, defense: 65.0, stamina: 78.0 },
    match_impact: TacticalMatchImpact {
        possession: 15.0,
        pressure_intensity: 50.0,
        build_up_speed: 60.0,
        defensive_vulnerability: 35.0,
        injury_risk: 0.04,
    },
    roles: &[
        PlayerRoleModification {
            role_name: "False Nine",
            position: "ST",
            key_responsibilities: &["Drop into midfield", "Create space for wingers", "Link-up play", "Creative playmaking"],
            attribute_boosts: &[("passing", 12), ("dribbling", 8), ("positioning", 10)],
            attribute_penalties: &[("pace", -5), ("defense", -2)],
            stamina_drain: 80,
        },
        PlayerRoleModification {
            role_name: "False Nine Support",
            position: "CM",
            key_responsibilities: &["Cover for dropped striker", "Box-to-box runs", "Defensive cover"],
            attribute_boosts: &[("pace", 4), ("defense", 5)],
            attribute_penalties: &[],
            stamina_drain: 85,
        },
    ],
};

/// Fullbacks tuck inside to overload midfield
pub const INVERTED_FULLBACKS: AdvancedTacticalSystem = AdvancedTacticalSystem {
    tactic: AdvancedTactic::InvertedFullbacks,
    display_name: "Inverted Fullbacks",
    description: "Fullbacks tuck inside to midfield, creating numerical advantages. Requires technical fullbacks and wide wingers.",
    required_formations: &[FormationCode::F433, FormationCode::F4231],
    requirements: AttributeRequirements { pace: 80.0, passing: 78.0, dribbling: 80.0, defense: 72.0, stamina: 82.0 },
    match_impact: TacticalMatchImpact {
        possession: 12.0,
        pressure_intensity: 55.0,
        build_up_speed: 65.0,
        defensive_vulnerability: 30.0,
        injury_risk: 0.05,
    },
    roles: &[PlayerRoleModification {
        role_name: "Inverted Fullback",
        position: "LB/RB",
        key_responsibilities: &["Cut inside to midfield", "Create overloads", "Passing options", "Defensive cover when needed"],
        attribute_boosts: &[("dribbling", 8), ("passing", 6), ("positioning", 7)],
        attribute_penalties: &[("defense", -5)],
        stamina_drain: 85,
    }],
};

/// Fullbacks play as wingers
pub const WING_BACKS: AdvancedTacticalSystem = AdvancedTacticalSystem {
    tactic: AdvancedTactic::WingBacks,
    display_name: "Wing Backs",
    description: "Fullbacks operate as wingers, providing width and attacking support. Requires athletic, technical fullbacks.",
    required_formations: &[FormationCode::F532, FormationCode::F352],
    requirements: AttributeRequirements { pace: 85.0, passing: 76.0, dribbling: 78.0, defense: 74.0, stamina: 88.0 },
    match_impact: TacticalMatchImpact {
        possession: 10.0,
        pressure_intensity: 60.0,
        build_up_speed: 70.0,
        defensive_vulnerability: 20.0,
        injury_risk: 0.06,
    },
    roles: &[PlayerRoleModification {
        role_name: "Attacking Wing Back",
        position: "LWB/RWB",
        key_responsibilities: &["Push high up the pitch", "Provide width", "Attacking support", "Quick recovery"],
        attribute_boosts: &[("pace", 10), ("dribbling", 8), ("stamina", 12)],
        attribute_penalties: &[("defense", -3)],
        stamina_drain: 95,
    }],
};

/// Declaration order is the tie-break order for recommendations.
pub const ADVANCED_SYSTEMS: &[&AdvancedTacticalSystem] =
    &[&GEGENPRESSING, &TIKI_TAKA, &FALSE_NINE, &INVERTED_FULLBACKS, &WING_BACKS];

// ============================================================================
// Suitability
// ============================================================================

/// Squad averages of the five tactic-relevant attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SquadProfile {
    pub pace: f32,
    pub passing: f32,
    pub dribbling: f32,
    pub defense: f32,
    pub stamina: f32,
}

impl SquadProfile {
    /// All zeros for an empty squad.
    pub fn from_squad(squad: &[Player]) -> Self {
        if squad.is_empty() {
            return Self::default();
        }
        let n = squad.len() as f32;
        let avg = |f: fn(&Player) -> u8| squad.iter().map(|p| f(p) as f32).sum::<f32>() / n;
        Self {
            pace: avg(|p| p.attributes.pace),
            passing: avg(|p| p.attributes.passing),
            dribbling: avg(|p| p.attributes.dribbling),
            defense: avg(|p| p.attributes.defense),
            stamina: avg(|p| p.attributes.stamina()),
        }
    }

    fn get(&self, name: &str) -> f32 {
        match name {
            "pace" => self.pace,
            "passing" => self.passing,
            "dribbling" => self.dribbling,
            "defense" => self.defense,
            _ => self.stamina,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suitability {
    pub suitable: bool,
    /// e.g. `"pace (71 vs 78 required)"`
    pub missing_attributes: Vec<String>,
    /// 0-100
    pub score: u32,
}

/// +20 per met threshold, -15 per miss, floored at 0.
pub fn suitability(squad: &[Player], system: &AdvancedTacticalSystem) -> Suitability {
    let profile = SquadProfile::from_squad(squad);
    let mut missing = Vec::new();
    let mut met = 0u32;

    for (name, required) in system.requirements.entries() {
        let avg = profile.get(name);
        if avg < required {
            missing.push(format!("{} ({} vs {} required)", name, avg.round() as i32, required as i32));
        } else {
            met += 1;
        }
    }

    let raw = met as i32 * 20 - missing.len() as i32 * 15;
    Suitability { suitable: missing.is_empty(), missing_attributes: missing, score: raw.clamp(0, 100) as u32 }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TacticRecommendation {
    pub tactic: AdvancedTactic,
    pub display_name: &'static str,
    pub score: u32,
    pub suitable: bool,
}

/// Every system ranked by descending score; ties keep declaration order.
pub fn recommend_tactics(squad: &[Player]) -> Vec<TacticRecommendation> {
    let mut ranked: Vec<TacticRecommendation> = ADVANCED_SYSTEMS
        .iter()
        .map(|system| {
            let s = suitability(squad, system);
            TacticRecommendation {
                tactic: system.tactic,
                display_name: system.display_name,
                score: s.score,
                suitable: s.suitable,
            }
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
