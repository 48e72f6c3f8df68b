//! Tactical evaluator: advanced systems, in-match instructions and phase simulators.

pub mod advanced;
pub mod instructions;
pub mod phases;

pub use advanced::{
    recommend_tactics, suitability, AdvancedTactic, AdvancedTacticalSystem, AttributeRequirements,
    PlayerRoleModification, SquadProfile, Suitability, TacticRecommendation, TacticalMatchImpact,
    ADVANCED_SYSTEMS, FALSE_NINE, GEGENPRESSING, INVERTED_FULLBACKS, TIKI_TAKA, WING_BACKS,
};
pub use instructions::{
    apply_tactical_adjustment, recommended_instructions, tactical_effectiveness,
    InstructionImpact, MatchSituation, MatchState, MatchTactics, PlayerSkills,
    TacticalAdjustment, TacticalDescription, TacticalInstruction,
};
pub use phases::{
    simulate_gegenpressing, simulate_tiki_taka, GegenpressingPhase, GegenpressingState,
    PitchArea, PressureZone, TikiTakaPhase, TikiTakaState,
};
