//! Backroom staff: salaries, contracts and their effect on players.

pub mod effects;
pub mod member;

pub use effects::{
    apply_injury_recovery, coaching_effects, development_bonus, injury_prevention_chance,
    medical_effectiveness, staff_recommendations, CoachingEffect, DevelopmentBonus, MedicalReport,
    Priority, StaffRecommendation,
};
pub use member::{
    expiring_contracts, staff_salary, total_staff_costs, StaffCandidate, StaffContract,
    StaffMember, StaffNationality, StaffRole,
};
