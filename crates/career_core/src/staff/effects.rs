use serde::{Deserialize, Serialize};

use crate::models::player::Position;

use super::member::{StaffMember, StaffRole};

/// Effectiveness assumed for an empty post.
pub const VACANT_EFFECTIVENESS: f32 = 50.0;

fn best_in_role(staff: &[StaffMember], role: StaffRole) -> Option<f32> {
    staff.iter().filter(|s| s.role == role).map(|s| s.effectiveness as f32).reduce(f32::max)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoachingEffect {
    pub attacking: f32,
    pub defensive: f32,
    pub fitness: f32,
    pub goalkeeper: f32,
    pub psychologist: f32,
    pub average: f32,
}

/// Best coach per specialism; vacant posts count as 50.
pub fn coaching_effects(staff: &[StaffMember]) -> CoachingEffect {
    let rating = |role| best_in_role(staff, role).unwrap_or(VACANT_EFFECTIVENESS);
    let attacking = rating(StaffRole::AttackingCoach);
    let defensive = rating(StaffRole::DefensiveCoach);
    let fitness = rating(StaffRole::FitnessCoach);
    let goalkeeper = rating(StaffRole::GoalkeeperCoach);
    let psychologist = rating(StaffRole::SportsPsychologist);

    CoachingEffect {
        attacking,
        defensive,
        fitness,
        goalkeeper,
        psychologist,
        average: (attacking + defensive + fitness + goalkeeper + psychologist) / 5.0,
    }
}

/// Per-area development bonus, roughly -10 to 20 each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DevelopmentBonus {
    pub attacking: i32,
    pub defending: i32,
    pub physical: i32,
    pub technical: i32,
    pub mental: i32,
}

impl DevelopmentBonus {
    pub fn total(&self) -> i32 {
        self.attacking + self.defending + self.physical + self.technical + self.mental
    }

    /// Overall-rating points for a season: a tenth of the total.
    pub fn rating_delta(&self) -> f32 {
        self.total() as f32 / 10.0
    }
}

/// Coaching bonus for one player. Young players (< 25) learn at x1.5,
/// veterans (30+) at x0.5; high potential adds up to 20%.
pub fn development_bonus(
    position: Position,
    effects: &CoachingEffect,
    age: u8,
    potential: f32,
) -> DevelopmentBonus {
    let age_factor = if age < 25 {
        1.5
    } else if age < 30 {
        1.0
    } else {
        0.5
    };
    let potential_factor = 1.0 + (potential - 70.0) / 30.0 * 0.2;
    let delta = |rating: f32, weight: f32| (rating - VACANT_EFFECTIVENESS) * weight * age_factor;

    let mut attacking = 0.0;
    let mut defending = 0.0;
    let mut physical = 0.0;
    let mut technical = 0.0;

    if position.is_goalkeeper() {
        defending = delta(effects.goalkeeper, 0.25);
    } else if position.is_forward() {
        attacking = delta(effects.attacking, 0.2);
        technical = delta(effects.attacking, 0.15);
    } else if position.is_defender() {
        defending = delta(effects.defensive, 0.2);
        physical = delta(effects.fitness, 0.1);
    } else {
        attacking = delta(effects.attacking, 0.1);
        defending = delta(effects.defensive, 0.1);
        technical = delta(effects.attacking, 0.15);
    }

    physical += delta(effects.fitness, 0.15);
    let mental = delta(effects.psychologist, 0.1);

    let scaled = |v: f32| (v * potential_factor).round() as i32;
    DevelopmentBonus {
        attacking: scaled(attacking),
        defending: scaled(defending),
        physical: scaled(physical),
        technical: scaled(technical),
        mental: scaled(mental),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalReport {
    /// 0-100
    pub injury_recovery_rate: u8,
    /// 0-100
    pub prevention_rate: u8,
    /// 0-100
    pub overall_effectiveness: u8,
}

/// Head physio weighs most; assistant physios are averaged.
pub fn medical_effectiveness(staff: &[StaffMember]) -> MedicalReport {
    let mut physios: Vec<f32> = staff
        .iter()
        .filter(|s| s.role == StaffRole::HeadPhysio)
        .map(|s| s.effectiveness as f32)
        .collect();
    physios.sort_by(|a, b| b.total_cmp(a));

    let head = physios.first().copied().unwrap_or(VACANT_EFFECTIVENESS);
    let assistants = if physios.len() > 1 {
        physios[1..].iter().sum::<f32>() / (physios.len() - 1) as f32
    } else {
        VACANT_EFFECTIVENESS
    };
    let psychologist = best_in_role(staff, StaffRole::SportsPsychologist).unwrap_or(VACANT_EFFECTIVENESS);

    let recovery = head * 0.5 + assistants * 0.3 + psychologist * 0.2;
    let prevention = head * 0.4 + assistants * 0.4 + psychologist * 0.2;

    MedicalReport {
        injury_recovery_rate: recovery.round().clamp(0.0, 100.0) as u8,
        prevention_rate: prevention.round().clamp(0.0, 100.0) as u8,
        overall_effectiveness: recovery.round().clamp(0.0, 100.0) as u8,
    }
}

/// One week of recovery. Average staff heal one week; every 25 points of
/// effectiveness above 50 heals about half a week more. Always at least one.
pub fn apply_injury_recovery(injury_weeks: u8, medical_effectiveness: u8) -> u8 {
    let speedup = (medical_effectiveness as f32 - 50.0) * 0.02;
    let healed = (1.0 + speedup).round().max(1.0) as u8;
    injury_weeks.saturating_sub(healed)
}

/// Per-match injury probability after prevention: effectiveness 50 leaves
/// it unchanged, 100 halves it, 0 raises it by half.
pub fn injury_prevention_chance(base_risk: f64, medical_effectiveness: u8) -> f64 {
    let factor = 1.0 - (medical_effectiveness as f64 - 50.0) / 100.0;
    (base_risk * factor).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffRecommendation {
    pub role: StaffRole,
    pub priority: Priority,
    pub estimated_cost: f64,
    pub expected_benefit: &'static str,
}

const RECOMMENDED_POSTS: [(StaffRole, Priority, &str); 6] = [
    (StaffRole::AttackingCoach, Priority::High, "Improve attacking player development"),
    (StaffRole::DefensiveCoach, Priority::High, "Improve defensive player development"),
    (StaffRole::FitnessCoach, Priority::Medium, "Improve player fitness and reduce injuries"),
    (StaffRole::GoalkeeperCoach, Priority::Medium, "Improve goalkeeper development"),
    (StaffRole::HeadPhysio, Priority::Critical, "Reduce injury recovery time"),
    (StaffRole::SportsPsychologist, Priority::Medium, "Improve player morale and mental resilience"),
];

/// Vacant posts the budget can cover, most urgent first.
pub fn staff_recommendations(staff: &[StaffMember], budget: f64) -> Vec<StaffRecommendation> {
    let mut recs: Vec<StaffRecommendation> = RECOMMENDED_POSTS
        .iter()
        .filter(|(role, _, _)| !staff.iter().any(|s| s.role == *role))
        .map(|&(role, priority, expected_benefit)| StaffRecommendation {
            role,
            priority,
            estimated_cost: role.base_salary(),
            expected_benefit,
        })
        .filter(|r| r.estimated_cost <= budget)
        .collect();
    recs.sort_by_key(|r| r.priority);
    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staff::member::{StaffCandidate, StaffNationality};

    fn member(role: StaffRole, effectiveness: u8) -> StaffMember {
        StaffMember::hire(
            format!("{role}_{effectiveness}"),
            StaffCandidate {
                name: "Sam Coach".to_string(),
                role,
                nationality: StaffNationality::Domestic,
                age: 40,
                experience: 10,
                effectiveness,
                specializations: Vec::new(),
            },
            2025,
        )
    }

    #[test]
    fn test_empty_staff_is_neutral() {
        let effects = coaching_effects(&[]);
        assert_eq!(effects.average, 50.0);
        let bonus = development_bonus(Position::ST, &effects, 21, 85.0);
        assert_eq!(bonus, DevelopmentBonus::default());

        let medical = medical_effectiveness(&[]);
        assert_eq!(medical.overall_effectiveness, 50);
        assert_eq!(injury_prevention_chance(0.02, 50), 0.02);
    }

    #[test]
    fn test_best_coach_counts() {
        let staff = vec![member(StaffRole::AttackingCoach, 70), member(StaffRole::AttackingCoach, 90)];
        let effects = coaching_effects(&staff);
        assert_eq!(effects.attacking, 90.0);
        assert_eq!(effects.average, (90.0 + 50.0 * 4.0) / 5.0);
    }

    #[test]
    fn test_forward_bonus() {
        let staff = vec![member(StaffRole::AttackingCoach, 90), member(StaffRole::FitnessCoach, 70)];
        let effects = coaching_effects(&staff);
        // young, potential 70: attacking 40*0.2*1.5 = 12, technical 40*0.15*1.5 = 9, physical 20*0.15*1.5 = 4.5
        let bonus = development_bonus(Position::LW, &effects, 20, 70.0);
        assert_eq!(bonus.attacking, 12);
        assert_eq!(bonus.technical, 9);
        assert_eq!(bonus.physical, 5);
        assert_eq!(bonus.defending, 0);
        assert!((bonus.rating_delta() - 2.6).abs() < 1e-4);
    }

    #[test]
    fn test_wing_back_develops_as_defender() {
        let staff = vec![member(StaffRole::DefensiveCoach, 80)];
        let bonus = development_bonus(Position::RWB, &coaching_effects(&staff), 27, 70.0);
        assert_eq!(bonus.defending, 6);
        assert_eq!(bonus.attacking, 0);
    }

    #[test]
    fn test_medical_recovery() {
        let staff = vec![
            member(StaffRole::HeadPhysio, 90),
            member(StaffRole::HeadPhysio, 70),
            member(StaffRole::SportsPsychologist, 60),
        ];
        let report = medical_effectiveness(&staff);
        // 45 + 21 + 12
        assert_eq!(report.injury_recovery_rate, 78);
        // 36 + 28 + 12
        assert_eq!(report.prevention_rate, 76);

        assert_eq!(apply_injury_recovery(4, 50), 3);
        assert_eq!(apply_injury_recovery(4, 100), 2);
        assert_eq!(apply_injury_recovery(4, 0), 3);
        assert_eq!(apply_injury_recovery(0, 80), 0);
        assert!((injury_prevention_chance(0.02, 100) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_recommendations_sorted_and_budgeted() {
        let staff = vec![member(StaffRole::AttackingCoach, 70)];
        let recs = staff_recommendations(&staff, 1_000_000.0);
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0].role, StaffRole::HeadPhysio);
        assert!(recs.windows(2).all(|w| w[0].priority <= w[1].priority));

        let cheap = staff_recommendations(&[], 110_000.0);
        assert!(cheap.iter().all(|r| r.estimated_cost <= 110_000.0));
        assert_eq!(cheap.len(), 3);
    }
}
