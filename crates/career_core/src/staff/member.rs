use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Manager,
    AssistantCoach,
    AttackingCoach,
    DefensiveCoach,
    FitnessCoach,
    GoalkeeperCoach,
    HeadPhysio,
    SportsPsychologist,
    Scout,
}

impl StaffRole {
    pub const ALL: [StaffRole; 9] = [
        StaffRole::Manager,
        StaffRole::AssistantCoach,
        StaffRole::AttackingCoach,
        StaffRole::DefensiveCoach,
        StaffRole::FitnessCoach,
        StaffRole::GoalkeeperCoach,
        StaffRole::HeadPhysio,
        StaffRole::SportsPsychologist,
        StaffRole::Scout,
    ];

    /// Annual base salary
    pub fn base_salary(&self) -> f64 {
        match self {
            StaffRole::Manager => 500_000.0,
            StaffRole::AssistantCoach => 150_000.0,
            StaffRole::AttackingCoach | StaffRole::DefensiveCoach | StaffRole::HeadPhysio => 120_000.0,
            StaffRole::FitnessCoach | StaffRole::GoalkeeperCoach | StaffRole::SportsPsychologist => {
                100_000.0
            }
            StaffRole::Scout => 50_000.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Manager => "manager",
            StaffRole::AssistantCoach => "assistant_coach",
            StaffRole::AttackingCoach => "attacking_coach",
            StaffRole::DefensiveCoach => "defensive_coach",
            StaffRole::FitnessCoach => "fitness_coach",
            StaffRole::GoalkeeperCoach => "goalkeeper_coach",
            StaffRole::HeadPhysio => "head_physio",
            StaffRole::SportsPsychologist => "sports_psychologist",
            StaffRole::Scout => "scout",
        }
    }

    pub fn is_coach(&self) -> bool {
        matches!(
            self,
            StaffRole::AssistantCoach
                | StaffRole::AttackingCoach
                | StaffRole::DefensiveCoach
                | StaffRole::FitnessCoach
                | StaffRole::GoalkeeperCoach
        )
    }

    pub fn is_medical(&self) -> bool {
        matches!(self, StaffRole::HeadPhysio | StaffRole::SportsPsychologist)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaffNationality {
    Domestic,
    #[default]
    European,
    SouthAmerican,
    African,
    Asian,
}

impl StaffNationality {
    pub fn salary_multiplier(&self) -> f64 {
        match self {
            StaffNationality::Domestic => 0.8,
            StaffNationality::European => 1.0,
            StaffNationality::SouthAmerican => 0.9,
            StaffNationality::African => 0.7,
            StaffNationality::Asian => 0.8,
        }
    }

    fn surnames(&self) -> &'static [&'static str] {
        match self {
            StaffNationality::Domestic => &["Smith", "Johnson", "Williams", "Brown", "Jones"],
            StaffNationality::European => &["Garcia", "Muller", "Rossi", "Dupont", "Schmidt"],
            StaffNationality::SouthAmerican => &["Silva", "Santos", "Oliveira", "Costa", "Pereira"],
            StaffNationality::African => &["Diallo", "Traore", "Sow", "Kone", "Ndiaye"],
            StaffNationality::Asian => &["Kim", "Lee", "Park", "Chen", "Wang"],
        }
    }
}

const FIRST_NAMES: &[&str] =
    &["John", "Carlos", "Marco", "Luis", "Antonio", "Jose", "Miguel", "Diego", "Pablo", "Roberto"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffContract {
    pub start_year: u16,
    pub end_year: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub nationality: StaffNationality,
    pub age: u8,
    /// Years
    pub experience: u8,
    /// 0-100
    pub effectiveness: u8,
    /// Annual
    pub salary: f64,
    pub contract: StaffContract,
    #[serde(default)]
    pub specializations: Vec<String>,
}

/// Annual salary: role base plus 5k per year of experience and 1k per
/// effectiveness point over 50, scaled by nationality.
pub fn staff_salary(
    role: StaffRole,
    experience: u8,
    effectiveness: u8,
    nationality: StaffNationality,
) -> f64 {
    let base = role.base_salary();
    let experience_bonus = experience as f64 * 5_000.0;
    let effectiveness_bonus = (effectiveness as f64 - 50.0) * 1_000.0;
    ((base + experience_bonus + effectiveness_bonus) * nationality.salary_multiplier()).round()
}

/// Everything needed to put someone on the payroll.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffCandidate {
    pub name: String,
    pub role: StaffRole,
    pub nationality: StaffNationality,
    pub age: u8,
    pub experience: u8,
    pub effectiveness: u8,
    pub specializations: Vec<String>,
}

impl StaffMember {
    /// Contract runs 2 years plus one per 5 years of experience.
    pub fn hire(id: impl Into<String>, candidate: StaffCandidate, current_year: u16) -> Self {
        let effectiveness = candidate.effectiveness.min(100);
        Self {
            id: id.into(),
            salary: staff_salary(candidate.role, candidate.experience, effectiveness, candidate.nationality),
            contract: StaffContract {
                start_year: current_year,
                end_year: current_year + 2 + u16::from(candidate.experience / 5),
            },
            name: candidate.name,
            role: candidate.role,
            nationality: candidate.nationality,
            age: candidate.age,
            experience: candidate.experience,
            effectiveness,
            specializations: candidate.specializations,
        }
    }

    /// Random candidate: 5-29 years of experience, effectiveness 60-89.
    pub fn generate(
        id: impl Into<String>,
        role: StaffRole,
        nationality: StaffNationality,
        current_year: u16,
        rng: &mut impl Rng,
    ) -> Self {
        let experience = rng.gen_range(5..30);
        let effectiveness = rng.gen_range(60..90);
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("John");
        let last = nationality.surnames().choose(rng).copied().unwrap_or("Smith");

        Self::hire(
            id,
            StaffCandidate {
                name: format!("{first} {last}"),
                role,
                nationality,
                age: 30 + experience,
                experience,
                effectiveness,
                specializations: Vec::new(),
            },
            current_year,
        )
    }

    /// New term starting this year with a raise.
    pub fn renew_contract(&mut self, years: u16, salary_increase: f64, current_year: u16) {
        self.salary = (self.salary * (1.0 + salary_increase)).round();
        self.contract = StaffContract { start_year: current_year, end_year: current_year + years };
    }

    pub fn contract_expires_by(&self, season: u16) -> bool {
        self.contract.end_year <= season
    }
}

/// Contracts ending within `seasons_ahead` seasons of `current_season`
/// that have not already lapsed.
pub fn expiring_contracts(staff: &[StaffMember], current_season: u16, seasons_ahead: u16) -> Vec<&StaffMember> {
    staff
        .iter()
        .filter(|s| s.contract.end_year >= current_season && s.contract.end_year <= current_season + seasons_ahead)
        .collect()
}

pub fn total_staff_costs(staff: &[StaffMember]) -> f64 {
    staff.iter().map(|s| s.salary).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn candidate(role: StaffRole, experience: u8, effectiveness: u8) -> StaffCandidate {
        StaffCandidate {
            name: "Pat Doe".to_string(),
            role,
            nationality: StaffNationality::European,
            age: 45,
            experience,
            effectiveness,
            specializations: vec!["set pieces".to_string()],
        }
    }

    #[test]
    fn test_staff_salary() {
        // (120k + 50k + 20k) * 1.0
        assert_eq!(staff_salary(StaffRole::AttackingCoach, 10, 70, StaffNationality::European), 190_000.0);
        // (50k + 0 - 10k) * 0.7
        assert_eq!(staff_salary(StaffRole::Scout, 0, 40, StaffNationality::African), 28_000.0);
    }

    #[test]
    fn test_hire_contract_length() {
        let member = StaffMember::hire("staff_1", candidate(StaffRole::FitnessCoach, 12, 75), 2025);
        assert_eq!(member.contract.start_year, 2025);
        assert_eq!(member.contract.end_year, 2029);
        assert_eq!(member.salary, 185_000.0);
    }

    #[test]
    fn test_renew_contract() {
        let mut member = StaffMember::hire("staff_1", candidate(StaffRole::Scout, 0, 50), 2025);
        member.renew_contract(2, 0.1, 2027);
        assert_eq!(member.salary, 55_000.0);
        assert_eq!(member.contract.end_year, 2029);
        assert!(!member.contract_expires_by(2028));
        assert!(member.contract_expires_by(2029));
    }

    #[test]
    fn test_expiring_and_costs() {
        let a = StaffMember::hire("a", candidate(StaffRole::Scout, 0, 50), 2025);
        let b = StaffMember::hire("b", candidate(StaffRole::Scout, 15, 50), 2025);
        let staff = vec![a, b];
        let expiring = expiring_contracts(&staff, 2026, 1);
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].id, "a");
        assert_eq!(total_staff_costs(&staff), 50_000.0 + 125_000.0);
    }

    #[test]
    fn test_generate_in_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for i in 0..50 {
            let member =
                StaffMember::generate(format!("staff_{i}"), StaffRole::HeadPhysio, StaffNationality::Asian, 2025, &mut rng);
            assert!((5..30).contains(&member.experience));
            assert!((60..90).contains(&member.effectiveness));
            assert_eq!(member.age, 30 + member.experience);
            assert!(member.name.contains(' '));
        }
    }
}
