//! Stateless revenue and expense derivations.
//!
//! All money values are in pounds as `f64`. Annual figures are marked as
//! such; everything else is per month.

use serde::{Deserialize, Serialize};

use crate::models::player::Player;

const TICKET_PRICE: f64 = 50.0;
const MERCHANDISE_PER_FAN: f64 = 10.0;
const WAGE_PER_RATING_POINT: f64 = 2_000.0;
const YOUNG_PLAYER_PREMIUM: f64 = 1.3;
const AGING_PLAYER_DISCOUNT: f64 = 0.7;

const COACH_SALARY: f64 = 50_000.0;
const MEDICAL_SALARY: f64 = 40_000.0;
const SCOUT_SALARY: f64 = 30_000.0;

/// Prize money by final league position, 1st to 20th.
pub const PRIZE_MONEY: [f64; 20] = [
    15_000_000.0,
    12_000_000.0,
    10_000_000.0,
    8_000_000.0,
    6_000_000.0,
    5_000_000.0,
    4_000_000.0,
    3_000_000.0,
    2_500_000.0,
    2_000_000.0,
    1_500_000.0,
    1_000_000.0,
    800_000.0,
    600_000.0,
    400_000.0,
    300_000.0,
    200_000.0,
    100_000.0,
    50_000.0,
    25_000.0,
];

/// Prize for a league position; anything outside the table earns the minimum.
pub fn prize_money(league_position: u32) -> f64 {
    league_position
        .checked_sub(1)
        .and_then(|i| PRIZE_MONEY.get(i as usize))
        .copied()
        .unwrap_or(PRIZE_MONEY[PRIZE_MONEY.len() - 1])
}

pub fn ticket_revenue(
    stadium_capacity: u32,
    attendance_pct: f64,
    ticket_price: f64,
    matches_per_month: u32,
) -> f64 {
    let attendance = stadium_capacity as f64 * (attendance_pct / 100.0);
    (attendance * ticket_price * matches_per_month as f64).round()
}

/// Annual merchandise revenue. Top 4 x1.5, top 8 x1.2, below 15th x0.7.
pub fn merchandise_revenue(fan_base: u32, league_position: u32, revenue_per_fan: f64) -> f64 {
    let multiplier = match league_position {
        1..=4 => 1.5,
        5..=8 => 1.2,
        p if p > 15 => 0.7,
        _ => 1.0,
    };
    (fan_base as f64 * revenue_per_fan * multiplier).round()
}

/// Annual wage bill: rating x 2000 per week, x1.3 under 25, x0.7 over 30.
pub fn total_player_wages(players: &[Player]) -> f64 {
    let weekly: f64 = players
        .iter()
        .map(|p| {
            let wage = p.overall_rating as f64 * WAGE_PER_RATING_POINT;
            if p.age < 25 {
                wage * YOUNG_PLAYER_PREMIUM
            } else if p.age > 30 {
                wage * AGING_PLAYER_DISCOUNT
            } else {
                wage
            }
        })
        .sum();
    weekly * 52.0
}

/// Annual staff cost from head counts.
pub fn staff_salaries(manager_salary: f64, coaches: u32, medical: u32, scouts: u32) -> f64 {
    manager_salary
        + coaches as f64 * COACH_SALARY
        + medical as f64 * MEDICAL_SALARY
        + scouts as f64 * SCOUT_SALARY
}

/// Annual upkeep: 50k per 1000 seats plus facility levels.
pub fn facility_maintenance(
    stadium_capacity: u32,
    training_ground: u8,
    medical: u8,
    youth_academy: u8,
) -> f64 {
    let stadium = stadium_capacity as f64 / 1000.0 * 50_000.0;
    let training = training_ground as f64 * 100_000.0;
    let medical = medical as f64 * 75_000.0;
    let academy = youth_academy as f64 * 80_000.0;
    (stadium + training + medical + academy).round()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialStatus {
    Excellent,
    Good,
    Stable,
    Struggling,
    Critical,
}

impl FinancialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialStatus::Excellent => "excellent",
            FinancialStatus::Good => "good",
            FinancialStatus::Stable => "stable",
            FinancialStatus::Struggling => "struggling",
            FinancialStatus::Critical => "critical",
        }
    }
}

/// Classify by months of runway: > 24, > 12, > 6, > 2.
///
/// No expenses means infinite runway.
pub fn financial_status(available_funds: f64, monthly_expenses: f64) -> FinancialStatus {
    if monthly_expenses <= 0.0 {
        return FinancialStatus::Excellent;
    }
    let runway = available_funds / monthly_expenses;
    if runway > 24.0 {
        FinancialStatus::Excellent
    } else if runway > 12.0 {
        FinancialStatus::Good
    } else if runway > 6.0 {
        FinancialStatus::Stable
    } else if runway > 2.0 {
        FinancialStatus::Struggling
    } else {
        FinancialStatus::Critical
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SponsorshipDeal {
    pub id: String,
    pub name: String,
    pub annual_value: f64,
    pub years_remaining: u32,
    /// Paid on a top-4 finish
    pub performance_bonus: f64,
    #[serde(default)]
    pub termination_clause: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub ticket_revenue: f64,
    pub sponsorship_revenue: f64,
    pub merchandise_revenue: f64,
    pub television_revenue: f64,
    pub total_revenue: f64,
}

/// Inputs for a monthly revenue projection.
#[derive(Debug, Clone, Copy)]
pub struct RevenueInputs<'a> {
    pub stadium_capacity: u32,
    pub fan_base: u32,
    pub league_position: u32,
    pub sponsorships: &'a [SponsorshipDeal],
    /// Annual
    pub television_deal: f64,
    pub matches_this_month: u32,
}

/// Attendance share for a league position: 100% at the top, two points
/// fewer per place, never under 40%.
pub fn attendance_pct(league_position: u32) -> f64 {
    (100.0 - 2.0 * league_position.saturating_sub(1) as f64).clamp(40.0, 100.0)
}

pub fn project_monthly_revenue(inputs: &RevenueInputs<'_>) -> RevenueProjection {
    let ticket_revenue = ticket_revenue(
        inputs.stadium_capacity,
        attendance_pct(inputs.league_position),
        TICKET_PRICE,
        inputs.matches_this_month,
    );
    let merchandise_revenue =
        merchandise_revenue(inputs.fan_base, inputs.league_position, MERCHANDISE_PER_FAN) / 12.0;
    let sponsorship_revenue: f64 = inputs.sponsorships.iter().map(|d| d.annual_value / 12.0).sum();
    let television_revenue = inputs.television_deal / 12.0;

    RevenueProjection {
        ticket_revenue,
        sponsorship_revenue,
        merchandise_revenue,
        television_revenue,
        total_revenue: ticket_revenue + merchandise_revenue + sponsorship_revenue + television_revenue,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceFinancials {
    pub new_budget: f64,
    pub bonus_earned: f64,
    pub penalties: f64,
}

/// End-of-season money: prize, sponsor bonuses for top 4, a 5M penalty
/// below 18th, and a win-rate bonus (> 0.6) or penalty (< 0.3).
pub fn apply_performance_financials(
    current_budget: f64,
    league_position: u32,
    win_rate: f64,
    sponsorships: &[SponsorshipDeal],
) -> PerformanceFinancials {
    let mut bonus_earned = prize_money(league_position);
    let mut penalties = 0.0;

    if league_position <= 4 {
        bonus_earned += sponsorships.iter().map(|d| d.performance_bonus).sum::<f64>();
    }
    if league_position > 18 {
        penalties += 5_000_000.0;
    }
    if win_rate > 0.6 {
        bonus_earned += 2_000_000.0;
    } else if win_rate < 0.3 {
        penalties += 1_000_000.0;
    }

    PerformanceFinancials {
        new_budget: current_budget + bonus_earned - penalties,
        bonus_earned,
        penalties,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub player_wages: f64,
    pub staff_salaries: f64,
    pub facility_maintenance: f64,
    pub scouting_budget: f64,
    pub reserve: f64,
}

/// Recommended split: 50% wages, 10% staff, 8% facilities, 7% scouting, 25% reserve.
pub fn budget_allocation(total_budget: f64) -> BudgetAllocation {
    BudgetAllocation {
        player_wages: (total_budget * 0.50).round(),
        staff_salaries: (total_budget * 0.10).round(),
        facility_maintenance: (total_budget * 0.08).round(),
        scouting_budget: (total_budget * 0.07).round(),
        reserve: (total_budget * 0.25).round(),
    }
}

/// Next season's budget: current plus TV deal and prize money, then
/// x1.1 for top 4, x1.05 for top 8, x0.9 below 15th.
pub fn season_budget(current_budget: f64, league_position: u32, television_deal: f64) -> f64 {
    let budget = current_budget + television_deal + prize_money(league_position);
    let budget = match league_position {
        1..=4 => budget * 1.1,
        5..=8 => budget * 1.05,
        p if p > 15 => budget * 0.9,
        _ => budget,
    };
    budget.round()
}
