use serde::{Deserialize, Serialize};

use crate::models::club::Club;

use super::streams::{
    facility_maintenance, financial_status, project_monthly_revenue, total_player_wages,
    FinancialStatus, RevenueInputs, SponsorshipDeal,
};

/// Medical and scouting spend per month, as a share of the budget allocation.
const MEDICAL_SHARE: f64 = 0.02;
const SCOUTING_SHARE: f64 = 0.07;

/// Club money at the latest monthly recalculation. Stream and expense
/// fields are monthly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubFinances {
    pub total_budget: f64,
    pub available_funds: f64,
    pub weekly_wages: f64,
    pub monthly_revenue: f64,

    pub ticket_revenue: f64,
    pub sponsorship_revenue: f64,
    pub merchandise_sales: f64,
    pub television_rights: f64,
    pub prize_money_earned: f64,

    pub player_wages: f64,
    pub staff_salaries: f64,
    pub facility_maintenance: f64,
    pub medical_expenses: f64,
    pub scouting_budget: f64,

    /// Net over revenue, percent
    pub profit_margin: f64,
    pub debt_level: f64,
    pub financial_status: FinancialStatus,

    #[serde(default)]
    pub sponsorships: Vec<SponsorshipDeal>,
}

/// What a monthly recalculation needs besides the club itself.
#[derive(Debug, Clone, Copy)]
pub struct MonthContext {
    pub league_position: u32,
    pub matches_this_month: u32,
    /// Annual
    pub television_deal: f64,
    /// Annual
    pub staff_salaries: f64,
}

impl ClubFinances {
    /// Opening position for a club: funds equal the budget, two default
    /// sponsors worth 4% and 2% of it.
    pub fn new(club: &Club) -> Self {
        let sponsorships = vec![
            SponsorshipDeal {
                id: "shirt".to_string(),
                name: format!("{} Shirt Sponsor", club.name),
                annual_value: (club.budget * 0.04).round(),
                years_remaining: 3,
                performance_bonus: (club.budget * 0.01).round(),
                termination_clause: false,
            },
            SponsorshipDeal {
                id: "stadium".to_string(),
                name: format!("{} Stadium Partner", club.name),
                annual_value: (club.budget * 0.02).round(),
                years_remaining: 5,
                performance_bonus: 0.0,
                termination_clause: true,
            },
        ];

        let weekly_wages = total_player_wages(&club.players) / 52.0;
        Self {
            total_budget: club.budget,
            available_funds: club.budget,
            weekly_wages,
            monthly_revenue: 0.0,
            ticket_revenue: 0.0,
            sponsorship_revenue: 0.0,
            merchandise_sales: 0.0,
            television_rights: 0.0,
            prize_money_earned: 0.0,
            player_wages: weekly_wages * 52.0 / 12.0,
            staff_salaries: 0.0,
            facility_maintenance: 0.0,
            medical_expenses: 0.0,
            scouting_budget: 0.0,
            profit_margin: 0.0,
            debt_level: 0.0,
            financial_status: FinancialStatus::Stable,
            sponsorships,
        }
    }

    /// Monthly expenses from the expense fields.
    pub fn monthly_expenses(&self) -> f64 {
        self.player_wages
            + self.staff_salaries
            + self.facility_maintenance
            + self.medical_expenses
            + self.scouting_budget
    }

    /// Refresh revenue streams and expenses from the club and league state,
    /// then book the month's cash flow.
    pub fn recalculate(&mut self, club: &Club, ctx: &MonthContext) {
        let projection = project_monthly_revenue(&RevenueInputs {
            stadium_capacity: club.stadium_capacity,
            fan_base: club.fan_base,
            league_position: ctx.league_position,
            sponsorships: &self.sponsorships,
            television_deal: ctx.television_deal,
            matches_this_month: ctx.matches_this_month,
        });

        self.ticket_revenue = projection.ticket_revenue;
        self.sponsorship_revenue = projection.sponsorship_revenue;
        self.merchandise_sales = projection.merchandise_revenue;
        self.television_rights = projection.television_revenue;

        let annual_wages = total_player_wages(&club.players);
        self.weekly_wages = annual_wages / 52.0;
        self.player_wages = annual_wages / 12.0;
        self.staff_salaries = ctx.staff_salaries / 12.0;
        self.facility_maintenance = facility_maintenance(
            club.stadium_capacity,
            club.facilities.training_ground,
            club.facilities.medical,
            club.facilities.youth_academy,
        ) / 12.0;
        self.medical_expenses = (self.total_budget * MEDICAL_SHARE / 12.0).round();
        self.scouting_budget = (self.total_budget * SCOUTING_SHARE / 12.0).round();

        let expenses = self.monthly_expenses();
        *self = simulate_financial_month(self, projection.total_revenue, expenses);
        log::debug!(
            "{} finances: revenue {:.0}, expenses {:.0}, funds {:.0} ({})",
            club.name,
            projection.total_revenue,
            expenses,
            self.available_funds,
            self.financial_status.as_str()
        );
    }

    /// Season rollover: new budget, funds topped up by the difference,
    /// prize money recorded, sponsorship terms count down.
    pub fn start_new_season(&mut self, new_budget: f64, prize_money: f64) {
        self.available_funds += new_budget - self.total_budget;
        self.total_budget = new_budget;
        self.prize_money_earned = prize_money;
        for deal in &mut self.sponsorships {
            deal.years_remaining = deal.years_remaining.saturating_sub(1);
        }
        self.sponsorships.retain(|d| d.years_remaining > 0);
        if self.available_funds < 0.0 {
            self.debt_level = -self.available_funds;
        } else {
            self.debt_level = 0.0;
        }
    }
}

/// Book one month: funds move by revenue minus expenses, margin and status
/// are recomputed. Negative funds are tracked as debt.
pub fn simulate_financial_month(
    current: &ClubFinances,
    monthly_revenue: f64,
    monthly_expenses: f64,
) -> ClubFinances {
    let net = monthly_revenue - monthly_expenses;
    let available_funds = current.available_funds + net;
    let profit_margin = if monthly_revenue > 0.0 {
        net / monthly_revenue * 100.0
    } else if net < 0.0 {
        -100.0
    } else {
        0.0
    };

    ClubFinances {
        available_funds,
        monthly_revenue,
        profit_margin,
        debt_level: (-available_funds).max(0.0),
        financial_status: financial_status(available_funds, monthly_expenses),
        ..current.clone()
    }
}

pub fn financial_warnings(finances: &ClubFinances) -> Vec<String> {
    let mut warnings = Vec::new();

    match finances.financial_status {
        FinancialStatus::Critical => {
            warnings.push("CRITICAL: Club finances are in severe danger!".to_string())
        }
        FinancialStatus::Struggling => {
            warnings.push("WARNING: Club finances are struggling.".to_string())
        }
        _ => {}
    }
    if finances.debt_level > finances.total_budget * 0.5 {
        warnings.push("High debt levels detected. Consider selling players.".to_string());
    }
    if finances.available_funds < finances.weekly_wages * 4.0 {
        warnings.push("Low cash reserves. May struggle to pay wages soon.".to_string());
    }
    if finances.profit_margin < 0.0 {
        warnings.push("Operating at a loss. Revenue is below expenses.".to_string());
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{Player, PlayerAttributes, Position};

    fn club() -> Club {
        let players = (1..=18)
            .map(|id| Player::new(id, "P", "Layer", Position::CM, 26, PlayerAttributes::uniform(70)).with_overall(70.0))
            .collect();
        Club::new(1, "Testing FC", 50_000_000.0, players)
    }

    #[test]
    fn test_new_finances_start_from_budget() {
        let finances = ClubFinances::new(&club());
        assert_eq!(finances.available_funds, 50_000_000.0);
        assert_eq!(finances.sponsorships.len(), 2);
        assert!((finances.weekly_wages - 18.0 * 70.0 * 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_recalculate_books_month() {
        let club = club();
        let mut finances = ClubFinances::new(&club);
        let ctx = MonthContext {
            league_position: 5,
            matches_this_month: 2,
            television_deal: 5_000_000.0,
            staff_salaries: 1_200_000.0,
        };
        finances.recalculate(&club, &ctx);

        assert!(finances.ticket_revenue > 0.0);
        assert_eq!(finances.staff_salaries, 100_000.0);
        let expected_funds = 50_000_000.0 + finances.monthly_revenue - finances.monthly_expenses();
        assert!((finances.available_funds - expected_funds).abs() < 1e-3);
        assert_eq!(
            finances.financial_status,
            financial_status(finances.available_funds, finances.monthly_expenses())
        );
    }

    #[test]
    fn test_simulate_month_loss_goes_into_debt() {
        let mut finances = ClubFinances::new(&club());
        finances.available_funds = 100_000.0;
        let next = simulate_financial_month(&finances, 50_000.0, 250_000.0);
        assert_eq!(next.available_funds, -100_000.0);
        assert_eq!(next.debt_level, 100_000.0);
        assert_eq!(next.profit_margin, -400.0);
        assert_eq!(next.financial_status, FinancialStatus::Critical);

        let warnings = financial_warnings(&next);
        assert!(warnings.iter().any(|w| w.starts_with("CRITICAL")));
        assert!(warnings.iter().any(|w| w.contains("loss")));
        assert!(warnings.iter().any(|w| w.contains("Low cash")));
    }

    #[test]
    fn test_zero_revenue_margin() {
        let finances = ClubFinances::new(&club());
        assert_eq!(simulate_financial_month(&finances, 0.0, 10.0).profit_margin, -100.0);
        assert_eq!(simulate_financial_month(&finances, 0.0, 0.0).profit_margin, 0.0);
    }

    #[test]
    fn test_new_season_expires_sponsors() {
        let mut finances = ClubFinances::new(&club());
        for _ in 0..3 {
            finances.start_new_season(60_000_000.0, 1_000_000.0);
        }
        assert_eq!(finances.sponsorships.len(), 1);
        assert_eq!(finances.total_budget, 60_000_000.0);
        assert_eq!(finances.available_funds, 60_000_000.0);
    }
}
