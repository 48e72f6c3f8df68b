//! Club finances: revenue streams, expenses and budget rollover.

pub mod ledger;
pub mod streams;

pub use ledger::{financial_warnings, simulate_financial_month, ClubFinances, MonthContext};
pub use streams::{
    apply_performance_financials, attendance_pct, budget_allocation, facility_maintenance,
    financial_status, merchandise_revenue, prize_money, project_monthly_revenue, season_budget,
    staff_salaries, ticket_revenue, total_player_wages, BudgetAllocation, FinancialStatus,
    PerformanceFinancials, RevenueInputs, RevenueProjection, SponsorshipDeal, PRIZE_MONEY,
};
