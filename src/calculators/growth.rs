use super::{MONTHS_PER_YEAR, check_years};
use crate::annuity::{
    ContributionPlan, ContributionTiming, solve_future_value, solve_required_contribution,
};
use crate::int_rate_convert::{CompoundingFrequency, annual_pct_to_periodic, nom_i_to_eff_i};
use crate::error::ensure_finite;
use crate::params::{Bound, validate_amounts};
use crate::schedule::{GrowthPoint, ProjectionMode, Schedule, project};
use crate::{CalcFinError, CalcFinResult};
use bon::builder;
use serde::{Deserialize, Serialize};

/// Result of a SIP (systematic investment plan) projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthQuote {
    /// Maturity value.
    pub future_value: f64,
    pub total_contributed: f64,
    /// `future_value - total_contributed`.
    pub wealth_gained: f64,
    /// `wealth_gained` as a percentage of `total_contributed`.
    pub return_pct: f64,
    pub schedule: Schedule,
    /// Year-boundary points for a growth chart, year 0 first.
    pub growth: Vec<GrowthPoint>,
}

/// Result of a lump-sum compound interest calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundQuote {
    pub future_value: f64,
    pub total_interest: f64,
    /// Effective annual rate in percent implied by the compounding frequency.
    pub effective_annual_rate_pct: f64,
    /// Balance at each whole year, plus the final balance when the term ends mid-year.
    pub growth: Vec<GrowthPoint>,
}

/// Result of a retirement projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementQuote {
    /// Months until retirement.
    pub months: u32,
    /// Savings at retirement with the current contribution.
    pub projected: f64,
    /// `goal - projected`; negative when the goal is exceeded.
    pub shortfall: f64,
    /// Monthly contribution that exactly reaches the goal.
    pub plan: ContributionPlan,
    pub schedule: Schedule,
    /// Year-boundary points for a growth chart, year 0 first.
    pub growth: Vec<GrowthPoint>,
}

/// Result of a savings goal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalQuote {
    pub months: u32,
    pub plan: ContributionPlan,
    /// Balance reached by following the plan.
    pub projected: f64,
    pub total_contributed: f64,
    /// `projected - current_savings - total_contributed`.
    pub interest_earned: f64,
    pub schedule: Schedule,
    pub growth: Vec<GrowthPoint>,
}

/// Maturity value of a monthly SIP.
///
/// Instalments are invested at the start of each month (annuity-due):
/// ```text
/// FV = C · ((1 + r)ⁿ - 1) / r · (1 + r)
/// ```
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let quote = sip()
///     .monthly_investment(5_000.0)
///     .annual_return_pct(12.0)
///     .years(10)
///     .call()?;
/// assert_eq!(round_dp(quote.future_value, 2), 1_161_695.38);
/// assert_eq!(quote.total_contributed, 600_000.0);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn sip(
    monthly_investment: f64,
    annual_return_pct: f64,
    years: u32,
) -> CalcFinResult<GrowthQuote> {
    validate_amounts(&[
        ("monthly_investment", monthly_investment, Bound::Positive),
        ("annual_return_pct", annual_return_pct, Bound::NonNegative),
    ])?;
    check_years(years as f64)?;

    let rate = annual_pct_to_periodic(annual_return_pct, MONTHS_PER_YEAR);
    let months = years * MONTHS_PER_YEAR;
    let future_value = solve_future_value()
        .contribution(monthly_investment)
        .periodic_rate(rate)
        .periods(months)
        .timing(ContributionTiming::InAdvance)
        .call()?;
    let schedule = project()
        .starting_balance(0.0)
        .payment(monthly_investment)
        .periodic_rate(rate)
        .periods(months)
        .mode(ProjectionMode::Accumulating)
        .timing(ContributionTiming::InAdvance)
        .call()?;

    let total_contributed = monthly_investment * months as f64;
    let wealth_gained = future_value - total_contributed;
    Ok(GrowthQuote {
        future_value,
        total_contributed,
        wealth_gained,
        return_pct: wealth_gained / total_contributed * 100.0,
        growth: schedule.growth_points(),
        schedule,
    })
}

/// Future value of a lump sum compounded at a fixed frequency.
///
/// ```text
/// FV = P · (1 + r/m)^(m·t)
/// ```
/// `years` may be fractional.
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let quote = compound_interest()
///     .principal(10_000.0)
///     .annual_rate_pct(8.0)
///     .years(10.0)
///     .call()?;
/// assert_eq!(round_dp(quote.future_value, 2), 21_589.25);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn compound_interest(
    principal: f64,
    annual_rate_pct: f64,
    years: f64,
    #[builder(default = CompoundingFrequency::Annually)] frequency: CompoundingFrequency,
) -> CalcFinResult<CompoundQuote> {
    validate_amounts(&[
        ("principal", principal, Bound::Positive),
        ("annual_rate_pct", annual_rate_pct, Bound::NonNegative),
        ("years", years, Bound::Positive),
    ])?;
    check_years(years)?;

    let m = frequency.periods_per_year();
    let nominal = annual_rate_pct / 100.0;
    let per_period = annual_pct_to_periodic(annual_rate_pct, m);
    let balance_at = |t: f64| principal * (1.0 + per_period).powf(m as f64 * t);

    let whole_years = years.floor() as u32;
    let mut growth: Vec<GrowthPoint> = (0..=whole_years)
        .map(|year| {
            let balance = balance_at(year as f64);
            GrowthPoint {
                year,
                principal,
                interest: balance - principal,
                balance,
            }
        })
        .collect();

    let future_value = ensure_finite("future value", balance_at(years))?;
    if years.fract() > 0.0 {
        growth.push(GrowthPoint {
            year: whole_years + 1,
            principal,
            interest: future_value - principal,
            balance: future_value,
        });
    }

    Ok(CompoundQuote {
        future_value,
        total_interest: future_value - principal,
        effective_annual_rate_pct: nom_i_to_eff_i(nominal, m) * 100.0,
        growth,
    })
}

/// Savings at retirement and the monthly contribution needed to hit a goal.
///
/// Contributions are made at the end of each month (ordinary annuity).
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let quote = retirement()
///     .current_age(30)
///     .retirement_age(65)
///     .current_savings(50_000.0)
///     .monthly_contribution(1_000.0)
///     .annual_return_pct(7.0)
///     .goal(1_000_000.0)
///     .call()?;
/// assert_eq!(quote.months, 420);
/// assert!(quote.shortfall < 0.0);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn retirement(
    current_age: u32,
    retirement_age: u32,
    #[builder(default = 0.0)] current_savings: f64,
    #[builder(default = 0.0)] monthly_contribution: f64,
    annual_return_pct: f64,
    goal: f64,
) -> CalcFinResult<RetirementQuote> {
    validate_amounts(&[
        ("current_savings", current_savings, Bound::NonNegative),
        ("monthly_contribution", monthly_contribution, Bound::NonNegative),
        ("annual_return_pct", annual_return_pct, Bound::NonNegative),
        ("goal", goal, Bound::Positive),
    ])?;
    if retirement_age <= current_age {
        return Err(CalcFinError::invalid(format!(
            "retirement age {retirement_age} must be greater than current age {current_age}"
        )));
    }
    check_years((retirement_age - current_age) as f64)?;

    let rate = annual_pct_to_periodic(annual_return_pct, MONTHS_PER_YEAR);
    let months = (retirement_age - current_age) * MONTHS_PER_YEAR;

    let projected = solve_future_value()
        .contribution(monthly_contribution)
        .periodic_rate(rate)
        .periods(months)
        .starting_balance(current_savings)
        .call()?;
    let plan = solve_required_contribution()
        .target_future_value(goal)
        .starting_balance(current_savings)
        .periodic_rate(rate)
        .periods(months)
        .call()?;
    let schedule = project()
        .starting_balance(current_savings)
        .payment(monthly_contribution)
        .periodic_rate(rate)
        .periods(months)
        .mode(ProjectionMode::Accumulating)
        .call()?;

    Ok(RetirementQuote {
        months,
        projected,
        shortfall: goal - projected,
        plan,
        growth: schedule.growth_points(),
        schedule,
    })
}

/// Monthly saving needed to reach a goal within a number of months.
///
/// Deposits are made at the end of each month (ordinary annuity). Use
/// [`crate::helpers::months_between`] to turn a target date into `months`.
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let quote = savings_goal()
///     .goal(50_000.0)
///     .current_savings(10_000.0)
///     .annual_rate_pct(4.0)
///     .months(60)
///     .call()?;
/// assert!(!quote.plan.goal_met);
/// assert_eq!(round_dp(quote.plan.contribution, 2), 569.99);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn savings_goal(
    goal: f64,
    #[builder(default = 0.0)] current_savings: f64,
    annual_rate_pct: f64,
    months: u32,
) -> CalcFinResult<SavingsGoalQuote> {
    validate_amounts(&[
        ("goal", goal, Bound::Positive),
        ("current_savings", current_savings, Bound::NonNegative),
        ("annual_rate_pct", annual_rate_pct, Bound::NonNegative),
    ])?;
    check_years(months as f64 / MONTHS_PER_YEAR as f64)?;

    let rate = annual_pct_to_periodic(annual_rate_pct, MONTHS_PER_YEAR);
    let plan = solve_required_contribution()
        .target_future_value(goal)
        .starting_balance(current_savings)
        .periodic_rate(rate)
        .periods(months)
        .call()?;
    let projected = solve_future_value()
        .contribution(plan.contribution)
        .periodic_rate(rate)
        .periods(months)
        .starting_balance(current_savings)
        .call()?;
    let schedule = project()
        .starting_balance(current_savings)
        .payment(plan.contribution)
        .periodic_rate(rate)
        .periods(months)
        .mode(ProjectionMode::Accumulating)
        .call()?;

    let total_contributed = plan.contribution * months as f64;
    Ok(SavingsGoalQuote {
        months,
        plan,
        projected,
        total_contributed,
        interest_earned: projected - current_savings - total_contributed,
        growth: schedule.growth_points(),
        schedule,
    })
}
