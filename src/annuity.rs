use crate::error::ensure_finite;
use crate::params::CashFlowParams;
use crate::{CalcFinError, CalcFinResult};
use bon::builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// When in each period a level contribution is made.
///
/// - **InArrears**: end of period (ordinary annuity); the last contribution earns no interest
/// - **InAdvance**: start of period (annuity-due); every contribution compounds once more
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContributionTiming {
    #[default]
    InArrears,
    InAdvance,
}

/// Outcome of solving for the contribution that reaches a savings target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Level contribution per period, never negative.
    pub contribution: f64,
    /// True when the starting balance alone reaches the target, so no contribution is needed.
    pub goal_met: bool,
    /// What the starting balance grows to on its own over the horizon.
    pub starting_balance_growth: f64,
}

/// Level payment that fully amortizes a loan (EMI).
///
/// # Formula
/// ```text
/// PMT = P · r · (1 + r)ⁿ / ((1 + r)ⁿ - 1)
/// ```
/// and `PMT = P / n` when `r = 0`.
///
/// # Parameters
/// - `principal`: Amount borrowed, must be positive
/// - `periodic_rate`: Rate for one period as a decimal
/// - `periods`: Number of payments, at least 1
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let emi = solve_payment()
///     .principal(100_000.0)
///     .periodic_rate(0.10 / 12.0)
///     .periods(60)
///     .call()?;
/// assert!((emi - 2124.70).abs() < 0.01);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn solve_payment(principal: f64, periodic_rate: f64, periods: u32) -> CalcFinResult<f64> {
    CashFlowParams::builder()
        .balance(principal)
        .balance_name("principal")
        .amount(0.0)
        .amount_name("payment")
        .periodic_rate(periodic_rate)
        .periods(periods)
        .require_periods(true)
        .build()
        .validate_all()?;

    if principal <= 0.0 {
        return Err(CalcFinError::invalid("principal must be greater than 0"));
    }

    let n = periods as f64;
    let growth = growth_factor(periodic_rate, periods)?;
    // Also catches rates too small to move (1 + r)ⁿ off 1.0
    let payment = ensure_finite(
        "payment",
        if growth == 1.0 {
            principal / n
        } else {
            principal * periodic_rate * growth / (growth - 1.0)
        },
    )?;

    debug!(principal, periodic_rate, periods, payment, "solved level payment");
    Ok(payment)
}

/// Principal that a level payment can amortize (present value of an annuity-immediate).
///
/// # Formula
/// ```text
/// P = PMT · ((1 + r)ⁿ - 1) / (r · (1 + r)ⁿ)
/// ```
/// and `P = PMT · n` when `r = 0`.
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let principal = solve_principal()
///     .payment(2124.704)
///     .periodic_rate(0.10 / 12.0)
///     .periods(60)
///     .call()?;
/// assert!((principal - 100_000.0).abs() < 1.0);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn solve_principal(payment: f64, periodic_rate: f64, periods: u32) -> CalcFinResult<f64> {
    CashFlowParams::builder()
        .balance(0.0)
        .balance_name("principal")
        .amount(payment)
        .amount_name("payment")
        .periodic_rate(periodic_rate)
        .periods(periods)
        .require_periods(true)
        .build()
        .validate_all()?;

    let n = periods as f64;
    let growth = growth_factor(periodic_rate, periods)?;
    let principal = ensure_finite(
        "principal",
        if growth == 1.0 {
            payment * n
        } else {
            payment * (growth - 1.0) / (periodic_rate * growth)
        },
    )?;

    debug!(payment, periodic_rate, periods, principal, "solved affordable principal");
    Ok(principal)
}

/// Future value of a starting balance plus a level contribution every period.
///
/// # Formula
/// ```text
/// FV = S · (1 + r)ⁿ + C · sₙ
/// ```
/// where `sₙ = ((1 + r)ⁿ - 1) / r` for contributions in arrears and `sₙ · (1 + r)` for
/// contributions in advance. When `r = 0`, `FV = S + C · n` for either timing.
///
/// # Parameters
/// - `contribution`: Level amount added each period
/// - `periodic_rate`: Rate for one period as a decimal
/// - `periods`: Number of periods, at least 1
/// - `starting_balance`: Balance at time 0 (default 0)
/// - `timing`: [`ContributionTiming`] (default in arrears)
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// // 5,000 a month at 12% a year for 10 years, invested at the start of each month
/// let fv = solve_future_value()
///     .contribution(5_000.0)
///     .periodic_rate(0.01)
///     .periods(120)
///     .timing(ContributionTiming::InAdvance)
///     .call()?;
/// assert!((fv - 1_161_695.38).abs() < 0.01);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn solve_future_value(
    contribution: f64,
    periodic_rate: f64,
    periods: u32,
    #[builder(default = 0.0)] starting_balance: f64,
    #[builder(default)] timing: ContributionTiming,
) -> CalcFinResult<f64> {
    CashFlowParams::builder()
        .balance(starting_balance)
        .balance_name("starting_balance")
        .amount(contribution)
        .amount_name("contribution")
        .periodic_rate(periodic_rate)
        .periods(periods)
        .require_periods(true)
        .build()
        .validate_all()?;

    let n = periods as f64;
    let growth = growth_factor(periodic_rate, periods)?;
    let future_value = ensure_finite(
        "future value",
        if growth == 1.0 {
            starting_balance + contribution * n
        } else {
            starting_balance * growth
                + contribution * accumulation_factor(periodic_rate, growth, timing)
        },
    )?;

    debug!(
        contribution,
        periodic_rate,
        periods,
        starting_balance,
        ?timing,
        future_value,
        "solved future value"
    );
    Ok(future_value)
}

/// Level contribution needed to grow a starting balance to a target.
///
/// Inverse of [`solve_future_value`]:
/// ```text
/// C = (FV - S · (1 + r)ⁿ) / sₙ
/// ```
/// and `C = (FV - S) / n` when `r = 0`. If the starting balance already grows past the target
/// the contribution is clamped to zero and [`ContributionPlan::goal_met`] is set.
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let plan = solve_required_contribution()
///     .target_future_value(50_000.0)
///     .starting_balance(10_000.0)
///     .periodic_rate(0.04 / 12.0)
///     .periods(48)
///     .call()?;
/// assert!(!plan.goal_met);
/// assert!(plan.contribution > 0.0);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn solve_required_contribution(
    target_future_value: f64,
    #[builder(default = 0.0)] starting_balance: f64,
    periodic_rate: f64,
    periods: u32,
    #[builder(default)] timing: ContributionTiming,
) -> CalcFinResult<ContributionPlan> {
    CashFlowParams::builder()
        .balance(starting_balance)
        .balance_name("starting_balance")
        .amount(target_future_value)
        .amount_name("target_future_value")
        .periodic_rate(periodic_rate)
        .periods(periods)
        .require_periods(true)
        .build()
        .validate_all()?;

    let n = periods as f64;
    let growth = growth_factor(periodic_rate, periods)?;
    let (raw, starting_balance_growth) = if growth == 1.0 {
        ((target_future_value - starting_balance) / n, starting_balance)
    } else {
        let grown = starting_balance * growth;
        (
            (target_future_value - grown) / accumulation_factor(periodic_rate, growth, timing),
            grown,
        )
    };

    let plan = ContributionPlan {
        contribution: ensure_finite("contribution", raw)?.max(0.0),
        goal_met: raw <= 0.0,
        starting_balance_growth: ensure_finite("starting balance growth", starting_balance_growth)?,
    };

    debug!(
        target_future_value,
        starting_balance,
        periodic_rate,
        periods,
        ?timing,
        contribution = plan.contribution,
        goal_met = plan.goal_met,
        "solved required contribution"
    );
    Ok(plan)
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

/// `(1 + r)ⁿ`, rejected when it leaves the range of `f64`.
fn growth_factor(periodic_rate: f64, periods: u32) -> CalcFinResult<f64> {
    let growth = (1.0 + periodic_rate).powf(periods as f64);
    if growth.is_finite() {
        Ok(growth)
    } else {
        Err(CalcFinError::invalid(format!(
            "periodic_rate {periodic_rate} compounded over {periods} periods overflows f64"
        )))
    }
}

/// Accumulated value of 1 per period: sₙ in arrears, s̈ₙ in advance. `r` must be non-zero.
fn accumulation_factor(periodic_rate: f64, growth: f64, timing: ContributionTiming) -> f64 {
    let arrears = (growth - 1.0) / periodic_rate;
    match timing {
        ContributionTiming::InArrears => arrears,
        ContributionTiming::InAdvance => arrears * (1.0 + periodic_rate),
    }
}
