//! # Schedule Projector
//!
//! Replays the period-by-period recurrence behind a solved payment or contribution and returns
//! the full ledger, the yearly roll-up used for tables, and year-boundary points used for
//! growth charts.
//!
//! ## Recurrences
//! - **Amortizing** (loans): `interest = B·r`, `principal = PMT - interest`,
//!   `B = max(0, B - principal)`; stops as soon as the balance reaches zero
//! - **Accumulating** (savings): in arrears `B = B·(1 + r) + C`, in advance
//!   `B = (B + C)·(1 + r)`; the principal component is the contribution
//!
//! The running balance is carried forward from period to period, never recomputed from the
//! closed form, so a schedule is exactly what a period-by-period ledger would show.
//!
//! ## Example
//! ```rust
//! # use calcfin::prelude::*;
//! let terms = LoanTerms::builder()
//!     .principal(12_000.0)
//!     .periodic_rate(0.01)
//!     .periods(24)
//!     .build()?;
//! let schedule = amortization_schedule(&terms)?;
//! assert_eq!(schedule.len(), 24);
//! assert_eq!(schedule.yearly.len(), 2);
//! assert!(schedule.final_balance() < 1e-6);
//! # CalcFinResult::Ok(())
//! ```

use crate::annuity::{ContributionTiming, solve_payment};
use crate::params::{CashFlowParams, LoanTerms};
use crate::{CalcFinError, CalcFinResult};
use bon::builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Periods rolled up into one [`YearlySummary`].
pub const PERIODS_PER_YEAR: usize = 12;

/// Longest schedule [`project`] builds: 100 years of monthly periods.
pub const MAX_PERIODS: u32 = 1_200;

/// Which recurrence a schedule follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectionMode {
    /// Level payments pay down a balance (loan, EMI, mortgage).
    Amortizing,
    /// Level contributions and interest grow a balance (SIP, savings, retirement).
    Accumulating,
}

/// One row of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based period number.
    pub period: u32,
    /// Payment (amortizing) or contribution (accumulating) for the period.
    pub payment: f64,
    /// Part of `payment` that reduces the loan, or the contribution itself.
    pub principal_component: f64,
    /// Interest charged (amortizing) or earned (accumulating) in the period.
    pub interest_component: f64,
    /// Balance after the period, never negative.
    pub ending_balance: f64,
}

/// Totals for a run of up to [`PERIODS_PER_YEAR`] consecutive entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// 1-based year number.
    pub year: u32,
    pub total_payment: f64,
    pub total_principal: f64,
    pub total_interest: f64,
    /// Balance at the last period of the year.
    pub ending_balance: f64,
}

/// Cumulative position at a year boundary, year 0 being the starting point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: u32,
    /// Accumulating: starting balance plus contributions so far.
    /// Amortizing: principal repaid so far.
    pub principal: f64,
    /// Interest earned (accumulating) or paid (amortizing) so far.
    pub interest: f64,
    pub balance: f64,
}

/// A full period-by-period ledger plus its yearly roll-up.
///
/// `entries.len()` can be shorter than the requested number of periods when a loan is paid
/// off early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub mode: ProjectionMode,
    pub starting_balance: f64,
    pub entries: Vec<ScheduleEntry>,
    pub yearly: Vec<YearlySummary>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_payment(&self) -> f64 {
        self.entries.iter().map(|e| e.payment).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.entries.iter().map(|e| e.principal_component).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.entries.iter().map(|e| e.interest_component).sum()
    }

    /// Balance after the last entry, or the starting balance for an empty schedule.
    pub fn final_balance(&self) -> f64 {
        self.entries
            .last()
            .map_or(self.starting_balance, |e| e.ending_balance)
    }

    /// Cumulative principal, interest and balance at each year boundary, starting at year 0.
    ///
    /// A partial final year gets its own point.
    pub fn growth_points(&self) -> Vec<GrowthPoint> {
        let base_principal = match self.mode {
            ProjectionMode::Accumulating => self.starting_balance,
            ProjectionMode::Amortizing => 0.0,
        };

        let mut points = Vec::with_capacity(self.yearly.len() + 1);
        points.push(GrowthPoint {
            year: 0,
            principal: base_principal,
            interest: 0.0,
            balance: self.starting_balance,
        });

        let mut principal = base_principal;
        let mut interest = 0.0;
        for summary in &self.yearly {
            principal += summary.total_principal;
            interest += summary.total_interest;
            points.push(GrowthPoint {
                year: summary.year,
                principal,
                interest,
                balance: summary.ending_balance,
            });
        }
        points
    }
}

/// Project a schedule period by period.
///
/// # Parameters
/// - `starting_balance`: Loan principal or opening savings balance
/// - `payment`: Level payment (amortizing) or contribution (accumulating)
/// - `periodic_rate`: Rate for one period as a decimal
/// - `periods`: Number of periods; zero gives an empty schedule
/// - `mode`: [`ProjectionMode`]
/// - `timing`: When contributions land in accumulating mode (default in arrears); loan
///   payments are always in arrears
///
/// # Errors
/// `InvalidInput` for
/// - negative or non-finite amounts and negative rates
/// - more than [`MAX_PERIODS`] periods
/// - an amortizing payment that does not cover the first period's interest, since the balance
///   would never come down
/// - an accumulating balance that overflows `f64`
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let schedule = project()
///     .starting_balance(10_000.0)
///     .payment(1_000.0)
///     .periodic_rate(0.08 / 12.0)
///     .periods(120)
///     .mode(ProjectionMode::Accumulating)
///     .call()?;
/// assert_eq!(schedule.yearly.len(), 10);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn project(
    starting_balance: f64,
    payment: f64,
    periodic_rate: f64,
    periods: u32,
    mode: ProjectionMode,
    #[builder(default)] timing: ContributionTiming,
) -> CalcFinResult<Schedule> {
    CashFlowParams::builder()
        .balance(starting_balance)
        .balance_name("starting_balance")
        .amount(payment)
        .amount_name("payment")
        .periodic_rate(periodic_rate)
        .periods(periods)
        .build()
        .validate_all()?;

    if periods > MAX_PERIODS {
        return Err(CalcFinError::invalid(format!(
            "periods {periods} exceeds the maximum of {MAX_PERIODS}"
        )));
    }

    let entries = match mode {
        ProjectionMode::Amortizing => {
            let first_interest = starting_balance * periodic_rate;
            if starting_balance > 0.0 && payment <= first_interest {
                return Err(CalcFinError::invalid(format!(
                    "payment {payment} does not cover the first period's interest {first_interest}"
                )));
            }
            amortize(starting_balance, payment, periodic_rate, periods)
        }
        ProjectionMode::Accumulating => {
            accumulate(starting_balance, payment, periodic_rate, periods, timing)?
        }
    };
    let yearly = roll_up_yearly(&entries);

    debug!(
        ?mode,
        starting_balance,
        payment,
        periodic_rate,
        periods,
        entries = entries.len(),
        "projected schedule"
    );

    Ok(Schedule {
        mode,
        starting_balance,
        entries,
        yearly,
    })
}

/// Solve the level payment for `terms` and project its amortization schedule.
pub fn amortization_schedule(terms: &LoanTerms) -> CalcFinResult<Schedule> {
    terms.validate_all()?;
    let payment = solve_payment()
        .principal(terms.principal)
        .periodic_rate(terms.periodic_rate)
        .periods(terms.periods)
        .call()?;

    project()
        .starting_balance(terms.principal)
        .payment(payment)
        .periodic_rate(terms.periodic_rate)
        .periods(terms.periods)
        .mode(ProjectionMode::Amortizing)
        .call()
}

/// Group entries into consecutive runs of [`PERIODS_PER_YEAR`]; the last run may be shorter.
pub fn roll_up_yearly(entries: &[ScheduleEntry]) -> Vec<YearlySummary> {
    entries
        .chunks(PERIODS_PER_YEAR)
        .zip(1u32..)
        .map(|(chunk, year)| YearlySummary {
            year,
            total_payment: chunk.iter().map(|e| e.payment).sum(),
            total_principal: chunk.iter().map(|e| e.principal_component).sum(),
            total_interest: chunk.iter().map(|e| e.interest_component).sum(),
            ending_balance: chunk.last().map_or(0.0, |e| e.ending_balance),
        })
        .collect()
}

// ================================================
// PRIVATE FUNCTIONS
// ================================================

fn amortize(principal: f64, payment: f64, periodic_rate: f64, periods: u32) -> Vec<ScheduleEntry> {
    let mut entries = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for period in 1..=periods {
        if balance <= 0.0 {
            trace!(period, "balance cleared before final period");
            break;
        }

        let interest_component = balance * periodic_rate;
        let principal_component = payment - interest_component;
        balance = (balance - principal_component).max(0.0);

        entries.push(ScheduleEntry {
            period,
            payment,
            principal_component,
            interest_component,
            ending_balance: balance,
        });
    }
    entries
}

fn accumulate(
    starting_balance: f64,
    contribution: f64,
    periodic_rate: f64,
    periods: u32,
    timing: ContributionTiming,
) -> CalcFinResult<Vec<ScheduleEntry>> {
    let mut entries = Vec::with_capacity(periods as usize);
    let mut balance = starting_balance;

    for period in 1..=periods {
        let interest_component = match timing {
            ContributionTiming::InArrears => balance * periodic_rate,
            ContributionTiming::InAdvance => (balance + contribution) * periodic_rate,
        };
        balance += interest_component + contribution;
        if !balance.is_finite() {
            return Err(CalcFinError::invalid(format!(
                "balance overflows f64 at period {period}"
            )));
        }

        entries.push(ScheduleEntry {
            period,
            payment: contribution,
            principal_component: contribution,
            interest_component,
            ending_balance: balance,
        });
    }
    Ok(entries)
}
