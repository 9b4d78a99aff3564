//! # Financial Calculators
//!
//! Ready-made calculators composed from the annuity solver and schedule projector. Every
//! calculator takes annual rates in percent (e.g. `6.5` for 6.5%) and monthly periods, validates
//! its inputs up front and returns a serializable quote.
//!
//! ## Submodules
//! - [`loans`]: EMI, mortgage and loan affordability
//! - [`growth`]: SIP, compound interest, retirement and savings goal
//! - [`property`]: property investment profit
//!
//! ## Contribution timing
//! Each calculator keeps the convention of the formula it is known by:
//! - SIP: contributions at the start of each month (annuity-due)
//! - Retirement and savings goal: contributions at the end of each month (ordinary annuity)
//! - Loans: payments at the end of each month
//!
//! ## Usage Example
//! ```rust
//! # use calcfin::prelude::*;
//! let quote = emi()
//!     .principal(100_000.0)
//!     .annual_rate_pct(10.0)
//!     .months(60)
//!     .call()?;
//! println!("EMI: {:.2}", quote.payment);
//!
//! let sip = sip()
//!     .monthly_investment(5_000.0)
//!     .annual_return_pct(12.0)
//!     .years(10)
//!     .call()?;
//! println!("Maturity: {:.0}", sip.future_value);
//! # CalcFinResult::Ok(())
//! ```

// Module structure
pub mod growth;
pub mod loans;
pub mod property;

use crate::{CalcFinError, CalcFinResult};

/// Payments per year assumed by every calculator.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest horizon, in years, any calculator accepts.
pub const MAX_YEARS: f64 = 100.0;

fn check_years(years: f64) -> CalcFinResult<()> {
    if years > MAX_YEARS {
        return Err(CalcFinError::invalid(format!(
            "horizon of {years} years exceeds the maximum of {MAX_YEARS}"
        )));
    }
    Ok(())
}
