//! # calcfin Prelude
//!
//! Conveniently re-exports the most common types and functions.
//! Import this module to access the solver, the projector and every calculator with a single
//! `use` statement.
//!
//! ## Example
//!
//! ```rust
//! # use calcfin::prelude::*;
//! let quote = mortgage()
//!     .home_price(300_000.0)
//!     .down_payment(60_000.0)
//!     .annual_rate_pct(6.5)
//!     .months(360)
//!     .call()?;
//! for year in &quote.loan.schedule.yearly {
//!     println!(
//!         "Year {}: interest {:.0}, balance {:.0}",
//!         year.year, year.total_interest, year.ending_balance
//!     );
//! }
//! # CalcFinResult::Ok(())
//! ```

// Package Result and error types
pub use crate::{CalcFinError, CalcFinResult};

// Interest rate conversion functions
pub use crate::int_rate_convert::*;

// Annuity solver
pub use crate::annuity::*;

// Schedule projector
pub use crate::schedule::*;

// Calculators
pub use crate::calculators::{MAX_YEARS, MONTHS_PER_YEAR};
pub use crate::calculators::growth::*;
pub use crate::calculators::loans::*;
pub use crate::calculators::property::*;

// Parameter types
pub use crate::params::{LoanTerms, Tenure};

// Display and date helpers
pub use crate::helpers::{is_close, months_between, round_dp};
