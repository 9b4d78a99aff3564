//! # calcfin
//!
//! A small, type-safe Rust library for loan amortization, savings growth projection and the
//! everyday financial calculators built on top of them.
//!
//! ## Features
//! - **Annuity solver**: level loan payment (EMI), future value of periodic contributions,
//!   required contribution to reach a goal, and affordable principal for a given payment
//! - **Schedule projector**: period-by-period ledgers for amortizing loans and accumulating
//!   savings, with yearly roll-ups and year-boundary growth series for charts
//! - **Calculators**: EMI, mortgage, loan affordability, SIP, compound interest, retirement,
//!   savings goal and property profit
//! - **Builder Pattern**: All functions use builder pattern with automatic parameter validation
//!
//! ## Quick Start
//!
//! ```rust
//! use calcfin::prelude::*;
//!
//! // 100,000 borrowed at 10% a year over 5 years, paid monthly
//! let rate = annual_pct_to_periodic(10.0, 12);
//! let emi = solve_payment()
//!     .principal(100_000.0)
//!     .periodic_rate(rate)
//!     .periods(60)
//!     .call()?;
//!
//! let schedule = project()
//!     .starting_balance(100_000.0)
//!     .payment(emi)
//!     .periodic_rate(rate)
//!     .periods(60)
//!     .mode(ProjectionMode::Amortizing)
//!     .call()?;
//!
//! println!("EMI: {:.2}", emi);
//! println!("Total interest: {:.2}", schedule.total_interest());
//! println!("Years in table: {}", schedule.yearly.len());
//! # CalcFinResult::Ok(())
//! ```
//!
//! ## Notes
//! - Rates are decimals per compounding period (e.g. `0.10 / 12` for 10% a year paid monthly)
//! - Invalid inputs (negative amounts, negative rates, zero periods where a solve needs them)
//!   fail with [`CalcFinError::InvalidInput`] instead of producing NaN or infinity
//! - Nothing here keeps state between calls; every result is owned by the caller

pub mod annuity;
pub mod calculators;
pub mod error;
pub mod helpers;
pub mod int_rate_convert;
pub mod params;
pub mod prelude;
pub mod schedule;

pub use error::CalcFinError;

pub type CalcFinResult<T> = Result<T, CalcFinError>;
