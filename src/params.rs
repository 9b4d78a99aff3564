use crate::CalcFinResult;
use bon::{Builder, bon};
use garde::Validate;
use serde::{Deserialize, Serialize};

// =======================================
// LOAN TERMS
// =======================================

/// A loan (or investment horizon) expressed in a single compounding unit, usually months.
///
/// Built fresh for every calculation and never mutated. Construction validates the fields:
/// ```rust
/// # use calcfin::prelude::*;
/// let terms = LoanTerms::builder()
///     .principal(250_000.0)
///     .periodic_rate(0.065 / 12.0)
///     .periods(360)
///     .build()?;
/// assert_eq!(terms.periods, 360);
/// assert!(LoanTerms::builder().principal(-1.0).periodic_rate(0.01).periods(12).build().is_err());
/// # CalcFinResult::Ok(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Validate, Serialize, Deserialize)]
#[garde(allow_unvalidated)]
pub struct LoanTerms {
    /// Amount borrowed.
    #[garde(range(min = 0.0))]
    pub principal: f64,

    /// Rate for one period as a decimal (e.g. `0.01` for 1% a month).
    #[garde(range(min = 0.0))]
    pub periodic_rate: f64,

    /// Number of payments.
    #[garde(range(min = 1))]
    pub periods: u32,
}

#[bon]
impl LoanTerms {
    #[builder]
    pub fn new(principal: f64, periodic_rate: f64, periods: u32) -> CalcFinResult<Self> {
        let terms = LoanTerms {
            principal,
            periodic_rate,
            periods,
        };
        terms.validate_all()?;
        Ok(terms)
    }

    /// Validate with finiteness checks using Result<(), garde::Report>
    pub fn validate_all(&self) -> Result<(), garde::Report> {
        self.validate()?;

        let mut errors: ErrorVec = Vec::new();
        check_finite("principal", self.principal, &mut errors);
        check_finite("periodic_rate", self.periodic_rate, &mut errors);
        into_report(errors)
    }
}

// =======================================
// CASH FLOW PARAMETER STRUCT
// =======================================

/// Internal parameters shared by the annuity solver and the schedule projector.
///
/// `amount` is the level payment (loans) or contribution (savings); `balance` is the principal
/// or starting balance. Both carry the caller-facing parameter name used in error reports.
/// `periods` may be zero here; solvers that need at least one period set `require_periods`.
#[derive(Debug, Clone, Validate, Builder)]
#[garde(allow_unvalidated)]
pub(crate) struct CashFlowParams {
    pub balance: f64,
    pub balance_name: &'static str,

    pub amount: f64,
    pub amount_name: &'static str,

    #[garde(range(min = 0.0))]
    pub periodic_rate: f64,

    pub periods: u32,

    #[builder(default = false)]
    pub require_periods: bool,
}

impl CashFlowParams {
    /// Validate with cross-field validation using Result<(), garde::Report>
    pub fn validate_all(&self) -> Result<(), garde::Report> {
        self.validate()?;
        self.validate_custom_constraints()
    }

    fn validate_custom_constraints(&self) -> Result<(), garde::Report> {
        let mut errors: ErrorVec = Vec::new();

        check_amount(self.balance_name, self.balance, Bound::NonNegative, &mut errors);
        check_amount(self.amount_name, self.amount, Bound::NonNegative, &mut errors);
        check_finite("periodic_rate", self.periodic_rate, &mut errors);

        if self.require_periods && self.periods == 0 {
            errors.push(("periods", "periods must be at least 1".into()));
        }

        into_report(errors)
    }
}

// =======================================
// TENURE
// =======================================

/// A term entered as whole years plus extra months.
///
/// ```rust
/// # use calcfin::prelude::*;
/// let tenure = Tenure::builder().years(5).months(6).build()?;
/// assert_eq!(tenure.total_months(), 66);
/// # CalcFinResult::Ok(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate, Serialize, Deserialize)]
pub struct Tenure {
    #[garde(range(max = 100))]
    pub years: u32,

    #[garde(range(max = 11))]
    pub months: u32,
}

#[bon]
impl Tenure {
    #[builder]
    pub fn new(
        #[builder(default = 0)] years: u32,
        #[builder(default = 0)] months: u32,
    ) -> CalcFinResult<Self> {
        let tenure = Tenure { years, months };
        tenure.validate()?;
        Ok(tenure)
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

// =======================================
// CALCULATOR INPUT CHECKS
// =======================================

/// Lower bound a calculator input must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Positive,
    NonNegative,
}

/// Check every named amount is finite and within its bound, reporting all failures together.
pub(crate) fn validate_amounts(fields: &[(&'static str, f64, Bound)]) -> Result<(), garde::Report> {
    let mut errors: ErrorVec = Vec::new();
    for &(path, value, bound) in fields {
        check_amount(path, value, bound, &mut errors);
    }
    into_report(errors)
}

// =======================================
// PRIVATE FUNCTIONS
// =======================================

type ErrorVec = Vec<(&'static str, String)>;

fn check_finite(path: &'static str, value: f64, errors: &mut ErrorVec) {
    if !value.is_finite() {
        errors.push((path, format!("{path} must be a finite number, got {value}")));
    }
}

fn check_amount(path: &'static str, value: f64, bound: Bound, errors: &mut ErrorVec) {
    if !value.is_finite() {
        check_finite(path, value, errors);
        return;
    }
    match bound {
        Bound::Positive if value <= 0.0 => {
            errors.push((path, format!("{path} must be greater than 0, got {value}")));
        }
        Bound::NonNegative if value < 0.0 => {
            errors.push((path, format!("{path} cannot be negative, got {value}")));
        }
        _ => {}
    }
}

fn into_report(errors: ErrorVec) -> Result<(), garde::Report> {
    let mut report = garde::Report::new();
    for (path, message) in errors {
        report.append(garde::Path::new(path), garde::Error::new(message));
    }

    if report.is_empty() {
        Ok(())
    } else {
        Err(report)
    }
}
