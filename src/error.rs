//! Calculation errors

use crate::CalcFinResult;
use thiserror::Error;

/// Errors returned by the solver, projector and calculators.
///
/// Malformed input is the only failure mode. That includes inputs that are individually valid
/// but drive a result past the range of `f64`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcFinError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CalcFinError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CalcFinError::InvalidInput(message.into())
    }
}

/// Pass `value` through when finite, otherwise report `what` as overflowing.
pub(crate) fn ensure_finite(what: &str, value: f64) -> CalcFinResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcFinError::invalid(format!(
            "{what} is not a finite number ({value}); the inputs overflow f64"
        )))
    }
}

impl From<garde::Report> for CalcFinError {
    fn from(report: garde::Report) -> Self {
        CalcFinError::InvalidInput(report.to_string())
    }
}
