use crate::{CalcFinError, CalcFinResult};
use chrono::NaiveDate;

/// Average days in a month used when turning a date range into whole months.
pub const AVG_DAYS_PER_MONTH: f64 = 30.44;

// ================================================
// PUBLIC FUNCTIONS
// ================================================

/// Round half away from zero to `dp` decimal places, for display.
///
/// ```rust
/// # use calcfin::prelude::round_dp;
/// assert_eq!(round_dp(2124.704471, 2), 2124.7);
/// assert_eq!(round_dp(-0.125, 2), -0.13);
/// ```
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// Whether `a` and `b` agree within an absolute tolerance, or a relative one for large values.
pub fn is_close(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = (a - b).abs();
    diff <= tolerance || diff <= tolerance * a.abs().max(b.abs())
}

/// Whole months from `from` until `to`, counted in 30.44-day months and rounded up.
///
/// The caller supplies `from` (usually today) so results stay reproducible.
///
/// # Errors
/// `InvalidInput` when `to` is not after `from`.
///
/// ```rust
/// # use calcfin::prelude::*;
/// use chrono::NaiveDate;
/// let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let to = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// assert_eq!(months_between(from, to)?, 12);
/// # CalcFinResult::Ok(())
/// ```
pub fn months_between(from: NaiveDate, to: NaiveDate) -> CalcFinResult<u32> {
    let days = (to - from).num_days();
    if days <= 0 {
        return Err(CalcFinError::invalid(format!(
            "target date {to} must be after {from}"
        )));
    }
    Ok((days as f64 / AVG_DAYS_PER_MONTH).ceil() as u32)
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(1161695.381759, 2), 1161695.38);
        assert_eq!(round_dp(27482.268, 0), 27482.0);
        assert_eq!(round_dp(0.5, 0), 1.0);
    }

    #[test]
    fn test_is_close() {
        assert!(is_close(1.0, 1.0 + 1e-12, 1e-9));
        assert!(is_close(1e9, 1e9 + 0.5, 1e-9));
        assert!(!is_close(1.0, 1.1, 1e-6));
    }

    #[test]
    fn test_months_between() {
        // 365 / 30.44 = 11.99 -> 12
        assert_eq!(months_between(date(2025, 1, 1), date(2026, 1, 1)).unwrap(), 12);
        assert_eq!(months_between(date(2025, 1, 1), date(2025, 1, 2)).unwrap(), 1);
        // 1826 days / 30.44 = 59.99 -> 60
        assert_eq!(months_between(date(2025, 1, 1), date(2030, 1, 1)).unwrap(), 60);
    }

    #[test]
    fn test_months_between_past_date() {
        assert!(months_between(date(2025, 6, 1), date(2025, 6, 1)).is_err());
        assert!(months_between(date(2025, 6, 1), date(2024, 6, 1)).is_err());
    }
}
