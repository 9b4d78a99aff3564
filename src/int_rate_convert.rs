use serde::{Deserialize, Serialize};

/// How many times a year interest is credited.
///
/// Calculators pick one of these instead of accepting a free-form count, so an unsupported
/// frequency cannot reach the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    /// Number of compounding periods in one year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

/// Convert an annual percentage rate to the simple rate for one period.
///
/// # Formula
/// ```text
/// r = pct / 100 / m
/// ```
/// where:
/// - `annual_pct` is the quoted annual rate in percent (e.g. `10.5` for 10.5%)
/// - `m` is the number of periods per year
///
/// # Example
/// ```rust
/// # use calcfin::prelude::annual_pct_to_periodic;
/// let monthly = annual_pct_to_periodic(12.0, 12);
/// assert!((monthly - 0.01).abs() < 1e-12);
/// ```
pub fn annual_pct_to_periodic(annual_pct: f64, m: u32) -> f64 {
    annual_pct / 100.0 / m as f64
}

/// Convert nominal interest rate to effective interest rate.
///
/// # Formula
/// ```text
/// i = (1 + i⁽ᵐ⁾/m)^m - 1
/// ```
/// where:
/// - `nom_i` is the nominal annual rate (decimal) convertible m times per year
/// - `m` is the number of conversion periods per year
///
/// # Example
/// ```rust
/// # use calcfin::prelude::nom_i_to_eff_i;
/// let eff = nom_i_to_eff_i(0.12, 12); // 12% convertible monthly
/// println!("Effective i: {:.6}", eff);
/// ```
pub fn nom_i_to_eff_i(nom_i: f64, m: u32) -> f64 {
    let m_f64 = m as f64;
    (1.0 + nom_i / m_f64).powf(m_f64) - 1.0
}

/// Convert effective interest rate to nominal interest rate (m-payable).
///
/// # Formula
/// ```text
/// i⁽ᵐ⁾ = m[(1 + i)¹⁄ᵐ - 1]
/// ```
///
/// # Example
/// ```rust
/// # use calcfin::prelude::eff_i_to_nom_i;
/// let nom = eff_i_to_nom_i(0.1268250301, 12);
/// assert!((nom - 0.12).abs() < 1e-9);
/// ```
pub fn eff_i_to_nom_i(eff_i: f64, m: u32) -> f64 {
    let m_f64 = m as f64;
    m_f64 * ((1.0 + eff_i).powf(1.0 / m_f64) - 1.0)
}

/// Effective rate for one of `m` periods equivalent to an effective annual rate.
///
/// # Formula
/// ```text
/// j = (1 + i)¹⁄ᵐ - 1
/// ```
pub fn eff_i_to_periodic(eff_i: f64, m: u32) -> f64 {
    eff_i_to_nom_i(eff_i, m) / m as f64
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_annual_pct_to_periodic() {
        assert_abs_diff_eq!(annual_pct_to_periodic(10.0, 12), 0.10 / 12.0, epsilon = 1e-15);
        assert_abs_diff_eq!(annual_pct_to_periodic(6.5, 1), 0.065, epsilon = 1e-15);
        assert_eq!(annual_pct_to_periodic(0.0, 12), 0.0);
    }

    #[test]
    fn test_nominal_effective_inverse() {
        let rates = [0.01, 0.05, 0.12, 0.2];
        let freqs = [1, 2, 4, 12, 365];
        for rate in rates {
            for m in freqs {
                let eff = nom_i_to_eff_i(rate, m);
                assert_abs_diff_eq!(eff_i_to_nom_i(eff, m), rate, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_monthly_effective() {
        // 12% nominal monthly -> 12.6825% effective
        assert_abs_diff_eq!(nom_i_to_eff_i(0.12, 12), 0.126825, epsilon = 1e-6);
        // 12% effective -> about 0.9489% a month
        assert_abs_diff_eq!(eff_i_to_periodic(0.12, 12), 0.009489, epsilon = 1e-6);
    }

    #[test]
    fn test_frequency_periods() {
        assert_eq!(CompoundingFrequency::Annually.periods_per_year(), 1);
        assert_eq!(CompoundingFrequency::SemiAnnually.periods_per_year(), 2);
        assert_eq!(CompoundingFrequency::Quarterly.periods_per_year(), 4);
        assert_eq!(CompoundingFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(CompoundingFrequency::Daily.periods_per_year(), 365);
    }
}
