use super::{MONTHS_PER_YEAR, check_years};
use crate::annuity::{solve_payment, solve_principal};
use crate::int_rate_convert::annual_pct_to_periodic;
use crate::params::{Bound, validate_amounts};
use crate::schedule::{ProjectionMode, Schedule, project};
use crate::{CalcFinError, CalcFinResult};
use bon::builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of an EMI (level monthly payment) calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub principal: f64,
    /// Level monthly payment.
    pub payment: f64,
    /// `payment · months`.
    pub total_payment: f64,
    /// `total_payment - principal`.
    pub total_interest: f64,
    pub months: u32,
    /// Month-by-month amortization with yearly roll-up.
    pub schedule: Schedule,
}

/// Result of a mortgage calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageQuote {
    pub home_price: f64,
    pub down_payment: f64,
    /// Down payment as a percentage of the home price.
    pub down_payment_pct: f64,
    /// Quote for the financed amount (`home_price - down_payment`).
    pub loan: LoanQuote,
}

/// Result of a loan affordability check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityQuote {
    /// Largest monthly housing payment allowed by both debt ratios.
    pub max_payment: f64,
    /// Principal that `max_payment` amortizes over the term.
    pub max_loan: f64,
    /// `max_loan + down_payment`.
    pub max_home_price: f64,
    /// Monthly debts plus `max_payment` as a percentage of gross monthly income.
    pub debt_to_income_pct: f64,
}

/// Monthly EMI for a loan, with its amortization schedule.
///
/// # Parameters
/// - `principal`: Amount borrowed
/// - `annual_rate_pct`: Annual interest rate in percent
/// - `months`: Loan tenure in months (see [`crate::params::Tenure`])
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let tenure = Tenure::builder().years(5).build()?;
/// let quote = emi()
///     .principal(100_000.0)
///     .annual_rate_pct(10.0)
///     .months(tenure.total_months())
///     .call()?;
/// assert_eq!(round_dp(quote.payment, 2), 2124.70);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn emi(principal: f64, annual_rate_pct: f64, months: u32) -> CalcFinResult<LoanQuote> {
    validate_amounts(&[
        ("principal", principal, Bound::Positive),
        ("annual_rate_pct", annual_rate_pct, Bound::NonNegative),
    ])?;
    check_years(months as f64 / MONTHS_PER_YEAR as f64)?;

    let rate = annual_pct_to_periodic(annual_rate_pct, MONTHS_PER_YEAR);
    let payment = solve_payment()
        .principal(principal)
        .periodic_rate(rate)
        .periods(months)
        .call()?;
    let schedule = project()
        .starting_balance(principal)
        .payment(payment)
        .periodic_rate(rate)
        .periods(months)
        .mode(ProjectionMode::Amortizing)
        .call()?;

    let total_payment = payment * months as f64;
    Ok(LoanQuote {
        principal,
        payment,
        total_payment,
        total_interest: total_payment - principal,
        months,
        schedule,
    })
}

/// Monthly mortgage payment on a home price less a down payment.
///
/// # Errors
/// `InvalidInput` when the down payment covers the whole price (nothing to finance).
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let quote = mortgage()
///     .home_price(300_000.0)
///     .down_payment(60_000.0)
///     .annual_rate_pct(6.5)
///     .months(360)
///     .call()?;
/// assert_eq!(quote.loan.principal, 240_000.0);
/// assert_eq!(quote.down_payment_pct, 20.0);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn mortgage(
    home_price: f64,
    #[builder(default = 0.0)] down_payment: f64,
    annual_rate_pct: f64,
    months: u32,
) -> CalcFinResult<MortgageQuote> {
    validate_amounts(&[
        ("home_price", home_price, Bound::Positive),
        ("down_payment", down_payment, Bound::NonNegative),
    ])?;
    if down_payment >= home_price {
        return Err(CalcFinError::invalid(format!(
            "down payment {down_payment} must be less than home price {home_price}"
        )));
    }

    let loan = emi()
        .principal(home_price - down_payment)
        .annual_rate_pct(annual_rate_pct)
        .months(months)
        .call()?;

    Ok(MortgageQuote {
        home_price,
        down_payment,
        down_payment_pct: down_payment / home_price * 100.0,
        loan,
    })
}

/// Largest loan and home price a gross income supports under housing and total debt ratios.
///
/// The monthly housing payment is capped at `housing_ratio` of gross monthly income and at
/// `total_debt_ratio` of it less existing monthly debts. A cap below zero means no loan is
/// affordable: `max_payment` and `max_loan` come back as zero.
///
/// # Parameters
/// - `annual_income`: Gross yearly income
/// - `monthly_debts`: Existing monthly debt payments (default 0)
/// - `down_payment`: Cash put toward the purchase (default 0)
/// - `annual_rate_pct`: Annual interest rate in percent
/// - `years`: Loan term in years
/// - `housing_ratio`: Front-end ratio (default 0.28)
/// - `total_debt_ratio`: Back-end ratio (default 0.36)
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let quote = loan_affordability()
///     .annual_income(75_000.0)
///     .monthly_debts(500.0)
///     .down_payment(50_000.0)
///     .annual_rate_pct(6.5)
///     .years(30)
///     .call()?;
/// assert!((quote.max_payment - 1_750.0).abs() < 1e-9);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn loan_affordability(
    annual_income: f64,
    #[builder(default = 0.0)] monthly_debts: f64,
    #[builder(default = 0.0)] down_payment: f64,
    annual_rate_pct: f64,
    years: u32,
    #[builder(default = 0.28)] housing_ratio: f64,
    #[builder(default = 0.36)] total_debt_ratio: f64,
) -> CalcFinResult<AffordabilityQuote> {
    validate_amounts(&[
        ("annual_income", annual_income, Bound::Positive),
        ("monthly_debts", monthly_debts, Bound::NonNegative),
        ("down_payment", down_payment, Bound::NonNegative),
        ("annual_rate_pct", annual_rate_pct, Bound::NonNegative),
        ("housing_ratio", housing_ratio, Bound::Positive),
        ("total_debt_ratio", total_debt_ratio, Bound::Positive),
    ])?;
    check_years(years as f64)?;

    let monthly_income = annual_income / MONTHS_PER_YEAR as f64;
    let max_payment = (monthly_income * housing_ratio)
        .min(monthly_income * total_debt_ratio - monthly_debts)
        .max(0.0);

    let max_loan = solve_principal()
        .payment(max_payment)
        .periodic_rate(annual_pct_to_periodic(annual_rate_pct, MONTHS_PER_YEAR))
        .periods(years * MONTHS_PER_YEAR)
        .call()?;

    let quote = AffordabilityQuote {
        max_payment,
        max_loan,
        max_home_price: max_loan + down_payment,
        debt_to_income_pct: (monthly_debts + max_payment) / monthly_income * 100.0,
    };
    debug!(?quote, "loan affordability");
    Ok(quote)
}

// ================================================
// UNIT TESTS
// ================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fn_emi_01() {
        let quote = emi()
            .principal(100_000.0)
            .annual_rate_pct(10.0)
            .months(60)
            .call()
            .unwrap();
        assert_abs_diff_eq!(quote.payment, 2124.70, epsilon = 1e-2);
        assert_abs_diff_eq!(quote.total_payment, 127_482.27, epsilon = 1e-2);
        assert_abs_diff_eq!(quote.total_interest, 27_482.27, epsilon = 1e-2);
        assert_eq!(quote.schedule.len(), 60);
        assert_eq!(quote.schedule.yearly.len(), 5);
        assert_abs_diff_eq!(quote.schedule.final_balance(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fn_emi_zero_rate() {
        let quote = emi()
            .principal(6_000.0)
            .annual_rate_pct(0.0)
            .months(24)
            .call()
            .unwrap();
        assert_eq!(quote.payment, 250.0);
        assert_eq!(quote.total_interest, 0.0);
    }

    #[test]
    fn test_fn_emi_invalid() {
        assert!(emi().principal(0.0).annual_rate_pct(10.0).months(60).call().is_err());
        assert!(emi().principal(1_000.0).annual_rate_pct(-1.0).months(60).call().is_err());
        assert!(emi().principal(1_000.0).annual_rate_pct(10.0).months(0).call().is_err());
    }

    #[test]
    fn test_fn_loans_reject_horizon_past_max_years() {
        let emi_result = emi().principal(1_000.0).annual_rate_pct(10.0).months(u32::MAX).call();
        assert!(emi_result.unwrap_err().to_string().contains("exceeds the maximum"));

        let mortgage_result = mortgage()
            .home_price(300_000.0)
            .annual_rate_pct(6.5)
            .months(1_212)
            .call();
        assert!(mortgage_result.is_err());

        let afford = loan_affordability()
            .annual_income(75_000.0)
            .annual_rate_pct(6.5)
            .years(u32::MAX)
            .call();
        assert!(matches!(afford, Err(CalcFinError::InvalidInput(_))));

        // 100 years exactly is still accepted
        let longest = emi().principal(1_000.0).annual_rate_pct(10.0).months(1_200).call().unwrap();
        assert_eq!(longest.schedule.len(), 1_200);
    }

    #[test]
    fn test_fn_emi_rejects_overflowing_rate() {
        // 100% a month over 100 years: 2^1200 overflows
        let result = emi().principal(100_000.0).annual_rate_pct(1_200.0).months(1_200).call();
        assert!(result.unwrap_err().to_string().contains("overflows"));
    }

    #[test]
    fn test_fn_mortgage_01() {
        let quote = mortgage()
            .home_price(300_000.0)
            .down_payment(60_000.0)
            .annual_rate_pct(6.5)
            .months(360)
            .call()
            .unwrap();
        assert_eq!(quote.loan.principal, 240_000.0);
        assert_abs_diff_eq!(quote.loan.payment, 1516.96, epsilon = 1e-2);
        assert_eq!(quote.loan.schedule.yearly.len(), 30);
    }

    #[test]
    fn test_fn_mortgage_down_payment_covers_price() {
        let result = mortgage()
            .home_price(300_000.0)
            .down_payment(300_000.0)
            .annual_rate_pct(6.5)
            .months(360)
            .call();
        assert!(matches!(result, Err(CalcFinError::InvalidInput(_))));
    }

    #[test]
    fn test_fn_loan_affordability_01() {
        let quote = loan_affordability()
            .annual_income(75_000.0)
            .monthly_debts(500.0)
            .down_payment(50_000.0)
            .annual_rate_pct(6.5)
            .years(30)
            .call()
            .unwrap();
        // min(6250 · 0.28, 6250 · 0.36 - 500) = min(1750, 1750)
        assert_abs_diff_eq!(quote.max_payment, 1_750.0, epsilon = 1e-9);
        assert_abs_diff_eq!(quote.max_loan, 276_868.93, epsilon = 1e-2);
        assert_abs_diff_eq!(quote.max_home_price, quote.max_loan + 50_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(quote.debt_to_income_pct, 36.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fn_loan_affordability_debts_exceed_capacity() {
        let quote = loan_affordability()
            .annual_income(24_000.0)
            .monthly_debts(1_000.0)
            .annual_rate_pct(7.0)
            .years(30)
            .call()
            .unwrap();
        assert_eq!(quote.max_payment, 0.0);
        assert_eq!(quote.max_loan, 0.0);
        assert_eq!(quote.max_home_price, 0.0);
    }
}
