use crate::CalcFinResult;
use crate::error::ensure_finite;
use crate::params::{Bound, validate_amounts};
use bon::builder;
use serde::{Deserialize, Serialize};

/// Result of a property investment profit calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyQuote {
    /// Purchase price plus purchase, selling and improvement costs.
    pub total_cost: f64,
    /// `sale_price - total_cost`.
    pub net_profit: f64,
    /// Net profit as a percentage of total cost.
    pub roi_pct: f64,
    /// Compound annual growth from total cost to sale price, in percent.
    pub annualized_return_pct: f64,
}

/// Profit, ROI and annualized return on buying and selling a property.
///
/// ```text
/// annualized = ((sale / total_cost)^(1 / years) - 1) · 100
/// ```
///
/// # Example
/// ```rust
/// # use calcfin::prelude::*;
/// let quote = property_profit()
///     .purchase_price(200_000.0)
///     .sale_price(250_000.0)
///     .purchase_costs(5_000.0)
///     .selling_costs(7_500.0)
///     .improvement_costs(10_000.0)
///     .holding_years(5.0)
///     .call()?;
/// assert_eq!(quote.total_cost, 222_500.0);
/// assert_eq!(quote.net_profit, 27_500.0);
/// # CalcFinResult::Ok(())
/// ```
#[builder]
pub fn property_profit(
    purchase_price: f64,
    sale_price: f64,
    #[builder(default = 0.0)] purchase_costs: f64,
    #[builder(default = 0.0)] selling_costs: f64,
    #[builder(default = 0.0)] improvement_costs: f64,
    holding_years: f64,
) -> CalcFinResult<PropertyQuote> {
    validate_amounts(&[
        ("purchase_price", purchase_price, Bound::Positive),
        ("sale_price", sale_price, Bound::Positive),
        ("purchase_costs", purchase_costs, Bound::NonNegative),
        ("selling_costs", selling_costs, Bound::NonNegative),
        ("improvement_costs", improvement_costs, Bound::NonNegative),
        ("holding_years", holding_years, Bound::Positive),
    ])?;

    let total_cost = purchase_price + purchase_costs + selling_costs + improvement_costs;
    let net_profit = sale_price - total_cost;

    let annualized = ((sale_price / total_cost).powf(1.0 / holding_years) - 1.0) * 100.0;

    Ok(PropertyQuote {
        total_cost,
        net_profit,
        roi_pct: net_profit / total_cost * 100.0,
        annualized_return_pct: ensure_finite("annualized return", annualized)?,
    })
}
