//! # calcfin Basic Usage Example
//!
//! Walks through the loan, growth and property calculators.
//! Run with `RUST_LOG=calcfin=debug` to see the solver events.

use calcfin::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> CalcFinResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("calcfin Basic Usage Example");
    println!("===========================");

    // Loans
    println!("\n=== EMI (100,000 at 10% over 5 years) ===");
    let tenure = Tenure::builder().years(5).build()?;
    let loan = emi()
        .principal(100_000.0)
        .annual_rate_pct(10.0)
        .months(tenure.total_months())
        .call()?;
    println!("  Monthly payment: {:.2}", loan.payment);
    println!("  Total interest:  {:.2}", loan.total_interest);
    for year in &loan.schedule.yearly {
        println!(
            "  Year {}: principal {:>10.2}  interest {:>9.2}  balance {:>10.2}",
            year.year, year.total_principal, year.total_interest, year.ending_balance
        );
    }

    println!("\n=== Mortgage (300,000 home, 20% down, 6.5% over 30 years) ===");
    let home = mortgage()
        .home_price(300_000.0)
        .down_payment(60_000.0)
        .annual_rate_pct(6.5)
        .months(360)
        .call()?;
    println!("  Loan amount:     {:.2}", home.loan.principal);
    println!("  Monthly payment: {:.2}", home.loan.payment);
    println!("  Total interest:  {:.2}", home.loan.total_interest);

    println!("\n=== Affordability (90,000 income, 500 monthly debts) ===");
    let afford = loan_affordability()
        .annual_income(90_000.0)
        .monthly_debts(500.0)
        .down_payment(40_000.0)
        .annual_rate_pct(6.5)
        .years(30)
        .call()?;
    println!("  Max payment:    {:.2}", afford.max_payment);
    println!("  Max loan:       {:.2}", afford.max_loan);
    println!("  Max home price: {:.2}", afford.max_home_price);

    // Growth
    println!("\n=== SIP (5,000 monthly at 12% for 10 years) ===");
    let plan = sip()
        .monthly_investment(5_000.0)
        .annual_return_pct(12.0)
        .years(10)
        .call()?;
    println!("  Invested:      {:.2}", plan.total_contributed);
    println!("  Future value:  {:.2}", plan.future_value);
    println!("  Wealth gained: {:.2}", plan.wealth_gained);

    println!("\n=== Compound interest (10,000 at 5%, monthly, 10 years) ===");
    let compound = compound_interest()
        .principal(10_000.0)
        .annual_rate_pct(5.0)
        .years(10.0)
        .frequency(CompoundingFrequency::Monthly)
        .call()?;
    println!("  Future value:   {:.2}", compound.future_value);
    println!("  Effective rate: {:.4}%", compound.effective_annual_rate_pct);

    println!("\n=== Retirement (age 30 to 65, goal 1,500,000) ===");
    let retire = retirement()
        .current_age(30)
        .retirement_age(65)
        .current_savings(25_000.0)
        .monthly_contribution(800.0)
        .annual_return_pct(7.0)
        .goal(1_500_000.0)
        .call()?;
    println!("  Projected savings:    {:.2}", retire.projected);
    println!("  Shortfall:            {:.2}", retire.shortfall);
    println!("  Required contribution: {:.2}", retire.plan.contribution);

    println!("\n=== Savings goal (50,000 in 5 years) ===");
    let goal = savings_goal()
        .goal(50_000.0)
        .current_savings(10_000.0)
        .annual_rate_pct(4.0)
        .months(60)
        .call()?;
    if goal.plan.goal_met {
        println!("  Current savings already reach the goal");
    } else {
        println!("  Monthly saving needed: {:.2}", goal.plan.contribution);
    }
    println!("  Interest earned: {:.2}", goal.interest_earned);

    // Property
    println!("\n=== Property profit ===");
    let property = property_profit()
        .purchase_price(200_000.0)
        .sale_price(250_000.0)
        .purchase_costs(5_000.0)
        .selling_costs(7_500.0)
        .improvement_costs(10_000.0)
        .holding_years(5.0)
        .call()?;
    println!("  Net profit: {:.2}", property.net_profit);
    println!("  ROI:        {:.2}%", property.roi_pct);
    println!("  Annualized: {:.2}%", property.annualized_return_pct);

    Ok(())
}
