//! Property tests for the annuity solver and schedule projector.

use approx::assert_relative_eq;
use calcfin::prelude::*;
use proptest::prelude::*;

fn principal_strategy() -> impl Strategy<Value = f64> {
    1.0f64..5_000_000.0
}

fn rate_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0001f64..0.03]
}

fn periods_strategy() -> impl Strategy<Value = u32> {
    1u32..=480
}

proptest! {
    #[test]
    fn amortized_payment_clears_balance(
        principal in principal_strategy(),
        rate in rate_strategy(),
        periods in periods_strategy(),
    ) {
        let payment = solve_payment()
            .principal(principal)
            .periodic_rate(rate)
            .periods(periods)
            .call()
            .unwrap();
        let schedule = project()
            .starting_balance(principal)
            .payment(payment)
            .periodic_rate(rate)
            .periods(periods)
            .mode(ProjectionMode::Amortizing)
            .call()
            .unwrap();

        prop_assert!(schedule.len() <= periods as usize);
        prop_assert!(schedule.final_balance().abs() <= 1e-6 * principal.max(1.0));
        for entry in &schedule.entries {
            prop_assert!(entry.ending_balance >= 0.0);
            prop_assert!(is_close(entry.payment, entry.principal_component + entry.interest_component, 1e-9));
        }
    }

    #[test]
    fn amortizing_balance_never_grows(
        principal in principal_strategy(),
        rate in rate_strategy(),
        payment in 0.0f64..200_000.0,
        periods in 1u32..=MAX_PERIODS,
    ) {
        let result = project()
            .starting_balance(principal)
            .payment(payment)
            .periodic_rate(rate)
            .periods(periods)
            .mode(ProjectionMode::Amortizing)
            .call();

        if payment <= principal * rate {
            prop_assert!(result.is_err());
        } else {
            let schedule = result.unwrap();
            let mut previous = principal;
            for entry in &schedule.entries {
                prop_assert!(entry.ending_balance <= previous);
                previous = entry.ending_balance;
            }
        }
    }

    #[test]
    fn zero_rate_payment_is_exact_division(
        principal in principal_strategy(),
        periods in periods_strategy(),
    ) {
        let payment = solve_payment()
            .principal(principal)
            .periodic_rate(0.0)
            .periods(periods)
            .call()
            .unwrap();
        prop_assert_eq!(payment, principal / periods as f64);
    }

    #[test]
    fn required_contribution_inverts_future_value(
        contribution in 1.0f64..50_000.0,
        rate in rate_strategy(),
        periods in periods_strategy(),
    ) {
        let future_value = solve_future_value()
            .contribution(contribution)
            .periodic_rate(rate)
            .periods(periods)
            .call()
            .unwrap();
        let plan = solve_required_contribution()
            .target_future_value(future_value)
            .periodic_rate(rate)
            .periods(periods)
            .call()
            .unwrap();
        prop_assert!(!plan.goal_met);
        prop_assert!(is_close(plan.contribution, contribution, 1e-9));
    }

    #[test]
    fn payment_increases_with_rate(
        principal in principal_strategy(),
        rate in 0.0f64..0.03,
        bump in 0.0005f64..0.01,
        periods in periods_strategy(),
    ) {
        let lower = solve_payment().principal(principal).periodic_rate(rate).periods(periods).call().unwrap();
        let higher = solve_payment().principal(principal).periodic_rate(rate + bump).periods(periods).call().unwrap();
        prop_assert!(higher > lower);
    }

    #[test]
    fn yearly_totals_equal_period_sums(
        principal in principal_strategy(),
        rate in rate_strategy(),
        periods in periods_strategy(),
        mode in prop_oneof![Just(ProjectionMode::Amortizing), Just(ProjectionMode::Accumulating)],
    ) {
        let payment = solve_payment().principal(principal).periodic_rate(rate).periods(periods).call().unwrap();
        let schedule = project()
            .starting_balance(principal)
            .payment(payment)
            .periodic_rate(rate)
            .periods(periods)
            .mode(mode)
            .call()
            .unwrap();

        prop_assert_eq!(schedule.yearly.len(), schedule.len().div_ceil(PERIODS_PER_YEAR));
        for (summary, chunk) in schedule.yearly.iter().zip(schedule.entries.chunks(PERIODS_PER_YEAR)) {
            prop_assert_eq!(summary.total_payment, chunk.iter().map(|e| e.payment).sum::<f64>());
            prop_assert_eq!(summary.total_principal, chunk.iter().map(|e| e.principal_component).sum::<f64>());
            prop_assert_eq!(summary.total_interest, chunk.iter().map(|e| e.interest_component).sum::<f64>());
            prop_assert_eq!(summary.ending_balance, chunk[chunk.len() - 1].ending_balance);
        }
    }

    #[test]
    fn accumulating_schedule_matches_closed_form(
        starting_balance in 0.0f64..1_000_000.0,
        contribution in 0.0f64..10_000.0,
        rate in rate_strategy(),
        periods in periods_strategy(),
        timing in prop_oneof![Just(ContributionTiming::InArrears), Just(ContributionTiming::InAdvance)],
    ) {
        let schedule = project()
            .starting_balance(starting_balance)
            .payment(contribution)
            .periodic_rate(rate)
            .periods(periods)
            .mode(ProjectionMode::Accumulating)
            .timing(timing)
            .call()
            .unwrap();
        let closed = solve_future_value()
            .contribution(contribution)
            .periodic_rate(rate)
            .periods(periods)
            .starting_balance(starting_balance)
            .timing(timing)
            .call()
            .unwrap();

        prop_assert!(is_close(schedule.final_balance(), closed, 1e-6));
        let balances: Vec<f64> = schedule.entries.iter().map(|e| e.ending_balance).collect();
        prop_assert!(balances.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn principal_inverts_payment(
        principal in principal_strategy(),
        rate in rate_strategy(),
        periods in periods_strategy(),
    ) {
        let payment = solve_payment().principal(principal).periodic_rate(rate).periods(periods).call().unwrap();
        let back = solve_principal().payment(payment).periodic_rate(rate).periods(periods).call().unwrap();
        prop_assert!(is_close(back, principal, 1e-9));
    }
}

#[test]
fn test_scenario_emi_standard() {
    let payment = solve_payment()
        .principal(100_000.0)
        .periodic_rate(0.10 / 12.0)
        .periods(60)
        .call()
        .unwrap();
    assert_eq!(round_dp(payment, 2), 2124.70);
}

#[test]
fn test_scenario_zero_principal_rejected() {
    let result = solve_payment()
        .principal(0.0)
        .periodic_rate(0.10 / 12.0)
        .periods(60)
        .call();
    assert!(matches!(result, Err(CalcFinError::InvalidInput(_))));
}

#[test]
fn test_scenario_accumulating_ten_years() {
    let rate = 0.08 / 12.0;
    let schedule = project()
        .starting_balance(10_000.0)
        .payment(1_000.0)
        .periodic_rate(rate)
        .periods(120)
        .mode(ProjectionMode::Accumulating)
        .call()
        .unwrap();
    let growth = (1.0f64 + rate).powf(120.0);
    let closed = 10_000.0 * growth + 1_000.0 * (growth - 1.0) / rate;
    assert_relative_eq!(schedule.final_balance(), closed, max_relative = 1e-6);
}
