use finanhogar_core::acquisition::compute_acquisition_costs;
use finanhogar_core::affordability::{check_affordability, AffordabilityTier};
use finanhogar_core::mortgage::compute_mortgage;
use finanhogar_core::rates::{resolve_rate, resolve_rate_str, ClientProfile, LoanType};
use finanhogar_core::simulation::{simulate_financing, FinancingScenario, Household, RateSource};
use finanhogar_core::{DownPayment, FinancingError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} +/- {tol}, got {actual}"
    );
}

// ===========================================================================
// End-to-end
// ===========================================================================

#[test]
fn test_rate_table_feeds_mortgage() {
    // 300k flat, 60k down, 25y, fixed rate for a general client
    let rate = resolve_rate_str("fixed", "general").unwrap();
    assert_eq!(rate, dec!(2.2));

    let m = compute_mortgage(dec!(300000), dec!(60000), 25, rate).unwrap();
    assert_eq!(m.loan_amount, dec!(240000));
    assert_close(m.monthly_payment, dec!(1040.78), dec!(1));
    assert_close(m.total_cost, dec!(372234), dec!(50));
    assert_close(m.total_interest, dec!(72234), dec!(50));
    assert_eq!(m.total_interest, m.total_cost - dec!(300000));
}

#[test]
fn test_civil_servant_pays_less() {
    let general = compute_mortgage(
        dec!(300000),
        dec!(60000),
        25,
        resolve_rate(LoanType::Fixed, ClientProfile::General),
    )
    .unwrap();
    let civil = compute_mortgage(
        dec!(300000),
        dec!(60000),
        25,
        resolve_rate(LoanType::Fixed, ClientProfile::CivilServant),
    )
    .unwrap();
    assert!(civil.monthly_payment < general.monthly_payment);
    assert!(civil.total_interest < general.total_interest);
}

#[test]
fn test_full_simulation_matches_individual_calls() {
    let scenario = FinancingScenario {
        property_value: dec!(450000),
        down_payment: DownPayment::Amount(dec!(90000)),
        loan_term_years: 30,
        rate: RateSource::Profile {
            loan_type: LoanType::Mixed,
            client_profile: ClientProfile::Foreign,
        },
        household: Some(Household {
            monthly_income: dec!(5200),
            monthly_expenses: dec!(900),
        }),
        schedule: None,
    };
    let out = simulate_financing(&scenario).unwrap();

    let m = compute_mortgage(dec!(450000), dec!(90000), 30, dec!(1.6)).unwrap();
    let c = compute_acquisition_costs(dec!(450000), dec!(90000)).unwrap();
    let a = check_affordability(dec!(5200), dec!(900), m.monthly_payment).unwrap();

    assert_eq!(out.result.mortgage, m);
    assert_eq!(out.result.acquisition_costs, c);
    assert_eq!(out.result.affordability, Some(a));
    // Above the 400k step: 8% transfer tax, notary capped below 3k
    assert_eq!(c.transfer_tax, dec!(36000));
    assert_eq!(c.notary_fee, dec!(2250));
}

// ===========================================================================
// Mortgage properties
// ===========================================================================

#[test]
fn test_zero_rate_matches_straight_line() {
    let m = compute_mortgage(dec!(175000), dec!(25000), 15, Decimal::ZERO).unwrap();
    assert_eq!(m.monthly_payment, dec!(150000) / dec!(180));
    assert_close(m.total_interest, Decimal::ZERO, dec!(0.000001));
}

#[test]
fn test_deterministic() {
    let a = compute_mortgage(dec!(321000), dec!(12345), 33, dec!(2.75)).unwrap();
    let b = compute_mortgage(dec!(321000), dec!(12345), 33, dec!(2.75)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_invalid_inputs_never_return_numbers() {
    let cases = [
        compute_mortgage(dec!(-1), Decimal::ZERO, 10, dec!(3)),
        compute_mortgage(dec!(100000), dec!(150000), 10, dec!(3)),
    ];
    for case in cases {
        assert!(matches!(case, Err(FinancingError::InvalidInput { .. })));
    }
    assert!(matches!(
        check_affordability(dec!(1000), dec!(1000), dec!(500)),
        Err(FinancingError::InvalidInput { .. })
    ));
}

#[test]
fn test_error_message_names_constraint() {
    let err = compute_mortgage(dec!(100000), dec!(150000), 10, dec!(3)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input: down_payment - Down payment must be less than property value"
    );
}

// ===========================================================================
// Acquisition costs
// ===========================================================================

#[test]
fn test_transfer_tax_step_at_400k() {
    let at = compute_acquisition_costs(dec!(400000), Decimal::ZERO).unwrap();
    let above = compute_acquisition_costs(dec!(400001), Decimal::ZERO).unwrap();
    assert_eq!(at.transfer_tax, dec!(24000));
    assert_eq!(above.transfer_tax, dec!(32000.08));
}

#[test]
fn test_caps_engage_only_for_expensive_homes() {
    let high = compute_acquisition_costs(dec!(10_000_000), Decimal::ZERO).unwrap();
    assert_eq!((high.notary_fee, high.registry_fee), (dec!(3000), dec!(1500)));

    let low = compute_acquisition_costs(dec!(100_000), Decimal::ZERO).unwrap();
    assert_eq!((low.notary_fee, low.registry_fee), (dec!(500), dec!(200)));
}

#[test]
fn test_total_includes_down_payment() {
    let with_dp = compute_acquisition_costs(dec!(200000), dec!(40000)).unwrap();
    let without = compute_acquisition_costs(dec!(200000), Decimal::ZERO).unwrap();
    assert_eq!(with_dp.total - without.total, dec!(40000));
    assert_eq!(with_dp.additional_costs, without.additional_costs);
}

// ===========================================================================
// Affordability
// ===========================================================================

#[test]
fn test_affordability_boundary() {
    let at = check_affordability(dec!(4000), dec!(1000), dec!(1050)).unwrap();
    assert_eq!(at.ratio, dec!(0.35));
    assert!(at.is_affordable);
    assert_eq!(at.tier, AffordabilityTier::Good);

    let over = check_affordability(dec!(4000), dec!(1000), dec!(1053)).unwrap();
    assert_eq!(over.ratio, dec!(0.351));
    assert!(!over.is_affordable);
    assert_eq!(over.tier, AffordabilityTier::Marginal);
}

// ===========================================================================
// Rates
// ===========================================================================

#[test]
fn test_rate_table_fidelity() {
    assert_eq!(resolve_rate_str("fixed", "civilServant").unwrap(), dec!(1.8));
    assert_eq!(resolve_rate_str("fixed", "general").unwrap(), dec!(2.2));
    assert_eq!(resolve_rate_str("mixed", "civilServant").unwrap(), dec!(1.4));
    assert_eq!(resolve_rate_str("mixed", "foreign").unwrap(), dec!(1.6));
}

#[test]
fn test_unknown_loan_type_rejected() {
    let err = resolve_rate_str("variable", "general").unwrap_err();
    match err {
        FinancingError::InvalidInput { field, reason } => {
            assert_eq!(field, "loan_type");
            assert!(reason.contains("'variable'"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
