use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::acquisition::{compute_acquisition_costs_with, AcquisitionCostSchedule, AcquisitionCosts};
use crate::affordability::{check_affordability, AffordabilityAssessment};
use crate::mortgage::{compute_mortgage, term_warning, DownPayment, MortgageResult};
use crate::rates::{is_advertised_rate, product_terms, ClientProfile, LoanType, RateProfile};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::FinancingResult;

/// Loan-to-value above which lenders usually ask for extra guarantees.
const MAX_STANDARD_LTV: Rate = dec!(0.80);

/// Closing cash above this share of the price is flagged.
const HIGH_UPFRONT_SHARE: Rate = dec!(0.40);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RateSource {
    /// Look the rate up in the product table
    Profile {
        loan_type: LoanType,
        client_profile: ClientProfile,
    },
    /// Use a rate quoted elsewhere
    Explicit { annual_rate_percent: Percent },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub monthly_income: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
}

/// Everything a buyer enters into the financing simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingScenario {
    pub property_value: Money,
    pub down_payment: DownPayment,
    pub loan_term_years: u32,
    pub rate: RateSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household: Option<Household>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AcquisitionCostSchedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancingSimulation {
    /// Present when the rate came from the product table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_profile: Option<RateProfile>,
    pub annual_rate_percent: Percent,
    pub loan_to_value: Rate,
    pub mortgage: MortgageResult,
    pub acquisition_costs: AcquisitionCosts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<AffordabilityAssessment>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolve the rate, price the mortgage, estimate closing costs and, when
/// household figures are given, check the payment against them.
pub fn simulate_financing(
    scenario: &FinancingScenario,
) -> FinancingResult<ComputationOutput<FinancingSimulation>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (rate_profile, annual_rate_percent) = match scenario.rate {
        RateSource::Profile {
            loan_type,
            client_profile,
        } => {
            let profile = RateProfile::new(loan_type, client_profile);
            let rate = profile.resolved_rate;
            (Some(profile), rate)
        }
        RateSource::Explicit { annual_rate_percent } => (None, annual_rate_percent),
    };

    let down_payment = scenario.down_payment.resolve(scenario.property_value)?;
    let mortgage = compute_mortgage(
        scenario.property_value,
        down_payment,
        scenario.loan_term_years,
        annual_rate_percent,
    )?;

    let default_schedule = AcquisitionCostSchedule::default();
    let schedule = match &scenario.schedule {
        Some(custom) => {
            custom.validate()?;
            custom
        }
        None => &default_schedule,
    };
    let acquisition_costs =
        compute_acquisition_costs_with(schedule, scenario.property_value, down_payment)?;

    let affordability = match &scenario.household {
        Some(h) => Some(check_affordability(
            h.monthly_income,
            h.monthly_expenses,
            mortgage.monthly_payment,
        )?),
        None => None,
    };

    // -- Warnings -------------------------------------------------------------
    let loan_to_value = mortgage.loan_amount / scenario.property_value;

    if let Some(w) = term_warning(scenario.loan_term_years) {
        warnings.push(w);
    }
    if loan_to_value > MAX_STANDARD_LTV {
        warnings.push(format!(
            "Loan-to-value of {}% exceeds the usual 80% financing limit",
            (loan_to_value * dec!(100)).round_dp(1)
        ));
    }
    if acquisition_costs.total > scenario.property_value * HIGH_UPFRONT_SHARE {
        warnings.push("Cash needed at closing exceeds 40% of the property value".into());
    }
    if let Some(a) = &affordability {
        if !a.is_affordable {
            warnings.push(format!("Payment takes {}: {}", ratio_pct(a.ratio), a.tier));
        }
    }
    match scenario.rate {
        RateSource::Profile { loan_type, .. } => {
            let terms = product_terms(loan_type);
            let down_pct = down_payment / scenario.property_value * dec!(100);
            if down_pct < terms.min_down_payment_percent {
                warnings.push(format!(
                    "Down payment of {}% is below the {}% minimum for {loan_type}-rate products",
                    down_pct.round_dp(1),
                    terms.min_down_payment_percent
                ));
            }
            if scenario.loan_term_years > terms.max_term_years {
                warnings.push(format!(
                    "{loan_type}-rate products are offered up to {} years",
                    terms.max_term_years
                ));
            }
        }
        RateSource::Explicit { annual_rate_percent } => {
            if !is_advertised_rate(annual_rate_percent) {
                warnings.push(format!(
                    "Quoted rate of {annual_rate_percent}% is outside the advertised ranges"
                ));
            }
        }
    }
    if matches!(
        scenario.rate,
        RateSource::Profile {
            loan_type: LoanType::Mixed,
            ..
        }
    ) {
        warnings.push(
            "Mixed-rate payment only holds for the initial fixed period; it then follows Euribor plus spread"
                .into(),
        );
    }

    let assumptions = serde_json::json!({
        "annual_rate_percent": annual_rate_percent,
        "down_payment": down_payment,
        "acquisition_schedule": schedule,
    });

    let result = FinancingSimulation {
        rate_profile,
        annual_rate_percent,
        loan_to_value,
        mortgage,
        acquisition_costs,
        affordability,
    };

    Ok(with_metadata(
        "Financing simulation: rate table + amortization + closing costs + debt-service check",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

fn ratio_pct(ratio: Rate) -> String {
    format!("{}% of net income", (ratio * dec!(100)).round_dp(1))
}
