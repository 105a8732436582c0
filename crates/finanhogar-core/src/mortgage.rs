use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::FinancingError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::FinancingResult;

/// Terms outside this range are computed but flagged; lenders rarely offer them.
pub const PRACTICAL_TERM_YEARS: (u32, u32) = (5, 40);

const MONTHS_PER_YEAR: u64 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Cash contributed at closing, either as an absolute amount or as a share of
/// the property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownPayment {
    Amount(Money),
    /// Percentage of the property value, 20 = 20%.
    Percentage(Percent),
}

impl DownPayment {
    /// Absolute down payment for the given property value.
    ///
    /// Percentages must lie in `[0, 100)`. Amounts are returned untouched and
    /// validated by the calculation that consumes them.
    pub fn resolve(&self, property_value: Money) -> FinancingResult<Money> {
        match *self {
            DownPayment::Amount(amount) => Ok(amount),
            DownPayment::Percentage(pct) => {
                if pct < Decimal::ZERO || pct >= dec!(100) {
                    return Err(FinancingError::invalid(
                        "down_payment",
                        format!("Down payment percentage must be in [0, 100), got {pct}"),
                    ));
                }
                property_value
                    .checked_mul(pct)
                    .map(|v| v / dec!(100))
                    .ok_or_else(|| out_of_range("property_value"))
            }
        }
    }
}

/// Structured mortgage request, as submitted by the financing forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub property_value: Money,
    pub down_payment: DownPayment,
    pub loan_term_years: u32,
    /// Nominal annual rate, 2.2 = 2.2%
    pub annual_rate_percent: Percent,
}

/// Amortized fixed-rate mortgage figures. Nothing is rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub down_payment: Money,
    pub loan_amount: Money,
    pub number_of_payments: u64,
    pub monthly_payment: Money,
    /// Every instalment plus the down payment
    pub total_cost: Money,
    /// `total_cost - property_value`
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Standard fixed-rate amortization.
///
/// ```text
/// r   = annual_rate_percent / 100 / 12
/// n   = loan_term_years * 12
/// pmt = L * r (1+r)^n / ((1+r)^n - 1)      (pmt = L / n when r = 0)
/// ```
pub fn compute_mortgage(
    property_value: Money,
    down_payment: Money,
    loan_term_years: u32,
    annual_rate_percent: Percent,
) -> FinancingResult<MortgageResult> {
    validate(property_value, down_payment, loan_term_years, annual_rate_percent)?;

    let loan_amount = property_value - down_payment;
    let monthly_rate = annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
    let number_of_payments = u64::from(loan_term_years) * MONTHS_PER_YEAR;
    let n = Decimal::from(number_of_payments);

    let monthly_payment = if monthly_rate.is_zero() {
        loan_amount / n
    } else {
        amortized_payment(loan_amount, monthly_rate, number_of_payments)?
    };
    // An instalment below 1e-28 rounds to zero.
    if monthly_payment.is_zero() {
        return Err(FinancingError::invalid(
            "property_value",
            "Loan amount is too small to amortize at decimal precision",
        ));
    }

    let total_cost = monthly_payment
        .checked_mul(n)
        .and_then(|paid| paid.checked_add(down_payment))
        .ok_or_else(|| out_of_range("property_value"))?;
    let total_interest = total_cost - property_value;

    debug!(
        %property_value,
        %down_payment,
        loan_term_years,
        %annual_rate_percent,
        %monthly_payment,
        %total_cost,
        "mortgage computed"
    );

    Ok(MortgageResult {
        down_payment,
        loan_amount,
        number_of_payments,
        monthly_payment,
        total_cost,
        total_interest,
    })
}

/// Run [`compute_mortgage`] on a structured request and wrap it in the
/// standard envelope.
pub fn calculate_mortgage(
    input: &MortgageInput,
) -> FinancingResult<ComputationOutput<MortgageResult>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let down_payment = input.down_payment.resolve(input.property_value)?;
    let result = compute_mortgage(
        input.property_value,
        down_payment,
        input.loan_term_years,
        input.annual_rate_percent,
    )?;

    if let Some(w) = term_warning(input.loan_term_years) {
        warnings.push(w);
    }

    let assumptions = serde_json::json!({
        "compounding": "monthly",
        "rate_convention": "nominal annual percentage / 12",
        "rounding": "none",
    });

    Ok(with_metadata(
        "Fixed-rate amortization (French system)",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

pub(crate) fn term_warning(loan_term_years: u32) -> Option<String> {
    let (min, max) = PRACTICAL_TERM_YEARS;
    if loan_term_years < min || loan_term_years > max {
        Some(format!(
            "Loan term of {loan_term_years} years is outside the usual {min}-{max} year range"
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate(
    property_value: Money,
    down_payment: Money,
    loan_term_years: u32,
    annual_rate_percent: Percent,
) -> FinancingResult<()> {
    if property_value <= Decimal::ZERO {
        return Err(FinancingError::invalid(
            "property_value",
            "Property value must be > 0",
        ));
    }
    if down_payment < Decimal::ZERO {
        return Err(FinancingError::invalid(
            "down_payment",
            "Down payment cannot be negative",
        ));
    }
    if down_payment >= property_value {
        return Err(FinancingError::invalid(
            "down_payment",
            "Down payment must be less than property value",
        ));
    }
    if loan_term_years == 0 {
        return Err(FinancingError::invalid(
            "loan_term_years",
            "Loan term must be > 0 years",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(FinancingError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

fn amortized_payment(
    loan_amount: Money,
    monthly_rate: Decimal,
    number_of_payments: u64,
) -> FinancingResult<Money> {
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powu(number_of_payments)
        .ok_or_else(|| out_of_range("annual_rate_percent"))?;
    let denominator = growth - Decimal::ONE;

    // A rate this small vanishes below decimal precision over the term.
    if denominator.is_zero() {
        return Ok(loan_amount / Decimal::from(number_of_payments));
    }

    loan_amount
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| out_of_range("property_value"))
}

fn out_of_range(field: &str) -> FinancingError {
    FinancingError::invalid(
        field,
        "Inputs produce values outside the representable decimal range",
    )
}
