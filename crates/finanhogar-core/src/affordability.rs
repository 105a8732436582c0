use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::debug;

use crate::error::FinancingError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinancingResult;

/// Debt-service ceiling: a payment is affordable at or below 35% of net income.
pub const AFFORDABLE_RATIO: Rate = dec!(0.35);

/// Upper bounds of each tier, checked in ascending order.
const EXCELLENT_MAX: Rate = dec!(0.25);
const GOOD_MAX: Rate = AFFORDABLE_RATIO;
const MARGINAL_MAX: Rate = dec!(0.45);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityTier {
    Excellent,
    Good,
    /// Borrower should consider a smaller loan
    Marginal,
    ExceedsCapacity,
}

impl AffordabilityTier {
    pub fn from_ratio(ratio: Rate) -> Self {
        if ratio <= EXCELLENT_MAX {
            AffordabilityTier::Excellent
        } else if ratio <= GOOD_MAX {
            AffordabilityTier::Good
        } else if ratio <= MARGINAL_MAX {
            AffordabilityTier::Marginal
        } else {
            AffordabilityTier::ExceedsCapacity
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AffordabilityTier::Excellent => "excellent",
            AffordabilityTier::Good => "good",
            AffordabilityTier::Marginal => "marginal, recommend reducing amount",
            AffordabilityTier::ExceedsCapacity => "exceeds recommended capacity",
        }
    }
}

impl fmt::Display for AffordabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub monthly_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub net_income: Money,
    /// monthly_payment / net_income
    pub ratio: Rate,
    pub is_affordable: bool,
    pub tier: AffordabilityTier,
    pub recommendation: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn check_affordability(
    monthly_income: Money,
    monthly_expenses: Money,
    monthly_payment: Money,
) -> FinancingResult<AffordabilityAssessment> {
    let net_income = monthly_income
        .checked_sub(monthly_expenses)
        .ok_or_else(|| out_of_range("net_income"))?;
    if net_income <= Decimal::ZERO {
        return Err(FinancingError::invalid(
            "net_income",
            format!(
                "Net income must be positive (income {monthly_income} - expenses {monthly_expenses})"
            ),
        ));
    }
    if monthly_payment < Decimal::ZERO {
        return Err(FinancingError::invalid(
            "monthly_payment",
            "Monthly payment cannot be negative",
        ));
    }

    let ratio = monthly_payment
        .checked_div(net_income)
        .ok_or_else(|| out_of_range("monthly_payment"))?;
    let tier = AffordabilityTier::from_ratio(ratio);

    debug!(%net_income, %ratio, ?tier, "affordability checked");

    Ok(AffordabilityAssessment {
        net_income,
        ratio,
        is_affordable: ratio <= AFFORDABLE_RATIO,
        tier,
        recommendation: tier.label().to_string(),
    })
}

pub fn assess_affordability(
    input: &AffordabilityInput,
) -> FinancingResult<ComputationOutput<AffordabilityAssessment>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let result = check_affordability(
        input.monthly_income,
        input.monthly_expenses,
        input.monthly_payment,
    )?;

    if input.monthly_expenses < Decimal::ZERO {
        warnings.push("Negative monthly expenses inflate net income".into());
    }

    let assumptions = serde_json::json!({
        "affordable_ratio": AFFORDABLE_RATIO,
        "tiers": {
            "excellent": EXCELLENT_MAX,
            "good": GOOD_MAX,
            "marginal": MARGINAL_MAX,
        },
    });

    Ok(with_metadata(
        "Debt-service ratio against net monthly income",
        &assumptions,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

fn out_of_range(field: &str) -> FinancingError {
    FinancingError::invalid(field, "Value is outside the representable decimal range")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_exactly_at_threshold_is_affordable() {
        let a = check_affordability(dec!(2000), Decimal::ZERO, dec!(700)).unwrap();
        assert_eq!(a.ratio, dec!(0.35));
        assert!(a.is_affordable);
        assert_eq!(a.tier, AffordabilityTier::Good);
    }

    #[test]
    fn test_just_above_threshold() {
        let a = check_affordability(dec!(2000), Decimal::ZERO, dec!(702)).unwrap();
        assert_eq!(a.ratio, dec!(0.351));
        assert!(!a.is_affordable);
        assert_eq!(a.tier, AffordabilityTier::Marginal);
        assert_eq!(a.recommendation, "marginal, recommend reducing amount");
    }

    #[test]
    fn test_tier_bands() {
        assert_eq!(AffordabilityTier::from_ratio(Decimal::ZERO), AffordabilityTier::Excellent);
        assert_eq!(AffordabilityTier::from_ratio(dec!(0.25)), AffordabilityTier::Excellent);
        assert_eq!(AffordabilityTier::from_ratio(dec!(0.2501)), AffordabilityTier::Good);
        assert_eq!(AffordabilityTier::from_ratio(dec!(0.45)), AffordabilityTier::Marginal);
        assert_eq!(AffordabilityTier::from_ratio(dec!(0.4501)), AffordabilityTier::ExceedsCapacity);
    }

    #[test]
    fn test_expenses_reduce_net_income() {
        let a = check_affordability(dec!(3500), dec!(500), dec!(600)).unwrap();
        assert_eq!(a.net_income, dec!(3000));
        assert_eq!(a.ratio, dec!(0.2));
        assert_eq!(a.tier, AffordabilityTier::Excellent);
    }

    #[test]
    fn test_zero_net_income_rejected() {
        let err = check_affordability(dec!(1000), dec!(1000), dec!(500)).unwrap_err();
        assert_eq!(err.field(), Some("net_income"));
        assert!(check_affordability(dec!(1000), dec!(1200), dec!(500)).is_err());
    }

    #[test]
    fn test_negative_payment_rejected() {
        let err = check_affordability(dec!(1000), Decimal::ZERO, dec!(-1)).unwrap_err();
        assert_eq!(err.field(), Some("monthly_payment"));
    }

    #[test]
    fn test_payment_dwarfing_income_fails_instead_of_overflowing() {
        let err = check_affordability(dec!(1), dec!(0.9999999999999999999999999), Decimal::MAX)
            .unwrap_err();
        assert_eq!(err.field(), Some("monthly_payment"));
    }

    #[test]
    fn test_extreme_income_minus_expenses_fails_instead_of_overflowing() {
        let err = check_affordability(Decimal::MAX, -Decimal::MAX, Decimal::ZERO).unwrap_err();
        assert_eq!(err.field(), Some("net_income"));
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(AffordabilityTier::ExceedsCapacity.to_string(), "exceeds recommended capacity");
    }
}
