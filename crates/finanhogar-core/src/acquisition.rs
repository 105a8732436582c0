use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::FinancingError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::FinancingResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Tax and fee constants for a purchase. The default reproduces the Spanish
/// resale schedule (ITP, notary, land registry, appraisal, agency management).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionCostSchedule {
    /// Property values strictly above this pay the high transfer-tax rate
    pub transfer_tax_threshold: Money,
    pub transfer_tax_rate_low: Rate,
    pub transfer_tax_rate_high: Rate,
    pub notary_rate: Rate,
    pub notary_cap: Money,
    pub registry_rate: Rate,
    pub registry_cap: Money,
    pub appraisal_fee: Money,
    pub management_fee: Money,
}

impl Default for AcquisitionCostSchedule {
    fn default() -> Self {
        AcquisitionCostSchedule {
            transfer_tax_threshold: dec!(400000),
            transfer_tax_rate_low: dec!(0.06),
            transfer_tax_rate_high: dec!(0.08),
            notary_rate: dec!(0.005),
            notary_cap: dec!(3000),
            registry_rate: dec!(0.002),
            registry_cap: dec!(1500),
            appraisal_fee: dec!(300),
            management_fee: dec!(1200),
        }
    }
}

impl AcquisitionCostSchedule {
    /// Rejects negative amounts and rates outside `[0, 1)`.
    pub fn validate(&self) -> FinancingResult<()> {
        let rates = [
            ("transfer_tax_rate_low", self.transfer_tax_rate_low),
            ("transfer_tax_rate_high", self.transfer_tax_rate_high),
            ("notary_rate", self.notary_rate),
            ("registry_rate", self.registry_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(FinancingError::invalid(
                    field,
                    format!("Rate must be in [0, 1), got {rate}"),
                ));
            }
        }

        let amounts = [
            ("transfer_tax_threshold", self.transfer_tax_threshold),
            ("notary_cap", self.notary_cap),
            ("registry_cap", self.registry_cap),
            ("appraisal_fee", self.appraisal_fee),
            ("management_fee", self.management_fee),
        ];
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(FinancingError::invalid(field, "Amount cannot be negative"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionCostInput {
    pub property_value: Money,
    #[serde(default)]
    pub down_payment: Money,
    /// Overrides the default schedule when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<AcquisitionCostSchedule>,
}

/// One-time costs due at closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionCosts {
    pub transfer_tax: Money,
    pub notary_fee: Money,
    pub registry_fee: Money,
    pub appraisal_fee: Money,
    pub management_fee: Money,
    /// Taxes and fees, excluding the down payment
    pub additional_costs: Money,
    /// Down payment plus `additional_costs`: the cash needed at closing
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Acquisition costs under the default schedule.
pub fn compute_acquisition_costs(
    property_value: Money,
    down_payment: Money,
) -> FinancingResult<AcquisitionCosts> {
    compute_acquisition_costs_with(
        &AcquisitionCostSchedule::default(),
        property_value,
        down_payment,
    )
}

pub fn compute_acquisition_costs_with(
    schedule: &AcquisitionCostSchedule,
    property_value: Money,
    down_payment: Money,
) -> FinancingResult<AcquisitionCosts> {
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

    // A single step, not a progressive scale.
    let transfer_tax_rate = if property_value > schedule.transfer_tax_threshold {
        schedule.transfer_tax_rate_high
    } else {
        schedule.transfer_tax_rate_low
    };
    let share = |rate: Rate| {
        property_value
            .checked_mul(rate)
            .ok_or_else(|| out_of_range("property_value"))
    };
    let transfer_tax = share(transfer_tax_rate)?;
    let notary_fee = share(schedule.notary_rate)?.min(schedule.notary_cap);
    let registry_fee = share(schedule.registry_rate)?.min(schedule.registry_cap);

    let fees = [
        notary_fee,
        registry_fee,
        schedule.appraisal_fee,
        schedule.management_fee,
    ];
    let additional_costs = fees
        .into_iter()
        .try_fold(transfer_tax, Decimal::checked_add)
        .ok_or_else(|| out_of_range("property_value"))?;
    let total = down_payment
        .checked_add(additional_costs)
        .ok_or_else(|| out_of_range("down_payment"))?;

    debug!(%property_value, %transfer_tax, %additional_costs, %total, "acquisition costs computed");

    Ok(AcquisitionCosts {
        transfer_tax,
        notary_fee,
        registry_fee,
        appraisal_fee: schedule.appraisal_fee,
        management_fee: schedule.management_fee,
        additional_costs,
        total,
    })
}

/// Structured entry point: validates an optional custom schedule and wraps
/// the breakdown in the standard envelope.
pub fn estimate_acquisition_costs(
    input: &AcquisitionCostInput,
) -> FinancingResult<ComputationOutput<AcquisitionCosts>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let default_schedule = AcquisitionCostSchedule::default();
    let schedule = match &input.schedule {
        Some(custom) => {
            custom.validate()?;
            warnings.push("Custom acquisition cost schedule in use".to_string());
            custom
        }
        None => &default_schedule,
    };

    let result =
        compute_acquisition_costs_with(schedule, input.property_value, input.down_payment)?;

    if input.down_payment >= input.property_value {
        warnings.push("Down payment covers the full property value; no mortgage needed".into());
    }

    Ok(with_metadata(
        "Closing cost estimate (transfer tax step + capped notary/registry fees)",
        schedule,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    ))
}

fn out_of_range(field: &str) -> FinancingError {
    FinancingError::invalid(field, "Value is outside the representable decimal range")
}
