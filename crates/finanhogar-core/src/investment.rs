use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FinancingError;
use crate::types::{Money, Percent};
use crate::FinancingResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalYieldInput {
    pub purchase_price: Money,
    pub monthly_rent: Money,
    #[serde(default)]
    pub monthly_expenses: Money,
}

/// Annual net rental yield in percent: `(rent - expenses) * 12 / price * 100`.
///
/// A negative figure means the property runs at a loss and is returned as is.
pub fn rental_yield(
    purchase_price: Money,
    monthly_rent: Money,
    monthly_expenses: Money,
) -> FinancingResult<Percent> {
    if purchase_price <= Decimal::ZERO {
        return Err(FinancingError::invalid(
            "purchase_price",
            "Purchase price must be > 0",
        ));
    }
    if monthly_rent < Decimal::ZERO {
        return Err(FinancingError::invalid(
            "monthly_rent",
            "Monthly rent cannot be negative",
        ));
    }
    if monthly_expenses < Decimal::ZERO {
        return Err(FinancingError::invalid(
            "monthly_expenses",
            "Monthly expenses cannot be negative",
        ));
    }

    let annual_net_income = (monthly_rent - monthly_expenses)
        .checked_mul(dec!(12))
        .ok_or_else(|| out_of_range("monthly_rent"))?;
    let yield_pct = annual_net_income
        .checked_div(purchase_price)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| out_of_range("purchase_price"))?;
    debug!(%purchase_price, %annual_net_income, %yield_pct, "rental yield computed");
    Ok(yield_pct)
}

fn out_of_range(field: &str) -> FinancingError {
    FinancingError::invalid(field, "Value is outside the representable decimal range")
}
