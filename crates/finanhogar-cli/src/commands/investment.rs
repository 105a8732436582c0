use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use finanhogar_core::investment::{self, RentalYieldInput};

use crate::input;

/// Arguments for an investor yield estimate
#[derive(Args)]
pub struct RentalYieldArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Expected monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Community fees, IBI, insurance and upkeep per month
    #[arg(long, default_value = "0")]
    pub monthly_expenses: Decimal,
}

pub fn run_rental_yield(args: RentalYieldArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let yield_input: RentalYieldInput = match input::structured(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RentalYieldInput {
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            monthly_rent: args
                .monthly_rent
                .ok_or("--monthly-rent is required (or provide --input)")?,
            monthly_expenses: args.monthly_expenses,
        },
    };

    let annual_yield_pct = investment::rental_yield(
        yield_input.purchase_price,
        yield_input.monthly_rent,
        yield_input.monthly_expenses,
    )?;
    // Cannot overflow once rental_yield has accepted the inputs.
    let annual_net_income =
        (yield_input.monthly_rent - yield_input.monthly_expenses) * Decimal::from(12);

    Ok(json!({
        "result": {
            "annual_yield_pct": annual_yield_pct,
            "purchase_price": yield_input.purchase_price,
            "annual_net_income": annual_net_income,
        },
        "methodology": "Net rental yield: (rent - expenses) x 12 / price",
        "warnings": [],
    }))
}
