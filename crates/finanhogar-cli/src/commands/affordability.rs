use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finanhogar_core::affordability::{self, AffordabilityInput};

use crate::input;

/// Arguments for the debt-service check
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Net monthly income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Recurring monthly expenses (other loans, rent, ...)
    #[arg(long, default_value = "0")]
    pub monthly_expenses: Decimal,

    /// Proposed mortgage payment
    #[arg(long)]
    pub monthly_payment: Option<Decimal>,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let check_input: AffordabilityInput = match input::structured(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AffordabilityInput {
            monthly_income: args
                .monthly_income
                .ok_or("--monthly-income is required (or provide --input)")?,
            monthly_expenses: args.monthly_expenses,
            monthly_payment: args
                .monthly_payment
                .ok_or("--monthly-payment is required (or provide --input)")?,
        },
    };

    let result = affordability::assess_affordability(&check_input)?;
    Ok(serde_json::to_value(result)?)
}
