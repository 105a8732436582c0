use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finanhogar_core::acquisition::{self, AcquisitionCostInput};
use finanhogar_core::config::EngineConfig;

use crate::input;

/// Arguments for the closing-cost breakdown
#[derive(Args)]
pub struct AcquisitionArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the property
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Cash down payment, added to the closing total
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,
}

pub fn run_acquisition_costs(
    args: AcquisitionArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut cost_input: AcquisitionCostInput = match input::structured(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AcquisitionCostInput {
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            down_payment: args.down_payment,
            schedule: None,
        },
    };

    // A schedule in the input document wins over --config
    if cost_input.schedule.is_none() && *config != EngineConfig::default() {
        cost_input.schedule = Some(config.acquisition_costs.clone());
    }

    let result = acquisition::estimate_acquisition_costs(&cost_input)?;
    Ok(serde_json::to_value(result)?)
}
