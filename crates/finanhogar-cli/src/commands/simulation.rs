use clap::Args;
use serde_json::Value;

use finanhogar_core::config::EngineConfig;
use finanhogar_core::simulation::{self, FinancingScenario};

use crate::input;

/// Arguments for a full financing simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a JSON/YAML scenario (or pipe it on stdin)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(
    args: SimulateArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut scenario: FinancingScenario = input::structured(args.input.as_deref())?
        .ok_or("--input <file> or a scenario on stdin is required for simulate")?;

    if scenario.schedule.is_none() && *config != EngineConfig::default() {
        scenario.schedule = Some(config.acquisition_costs.clone());
    }

    let result = simulation::simulate_financing(&scenario)?;
    Ok(serde_json::to_value(result)?)
}
