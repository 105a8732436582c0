use clap::Args;
use serde_json::{json, Value};

use finanhogar_core::rates::{self, ClientProfile, LoanType, RateProfile};

/// Arguments for a rate table lookup
#[derive(Args)]
pub struct RateArgs {
    /// fixed or mixed
    #[arg(long)]
    pub loan_type: LoanType,

    /// civil_servant, foreign or general
    #[arg(long, default_value = "general")]
    pub client_profile: ClientProfile,
}

pub fn run_rate(args: RateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile = RateProfile::new(args.loan_type, args.client_profile);
    let band = rates::advertised_rate_band(args.loan_type);

    Ok(json!({
        "result": {
            "resolved_rate": profile.resolved_rate,
            "loan_type": profile.loan_type,
            "client_profile": profile.client_profile,
            "advertised_low": band.low,
            "advertised_high": band.high,
            "advertised_spread": band.width(),
        },
        "methodology": "Product rate table",
        "warnings": [],
    }))
}
