use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finanhogar_core::mortgage::{self, DownPayment, MortgageInput};
use finanhogar_core::rates::{ClientProfile, LoanType};

use crate::input;

/// Arguments for a single mortgage quote
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the property
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment as an absolute amount
    #[arg(long, conflicts_with = "down_payment_pct")]
    pub down_payment: Option<Decimal>,

    /// Down payment as a percentage of the property value (20 = 20%)
    #[arg(long)]
    pub down_payment_pct: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Nominal annual rate in percent (2.2 = 2.2%); overrides the rate table
    #[arg(long, conflicts_with_all = ["loan_type", "client_profile"])]
    pub rate: Option<Decimal>,

    /// fixed or mixed; looks the rate up together with --client-profile
    #[arg(long)]
    pub loan_type: Option<LoanType>,

    /// civil_servant, foreign or general
    #[arg(long, default_value = "general")]
    pub client_profile: ClientProfile,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match input::structured(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => MortgageInput {
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            down_payment: match (args.down_payment, args.down_payment_pct) {
                (Some(amount), _) => DownPayment::Amount(amount),
                (None, Some(pct)) => DownPayment::Percentage(pct),
                (None, None) => {
                    return Err("--down-payment or --down-payment-pct is required".into())
                }
            },
            loan_term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            annual_rate_percent: match (args.rate, args.loan_type) {
                (Some(rate), _) => rate,
                (None, Some(loan_type)) => {
                    finanhogar_core::resolve_rate(loan_type, args.client_profile)
                }
                (None, None) => return Err("--rate or --loan-type is required".into()),
            },
        },
    };

    let result = mortgage::calculate_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
