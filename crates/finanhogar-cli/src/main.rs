mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::acquisition::AcquisitionArgs;
use commands::affordability::AffordabilityArgs;
use commands::investment::RentalYieldArgs;
use commands::mortgage::MortgageArgs;
use commands::rates::RateArgs;
use commands::simulation::SimulateArgs;

/// Mortgage and affordability simulations for home buyers
#[derive(Parser)]
#[command(
    name = "finanhogar",
    version,
    about = "Mortgage and affordability simulations for home buyers",
    long_about = "Prices fixed and mixed-rate mortgages, estimates closing costs \
                  (transfer tax, notary, registry, appraisal, management) and checks \
                  the monthly payment against household income. All figures use \
                  decimal arithmetic and are never rounded."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (.yaml/.yml, otherwise JSON)
    #[arg(long, global = true, env = "FINANHOGAR_CONFIG")]
    config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, total cost and total interest of a mortgage
    Mortgage(MortgageArgs),
    /// Closing costs: transfer tax, notary, registry, appraisal, management
    AcquisitionCosts(AcquisitionArgs),
    /// Debt-service ratio of a payment against net income
    Affordability(AffordabilityArgs),
    /// Look up the rate for a loan type and client profile
    Rate(RateArgs),
    /// Run the full simulator: rate, mortgage, closing costs, affordability
    Simulate(SimulateArgs),
    /// Net rental yield of an investment property
    RentalYield(RentalYieldArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::AcquisitionCosts(args) => {
            commands::acquisition::run_acquisition_costs(args, &config)
        }
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Rate(args) => commands::rates::run_rate(args),
        Commands::Simulate(args) => commands::simulation::run_simulate(args, &config),
        Commands::RentalYield(args) => commands::investment::run_rental_yield(args),
        Commands::Version => {
            println!("finanhogar {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
