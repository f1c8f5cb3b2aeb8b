mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Deserialize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::investment::{
    InflationArgs, InvestArgs, PlanArgs, RequiredInvestmentArgs, ScenariosArgs,
};
use commands::loan::{CompareRatesArgs, EmiArgs, LoanReportArgs, ScheduleArgs};
use config::CalculatorConfig;

/// Loan EMI and savings-scheme calculations
#[derive(Parser)]
#[command(
    name = "emicalc",
    version,
    about = "Loan EMI and savings-scheme calculations",
    long_about = "A CLI for loan installments, amortization schedules and Indian savings \
                  schemes (FD, RD, PPF, insurance) with decimal precision. Amounts are in \
                  rupees and rates in percent (8.5 means 8.5% a year)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (defaults to the config file, then json)
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    /// Path to a TOML config file (defaults to ./emicalc.toml when present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly installment with total interest and principal/interest split
    Emi(EmiArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Installment at the entered rate and at rate -/+ shift
    CompareRates(CompareRatesArgs),
    /// Full loan analysis: summary, schedule, prepayment effect, comparison
    LoanReport(LoanReportArgs),
    /// List the savings schemes with rate bands and tenure limits
    Schemes,
    /// Maturity of one scheme at one rate
    Invest(InvestArgs),
    /// Conservative, realistic and optimistic maturity for a scheme
    Scenarios(ScenariosArgs),
    /// Contribution needed to reach a target maturity amount
    RequiredInvestment(RequiredInvestmentArgs),
    /// Real value of a future amount after inflation
    Inflation(InflationArgs),
    /// Investment plan with scenarios, inflation and share text
    Plan(PlanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();

    let config = match CalculatorConfig::load_with_env_and_validate(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };
    init_tracing(&config.log_level, cli.verbose);
    tracing::debug!(?config, "configuration loaded");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::CompareRates(args) => commands::loan::run_compare_rates(args, &config),
        Commands::LoanReport(args) => commands::loan::run_loan_report(args, &config),
        Commands::Schemes => commands::investment::run_schemes(),
        Commands::Invest(args) => commands::investment::run_invest(args),
        Commands::Scenarios(args) => commands::investment::run_scenarios(args),
        Commands::RequiredInvestment(args) => commands::investment::run_required_investment(args),
        Commands::Inflation(args) => commands::investment::run_inflation(args, &config),
        Commands::Plan(args) => commands::investment::run_plan(args, &config),
        Commands::Version => {
            println!("emicalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output.unwrap_or(config.output), &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
