mod commands;
mod input;
mod logger;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;

use commands::applications::{CareerArgs, ContactArgs, LoanApplicationArgs};
use commands::lending::{QuoteArgs, ScheduleArgs};

/// Flat-rate microloan quotes and application payloads
#[derive(Parser)]
#[command(
    name = "microloan",
    version,
    about = "Flat-rate microloan quotes and application payloads",
    long_about = "Quote a flat-rate microloan (interest, upfront fees, monthly installment), \
                  print its repayment schedule, and validate loan, career and contact forms \
                  into the template payload an email relay expects."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Loan product file (YAML or JSON); defaults to the published product
    #[arg(long, global = true)]
    product: Option<String>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote interest, upfront fees and monthly installment
    Quote(QuoteArgs),
    /// Month-by-month repayment schedule
    Schedule(ScheduleArgs),
    /// Validate a loan application and print its submission payload
    ApplyLoan(LoanApplicationArgs),
    /// Validate a career application and print its submission payload
    ApplyCareer(CareerArgs),
    /// Validate a contact message and print its submission payload
    Contact(ContactArgs),
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

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let product = match input::file::load_product(cli.product.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::lending::run_quote(args, &product),
        Commands::Schedule(args) => commands::lending::run_schedule(args, &product),
        Commands::ApplyLoan(args) => commands::applications::run_loan_application(args),
        Commands::ApplyCareer(args) => commands::applications::run_career_application(args),
        Commands::Contact(args) => commands::applications::run_contact(args),
        Commands::Version => {
            println!("microloan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            debug!(format = ?cli.output, "writing output");
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
