use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Balances and settlement plans for shared expenses", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Balances within this amount of zero count as settled
    #[arg(long, global = true, env = "GROUPSPLIT_TOLERANCE", default_value = "0.01")]
    pub tolerance: Decimal,

    #[arg(long, global = true, env = "GROUPSPLIT_CURRENCY_SYMBOL", default_value = "$")]
    pub currency_symbol: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show balances and who should pay whom
    Show {
        /// Ledger JSON file
        ledger: PathBuf,

        #[arg(long)]
        group: Option<u64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print one repayment transaction per suggested transfer, as JSON
    Repayments {
        ledger: PathBuf,

        #[arg(long)]
        group: Option<u64>,
    },
    /// Validate a new expense and print the resulting transaction as JSON
    Split {
        ledger: PathBuf,

        #[arg(long)]
        group: Option<u64>,

        #[arg(long)]
        payer: u64,

        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        description: String,

        /// Beneficiaries; defaults to the whole group
        #[arg(long = "for", value_name = "ID")]
        pay_for: Vec<u64>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
