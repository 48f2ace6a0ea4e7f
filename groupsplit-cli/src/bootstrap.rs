use crate::cli::GlobalArgs;
use groupsplit_domain::{Money, SettlementEngine, Tolerance};
use groupsplit_presentation::CurrencyFormat;
use tracing_subscriber::EnvFilter;

/// Settings shared by every subcommand.
pub struct AppConfig {
    pub tolerance: Tolerance,
    pub currency: CurrencyFormat,
}

impl AppConfig {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            tolerance: Tolerance::new(Money::new(args.tolerance)),
            currency: CurrencyFormat {
                symbol: args.currency_symbol.clone(),
                ..CurrencyFormat::default()
            },
        }
    }

    pub fn engine(&self) -> SettlementEngine {
        SettlementEngine::new(self.tolerance)
    }
}

/// Loads `.env` so its variables can back the command-line flags.
pub fn load_env() {
    let _ = dotenvy::dotenv();
}

/// Initialize logging and tracing. Output goes to stderr so stdout stays
/// machine-readable.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
