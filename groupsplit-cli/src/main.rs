#![warn(clippy::uninlined_format_args)]

mod bootstrap;
mod cli;
mod output;

use bootstrap::AppConfig;
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use groupsplit_application::{ExpenseDraft, GroupId, LedgerProcessor};
use groupsplit_domain::{MemberId, Money};
use groupsplit_infrastructure::JsonLedgerFile;
use groupsplit_presentation::SettlementPresenter;
use miette::{IntoDiagnostic, Result};
use output::{LedgerViewDto, TransactionDto};
use serde::Serialize;

fn main() -> Result<()> {
    bootstrap::load_env();
    bootstrap::init_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_args(&cli.global);

    match cli.command {
        Command::Show {
            ledger,
            group,
            format,
        } => {
            let source = JsonLedgerFile::new(ledger);
            let processor = LedgerProcessor::new(&source, config.engine());
            let ledger = processor.load_ledger(group.map(GroupId)).into_diagnostic()?;
            let view = processor.build_view(&ledger);

            match format {
                OutputFormat::Text => {
                    let presenter = SettlementPresenter::new(config.currency);
                    print!("{}", presenter.render_with_members(&view, &ledger).to_text());
                }
                OutputFormat::Json => print_json(&LedgerViewDto::new(&view, &ledger))?,
            }
        }
        Command::Repayments { ledger, group } => {
            let source = JsonLedgerFile::new(ledger);
            let processor = LedgerProcessor::new(&source, config.engine());
            let ledger = processor.load_ledger(group.map(GroupId)).into_diagnostic()?;
            let view = processor.build_view(&ledger);

            let records: Vec<TransactionDto> = processor
                .repayments(&ledger, &view)
                .iter()
                .map(TransactionDto::from)
                .collect();
            print_json(&records)?;
        }
        Command::Split {
            ledger,
            group,
            payer,
            amount,
            description,
            pay_for,
        } => {
            let source = JsonLedgerFile::new(ledger);
            let processor = LedgerProcessor::new(&source, config.engine());
            let ledger = processor.load_ledger(group.map(GroupId)).into_diagnostic()?;

            let draft = ExpenseDraft {
                payer: MemberId(payer),
                description,
                amount: Money::new(amount),
                pay_for: pay_for.into_iter().map(MemberId).collect(),
            };
            let record = processor.draft_expense(&ledger, draft).into_diagnostic()?;
            tracing::info!(
                transaction_id = record.transaction.id.0,
                share_count = record.transaction.shares.len(),
                "Drafted expense"
            );
            print_json(&TransactionDto::from(&record))?;
        }
    }

    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}
