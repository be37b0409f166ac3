use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_cli::output::{is_broken_pipe, write_stdout};
use tax_cli::report::{render_history, render_summary};
use tax_cli::{BatchEstimator, calculator_for, logging, open_repository};
use tax_core::calculations::standard_deduction;
use tax_core::tables::{federal_brackets, preferential_tiers};
use tax_core::{CalculationRepository, FilingStatus, TaxBracket, TaxReturnInput, quick_estimate};
use tracing::{debug, info};

/// 2024 federal income tax calculator.
#[derive(Parser, Debug)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite history database: a file path, a sqlx URL or `:memory:`
    #[arg(long, env = "TAX_CALC_DATABASE", default_value = "tax_calculations.db", global = true)]
    database: String,

    /// Log filter, e.g. `debug` or `tax_core=trace`; overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline on a return read as JSON
    Calculate {
        /// Input file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Do not record the calculation in the history database
        #[arg(long, default_value_t = false)]
        no_save: bool,

        /// Print a human-readable summary instead of JSON
        #[arg(long, default_value_t = false)]
        summary: bool,
    },

    /// Bracket-only estimate from a gross income figure
    Estimate {
        #[arg(long, required_unless_present = "batch")]
        gross_income: Option<Decimal>,

        /// SINGLE, MARRIED_FILING_JOINTLY, ... or S, MFJ, MFS, HOH, QSS
        #[arg(long, required_unless_present = "batch")]
        filing_status: Option<FilingStatus>,

        /// CSV with columns label,filing_status,gross_income
        #[arg(long, conflicts_with_all = ["gross_income", "filing_status"])]
        batch: Option<PathBuf>,
    },

    /// Print the 2024 schedules as JSON
    Tables {
        #[command(subcommand)]
        table: Table,
    },

    /// Inspect stored calculations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
enum Table {
    /// Ordinary brackets and preferential tiers per filing status
    Brackets,
    /// Standard deduction per filing status
    Deductions,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// Newest first
    List,
    /// Input and result of one calculation
    Show { id: i64 },
    Delete { id: i64 },
}

#[derive(Serialize)]
struct BracketTable {
    filing_status: FilingStatus,
    ordinary: &'static [TaxBracket],
    preferential: &'static [TaxBracket],
}

#[derive(Serialize)]
struct DeductionTable {
    filing_status: FilingStatus,
    base: Decimal,
    additional_per_condition: Decimal,
}

fn read_input(input: &str) -> Result<String> {
    let mut json = String::new();
    if input == "-" {
        io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read return from stdin")?;
    } else {
        File::open(input)
            .and_then(|mut f| f.read_to_string(&mut json))
            .with_context(|| format!("Failed to read return: {}", input))?;
    }
    Ok(json)
}

fn emit(text: impl AsRef<[u8]>) -> Result<()> {
    write_stdout(text).context("Failed to write output")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    emit(json + "\n")
}

async fn calculate(
    database: &str,
    input: &str,
    no_save: bool,
    summary: bool,
) -> Result<()> {
    let tax_return = TaxReturnInput::from_json(&read_input(input)?)
        .with_context(|| format!("Invalid return: {}", input))?;

    let calculator = calculator_for(database, no_save).await;

    let result = calculator
        .calculate(&tax_return)
        .await
        .context("Calculation failed")?;

    if summary {
        emit(render_summary(&result))
    } else {
        let json = result
            .to_json_pretty()
            .context("Failed to serialize result")?;
        emit(json + "\n")
    }
}

fn estimate(
    gross_income: Option<Decimal>,
    filing_status: Option<FilingStatus>,
    batch: Option<PathBuf>,
) -> Result<()> {
    if let Some(path) = batch {
        let file =
            File::open(&path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = BatchEstimator::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
        info!(records = records.len(), "Parsed batch");

        let estimates = BatchEstimator::estimate(&records)?;
        let mut csv = Vec::new();
        BatchEstimator::write(&mut csv, &estimates)?;
        return emit(csv);
    }

    let (Some(gross_income), Some(filing_status)) = (gross_income, filing_status) else {
        anyhow::bail!("--gross-income and --filing-status are required without --batch");
    };
    print_json(&quick_estimate(gross_income, filing_status)?)
}

fn tables(table: Table) -> Result<()> {
    match table {
        Table::Brackets => {
            let rows: Vec<BracketTable> = FilingStatus::ALL
                .into_iter()
                .map(|filing_status| BracketTable {
                    filing_status,
                    ordinary: federal_brackets(filing_status),
                    preferential: preferential_tiers(filing_status),
                })
                .collect();
            print_json(&rows)
        }
        Table::Deductions => {
            let rows: Vec<DeductionTable> = FilingStatus::ALL
                .into_iter()
                .map(|filing_status| {
                    let blind = standard_deduction(filing_status, true, false);
                    DeductionTable {
                        filing_status,
                        base: blind.base_amount,
                        additional_per_condition: blind.additional_amount,
                    }
                })
                .collect();
            print_json(&rows)
        }
    }
}

async fn history(
    database: &str,
    action: HistoryAction,
) -> Result<()> {
    let repo = open_repository(database).await?;
    match action {
        HistoryAction::List => {
            let summaries = repo
                .list_calculations()
                .await
                .context("Failed to list calculations")?;
            emit(render_history(&summaries))
        }
        HistoryAction::Show { id } => {
            let stored = repo
                .get_calculation(id)
                .await
                .with_context(|| format!("Failed to load calculation {}", id))?;
            print_json(&stored)
        }
        HistoryAction::Delete { id } => {
            repo.delete_calculation(id)
                .await
                .with_context(|| format!("Failed to delete calculation {}", id))?;
            emit(format!("Deleted calculation {}\n", id))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_default_logging();
    if let Some(level) = &args.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &args.log_file {
        logging::enable_file_logging(path)?;
    }

    let outcome = match args.command {
        Command::Calculate {
            input,
            no_save,
            summary,
        } => calculate(&args.database, &input, no_save, summary).await,
        Command::Estimate {
            gross_income,
            filing_status,
            batch,
        } => estimate(gross_income, filing_status, batch),
        Command::Tables { table } => tables(table),
        Command::History { action } => history(&args.database, action).await,
    };

    match outcome {
        Err(e) if is_broken_pipe(&e) => {
            debug!("Stdout closed early; output truncated");
            Ok(())
        }
        other => other,
    }
}
