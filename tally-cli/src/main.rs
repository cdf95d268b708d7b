use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_ingest::{
    Category, PlainTextPages, RecordSink, RevolutParser, TextSource, TransactionRecord,
    ingest_statement,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod state;
mod store;

use config::{Config, config_path, init_config, load_config};
use store::{JsonStore, manual_record};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "tally", version = VERSION, about = "Pull transactions out of Revolut HUF statements")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse extracted statement text and print the transactions (nothing is stored)
    Parse {
        /// Extracted text, one file per page, in page order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Parse extracted statement text and append the transactions to the store
    Import {
        /// Extracted text, one file per page, in page order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Add one expense or income entry by hand
    Add {
        /// Statement-style date, e.g. "Jan 5, 2024"
        #[arg(long)]
        date: String,

        #[arg(long)]
        description: String,

        /// Signed amount, e.g. -15,500.00 for an expense
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// Expense or Income
        #[arg(long, value_parser = parse_category)]
        category: Category,
    },

    /// List stored entries
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_label(s).ok_or_else(|| format!("expected Expense or Income, got {s:?}"))
}

fn init_logging(cfg: &Config) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config()?;
    init_logging(&cfg);

    match cli.command {
        Command::Parse { files, json } => {
            let records = parse_files(&files)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_records(&records);
                println!("\nParsed {} transactions", records.len());
            }
        }

        Command::Import { files } => {
            let text = read_statement(&files)?;
            let parser = RevolutParser::new()?;
            let store_path = cfg.store_path()?;
            let mut store = JsonStore::open(&store_path)?;

            let summary = ingest_statement(&parser, &text, &mut store)
                .with_context(|| format!("storing into {}", store_path.display()))?;

            println!(
                "Uploaded and processed {} transactions. ({} expenses, {} income)",
                summary.stored, summary.expenses, summary.income
            );
        }

        Command::Add {
            date,
            description,
            amount,
            category,
        } => {
            let record = manual_record(&date, &description, &amount, category)?;
            let mut store = JsonStore::open(cfg.store_path()?)?;
            store.store(std::slice::from_ref(&record))?;
            println!(
                "Added: {} | {} | {} | {}",
                record.date, record.description, record.amount, record.category
            );
        }

        Command::List { json } => {
            let store = JsonStore::open(cfg.store_path()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(store.expenses())?);
            } else {
                for e in store.expenses() {
                    println!(
                        "#{:<5} {:<14} {:<8} {:>14}  {}",
                        e.id, e.date, e.category, e.amount, e.description
                    );
                }
                println!("\n{} entries in {}", store.expenses().len(), store.path().display());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg)?);
                println!("# store: {}", cfg.store_path()?.display());
            }
        },
    }

    Ok(())
}

fn read_statement(files: &[PathBuf]) -> Result<String> {
    let source = PlainTextPages::new(files);
    source.extract_text().context("could not parse file")
}

fn parse_files(files: &[PathBuf]) -> Result<Vec<TransactionRecord>> {
    let text = read_statement(files)?;
    let parser = RevolutParser::new()?;
    Ok(parser.parse(&text))
}

fn print_records(records: &[TransactionRecord]) {
    for r in records {
        println!(
            "{:<14} {:<8} {:>14}  {}",
            r.date, r.category, r.amount, r.description
        );
    }
}
