use budget::{Aggregates, Ledger, LedgerStore, JsonStore,
    config::AppConfig,
    error::LedgerError,
    export,
    transaction::TransactionId};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use anyhow::Context;
use colored::Colorize;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Path to the configuration file (defaults to budget.toml if present)
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Disable coloured output
    #[clap(long)]
    no_color: bool,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Record an income (positive) or expense (negative amount)
    Add(Add),
    /// Delete a transaction by id
    Remove(Remove),
    /// Delete all transactions
    Clear(Clear),
    /// List all transactions
    List,
    /// Show balance, income and expense
    Summary,
    /// Write all transactions to a spreadsheet
    Export(Export),
}

#[derive(Args, Debug)]
struct Add {
    /// What the money was for
    #[clap(value_parser)]
    description: String,

    /// Signed amount, negative for expenses
    #[clap(value_parser, allow_negative_numbers = true)]
    amount: f64,
}

#[derive(Args, Debug)]
struct Remove {
    /// Id of the transaction, as shown by `list`
    #[clap(value_parser, allow_negative_numbers = true)]
    id: TransactionId,
}

#[derive(Args, Debug)]
struct Clear {
    /// Do not ask for confirmation
    #[clap(short, long)]
    yes: bool,
}

#[derive(Args, Debug)]
struct Export {
    /// Directory to write the spreadsheet into
    #[clap(short, long, value_parser)]
    dir: Option<PathBuf>,
}

fn print_transactions(ledger: &Ledger) {
    if ledger.is_empty() {
        println!("{}", "No transactions yet".dimmed());
        return;
    }
    for transaction in ledger.transactions() {
        println!("{}", transaction);
    }
}

fn print_summary(aggregates: &Aggregates) {
    let balance = aggregates.balance_display();
    let balance = if aggregates.balance.is_sign_negative() && !aggregates.balance.is_zero() {
        balance.as_str().bright_red()
    } else {
        balance.as_str().bold()
    };
    println!("{:<8} {}", "Balance", balance);
    println!("{:<8} {}", "Income", aggregates.income_display().as_str().green());
    println!("{:<8} {}", "Expense", aggregates.expense_display().as_str().red());
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = AppConfig::locate(args.config.as_deref())?;
    if args.no_color || !config.display.color {
        colored::control::set_override(false);
    }

    let mut store = LedgerStore::load(JsonStore::new(&config.storage.dir), &config.storage.key);

    match args.action {
        Subcommands::Add(add) => {
            match store.add(&add.description, add.amount) {
                Ok(transaction) => println!("Added {}", transaction),
                Err(LedgerError::InvalidInput(err)) => {
                    anyhow::bail!("Please enter a valid description and amount ({})", err)
                },
                Err(err) => return Err(err).context("failed to add transaction")
            }
        },
        Subcommands::Remove(remove) => {
            if store.remove(remove.id).context("failed to remove transaction")? {
                println!("Removed transaction {}", remove.id);
            } else {
                println!("No transaction with id {}", remove.id);
            }
        },
        Subcommands::Clear(clear) => {
            if clear.yes || confirm("Are you sure you want to clear all transactions?")? {
                store.clear().context("failed to clear transactions")?;
                println!("Cleared all transactions");
            }
        },
        Subcommands::List => {
            print_transactions(store.ledger());
        },
        Subcommands::Summary => {
            print_summary(&store.aggregates());
        },
        Subcommands::Export(opts) => {
            let dir = opts.dir.unwrap_or(config.export.dir);
            let path = export::export_to_dir(store.ledger().transactions(), dir)?;
            println!("Exported to {}", path.display());
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("{} {:#}", "error:".bright_red().bold(), err);
        std::process::exit(1);
    }
}
