//! Spreadsheet export of a ledger: a two column table with a header row,
//! written as CSV.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::core::Transaction;

pub const EXPORT_FILE_NAME: &str = "BudgetTracker.csv";
pub const HEADER: [&str; 2] = ["Description", "Amount"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No transactions to export!")]
    Empty,
    #[error("failed to write spreadsheet: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write spreadsheet: {0}")]
    Io(#[from] io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// The header followed by one `[description, amount]` row per transaction.
pub fn rows(transactions: &[Transaction]) -> Vec<[String; 2]> {
    let header = [HEADER[0].to_owned(), HEADER[1].to_owned()];
    std::iter::once(header)
        .chain(transactions.iter().map(|t| [t.description.clone(), t.formatted_amount()]))
        .collect()
}

pub fn write_csv<W: io::Write>(transactions: &[Transaction], writer: W) -> ExportResult<()> {
    if transactions.is_empty() {
        return Err(ExportError::Empty);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows(transactions) {
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes [`EXPORT_FILE_NAME`] into `dir` and returns its path.
pub fn export_to_dir(transactions: &[Transaction], dir: impl AsRef<Path>) -> ExportResult<PathBuf> {
    if transactions.is_empty() {
        return Err(ExportError::Empty);
    }

    fs::create_dir_all(dir.as_ref())?;
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    write_csv(transactions, fs::File::create(&path)?)?;

    info!("exported {} transactions to {}", transactions.len(), path.display());
    Ok(path)
}
