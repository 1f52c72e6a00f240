use std::{io::Write, path::Path};

use crate::ledger::Transaction;

use super::Result;

/// Column order is part of the export contract; downstream spreadsheets rely
/// on it staying put.
const HEADER: [&str; 6] = ["id", "date", "category", "amount", "type", "description"];

/// Serializes the given record subset as CSV.
pub fn write_csv<W: Write>(records: &[&Transaction], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADER)?;
    for txn in records {
        csv.write_record([
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category.clone(),
            txn.amount.to_string(),
            txn.kind.to_string(),
            txn.description.clone(),
        ])?;
    }
    csv.flush().map_err(crate::errors::LedgerError::Io)?;
    Ok(())
}

/// Writes the given record subset as a CSV file at `path`.
pub fn export_csv_to_path(records: &[&Transaction], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(records, file)
}
