pub mod csv_export;
pub mod json_backend;

use std::path::Path;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing the ledger
/// document.
pub trait StorageBackend {
    /// Persists the full ledger state, replacing the previous document.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Reads the persisted document. A missing or malformed document yields
    /// the empty default state together with a reported warning, never an
    /// error.
    fn load(&self) -> Result<LoadOutcome>;

    /// Writes a full-document backup to an arbitrary path.
    fn export_backup(&self, ledger: &Ledger, path: &Path) -> Result<()>;

    /// Reads a replacement document from an arbitrary path. The content is
    /// trusted; missing keys default to empty collections.
    fn import_backup(&self, path: &Path) -> Result<Ledger>;
}

pub use csv_export::{export_csv_to_path, write_csv};
pub use json_backend::{JsonStorage, LoadOutcome};
