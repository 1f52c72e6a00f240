use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{ledger::Ledger, utils::ensure_dir};

use super::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Persists the ledger as a single pretty-printed JSON document at a fixed
/// path. The document is rewritten in full on every save; writes stage to a
/// temporary sibling and rename into place so a crash mid-write never
/// corrupts the previous document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    data_file: PathBuf,
}

/// What `load` produced: the ledger plus an optional warning describing why
/// the default state was substituted.
#[derive(Debug)]
pub struct LoadOutcome {
    pub ledger: Ledger,
    pub warning: Option<String>,
}

impl JsonStorage {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger) -> Result<()> {
        save_ledger_to_path(ledger, &self.data_file)
    }

    fn load(&self) -> Result<LoadOutcome> {
        if !self.data_file.exists() {
            tracing::info!(path = %self.data_file.display(), "No data file yet, starting empty.");
            return Ok(LoadOutcome {
                ledger: Ledger::default(),
                warning: None,
            });
        }
        let data = match fs::read_to_string(&self.data_file) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(error = %err, "Data file unreadable, starting empty.");
                return Ok(LoadOutcome {
                    ledger: Ledger::default(),
                    warning: Some(format!("Error loading data: {err}")),
                });
            }
        };
        match serde_json::from_str(&data) {
            Ok(ledger) => Ok(LoadOutcome {
                ledger,
                warning: None,
            }),
            Err(err) => {
                tracing::warn!(error = %err, "Data file malformed, starting empty.");
                Ok(LoadOutcome {
                    ledger: Ledger::default(),
                    warning: Some(format!("Error loading data: {err}")),
                })
            }
        }
    }

    fn export_backup(&self, ledger: &Ledger, path: &Path) -> Result<()> {
        save_ledger_to_path(ledger, path)
    }

    fn import_backup(&self, path: &Path) -> Result<Ledger> {
        load_ledger_from_path(path)
    }
}

/// Writes the ledger to `path` atomically by staging to a temporary file.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_all(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a ledger document from `path`, returning structured errors on
/// failure. Missing top-level keys default to empty collections.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    Ok(ledger)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
