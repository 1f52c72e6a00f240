use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Once,
};

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("finance_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Creates `dir` (and any missing parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Resolves the data file used when no path is given on the command line.
///
/// `FINANCE_CORE_DATA` wins, then the platform data directory, then the
/// current directory as a last resort.
pub fn default_data_path() -> PathBuf {
    if let Ok(path) = std::env::var("FINANCE_CORE_DATA") {
        return PathBuf::from(path);
    }
    match dirs::data_dir() {
        Some(base) => base.join("finance_core").join("finance_data.json"),
        None => PathBuf::from("finance_data.json"),
    }
}
