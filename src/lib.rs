//! Finance Core offers the ledger, budgeting, and savings-goal primitives behind a
//! single-user personal finance tracker persisted to one flat JSON document.

pub mod cli;
pub mod errors;
pub mod ledger;
pub mod metrics;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
