//! Ledger domain models, persistence-friendly types, and helpers.

pub mod category;
pub mod filter;
pub mod goal;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{budget_categories, categories, is_known_category};
pub use filter::TransactionFilter;
pub use goal::Goal;
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionDraft, TransactionKind, TransactionPatch};
