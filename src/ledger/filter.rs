use chrono::NaiveDate;

use super::transaction::{Transaction, TransactionKind};

/// Criteria for narrowing the transaction list. Every set criterion must
/// match; an unset criterion places no restriction on that dimension.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kinds: Option<Vec<TransactionKind>>,
    pub categories: Option<Vec<String>>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(mut self, kinds: Vec<TransactionKind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Restricts to dates within `[from, to]`, both ends inclusive.
    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Case-insensitive substring match on the description.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(ref kinds) = self.kinds {
            if !kinds.contains(&txn.kind) {
                return false;
            }
        }
        if let Some(ref categories) = self.categories {
            if !categories.iter().any(|c| c == &txn.category) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if txn.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.date > to {
                return false;
            }
        }
        if let Some(ref term) = self.search {
            if !txn
                .description
                .to_lowercase()
                .contains(&term.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}
