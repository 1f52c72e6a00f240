use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One income or expense event in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
}

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "Income"),
            TransactionKind::Expense => write!(f, "Expense"),
        }
    }
}

/// Form input for a new transaction; the ledger assigns the id.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub description: String,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: u64) -> Transaction {
        Transaction {
            id,
            date: self.date,
            category: self.category,
            amount: self.amount,
            kind: self.kind,
            description: self.description,
        }
    }
}

/// Partial update merged into an existing transaction; unset fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub kind: Option<TransactionKind>,
    pub description: Option<String>,
}

impl TransactionPatch {
    pub fn apply(&self, transaction: &mut Transaction) {
        if let Some(date) = self.date {
            transaction.date = date;
        }
        if let Some(ref category) = self.category {
            transaction.category = category.clone();
        }
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(kind) = self.kind {
            transaction.kind = kind;
        }
        if let Some(ref description) = self.description {
            transaction.description = description.clone();
        }
    }
}
