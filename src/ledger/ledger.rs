use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{
    filter::TransactionFilter,
    goal::Goal,
    transaction::{Transaction, TransactionDraft, TransactionPatch},
};

/// Aggregate root owning the transaction records, budget targets, and savings
/// goals. The whole value is the unit of persistence: one JSON document,
/// rewritten in full on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: BTreeMap<String, f64>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next transaction id: 1 for an empty ledger, otherwise `max(id) + 1`.
    /// Ids stay unique even after interleaved deletes. Single-writer only.
    pub fn next_id(&self) -> u64 {
        self.transactions
            .iter()
            .map(|txn| txn.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Records a new transaction and returns its assigned id.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> u64 {
        let id = self.next_id();
        self.transactions.push(draft.into_transaction(id));
        id
    }

    /// Merges `patch` into the first transaction with a matching id. Unknown
    /// ids are a silent no-op.
    pub fn update_transaction(&mut self, id: u64, patch: &TransactionPatch) {
        if let Some(txn) = self.transactions.iter_mut().find(|txn| txn.id == id) {
            patch.apply(txn);
        }
    }

    /// Removes every transaction with the given id (expected exactly one).
    /// Unknown ids leave the collection unchanged.
    pub fn remove_transaction(&mut self, id: u64) {
        self.transactions.retain(|txn| txn.id != id);
    }

    /// Removes every transaction whose id is in `ids`, returning how many were
    /// dropped.
    pub fn bulk_remove(&mut self, ids: &HashSet<u64>) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|txn| !ids.contains(&txn.id));
        before - self.transactions.len()
    }

    /// Empties the transaction collection; budgets and goals stay.
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Empties every collection.
    pub fn clear_all(&mut self) {
        self.transactions.clear();
        self.budgets.clear();
        self.goals.clear();
    }

    /// Returns the transactions matching every criterion of `filter`.
    pub fn filter(&self, filter: &TransactionFilter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Sets the period target for a category, overwriting any previous target.
    pub fn set_budget(&mut self, category: impl Into<String>, amount: f64) {
        self.budgets.insert(category.into(), amount);
    }

    pub fn budget_for(&self, category: &str) -> Option<f64> {
        self.budgets.get(category).copied()
    }

    pub fn add_goal(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    /// Adds funds to the named goal. Unknown names are a silent no-op.
    pub fn fund_goal(&mut self, name: &str, amount: f64) {
        if let Some(goal) = self.goals.iter_mut().find(|goal| goal.name == name) {
            goal.add_progress(amount);
        }
    }
}
