//! The fixed category list offered by the entry forms.
//!
//! Matching stays string-equality permissive at the data layer: the ledger
//! accepts any category string, so documents imported from a backup keep
//! whatever labels they carry.

/// Every category selectable when recording a transaction.
const CATEGORIES: [&str; 11] = [
    "Food",
    "Transport",
    "Housing",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Shopping",
    "Salary",
    "Freelance",
    "Investment",
    "Other",
];

/// The expense-side subset that can carry a budget.
const BUDGET_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Housing",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Shopping",
    "Other",
];

pub fn categories() -> &'static [&'static str] {
    &CATEGORIES
}

pub fn budget_categories() -> &'static [&'static str] {
    &BUDGET_CATEGORIES
}

pub fn is_known_category(name: &str) -> bool {
    CATEGORIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_categories_are_a_subset() {
        for category in budget_categories() {
            assert!(is_known_category(category));
        }
    }

    #[test]
    fn income_sources_are_not_budgetable() {
        for source in ["Salary", "Freelance", "Investment"] {
            assert!(is_known_category(source));
            assert!(!budget_categories().contains(&source));
        }
    }
}
