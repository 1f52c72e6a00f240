//! Derived metrics over a ledger snapshot: totals, savings rate, category and
//! time-bucketed breakdowns, and budget/goal progress. Everything here is a
//! pure function; the presentation shell recomputes after each mutation.

use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};

use crate::ledger::{Goal, Transaction, TransactionKind};

/// Income and expense sums with their difference.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Sums the given records by kind. `balance` is exactly `income - expense`.
pub fn totals<'a, I>(records: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = Totals::default();
    for txn in records {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expense += txn.amount,
        }
    }
    totals.balance = totals.income - totals.expense;
    totals
}

/// Balance as a percentage of income. Zero income yields 0 rather than an
/// error, regardless of balance.
pub fn savings_rate(income: f64, balance: f64) -> f64 {
    if income > 0.0 {
        balance / income * 100.0
    } else {
        0.0
    }
}

/// Per-category sum and record count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryStat {
    pub total: f64,
    pub count: usize,
}

/// Groups records of the given kind by category.
pub fn by_category<'a, I>(records: I, kind: TransactionKind) -> BTreeMap<String, CategoryStat>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut stats: BTreeMap<String, CategoryStat> = BTreeMap::new();
    for txn in records.into_iter().filter(|txn| txn.kind == kind) {
        let entry = stats.entry(txn.category.clone()).or_default();
        entry.total += txn.amount;
        entry.count += 1;
    }
    stats
}

/// Categories of the given kind ordered by descending total.
pub fn top_categories<'a, I>(records: I, kind: TransactionKind) -> Vec<(String, CategoryStat)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut ranked: Vec<(String, CategoryStat)> = by_category(records, kind).into_iter().collect();
    ranked.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));
    ranked
}

/// Weekday order used for the spending-pattern chart.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Expense totals bucketed per calendar weekday, Monday through Sunday, with
/// quiet days filled in as 0.
pub fn by_day_of_week<'a, I>(records: I) -> [(Weekday, f64); 7]
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets = WEEKDAYS.map(|day| (day, 0.0));
    for txn in records
        .into_iter()
        .filter(|txn| txn.kind == TransactionKind::Expense)
    {
        let index = txn.date.weekday().num_days_from_monday() as usize;
        buckets[index].1 += txn.amount;
    }
    buckets
}

/// Income and expense flow within one month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthlyFlow {
    pub income: f64,
    pub expense: f64,
}

/// Sums amounts per `YYYY-MM` month and kind. Months with no activity are
/// absent rather than zero-filled.
pub fn by_month<'a, I>(records: I) -> BTreeMap<String, MonthlyFlow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<String, MonthlyFlow> = BTreeMap::new();
    for txn in records {
        let key = format!("{:04}-{:02}", txn.date.year(), txn.date.month());
        let flow = months.entry(key).or_default();
        match txn.kind {
            TransactionKind::Income => flow.income += txn.amount,
            TransactionKind::Expense => flow.expense += txn.amount,
        }
    }
    months
}

/// How far spending has progressed against one category budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetProgress {
    pub spent: f64,
    pub budget: f64,
    /// `spent / budget`, clamped to 1 for bar rendering.
    pub ratio: f64,
    pub over_budget: bool,
    pub near_limit: bool,
}

impl BudgetProgress {
    /// Amount past the budget once it has been exceeded.
    pub fn overspend(&self) -> f64 {
        (self.spent - self.budget).max(0.0)
    }
}

/// Evaluates spending against a budget target. Returns `None` for an unset
/// (zero or negative) budget. The near-limit warning fires above 80% but
/// yields to the over-budget flag.
pub fn budget_progress(budget: f64, spent: f64) -> Option<BudgetProgress> {
    if budget <= 0.0 {
        return None;
    }
    let ratio = (spent / budget).min(1.0);
    let over_budget = spent > budget;
    Some(BudgetProgress {
        spent,
        budget,
        ratio,
        over_budget,
        near_limit: !over_budget && ratio > 0.8,
    })
}

/// Funding progress of one savings goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// `current / target`, unclamped; feeds the "% complete" text.
    pub ratio: f64,
}

impl GoalProgress {
    /// Ratio clamped to `[0, 1]` for progress-bar display.
    pub fn display_ratio(&self) -> f64 {
        self.ratio.clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> f64 {
        self.ratio * 100.0
    }
}

/// Ratio of funds accumulated toward the goal; 0 when the target is unset.
pub fn goal_progress(goal: &Goal) -> GoalProgress {
    let ratio = if goal.target > 0.0 {
        goal.current / goal.target
    } else {
        0.0
    };
    GoalProgress { ratio }
}

/// The `n` most recent records, newest first. Ties keep insertion order.
pub fn recent(records: &[Transaction], n: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: u64, date: &str, category: &str, amount: f64, kind: TransactionKind) -> Transaction {
        Transaction {
            id,
            date: date.parse().unwrap(),
            category: category.into(),
            amount,
            kind,
            description: String::new(),
        }
    }

    #[test]
    fn totals_balance_identity() {
        let records = vec![
            txn(1, "2026-01-05", "Salary", 3000.0, TransactionKind::Income),
            txn(2, "2026-01-06", "Food", 20.0, TransactionKind::Expense),
            txn(3, "2026-01-07", "Transport", 15.5, TransactionKind::Expense),
        ];
        let t = totals(&records);
        assert_eq!(t.income, 3000.0);
        assert_eq!(t.expense, 35.5);
        assert_eq!(t.balance, t.income - t.expense);
    }

    #[test]
    fn savings_rate_guards_zero_income() {
        assert_eq!(savings_rate(0.0, -20.0), 0.0);
        assert_eq!(savings_rate(0.0, 500.0), 0.0);
        assert_eq!(savings_rate(200.0, 50.0), 25.0);
    }

    #[test]
    fn first_expense_scenario() {
        let records = vec![txn(1, "2026-01-05", "Food", 20.0, TransactionKind::Expense)];
        let t = totals(&records);
        assert_eq!(t.income, 0.0);
        assert_eq!(t.expense, 20.0);
        assert_eq!(t.balance, -20.0);
        assert_eq!(savings_rate(t.income, t.balance), 0.0);
    }

    #[test]
    fn by_category_splits_sum_and_count() {
        let records = vec![
            txn(1, "2026-01-05", "Food", 20.0, TransactionKind::Expense),
            txn(2, "2026-01-06", "Food", 30.0, TransactionKind::Expense),
            txn(3, "2026-01-07", "Salary", 100.0, TransactionKind::Income),
        ];
        let stats = by_category(&records, TransactionKind::Expense);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats["Food"].total, 50.0);
        assert_eq!(stats["Food"].count, 2);
    }

    #[test]
    fn top_categories_rank_by_total() {
        let records = vec![
            txn(1, "2026-01-05", "Food", 20.0, TransactionKind::Expense),
            txn(2, "2026-01-06", "Housing", 900.0, TransactionKind::Expense),
            txn(3, "2026-01-07", "Transport", 45.0, TransactionKind::Expense),
        ];
        let ranked = top_categories(&records, TransactionKind::Expense);
        let names: Vec<&str> = ranked.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Housing", "Transport", "Food"]);
    }

    #[test]
    fn day_of_week_orders_monday_to_sunday_and_zero_fills() {
        // 2026-01-05 is a Monday.
        let records = vec![
            txn(1, "2026-01-05", "Food", 10.0, TransactionKind::Expense),
            txn(2, "2026-01-11", "Food", 25.0, TransactionKind::Expense),
            txn(3, "2026-01-05", "Salary", 99.0, TransactionKind::Income),
        ];
        let buckets = by_day_of_week(&records);
        assert_eq!(buckets[0], (Weekday::Mon, 10.0));
        assert_eq!(buckets[6], (Weekday::Sun, 25.0));
        for (_, amount) in &buckets[1..6] {
            assert_eq!(*amount, 0.0);
        }
    }

    #[test]
    fn by_month_leaves_quiet_months_absent() {
        let records = vec![
            txn(1, "2026-01-05", "Salary", 100.0, TransactionKind::Income),
            txn(2, "2026-03-02", "Food", 40.0, TransactionKind::Expense),
        ];
        let months = by_month(&records);
        assert_eq!(months.len(), 2);
        assert_eq!(months["2026-01"].income, 100.0);
        assert_eq!(months["2026-03"].expense, 40.0);
        assert!(!months.contains_key("2026-02"));
    }

    #[test]
    fn budget_near_limit_scenario() {
        let progress = budget_progress(50.0, 45.0).unwrap();
        assert!((progress.ratio - 0.9).abs() < f64::EPSILON);
        assert!(progress.near_limit);
        assert!(!progress.over_budget);
    }

    #[test]
    fn budget_over_limit_clamps_ratio() {
        let progress = budget_progress(50.0, 62.5).unwrap();
        assert_eq!(progress.ratio, 1.0);
        assert!(progress.over_budget);
        assert!(!progress.near_limit);
        assert_eq!(progress.overspend(), 12.5);
    }

    #[test]
    fn unset_budget_yields_no_progress() {
        assert!(budget_progress(0.0, 10.0).is_none());
    }

    #[test]
    fn goal_quarter_funded() {
        let mut goal = Goal::new(
            "Emergency Fund",
            1000.0,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        goal.add_progress(250.0);
        let progress = goal_progress(&goal);
        assert_eq!(progress.ratio, 0.25);
        assert_eq!(progress.percent(), 25.0);
    }

    #[test]
    fn overfunded_goal_clamps_display_only() {
        let mut goal = Goal::new(
            "Bike",
            100.0,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        goal.add_progress(150.0);
        let progress = goal_progress(&goal);
        assert_eq!(progress.ratio, 1.5);
        assert_eq!(progress.display_ratio(), 1.0);
        assert_eq!(progress.percent(), 150.0);
    }

    #[test]
    fn zero_target_goal_reports_zero() {
        let goal = Goal::new(
            "Unset",
            0.0,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        );
        assert_eq!(goal_progress(&goal).ratio, 0.0);
    }

    #[test]
    fn recent_returns_newest_first() {
        let records = vec![
            txn(1, "2026-01-05", "Food", 10.0, TransactionKind::Expense),
            txn(2, "2026-02-01", "Food", 10.0, TransactionKind::Expense),
            txn(3, "2026-01-20", "Food", 10.0, TransactionKind::Expense),
        ];
        let latest = recent(&records, 2);
        let ids: Vec<u64> = latest.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
