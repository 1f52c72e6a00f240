use colored::Colorize;

use crate::ledger::{Transaction, TransactionKind};
use crate::metrics::{BudgetProgress, GoalProgress};

const BAR_WIDTH: usize = 24;

pub fn info(message: impl AsRef<str>) {
    println!("{} {}", "[i]".cyan(), message.as_ref());
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "[ok]".green(), message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    println!("{} {}", "[!]".yellow(), message.as_ref().yellow());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", "[x]".red(), message.as_ref().red());
}

pub fn section(title: impl AsRef<str>) {
    println!("\n{}", format!("=== {} ===", title.as_ref()).bold());
}

pub fn separator() {
    println!("{}", "----------------------------------------".dimmed());
}

/// Formats an amount as `$1,234.56`.
pub fn money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}.{frac:02}")
    } else {
        format!("${grouped}.{frac:02}")
    }
}

/// A fixed-width text progress bar for budget and goal ratios.
pub fn progress_bar(ratio: f64) -> String {
    let clamped = ratio.clamp(0.0, 1.0);
    let filled = (clamped * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// One transaction as a list row: signed colored amount, date, category,
/// description.
pub fn transaction_row(txn: &Transaction) -> String {
    let amount = match txn.kind {
        TransactionKind::Income => format!("+{}", money(txn.amount)).green(),
        TransactionKind::Expense => format!("-{}", money(txn.amount)).red(),
    };
    format!(
        "#{:<4} {}  {:<13} {:>14}  {}",
        txn.id, txn.date, txn.category, amount, txn.description
    )
}

pub fn print_budget_line(category: &str, progress: &BudgetProgress) {
    println!(
        "{:<13} {} {} of {}",
        category,
        progress_bar(progress.ratio),
        money(progress.spent),
        money(progress.budget)
    );
    if progress.over_budget {
        warning(format!(
            "{category} is over budget by {}!",
            money(progress.overspend())
        ));
    } else if progress.near_limit {
        warning(format!("{category} is approaching its budget limit."));
    }
}

pub fn print_goal_line(name: &str, current: f64, target: f64, progress: &GoalProgress) {
    println!(
        "{:<20} {} {} of {} ({:.1}%)",
        name,
        progress_bar(progress.display_ratio()),
        money(current),
        money(target),
        progress.percent()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(20.0), "$20.00");
        assert_eq!(money(1234.5), "$1,234.50");
        assert_eq!(money(1234567.89), "$1,234,567.89");
        assert_eq!(money(-20.0), "-$20.00");
    }

    #[test]
    fn progress_bar_clamps_to_width() {
        assert_eq!(progress_bar(0.0).chars().filter(|c| *c == '█').count(), 0);
        assert_eq!(progress_bar(1.0).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
        assert_eq!(progress_bar(2.5).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
        assert_eq!(progress_bar(0.5).chars().count(), BAR_WIDTH);
    }
}
