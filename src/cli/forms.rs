//! Data-entry forms for the interactive shell. Every form returns
//! `Ok(None)` when the user backs out, so callers reset the UI mode without
//! touching the ledger.

use chrono::{Local, Months, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::ledger::{
    budget_categories, categories, Goal, Transaction, TransactionDraft, TransactionFilter,
    TransactionKind,
};
use crate::storage::Result;

const KIND_CHOICES: [&str; 2] = ["Expense", "Income"];

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn parse_date(input: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| "Enter a date as YYYY-MM-DD.".to_string())
}

fn parse_amount(input: &str) -> std::result::Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(value) if value > 0.0 => Ok(value),
        _ => Err("Enter an amount greater than zero.".to_string()),
    }
}

fn date_input(prompt: &str, default: NaiveDate) -> Result<NaiveDate> {
    let raw: String = Input::with_theme(&theme())
        .with_prompt(prompt)
        .default(default.format("%Y-%m-%d").to_string())
        .validate_with(|value: &String| parse_date(value).map(|_| ()))
        .interact_text()?;
    Ok(parse_date(&raw).unwrap_or(default))
}

fn amount_input(prompt: &str, default: Option<f64>) -> Result<f64> {
    let theme = theme();
    let mut input = Input::with_theme(&theme)
        .with_prompt(prompt)
        .validate_with(|value: &String| parse_amount(value).map(|_| ()));
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    let raw: String = input.interact_text()?;
    Ok(parse_amount(&raw).unwrap_or_default())
}

/// Collects a transaction from the user. When `current` is given the form is
/// pre-filled for editing; otherwise it defaults to an expense dated today.
pub fn transaction_form(current: Option<&Transaction>) -> Result<Option<TransactionDraft>> {
    let kind_default = match current.map(|txn| txn.kind) {
        Some(TransactionKind::Income) => 1,
        _ => 0,
    };
    let kind_index = Select::with_theme(&theme())
        .with_prompt("Type")
        .items(&KIND_CHOICES)
        .default(kind_default)
        .interact()?;
    let kind = if kind_index == 1 {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let all = categories();
    let category_default = current
        .and_then(|txn| all.iter().position(|c| *c == txn.category))
        .unwrap_or(0);
    let category_index = Select::with_theme(&theme())
        .with_prompt("Category")
        .items(all)
        .default(category_default)
        .interact()?;
    let category = all[category_index].to_string();

    let amount = amount_input("Amount ($)", current.map(|txn| txn.amount))?;
    let date = date_input(
        "Date",
        current.map_or_else(|| Local::now().date_naive(), |txn| txn.date),
    )?;

    let description: String = Input::with_theme(&theme())
        .with_prompt("Description")
        .allow_empty(true)
        .default(current.map_or_else(String::new, |txn| txn.description.clone()))
        .interact_text()?;

    let draft = TransactionDraft {
        date,
        category,
        amount,
        kind,
        description,
    };

    let confirmed = Confirm::with_theme(&theme())
        .with_prompt("Save this transaction?")
        .default(true)
        .interact()?;
    Ok(confirmed.then_some(draft))
}

/// Picks a budget category and its new period target.
pub fn budget_form(current_for: impl Fn(&str) -> Option<f64>) -> Result<Option<(String, f64)>> {
    let choices = budget_categories();
    let labels: Vec<String> = choices
        .iter()
        .map(|category| match current_for(category) {
            Some(amount) if amount > 0.0 => format!("{category} (currently ${amount:.2})"),
            _ => format!("{category} (no budget)"),
        })
        .collect();
    let Some(index) = Select::with_theme(&theme())
        .with_prompt("Category")
        .items(&labels)
        .default(0)
        .interact_opt()?
    else {
        return Ok(None);
    };
    let category = choices[index].to_string();

    let raw: String = Input::with_theme(&theme())
        .with_prompt(format!("{category} budget ($, 0 clears it)"))
        .default(current_for(&category).unwrap_or(0.0).to_string())
        .validate_with(|value: &String| match value.trim().parse::<f64>() {
            Ok(amount) if amount >= 0.0 => Ok(()),
            _ => Err("Enter a non-negative amount.".to_string()),
        })
        .interact_text()?;
    let amount = raw.trim().parse::<f64>().unwrap_or(0.0);
    Ok(Some((category, amount)))
}

/// Collects a new savings goal.
pub fn goal_form() -> Result<Option<Goal>> {
    let name: String = Input::with_theme(&theme())
        .with_prompt("Goal name")
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("Give the goal a name.")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    let target = amount_input("Target amount ($)", None)?;

    let today = Local::now().date_naive();
    let default_deadline = today.checked_add_months(Months::new(12)).unwrap_or(today);
    let deadline = date_input("Target date", default_deadline)?;

    let confirmed = Confirm::with_theme(&theme())
        .with_prompt(format!("Add goal '{}'?", name.trim()))
        .default(true)
        .interact()?;
    Ok(confirmed.then(|| Goal::new(name.trim(), target, deadline, today)))
}

/// Builds a filter from optional criteria; skipping every prompt leaves the
/// list unrestricted.
pub fn filter_form() -> Result<TransactionFilter> {
    let mut filter = TransactionFilter::new();

    let kind_picks = MultiSelect::with_theme(&theme())
        .with_prompt("Types (space to toggle, empty = all)")
        .items(&KIND_CHOICES)
        .interact()?;
    if !kind_picks.is_empty() {
        let kinds = kind_picks
            .into_iter()
            .map(|i| {
                if i == 1 {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                }
            })
            .collect();
        filter = filter.kinds(kinds);
    }

    let all = categories();
    let category_picks = MultiSelect::with_theme(&theme())
        .with_prompt("Categories (empty = all)")
        .items(all)
        .interact()?;
    if !category_picks.is_empty() {
        let picked = category_picks
            .into_iter()
            .map(|i| all[i].to_string())
            .collect();
        filter = filter.categories(picked);
    }

    if Confirm::with_theme(&theme())
        .with_prompt("Restrict to a date range?")
        .default(false)
        .interact()?
    {
        let today = Local::now().date_naive();
        let from = date_input("From", today.checked_sub_months(Months::new(1)).unwrap_or(today))?;
        let to = date_input("To", today)?;
        filter = filter.date_range(from, to);
    }

    let search: String = Input::with_theme(&theme())
        .with_prompt("Search description (empty = none)")
        .allow_empty(true)
        .interact_text()?;
    if !search.trim().is_empty() {
        filter = filter.search(search.trim());
    }

    Ok(filter)
}

/// Asks for the amount to add to a goal's progress.
pub fn goal_funding_form(name: &str) -> Result<Option<f64>> {
    let raw: String = Input::with_theme(&theme())
        .with_prompt(format!("Add to '{name}' ($, 0 cancels)"))
        .default("0".to_string())
        .validate_with(|value: &String| match value.trim().parse::<f64>() {
            Ok(amount) if amount >= 0.0 => Ok(()),
            _ => Err("Enter a non-negative amount.".to_string()),
        })
        .interact_text()?;
    let amount = raw.trim().parse::<f64>().unwrap_or(0.0);
    Ok((amount > 0.0).then_some(amount))
}
