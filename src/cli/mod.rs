//! Interactive terminal shell over the ledger, plus a handful of
//! non-interactive commands for scripting.
//!
//! The shell owns the request/response cycle: collect form input, run one
//! ledger operation, persist, recompute metrics, re-render. Persistence is
//! best-effort; a failed save is reported and the in-memory state stands.

pub mod forms;
pub mod output;
pub mod state;

use std::{
    collections::HashSet,
    env,
    path::{Path, PathBuf},
    process,
};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

use crate::{
    ledger::{budget_categories, Ledger, Transaction, TransactionKind, TransactionPatch},
    metrics,
    storage::{export_csv_to_path, JsonStorage, Result, StorageBackend},
    utils,
};

use state::CliState;

const MENU: [&str; 11] = [
    "Dashboard",
    "Add transaction",
    "Browse & manage",
    "Bulk delete",
    "Analytics",
    "Budgets",
    "Goals",
    "Export CSV",
    "Backup / Restore",
    "Clear all data",
    "Quit",
];

/// Entry point for the binary: dispatches script commands, otherwise starts
/// the interactive shell against the default (or given) data file.
pub fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let first = args.next();
    match first.as_deref() {
        None => run_interactive(utils::default_data_path()),
        Some("report") => cmd_report(&required_path(args.next())),
        Some("export-csv") => {
            let data = required_path(args.next());
            let out = required_path(args.next());
            cmd_export_csv(&data, &out)
        }
        Some("backup") => {
            let data = required_path(args.next());
            let out = required_path(args.next());
            cmd_backup(&data, &out)
        }
        Some("restore") => {
            let data = required_path(args.next());
            let from = required_path(args.next());
            cmd_restore(&data, &from)
        }
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(())
        }
        Some(path) => run_interactive(PathBuf::from(path)),
    }
}

fn required_path(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from).unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    })
}

fn print_usage() {
    eprintln!(
        "Usage: finance_core_cli [data-file | command]\n\
         Commands:\n  \
         report <data.json>\n  \
         export-csv <data.json> <out.csv>\n  \
         backup <data.json> <backup.json>\n  \
         restore <data.json> <backup.json>\n\
         With no arguments the interactive shell opens the default data file."
    );
}

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn run_interactive(data_file: PathBuf) -> Result<()> {
    let storage = JsonStorage::new(data_file);
    let outcome = storage.load()?;
    if let Some(warning) = outcome.warning {
        output::warning(warning);
    }
    let mut state = CliState::new(outcome.ledger);
    output::info(format!("Data file: {}", storage.data_file().display()));

    loop {
        let Some(choice) = Select::with_theme(&theme())
            .with_prompt("Finance Manager")
            .items(&MENU)
            .default(0)
            .interact_opt()?
        else {
            break;
        };
        match MENU[choice] {
            "Dashboard" => dashboard(&state.ledger),
            "Add transaction" => add_transaction(&storage, &mut state)?,
            "Browse & manage" => browse(&storage, &mut state)?,
            "Bulk delete" => bulk_delete(&storage, &mut state)?,
            "Analytics" => analytics(&state.ledger),
            "Budgets" => budgets(&storage, &mut state)?,
            "Goals" => goals(&storage, &mut state)?,
            "Export CSV" => export_csv(&state.ledger)?,
            "Backup / Restore" => backup_restore(&storage, &mut state)?,
            "Clear all data" => clear_all(&storage, &mut state)?,
            _ => break,
        }
    }
    Ok(())
}

/// Saves the ledger, surfacing (but not rolling back on) failures.
fn persist(storage: &JsonStorage, ledger: &Ledger) {
    if let Err(err) = storage.save(ledger) {
        output::error(format!("Error saving data: {err}"));
    }
}

fn dashboard(ledger: &Ledger) {
    output::section("Dashboard");
    let totals = metrics::totals(&ledger.transactions);
    println!("Total Balance   {}", output::money(totals.balance));
    println!("Total Income    {}", output::money(totals.income));
    println!("Total Expenses  {}", output::money(totals.expense));
    println!(
        "Savings Rate    {:.1}%",
        metrics::savings_rate(totals.income, totals.balance)
    );

    let breakdown = metrics::top_categories(&ledger.transactions, TransactionKind::Expense);
    if !breakdown.is_empty() {
        output::section("Expense Breakdown");
        for (category, stat) in &breakdown {
            println!("{:<13} {}", category, output::money(stat.total));
        }
    }

    output::section("Recent Transactions");
    let latest = metrics::recent(&ledger.transactions, 5);
    if latest.is_empty() {
        output::info("No transactions yet. Add your first transaction!");
    }
    for txn in latest {
        println!("{}", output::transaction_row(txn));
    }
}

fn add_transaction(storage: &JsonStorage, state: &mut CliState) -> Result<()> {
    let Some(draft) = forms::transaction_form(None)? else {
        return Ok(());
    };
    let id = state.ledger.add_transaction(draft);
    persist(storage, &state.ledger);
    output::success(format!("Transaction #{id} added."));
    Ok(())
}

fn pick_transaction(rows: &[&Transaction], prompt: &str) -> Result<Option<u64>> {
    let labels: Vec<String> = rows.iter().map(|txn| output::transaction_row(txn)).collect();
    let picked = Select::with_theme(&theme())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(picked.map(|index| rows[index].id))
}

fn browse(storage: &JsonStorage, state: &mut CliState) -> Result<()> {
    if state.ledger.transactions.is_empty() {
        output::info("No transactions yet. Add your first transaction!");
        return Ok(());
    }

    let filter = if Confirm::with_theme(&theme())
        .with_prompt("Apply filters?")
        .default(false)
        .interact()?
    {
        forms::filter_form()?
    } else {
        Default::default()
    };

    let matches = state.ledger.filter(&filter);
    output::section(format!("Showing {} transactions", matches.len()));
    for txn in &matches {
        println!("{}", output::transaction_row(txn));
    }
    if matches.is_empty() {
        return Ok(());
    }
    let ids: Vec<u64> = matches.iter().map(|txn| txn.id).collect();

    loop {
        let Some(action) = Select::with_theme(&theme())
            .with_prompt("Manage")
            .items(&["Edit a transaction", "Delete a transaction", "Back"])
            .default(2)
            .interact_opt()?
        else {
            break;
        };
        match action {
            0 => {
                let rows: Vec<&Transaction> = ids
                    .iter()
                    .filter_map(|id| state.ledger.transaction(*id))
                    .collect();
                let Some(id) = pick_transaction(&rows, "Edit which transaction?")? else {
                    continue;
                };
                state.begin_edit(id);
                edit_transaction(storage, state, id)?;
                state.reset_mode();
            }
            1 => {
                let rows: Vec<&Transaction> = ids
                    .iter()
                    .filter_map(|id| state.ledger.transaction(*id))
                    .collect();
                let Some(id) = pick_transaction(&rows, "Delete which transaction?")? else {
                    continue;
                };
                state.begin_delete(id);
                confirm_delete(storage, state, id)?;
                state.reset_mode();
            }
            _ => break,
        }
    }
    Ok(())
}

fn edit_transaction(storage: &JsonStorage, state: &mut CliState, id: u64) -> Result<()> {
    let Some(current) = state.ledger.transaction(id).cloned() else {
        return Ok(());
    };
    let Some(draft) = forms::transaction_form(Some(&current))? else {
        return Ok(());
    };
    let patch = TransactionPatch {
        date: Some(draft.date),
        category: Some(draft.category),
        amount: Some(draft.amount),
        kind: Some(draft.kind),
        description: Some(draft.description),
    };
    state.ledger.update_transaction(id, &patch);
    persist(storage, &state.ledger);
    output::success(format!("Transaction #{id} updated."));
    Ok(())
}

fn confirm_delete(storage: &JsonStorage, state: &mut CliState, id: u64) -> Result<()> {
    let Some(txn) = state.ledger.transaction(id) else {
        return Ok(());
    };
    let confirmed = Confirm::with_theme(&theme())
        .with_prompt(format!(
            "Delete {} | {} | {}?",
            txn.date,
            txn.category,
            output::money(txn.amount)
        ))
        .default(false)
        .interact()?;
    if confirmed {
        state.ledger.remove_transaction(id);
        persist(storage, &state.ledger);
        output::success("Transaction deleted.");
    }
    Ok(())
}

fn bulk_delete(storage: &JsonStorage, state: &mut CliState) -> Result<()> {
    if state.ledger.transactions.is_empty() {
        output::info("No transactions to delete.");
        return Ok(());
    }
    let rows: Vec<String> = state
        .ledger
        .transactions
        .iter()
        .map(output::transaction_row)
        .collect();
    let picks = MultiSelect::with_theme(&theme())
        .with_prompt("Select transactions to delete (space to toggle)")
        .items(&rows)
        .interact()?;
    if picks.is_empty() {
        return Ok(());
    }
    let ids: HashSet<u64> = picks
        .iter()
        .map(|index| state.ledger.transactions[*index].id)
        .collect();
    let confirmed = Confirm::with_theme(&theme())
        .with_prompt(format!(
            "You are about to delete {} transaction(s). Continue?",
            ids.len()
        ))
        .default(false)
        .interact()?;
    if confirmed {
        let removed = state.ledger.bulk_remove(&ids);
        persist(storage, &state.ledger);
        output::success(format!("Deleted {removed} transactions."));
    }
    Ok(())
}

fn analytics(ledger: &Ledger) {
    if ledger.transactions.is_empty() {
        output::info("Add transactions to see analytics!");
        return;
    }

    output::section("Monthly Trends");
    for (month, flow) in metrics::by_month(&ledger.transactions) {
        println!(
            "{month}  income {:>14}  expenses {:>14}",
            output::money(flow.income),
            output::money(flow.expense)
        );
    }

    output::section("Top Spending Categories");
    for (category, stat) in metrics::top_categories(&ledger.transactions, TransactionKind::Expense)
    {
        println!(
            "{:<13} {:>14}  ({} transactions)",
            category,
            output::money(stat.total),
            stat.count
        );
    }

    output::section("Spending by Day of Week");
    for (day, total) in metrics::by_day_of_week(&ledger.transactions) {
        println!("{day:<9} {}", output::money(total));
    }
}

fn budgets(storage: &JsonStorage, state: &mut CliState) -> Result<()> {
    output::section("Monthly Budgets");
    let spending = metrics::by_category(&state.ledger.transactions, TransactionKind::Expense);
    let mut any = false;
    for category in budget_categories() {
        let Some(budget) = state.ledger.budget_for(category) else {
            continue;
        };
        let spent = spending.get(*category).map_or(0.0, |stat| stat.total);
        if let Some(progress) = metrics::budget_progress(budget, spent) {
            output::print_budget_line(category, &progress);
            any = true;
        }
    }
    if !any {
        output::info("No budgets set yet.");
    }

    if Confirm::with_theme(&theme())
        .with_prompt("Set or change a budget?")
        .default(false)
        .interact()?
    {
        if let Some((category, amount)) = forms::budget_form(|c| state.ledger.budget_for(c))? {
            state.ledger.set_budget(category.clone(), amount);
            persist(storage, &state.ledger);
            output::success(format!("Budget for {category} updated."));
        }
    }
    Ok(())
}

fn goals(storage: &JsonStorage, state: &mut CliState) -> Result<()> {
    output::section("Savings Goals");
    if state.ledger.goals.is_empty() {
        output::info("No goals yet.");
    }
    for goal in &state.ledger.goals {
        let progress = metrics::goal_progress(goal);
        output::print_goal_line(&goal.name, goal.current, goal.target, &progress);
        println!("  deadline {}", goal.deadline);
    }

    let Some(action) = Select::with_theme(&theme())
        .with_prompt("Goals")
        .items(&["Add a goal", "Add funds to a goal", "Back"])
        .default(2)
        .interact_opt()?
    else {
        return Ok(());
    };
    match action {
        0 => {
            if let Some(goal) = forms::goal_form()? {
                let name = goal.name.clone();
                state.ledger.add_goal(goal);
                persist(storage, &state.ledger);
                output::success(format!("Goal '{name}' added!"));
            }
        }
        1 => {
            if state.ledger.goals.is_empty() {
                output::info("No goals to fund.");
                return Ok(());
            }
            let names: Vec<String> = state
                .ledger
                .goals
                .iter()
                .map(|goal| goal.name.clone())
                .collect();
            let Some(index) = Select::with_theme(&theme())
                .with_prompt("Which goal?")
                .items(&names)
                .default(0)
                .interact_opt()?
            else {
                return Ok(());
            };
            if let Some(amount) = forms::goal_funding_form(&names[index])? {
                state.ledger.fund_goal(&names[index], amount);
                persist(storage, &state.ledger);
                output::success(format!("Added {} to '{}'.", output::money(amount), names[index]));
            }
        }
        _ => {}
    }
    Ok(())
}

fn export_csv(ledger: &Ledger) -> Result<()> {
    if ledger.transactions.is_empty() {
        output::info("No transactions to export.");
        return Ok(());
    }
    let filter = if Confirm::with_theme(&theme())
        .with_prompt("Filter the export?")
        .default(false)
        .interact()?
    {
        forms::filter_form()?
    } else {
        Default::default()
    };
    let records = ledger.filter(&filter);

    let path: String = Input::with_theme(&theme())
        .with_prompt("Output file")
        .default("transactions.csv".to_string())
        .interact_text()?;
    export_csv_to_path(&records, Path::new(&path))?;
    output::success(format!("Exported {} transactions to {path}.", records.len()));
    Ok(())
}

fn backup_restore(storage: &JsonStorage, state: &mut CliState) -> Result<()> {
    let Some(action) = Select::with_theme(&theme())
        .with_prompt("Data management")
        .items(&["Download backup (JSON)", "Restore from backup (JSON)", "Back"])
        .default(2)
        .interact_opt()?
    else {
        return Ok(());
    };
    match action {
        0 => {
            let path: String = Input::with_theme(&theme())
                .with_prompt("Backup file")
                .default("finance_backup.json".to_string())
                .interact_text()?;
            storage.export_backup(&state.ledger, Path::new(&path))?;
            output::success(format!("Backup written to {path}."));
        }
        1 => {
            let path: String = Input::with_theme(&theme())
                .with_prompt("Backup file to restore")
                .interact_text()?;
            match storage.import_backup(Path::new(&path)) {
                Ok(ledger) => {
                    state.ledger = ledger;
                    persist(storage, &state.ledger);
                    output::success("Data restored successfully!");
                }
                Err(err) => output::error(format!("Error restoring data: {err}")),
            }
        }
        _ => {}
    }
    Ok(())
}

fn clear_all(storage: &JsonStorage, state: &mut CliState) -> Result<()> {
    let confirmation: String = Input::with_theme(&theme())
        .with_prompt("Type 'DELETE ALL' to clear every transaction, budget, and goal")
        .allow_empty(true)
        .interact_text()?;
    if confirmation.trim() == "DELETE ALL" {
        state.ledger.clear_all();
        persist(storage, &state.ledger);
        output::success("All data cleared!");
    } else {
        output::info("Nothing deleted.");
    }
    Ok(())
}

fn cmd_report(data: &Path) -> Result<()> {
    let storage = JsonStorage::new(data);
    let outcome = storage.load()?;
    if let Some(warning) = outcome.warning {
        output::warning(warning);
    }
    let ledger = outcome.ledger;
    let totals = metrics::totals(&ledger.transactions);
    println!("Transactions: {}", ledger.transaction_count());
    println!("Income:   {}", output::money(totals.income));
    println!("Expenses: {}", output::money(totals.expense));
    println!("Balance:  {}", output::money(totals.balance));
    println!(
        "Savings rate: {:.1}%",
        metrics::savings_rate(totals.income, totals.balance)
    );
    for (month, flow) in metrics::by_month(&ledger.transactions) {
        println!(
            "{month}: income {} / expenses {}",
            output::money(flow.income),
            output::money(flow.expense)
        );
    }
    Ok(())
}

fn cmd_export_csv(data: &Path, out: &Path) -> Result<()> {
    let storage = JsonStorage::new(data);
    let ledger = storage.load()?.ledger;
    let records: Vec<&Transaction> = ledger.transactions.iter().collect();
    export_csv_to_path(&records, out)?;
    println!("Exported {} transactions to {}", records.len(), out.display());
    Ok(())
}

fn cmd_backup(data: &Path, out: &Path) -> Result<()> {
    let storage = JsonStorage::new(data);
    let ledger = storage.load()?.ledger;
    storage.export_backup(&ledger, out)?;
    println!("Backup written to {}", out.display());
    Ok(())
}

fn cmd_restore(data: &Path, from: &Path) -> Result<()> {
    let storage = JsonStorage::new(data);
    let ledger = storage.import_backup(from)?;
    storage.save(&ledger)?;
    println!(
        "Restored {} transactions from {}",
        ledger.transaction_count(),
        from.display()
    );
    Ok(())
}
