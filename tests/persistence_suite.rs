use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use finance_core::ledger::{Goal, Ledger, TransactionDraft, TransactionKind};
use finance_core::storage::{JsonStorage, StorageBackend};
use tempfile::tempdir;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.add_transaction(TransactionDraft {
        date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        category: "Food".into(),
        amount: 20.0,
        kind: TransactionKind::Expense,
        description: "lunch".into(),
    });
    ledger.add_transaction(TransactionDraft {
        date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        category: "Salary".into(),
        amount: 3000.0,
        kind: TransactionKind::Income,
        description: "january pay".into(),
    });
    ledger.set_budget("Food", 50.0);
    ledger.add_goal(Goal::new(
        "Emergency Fund",
        1000.0,
        NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ));
    ledger
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn save_load_roundtrip_preserves_all_collections() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().join("finance_data.json"));

    let ledger = sample_ledger();
    storage.save(&ledger).expect("save ledger");
    let outcome = storage.load().expect("load ledger");

    assert!(outcome.warning.is_none());
    assert_eq!(outcome.ledger, ledger);
}

#[test]
fn document_layout_uses_the_three_top_level_keys() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finance_data.json");
    let storage = JsonStorage::new(&path);
    storage.save(&sample_ledger()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert!(object["transactions"].is_array());
    assert!(object["budgets"].is_object());
    assert!(object["goals"].is_array());
    assert_eq!(object["transactions"][0]["type"], "Expense");
    assert_eq!(object["transactions"][0]["date"], "2026-01-05");
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finance_data.json");
    let storage = JsonStorage::new(&path);

    let mut ledger = sample_ledger();
    storage.save(&ledger).expect("initial save");
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory squatting on the staging path forces File::create to fail.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    ledger.add_transaction(TransactionDraft {
        date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        category: "Food".into(),
        amount: 99.0,
        kind: TransactionKind::Expense,
        description: String::new(),
    });
    let result = storage.save(&ledger);
    assert!(result.is_err(), "save must fail when the staging path is taken");

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(current, original, "a failed save must not corrupt the document");
}

#[test]
fn missing_file_yields_default_state_silently() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().join("never_written.json"));
    let outcome = storage.load().unwrap();
    assert!(outcome.warning.is_none());
    assert_eq!(outcome.ledger, Ledger::default());
}

#[test]
fn corrupt_file_yields_default_state_with_warning() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("finance_data.json");
    fs::write(&path, "definitely not json").unwrap();

    let storage = JsonStorage::new(&path);
    let outcome = storage.load().unwrap();
    assert_eq!(outcome.ledger, Ledger::default());
    let warning = outcome.warning.expect("corrupt file must be reported");
    assert!(warning.starts_with("Error loading data:"));
}

#[test]
fn backup_and_restore_roundtrip() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(temp.path().join("finance_data.json"));
    let backup = temp.path().join("finance_backup.json");

    let ledger = sample_ledger();
    storage.export_backup(&ledger, &backup).expect("export backup");
    let restored = storage.import_backup(&backup).expect("import backup");
    assert_eq!(restored, ledger);
}

#[test]
fn import_defaults_missing_keys_to_empty_collections() {
    let temp = tempdir().unwrap();
    let backup = temp.path().join("partial_backup.json");
    fs::write(&backup, r#"{"transactions": []}"#).unwrap();

    let storage = JsonStorage::new(temp.path().join("finance_data.json"));
    let ledger = storage.import_backup(&backup).expect("import partial backup");
    assert!(ledger.transactions.is_empty());
    assert!(ledger.budgets.is_empty());
    assert!(ledger.goals.is_empty());
}
