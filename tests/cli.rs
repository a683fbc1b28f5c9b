//! End-to-end tests driving the `tracker` binary against a temporary data
//! directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tracker(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tracker").unwrap();
    cmd.env("FINANCE_TRACKER_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_seeds_default_taxonomy() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    tracker(&dir)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Salary"))
        .stdout(predicate::str::contains("Entertainment"));

    tracker(&dir)
        .args(["item", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"));
}

#[test]
fn add_list_and_delete_transactions() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .args(["transaction", "add", "usage", "Food", "45.50"])
        .args(["--item", "Groceries", "--date", "2025-01-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction txn-1"));

    tracker(&dir)
        .args(["txn", "add", "income", "Salary", "3000", "--date", "2025-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction txn-2"));

    tracker(&dir)
        .args(["txn", "list", "--type", "usage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("1 transaction(s)"));

    tracker(&dir)
        .args(["txn", "delete", "txn-1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction txn-1"));

    // Ids are never reused
    tracker(&dir)
        .args(["txn", "add", "expense", "Rent", "900", "--date", "2025-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("txn-3"));
}

#[test]
fn failures_report_the_reason() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .args(["txn", "add", "usage", "Food", "-5", "--date", "2025-01-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("negative"));

    tracker(&dir)
        .args(["txn", "add", "usage", "Food", "100000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    tracker(&dir)
        .args(["txn", "delete", "txn-42", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found: txn-42"));

    tracker(&dir)
        .args(["txn", "add", "refund", "Food", "5"])
        .assert()
        .failure();
}

#[test]
fn reconcile_budget_against_usage() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .args(["budget", "set", "Food", "Groceries", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set budget bud-1"));

    for amount in ["30", "45"] {
        tracker(&dir)
            .args(["txn", "add", "usage", "Food", amount])
            .args(["--item", "Groceries", "--date", "2025-01-10"])
            .assert()
            .success();
    }

    tracker(&dir)
        .arg("reconcile")
        .assert()
        .success()
        .stdout(predicate::str::contains("25.00"))
        .stdout(predicate::str::contains("75%"));

    tracker(&dir)
        .args(["reconcile", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"remaining\": 2500"))
        .stdout(predicate::str::contains("\"ratio\": 0.75"));
}

#[test]
fn import_then_export_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.csv");
    std::fs::write(
        &input,
        "date,type,category,item,amount,description\n\
         2025-02-01,Income,Salary,,2500.00,February pay\n\
         02/14/2025,Usage,Food,Dining Out,60,\n\
         not-a-date,Expense,Rent,,800,\n",
    )
    .unwrap();

    tracker(&dir)
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 transaction(s)"))
        .stdout(predicate::str::contains("1 row(s) had an unreadable date"));

    let output = dir.path().join("out.csv");
    tracker(&dir)
        .args(["export", "csv"])
        .arg(&output)
        .assert()
        .success();

    let exported = std::fs::read_to_string(&output).unwrap();
    assert!(exported.starts_with("Date,Type,Category,Item,Amount,Description"));
    assert!(exported.contains("2025-02-14,Usage,Food,Dining Out,60.00,"));
    assert!(exported.contains(",Expense,Rent,,800.00,"));
}

#[test]
fn import_missing_columns_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.csv");
    std::fs::write(&input, "Date,Category\n2025-01-01,Food\n").unwrap();

    tracker(&dir)
        .arg("import")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Type, Amount"));
}

#[test]
fn config_set_changes_policy() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .args(["config", "set", "budgets.reject_duplicates", "true"])
        .assert()
        .success();

    tracker(&dir)
        .args(["budget", "set", "Food", "Groceries", "100"])
        .assert()
        .success();

    tracker(&dir)
        .args(["budget", "set", "Food", "Groceries", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    tracker(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("budgets.reject_duplicates:   true"));
}

#[test]
fn summary_report_shows_net() {
    let dir = TempDir::new().unwrap();

    tracker(&dir)
        .args(["txn", "add", "income", "Salary", "1000", "--date", "2025-03-01"])
        .assert()
        .success();
    tracker(&dir)
        .args(["txn", "add", "expense", "Rent", "400", "--date", "2025-03-02"])
        .assert()
        .success();

    tracker(&dir)
        .args(["report", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("600.00"));

    tracker(&dir)
        .args(["report", "monthly"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-03"));
}
