use ledger_core::db::{open_db, open_db_in_memory};
use ledger_core::{
    Expense, ExpenseId, Ledger, LedgerRepository, SqliteLedgerRepository, StoredLedger,
    EXPENSES_KEY, INCOME_KEY,
};
use rust_decimal::Decimal;

fn sample_ledger() -> Ledger {
    Ledger::new(
        Decimal::new(525075, 2),
        vec![
            Expense::new(ExpenseId(1_700_000_000_002), "Rent", Decimal::new(1200, 0)),
            Expense::new(ExpenseId(1_700_000_000_001), "Coffee", Decimal::new(350, 2)),
            Expense::new(ExpenseId(1_700_000_000_003), "Refund", Decimal::new(-15, 0)),
        ],
    )
}

#[test]
fn empty_store_loads_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);

    assert_eq!(repo.load().unwrap(), StoredLedger::default());
}

#[test]
fn save_then_load_reconstructs_ledger() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);
    let ledger = sample_ledger();

    repo.save(&ledger).unwrap();
    let loaded = repo.load().unwrap().into_ledger(Decimal::ZERO);

    assert_eq!(loaded, ledger);
}

#[test]
fn repeated_saves_write_identical_values() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);
    let ledger = sample_ledger();

    repo.save(&ledger).unwrap();
    let income_first = repo.get_entry(INCOME_KEY).unwrap();
    let expenses_first = repo.get_entry(EXPENSES_KEY).unwrap();

    repo.save(&ledger).unwrap();
    assert_eq!(repo.get_entry(INCOME_KEY).unwrap(), income_first);
    assert_eq!(repo.get_entry(EXPENSES_KEY).unwrap(), expenses_first);
    assert_eq!(income_first.as_deref(), Some("5250.75"));
}

#[test]
fn unchanged_values_are_not_rewritten() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);
    let ledger = sample_ledger();

    repo.save(&ledger).unwrap();
    conn.execute("UPDATE ledger_entries SET updated_at = 0;", [])
        .unwrap();
    repo.save(&ledger).unwrap();
    assert_eq!(updated_at(&conn, INCOME_KEY), 0);
    assert_eq!(updated_at(&conn, EXPENSES_KEY), 0);

    let mut changed = ledger.clone();
    changed.expenses.pop();
    repo.save(&changed).unwrap();
    assert_eq!(updated_at(&conn, INCOME_KEY), 0);
    assert!(updated_at(&conn, EXPENSES_KEY) > 0);
}

#[test]
fn save_overwrites_instead_of_appending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);

    repo.save(&sample_ledger()).unwrap();
    repo.save(&Ledger::default()).unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM ledger_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
    assert_eq!(repo.get_entry(EXPENSES_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn malformed_keys_fall_back_independently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);

    repo.put_entry(INCOME_KEY, "not a number").unwrap();
    repo.put_entry(EXPENSES_KEY, r#"[{"id":1,"description":"Tea","amount":"2"}]"#)
        .unwrap();
    let stored = repo.load().unwrap();
    assert_eq!(stored.income, None);
    assert_eq!(
        stored.expenses,
        Some(vec![Expense::new(ExpenseId(1), "Tea", Decimal::new(2, 0))])
    );

    repo.put_entry(INCOME_KEY, "4200").unwrap();
    repo.put_entry(EXPENSES_KEY, "{broken").unwrap();
    let stored = repo.load().unwrap();
    assert_eq!(stored.income, Some(Decimal::new(4200, 0)));
    assert_eq!(stored.expenses, None);
}

#[test]
fn legacy_payload_with_numeric_amounts_loads() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);
    let legacy = serde_json::json!([
        { "id": 1_699_999_999_000_i64, "description": "Groceries", "amount": 42.5 },
        { "id": 1_699_999_999_500_i64, "description": "Bus", "amount": 3 }
    ]);

    repo.put_entry(INCOME_KEY, "5000").unwrap();
    repo.put_entry(EXPENSES_KEY, &legacy.to_string()).unwrap();
    let ledger = repo.load().unwrap().into_ledger(Decimal::ZERO);

    assert_eq!(ledger.income, Decimal::new(5000, 0));
    assert_eq!(ledger.expenses.len(), 2);
    assert_eq!(ledger.expenses[0].amount, Decimal::new(425, 1));
    assert_eq!(ledger.expenses[1].description, "Bus");
}

#[test]
fn clear_removes_both_keys() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteLedgerRepository::new(&conn);

    repo.save(&sample_ledger()).unwrap();
    repo.clear().unwrap();

    assert_eq!(repo.load().unwrap(), StoredLedger::default());
}

#[test]
fn state_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite3");
    let ledger = sample_ledger();

    {
        let conn = open_db(&path).unwrap();
        SqliteLedgerRepository::new(&conn).save(&ledger).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let loaded = SqliteLedgerRepository::new(&conn)
        .load()
        .unwrap()
        .into_ledger(Decimal::ZERO);
    assert_eq!(loaded, ledger);
}

fn updated_at(conn: &rusqlite::Connection, key: &str) -> i64 {
    conn.query_row(
        "SELECT updated_at FROM ledger_entries WHERE key = ?1;",
        [key],
        |row| row.get(0),
    )
    .unwrap()
}
