#![allow(dead_code)]

use std::{fs, path::PathBuf};

use budget_recorder::ledger::{
    CalendarDate, Interval, RecurrenceEnd, TransactionEntry, TransactionStore,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

pub fn date(day: u32, month: u32, year: i32) -> CalendarDate {
    CalendarDate::new(day, month, year).expect("valid test date")
}

/// Writes `json` as `database.json` inside a fresh temp dir.
pub fn write_database(json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("database.json");
    fs::write(&path, json).expect("write database fixture");
    (dir, path)
}

/// Salary on the first of each month, a bounded weekly rent share and one dinner.
pub fn sample_store() -> TransactionStore {
    let mut store = TransactionStore::default();
    store.add(
        TransactionEntry::new(Decimal::new(300000, 2), 9, 0, date(1, 1, 2024))
            .with_name("Salary")
            .with_recurrence(Interval::Monthly, RecurrenceEnd::Infinite),
    );
    store.add(
        TransactionEntry::new(Decimal::new(20000, 2), 4, 0, date(1, 1, 2024))
            .with_name("Rent share")
            .with_recurrence(Interval::Weekly, RecurrenceEnd::Until(date(20, 1, 2024))),
    );
    store.add(
        TransactionEntry::new(Decimal::new(4550, 2), 0, 1, date(15, 3, 2024))
            .with_name("Dinner")
            .with_location("Trattoria"),
    );
    store
}

pub const SAMPLE_DATABASE: &str = r#"{
  "jsonType": "database",
  "versionMajor": 1,
  "versionMinor": 0,
  "versionPatch": 0,
  "dataEntries": [
    {"money": "3000.00", "type": 9, "subtype": 0, "name": "Salary", "location": "",
     "date": [1, 1, 2024], "repeat": 3, "duration": true},
    {"money": "45.50", "type": 0, "subtype": 1, "name": "Dinner", "location": "Trattoria",
     "date": [15, 3, 2024], "repeat": 0}
  ]
}"#;
