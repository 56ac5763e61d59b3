//! Expense repository for JSON storage
//!
//! Manages loading and saving the whole expense collection to expenses.json.
//! Nothing is cached between calls: every `load` reads the file again and
//! every `save` rewrites it completely.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::TrackerError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json_value, write_json_atomic};

/// Schema version written to new data files
pub const STORE_VERSION: u64 = 1;

/// The full persisted document: a version marker and every expense in
/// insertion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseStore {
    pub version: u64,
    pub expenses: Vec<Expense>,
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            expenses: Vec::new(),
        }
    }
}

impl ExpenseStore {
    /// Parse an untyped document, checking the top-level shape and every record
    pub fn from_value(value: Value) -> Result<Self, TrackerError> {
        let Value::Object(mut doc) = value else {
            return Err(TrackerError::InvalidSchema(
                "top-level value must be an object".into(),
            ));
        };

        let version = parse_version(&doc)?;

        let records = match doc.remove("expenses") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(TrackerError::InvalidSchema(
                    "`expenses` must be an array".into(),
                ))
            }
            None => {
                return Err(TrackerError::InvalidSchema(
                    "missing `expenses` field".into(),
                ))
            }
        };

        let mut seen = HashSet::new();
        let mut expenses = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let expense = Expense::from_value(record).map_err(|e| {
                TrackerError::InvalidSchema(format!("expense #{}: {}", index + 1, e))
            })?;
            if !seen.insert(expense.id.clone()) {
                return Err(TrackerError::InvalidSchema(format!(
                    "expense #{}: duplicate id {}",
                    index + 1,
                    expense.id
                )));
            }
            expenses.push(expense);
        }

        Ok(Self { version, expenses })
    }

    /// Position of an expense in insertion order
    pub fn position(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| &e.id == id)
    }

    /// Next free id for an expense dated `date`
    pub fn next_id(&self, date: chrono::NaiveDate) -> Result<ExpenseId, TrackerError> {
        ExpenseId::generate(self.expenses.iter().map(|e| &e.id), date)
    }
}

fn parse_version(doc: &Map<String, Value>) -> Result<u64, TrackerError> {
    match doc.get("version") {
        Some(v) => v.as_u64().ok_or_else(|| {
            TrackerError::InvalidSchema("`version` must be a non-negative integer".into())
        }),
        None => Err(TrackerError::InvalidSchema("missing `version` field".into())),
    }
}

/// Repository for the expense data file
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    path: PathBuf,
}

impl ExpenseRepository {
    /// Create a new expense repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole store
    ///
    /// A missing file is created with an empty store, which is returned.
    pub fn load(&self) -> Result<ExpenseStore, TrackerError> {
        if !self.path.exists() {
            let store = ExpenseStore::default();
            self.save(&store)?;
            return Ok(store);
        }

        ExpenseStore::from_value(read_json_value(&self.path)?)
    }

    /// Overwrite the backing file with `store`
    pub fn save(&self, store: &ExpenseStore) -> Result<(), TrackerError> {
        write_json_atomic(&self.path, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(id: &str, day: u32, amount: f64) -> Expense {
        Expense::new(
            id.into(),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            "food",
            amount,
            "BDT",
            "",
        )
    }

    #[test]
    fn test_first_load_creates_default_file() {
        let (_temp_dir, repo) = create_test_repo();

        let store = repo.load().unwrap();
        assert_eq!(store, ExpenseStore::default());
        assert!(repo.path().exists());

        let text = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(text, "{\n  \"version\": 1,\n  \"expenses\": []\n}\n");
    }

    #[test]
    fn test_save_and_reload_keeps_order() {
        let (_temp_dir, repo) = create_test_repo();

        let mut store = repo.load().unwrap();
        store.expenses.push(expense("EXP-20240105-0001", 5, 10.0));
        store.expenses.push(expense("EXP-20240101-0001", 1, 20.0));
        repo.save(&store).unwrap();

        let reloaded = repo.load().unwrap();
        assert_eq!(reloaded, store);
        assert_eq!(reloaded.expenses[0].id.as_str(), "EXP-20240105-0001");
    }

    #[test]
    fn test_save_of_load_is_noop() {
        let (_temp_dir, repo) = create_test_repo();

        let mut store = repo.load().unwrap();
        store.expenses.push(expense("EXP-20240101-0001", 1, 12.5));
        repo.save(&store).unwrap();
        let before = fs::read_to_string(repo.path()).unwrap();

        repo.save(&repo.load().unwrap()).unwrap();
        let after = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_corrupted_file() {
        let (_temp_dir, repo) = create_test_repo();
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        fs::write(repo.path(), "{ not json").unwrap();

        assert!(matches!(repo.load(), Err(TrackerError::Corrupted(_))));
    }

    #[test]
    fn test_missing_top_level_fields() {
        let (_temp_dir, repo) = create_test_repo();
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();

        for doc in [r#"{"expenses": []}"#, r#"{"version": 1}"#, "[]", r#"{"version": 1, "expenses": {}}"#] {
            fs::write(repo.path(), doc).unwrap();
            assert!(
                matches!(repo.load(), Err(TrackerError::InvalidSchema(_))),
                "document {}",
                doc
            );
        }
    }

    #[test]
    fn test_bad_record_names_its_position() {
        let (_temp_dir, repo) = create_test_repo();
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        fs::write(
            repo.path(),
            r#"{"version": 1, "expenses": [{"id": "EXP-20240101-0001"}]}"#,
        )
        .unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, TrackerError::InvalidSchema(_)));
        assert!(err.to_string().contains("expense #1"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let store = ExpenseStore {
            version: 1,
            expenses: vec![
                expense("EXP-20240101-0001", 1, 1.0),
                expense("EXP-20240101-0001", 1, 2.0),
            ],
        };
        let value = serde_json::to_value(&store).unwrap();

        let err = ExpenseStore::from_value(value).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn test_next_id() {
        let store = ExpenseStore {
            version: 1,
            expenses: vec![
                expense("EXP-20240101-0002", 1, 1.0),
                expense("EXP-20240102-0001", 2, 1.0),
            ],
        };

        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(store.next_id(date).unwrap().as_str(), "EXP-20240101-0003");
    }
}
