//! Expense repository for JSON storage
//!
//! The whole collection lives in one file holding a JSON array of expense
//! records. Every operation loads the full array and rewrites the full
//! file; there is no index, no partial update and no locking, so only one
//! process may use a given file at a time.
//!
//! # Corruption
//!
//! Loading is all or nothing. Invalid JSON, a top level that is not an
//! array, or a single record that fails to decode (a negative or oversized
//! `valor`, a fractional `id`, a missing field) makes the whole file count as
//! corrupt. It is then overwritten with `[]`, which discards every record in
//! it, including the ones that were readable. The audit log is the only
//! remaining copy.

use std::path::PathBuf;

use serde_json::Value;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{GastosError, GastosResult};
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_text, write_json_atomic};

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    audit: Option<AuditLogger>,
}

impl ExpenseRepository {
    /// Create a repository over the given file
    ///
    /// Nothing is read or created until the first operation.
    pub fn new(path: PathBuf) -> Self {
        Self { path, audit: None }
    }

    /// Record creates and deletes in an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load every stored expense, in file order
    ///
    /// A missing or blank file is an empty collection and is left untouched.
    pub fn load_all(&self) -> GastosResult<Vec<Expense>> {
        let contents = match read_text(&self.path)? {
            Some(contents) if !contents.trim().is_empty() => contents,
            _ => return Ok(Vec::new()),
        };

        match decode_collection(&contents) {
            Ok(expenses) => Ok(expenses),
            Err(reason) => {
                // DATA LOSS: unreadable contents are discarded, not reported.
                // The file is reset to an empty array so the next write starts
                // from a clean state. Callers only ever see an empty list.
                tracing::warn!(
                    path = %self.path.display(),
                    %reason,
                    "expense file is corrupt, resetting it to an empty collection"
                );
                self.save_all(&[])?;
                Ok(Vec::new())
            }
        }
    }

    /// Append an expense, assigning the next id if it has none
    ///
    /// The next id is one more than the largest stored id, or 1 for an empty
    /// collection. Returns the expense as stored.
    pub fn append(&self, expense: Expense) -> GastosResult<Expense> {
        let mut expenses = self.load_all()?;

        let expense = match expense.id() {
            Some(id) if expenses.iter().any(|e| e.id() == Some(id)) => {
                return Err(GastosError::Duplicate {
                    entity_type: "Expense",
                    identifier: id.to_string(),
                });
            }
            Some(_) => expense,
            None => {
                let id = next_id(&expenses)?;
                expense.with_id(id)
            }
        };

        expenses.push(expense.clone());
        self.save_all(&expenses)?;
        self.audit(&[AuditEntry::create(&expense)]);

        tracing::debug!(id = ?expense.id(), "expense appended");
        Ok(expense)
    }

    /// Delete the expense with the given id
    ///
    /// Returns whether anything was removed. The file is rewritten either way.
    pub fn delete_by_id(&self, id: ExpenseId) -> GastosResult<bool> {
        let expenses = self.load_all()?;
        let (removed, kept): (Vec<Expense>, Vec<Expense>) =
            expenses.into_iter().partition(|e| e.id() == Some(id));

        self.save_all(&kept)?;

        let entries: Vec<_> = removed.iter().map(AuditEntry::delete).collect();
        self.audit(&entries);

        tracing::debug!(%id, removed = removed.len(), "delete by id");
        Ok(!removed.is_empty())
    }

    /// Delete every expense, returning how many there were
    pub fn delete_all(&self) -> GastosResult<usize> {
        let expenses = self.load_all()?;
        self.save_all(&[])?;

        let entries: Vec<_> = expenses.iter().map(AuditEntry::delete).collect();
        self.audit(&entries);

        tracing::debug!(count = expenses.len(), "deleted all expenses");
        Ok(expenses.len())
    }

    /// Get a single expense by id
    pub fn get(&self, id: ExpenseId) -> GastosResult<Option<Expense>> {
        Ok(self.load_all()?.into_iter().find(|e| e.id() == Some(id)))
    }

    /// Count stored expenses
    pub fn count(&self) -> GastosResult<usize> {
        Ok(self.load_all()?.len())
    }

    /// Write the empty collection if the file doesn't exist yet
    pub fn ensure_file(&self) -> GastosResult<()> {
        if !self.path.exists() {
            self.save_all(&[])?;
        }
        Ok(())
    }

    fn save_all(&self, expenses: &[Expense]) -> GastosResult<()> {
        write_json_atomic(&self.path, expenses)
    }

    // Runs after the data write; failures are only logged.
    fn audit(&self, entries: &[AuditEntry]) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log_batch(entries) {
                tracing::warn!(error = %e, "failed to write audit log");
            }
        }
    }
}

/// One more than the largest id in the collection, or the first id
fn next_id(expenses: &[Expense]) -> GastosResult<ExpenseId> {
    match expenses.iter().filter_map(Expense::id).max() {
        None => Ok(ExpenseId::FIRST),
        Some(max) => max.next().ok_or_else(|| {
            GastosError::Validation(format!("No expense id available after {}", max))
        }),
    }
}

fn decode_collection(contents: &str) -> Result<Vec<Expense>, String> {
    let value: Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;

    let records = value
        .as_array()
        .ok_or_else(|| "top-level value is not an array".to_string())?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Expense::from_json(record).map_err(|e| format!("record {}: {}", index, e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_AMOUNT;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gastos.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(amount: f64, description: &str, category: i64) -> Expense {
        Expense::new(amount, description, category).unwrap()
    }

    #[test]
    fn test_empty_load_creates_no_file() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.load_all().unwrap().is_empty());
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_blank_file_is_empty_collection() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(repo.path(), "  \n").unwrap();

        assert!(repo.load_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "  \n");
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let (_temp_dir, repo) = create_test_repo();

        let first = repo.append(expense(10.0, "Mercado", 1)).unwrap();
        let second = repo.append(expense(20.0, "Cinema", 2)).unwrap();

        assert_eq!(first.id(), Some(ExpenseId::new(1)));
        assert_eq!(second.id(), Some(ExpenseId::new(2)));
        assert_eq!(repo.load_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_temp_dir, repo) = create_test_repo();

        repo.append(expense(1.0, "a", 1)).unwrap();
        repo.append(expense(2.0, "b", 1)).unwrap();
        assert!(repo.delete_by_id(ExpenseId::new(1)).unwrap());

        let third = repo.append(expense(3.0, "c", 1)).unwrap();
        assert_eq!(third.id(), Some(ExpenseId::new(3)));
    }

    #[test]
    fn test_append_keeps_supplied_id() {
        let (_temp_dir, repo) = create_test_repo();

        let stored = repo
            .append(expense(5.0, "Importado", 5).with_id(ExpenseId::new(40)))
            .unwrap();
        assert_eq!(stored.id(), Some(ExpenseId::new(40)));

        let next = repo.append(expense(1.0, "Seguinte", 5)).unwrap();
        assert_eq!(next.id(), Some(ExpenseId::new(41)));
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(expense(5.0, "a", 1)).unwrap();

        let err = repo
            .append(expense(6.0, "b", 1).with_id(ExpenseId::new(1)))
            .unwrap_err();
        assert!(matches!(err, GastosError::Duplicate { .. }));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_missing_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(expense(1.0, "a", 1)).unwrap();
        repo.append(expense(2.0, "b", 2)).unwrap();
        let before = repo.load_all().unwrap();

        assert!(!repo.delete_by_id(ExpenseId::new(99)).unwrap());
        assert_eq!(repo.load_all().unwrap(), before);
    }

    #[test]
    fn test_delete_existing_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(expense(1.0, "a", 1)).unwrap();
        repo.append(expense(2.0, "b", 2)).unwrap();

        assert!(repo.delete_by_id(ExpenseId::new(2)).unwrap());
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get(ExpenseId::new(2)).unwrap().is_none());
        assert!(repo.get(ExpenseId::new(1)).unwrap().is_some());
    }

    #[test]
    fn test_delete_all() {
        let (_temp_dir, repo) = create_test_repo();
        for i in 0..3 {
            repo.append(expense(i as f64, "x", 1)).unwrap();
        }

        assert_eq!(repo.delete_all().unwrap(), 3);
        let contents = fs::read_to_string(repo.path()).unwrap();
        let value: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value, Value::Array(vec![]));

        assert_eq!(repo.delete_all().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_file_is_reset() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(repo.path(), "{ this is not json").unwrap();

        assert!(repo.load_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "[]");
    }

    #[test]
    fn test_non_array_and_bad_records_are_reset() {
        let (_temp_dir, repo) = create_test_repo();

        fs::write(repo.path(), r#"{"valor": 1}"#).unwrap();
        assert!(repo.load_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "[]");

        fs::write(repo.path(), r#"[{"descricao": "sem valor"}]"#).unwrap();
        assert!(repo.load_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "[]");
    }

    #[test]
    fn test_one_bad_record_resets_whole_file() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(
            repo.path(),
            r#"[{"id": 1, "valor": 10.0, "descricao": "ok", "categoria": 1},
                {"id": 2, "valor": -3.0, "descricao": "ruim", "categoria": 1}]"#,
        )
        .unwrap();

        assert!(repo.load_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "[]");
    }

    #[test]
    fn test_large_amounts_survive_reload() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(expense(10.0, "a", 1)).unwrap();
        repo.append(expense(20.0, "b", 1)).unwrap();

        let amount = crate::validation::validate_amount("10000000000000").unwrap();
        repo.append(expense(amount, "Casa", 4)).unwrap();
        assert!(crate::validation::validate_amount("1e307").is_err());

        let expenses = repo.load_all().unwrap();
        assert_eq!(expenses.len(), 3);
        assert_eq!(expenses[2].amount(), MAX_AMOUNT);
        assert!(!fs::read_to_string(repo.path()).unwrap().contains("null"));
    }

    #[test]
    fn test_append_after_max_id_is_an_error() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(
            repo.path(),
            r#"[{"id": 18446744073709551615, "valor": 1.0, "descricao": "fim", "categoria": 5}]"#,
        )
        .unwrap();

        let err = repo.append(expense(2.0, "depois", 5)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let (temp_dir, _repo) = create_test_repo();
        let not_a_dir = temp_dir.path().join("arquivo");
        fs::write(&not_a_dir, "x").unwrap();
        let repo = ExpenseRepository::new(not_a_dir.join("gastos.json"));

        let err = repo.append(expense(1.0, "a", 1)).unwrap_err();
        assert!(err.is_io());
        assert!(!err.is_validation());

        let err = repo.delete_all().unwrap_err();
        assert!(err.is_io());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_file_layout() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(expense(12.346, "  Café  ", 1)).unwrap();

        let contents = fs::read_to_string(repo.path()).unwrap();
        let value: Value = serde_json::from_str(&contents).unwrap();
        let record = &value[0];

        assert_eq!(record["id"], 1);
        assert_eq!(record["valor"], 12.35);
        assert_eq!(record["descricao"], "Café");
        assert_eq!(record["categoria"], 1);
        assert_eq!(record["data"].as_str().unwrap().len(), 19);
        assert!(contents.contains("Café"));
    }

    #[test]
    fn test_reads_hand_written_file() {
        let (_temp_dir, repo) = create_test_repo();
        fs::write(
            repo.path(),
            r#"[{"id": 7, "valor": "3.50", "descricao": "Pão", "categoria": 1, "data": "2025-01-02T08:00:00"}]"#,
        )
        .unwrap();

        let expenses = repo.load_all().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id(), Some(ExpenseId::new(7)));
        assert_eq!(expenses[0].amount(), 3.5);
    }

    #[test]
    fn test_audit_records_creates_and_deletes() {
        let (temp_dir, repo) = create_test_repo();
        let log_path = temp_dir.path().join("audit.log");
        let repo = repo.with_audit(AuditLogger::new(log_path.clone()));

        repo.append(expense(1.0, "a", 1)).unwrap();
        repo.append(expense(2.0, "b", 1)).unwrap();
        repo.delete_by_id(ExpenseId::new(1)).unwrap();
        repo.delete_all().unwrap();

        let entries = AuditLogger::new(log_path).read_all().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[2].entity_id, "1");
        assert_eq!(entries[3].entity_id, "2");
    }
}
