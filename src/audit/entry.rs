//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that can be audited
///
/// Expenses are never edited in place, so only creation and deletion exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was appended to the collection
    Create,
    /// Expense was removed from the collection
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected expense (empty if it never had one)
    pub entity_id: String,

    /// The expense description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Persisted record before the operation (deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Persisted record after the operation (creates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create an entry recording that an expense was added
    pub fn create(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_id: id_string(expense),
            entity_name: Some(expense.description().to_string()),
            before: None,
            after: serde_json::to_value(expense).ok(),
        }
    }

    /// Create an entry recording that an expense was removed
    pub fn delete(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_id: id_string(expense),
            entity_name: Some(expense.description().to_string()),
            before: serde_json::to_value(expense).ok(),
            after: None,
        }
    }

    /// One-line summary for terminal output
    pub fn summary(&self) -> String {
        format!(
            "{} {} expense {}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.entity_id,
            self.entity_name
                .as_ref()
                .map(|n| format!(" ({})", n))
                .unwrap_or_default()
        )
    }
}

fn id_string(expense: &Expense) -> String {
    expense.id().map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;

    fn sample() -> Expense {
        Expense::new(9.9, "Padaria", 1)
            .unwrap()
            .with_id(ExpenseId::new(3))
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(&sample());
        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_id, "3");
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["descricao"], "Padaria");
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&sample());
        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_summary() {
        let entry = AuditEntry::delete(&sample());
        let summary = entry.summary();
        assert!(summary.contains("DELETE expense 3 (Padaria)"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::create(&sample());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"operation\":\"create\""));
        assert!(!json.contains("\"before\""));
    }
}
