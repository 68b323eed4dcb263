//! Audit logging for gastos
//!
//! Every expense the store creates or deletes is appended to `audit.log` as
//! one JSON line (JSONL), so deletions stay recoverable by hand even though
//! the data file itself is rewritten wholesale.
//!
//! # Example
//!
//! ```rust,ignore
//! use gastos::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&expense))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
