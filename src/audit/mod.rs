//! Audit logging for the finance tracker
//!
//! Records every create, update, delete and import in an append-only JSONL
//! log next to the data directory.
//!
//! - `AuditEntry`: one operation with its entity state before and after
//! - `AuditLogger`: appends entries to the log and reads them back
//! - `diff_entities`: a short summary of which fields changed

mod diff;
mod entry;
mod logger;

pub use diff::{diff_entities, generate_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
