//! Audit trail aggregate

pub mod model;
pub mod repository;

pub use model::{AuditEntry, NewAuditEntry};
pub use repository::AuditLogRepository;
