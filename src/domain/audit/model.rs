use chrono::{DateTime, Utc};

/// Persisted audit record
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i32,
    pub date: DateTime<Utc>,
    pub host: String,
    /// Name of the service that produced the entry, e.g. `PaymentService`
    pub service: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub host: String,
    pub service: String,
    pub content: String,
}
