use async_trait::async_trait;

use super::{AuditEntry, NewAuditEntry};
use crate::domain::DomainResult;

/// Sink for audit records
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn record(&self, entry: NewAuditEntry) -> DomainResult<AuditEntry>;
}
