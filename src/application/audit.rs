use tracing::warn;

use crate::domain::{NewAuditEntry, RepositoryProvider};

/// Writes an audit entry. Failures are logged and swallowed; the audited
/// operation has already succeeded by the time this runs.
pub(crate) async fn record(
    repos: &dyn RepositoryProvider,
    host: &str,
    service: &str,
    content: String,
) {
    let entry = NewAuditEntry {
        host: host.to_string(),
        service: service.to_string(),
        content,
    };
    if let Err(e) = repos.audit_log().record(entry).await {
        warn!(service, error = %e, "Failed to write audit entry");
    }
}
