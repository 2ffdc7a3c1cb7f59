//! SeaORM implementation of AuditLogRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, Set};

use super::db_err;
use crate::domain::audit::{AuditEntry, AuditLogRepository, NewAuditEntry};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::audit_log;

pub struct SeaOrmAuditLogRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuditLogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditLogRepository for SeaOrmAuditLogRepository {
    async fn record(&self, entry: NewAuditEntry) -> DomainResult<AuditEntry> {
        let model = audit_log::ActiveModel {
            id: NotSet,
            date: Set(Utc::now()),
            host: Set(entry.host),
            service: Set(entry.service),
            content: Set(entry.content),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        Ok(AuditEntry {
            id: result.id,
            date: result.date,
            host: result.host,
            service: result.service,
            content: result.content,
        })
    }
}
