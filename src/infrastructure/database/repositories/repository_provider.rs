//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{AuditLogRepository, PaymentRepository, RepositoryProvider, VehicleRepository};

use super::audit_log_repository::SeaOrmAuditLogRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let vehicle = repos.vehicles().find_by_plate("ABC123").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    payments: SeaOrmPaymentRepository,
    audit_log: SeaOrmAuditLogRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            audit_log: SeaOrmAuditLogRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn audit_log(&self) -> &dyn AuditLogRepository {
        &self.audit_log
    }
}
