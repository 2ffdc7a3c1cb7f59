//! In-memory repository provider for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    AuditEntry, AuditLogRepository, DomainError, DomainResult, NewAuditEntry, NewVehicle,
    Payment, PaymentFilter, PaymentRepository, RepositoryProvider, Vehicle, VehicleRepository,
};
use crate::shared::PaginatedResult;

/// Vehicles, payments and audit entries kept in `DashMap`s
pub struct InMemoryRepositoryProvider {
    vehicles: InMemoryVehicleRepository,
    payments: InMemoryPaymentRepository,
    audit_log: InMemoryAuditLogRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            vehicles: InMemoryVehicleRepository::default(),
            payments: InMemoryPaymentRepository::default(),
            audit_log: InMemoryAuditLogRepository::default(),
        }
    }

    /// Audit entries recorded so far, oldest first
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        let mut entries: Vec<AuditEntry> = self
            .audit_log
            .entries
            .iter()
            .map(|e| e.value().clone())
            .collect();
        entries.sort_by_key(|e| e.id);
        entries
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

// ── Vehicles ────────────────────────────────────────────────────

struct InMemoryVehicleRepository {
    vehicles: DashMap<i32, Vehicle>,
    counter: AtomicI32,
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self {
            vehicles: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self
            .vehicles
            .iter()
            .find(|v| v.plate == plate)
            .map(|v| v.value().clone()))
    }

    async fn list_active(&self) -> DomainResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| v.is_active)
            .map(|v| v.value().clone())
            .collect();
        vehicles.sort_by(|a, b| a.plate.cmp(&b.plate));
        Ok(vehicles)
    }

    async fn save(&self, vehicle: NewVehicle) -> DomainResult<Vehicle> {
        if self.vehicles.iter().any(|v| v.plate == vehicle.plate) {
            return Err(DomainError::Conflict(format!(
                "Vehicle with plate {} already exists",
                vehicle.plate
            )));
        }

        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let stored = Vehicle {
            id,
            plate: vehicle.plate,
            brand: vehicle.brand,
            model: vehicle.model,
            category: vehicle.category,
            engine_displacement_cc: vehicle.engine_displacement_cc,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.vehicles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<Vehicle> {
        let Some(mut entry) = self.vehicles.get_mut(&vehicle.id) else {
            return Err(DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: vehicle.id.to_string(),
            });
        };
        let updated = Vehicle {
            created_at: entry.created_at,
            updated_at: Utc::now(),
            ..vehicle
        };
        *entry = updated.clone();
        Ok(updated)
    }
}

// ── Payments ────────────────────────────────────────────────────

struct InMemoryPaymentRepository {
    payments: DashMap<i32, Payment>,
    counter: AtomicI32,
}

impl Default for InMemoryPaymentRepository {
    fn default() -> Self {
        Self {
            payments: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        Ok(self.payments.get(&id).map(|p| p.clone()))
    }

    async fn list(
        &self,
        filter: PaymentFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<Payment>> {
        let mut matching: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| filter.matches(p.value()))
            .map(|p| p.value().clone())
            .collect();
        // newest first; ids break ties between payments created in the same instant
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let offset = (page.saturating_sub(1) as usize) * limit as usize;
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect();

        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn save(&self, payment: Payment) -> DomainResult<Payment> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let stored = Payment {
            id,
            created_at: now,
            updated_at: now,
            ..payment
        };
        self.payments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, payment: Payment) -> DomainResult<Payment> {
        let Some(mut entry) = self.payments.get_mut(&payment.id) else {
            return Err(DomainError::NotFound {
                entity: "Payment",
                field: "id",
                value: payment.id.to_string(),
            });
        };
        let updated = Payment {
            created_at: entry.created_at,
            updated_at: Utc::now(),
            ..payment
        };
        *entry = updated.clone();
        Ok(updated)
    }
}

// ── Audit log ───────────────────────────────────────────────────

struct InMemoryAuditLogRepository {
    entries: DashMap<i32, AuditEntry>,
    counter: AtomicI32,
}

impl Default for InMemoryAuditLogRepository {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn record(&self, entry: NewAuditEntry) -> DomainResult<AuditEntry> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        let stored = AuditEntry {
            id,
            date: Utc::now(),
            host: entry.host,
            service: entry.service,
            content: entry.content,
        };
        self.entries.insert(id, stored.clone());
        Ok(stored)
    }
}
