//! Domain layer: vehicles, payments with the SOAT fee table, and the audit trail.

pub mod audit;
pub mod payment;
pub mod repositories;
pub mod vehicle;

// Re-export commonly used types
pub use audit::{AuditEntry, AuditLogRepository, NewAuditEntry};
pub use payment::{
    compute_amount, soat_rate, FeeCalculator, NewPayment, Payment, PaymentFilter, PaymentMethod,
    PaymentPatch, PaymentRepository, PaymentRequest, PaymentStatus, ServiceType,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use vehicle::{NewVehicle, Vehicle, VehicleCategory, VehiclePatch, VehicleRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
