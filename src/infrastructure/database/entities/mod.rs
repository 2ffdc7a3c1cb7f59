//! Database entities module

pub mod audit_log;
pub mod payment;
pub mod vehicle;

pub use audit_log::Entity as AuditLog;
pub use payment::Entity as Payment;
pub use vehicle::Entity as Vehicle;
