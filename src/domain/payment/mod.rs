//! Payment aggregate
//!
//! Contains the Payment entity, the SOAT fee table and the
//! payment store interface.

pub mod fee;
pub mod model;
pub mod repository;

pub use fee::{compute_amount, soat_rate, FeeCalculator};
pub use model::{
    NewPayment, Payment, PaymentFilter, PaymentMethod, PaymentPatch, PaymentRequest,
    PaymentStatus, ServiceType,
};
pub use repository::PaymentRepository;
