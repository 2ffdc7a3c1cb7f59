//! Application layer - use-case services over the repository provider

mod audit;
pub mod payments;
pub mod vehicles;

pub use payments::PaymentService;
pub use vehicles::VehicleService;
