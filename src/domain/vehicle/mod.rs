//! Vehicle aggregate
//!
//! The vehicle registry the payment workflow reads category and
//! engine displacement from.

pub mod dto;
pub mod model;
pub mod repository;

pub use dto::{NewVehicle, VehiclePatch};
pub use model::{Vehicle, VehicleCategory};
pub use repository::VehicleRepository;
