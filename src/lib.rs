//! # Vehicle Inspection Service
//!
//! Backend fragment of a vehicle-inspection and appointment system: the
//! regulated SOAT fee table, the payment workflow that uses it, and the
//! vehicle registry it prices from.
//!
//! ## Architecture
//!
//! - **domain**: entities, the fee calculator and repository traits
//! - **application**: payment and vehicle use-case services
//! - **infrastructure**: SeaORM persistence and an in-memory provider
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, pagination, validation helpers, shutdown signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::create_api_router;
