mod service;

pub use service::VehicleService;
