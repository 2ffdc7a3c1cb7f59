mod service;

pub use service::PaymentService;
