//! Payment domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::errors::DomainError;

/// What the payment is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Mandatory third-party liability insurance, priced by the regulated table
    Soat,
    /// Technical-mechanical inspection, priced by the caller
    Inspection,
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soat" => Ok(Self::Soat),
            // "revision" is the legacy name of the inspection service
            "inspection" | "revision" => Ok(Self::Inspection),
            _ => Err(DomainError::UnrecognizedServiceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Soat => write!(f, "SOAT"),
            Self::Inspection => write!(f, "Inspection"),
        }
    }
}

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(Self::Pending),
            "approved" | "aprobado" | "completado" | "completed" => Ok(Self::Approved),
            "rejected" | "rechazado" => Ok(Self::Rejected),
            _ => Err(DomainError::Validation(format!(
                "Unknown payment status: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
        }
    }
}

/// How the payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    /// Colombian online bank transfer
    Pse,
    Cash,
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" | "tarjeta" | "tarjeta de crédito" | "credit card" => Ok(Self::Card),
            "pse" => Ok(Self::Pse),
            "cash" | "efectivo" => Ok(Self::Cash),
            _ => Err(DomainError::Validation(format!(
                "Unknown payment method: {}",
                s
            ))),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "Card"),
            Self::Pse => write!(f, "PSE"),
            Self::Cash => write!(f, "Cash"),
        }
    }
}

/// Input to the fee calculation
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub service_type: ServiceType,
    /// Used verbatim for non-regulated services, ignored for SOAT
    pub requested_amount: Option<Decimal>,
    /// Required for SOAT
    pub vehicle_id: Option<i32>,
}

/// Persisted payment
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub service_type: ServiceType,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub paid_at: DateTime<Utc>,
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payment-creation input
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub request: PaymentRequest,
    pub payment_method: PaymentMethod,
    pub status: Option<PaymentStatus>,
    pub paid_at: Option<DateTime<Utc>>,
    pub appointment_id: Option<i32>,
    pub user_id: Option<i32>,
}

/// Partial update of a stored payment
#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub service_type: Option<ServiceType>,
    pub amount: Option<Decimal>,
    pub status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub paid_at: Option<DateTime<Utc>>,
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub user_id: Option<i32>,
}

/// List filter; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub service_type: Option<ServiceType>,
    pub status: Option<PaymentStatus>,
    pub vehicle_id: Option<i32>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        self.service_type.map_or(true, |t| t == payment.service_type)
            && self.status.map_or(true, |s| s == payment.status)
            && self.vehicle_id.map_or(true, |id| payment.vehicle_id == Some(id))
    }
}
