//! Payment DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    NewPayment, Payment, PaymentFilter, PaymentMethod, PaymentPatch, PaymentRequest,
    PaymentStatus, ServiceType,
};
use crate::shared::errors::DomainError;

fn parse_opt<T>(value: Option<&str>) -> Result<Option<T>, DomainError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    value.map(|s| s.parse::<T>()).transpose()
}

/// Payment as returned by the API. Amounts are decimal strings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i32,
    /// `SOAT` or `Inspection`
    pub service_type: String,
    #[schema(value_type = String, example = "243700")]
    pub amount: Decimal,
    pub status: String,
    pub payment_method: String,
    pub paid_at: DateTime<Utc>,
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            service_type: p.service_type.to_string(),
            amount: p.amount,
            status: p.status.to_string(),
            payment_method: p.payment_method.to_string(),
            paid_at: p.paid_at,
            vehicle_id: p.vehicle_id,
            appointment_id: p.appointment_id,
            user_id: p.user_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    /// `SOAT`, `Inspection` (legacy alias `revision`)
    #[validate(length(min = 1, max = 32, message = "service_type is required"))]
    pub service_type: String,
    /// Required for non-SOAT services, ignored for SOAT
    #[schema(value_type = Option<String>, example = "75000")]
    pub amount: Option<Decimal>,
    /// Required for SOAT
    #[validate(range(min = 1, message = "vehicle_id must be positive"))]
    pub vehicle_id: Option<i32>,
    /// `Card`, `PSE`, `Cash`
    #[validate(length(min = 1, max = 32, message = "payment_method is required"))]
    pub payment_method: String,
    /// Defaults to `Pending`
    pub status: Option<String>,
    /// Defaults to now
    pub paid_at: Option<DateTime<Utc>>,
    pub appointment_id: Option<i32>,
    pub user_id: Option<i32>,
}

impl CreatePaymentRequest {
    pub fn into_domain(self) -> Result<NewPayment, DomainError> {
        Ok(NewPayment {
            request: PaymentRequest {
                service_type: self.service_type.parse()?,
                requested_amount: self.amount,
                vehicle_id: self.vehicle_id,
            },
            payment_method: self.payment_method.parse()?,
            status: parse_opt(self.status.as_deref())?,
            paid_at: self.paid_at,
            appointment_id: self.appointment_id,
            user_id: self.user_id,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 32, message = "service_type is required"))]
    pub service_type: String,
    #[schema(value_type = Option<String>, example = "75000")]
    pub amount: Option<Decimal>,
    #[validate(range(min = 1, message = "vehicle_id must be positive"))]
    pub vehicle_id: Option<i32>,
}

impl QuoteRequest {
    pub fn into_domain(self) -> Result<PaymentRequest, DomainError> {
        Ok(PaymentRequest {
            service_type: self.service_type.parse()?,
            requested_amount: self.amount,
            vehicle_id: self.vehicle_id,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub service_type: String,
    #[schema(value_type = String, example = "326600")]
    pub amount: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentRequest {
    #[validate(length(min = 1, max = 32))]
    pub service_type: Option<String>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "vehicle_id must be positive"))]
    pub vehicle_id: Option<i32>,
    pub appointment_id: Option<i32>,
    pub user_id: Option<i32>,
}

impl UpdatePaymentRequest {
    pub fn into_domain(self) -> Result<PaymentPatch, DomainError> {
        Ok(PaymentPatch {
            service_type: parse_opt::<ServiceType>(self.service_type.as_deref())?,
            amount: self.amount,
            status: parse_opt::<PaymentStatus>(self.status.as_deref())?,
            payment_method: parse_opt::<PaymentMethod>(self.payment_method.as_deref())?,
            paid_at: self.paid_at,
            vehicle_id: self.vehicle_id,
            appointment_id: self.appointment_id,
            user_id: self.user_id,
        })
    }
}

/// Query string for `GET /api/v1/payments`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentListQuery {
    /// 1-based, default 1
    pub page: Option<u32>,
    /// 1..=100, default 20
    pub limit: Option<u32>,
    pub service_type: Option<String>,
    pub status: Option<String>,
    pub vehicle_id: Option<i32>,
}

impl PaymentListQuery {
    pub fn filter(&self) -> Result<PaymentFilter, DomainError> {
        Ok(PaymentFilter {
            service_type: parse_opt(self.service_type.as_deref())?,
            status: parse_opt(self.status.as_deref())?,
            vehicle_id: self.vehicle_id,
        })
    }
}
