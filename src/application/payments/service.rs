//! Payment creation and maintenance

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::application::audit;
use crate::domain::{
    compute_amount, DomainResult, FeeCalculator, NewPayment, Payment, PaymentFilter,
    PaymentPatch, PaymentRequest, RepositoryProvider, ServiceType,
};
use crate::shared::errors::DomainError;
use crate::shared::PaginatedResult;

const AUDIT_SERVICE: &str = "PaymentService";

/// Service for payment operations
pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
    host: String,
}

impl PaymentService {
    /// `host` is recorded on every audit entry this service writes.
    pub fn new(repos: Arc<dyn RepositoryProvider>, host: impl Into<String>) -> Self {
        Self {
            repos,
            host: host.into(),
        }
    }

    /// Amount a request would be charged. Nothing is persisted.
    pub async fn quote(&self, request: &PaymentRequest) -> DomainResult<Decimal> {
        FeeCalculator::new(self.repos.vehicles())
            .compute(request)
            .await
    }

    pub async fn create_payment(&self, new: NewPayment) -> DomainResult<Payment> {
        let amount = self.quote(&new.request).await?;

        let now = Utc::now();
        let payment = Payment {
            id: 0,
            service_type: new.request.service_type,
            amount,
            status: new.status.unwrap_or_default(),
            payment_method: new.payment_method,
            paid_at: new.paid_at.unwrap_or(now),
            vehicle_id: new.request.vehicle_id,
            appointment_id: new.appointment_id,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };

        let saved = self.repos.payments().save(payment).await?;

        counter!("payments_created_total", "service_type" => saved.service_type.to_string())
            .increment(1);
        info!(
            payment_id = saved.id,
            service_type = %saved.service_type,
            amount = %saved.amount,
            vehicle_id = ?saved.vehicle_id,
            "Payment created"
        );

        audit::record(
            self.repos.as_ref(),
            &self.host,
            AUDIT_SERVICE,
            format!(
                "Payment {} created: {} {} via {}",
                saved.id, saved.service_type, saved.amount, saved.payment_method
            ),
        )
        .await;

        Ok(saved)
    }

    pub async fn update_payment(&self, id: i32, patch: PaymentPatch) -> DomainResult<Payment> {
        let mut payment = self.require(id).await?;
        let previous_type = payment.service_type;

        let reprice =
            patch.service_type.is_some() || patch.vehicle_id.is_some() || patch.amount.is_some();

        if let Some(service_type) = patch.service_type {
            payment.service_type = service_type;
        }
        if let Some(status) = patch.status {
            payment.status = status;
        }
        if let Some(method) = patch.payment_method {
            payment.payment_method = method;
        }
        if let Some(paid_at) = patch.paid_at {
            payment.paid_at = paid_at;
        }
        if let Some(vehicle_id) = patch.vehicle_id {
            payment.vehicle_id = Some(vehicle_id);
        }
        if let Some(appointment_id) = patch.appointment_id {
            payment.appointment_id = Some(appointment_id);
        }
        if let Some(user_id) = patch.user_id {
            payment.user_id = Some(user_id);
        }

        if reprice {
            payment.amount = match payment.service_type {
                ServiceType::Soat => {
                    self.quote(&PaymentRequest {
                        service_type: ServiceType::Soat,
                        requested_amount: None,
                        vehicle_id: payment.vehicle_id,
                    })
                    .await?
                }
                // A SOAT rate is never carried over as a requested amount.
                other if previous_type == ServiceType::Soat => {
                    compute_amount(other, patch.amount, None)?
                }
                other => match patch.amount {
                    Some(amount) => compute_amount(other, Some(amount), None)?,
                    None => payment.amount,
                },
            };
            debug!(payment_id = id, amount = %payment.amount, "Payment repriced");
        }

        let updated = self.repos.payments().update(payment).await?;
        info!(payment_id = id, status = %updated.status, "Payment updated");

        audit::record(
            self.repos.as_ref(),
            &self.host,
            AUDIT_SERVICE,
            format!(
                "Payment {} updated: {} {} ({})",
                updated.id, updated.service_type, updated.amount, updated.status
            ),
        )
        .await;

        Ok(updated)
    }

    pub async fn get_payment(&self, id: i32) -> DomainResult<Payment> {
        self.require(id).await
    }

    pub async fn list_payments(
        &self,
        filter: PaymentFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<Payment>> {
        self.repos.payments().list(filter, page, limit).await
    }

    async fn require(&self, id: i32) -> DomainResult<Payment> {
        self.repos
            .payments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Payment",
                field: "id",
                value: id.to_string(),
            })
    }
}
