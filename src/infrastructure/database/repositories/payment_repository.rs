//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use super::db_err;
use crate::domain::payment::{Payment, PaymentFilter, PaymentRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;
use crate::shared::PaginatedResult;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn corrupt(field: &str, err: DomainError) -> DomainError {
    DomainError::Validation(format!("Database error: invalid {}: {}", field, err))
}

fn model_to_domain(model: payment::Model) -> DomainResult<Payment> {
    Ok(Payment {
        id: model.id,
        service_type: model
            .service_type
            .parse()
            .map_err(|e| corrupt("service_type", e))?,
        amount: model.amount,
        status: model.status.parse().map_err(|e| corrupt("status", e))?,
        payment_method: model
            .payment_method
            .parse()
            .map_err(|e| corrupt("payment_method", e))?,
        paid_at: model.paid_at,
        vehicle_id: model.vehicle_id,
        appointment_id: model.appointment_id,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn list(
        &self,
        filter: PaymentFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<Payment>> {
        let mut query = payment::Entity::find();

        if let Some(service_type) = filter.service_type {
            query = query.filter(payment::Column::ServiceType.eq(service_type.to_string()));
        }
        if let Some(status) = filter.status {
            query = query.filter(payment::Column::Status.eq(status.to_string()));
        }
        if let Some(vehicle_id) = filter.vehicle_id {
            query = query.filter(payment::Column::VehicleId.eq(vehicle_id));
        }

        query = query
            .order_by_desc(payment::Column::CreatedAt)
            .order_by_desc(payment::Column::Id);

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let offset = (page.saturating_sub(1) as u64) * limit as u64;
        let models = query
            .offset(offset)
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = models
            .into_iter()
            .map(model_to_domain)
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(PaginatedResult::new(items, total, page, limit))
    }

    async fn save(&self, p: Payment) -> DomainResult<Payment> {
        let now = Utc::now();
        let model = payment::ActiveModel {
            id: NotSet,
            service_type: Set(p.service_type.to_string()),
            amount: Set(p.amount),
            status: Set(p.status.to_string()),
            payment_method: Set(p.payment_method.to_string()),
            paid_at: Set(p.paid_at),
            vehicle_id: Set(p.vehicle_id),
            appointment_id: Set(p.appointment_id),
            user_id: Set(p.user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        debug!(payment_id = result.id, amount = %result.amount, "Payment saved");
        model_to_domain(result)
    }

    async fn update(&self, p: Payment) -> DomainResult<Payment> {
        let existing = payment::Entity::find_by_id(p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Payment",
                field: "id",
                value: p.id.to_string(),
            });
        };

        let model = payment::ActiveModel {
            id: Set(p.id),
            service_type: Set(p.service_type.to_string()),
            amount: Set(p.amount),
            status: Set(p.status.to_string()),
            payment_method: Set(p.payment_method.to_string()),
            paid_at: Set(p.paid_at),
            vehicle_id: Set(p.vehicle_id),
            appointment_id: Set(p.appointment_id),
            user_id: Set(p.user_id),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        let result = model.update(&self.db).await.map_err(db_err)?;
        model_to_domain(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::{PaymentMethod, PaymentStatus, ServiceType};
    use crate::infrastructure::database::repositories::test_db;
    use rust_decimal::Decimal;

    fn payment(service_type: ServiceType, amount: i64) -> Payment {
        let now = Utc::now();
        Payment {
            id: 0,
            service_type,
            amount: Decimal::from(amount),
            status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Pse,
            paid_at: now,
            vehicle_id: None,
            appointment_id: Some(7),
            user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn save_and_find() {
        let repo = SeaOrmPaymentRepository::new(test_db().await);
        let saved = repo
            .save(payment(ServiceType::Inspection, 75_000))
            .await
            .unwrap();
        assert!(saved.id > 0);

        let loaded = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(loaded.service_type, ServiceType::Inspection);
        assert_eq!(loaded.amount, Decimal::from(75_000));
        assert_eq!(loaded.payment_method, PaymentMethod::Pse);
        assert_eq!(loaded.appointment_id, Some(7));
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_and_paginates_newest_first() {
        let repo = SeaOrmPaymentRepository::new(test_db().await);
        for amount in [10_000, 20_000, 30_000] {
            repo.save(payment(ServiceType::Inspection, amount))
                .await
                .unwrap();
        }
        repo.save(payment(ServiceType::Soat, 590_400)).await.unwrap();

        let all = repo.list(PaymentFilter::default(), 1, 10).await.unwrap();
        assert_eq!(all.total, 4);
        assert_eq!(all.items[0].service_type, ServiceType::Soat);

        let filter = PaymentFilter {
            service_type: Some(ServiceType::Inspection),
            ..Default::default()
        };
        let page = repo.list(filter, 2, 2).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].amount, Decimal::from(10_000));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let repo = SeaOrmPaymentRepository::new(test_db().await);
        let mut saved = repo
            .save(payment(ServiceType::Inspection, 50_000))
            .await
            .unwrap();
        saved.status = PaymentStatus::Approved;
        saved.amount = Decimal::from(55_000);

        let updated = repo.update(saved.clone()).await.unwrap();
        assert_eq!(updated.status, PaymentStatus::Approved);
        assert_eq!(updated.amount, Decimal::from(55_000));
        assert_eq!(updated.created_at, saved.created_at);

        saved.id = 999;
        assert!(matches!(
            repo.update(saved).await,
            Err(DomainError::NotFound { entity: "Payment", .. })
        ));
    }
}
