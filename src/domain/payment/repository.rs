//! Payment store interface

use async_trait::async_trait;

use super::{Payment, PaymentFilter};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>>;
    /// Newest first.
    async fn list(
        &self,
        filter: PaymentFilter,
        page: u32,
        limit: u32,
    ) -> DomainResult<PaginatedResult<Payment>>;
    async fn save(&self, payment: Payment) -> DomainResult<Payment>;
    async fn update(&self, payment: Payment) -> DomainResult<Payment>;
}
