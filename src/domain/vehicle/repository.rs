//! Vehicle registry interface

use async_trait::async_trait;

use super::{NewVehicle, Vehicle};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Looks a vehicle up by id, active or not.
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;
    /// Looks a vehicle up by its normalised (uppercase) plate, active or not.
    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>>;
    async fn list_active(&self) -> DomainResult<Vec<Vehicle>>;
    async fn save(&self, vehicle: NewVehicle) -> DomainResult<Vehicle>;
    async fn update(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;
}
