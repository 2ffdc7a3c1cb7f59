//! Vehicle registry service

use std::sync::Arc;

use tracing::info;

use crate::application::audit;
use crate::domain::{DomainResult, NewVehicle, RepositoryProvider, Vehicle, VehiclePatch};
use crate::shared::errors::DomainError;
use crate::shared::normalize_plate;

const AUDIT_SERVICE: &str = "VehicleService";

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
    host: String,
}

fn validate_displacement(cc: i32) -> DomainResult<()> {
    if cc <= 0 {
        return Err(DomainError::Validation(
            "Engine displacement must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

fn not_found(plate: &str) -> DomainError {
    DomainError::NotFound {
        entity: "Vehicle",
        field: "plate",
        value: plate.to_string(),
    }
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, host: impl Into<String>) -> Self {
        Self {
            repos,
            host: host.into(),
        }
    }

    pub async fn register(&self, mut vehicle: NewVehicle) -> DomainResult<Vehicle> {
        vehicle.plate = normalize_plate(&vehicle.plate).map_err(DomainError::Validation)?;
        validate_displacement(vehicle.engine_displacement_cc)?;

        if self
            .repos
            .vehicles()
            .find_by_plate(&vehicle.plate)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "Vehicle with plate {} already exists",
                vehicle.plate
            )));
        }

        let saved = self.repos.vehicles().save(vehicle).await?;
        info!(
            vehicle_id = saved.id,
            plate = %saved.plate,
            category = %saved.category,
            "Vehicle registered"
        );

        audit::record(
            self.repos.as_ref(),
            &self.host,
            AUDIT_SERVICE,
            format!("Vehicle {} registered as {}", saved.plate, saved.id),
        )
        .await;

        Ok(saved)
    }

    /// Any vehicle with this id, active or not.
    pub async fn get_by_id(&self, id: i32) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Vehicle",
                field: "id",
                value: id.to_string(),
            })
    }

    /// Active vehicle by plate, case-insensitive.
    pub async fn get_by_plate(&self, plate: &str) -> DomainResult<Vehicle> {
        let plate = normalize_plate(plate).map_err(|_| not_found(plate))?;
        match self.repos.vehicles().find_by_plate(&plate).await? {
            Some(vehicle) if vehicle.is_active => Ok(vehicle),
            _ => Err(not_found(&plate)),
        }
    }

    pub async fn list_active(&self) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().list_active().await
    }

    pub async fn update(&self, plate: &str, patch: VehiclePatch) -> DomainResult<Vehicle> {
        if let Some(cc) = patch.engine_displacement_cc {
            validate_displacement(cc)?;
        }

        let mut vehicle = self.get_by_plate(plate).await?;
        vehicle.apply(patch);

        let updated = self.repos.vehicles().update(vehicle).await?;
        info!(vehicle_id = updated.id, plate = %updated.plate, "Vehicle updated");

        audit::record(
            self.repos.as_ref(),
            &self.host,
            AUDIT_SERVICE,
            format!("Vehicle {} updated", updated.plate),
        )
        .await;

        Ok(updated)
    }

    /// Soft delete. The vehicle stays in storage but no longer resolves.
    pub async fn deactivate(&self, plate: &str) -> DomainResult<()> {
        let mut vehicle = self.get_by_plate(plate).await?;
        vehicle.is_active = false;

        let updated = self.repos.vehicles().update(vehicle).await?;
        info!(vehicle_id = updated.id, plate = %updated.plate, "Vehicle deactivated");

        audit::record(
            self.repos.as_ref(),
            &self.host,
            AUDIT_SERVICE,
            format!("Vehicle {} deactivated", updated.plate),
        )
        .await;

        Ok(())
    }
}
