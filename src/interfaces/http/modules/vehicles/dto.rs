//! Vehicle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewVehicle, Vehicle, VehicleCategory, VehiclePatch};
use crate::shared::not_blank;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleResponse {
    pub id: i32,
    pub plate: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub engine_displacement_cc: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            plate: v.plate,
            brand: v.brand,
            model: v.model,
            category: v.category.to_string(),
            engine_displacement_cc: v.engine_displacement_cc,
            is_active: v.is_active,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterVehicleRequest {
    /// Stored uppercase
    #[validate(length(min = 3, max = 8, message = "plate must be 3 to 8 characters"))]
    pub plate: String,
    #[validate(length(min = 1, max = 50, message = "brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, max = 50, message = "model is required"))]
    pub model: String,
    /// `Motorcycle`, `Car`, or any other category (no SOAT rate)
    #[validate(
        length(min = 1, max = 30, message = "category is required"),
        custom(function = "not_blank", message = "category is required")
    )]
    pub category: String,
    #[validate(range(min = 1, message = "engine_displacement_cc must be positive"))]
    pub engine_displacement_cc: i32,
}

impl From<RegisterVehicleRequest> for NewVehicle {
    fn from(r: RegisterVehicleRequest) -> Self {
        Self {
            plate: r.plate,
            brand: r.brand,
            model: r.model,
            category: VehicleCategory::parse(&r.category),
            engine_displacement_cc: r.engine_displacement_cc,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,
    #[validate(length(min = 1, max = 30), custom(function = "not_blank"))]
    pub category: Option<String>,
    #[validate(range(min = 1, message = "engine_displacement_cc must be positive"))]
    pub engine_displacement_cc: Option<i32>,
}

impl From<UpdateVehicleRequest> for VehiclePatch {
    fn from(r: UpdateVehicleRequest) -> Self {
        Self {
            brand: r.brand,
            model: r.model,
            category: r.category.as_deref().map(VehicleCategory::parse),
            engine_displacement_cc: r.engine_displacement_cc,
        }
    }
}
