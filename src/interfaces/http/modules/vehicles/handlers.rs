//! Vehicle REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{RegisterVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::application::VehicleService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct VehicleAppState {
    pub vehicle_service: Arc<VehicleService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = RegisterVehicleRequest,
    responses(
        (status = 201, description = "Registered", body = ApiResponse<VehicleResponse>),
        (status = 400, description = "Invalid plate"),
        (status = 409, description = "Plate already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register_vehicle(
    State(state): State<VehicleAppState>,
    ValidatedJson(body): ValidatedJson<RegisterVehicleRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<VehicleResponse>>)> {
    let vehicle = state
        .vehicle_service
        .register(body.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(vehicle.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Active vehicles", body = ApiResponse<Vec<VehicleResponse>>)
    )
)]
pub async fn list_vehicles(
    State(state): State<VehicleAppState>,
) -> ApiResult<Json<ApiResponse<Vec<VehicleResponse>>>> {
    let vehicles = state
        .vehicle_service
        .list_active()
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{plate}",
    tag = "Vehicles",
    params(("plate" = String, Path, description = "Licence plate, case-insensitive")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleAppState>,
    Path(plate): Path<String>,
) -> ApiResult<Json<ApiResponse<VehicleResponse>>> {
    let vehicle = state
        .vehicle_service
        .get_by_plate(&plate)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

/// Resolves deactivated vehicles too, so past payments stay traceable.
#[utoipa::path(
    get,
    path = "/api/v1/vehicles/id/{id}",
    tag = "Vehicles",
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle_by_id(
    State(state): State<VehicleAppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<VehicleResponse>>> {
    let vehicle = state
        .vehicle_service
        .get_by_id(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{plate}",
    tag = "Vehicles",
    params(("plate" = String, Path, description = "Licence plate, case-insensitive")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<VehicleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<VehicleAppState>,
    Path(plate): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateVehicleRequest>,
) -> ApiResult<Json<ApiResponse<VehicleResponse>>> {
    let vehicle = state
        .vehicle_service
        .update(&plate, body.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{plate}",
    tag = "Vehicles",
    params(("plate" = String, Path, description = "Licence plate, case-insensitive")),
    responses(
        (status = 204, description = "Deactivated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn deactivate_vehicle(
    State(state): State<VehicleAppState>,
    Path(plate): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .vehicle_service
        .deactivate(&plate)
        .await
        .map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
