//! Payment REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreatePaymentRequest, PaymentListQuery, PaymentResponse, QuoteRequest, QuoteResponse,
    UpdatePaymentRequest,
};
use crate::application::PaymentService;
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ApiResult, PaginatedResponse, ValidatedJson,
};
use crate::shared::validate_pagination;

#[derive(Clone)]
pub struct PaymentAppState {
    pub payment_service: Arc<PaymentService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment created", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Missing vehicle, unknown service type or bad amount"),
        (status = 404, description = "Vehicle not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_payment(
    State(state): State<PaymentAppState>,
    ValidatedJson(body): ValidatedJson<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PaymentResponse>>)> {
    let new = body.into_domain().map_err(domain_error)?;
    let payment = state
        .payment_service
        .create_payment(new)
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(payment.into())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments/quote",
    tag = "Payments",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Computed amount, nothing persisted", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Missing vehicle, unknown service type or bad amount"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn quote_payment(
    State(state): State<PaymentAppState>,
    ValidatedJson(body): ValidatedJson<QuoteRequest>,
) -> ApiResult<Json<ApiResponse<QuoteResponse>>> {
    let request = body.into_domain().map_err(domain_error)?;
    let amount = state
        .payment_service
        .quote(&request)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(QuoteResponse {
        service_type: request.service_type.to_string(),
        amount,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    params(PaymentListQuery),
    responses(
        (status = 200, description = "Payments, newest first", body = PaginatedResponse<PaymentResponse>)
    )
)]
pub async fn list_payments(
    State(state): State<PaymentAppState>,
    Query(query): Query<PaymentListQuery>,
) -> ApiResult<Json<PaginatedResponse<PaymentResponse>>> {
    let filter = query.filter().map_err(domain_error)?;
    let (page, limit) = validate_pagination(query.page, query.limit);
    let result = state
        .payment_service
        .list_payments(filter, page, limit)
        .await
        .map_err(domain_error)?;
    Ok(Json(PaginatedResponse::from_result(
        result,
        PaymentResponse::from,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    params(("id" = i32, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_payment(
    State(state): State<PaymentAppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<PaymentResponse>>> {
    let payment = state
        .payment_service
        .get_payment(id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(payment.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    params(("id" = i32, Path, description = "Payment ID")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Invalid data"),
        (status = 404, description = "Payment or vehicle not found")
    )
)]
pub async fn update_payment(
    State(state): State<PaymentAppState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdatePaymentRequest>,
) -> ApiResult<Json<ApiResponse<PaymentResponse>>> {
    let patch = body.into_domain().map_err(domain_error)?;
    let payment = state
        .payment_service
        .update_payment(id, patch)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(payment.into())))
}
