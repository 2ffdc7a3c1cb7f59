//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{PaymentService, VehicleService};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::payments::{self, PaymentAppState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::vehicles::{self, VehicleAppState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Payments
        payments::create_payment,
        payments::quote_payment,
        payments::list_payments,
        payments::get_payment,
        payments::update_payment,
        // Vehicles
        vehicles::register_vehicle,
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::get_vehicle_by_id,
        vehicles::update_vehicle,
        vehicles::deactivate_vehicle,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<payments::PaymentResponse>,
            health::HealthResponse,
            health::ComponentHealth,
            // Payments
            payments::PaymentResponse,
            payments::CreatePaymentRequest,
            payments::UpdatePaymentRequest,
            payments::QuoteRequest,
            payments::QuoteResponse,
            // Vehicles
            vehicles::VehicleResponse,
            vehicles::RegisterVehicleRequest,
            vehicles::UpdateVehicleRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Payments", description = "Payment creation with regulated SOAT pricing"),
        (name = "Vehicles", description = "Vehicle registry used for SOAT pricing"),
    ),
    info(
        title = "Vehicle Inspection Service API",
        version = "1.0.0",
        description = "SOAT fee calculation and payment workflow for a vehicle-inspection backend",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(
    db: DatabaseConnection,
    payment_service: Arc<PaymentService>,
    vehicle_service: Arc<VehicleService>,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let payment_routes = Router::new()
        .route(
            "/",
            get(payments::list_payments).post(payments::create_payment),
        )
        .route("/quote", post(payments::quote_payment))
        .route(
            "/{id}",
            get(payments::get_payment).put(payments::update_payment),
        )
        .with_state(PaymentAppState { payment_service });

    let vehicle_routes = Router::new()
        .route(
            "/",
            get(vehicles::list_vehicles).post(vehicles::register_vehicle),
        )
        .route("/id/{id}", get(vehicles::get_vehicle_by_id))
        .route(
            "/{plate}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::deactivate_vehicle),
        )
        .with_state(VehicleAppState { vehicle_service });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1/payments", payment_routes)
        .nest("/api/v1/vehicles", vehicle_routes);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    // route_layer so the metrics middleware sees MatchedPath.
    // The outermost layer runs first: request ID, then tracing, then CORS.
    router
        .route_layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewVehicle, RepositoryProvider, VehicleCategory};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    async fn app() -> (Arc<InMemoryRepositoryProvider>, Router) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let router = create_api_router(
            db,
            Arc::new(PaymentService::new(repos.clone(), "test")),
            Arc::new(VehicleService::new(repos.clone(), "test")),
            None,
        );
        (repos, router)
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let mut svc = router.into_service();
        svc.call(builder.body(body).unwrap()).await.unwrap()
    }

    async fn json_body(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn soat_without_vehicle_is_400() {
        let (_repos, router) = app().await;
        let resp = send(
            router,
            "POST",
            "/api/v1/payments",
            Some(json!({"service_type": "SOAT", "amount": 10, "payment_method": "Card"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = json_body(resp).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn soat_with_unknown_vehicle_is_404() {
        let (_repos, router) = app().await;
        let resp = send(
            router,
            "POST",
            "/api/v1/payments",
            Some(json!({"service_type": "SOAT", "vehicle_id": 999, "payment_method": "Card"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_service_type_is_400() {
        let (_repos, router) = app().await;
        let resp = send(
            router,
            "POST",
            "/api/v1/payments/quote",
            Some(json!({"service_type": "parking", "amount": 5000})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_body_is_422() {
        let (_repos, router) = app().await;
        let resp = send(
            router,
            "POST",
            "/api/v1/payments",
            Some(json!({"service_type": "", "payment_method": "Card", "vehicle_id": 0})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn soat_payment_is_created_with_table_amount() {
        let (repos, router) = app().await;
        let moto = repos
            .vehicles()
            .save(NewVehicle {
                plate: "MOT150".into(),
                brand: "Honda".into(),
                model: "CB".into(),
                category: VehicleCategory::Motorcycle,
                engine_displacement_cc: 150,
            })
            .await
            .unwrap();

        let resp = send(
            router,
            "POST",
            "/api/v1/payments",
            Some(json!({
                "service_type": "SOAT",
                "amount": 1,
                "vehicle_id": moto.id,
                "payment_method": "PSE"
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert!(resp.headers().contains_key("x-request-id"));

        let body = json_body(resp).await;
        assert_eq!(body["data"]["amount"], "326600");
        assert_eq!(body["data"]["service_type"], "SOAT");
        assert_eq!(body["data"]["status"], "Pending");
    }

    #[tokio::test]
    async fn inspection_quote_passes_amount_through() {
        let (_repos, router) = app().await;
        let resp = send(
            router,
            "POST",
            "/api/v1/payments/quote",
            Some(json!({"service_type": "Inspection", "amount": 75000})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["amount"], "75000");
    }

    #[tokio::test]
    async fn vehicle_lifecycle() {
        let (_repos, router) = app().await;

        let resp = send(
            router.clone(),
            "POST",
            "/api/v1/vehicles",
            Some(json!({
                "plate": "abc123",
                "brand": "Mazda",
                "model": "3",
                "category": "Car",
                "engine_displacement_cc": 2000
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(json_body(resp).await["data"]["plate"], "ABC123");

        let resp = send(
            router.clone(),
            "POST",
            "/api/v1/vehicles",
            Some(json!({
                "plate": "ABC123",
                "brand": "Mazda",
                "model": "3",
                "category": "Car",
                "engine_displacement_cc": 2000
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = send(router.clone(), "DELETE", "/api/v1/vehicles/abc123", None).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = send(router, "GET", "/api/v1/vehicles/ABC123", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn vehicle_by_id_includes_deactivated() {
        let (repos, router) = app().await;
        let car = repos
            .vehicles()
            .save(NewVehicle {
                plate: "OLD001".into(),
                brand: "Chevrolet".into(),
                model: "Spark".into(),
                category: VehicleCategory::Car,
                engine_displacement_cc: 1000,
            })
            .await
            .unwrap();

        let resp = send(router.clone(), "DELETE", "/api/v1/vehicles/OLD001", None).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let uri = format!("/api/v1/vehicles/id/{}", car.id);
        let resp = send(router.clone(), "GET", &uri, None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["data"]["plate"], "OLD001");
        assert_eq!(body["data"]["is_active"], false);

        let resp = send(router, "GET", "/api/v1/vehicles/id/999", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn blank_category_is_422() {
        let (_repos, router) = app().await;
        let resp = send(
            router,
            "POST",
            "/api/v1/vehicles",
            Some(json!({
                "plate": "BLK001",
                "brand": "Mazda",
                "model": "3",
                "category": "   ",
                "engine_displacement_cc": 2000
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_payment_is_404() {
        let (_repos, router) = app().await;
        let resp = send(router, "GET", "/api/v1/payments/42", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_reports_database() {
        let (_repos, router) = app().await;
        let resp = send(router, "GET", "/health", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await["database"]["status"], "ok");
    }
}
