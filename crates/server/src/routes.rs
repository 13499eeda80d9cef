use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, MethodRouter},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{error, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Fact, Health};
use service::AppService;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod products;

/// Shared handler state: the single capability object every route calls into.
#[derive(Clone)]
pub struct AppState {
    pub svc: Arc<dyn AppService>,
}

impl AppState {
    pub fn new(svc: Arc<dyn AppService>) -> Self { Self { svc } }
}

#[utoipa::path(get, path = "/healthz", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(
    get, path = "/", tag = "facts",
    responses(
        (status = 200, description = "A fact from the upstream API", body = crate::openapi::FactDoc),
        (status = 422, description = "Upstream fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_fact(State(state): State<AppState>) -> Result<Json<Fact>, ApiError> {
    let fact = state
        .svc
        .get_fact()
        .await
        .map_err(|e| ApiError::from_service(e, "failed to retrieve fact"))?;
    Ok(Json(fact))
}

pub async fn metrics() -> (StatusCode, String) {
    match service::metrics::encode_metrics() {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            error!(error = %e, "metrics encode failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"))
        }
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "route not found")
}

fn product_item() -> MethodRouter<AppState> {
    get(products::get_product)
        .put(products::update_product)
        .delete(products::delete_product)
        .fallback(method_not_allowed)
}

/// Build the full application router. Owned by the caller; nothing is
/// registered globally.
pub fn build_router(state: AppState, cors: CorsLayer, request_timeout: Duration) -> Router {
    Router::new()
        .route("/healthz", get(health).fallback(method_not_allowed))
        .route("/metrics", get(metrics).fallback(method_not_allowed))
        .route("/", get(get_fact).fallback(method_not_allowed))
        .route(
            "/products",
            get(products::list_products)
                .post(products::create_product)
                .fallback(method_not_allowed),
        )
        // `/products/` has no id; the handlers answer 400 "product ID is required".
        .route("/products/", product_item())
        .route("/products/:id", product_item())
        .route("/products/:id/", product_item())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .with_state(state)
        // Dropping the timed-out handler future cancels its query or upstream call.
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
