use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    Json,
};
use tracing::info;

use common::types::MessageResponse;
use service::product::domain::{CreateProductRequest, Product, UpdateProductRequest};

use crate::errors::ApiError;
use crate::routes::AppState;

/// Extract the product id from the last segment of a path like `/products/123`.
///
/// A positive id beyond the stored `i32` range cannot exist, so it is answered
/// as not found rather than as a format error.
pub fn extract_id_from_path(path: &str) -> Result<i32, ApiError> {
    let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
    // Expected format: ["products", "{id}"]
    if parts.len() < 2 {
        return Err(ApiError::bad_request("product ID is required"));
    }
    let raw = parts[parts.len() - 1];
    let id: i64 = raw
        .parse()
        .map_err(|_| ApiError::bad_request("invalid product ID format: must be an integer"))?;
    if id <= 0 {
        return Err(ApiError::bad_request("invalid product ID: must be greater than 0"));
    }
    i32::try_from(id).map_err(|_| {
        ApiError::new(StatusCode::NOT_FOUND, format!("product with ID {id} not found"))
    })
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products", body = [crate::openapi::ProductDoc]),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .svc
        .get_all_products()
        .await
        .map_err(|e| ApiError::from_service(e, "failed to retrieve products"))?;
    Ok(Json(products))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProductDoc),
        (status = 400, description = "Invalid ID", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Storage fault", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get_product(State(state): State<AppState>, uri: Uri) -> Result<Json<Product>, ApiError> {
    let id = extract_id_from_path(uri.path())?;
    let product = state
        .svc
        .get_product_by_id(id)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to retrieve product"))?;
    Ok(Json(product))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = crate::openapi::CreateProductRequestDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_json())?;
    let product = state
        .svc
        .create_product(input)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to create product"))?;
    info!(id = product.id, "created product");
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = crate::openapi::UpdateProductRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    uri: Uri,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = extract_id_from_path(uri.path())?;
    let Json(input) = payload.map_err(|_| ApiError::invalid_json())?;
    let product = state
        .svc
        .update_product(id, input)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to update product"))?;
    info!(id, "updated product");
    Ok(Json(product))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid ID", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_product(State(state): State<AppState>, uri: Uri) -> Result<Json<MessageResponse>, ApiError> {
    let id = extract_id_from_path(uri.path())?;
    state
        .svc
        .delete_product(id)
        .await
        .map_err(|e| ApiError::from_service(e, "failed to delete product"))?;
    info!(id, "deleted product");
    Ok(Json(MessageResponse::new("product deleted successfully")))
}
