use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::types::Fact;
use server::routes::{self, AppState};
use service::fact::FactError;
use service::product::repo::SeaOrmProductRepository;
use service::{AppService, CompositeService, FactProvider, LoggingService, ProductService, ServiceError};

struct StubFacts {
    fact: Option<&'static str>,
}

#[async_trait]
impl FactProvider for StubFacts {
    async fn get_fact(&self) -> Result<Fact, ServiceError> {
        match self.fact {
            Some(f) => Ok(Fact { fact: f.into() }),
            None => Err(FactError::Status(reqwest::StatusCode::BAD_GATEWAY).into()),
        }
    }
}

async fn app_with(fact: Option<&'static str>) -> anyhow::Result<Router> {
    let db = models::db::connect_in_memory().await?;
    let products = ProductService::new(Arc::new(SeaOrmProductRepository::new(db)));
    let svc: Arc<dyn AppService> =
        Arc::new(LoggingService::new(CompositeService::new(StubFacts { fact }, products)));
    Ok(routes::build_router(
        AppState::new(svc),
        tower_http::cors::CorsLayer::very_permissive(),
        Duration::from_secs(5),
    ))
}

async fn app() -> anyhow::Result<Router> {
    app_with(Some("Cats sleep a lot.")).await
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            req = req.header("content-type", "application/json");
            Body::from(b.to_owned())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body)?).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::GET, "/healthz", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn root_passes_the_fact_through() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"fact": "Cats sleep a lot."}));
    Ok(())
}

#[tokio::test]
async fn upstream_failure_is_422() -> anyhow::Result<()> {
    let app = app_with(None).await?;
    let (status, body) = send(&app, Method::GET, "/", None).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({"error": "failed to retrieve fact"}));
    Ok(())
}

#[tokio::test]
async fn empty_catalogue_lists_as_empty_array() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::GET, "/products", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn create_then_get_round_trip() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(r#"{"name":"Widget","price":9.99,"stock":5}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "name": "Widget", "price": 9.99, "stock": 5}));

    let (status, body) = send(&app, Method::GET, "/products/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Widget");

    let (_, body) = send(&app, Method::GET, "/products", None).await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn description_is_returned_when_present() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(
        &app,
        Method::POST,
        "/products",
        Some(r#"{"name":"Lamp","description":"desk lamp","price":20,"stock":0}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["description"], "desk lamp");
    Ok(())
}

#[tokio::test]
async fn validation_failures_are_400() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::POST, "/products", Some(r#"{"price":1.0,"stock":1}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "product name is required"}));

    let (status, body) = send(&app, Method::POST, "/products", Some(r#"{"name":"X","price":-1,"stock":1}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "product price must be greater than or equal to 0"}));

    let (status, body) = send(&app, Method::POST, "/products", Some(r#"{"name":"X","price":1,"stock":-3}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "product stock must be greater than or equal to 0"}));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_400() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::POST, "/products", Some("{not json")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid JSON format"}));

    let (status, body) = send(&app, Method::PUT, "/products/1", Some(r#"{"name":"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "invalid JSON format"}));
    Ok(())
}

#[tokio::test]
async fn missing_product_is_404() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::GET, "/products/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "product with ID 999 not found"}));

    let (status, _) = send(&app, Method::PUT, "/products/999", Some(r#"{"name":"A","price":1,"stock":1}"#)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/products/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn bad_ids_are_400_with_specific_messages() -> anyhow::Result<()> {
    let app = app().await?;
    let body = r#"{"name":"A","price":1,"stock":1}"#;
    for (path, msg) in [
        ("/products/0", "invalid product ID: must be greater than 0"),
        ("/products/-1", "invalid product ID: must be greater than 0"),
        ("/products/abc", "invalid product ID format: must be an integer"),
        ("/products/", "product ID is required"),
    ] {
        for (method, payload) in [(Method::GET, None), (Method::PUT, Some(body)), (Method::DELETE, None)] {
            let (status, got) = send(&app, method.clone(), path, payload).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {path}");
            assert_eq!(got, json!({"error": msg}), "{method} {path}");
        }
    }
    Ok(())
}

#[tokio::test]
async fn ids_beyond_storage_range_are_404() -> anyhow::Result<()> {
    let app = app().await?;
    let body = r#"{"name":"A","price":1,"stock":1}"#;
    for (method, payload) in [(Method::GET, None), (Method::PUT, Some(body)), (Method::DELETE, None)] {
        let (status, got) = send(&app, method.clone(), "/products/3000000000", payload).await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(got, json!({"error": "product with ID 3000000000 not found"}), "{method}");
    }
    Ok(())
}

#[tokio::test]
async fn trailing_slash_addresses_the_same_product() -> anyhow::Result<()> {
    let app = app().await?;
    send(&app, Method::POST, "/products", Some(r#"{"name":"Widget","price":9.99,"stock":5}"#)).await?;

    let (status, body) = send(&app, Method::GET, "/products/1/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Widget", "price": 9.99, "stock": 5}));

    let (status, body) = send(&app, Method::PUT, "/products/1/", Some(r#"{"name":"Gadget","price":2,"stock":1}"#)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Gadget");

    let (status, _) = send(&app, Method::DELETE, "/products/1/", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/products/1/", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_replaces_every_field() -> anyhow::Result<()> {
    let app = app().await?;
    send(
        &app,
        Method::POST,
        "/products",
        Some(r#"{"name":"Widget","description":"old","price":9.99,"stock":5}"#),
    )
    .await?;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/products/1",
        Some(r#"{"name":"Gadget","price":1.5,"stock":2}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Gadget", "price": 1.5, "stock": 2}));

    let (_, body) = send(&app, Method::GET, "/products/1", None).await?;
    assert_eq!(body, json!({"id": 1, "name": "Gadget", "price": 1.5, "stock": 2}));
    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_404() -> anyhow::Result<()> {
    let app = app().await?;
    send(&app, Method::POST, "/products", Some(r#"{"name":"Widget","price":9.99,"stock":5}"#)).await?;

    let (status, body) = send(&app, Method::DELETE, "/products/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "product deleted successfully"}));

    let (status, _) = send(&app, Method::GET, "/products/1", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unsupported_method_is_405_json() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::PATCH, "/products/1", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "method not allowed"}));

    let (status, _) = send(&app, Method::DELETE, "/products", None).await?;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_404_json() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, body) = send(&app, Method::GET, "/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "route not found"}));
    Ok(())
}

#[tokio::test]
async fn metrics_expose_service_call_histogram() -> anyhow::Result<()> {
    let app = app().await?;
    send(&app, Method::GET, "/products", None).await?;

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("product_api_service_call_duration_seconds"));
    Ok(())
}
