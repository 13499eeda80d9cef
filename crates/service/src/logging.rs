//! Observational decorator for any capability implementer.

use std::time::Instant;

use async_trait::async_trait;
use common::types::Fact;
use tracing::{info, warn};

use crate::capability::{FactProvider, ProductOperations};
use crate::errors::ServiceError;
use crate::metrics;
use crate::product::domain::{CreateProductRequest, Product, UpdateProductRequest};

/// Wraps a service and emits one event per call with the operation, the
/// relevant ids, the error if any, and the elapsed time. Results pass through untouched.
pub struct LoggingService<S> {
    next: S,
}

impl<S> LoggingService<S> {
    pub fn new(next: S) -> Self { Self { next } }
}

fn observe<T>(
    operation: &'static str,
    id: Option<i32>,
    fact: Option<&str>,
    result: &Result<T, ServiceError>,
    started: Instant,
) {
    let took = started.elapsed();
    let took_ms = took.as_secs_f64() * 1000.0;
    metrics::record_call(operation, result.is_ok(), took);
    match result {
        Ok(_) => info!(operation, id, fact, took_ms, "service call completed"),
        Err(e) => warn!(operation, id, fact, error = %e, kind = ?e.kind(), took_ms, "service call failed"),
    }
}

#[async_trait]
impl<S: FactProvider> FactProvider for LoggingService<S> {
    async fn get_fact(&self) -> Result<Fact, ServiceError> {
        let started = Instant::now();
        let result = self.next.get_fact().await;
        // There is no fact on the error path.
        let fact = result.as_ref().ok().map(|f| f.fact.as_str());
        observe("get_fact", None, fact, &result, started);
        result
    }
}

#[async_trait]
impl<S: ProductOperations> ProductOperations for LoggingService<S> {
    async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError> {
        let started = Instant::now();
        let result = self.next.get_all_products().await;
        observe("get_all_products", None, None, &result, started);
        result
    }

    async fn get_product_by_id(&self, id: i32) -> Result<Product, ServiceError> {
        let started = Instant::now();
        let result = self.next.get_product_by_id(id).await;
        observe("get_product_by_id", Some(id), None, &result, started);
        result
    }

    async fn create_product(&self, req: CreateProductRequest) -> Result<Product, ServiceError> {
        let started = Instant::now();
        let result = self.next.create_product(req).await;
        let id = result.as_ref().ok().map(|p| p.id);
        observe("create_product", id, None, &result, started);
        result
    }

    async fn update_product(&self, id: i32, req: UpdateProductRequest) -> Result<Product, ServiceError> {
        let started = Instant::now();
        let result = self.next.update_product(id, req).await;
        observe("update_product", Some(id), None, &result, started);
        result
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        let started = Instant::now();
        let result = self.next.delete_product(id).await;
        observe("delete_product", Some(id), None, &result, started);
        result
    }
}
