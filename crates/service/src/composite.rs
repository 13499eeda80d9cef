use async_trait::async_trait;
use common::types::Fact;

use crate::capability::{FactProvider, ProductOperations};
use crate::errors::ServiceError;
use crate::product::domain::{CreateProductRequest, Product, UpdateProductRequest};

/// Joins a fact provider and a product service into one [`crate::AppService`].
/// Every call is forwarded unchanged.
pub struct CompositeService<F, P> {
    facts: F,
    products: P,
}

impl<F: FactProvider, P: ProductOperations> CompositeService<F, P> {
    pub fn new(facts: F, products: P) -> Self { Self { facts, products } }
}

#[async_trait]
impl<F: FactProvider, P: ProductOperations> FactProvider for CompositeService<F, P> {
    async fn get_fact(&self) -> Result<Fact, ServiceError> {
        self.facts.get_fact().await
    }
}

#[async_trait]
impl<F: FactProvider, P: ProductOperations> ProductOperations for CompositeService<F, P> {
    async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.products.get_all_products().await
    }

    async fn get_product_by_id(&self, id: i32) -> Result<Product, ServiceError> {
        self.products.get_product_by_id(id).await
    }

    async fn create_product(&self, req: CreateProductRequest) -> Result<Product, ServiceError> {
        self.products.create_product(req).await
    }

    async fn update_product(&self, id: i32, req: UpdateProductRequest) -> Result<Product, ServiceError> {
        self.products.update_product(id, req).await
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        self.products.delete_product(id).await
    }
}
