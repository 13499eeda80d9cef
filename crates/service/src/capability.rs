//! Capability traits shared by the concrete services and their wrappers.

use async_trait::async_trait;
use common::types::Fact;

use crate::errors::ServiceError;
use crate::product::domain::{CreateProductRequest, Product, UpdateProductRequest};

/// Can fetch a fact from the external collaborator.
#[async_trait]
pub trait FactProvider: Send + Sync {
    async fn get_fact(&self) -> Result<Fact, ServiceError>;
}

/// Can read and mutate the product catalogue.
#[async_trait]
pub trait ProductOperations: Send + Sync {
    async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_product_by_id(&self, id: i32) -> Result<Product, ServiceError>;
    async fn create_product(&self, req: CreateProductRequest) -> Result<Product, ServiceError>;
    async fn update_product(&self, id: i32, req: UpdateProductRequest) -> Result<Product, ServiceError>;
    async fn delete_product(&self, id: i32) -> Result<(), ServiceError>;
}

/// Everything the HTTP layer needs, behind one object.
pub trait AppService: FactProvider + ProductOperations {}

impl<T: FactProvider + ProductOperations + ?Sized> AppService for T {}
