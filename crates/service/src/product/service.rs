use std::sync::Arc;

use async_trait::async_trait;
use models::product::{validate_id, validate_name, validate_price, validate_stock};
use tracing::{debug, instrument};

use super::domain::{CreateProductRequest, NewProduct, Product, UpdateProductRequest};
use super::repository::{ProductRepository, RepositoryError};
use crate::capability::ProductOperations;
use crate::errors::ServiceError;

/// Product business service independent of web framework.
///
/// Validates input before any repository call and translates repository
/// outcomes into [`ServiceError`].
pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }
}

fn validate_fields(name: &str, price: f64, stock: i32) -> Result<(), ServiceError> {
    validate_name(name)?;
    validate_price(price)?;
    validate_stock(stock)?;
    Ok(())
}

fn lookup_error(id: i32, context: &'static str) -> impl FnOnce(RepositoryError) -> ServiceError {
    move |e| match e {
        RepositoryError::NotFound => ServiceError::NotFound(id),
        other => ServiceError::storage(context, other),
    }
}

#[async_trait]
impl<R: ProductRepository> ProductOperations for ProductService<R> {
    #[instrument(skip(self))]
    async fn get_all_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.repo
            .get_all()
            .await
            .map_err(|e| ServiceError::storage("failed to get all products", e))
    }

    #[instrument(skip(self))]
    async fn get_product_by_id(&self, id: i32) -> Result<Product, ServiceError> {
        validate_id(id)?;
        self.repo
            .get_by_id(id)
            .await
            .map_err(lookup_error(id, "failed to get product"))
    }

    /// Create a product after validating name, price and stock.
    ///
    /// # Examples
    /// ```
    /// use service::product::{ProductService, domain::CreateProductRequest, repository::mock::MockProductRepository};
    /// use service::ProductOperations;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(MockProductRepository::default()));
    /// let req = CreateProductRequest { name: "Widget".into(), description: None, price: 9.99, stock: 5 };
    /// let p = tokio_test::block_on(svc.create_product(req)).unwrap();
    /// assert_eq!(p.id, 1);
    /// ```
    #[instrument(skip(self, req), fields(name = %req.name))]
    async fn create_product(&self, req: CreateProductRequest) -> Result<Product, ServiceError> {
        validate_fields(&req.name, req.price, req.stock)?;
        let created = self
            .repo
            .create(NewProduct::from(req))
            .await
            .map_err(|e| ServiceError::storage("failed to create product", e))?;
        debug!(id = created.id, "product created");
        Ok(created)
    }

    #[instrument(skip(self, req), fields(name = %req.name))]
    async fn update_product(&self, id: i32, req: UpdateProductRequest) -> Result<Product, ServiceError> {
        validate_id(id)?;
        validate_fields(&req.name, req.price, req.stock)?;
        let product = Product::replaced(id, req);
        self.repo
            .update(&product)
            .await
            .map_err(lookup_error(id, "failed to update product"))?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        validate_id(id)?;
        self.repo
            .delete(id)
            .await
            .map_err(lookup_error(id, "failed to delete product"))
    }
}
