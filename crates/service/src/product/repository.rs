use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

use super::domain::{NewProduct, Product};

/// Raw persistence outcome; the service decides what it means.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("no matching row")]
    NotFound,
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

/// Repository abstraction for product persistence.
///
/// Every call is a single statement; dropping the returned future abandons it
/// and returns the pooled connection.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All rows ordered by id; empty when the table is empty.
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn get_by_id(&self, id: i32) -> Result<Product, RepositoryError>;
    /// Insert and return the row with its store-assigned id.
    async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError>;
    /// Overwrite every column of `product.id`; `NotFound` when no row matched.
    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockProductRepository {
        rows: Mutex<BTreeMap<i32, Product>>,
        next_id: Mutex<i32>,
        calls: AtomicUsize,
        broken: bool,
    }

    impl MockProductRepository {
        /// A repository whose every call fails with a storage fault.
        pub fn broken() -> Self {
            Self { broken: true, ..Self::default() }
        }

        /// Number of repository calls made so far.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn enter(&self) -> Result<(), RepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(RepositoryError::Storage(DbErr::Custom("connection refused".into())));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
            self.enter()?;
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn get_by_id(&self, id: i32) -> Result<Product, RepositoryError> {
            self.enter()?;
            self.rows.lock().unwrap().get(&id).cloned().ok_or(RepositoryError::NotFound)
        }

        async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
            self.enter()?;
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let created = Product::from_new(*next, product);
            self.rows.lock().unwrap().insert(created.id, created.clone());
            Ok(created)
        }

        async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
            self.enter()?;
            let mut rows = self.rows.lock().unwrap();
            let slot = rows.get_mut(&product.id).ok_or(RepositoryError::NotFound)?;
            *slot = product.clone();
            Ok(())
        }

        async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
            self.enter()?;
            self.rows.lock().unwrap().remove(&id).map(|_| ()).ok_or(RepositoryError::NotFound)
        }
    }
}
