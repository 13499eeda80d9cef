//! Service layer providing the product catalogue and fact capabilities.
//! - Separates business rules from data access (`product::repository`).
//! - Exposes every capability through the traits in `capability`, so callers
//!   can stack the composite and logging wrappers freely.
//! - Classifies failures into the `errors::ServiceError` taxonomy.

pub mod errors;
pub mod capability;
pub mod product;
pub mod fact;
pub mod composite;
pub mod logging;
pub mod metrics;
#[cfg(test)]
pub mod test_support;

pub use capability::{AppService, FactProvider, ProductOperations};
pub use composite::CompositeService;
pub use errors::{ErrorKind, ServiceError};
pub use fact::CatFactService;
pub use logging::LoggingService;
pub use product::ProductService;
