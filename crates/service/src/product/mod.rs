//! Product catalogue: domain types, persistence seam, and business rules.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ProductService;
