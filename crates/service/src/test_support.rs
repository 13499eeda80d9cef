#![cfg(test)]
use sea_orm::DatabaseConnection;

use crate::product::domain::{CreateProductRequest, NewProduct, UpdateProductRequest};

/// Fresh, migrated in-memory database private to the calling test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub fn new_product(name: &str, price: f64, stock: i32) -> NewProduct {
    NewProduct { name: name.into(), description: None, price, stock }
}

pub fn create_req(name: &str, price: f64, stock: i32) -> CreateProductRequest {
    CreateProductRequest { name: name.into(), description: None, price, stock }
}

pub fn update_req(name: &str, price: f64, stock: i32) -> UpdateProductRequest {
    UpdateProductRequest { name: name.into(), description: None, price, stock }
}
