use sea_orm::entity::prelude::*;

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("product name is required".into()));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), ModelError> {
    if price.is_nan() || price < 0.0 {
        return Err(ModelError::Validation("product price must be greater than or equal to 0".into()));
    }
    Ok(())
}

pub fn validate_stock(stock: i32) -> Result<(), ModelError> {
    if stock < 0 {
        return Err(ModelError::Validation("product stock must be greater than or equal to 0".into()));
    }
    Ok(())
}

pub fn validate_id(id: i32) -> Result<(), ModelError> {
    if id <= 0 {
        return Err(ModelError::Validation("invalid product ID: must be greater than 0".into()));
    }
    Ok(())
}
