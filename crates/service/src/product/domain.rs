use serde::{Deserialize, Serialize};

/// A persisted product. `id` is always positive once read from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

/// Product fields before the store has assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

/// Create input. Absent fields default so that validation, not decoding,
/// reports what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i32,
}

/// Update input; replaces every field of the stored product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i32,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self { name: req.name, description: req.description, price: req.price, stock: req.stock }
    }
}

impl Product {
    pub fn replaced(id: i32, req: UpdateProductRequest) -> Self {
        Self { id, name: req.name, description: req.description, price: req.price, stock: req.stock }
    }

    pub fn from_new(id: i32, new: NewProduct) -> Self {
        Self { id, name: new.name, description: new.description, price: new.price, stock: new.stock }
    }
}
