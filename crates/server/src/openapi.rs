use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct FactDoc { pub fact: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ProductDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

#[derive(ToSchema)]
pub struct CreateProductRequestDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

#[derive(ToSchema)]
pub struct UpdateProductRequestDoc {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::get_fact,
        crate::routes::products::list_products,
        crate::routes::products::create_product,
        crate::routes::products::get_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
    ),
    components(
        schemas(
            HealthResponse,
            FactDoc,
            ErrorDoc,
            MessageDoc,
            ProductDoc,
            CreateProductRequestDoc,
            UpdateProductRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "facts"),
        (name = "products"),
    )
)]
pub struct ApiDoc;
