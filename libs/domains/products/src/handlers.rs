//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{Product, ProductQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products),
    components(schemas(Product)),
    tags(
        (name = "Products", description = "Product catalogue")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .with_state(shared_service)
}

/// List every product, optionally sorted by price
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.list_products(&query).await?;
    Ok(Json(products))
}
