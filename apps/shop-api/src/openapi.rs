//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "Product catalogue and user management backed by MongoDB"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    nest(
        (path = "/product", api = domain_products::ApiDoc),
        (path = "/user", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalogue"),
        (name = "Users", description = "Users and their addresses")
    )
)]
pub struct ApiDoc;
