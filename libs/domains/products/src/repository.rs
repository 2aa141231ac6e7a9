use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::Product;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, ascending by price when `sort_by_price` is set
    /// (missing prices first), otherwise in store order
    async fn list(&self, sort_by_price: bool) -> ProductResult<Vec<Product>>;

    /// Insert a product. Seeding only; no HTTP route writes products.
    async fn insert(&self, product: Product) -> ProductResult<Product>;
}
