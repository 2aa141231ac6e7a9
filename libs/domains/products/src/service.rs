//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductQuery};
use crate::repository::ProductRepository;

/// Product service providing read operations over the catalogue
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products, honoring the optional `sort=price` query
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> ProductResult<Vec<Product>> {
        let sort_by_price = query.sorts_by_price();
        tracing::debug!(sort_by_price, "Listing products");
        self.repository.list(sort_by_price).await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
