use database::mongodb::ids::opaque_id;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Product entity
///
/// Every field except the id is optional. Products are written out of band,
/// the HTTP surface only reads them, so the id is kept as an opaque string
/// whatever type the writer stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(rename = "_id", alias = "id", deserialize_with = "opaque_id::deserialize")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl Product {
    /// Product with a fresh id and no fields set
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: None,
            price: None,
            description: None,
            brand: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }
}

impl Default for Product {
    fn default() -> Self {
        Self::new()
    }
}

/// Query parameters for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// `price` sorts ascending by price. Any other value is ignored.
    pub sort: Option<String>,
}

impl ProductQuery {
    pub fn sorts_by_price(&self) -> bool {
        self.sort.as_deref() == Some("price")
    }
}
