use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable product. The storefront is effectively single-product: the
/// first active product is the landing-page hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Current sale price, whole taka.
    pub price_bdt: i64,
    /// Struck-through "was" price shown next to the sale price.
    pub compare_at_bdt: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(title: impl Into<String>, price_bdt: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            price_bdt,
            compare_at_bdt: None,
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for product data access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn upsert_product(
        &self,
        product: &Product,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_product(
        &self,
        id: Uuid,
    ) -> Result<Option<Product>, Box<dyn std::error::Error + Send + Sync>>;

    /// Active products, oldest first; index zero is the landing-page hero.
    async fn list_active_products(
        &self,
    ) -> Result<Vec<Product>, Box<dyn std::error::Error + Send + Sync>>;
}
