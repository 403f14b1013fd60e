use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use takabox_catalog::{Product, ProductRepository};
use uuid::Uuid;

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    title: String,
    description: Option<String>,
    price_bdt: i64,
    compare_at_bdt: Option<i64>,
    image_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Product {
            id: Uuid::parse_str(&self.id)?,
            title: self.title,
            description: self.description,
            price_bdt: self.price_bdt,
            compare_at_bdt: self.compare_at_bdt,
            image_url: self.image_url,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn upsert_product(
        &self,
        product: &Product,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, title, description, price_bdt, compare_at_bdt,
                image_url, is_active, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                price_bdt = excluded.price_bdt,
                compare_at_bdt = excluded.compare_at_bdt,
                image_url = excluded.image_url,
                is_active = excluded.is_active
            "#,
        )
        .bind(product.id.to_string())
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_bdt)
        .bind(product.compare_at_bdt)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_product(
        &self,
        id: Uuid,
    ) -> Result<Option<Product>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<ProductRow> = sqlx::query_as("SELECT * FROM products WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_product()?)),
            None => Ok(None),
        }
    }

    async fn list_active_products(
        &self,
    ) -> Result<Vec<Product>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as("SELECT * FROM products WHERE is_active = 1 ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;

    async fn repo() -> (DbClient, SqliteProductRepository) {
        let db = DbClient::in_memory().await.unwrap();
        let repo = SqliteProductRepository::new(db.pool.clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let (_db, repo) = repo().await;
        let mut product = Product::new("Smart Money Saving Box", 1200);
        product.compare_at_bdt = Some(1500);

        repo.upsert_product(&product).await.unwrap();
        let loaded = repo.get_product(product.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Smart Money Saving Box");
        assert_eq!(loaded.price_bdt, 1200);
        assert_eq!(loaded.compare_at_bdt, Some(1500));

        // Price edits overwrite in place.
        product.price_bdt = 1100;
        repo.upsert_product(&product).await.unwrap();
        let loaded = repo.get_product(product.id).await.unwrap().unwrap();
        assert_eq!(loaded.price_bdt, 1100);
    }

    #[tokio::test]
    async fn test_active_list_skips_retired_products() {
        let (_db, repo) = repo().await;

        let mut old = Product::new("Old stock", 900);
        old.created_at = Utc::now() - chrono::Duration::days(30);
        let mut retired = Product::new("Retired", 700);
        retired.is_active = false;
        let fresh = Product::new("Fresh arrival", 1300);

        repo.upsert_product(&old).await.unwrap();
        repo.upsert_product(&retired).await.unwrap();
        repo.upsert_product(&fresh).await.unwrap();

        let active = repo.list_active_products().await.unwrap();
        assert_eq!(active.len(), 2);
        // Oldest first: the hero slot belongs to the earliest listing.
        assert_eq!(active[0].title, "Old stock");
        assert_eq!(active[1].title, "Fresh arrival");
    }
}
