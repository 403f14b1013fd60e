use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use takabox_order::{Order, OrderRepository, OrderStatus};
use takabox_shared::Masked;
use uuid::Uuid;

pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    customer_name: String,
    customer_phone: String,
    district_id: String,
    district_name: String,
    thana_id: String,
    thana_name: String,
    address: String,
    product_id: String,
    product_title: String,
    quantity: i64,
    unit_price_bdt: i64,
    subtotal_bdt: i64,
    delivery_charge_bdt: i64,
    discount_bdt: i64,
    promo_code: Option<String>,
    total_bdt: i64,
    status: String,
    tracking_code: Option<String>,
    consignment_id: Option<String>,
    landing_page_slug: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Order {
            id: self.id,
            customer_name: Masked::from(self.customer_name),
            customer_phone: Masked::from(self.customer_phone),
            district_id: self.district_id,
            district_name: self.district_name,
            thana_id: self.thana_id,
            thana_name: self.thana_name,
            address: self.address,
            product_id: Uuid::parse_str(&self.product_id)?,
            product_title: self.product_title,
            quantity: u32::try_from(self.quantity)?,
            unit_price_bdt: self.unit_price_bdt,
            subtotal_bdt: self.subtotal_bdt,
            delivery_charge_bdt: self.delivery_charge_bdt,
            discount_bdt: self.discount_bdt,
            promo_code: self.promo_code,
            total_bdt: self.total_bdt,
            status: self.status.parse::<OrderStatus>()?,
            tracking_code: self.tracking_code,
            consignment_id: self.consignment_id,
            landing_page_slug: self.landing_page_slug,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn save_order(
        &self,
        order: &Order,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, customer_name, customer_phone, district_id, district_name,
                thana_id, thana_name, address, product_id, product_title,
                quantity, unit_price_bdt, subtotal_bdt, delivery_charge_bdt,
                discount_bdt, promo_code, total_bdt, status, tracking_code,
                consignment_id, landing_page_slug, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                status = excluded.status,
                tracking_code = excluded.tracking_code,
                consignment_id = excluded.consignment_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&order.id)
        .bind(order.customer_name.inner())
        .bind(order.customer_phone.inner())
        .bind(&order.district_id)
        .bind(&order.district_name)
        .bind(&order.thana_id)
        .bind(&order.thana_name)
        .bind(&order.address)
        .bind(order.product_id.to_string())
        .bind(&order.product_title)
        .bind(order.quantity as i64)
        .bind(order.unit_price_bdt)
        .bind(order.subtotal_bdt)
        .bind(order.delivery_charge_bdt)
        .bind(order.discount_bdt)
        .bind(&order.promo_code)
        .bind(order.total_bdt)
        .bind(order.status.as_str())
        .bind(&order.tracking_code)
        .bind(&order.consignment_id)
        .bind(&order.landing_page_slug)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_order(
        &self,
        id: &str,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_order()?)),
            None => Ok(None),
        }
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let rows: Vec<OrderRow> =
            sqlx::query_as("SELECT * FROM orders ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: &OrderStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DbClient;
    use chrono::Duration;

    fn sample_order(id: &str) -> Order {
        let now = Utc::now();
        Order {
            id: id.to_string(),
            customer_name: Masked::from("Karima Begum".to_string()),
            customer_phone: Masked::from("01812345678".to_string()),
            district_id: "dhaka".to_string(),
            district_name: "Dhaka".to_string(),
            thana_id: "uttara".to_string(),
            thana_name: "Uttara".to_string(),
            address: "House 7, Sector 4".to_string(),
            product_id: Uuid::new_v4(),
            product_title: "Smart Money Saving Box".to_string(),
            quantity: 2,
            unit_price_bdt: 1200,
            subtotal_bdt: 2400,
            delivery_charge_bdt: 60,
            discount_bdt: 0,
            promo_code: None,
            total_bdt: 2460,
            status: OrderStatus::Pending,
            tracking_code: None,
            consignment_id: None,
            landing_page_slug: Some("eid-offer".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    async fn repo() -> (DbClient, SqliteOrderRepository) {
        let db = DbClient::in_memory().await.unwrap();
        let repo = SqliteOrderRepository::new(db.pool.clone());
        (db, repo)
    }

    #[tokio::test]
    async fn test_save_and_get_round_trip() {
        let (_db, repo) = repo().await;
        let order = sample_order("TBX-1724300000-AAAAAA");

        repo.save_order(&order).await.unwrap();
        let loaded = repo.get_order(&order.id).await.unwrap().unwrap();

        assert_eq!(loaded.id, order.id);
        assert_eq!(loaded.customer_phone.inner(), "01812345678");
        assert_eq!(loaded.total_bdt, 2460);
        assert_eq!(loaded.status, OrderStatus::Pending);
        assert_eq!(loaded.thana_name, "Uttara");
        assert!(loaded.tracking_code.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_order_is_none() {
        let (_db, repo) = repo().await;
        assert!(repo.get_order("TBX-0-MISSING").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resave_with_tracking_is_one_row() {
        let (_db, repo) = repo().await;
        let mut order = sample_order("TBX-1724300001-BBBBBB");

        repo.save_order(&order).await.unwrap();
        order.attach_tracking("15BAEB8A".to_string(), "73000001".to_string());
        repo.save_order(&order).await.unwrap();

        let all = repo.list_orders().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].tracking_code.as_deref(), Some("15BAEB8A"));
        assert_eq!(all[0].consignment_id.as_deref(), Some("73000001"));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (_db, repo) = repo().await;

        let mut old = sample_order("TBX-1724200000-OLDOLD");
        old.created_at = Utc::now() - Duration::hours(2);
        let fresh = sample_order("TBX-1724300002-NEWNEW");

        repo.save_order(&old).await.unwrap();
        repo.save_order(&fresh).await.unwrap();

        let all = repo.list_orders().await.unwrap();
        assert_eq!(all[0].id, fresh.id);
        assert_eq!(all[1].id, old.id);
    }

    #[tokio::test]
    async fn test_update_status() {
        let (_db, repo) = repo().await;
        let order = sample_order("TBX-1724300003-CCCCCC");
        repo.save_order(&order).await.unwrap();

        repo.update_status(&order.id, &OrderStatus::Confirmed)
            .await
            .unwrap();

        let loaded = repo.get_order(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, OrderStatus::Confirmed);
    }
}
