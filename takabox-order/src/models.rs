use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use takabox_shared::Masked;
use uuid::Uuid;

/// Order status in the fulfilment lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Legal forward moves. Cancellation is only possible while the parcel
    /// has not been handed to the courier.
    pub fn can_transition_to(&self, next: &OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Confirmed, Shipped)
                | (Shipped, Delivered)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
        )
    }

    /// The stored form, identical to the serde wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// The single source of truth for a customer's purchase.
///
/// Prices are whole taka. `tracking_code` and `consignment_id` stay `None`
/// until the courier accepts the parcel; an order is valid without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer_name: Masked<String>,
    pub customer_phone: Masked<String>,
    pub district_id: String,
    pub district_name: String,
    pub thana_id: String,
    pub thana_name: String,
    pub address: String,
    pub product_id: Uuid,
    pub product_title: String,
    pub quantity: u32,
    pub unit_price_bdt: i64,
    pub subtotal_bdt: i64,
    pub delivery_charge_bdt: i64,
    pub discount_bdt: i64,
    pub promo_code: Option<String>,
    pub total_bdt: i64,
    pub status: OrderStatus,
    pub tracking_code: Option<String>,
    pub consignment_id: Option<String>,
    pub landing_page_slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Update order status
    pub fn update_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }

    /// Record the courier handle once a consignment exists
    pub fn attach_tracking(&mut self, tracking_code: String, consignment_id: String) {
        self.tracking_code = Some(tracking_code);
        self.consignment_id = Some(consignment_id);
        self.updated_at = Utc::now();
    }

    pub fn has_tracking(&self) -> bool {
        self.tracking_code.is_some()
    }
}

#[async_trait::async_trait]
pub trait OrderRepository: Send + Sync {
    /// Upsert keyed on `order.id`; saving the same id twice must not
    /// produce a second row.
    async fn save_order(
        &self,
        order: &Order,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn get_order(
        &self,
        id: &str,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>>;

    /// Newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>>;

    async fn update_status(
        &self,
        id: &str,
        status: &OrderStatus,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
