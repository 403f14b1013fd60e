use std::sync::Arc;

use takabox_catalog::{DeliverySettings, ProductRepository};
use takabox_order::{OrderRepository, SubmissionOrchestrator};
use takabox_pages::PageRepository;
use takabox_promo::PromoRepository;
use takabox_store::DbClient;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub db: DbClient,
    pub orders: Arc<dyn OrderRepository>,
    pub pages: Arc<dyn PageRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub promos: Arc<dyn PromoRepository>,
    pub orchestrator: Arc<SubmissionOrchestrator>,
    /// Fallback charges used when the admin has not stored overrides yet.
    pub delivery_defaults: DeliverySettings,
}

impl AppState {
    /// Current delivery settings: config defaults overlaid with whatever
    /// the admin has stored in the `delivery_settings` table.
    pub async fn delivery_settings(&self) -> Result<DeliverySettings, ApiError> {
        let settings = self
            .db
            .fetch_delivery_settings(self.delivery_defaults.clone())
            .await?;
        Ok(settings)
    }
}
