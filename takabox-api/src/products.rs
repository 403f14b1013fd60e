use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use takabox_catalog::{Product, ProductRepository};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/products", get(list_products).post(save_product))
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ProductPayload {
    /// Present when editing an existing product, absent when creating.
    id: Option<Uuid>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    price_bdt: i64,
    #[serde(default)]
    compare_at_bdt: Option<i64>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/products
/// Active products, oldest first. Index zero is the landing-page hero.
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.list_active_products().await?;
    Ok(Json(products))
}

/// POST /v1/products
/// Create or update a product (admin).
async fn save_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "product title is required".to_string(),
        ));
    }
    if payload.price_bdt <= 0 {
        return Err(ApiError::ValidationError(
            "price must be a positive amount in taka".to_string(),
        ));
    }

    let mut product = match payload.id {
        Some(id) => state
            .products
            .get_product(id)
            .await?
            .ok_or_else(|| ApiError::NotFoundError(format!("no product with id {id}")))?,
        None => Product::new(payload.title.trim(), payload.price_bdt),
    };

    product.title = payload.title.trim().to_string();
    product.description = payload.description;
    product.price_bdt = payload.price_bdt;
    product.compare_at_bdt = payload.compare_at_bdt;
    product.image_url = payload.image_url;
    product.is_active = payload.is_active;

    state.products.upsert_product(&product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
