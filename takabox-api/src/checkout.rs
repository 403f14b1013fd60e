use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use takabox_catalog::{Product, ProductRepository};
use takabox_order::{
    assemble, OrderDraft, PricingEngine, PromoApplication, QuoteError, SubmissionReceipt,
    SubmitError,
};
use takabox_promo::{PromoCode, PromoRepository};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/checkout/quote", post(quote_checkout))
        .route("/v1/orders", post(submit_order))
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct QuoteRequest {
    /// Omitted means "the hero product", the first active catalogue entry.
    #[serde(default)]
    product_id: Option<Uuid>,
    quantity: u32,
    #[serde(default)]
    district_id: Option<String>,
    #[serde(default)]
    promo_code: Option<String>,
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    product_id: Uuid,
    product_title: String,
    unit_price_bdt: i64,
    quantity: u32,
    subtotal_bdt: i64,
    delivery_charge_bdt: i64,
    discount_bdt: i64,
    total_bdt: i64,
    promo: PromoApplication,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/checkout/quote
/// Prices a prospective order without creating anything. The storefront calls
/// this on every quantity/district/promo change.
async fn quote_checkout(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let settings = state.delivery_settings().await?;
    let product = resolve_product(&state, req.product_id).await?;
    let promo = lookup_promo(&state, req.promo_code.as_deref()).await?;

    let engine = PricingEngine::new(settings);
    let quote = engine
        .quote(
            product.price_bdt,
            req.quantity,
            req.district_id.as_deref(),
            req.promo_code.as_deref(),
            promo.as_ref(),
        )
        .map_err(quote_error)?;

    Ok(Json(QuoteResponse {
        product_id: product.id,
        product_title: product.title,
        unit_price_bdt: product.price_bdt,
        quantity: req.quantity,
        subtotal_bdt: quote.subtotal_bdt,
        delivery_charge_bdt: quote.delivery_charge_bdt,
        discount_bdt: quote.discount_bdt,
        total_bdt: quote.total_bdt,
        promo: quote.promo,
    }))
}

/// POST /v1/orders
/// Accepts a checkout draft. The order is always priced server-side; client
/// totals are never trusted.
async fn submit_order(
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), ApiError> {
    // 1. Price the draft against the live catalogue and settings.
    let settings = state.delivery_settings().await?;
    let product = state
        .products
        .get_product(draft.product_id)
        .await?
        .ok_or_else(|| ApiError::NotFoundError(format!("no product with id {}", draft.product_id)))?;
    if !product.is_active {
        return Err(ApiError::ValidationError(
            "product is no longer available".to_string(),
        ));
    }

    let promo = lookup_promo(&state, draft.promo_code.as_deref()).await?;
    let engine = PricingEngine::new(settings.clone());
    let quote = engine
        .quote(
            product.price_bdt,
            draft.quantity,
            draft.district_id.as_deref(),
            draft.promo_code.as_deref(),
            promo.as_ref(),
        )
        .map_err(quote_error)?;

    // 2. Validate contact and delivery details, producing the order record.
    let order =
        assemble(&draft, &product, &quote).map_err(|e| ApiError::ValidationError(e.to_string()))?;

    // 3. Persist locally, then hand off to the courier best-effort.
    let receipt = state
        .orchestrator
        .submit(draft.draft_id, order, settings.steadfast_enabled)
        .await
        .map_err(|e| match e {
            SubmitError::DuplicateDraft(_) => ApiError::ConflictError(e.to_string()),
            SubmitError::Persistence(_) => ApiError::InternalServerError(e.to_string()),
        })?;

    tracing::info!(
        order_id = %receipt.order.id,
        total_bdt = receipt.order.total_bdt,
        "order submitted"
    );
    Ok((StatusCode::CREATED, Json(receipt)))
}

// ============================================================================
// Shared lookups
// ============================================================================

async fn resolve_product(state: &AppState, id: Option<Uuid>) -> Result<Product, ApiError> {
    match id {
        Some(id) => state
            .products
            .get_product(id)
            .await?
            .ok_or_else(|| ApiError::NotFoundError(format!("no product with id {id}"))),
        None => {
            let mut products = state.products.list_active_products().await?;
            if products.is_empty() {
                return Err(ApiError::NotFoundError(
                    "the catalogue has no active products".to_string(),
                ));
            }
            Ok(products.remove(0))
        }
    }
}

async fn lookup_promo(state: &AppState, code: Option<&str>) -> Result<Option<PromoCode>, ApiError> {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => Ok(state.promos.find_code(code).await?),
        None => Ok(None),
    }
}

fn quote_error(err: QuoteError) -> ApiError {
    match err {
        QuoteError::ZeroQuantity => ApiError::ValidationError(err.to_string()),
        // A negative catalogue price is our data problem, not the caller's.
        QuoteError::NegativePrice => ApiError::InternalServerError(err.to_string()),
    }
}
