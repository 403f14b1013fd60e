use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use takabox_promo::{DiscountRule, PromoCode, PromoRepository};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/promo-codes", get(list_codes).post(save_code))
}

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
struct PromoPayload {
    code: String,
    rule: DiscountRule,
    #[serde(default)]
    min_order_bdt: i64,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/promo-codes
async fn list_codes(State(state): State<AppState>) -> Result<Json<Vec<PromoCode>>, ApiError> {
    let codes = state.promos.list_codes().await?;
    Ok(Json(codes))
}

/// POST /v1/promo-codes
/// Create or update a code (admin). Posting an existing code edits it in
/// place; codes are matched case-insensitively.
async fn save_code(
    State(state): State<AppState>,
    Json(payload): Json<PromoPayload>,
) -> Result<(StatusCode, Json<PromoCode>), ApiError> {
    if payload.code.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "promo code cannot be empty".to_string(),
        ));
    }
    match payload.rule {
        DiscountRule::Percentage { percent } if !(1..=100).contains(&percent) => {
            return Err(ApiError::ValidationError(
                "percentage discount must be between 1 and 100".to_string(),
            ));
        }
        DiscountRule::FixedAmount { amount_bdt } if amount_bdt <= 0 => {
            return Err(ApiError::ValidationError(
                "fixed discount must be a positive amount in taka".to_string(),
            ));
        }
        _ => {}
    }
    if payload.min_order_bdt < 0 {
        return Err(ApiError::ValidationError(
            "minimum order cannot be negative".to_string(),
        ));
    }

    let mut promo = match state.promos.find_code(&payload.code).await? {
        Some(existing) => existing,
        None => PromoCode::new(&payload.code, payload.rule.clone()),
    };

    promo.rule = payload.rule;
    promo.min_order_bdt = payload.min_order_bdt;
    promo.is_active = payload.is_active;
    promo.starts_at = payload.starts_at;
    promo.expires_at = payload.expires_at;

    state.promos.upsert_code(&promo).await?;
    Ok((StatusCode::CREATED, Json(promo)))
}
