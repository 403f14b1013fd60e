use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::json;
use takabox_catalog::DeliverySettings;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/delivery-settings",
        get(get_settings).put(put_settings),
    )
}

/// GET /v1/delivery-settings
/// Effective settings: config defaults overlaid with stored overrides.
async fn get_settings(State(state): State<AppState>) -> Result<Json<DeliverySettings>, ApiError> {
    let settings = state.delivery_settings().await?;
    Ok(Json(settings))
}

/// PUT /v1/delivery-settings
/// Stores every field as its own override row so later partial reads merge
/// cleanly over the defaults.
async fn put_settings(
    State(state): State<AppState>,
    Json(settings): Json<DeliverySettings>,
) -> Result<Json<DeliverySettings>, ApiError> {
    if settings.inside_dhaka_charge_bdt < 0 || settings.outside_dhaka_charge_bdt < 0 {
        return Err(ApiError::ValidationError(
            "delivery charges cannot be negative".to_string(),
        ));
    }
    if settings.free_delivery_min_bdt < 0 {
        return Err(ApiError::ValidationError(
            "free delivery minimum cannot be negative".to_string(),
        ));
    }

    state
        .db
        .upsert_delivery_setting(
            "inside_dhaka_charge_bdt",
            &json!(settings.inside_dhaka_charge_bdt),
        )
        .await?;
    state
        .db
        .upsert_delivery_setting(
            "outside_dhaka_charge_bdt",
            &json!(settings.outside_dhaka_charge_bdt),
        )
        .await?;
    state
        .db
        .upsert_delivery_setting(
            "free_delivery_enabled",
            &json!(settings.free_delivery_enabled),
        )
        .await?;
    state
        .db
        .upsert_delivery_setting(
            "free_delivery_min_bdt",
            &json!(settings.free_delivery_min_bdt),
        )
        .await?;
    state
        .db
        .upsert_delivery_setting("steadfast_enabled", &json!(settings.steadfast_enabled))
        .await?;

    let merged = state.delivery_settings().await?;
    Ok(Json(merged))
}
