use axum::{
    extract::Path,
    routing::get,
    Json, Router,
};
use takabox_core::geo::{self, District, Thana};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/geo/districts", get(list_districts))
        .route("/v1/geo/districts/{district_id}/thanas", get(list_thanas))
}

/// GET /v1/geo/districts
/// Pick-list of delivery districts for the checkout form.
async fn list_districts() -> Json<Vec<District>> {
    Json(geo::districts().to_vec())
}

/// GET /v1/geo/districts/:district_id/thanas
async fn list_thanas(Path(district_id): Path<String>) -> Result<Json<Vec<Thana>>, ApiError> {
    if geo::district_by_id(&district_id).is_none() {
        return Err(ApiError::NotFoundError(format!(
            "unknown district: {district_id}"
        )));
    }

    let thanas: Vec<Thana> = geo::thanas_by_district(&district_id)
        .into_iter()
        .copied()
        .collect();
    Ok(Json(thanas))
}
