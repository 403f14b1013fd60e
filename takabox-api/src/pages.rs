use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use takabox_pages::{
    codec::{decode_sections, encode_sections},
    is_valid_slug, LandingPage, PageRepository, PageSection,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/landing-pages", get(list_pages).post(create_page))
        .route(
            "/v1/landing-pages/{id}",
            get(get_page).put(update_page).delete(delete_page),
        )
        .route("/v1/landing-pages/by-slug/{slug}", get(get_page_by_slug))
}

// ============================================================================
// Wire types
// ============================================================================
//
// On the admin surface the `sections` field travels as a JSON-encoded string,
// not a nested array. The builder UI edits sections as an opaque document and
// round-trips it verbatim, so the API owns encode/decode at the boundary.

#[derive(Debug, Deserialize)]
struct PagePayload {
    slug: String,
    title: String,
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    subheadline: Option<String>,
    #[serde(default)]
    cta_text: Option<String>,
    #[serde(default)]
    header_code: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
    /// Sections as a JSON string, e.g. `"[{\"type\":\"hero\",...}]"`.
    #[serde(default)]
    sections: String,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct PageResponse {
    id: Uuid,
    slug: String,
    title: String,
    headline: Option<String>,
    subheadline: Option<String>,
    cta_text: Option<String>,
    header_code: Option<String>,
    is_active: bool,
    /// Sections as a JSON string, mirroring the request shape.
    sections: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PageResponse {
    fn from_page(page: LandingPage) -> Result<Self, ApiError> {
        let sections = encode_sections(&page.sections)
            .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
        Ok(Self {
            id: page.id,
            slug: page.slug,
            title: page.title,
            headline: page.headline,
            subheadline: page.subheadline,
            cta_text: page.cta_text,
            header_code: page.header_code,
            is_active: page.is_active,
            sections,
            created_at: page.created_at,
            updated_at: page.updated_at,
        })
    }
}

/// Render payload for the public storefront: only active sections, already
/// ordered, as structured JSON.
#[derive(Debug, Serialize)]
struct PublicPageResponse {
    slug: String,
    title: String,
    headline: Option<String>,
    subheadline: Option<String>,
    cta_text: Option<String>,
    header_code: Option<String>,
    sections: Vec<PageSection>,
}

impl PublicPageResponse {
    fn from_page(page: LandingPage) -> Self {
        let sections = page.display_sections().into_iter().cloned().collect();
        Self {
            slug: page.slug,
            title: page.title,
            headline: page.headline,
            subheadline: page.subheadline,
            cta_text: page.cta_text,
            header_code: page.header_code,
            sections,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/landing-pages
/// Every page, active or not (admin list).
async fn list_pages(State(state): State<AppState>) -> Result<Json<Vec<PageResponse>>, ApiError> {
    let pages = state.pages.list_pages().await?;
    let mut out = Vec::with_capacity(pages.len());
    for page in pages {
        out.push(PageResponse::from_page(page)?);
    }
    Ok(Json(out))
}

/// POST /v1/landing-pages
async fn create_page(
    State(state): State<AppState>,
    Json(payload): Json<PagePayload>,
) -> Result<(StatusCode, Json<PageResponse>), ApiError> {
    let sections = validate_payload(&payload)?;

    if state.pages.get_page_by_slug(&payload.slug).await?.is_some() {
        return Err(ApiError::ConflictError(format!(
            "a landing page with slug '{}' already exists",
            payload.slug
        )));
    }

    let mut page = LandingPage::new(payload.slug.clone(), payload.title.trim().to_string());
    apply_payload(&mut page, payload, sections);

    state.pages.upsert_page(&page).await?;
    tracing::info!(page_id = %page.id, slug = %page.slug, "landing page created");
    Ok((StatusCode::CREATED, Json(PageResponse::from_page(page)?)))
}

/// GET /v1/landing-pages/:id
async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PageResponse>, ApiError> {
    let page = state
        .pages
        .get_page(&id)
        .await?
        .ok_or_else(|| ApiError::NotFoundError(format!("no landing page with id {id}")))?;
    Ok(Json(PageResponse::from_page(page)?))
}

/// PUT /v1/landing-pages/:id
async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PagePayload>,
) -> Result<Json<PageResponse>, ApiError> {
    let sections = validate_payload(&payload)?;

    let mut page = state
        .pages
        .get_page(&id)
        .await?
        .ok_or_else(|| ApiError::NotFoundError(format!("no landing page with id {id}")))?;

    // A renamed slug must not collide with another page.
    if let Some(other) = state.pages.get_page_by_slug(&payload.slug).await? {
        if other.id != id {
            return Err(ApiError::ConflictError(format!(
                "a landing page with slug '{}' already exists",
                payload.slug
            )));
        }
    }

    page.slug = payload.slug.clone();
    page.title = payload.title.trim().to_string();
    apply_payload(&mut page, payload, sections);
    page.touch();

    state.pages.upsert_page(&page).await?;
    Ok(Json(PageResponse::from_page(page)?))
}

/// DELETE /v1/landing-pages/:id
async fn delete_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.pages.delete_page(&id).await? {
        return Err(ApiError::NotFoundError(format!(
            "no landing page with id {id}"
        )));
    }
    tracing::info!(page_id = %id, "landing page deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/landing-pages/by-slug/:slug
/// Public lookup for the storefront; inactive pages are invisible here.
async fn get_page_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicPageResponse>, ApiError> {
    let page = state
        .pages
        .get_page_by_slug(&slug)
        .await?
        .filter(|p| p.is_active)
        .ok_or_else(|| ApiError::NotFoundError(format!("no landing page at '{slug}'")))?;
    Ok(Json(PublicPageResponse::from_page(page)))
}

// ============================================================================
// Shared validation
// ============================================================================

/// Checks slug/title and strictly decodes the sections string. Write paths
/// refuse malformed sections outright rather than storing something the read
/// path would silently drop.
fn validate_payload(payload: &PagePayload) -> Result<Vec<PageSection>, ApiError> {
    if !is_valid_slug(&payload.slug) {
        return Err(ApiError::ValidationError(format!(
            "'{}' is not a valid slug: use lowercase letters, digits and hyphens",
            payload.slug
        )));
    }
    if payload.title.trim().is_empty() {
        return Err(ApiError::ValidationError(
            "page title is required".to_string(),
        ));
    }
    decode_sections(&payload.sections).map_err(|e| ApiError::ValidationError(e.to_string()))
}

fn apply_payload(page: &mut LandingPage, payload: PagePayload, sections: Vec<PageSection>) {
    page.headline = payload.headline;
    page.subheadline = payload.subheadline;
    page.cta_text = payload.cta_text;
    page.header_code = payload.header_code;
    page.is_active = payload.is_active;
    page.sections = sections;
}
