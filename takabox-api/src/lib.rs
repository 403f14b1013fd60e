use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod checkout;
pub mod error;
pub mod geo;
pub mod orders;
pub mod pages;
pub mod products;
pub mod promos;
pub mod settings;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The storefront and the admin panel are separate origins in production.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .merge(checkout::routes())
        .merge(orders::routes())
        .merge(pages::routes())
        .merge(products::routes())
        .merge(promos::routes())
        .merge(settings::routes())
        .merge(geo::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
