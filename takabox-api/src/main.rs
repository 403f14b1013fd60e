use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use takabox_api::{app, AppState};
use takabox_catalog::{Product, ProductRepository};
use takabox_core::courier::CourierAdapter;
use takabox_order::{SubmissionGuard, SubmissionOrchestrator};
use takabox_store::{
    DbClient, SqliteOrderRepository, SqlitePageRepository, SqliteProductRepository,
    SqlitePromoRepository, SteadfastClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "takabox_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = takabox_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Takabox API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to open database");
    db.migrate().await.expect("Failed to run migrations");

    let orders = Arc::new(SqliteOrderRepository::new(db.pool.clone()));
    let pages = Arc::new(SqlitePageRepository::new(db.pool.clone()));
    let products = Arc::new(SqliteProductRepository::new(db.pool.clone()));
    let promos = Arc::new(SqlitePromoRepository::new(db.pool.clone()));

    seed_default_product(products.as_ref()).await;

    // Courier wiring is optional: without credentials every submission is
    // recorded locally and the courier step reports SKIPPED.
    let courier: Option<Arc<dyn CourierAdapter>> = if config.steadfast.has_credentials() {
        match SteadfastClient::new(&config.steadfast) {
            Ok(client) => Some(Arc::new(client)),
            Err(err) => {
                tracing::warn!(error = %err, "could not build courier client, continuing without one");
                None
            }
        }
    } else {
        tracing::warn!("no Steadfast credentials configured, orders stay local-only");
        None
    };

    let guard = Arc::new(SubmissionGuard::new(Duration::from_secs(
        config.submission.guard_ttl_seconds,
    )));
    let orchestrator = Arc::new(SubmissionOrchestrator::new(
        orders.clone(),
        courier,
        guard,
    ));

    let app_state = AppState {
        db,
        orders,
        pages,
        products,
        promos,
        orchestrator,
        delivery_defaults: config.delivery.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// First boot on an empty database gets one sellable product so the
/// storefront renders something before the admin signs in.
async fn seed_default_product(products: &SqliteProductRepository) {
    match products.list_active_products().await {
        Ok(existing) if existing.is_empty() => {
            let mut product = Product::new("Smart Money Saving Box", 1200);
            product.description = Some("Digital coin bank that counts every deposit and tracks your savings goal".to_string());
            product.compare_at_bdt = Some(1500);
            if let Err(err) = products.upsert_product(&product).await {
                tracing::warn!(error = %err, "failed to seed default product");
            } else {
                tracing::info!(product_id = %product.id, "seeded default product");
            }
        }
        Ok(_) => {}
        Err(err) => tracing::warn!(error = %err, "could not inspect product catalogue"),
    }
}
