pub mod app_config;
pub mod database;
pub mod order_repo;
pub mod page_repo;
pub mod product_repo;
pub mod promo_repo;
pub mod steadfast;

pub use app_config::Config;
pub use database::DbClient;
pub use order_repo::SqliteOrderRepository;
pub use page_repo::SqlitePageRepository;
pub use product_repo::SqliteProductRepository;
pub use promo_repo::SqlitePromoRepository;
pub use steadfast::SteadfastClient;
