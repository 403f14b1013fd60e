pub mod ids;
pub mod pii;

pub use ids::generate_order_id;
pub use pii::Masked;
