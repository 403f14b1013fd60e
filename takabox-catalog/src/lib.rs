pub mod delivery;
pub mod product;

pub use delivery::{resolve_delivery_charge, DeliverySettings};
pub use product::{Product, ProductRepository};
