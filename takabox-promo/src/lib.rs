//! Promo code catalogue and discount evaluation.

pub mod models;
pub mod validator;

pub use models::{DiscountRule, PromoCode, PromoRepository};
pub use validator::{calculate_discount, evaluate_code, PromoRejection};
