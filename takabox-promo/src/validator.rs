use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DiscountRule, PromoCode};

/// Why a promo code was not applied. Serialized into quote responses so the
/// storefront can show a reason next to the promo field.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoRejection {
    #[error("promo code not found")]
    Unknown,
    #[error("promo code is not active")]
    Inactive,
    #[error("promo code has expired")]
    Expired,
    #[error("order subtotal is below the minimum of {min_order_bdt} taka")]
    BelowMinimum { min_order_bdt: i64 },
}

/// Evaluates a looked-up code against the current subtotal.
///
/// `candidate` is `None` when the repository had no row for the code, which
/// maps to [`PromoRejection::Unknown`]. On success the discount is already
/// clamped to `0..=subtotal_bdt`.
pub fn evaluate_code(
    candidate: Option<&PromoCode>,
    subtotal_bdt: i64,
) -> Result<i64, PromoRejection> {
    let promo = candidate.ok_or(PromoRejection::Unknown)?;

    if !promo.is_active || !promo.is_started() {
        return Err(PromoRejection::Inactive);
    }
    if promo.is_expired() {
        return Err(PromoRejection::Expired);
    }
    if subtotal_bdt < promo.min_order_bdt {
        return Err(PromoRejection::BelowMinimum {
            min_order_bdt: promo.min_order_bdt,
        });
    }

    Ok(calculate_discount(&promo.rule, subtotal_bdt))
}

/// Money math for a single rule. Percentages round half-up to the nearest
/// taka, and the result never exceeds the subtotal or drops below zero.
pub fn calculate_discount(rule: &DiscountRule, subtotal_bdt: i64) -> i64 {
    let raw = match rule {
        DiscountRule::Percentage { percent } => (subtotal_bdt * percent + 50) / 100,
        DiscountRule::FixedAmount { amount_bdt } => *amount_bdt,
    };
    raw.clamp(0, subtotal_bdt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PromoCode;
    use chrono::{Duration, Utc};

    fn percent_code(percent: i64) -> PromoCode {
        PromoCode::new("SAVE10", DiscountRule::Percentage { percent })
    }

    #[test]
    fn test_ten_percent_discount() {
        let promo = percent_code(10);
        let discount = evaluate_code(Some(&promo), 1200).unwrap();
        assert_eq!(discount, 120);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let result = evaluate_code(None, 1200);
        assert_eq!(result, Err(PromoRejection::Unknown));
    }

    #[test]
    fn test_expired_code_is_rejected() {
        let mut promo = percent_code(10);
        promo.expires_at = Some(Utc::now() - Duration::minutes(5));
        assert_eq!(evaluate_code(Some(&promo), 1200), Err(PromoRejection::Expired));
    }

    #[test]
    fn test_inactive_code_is_rejected() {
        let mut promo = percent_code(10);
        promo.is_active = false;
        assert_eq!(evaluate_code(Some(&promo), 1200), Err(PromoRejection::Inactive));
    }

    #[test]
    fn test_minimum_order_enforced() {
        let mut promo = percent_code(10);
        promo.min_order_bdt = 2000;
        assert_eq!(
            evaluate_code(Some(&promo), 1200),
            Err(PromoRejection::BelowMinimum { min_order_bdt: 2000 })
        );
        assert_eq!(evaluate_code(Some(&promo), 2000), Ok(200));
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 5% of 1250 is 62.5 taka.
        assert_eq!(calculate_discount(&DiscountRule::Percentage { percent: 5 }, 1250), 63);
        // 10% of 1234 is 123.4 taka.
        assert_eq!(calculate_discount(&DiscountRule::Percentage { percent: 10 }, 1234), 123);
    }

    #[test]
    fn test_discount_clamped_to_subtotal() {
        let rule = DiscountRule::FixedAmount { amount_bdt: 500 };
        assert_eq!(calculate_discount(&rule, 300), 300);
        assert_eq!(calculate_discount(&rule, 500), 500);
        assert_eq!(calculate_discount(&DiscountRule::FixedAmount { amount_bdt: -50 }, 300), 0);
    }
}
