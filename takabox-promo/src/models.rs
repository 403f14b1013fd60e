use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a promo code reduces the order subtotal. Stored as tagged JSON so new
/// rule kinds can be added without a schema migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountRule {
    Percentage { percent: i64 },
    FixedAmount { amount_bdt: i64 },
}

/// An admin-managed promotional code.
///
/// Codes are matched case-insensitively; the canonical form is uppercase and
/// the constructor normalizes to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub rule: DiscountRule,
    /// Minimum order subtotal (taka) required before the code applies.
    pub min_order_bdt: i64,
    pub is_active: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PromoCode {
    pub fn new(code: &str, rule: DiscountRule) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.trim().to_uppercase(),
            rule,
            min_order_bdt: 0,
            is_active: true,
            starts_at: None,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_started(&self) -> bool {
        match self.starts_at {
            Some(start) => Utc::now() >= start,
            None => true,
        }
    }

    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expiry) => Utc::now() > expiry,
            None => false,
        }
    }

    /// True when the code is active and inside its validity window.
    pub fn is_redeemable(&self) -> bool {
        self.is_active && self.is_started() && !self.is_expired()
    }
}

#[async_trait::async_trait]
pub trait PromoRepository: Send + Sync {
    async fn upsert_code(
        &self,
        promo: &PromoCode,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Lookup is by normalized (uppercase) code.
    async fn find_code(
        &self,
        code: &str,
    ) -> Result<Option<PromoCode>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_codes(&self) -> Result<Vec<PromoCode>, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_constructor_normalizes_code() {
        let promo = PromoCode::new("  save10 ", DiscountRule::Percentage { percent: 10 });
        assert_eq!(promo.code, "SAVE10");
        assert!(promo.is_active);
        assert_eq!(promo.min_order_bdt, 0);
    }

    #[test]
    fn test_expiry_window() {
        let mut promo = PromoCode::new("EID25", DiscountRule::FixedAmount { amount_bdt: 100 });
        assert!(!promo.is_expired());
        assert!(promo.is_redeemable());

        promo.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(promo.is_expired());
        assert!(!promo.is_redeemable());
    }

    #[test]
    fn test_not_yet_started_is_not_redeemable() {
        let mut promo = PromoCode::new("LAUNCH", DiscountRule::Percentage { percent: 15 });
        promo.starts_at = Some(Utc::now() + Duration::days(1));
        assert!(!promo.is_started());
        assert!(!promo.is_redeemable());
    }

    #[test]
    fn test_rule_wire_format() {
        let rule = DiscountRule::Percentage { percent: 10 };
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"type":"PERCENTAGE","percent":10}"#);

        let back: DiscountRule = serde_json::from_str(r#"{"type":"FIXED_AMOUNT","amount_bdt":50}"#).unwrap();
        assert_eq!(back, DiscountRule::FixedAmount { amount_bdt: 50 });
    }
}
