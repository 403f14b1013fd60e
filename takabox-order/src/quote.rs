use serde::{Deserialize, Serialize};
use takabox_catalog::{resolve_delivery_charge, DeliverySettings};
use takabox_core::geo::is_dhaka_district;
use takabox_promo::{evaluate_code, PromoCode, PromoRejection};
use thiserror::Error;

/// Priced breakdown for a prospective order. All amounts are whole taka and
/// `total_bdt` is always `subtotal + delivery - discount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub subtotal_bdt: i64,
    pub delivery_charge_bdt: i64,
    pub discount_bdt: i64,
    pub total_bdt: i64,
    pub promo: PromoApplication,
}

/// Outcome of the promo code attached to a quote. A rejected code never
/// fails the quote; it prices as if no code was entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoApplication {
    None,
    Applied { code: String, discount_bdt: i64 },
    Rejected { code: String, reason: PromoRejection },
}

impl PromoApplication {
    /// The code to persist on the order, present only when it was applied.
    pub fn applied_code(&self) -> Option<&str> {
        match self {
            PromoApplication::Applied { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum QuoteError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("unit price cannot be negative")]
    NegativePrice,
}

/// Prices orders against the current delivery settings.
pub struct PricingEngine {
    settings: DeliverySettings,
}

impl PricingEngine {
    pub fn new(settings: DeliverySettings) -> Self {
        Self { settings }
    }

    /// Computes the full price breakdown.
    ///
    /// `district_id` of `None` (or empty) means the customer has not picked a
    /// district yet, and the delivery charge is 0 until they do. `promo` is
    /// the repository lookup for `promo_code`; `None` with a code present
    /// means the code does not exist.
    pub fn quote(
        &self,
        unit_price_bdt: i64,
        quantity: u32,
        district_id: Option<&str>,
        promo_code: Option<&str>,
        promo: Option<&PromoCode>,
    ) -> Result<Quote, QuoteError> {
        if quantity == 0 {
            return Err(QuoteError::ZeroQuantity);
        }
        if unit_price_bdt < 0 {
            return Err(QuoteError::NegativePrice);
        }

        let subtotal_bdt = unit_price_bdt * quantity as i64;

        let delivery_charge_bdt = match district_id {
            Some(id) if !id.trim().is_empty() => {
                resolve_delivery_charge(subtotal_bdt, is_dhaka_district(id), &self.settings)
            }
            _ => 0,
        };

        let promo = match promo_code.map(str::trim).filter(|c| !c.is_empty()) {
            None => PromoApplication::None,
            Some(code) => {
                let code = code.to_uppercase();
                match evaluate_code(promo, subtotal_bdt) {
                    Ok(discount_bdt) => PromoApplication::Applied { code, discount_bdt },
                    Err(reason) => PromoApplication::Rejected { code, reason },
                }
            }
        };

        // evaluate_code already clamps to 0..=subtotal, so the total can
        // never go negative.
        let discount_bdt = match &promo {
            PromoApplication::Applied { discount_bdt, .. } => *discount_bdt,
            _ => 0,
        };

        let total_bdt = subtotal_bdt + delivery_charge_bdt - discount_bdt;

        Ok(Quote {
            subtotal_bdt,
            delivery_charge_bdt,
            discount_bdt,
            total_bdt,
            promo,
        })
    }
}
