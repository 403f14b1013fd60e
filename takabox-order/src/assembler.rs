use serde::Deserialize;
use takabox_catalog::Product;
use takabox_core::geo;
use takabox_shared::{generate_order_id, Masked};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Order, OrderStatus};
use crate::quote::Quote;

/// Raw checkout form as submitted by the storefront. `draft_id` is minted by
/// the client when the form is first rendered and identifies this submission
/// attempt across retries.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    pub draft_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub district_id: Option<String>,
    pub thana_id: Option<String>,
    pub address: String,
    pub product_id: Uuid,
    pub quantity: u32,
    pub promo_code: Option<String>,
    pub landing_page_slug: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum AssembleError {
    #[error("customer name is required")]
    MissingName,
    #[error("a valid Bangladeshi mobile number is required")]
    InvalidPhone,
    #[error("delivery address is required")]
    MissingAddress,
    #[error("a delivery district is required")]
    MissingDistrict,
    #[error("a delivery thana is required")]
    MissingThana,
    #[error("unknown district: {0}")]
    UnknownDistrict(String),
    #[error("thana {0} does not belong to the selected district")]
    UnknownThana(String),
    #[error("product is not available for ordering")]
    InactiveProduct,
}

/// Builds a persistable [`Order`] from a validated draft and its quote.
///
/// The quote must have been computed from the same product and draft fields;
/// the assembler copies its amounts verbatim and never re-prices.
pub fn assemble(draft: &OrderDraft, product: &Product, quote: &Quote) -> Result<Order, AssembleError> {
    let name = draft.customer_name.trim();
    if name.is_empty() {
        return Err(AssembleError::MissingName);
    }

    let phone = draft.customer_phone.trim();
    if !is_valid_bd_mobile(phone) {
        return Err(AssembleError::InvalidPhone);
    }

    let address = draft.address.trim();
    if address.is_empty() {
        return Err(AssembleError::MissingAddress);
    }

    if !product.is_active {
        return Err(AssembleError::InactiveProduct);
    }

    // Quotes tolerate an unpicked district; a submitted order does not.
    let district_id = normalized(&draft.district_id).ok_or(AssembleError::MissingDistrict)?;
    let district = geo::district_by_id(district_id)
        .ok_or_else(|| AssembleError::UnknownDistrict(district_id.to_string()))?;

    let thana_id = normalized(&draft.thana_id).ok_or(AssembleError::MissingThana)?;
    let thana = geo::thana_by_id(thana_id)
        .filter(|t| t.district_id == district.id)
        .ok_or_else(|| AssembleError::UnknownThana(thana_id.to_string()))?;

    let now = chrono::Utc::now();
    Ok(Order {
        id: generate_order_id(),
        customer_name: Masked::from(name.to_string()),
        customer_phone: Masked::from(phone.to_string()),
        district_id: district.id.to_string(),
        district_name: district.name_en.to_string(),
        thana_id: thana.id.to_string(),
        thana_name: thana.name_en.to_string(),
        address: address.to_string(),
        product_id: product.id,
        product_title: product.title.clone(),
        quantity: draft.quantity,
        unit_price_bdt: product.price_bdt,
        subtotal_bdt: quote.subtotal_bdt,
        delivery_charge_bdt: quote.delivery_charge_bdt,
        discount_bdt: quote.discount_bdt,
        promo_code: quote.promo.applied_code().map(str::to_string),
        total_bdt: quote.total_bdt,
        status: OrderStatus::Pending,
        tracking_code: None,
        consignment_id: None,
        landing_page_slug: draft.landing_page_slug.clone(),
        created_at: now,
        updated_at: now,
    })
}

fn normalized(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Matches the operator-assigned mobile ranges: 11 digits, `01` prefix,
/// third digit 3 through 9.
fn is_valid_bd_mobile(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes.starts_with(b"01")
        && (b'3'..=b'9').contains(&bytes[2])
        && bytes.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::PricingEngine;
    use takabox_catalog::DeliverySettings;

    fn draft() -> OrderDraft {
        OrderDraft {
            draft_id: Uuid::new_v4(),
            customer_name: "Rahim Uddin".to_string(),
            customer_phone: "01712345678".to_string(),
            district_id: Some("dhaka".to_string()),
            thana_id: Some("dhanmondi".to_string()),
            address: "House 12, Road 5, Dhanmondi".to_string(),
            product_id: Uuid::new_v4(),
            quantity: 2,
            promo_code: None,
            landing_page_slug: Some("eid-offer".to_string()),
        }
    }

    fn product() -> Product {
        Product::new("Smart Money Saving Box", 1200)
    }

    fn quote_for(draft: &OrderDraft, product: &Product) -> Quote {
        PricingEngine::new(DeliverySettings::default())
            .quote(
                product.price_bdt,
                draft.quantity,
                draft.district_id.as_deref(),
                draft.promo_code.as_deref(),
                None,
            )
            .unwrap()
    }

    #[test]
    fn test_assembles_full_order() {
        let draft = draft();
        let product = product();
        let quote = quote_for(&draft, &product);

        let order = assemble(&draft, &product, &quote).unwrap();

        assert!(order.id.starts_with("TBX-"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.quantity, 2);
        assert_eq!(order.subtotal_bdt, 2400);
        assert_eq!(order.total_bdt, quote.total_bdt);
        assert_eq!(order.district_name, "Dhaka");
        assert_eq!(order.thana_name, "Dhanmondi");
        assert_eq!(order.landing_page_slug.as_deref(), Some("eid-offer"));
        assert!(order.tracking_code.is_none());
        assert_eq!(order.promo_code, None);
    }

    #[test]
    fn test_masked_fields_do_not_leak_in_debug() {
        let draft = draft();
        let product = product();
        let quote = quote_for(&draft, &product);
        let order = assemble(&draft, &product, &quote).unwrap();

        let dump = format!("{:?}", order);
        assert!(!dump.contains("01712345678"));
        assert!(!dump.contains("Rahim"));
    }

    #[test]
    fn test_rejects_bad_phone() {
        let product = product();
        for phone in ["12345", "01212345678", "0171234567", "017123456789", "0171234567x"] {
            let mut d = draft();
            d.customer_phone = phone.to_string();
            let quote = quote_for(&d, &product);
            assert_eq!(
                assemble(&d, &product, &quote),
                Err(AssembleError::InvalidPhone),
                "{phone} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_blank_name_and_address() {
        let product = product();

        let mut d = draft();
        d.customer_name = "   ".to_string();
        let quote = quote_for(&d, &product);
        assert_eq!(assemble(&d, &product, &quote), Err(AssembleError::MissingName));

        let mut d = draft();
        d.address = String::new();
        let quote = quote_for(&d, &product);
        assert_eq!(assemble(&d, &product, &quote), Err(AssembleError::MissingAddress));
    }

    #[test]
    fn test_rejects_unknown_geo() {
        let product = product();

        let mut d = draft();
        d.district_id = Some("atlantis".to_string());
        let quote = quote_for(&d, &product);
        assert_eq!(
            assemble(&d, &product, &quote),
            Err(AssembleError::UnknownDistrict("atlantis".to_string()))
        );

        // A real thana, but from another district.
        let mut d = draft();
        d.district_id = Some("chattogram".to_string());
        d.thana_id = Some("dhanmondi".to_string());
        let quote = quote_for(&d, &product);
        assert_eq!(
            assemble(&d, &product, &quote),
            Err(AssembleError::UnknownThana("dhanmondi".to_string()))
        );
    }

    #[test]
    fn test_requires_district_and_thana() {
        let product = product();

        let mut d = draft();
        d.district_id = None;
        d.thana_id = None;
        let quote = quote_for(&d, &product);
        assert_eq!(
            assemble(&d, &product, &quote),
            Err(AssembleError::MissingDistrict)
        );

        let mut d = draft();
        d.thana_id = Some("  ".to_string());
        let quote = quote_for(&d, &product);
        assert_eq!(assemble(&d, &product, &quote), Err(AssembleError::MissingThana));
    }

    #[test]
    fn test_rejects_inactive_product() {
        let d = draft();
        let mut product = product();
        product.is_active = false;
        let quote = quote_for(&d, &product);
        assert_eq!(assemble(&d, &product, &quote), Err(AssembleError::InactiveProduct));
    }
}
