use serde::{Deserialize, Serialize};

/// Delivery configuration. Defaults come from the config file; the admin
/// panel can override individual fields through the settings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySettings {
    /// Base rate for deliveries inside the Dhaka metro area, whole taka.
    #[serde(default = "default_inside_dhaka")]
    pub inside_dhaka_charge_bdt: i64,

    /// Base rate for everywhere else.
    #[serde(default = "default_outside_dhaka")]
    pub outside_dhaka_charge_bdt: i64,

    /// When enabled, orders at or above the minimum ship free.
    #[serde(default)]
    pub free_delivery_enabled: bool,

    #[serde(default = "default_free_delivery_min")]
    pub free_delivery_min_bdt: i64,

    /// Whether confirmed orders are forwarded to the Steadfast courier.
    #[serde(default)]
    pub steadfast_enabled: bool,
}

fn default_inside_dhaka() -> i64 { 60 }
fn default_outside_dhaka() -> i64 { 120 }
fn default_free_delivery_min() -> i64 { 2000 }

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            inside_dhaka_charge_bdt: default_inside_dhaka(),
            outside_dhaka_charge_bdt: default_outside_dhaka(),
            free_delivery_enabled: false,
            free_delivery_min_bdt: default_free_delivery_min(),
            steadfast_enabled: false,
        }
    }
}

/// Resolve the delivery charge for a destination.
///
/// The capital-region flag is passed in rather than derived here: the rate
/// split is the caller's geography concern, this function only prices it.
pub fn resolve_delivery_charge(
    subtotal_bdt: i64,
    is_dhaka: bool,
    settings: &DeliverySettings,
) -> i64 {
    if settings.free_delivery_enabled && subtotal_bdt >= settings.free_delivery_min_bdt {
        return 0;
    }

    if is_dhaka {
        settings.inside_dhaka_charge_bdt
    } else {
        settings.outside_dhaka_charge_bdt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> DeliverySettings {
        DeliverySettings {
            inside_dhaka_charge_bdt: 60,
            outside_dhaka_charge_bdt: 120,
            free_delivery_enabled: false,
            free_delivery_min_bdt: 2000,
            steadfast_enabled: false,
        }
    }

    #[test]
    fn test_capital_rate_differs_from_outside_rate() {
        let s = settings();
        assert_eq!(resolve_delivery_charge(1200, true, &s), 60);
        assert_eq!(resolve_delivery_charge(1200, false, &s), 120);
    }

    #[test]
    fn test_free_delivery_threshold_zeroes_the_charge() {
        let mut s = settings();
        s.free_delivery_enabled = true;

        // Subtotal 2400 meets the configured minimum of 2000
        assert_eq!(resolve_delivery_charge(2400, true, &s), 0);
        assert_eq!(resolve_delivery_charge(2400, false, &s), 0);

        // Exactly at the threshold also qualifies
        assert_eq!(resolve_delivery_charge(2000, false, &s), 0);

        // Below the threshold pays the base rate
        assert_eq!(resolve_delivery_charge(1999, false, &s), 120);
    }

    #[test]
    fn test_threshold_ignored_when_free_delivery_disabled() {
        let s = settings();
        assert_eq!(resolve_delivery_charge(99_999, true, &s), 60);
    }
}
