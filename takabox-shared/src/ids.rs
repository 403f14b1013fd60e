use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a customer-facing order id.
///
/// Format: TBX-{epoch}-{RAND6}. Customers quote these over the phone for
/// tracking, so they stay short and unambiguous (upper-cased).
pub fn generate_order_id() -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("TBX-{}-{}", timestamp, suffix.to_uppercase())
}
