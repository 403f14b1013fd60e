use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A booking request in the courier's expected shape.
///
/// `invoice` is our order id; the courier echoes it back on their merchant
/// panel, which is how support staff cross-reference shipments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsignmentRequest {
    pub invoice: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub recipient_address: String,
    pub cod_amount: i64,
    pub note: Option<String>,
}

/// The courier's record for a physical shipment.
///
/// `consignment_id` is numeric on the wire; callers persist it as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consignment {
    pub consignment_id: i64,
    pub tracking_code: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CourierError {
    #[error("Courier request failed: {0}")]
    Transport(String),

    #[error("Courier rejected the order (status {status}): {message}")]
    Rejected { status: i64, message: String },

    #[error("Courier response was malformed: {0}")]
    MalformedResponse(String),
}

#[async_trait]
pub trait CourierAdapter: Send + Sync {
    /// Register a consignment with the courier.
    async fn create_consignment(
        &self,
        request: &ConsignmentRequest,
    ) -> Result<Consignment, CourierError>;
}
