use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use takabox_core::courier::{Consignment, ConsignmentRequest, CourierAdapter, CourierError};

use crate::app_config::SteadfastConfig;

/// HTTP client for the Steadfast merchant API.
///
/// Steadfast wraps everything in a JSON envelope with its own `status` field;
/// the HTTP status is not authoritative, so success is `status == 200` plus a
/// consignment payload.
pub struct SteadfastClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct CreateOrderResponse {
    status: i64,
    #[serde(default)]
    consignment: Option<ConsignmentPayload>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConsignmentPayload {
    consignment_id: i64,
    tracking_code: String,
}

impl SteadfastClient {
    pub fn new(config: &SteadfastConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            secret_key: config.secret_key.clone(),
        })
    }
}

#[async_trait]
impl CourierAdapter for SteadfastClient {
    async fn create_consignment(
        &self,
        request: &ConsignmentRequest,
    ) -> Result<Consignment, CourierError> {
        let url = format!("{}/create_order", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("Secret-Key", &self.secret_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CourierError::Transport(e.to_string()))?;

        let http_status = response.status();
        let body: CreateOrderResponse = response
            .json()
            .await
            .map_err(|e| CourierError::MalformedResponse(format!("http {http_status}: {e}")))?;

        if body.status != 200 {
            return Err(CourierError::Rejected {
                status: body.status,
                message: body
                    .message
                    .unwrap_or_else(|| format!("http {http_status}")),
            });
        }

        let consignment = body.consignment.ok_or_else(|| {
            CourierError::MalformedResponse("success response missing consignment".to_string())
        })?;

        Ok(Consignment {
            consignment_id: consignment.consignment_id,
            tracking_code: consignment.tracking_code,
        })
    }
}
