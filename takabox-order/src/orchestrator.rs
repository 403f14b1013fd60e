use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use takabox_core::courier::{Consignment, ConsignmentRequest, CourierAdapter, CourierError};
use thiserror::Error;
use uuid::Uuid;

use crate::guard::SubmissionGuard;
use crate::models::{Order, OrderRepository};

/// What happened on the courier side of a submission. The order itself is
/// already safe in the local store whichever variant comes back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourierSync {
    /// Courier hand-off is switched off, or no adapter is configured.
    Skipped,
    Registered {
        tracking_code: String,
        consignment_id: String,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub order: Order,
    pub courier: CourierSync,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission for draft {0} was already accepted")]
    DuplicateDraft(Uuid),
    #[error("failed to persist order: {0}")]
    Persistence(String),
}

/// Drives a checkout submission: local save first, then best-effort courier
/// registration.
pub struct SubmissionOrchestrator {
    repository: Arc<dyn OrderRepository>,
    courier: Option<Arc<dyn CourierAdapter>>,
    guard: Arc<SubmissionGuard>,
}

impl SubmissionOrchestrator {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        courier: Option<Arc<dyn CourierAdapter>>,
        guard: Arc<SubmissionGuard>,
    ) -> Self {
        Self {
            repository,
            courier,
            guard,
        }
    }

    /// Submits an assembled order.
    ///
    /// The draft slot stays claimed after an accepted submission so a retry
    /// inside the guard window cannot create a second order; it is released
    /// only when persistence fails. Courier trouble never fails the
    /// submission: the receipt reports it in [`CourierSync`].
    pub async fn submit(
        &self,
        draft_id: Uuid,
        order: Order,
        courier_enabled: bool,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if !self.guard.try_acquire(draft_id) {
            return Err(SubmitError::DuplicateDraft(draft_id));
        }

        if let Err(err) = self.repository.save_order(&order).await {
            self.guard.release(draft_id);
            return Err(SubmitError::Persistence(err.to_string()));
        }
        tracing::info!(order_id = %order.id, total_bdt = order.total_bdt, "order persisted");

        let (order, courier) = match (&self.courier, courier_enabled) {
            (Some(adapter), true) => self.register_consignment(adapter.clone(), order).await,
            _ => (order, CourierSync::Skipped),
        };

        Ok(SubmissionReceipt { order, courier })
    }

    /// Books the parcel and persists the tracking handle. The receipt only
    /// reports `Registered` once the tracking fields are saved; if that write
    /// fails the consignment id is logged for manual reconciliation and the
    /// untracked order stands.
    async fn register_consignment(
        &self,
        adapter: Arc<dyn CourierAdapter>,
        order: Order,
    ) -> (Order, CourierSync) {
        let request = consignment_request(&order);
        let consignment = match adapter.create_consignment(&request).await {
            Ok(consignment) => consignment,
            Err(err) => {
                tracing::warn!(order_id = %order.id, error = %err, "courier sync failed, order kept local");
                return (order, CourierSync::Failed { reason: err.to_string() });
            }
        };

        let mut tracked = order.clone();
        tracked.attach_tracking(
            consignment.tracking_code.clone(),
            consignment.consignment_id.to_string(),
        );

        match self.repository.save_order(&tracked).await {
            Ok(()) => {
                tracing::info!(
                    order_id = %tracked.id,
                    tracking_code = %consignment.tracking_code,
                    "consignment registered"
                );
                let courier = CourierSync::Registered {
                    tracking_code: consignment.tracking_code,
                    consignment_id: consignment.consignment_id.to_string(),
                };
                (tracked, courier)
            }
            Err(err) => {
                tracing::error!(
                    order_id = %order.id,
                    consignment_id = consignment.consignment_id,
                    error = %err,
                    "consignment created but tracking update failed"
                );
                let courier = CourierSync::Failed {
                    reason: format!("tracking update failed: {err}"),
                };
                (order, courier)
            }
        }
    }
}

/// Translates an order into the courier's booking shape. The parcel is cash
/// on delivery, so the collectable amount is the order total.
pub fn consignment_request(order: &Order) -> ConsignmentRequest {
    let address = format!(
        "{}, {}, {}",
        order.address, order.thana_name, order.district_name
    );

    ConsignmentRequest {
        invoice: order.id.clone(),
        recipient_name: order.customer_name.inner().clone(),
        recipient_phone: order.customer_phone.inner().clone(),
        recipient_address: address,
        cod_amount: order.total_bdt,
        note: Some(format!("{} x{}", order.product_title, order.quantity)),
    }
}

/// Test double for the courier. Hands out sequential consignment ids and
/// records every request it receives.
pub struct MockCourierAdapter {
    fail: bool,
    next_id: AtomicI64,
    requests: Mutex<Vec<ConsignmentRequest>>,
}

impl MockCourierAdapter {
    pub fn new() -> Self {
        Self {
            fail: false,
            next_id: AtomicI64::new(73000001),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A mock that refuses every booking, for outage scenarios.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn requests(&self) -> Vec<ConsignmentRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockCourierAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CourierAdapter for MockCourierAdapter {
    async fn create_consignment(
        &self,
        request: &ConsignmentRequest,
    ) -> Result<Consignment, CourierError> {
        if self.fail {
            return Err(CourierError::Transport(
                "simulated courier outage".to_string(),
            ));
        }
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(Consignment {
            consignment_id: id,
            tracking_code: format!("TRK{id:08X}"),
        })
    }
}
