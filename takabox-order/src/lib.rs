//! Order lifecycle: pricing, assembly, and local-first submission.

pub mod assembler;
pub mod guard;
pub mod models;
pub mod orchestrator;
pub mod quote;

pub use assembler::{assemble, AssembleError, OrderDraft};
pub use guard::SubmissionGuard;
pub use models::{Order, OrderRepository, OrderStatus, UnknownStatus};
pub use orchestrator::{
    consignment_request, CourierSync, MockCourierAdapter, SubmissionOrchestrator,
    SubmissionReceipt, SubmitError,
};
pub use quote::{PricingEngine, PromoApplication, Quote, QuoteError};
