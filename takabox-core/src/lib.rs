pub mod courier;
pub mod geo;

pub use courier::{Consignment, ConsignmentRequest, CourierAdapter, CourierError};
