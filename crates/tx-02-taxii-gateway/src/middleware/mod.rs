//! Middleware stack for the TAXII gateway.
//!
//! Layer order: Request → Tracing → Timeout → BodyLimit → Handler

pub mod timeout;
pub mod tracing;

pub use timeout::TimeoutLayer;
pub use self::tracing::TracingLayer;
