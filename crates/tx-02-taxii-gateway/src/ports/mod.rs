//! # Ports Layer
//!
//! - `outbound.rs` - Driven ports (content generation for Poll responses)
//!
//! The catalog read ports live in `tx-01-catalog-store`.

pub mod outbound;

pub use outbound::ContentProvider;
