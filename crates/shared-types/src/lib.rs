//! # Shared Types Crate
//!
//! This crate contains the protocol vocabulary of the TAXII exchange: the
//! header names and values every request must carry, the descriptors kept in
//! the service catalog, and the JSON message bodies of the Discovery,
//! Collection and Poll services.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every message shape on the wire is defined here.
//! - **Closed Vocabularies**: service kinds, status types and content encodings
//!   are enums with exhaustive mappings; free-form tags only exist at the
//!   storage boundary.
//! - **Immutable Messages**: responses are built once by constructor functions
//!   and then serialized; nothing mutates them field by field.

pub mod entities;
pub mod errors;
pub mod messages;
pub mod protocol;

pub use entities::*;
pub use errors::*;
pub use messages::*;
pub use protocol::*;
