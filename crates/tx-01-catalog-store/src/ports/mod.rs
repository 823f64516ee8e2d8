//! # Ports Layer
//!
//! Defines the port traits for the Catalog Store.
//!
//! ## Hexagonal Architecture
//!
//! - `inbound.rs` - Driving ports (read API for the gateway, write API for tooling)

pub mod inbound;
