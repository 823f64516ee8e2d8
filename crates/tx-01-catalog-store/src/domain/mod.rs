//! # Domain Layer
//!
//! Errors and record types for the Catalog Store.

pub mod errors;
pub mod records;
