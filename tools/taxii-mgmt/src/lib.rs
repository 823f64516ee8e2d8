//! TAXII-Mgmt: catalog editing and service reloads for a TAXII exchange
//! server.
//!
//! Catalog commands open the SQLite file directly; `reload` talks to a
//! running server over its admin path.

pub mod api;
pub mod commands;
