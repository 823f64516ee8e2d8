//! Client for the server's admin path.

mod client;

pub use client::{AdminApiClient, ApiError};
