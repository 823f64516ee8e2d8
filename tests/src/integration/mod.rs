//! Cross-crate flows: catalog store, registry, handlers and middleware.

#[cfg(test)]
mod fixtures;

mod catalog_flows;
mod discovery_flows;
mod failure_flows;
mod reload_flows;
