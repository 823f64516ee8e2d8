//! # TAXII Exchange Test Suite
//!
//! End-to-end protocol flows driven through the full gateway router,
//! middleware included.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs           # Router harness, request builders, fake providers
//!     ├── discovery_flows.rs    # Header checks, decoding, service advertisement
//!     ├── catalog_flows.rs      # Collection and Poll against the catalog
//!     ├── reload_flows.rs       # Admin trigger and registry reload visibility
//!     └── failure_flows.rs      # Store outages, content failures, timeouts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p taxii-tests
//! cargo test -p taxii-tests integration::reload_flows
//! ```

pub mod integration;
