//! Domain layer: configuration, validation, registry state and errors.

pub mod catalog;
pub mod config;
pub mod error;
pub mod headers;
pub mod registry;
pub mod status;

pub use catalog::CollectionCatalog;
pub use config::{ConfigError, ServerConfig, ServiceRoute};
pub use error::{ContentError, GatewayError, HeaderError};
pub use headers::validate_headers;
pub use registry::ServiceRegistry;
