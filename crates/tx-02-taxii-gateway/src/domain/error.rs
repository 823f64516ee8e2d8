//! Gateway error types.
//!
//! Protocol-level failures never leave the gateway as errors: they are turned
//! into status messages by the handlers. The types here cover header
//! validation, content generation and server lifecycle.

use crate::domain::config::ConfigError;
use std::net::SocketAddr;
use thiserror::Error;

/// A required protocol header is missing or carries an unsupported value.
///
/// The display text is sent back to the client verbatim in a `BAD_MESSAGE`
/// status message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("TAXII Service Not Defined in HTTP Header X-TAXII-Services")]
    MissingServices,

    #[error("Unsupported TAXII Service, {0}")]
    UnsupportedServices(String),

    #[error("Requested Encoding Not Defined in HTTP Header X-TAXII-Accept")]
    MissingAccept,

    #[error("Client Requested Response Encoding in X-TAXII-Accept is Unsupported, {0}")]
    UnsupportedAccept(String),

    #[error("Supplied Content Encoding Not Defined in HTTP Header X-TAXII-Content-Type")]
    MissingContentType,

    #[error("Supplied Message Encoding in X-TAXII-Content-Type Is Unsupported, {0}")]
    UnsupportedContentType(String),
}

/// Failure to produce the payload of a Poll content block.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The HTTP client for feeds could not be built.
    #[error("failed to build feed client: {0}")]
    Client(#[source] reqwest::Error),

    /// The remote feed could not be reached or read.
    #[error("failed to fetch feed {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote feed answered with a non-success status.
    #[error("feed {url} answered with HTTP {status}")]
    FeedStatus { url: String, status: u16 },

    /// The generated document could not be serialized.
    #[error("failed to encode content: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised while building or running the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_error_text_names_the_header() {
        assert_eq!(
            HeaderError::MissingServices.to_string(),
            "TAXII Service Not Defined in HTTP Header X-TAXII-Services"
        );
        assert_eq!(
            HeaderError::UnsupportedAccept("xml".into()).to_string(),
            "Client Requested Response Encoding in X-TAXII-Accept is Unsupported, xml"
        );
        assert!(HeaderError::UnsupportedContentType("xml".into())
            .to_string()
            .ends_with("X-TAXII-Content-Type Is Unsupported, xml"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: GatewayError = ConfigError::NoServices.into();
        assert_eq!(
            err.to_string(),
            "configuration error: No TAXII services are defined"
        );
    }
}
