//! # Protocol Messages
//!
//! JSON bodies exchanged with TAXII clients.
//!
//! ```text
//! Discovery  { id }                      → { inResponseTo, services: [...] }
//! Collection { id }                      → { inResponseTo, collections: [...] }
//! Poll       { id, collectionName }      → { inResponseTo, collectionName, resultId,
//!                                            message, contentBlocks: [...] }
//! any failure                            → { type, inResponseTo?, message }
//! ```
//!
//! Request fields default to empty strings so that a body without an `id`
//! still decodes and is then rejected for the missing id, rather than being
//! reported as undecodable.

use crate::entities::{CollectionDescriptor, ServiceDescriptor};
use crate::protocol::PROTOCOL_BINDING_HTTP;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// =============================================================================
// REQUESTS
// =============================================================================

/// Common surface of every inbound request body.
pub trait RequestMessage: DeserializeOwned + Send + 'static {
    /// Human name of the message, used in status message text.
    const KIND: &'static str;

    /// The client-chosen message id.
    fn id(&self) -> &str;
}

/// Discovery request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryRequest {
    pub id: String,
}

impl RequestMessage for DiscoveryRequest {
    const KIND: &'static str = "Discovery";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Collection information request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionRequest {
    pub id: String,
}

impl RequestMessage for CollectionRequest {
    const KIND: &'static str = "Collection";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Poll request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollRequest {
    pub id: String,
    pub collection_name: String,
}

impl RequestMessage for PollRequest {
    const KIND: &'static str = "Poll";

    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// DISCOVERY RESPONSE
// =============================================================================

/// Service type as advertised on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    Discovery,
    CollectionManagement,
    Poll,
    Inbox,
}

/// One entry of a Discovery response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstance {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub available: bool,
    pub protocol_binding: String,
    pub address: String,
}

impl From<&ServiceDescriptor> for ServiceInstance {
    fn from(descriptor: &ServiceDescriptor) -> Self {
        Self {
            service_type: descriptor.kind.service_type(),
            available: descriptor.available,
            protocol_binding: PROTOCOL_BINDING_HTTP.to_string(),
            address: descriptor.address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    pub in_response_to: String,
    pub services: Vec<ServiceInstance>,
}

impl DiscoveryResponse {
    /// Build a response advertising `services` in the order given.
    pub fn new<'a>(
        in_response_to: impl Into<String>,
        services: impl IntoIterator<Item = &'a ServiceDescriptor>,
    ) -> Self {
        Self {
            in_response_to: in_response_to.into(),
            services: services.into_iter().map(ServiceInstance::from).collect(),
        }
    }
}

// =============================================================================
// COLLECTION RESPONSE
// =============================================================================

/// One entry of a Collection response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionRecord {
    pub name: String,
    pub available: bool,
    pub description: String,
    pub volume: u64,
    pub poll_service_address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse {
    pub in_response_to: String,
    pub collections: Vec<CollectionRecord>,
}

impl CollectionResponse {
    /// Build a response listing every collection as available, each with the
    /// same advertised volume and Poll service address.
    pub fn new<'a>(
        in_response_to: impl Into<String>,
        collections: impl IntoIterator<Item = &'a CollectionDescriptor>,
        volume: u64,
        poll_service_address: &str,
    ) -> Self {
        Self {
            in_response_to: in_response_to.into(),
            collections: collections
                .into_iter()
                .map(|c| CollectionRecord {
                    name: c.name.clone(),
                    available: true,
                    description: c.description.clone(),
                    volume,
                    poll_service_address: poll_service_address.to_string(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// POLL RESPONSE
// =============================================================================

/// Encoding tag of a content block payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentEncoding {
    Json,
    Xml,
}

/// An opaque serialized payload tagged with its encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub encoding: ContentEncoding,
    pub content: String,
}

impl ContentBlock {
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            encoding: ContentEncoding::Json,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub in_response_to: String,
    pub collection_name: String,
    pub result_id: String,
    pub message: String,
    pub content_blocks: Vec<ContentBlock>,
}

impl PollResponse {
    pub fn new(
        in_response_to: impl Into<String>,
        collection_name: impl Into<String>,
        result_id: impl Into<String>,
        message: impl Into<String>,
        content_blocks: Vec<ContentBlock>,
    ) -> Self {
        Self {
            in_response_to: in_response_to.into(),
            collection_name: collection_name.into(),
            result_id: result_id.into(),
            message: message.into(),
            content_blocks,
        }
    }
}

// =============================================================================
// STATUS MESSAGE
// =============================================================================

/// Kind of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    /// Headers, body or id of the request were unusable.
    BadMessage,
    /// A Poll named a collection that is not in the catalog.
    DestinationCollectionError,
    /// The server could not complete an otherwise valid request.
    Failure,
}

impl StatusType {
    /// Wire name, e.g. `BAD_MESSAGE`.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusType::BadMessage => "BAD_MESSAGE",
            StatusType::DestinationCollectionError => "DESTINATION_COLLECTION_ERROR",
            StatusType::Failure => "FAILURE",
        }
    }
}

/// The protocol's uniform error envelope.
///
/// `in_response_to` is absent, not empty, when no id could be recovered from
/// the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    #[serde(rename = "type")]
    pub status_type: StatusType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_response_to: Option<String>,
    pub message: String,
}

impl StatusMessage {
    pub fn new(
        in_response_to: Option<&str>,
        status_type: StatusType,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status_type,
            in_response_to: in_response_to.map(str::to_string),
            message: message.into(),
        }
    }
}
