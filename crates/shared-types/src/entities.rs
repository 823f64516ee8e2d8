//! # Catalog Entities
//!
//! Descriptors for the services a server advertises and the collections it
//! offers for polling.
//!
//! ## Clusters
//!
//! - **Services**: `ServiceKind`, `ServiceDescriptor`
//! - **Collections**: `CollectionDescriptor`

use crate::errors::UnknownServiceKind;
use crate::messages::ServiceType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// SERVICES
// =============================================================================

/// The kinds of service endpoint a server can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Discovery,
    Collection,
    Poll,
    Inbox,
}

impl ServiceKind {
    /// Every kind, in catalog id order.
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::Discovery,
        ServiceKind::Collection,
        ServiceKind::Poll,
        ServiceKind::Inbox,
    ];

    /// The tag used for this kind in the catalog's `ServiceType` table.
    pub fn tag(self) -> &'static str {
        match self {
            ServiceKind::Discovery => "Discovery",
            ServiceKind::Collection => "Collection",
            ServiceKind::Poll => "Poll",
            ServiceKind::Inbox => "Inbox",
        }
    }

    /// Map a catalog tag to a kind. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Discovery" => Some(ServiceKind::Discovery),
            "Collection" => Some(ServiceKind::Collection),
            "Poll" => Some(ServiceKind::Poll),
            "Inbox" => Some(ServiceKind::Inbox),
            _ => None,
        }
    }

    /// The protocol enumeration advertised in Discovery responses.
    pub fn service_type(self) -> ServiceType {
        match self {
            ServiceKind::Discovery => ServiceType::Discovery,
            ServiceKind::Collection => ServiceType::CollectionManagement,
            ServiceKind::Poll => ServiceType::Poll,
            ServiceKind::Inbox => ServiceType::Inbox,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ServiceKind {
    type Err = UnknownServiceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::from_tag(s).ok_or_else(|| UnknownServiceKind { tag: s.to_string() })
    }
}

/// One advertised network endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub kind: ServiceKind,
    pub available: bool,
    pub address: String,
}

impl ServiceDescriptor {
    pub fn new(kind: ServiceKind, available: bool, address: impl Into<String>) -> Self {
        Self {
            kind,
            available,
            address: address.into(),
        }
    }
}

// =============================================================================
// COLLECTIONS
// =============================================================================

/// A named, pollable feed. `name` is unique within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    pub name: String,
    pub description: String,
}

impl CollectionDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
