//! # Records
//!
//! Rows as they come out of storage, before translation into the protocol
//! vocabulary.

use shared_types::{ServiceDescriptor, ServiceKind, UnknownServiceKind};

/// A row of the `Services` table joined with its type tag.
///
/// The tag stays a string here: the `ServiceType` table is editable by
/// operators and may hold tags the protocol does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub id: i64,
    pub service_type: String,
    pub available: bool,
    pub address: String,
}

impl ServiceRecord {
    /// Translate into a descriptor, failing on tags outside [`ServiceKind`].
    pub fn to_descriptor(&self) -> Result<ServiceDescriptor, UnknownServiceKind> {
        let kind: ServiceKind = self.service_type.parse()?;
        Ok(ServiceDescriptor::new(kind, self.available, self.address.clone()))
    }
}
