//! Outbound ports for the TAXII gateway.

use crate::domain::error::ContentError;
use async_trait::async_trait;
use shared_types::ContentBlock;

/// Produces the payload attached to a Poll response.
///
/// Called only for collections that passed the catalog check.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// One content block for `collection`.
    async fn content_for(&self, collection: &str) -> Result<ContentBlock, ContentError>;
}
