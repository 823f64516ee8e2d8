//! Status message construction.

use shared_types::{StatusMessage, StatusType};

/// Serialize a status message.
///
/// `response_id` of `None` omits `inResponseTo` entirely, which is not the
/// same as `Some("")`.
pub fn build(
    response_id: Option<&str>,
    kind: StatusType,
    text: impl Into<String>,
) -> Result<Vec<u8>, serde_json::Error> {
    encode(&StatusMessage::new(response_id, kind, text))
}

/// Serialize an already built status message.
pub fn encode(message: &StatusMessage) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(message)
}

/// `BAD_MESSAGE` with no `inResponseTo`.
pub fn bad_message(text: impl Into<String>) -> StatusMessage {
    StatusMessage::new(None, StatusType::BadMessage, text)
}

/// Text of the `DESTINATION_COLLECTION_ERROR` message for `collection`.
pub fn unknown_collection_text(collection: &str) -> String {
    format!("The requested collection \"{collection}\" does not exist")
}
