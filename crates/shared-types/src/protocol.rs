//! # Protocol Constants
//!
//! Header names and the single protocol version and message encoding this
//! server speaks.

/// Header naming the protocol version the client is using.
pub const HEADER_SERVICES: &str = "X-TAXII-Services";

/// Header naming the encoding the client wants the response in.
pub const HEADER_ACCEPT: &str = "X-TAXII-Accept";

/// Header naming the encoding of the request body.
pub const HEADER_CONTENT_TYPE: &str = "X-TAXII-Content-Type";

/// The only protocol version accepted in [`HEADER_SERVICES`].
pub const PROTOCOL_VERSION: &str = "taxii-1.1";

/// The only message encoding accepted in [`HEADER_ACCEPT`] and [`HEADER_CONTENT_TYPE`].
pub const MESSAGE_ENCODING_JSON: &str = "json";

/// HTTP content type of every protocol response body.
pub const JSON_MEDIA_TYPE: &str = "application/json; charset=utf-8";

/// Protocol binding advertised for every service in a Discovery response.
pub const PROTOCOL_BINDING_HTTP: &str = "urn:taxii.mitre.org:protocol:http:1.0";

/// Admin query parameter that requests a service registry reload.
pub const RELOAD_SERVICES_PARAM: &str = "reloadservices";
