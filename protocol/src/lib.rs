//! Request/response types exchanged with API clients, and the translation
//! between them and the engine.

pub use error::*;
pub use request::*;
pub use view::*;

mod error;
mod request;
mod view;

/// Decodes a JSON request body.
pub fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| ProtocolError::Malformed(err.to_string()))
}

/// Encodes a response body.
pub fn encode<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| ProtocolError::Malformed(err.to_string()))
}
