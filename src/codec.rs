//! Conversion between session values and the string payloads kept in a store.
//!
//! By default payloads are JSON text. With the `messagepack` feature they are
//! MessagePack, base64-encoded so the stored field is still a string.
//!
//! Any value serde can represent in the active format round-trips:
//! `decode(encode(v)) == v`. Two notable JSON limits: maps must have string
//! keys (anything else fails to encode), and non-finite floats are written as
//! `null`.

use crate::store::Error;
use serde::{Serialize, de::DeserializeOwned};

#[cfg(not(feature = "messagepack"))]
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|e| Error::Encode(e.to_string()))
}

#[cfg(not(feature = "messagepack"))]
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, Error> {
    serde_json::from_str(payload).map_err(|e| Error::Decode(e.to_string()))
}

#[cfg(feature = "messagepack")]
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    use base64::Engine;

    let bytes = rmp_serde::to_vec_named(value).map_err(|e| Error::Encode(e.to_string()))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

#[cfg(feature = "messagepack")]
pub fn decode<T: DeserializeOwned>(payload: &str) -> Result<T, Error> {
    use base64::Engine;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| Error::Decode(e.to_string()))?;
    rmp_serde::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
}
