//! Payload encoding.
//!
//! The codec turns an application value into the bytes that get signed and
//! back. Encoding must be deterministic: the same value and registry always
//! give the same bytes.

mod finite;
pub mod json;
pub mod payload;
pub mod registry;

pub use json::JsonCodec;
pub use payload::Payload;
pub use registry::{register, Registry};

use crate::LicenseError;
use serde::Serialize;

/// Encode/decode contract for license payloads.
///
/// `decode(encode(v))` must yield a [`Payload`] that downcasts to a value
/// equal to `v`. Decoding never panics; unknown or malformed input is a
/// [`LicenseError::Decode`].
pub trait PayloadCodec: Send + Sync {
    /// Encode a payload value into canonical bytes.
    fn encode<T: Serialize + 'static>(&self, value: &T) -> Result<Vec<u8>, LicenseError>;

    /// Decode canonical bytes back into a payload.
    fn decode(&self, bytes: &[u8]) -> Result<Payload, LicenseError>;
}
