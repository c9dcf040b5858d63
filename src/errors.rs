//! Licensekey error types.

use thiserror::Error;

/// Errors raised while loading signing or verification keys.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyLoadError {
    /// The input contains no PEM block.
    #[error("No PEM encoded key found")]
    NoKeyFound,

    /// The PEM block label or key algorithm is not one we accept here.
    #[error("Unsupported key type: {0}")]
    WrongKeyType(String),

    /// The PEM block was found but its DER contents could not be parsed.
    #[error("Key parse error: {0}")]
    Parse(String),

    /// The key file could not be read.
    #[error("Key I/O error: {0}")]
    Io(String),
}

/// Errors that can occur while issuing or verifying a license key.
///
/// Verification rejects in a fixed order, so the variant tells the caller
/// which stage stopped the license: [`InvalidFormat`](Self::InvalidFormat),
/// then [`MalformedBundle`](Self::MalformedBundle), then
/// [`InvalidSignature`](Self::InvalidSignature), then
/// [`Decode`](Self::Decode).
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Key material could not be loaded.
    #[error(transparent)]
    KeyLoad(#[from] KeyLoadError),

    /// Key material could not be exported.
    #[error("Key encoding error: {0}")]
    KeyEncoding(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Armor header/footer missing or body is not valid base64.
    #[error("Invalid license key format: {0}")]
    InvalidFormat(String),

    /// The dearmored bytes do not follow the bundle framing rules.
    #[error("Malformed license bundle: {0}")]
    MalformedBundle(String),

    /// Signature verification failed.
    #[error("License signature verification failed")]
    InvalidSignature,

    /// The signing primitive failed.
    #[error("Signing error: {0}")]
    Signing(String),

    /// The payload could not be serialized.
    #[error("Payload encode error: {0}")]
    Encode(String),

    /// The payload bytes could not be decoded into a registered type.
    #[error("Payload decode error: {0}")]
    Decode(String),

    /// The payload type was never registered with the codec.
    #[error("Payload type not registered: {0}")]
    UnregisteredType(String),

    /// A tag is already registered for a different type.
    #[error("Payload tag {tag:?} is already registered for another type")]
    RegistryConflict {
        /// The contested tag.
        tag: String,
    },

    /// The decoded payload is not of the requested type.
    #[error("Payload type mismatch: expected {expected}, found {found}")]
    PayloadTypeMismatch {
        /// Rust type the caller asked for.
        expected: &'static str,
        /// Tag of the payload that was actually decoded.
        found: String,
    },
}

impl LicenseError {
    /// Short, stable name of the error kind.
    ///
    /// Used for log fields; carries no payload or key data.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::KeyLoad(_) => "key_load",
            Self::KeyEncoding(_) => "key_encoding",
            Self::ConfigError(_) => "config",
            Self::InvalidFormat(_) => "invalid_format",
            Self::MalformedBundle(_) => "malformed_bundle",
            Self::InvalidSignature => "invalid_signature",
            Self::Signing(_) => "signing",
            Self::Encode(_) => "encode",
            Self::Decode(_) => "decode",
            Self::UnregisteredType(_) => "unregistered_type",
            Self::RegistryConflict { .. } => "registry_conflict",
            Self::PayloadTypeMismatch { .. } => "payload_type_mismatch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_load_error_converts() {
        let err: LicenseError = KeyLoadError::NoKeyFound.into();
        assert!(matches!(err, LicenseError::KeyLoad(KeyLoadError::NoKeyFound)));
        assert_eq!(err.to_string(), "No PEM encoded key found");
        assert_eq!(err.kind(), "key_load");
    }

    #[test]
    fn test_invalid_signature_message_is_opaque() {
        let err = LicenseError::InvalidSignature;
        assert_eq!(err.to_string(), "License signature verification failed");
        assert_eq!(err.kind(), "invalid_signature");
    }
}
