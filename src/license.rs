//! Issuing and verifying license keys - the main public API.
//!
//! Issuing: encode payload, sign, frame, armor.
//!
//! Verifying runs the inverse in a fixed order, stopping at the first
//! failure:
//! 1. Dearmor (`InvalidFormat`)
//! 2. Unframe (`MalformedBundle`)
//! 3. Verify signature (`InvalidSignature`)
//! 4. Decode payload (`Decode`)
//!
//! No payload byte is decoded before the signature has been checked.

use crate::codec::{JsonCodec, Payload, PayloadCodec};
use crate::config::ArmorConfig;
use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::crypto::signing::sign;
use crate::crypto::verify::verify;
use crate::protocol::bundle::Bundle;
use crate::LicenseError;
use serde::Serialize;

/// Server-side license issuer.
///
/// Borrows the private key; one issuer can be shared across threads.
#[derive(Debug, Clone)]
pub struct Issuer<'k, C = JsonCodec> {
    key: &'k PrivateKey,
    armor: ArmorConfig,
    codec: C,
}

impl<'k> Issuer<'k> {
    /// Issuer with the default armor and the process-wide codec registry.
    pub fn new(key: &'k PrivateKey) -> Self {
        Self::with_codec(key, JsonCodec::global())
    }
}

impl<'k, C: PayloadCodec> Issuer<'k, C> {
    /// Issuer with a custom payload codec.
    pub fn with_codec(key: &'k PrivateKey, codec: C) -> Self {
        Self {
            key,
            armor: ArmorConfig::default(),
            codec,
        }
    }

    /// Use a custom header/footer/line width.
    ///
    /// # Errors
    /// * `ConfigError` - the armor configuration is invalid
    pub fn with_armor(mut self, armor: ArmorConfig) -> Result<Self, LicenseError> {
        armor.validate()?;
        self.armor = armor;
        Ok(self)
    }

    /// Issue a license key carrying `payload`.
    ///
    /// # Errors
    /// * `UnregisteredType` - `T` is not registered with the codec
    /// * `Encode` - the payload could not be serialized
    /// * `Signing` - the signing primitive failed
    pub fn issue<T: Serialize + 'static>(&self, payload: &T) -> Result<String, LicenseError> {
        let encoded = self.codec.encode(payload)?;
        let signature = sign(self.key, &encoded)?;
        let framed = Bundle::new(encoded, signature).frame()?;
        let text = self.armor.armor(&framed);

        tracing::debug!(
            algorithm = %self.key.algorithm(),
            bundle_len = framed.len(),
            "issued license key"
        );

        Ok(text)
    }
}

/// Client-side license verifier.
///
/// Borrows the public key; one verifier can be shared across threads.
#[derive(Debug, Clone)]
pub struct Verifier<'k, C = JsonCodec> {
    key: &'k PublicKey,
    armor: ArmorConfig,
    codec: C,
}

impl<'k> Verifier<'k> {
    /// Verifier with the default armor and the process-wide codec registry.
    pub fn new(key: &'k PublicKey) -> Self {
        Self::with_codec(key, JsonCodec::global())
    }
}

impl<'k, C: PayloadCodec> Verifier<'k, C> {
    /// Verifier with a custom payload codec.
    pub fn with_codec(key: &'k PublicKey, codec: C) -> Self {
        Self {
            key,
            armor: ArmorConfig::default(),
            codec,
        }
    }

    /// Use a custom header/footer/line width.
    ///
    /// # Errors
    /// * `ConfigError` - the armor configuration is invalid
    pub fn with_armor(mut self, armor: ArmorConfig) -> Result<Self, LicenseError> {
        armor.validate()?;
        self.armor = armor;
        Ok(self)
    }

    /// Verify a license key and return its payload.
    ///
    /// # Errors
    /// * `InvalidFormat` - armor or base64 is malformed
    /// * `MalformedBundle` - framing is malformed
    /// * `InvalidSignature` - signature does not match this key
    /// * `Decode` - payload type unknown to the codec, or corrupt
    pub fn verify(&self, license_key: &str) -> Result<Payload, LicenseError> {
        let result = self.run(license_key);
        if let Err(ref e) = result {
            tracing::warn!(
                algorithm = %self.key.algorithm(),
                kind = e.kind(),
                "license key rejected"
            );
        }
        result
    }

    /// Verify a license key and take its payload as `T`.
    ///
    /// # Errors
    /// Everything [`verify`](Self::verify) returns, plus
    /// `PayloadTypeMismatch` when the payload is not a `T`.
    pub fn verify_as<T: 'static>(&self, license_key: &str) -> Result<T, LicenseError> {
        self.verify(license_key)?.downcast()
    }

    fn run(&self, license_key: &str) -> Result<Payload, LicenseError> {
        // 1. Armor
        let framed = self.armor.dearmor(license_key)?;

        // 2. Framing
        let bundle = Bundle::unframe(&framed)?;

        // 3. Signature, before any payload byte is interpreted
        verify(self.key, bundle.payload(), bundle.signature())?;

        // 4. Payload
        let payload = self.codec.decode(bundle.payload())?;

        tracing::debug!(
            algorithm = %self.key.algorithm(),
            tag = payload.tag(),
            "verified license key"
        );

        Ok(payload)
    }
}

/// Issue a license key with the default armor and process-wide registry.
pub fn issue<T: Serialize + 'static>(key: &PrivateKey, payload: &T) -> Result<String, LicenseError> {
    Issuer::new(key).issue(payload)
}

/// Verify a license key and return its payload.
pub fn verify_and_extract(key: &PublicKey, license_key: &str) -> Result<Payload, LicenseError> {
    Verifier::new(key).verify(license_key)
}

/// Verify a license key and take its payload as `T`.
pub fn verify_and_extract_as<T: 'static>(
    key: &PublicKey,
    license_key: &str,
) -> Result<T, LicenseError> {
    Verifier::new(key).verify_as(license_key)
}
