//! License signing.
//!
//! The signature covers the SHA-256 digest of the encoded payload and
//! nothing else: not the bundle framing, not the armor.

use crate::crypto::digest::sha256;
use crate::crypto::keys::PrivateKey;
use crate::LicenseError;
use ed25519_dalek::Signer;
use rand::rngs::OsRng;
use rsa::Pkcs1v15Sign;
use sha2::Sha256;

/// Sign an encoded payload.
///
/// RSA keys produce an RSASSA-PKCS1-v1_5 signature (SHA-256 DigestInfo);
/// the OS random source is only used for blinding, so the signature bytes
/// are the same for the same key and payload. Ed25519 keys sign the 32-byte
/// digest directly.
///
/// # Errors
/// * `Signing` - the RSA primitive failed (e.g. modulus too small)
pub fn sign(key: &PrivateKey, encoded_payload: &[u8]) -> Result<Vec<u8>, LicenseError> {
    let digest = sha256(encoded_payload);

    let signature = match key {
        PrivateKey::Rsa(rsa_key) => rsa_key
            .sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| LicenseError::Signing(e.to_string()))?,
        PrivateKey::Ed25519(signing_key) => signing_key.sign(&digest).to_bytes().to_vec(),
    };

    tracing::debug!(
        algorithm = %key.algorithm(),
        payload_len = encoded_payload.len(),
        signature_len = signature.len(),
        "signed license payload"
    );

    Ok(signature)
}
