//! License signature verification.

use crate::crypto::digest::sha256;
use crate::crypto::keys::PublicKey;
use crate::LicenseError;
use ed25519_dalek::{Signature, Verifier};
use rsa::Pkcs1v15Sign;
use sha2::Sha256;

/// Verify a signature over an encoded payload.
///
/// Every failure is reported as `InvalidSignature`, whether the signature
/// has the wrong length, was made by another key, or the payload changed.
pub fn verify(
    key: &PublicKey,
    encoded_payload: &[u8],
    signature: &[u8],
) -> Result<(), LicenseError> {
    let digest = sha256(encoded_payload);

    let valid = match key {
        PublicKey::Rsa(rsa_key) => rsa_key
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
            .is_ok(),
        PublicKey::Ed25519(verifying_key) => Signature::from_slice(signature)
            .map(|sig| verifying_key.verify(&digest, &sig).is_ok())
            .unwrap_or(false),
    };

    if !valid {
        return Err(LicenseError::InvalidSignature);
    }

    Ok(())
}
