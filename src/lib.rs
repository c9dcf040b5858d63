//! # Licensekey
//!
//! **Offline, signed software license keys.**
//!
//! A server signs an application-defined payload (customer, entitlement,
//! expiry, ...) with a private key and hands out the result as a text
//! block. The client verifies the signature with the matching public key
//! and recovers the payload, without any network access.
//!
//! ## Features
//!
//! - **RSA PKCS#1 v1.5 / SHA-256** signatures, with **Ed25519** as an
//!   alternative scheme
//! - **Canonical payload encoding** - the same value always signs the same bytes
//! - **Open payload types** - any `serde` type registered under a tag
//! - **Armored text** - survives email, clipboards, and CRLF line endings
//! - **Fail-closed verification** - format, framing, then signature, and
//!   only then payload decoding
//!
//! ## Quickstart
//!
//! ```no_run
//! use licensekey::{issue, load_private_key, load_public_key, verify_and_extract};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Entitlement {
//!     customer: String,
//!     seats: u32,
//! }
//!
//! fn main() -> Result<(), licensekey::LicenseError> {
//!     // Both sides register payload types at startup.
//!     licensekey::register::<Entitlement>("entitlement")?;
//!
//!     // Server side.
//!     let private_key = load_private_key(&std::fs::read("keypair.pem").unwrap())?;
//!     let license = issue(
//!         &private_key,
//!         &Entitlement { customer: "acme".into(), seats: 5 },
//!     )?;
//!
//!     // Client side.
//!     let public_key = load_public_key(&std::fs::read("publickey.pem").unwrap())?;
//!     let entitlement: Entitlement = verify_and_extract(&public_key, &license)?.downcast()?;
//!     assert_eq!(entitlement.seats, 5);
//!     Ok(())
//! }
//! ```
//!
//! ## Threat Model
//!
//! Licensekey guarantees that a payload returned by verification was signed
//! by the holder of the private key and has not been altered. It does
//! **not** implement expiry, revocation, or activation; encode that policy
//! in the payload and enforce it in the application.
//!
//! Client-side licensing can always be bypassed by a determined attacker
//! with access to the binary.
//!
//! ## Deployment precondition
//!
//! Payload types must be registered under the same tags on both the issuing
//! and the verifying side. A verifier that misses a registration rejects
//! the license with [`LicenseError::Decode`].

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod config;
pub mod errors;

// Payload layer
pub mod codec;

// Crypto layer
pub mod crypto;

// Wire format
pub mod protocol;

// Issuer / verifier (main public API)
pub mod license;

// Re-exports for public API
pub use codec::{register, JsonCodec, Payload, PayloadCodec, Registry};
pub use config::ArmorConfig;
pub use crypto::keys::{
    generate_ed25519, generate_rsa, load_private_key, load_public_key, read_private_key,
    read_public_key, PrivateKey, PublicKey, SignatureAlgorithm,
};
pub use errors::{KeyLoadError, LicenseError};
pub use license::{issue, verify_and_extract, verify_and_extract_as, Issuer, Verifier};
pub use protocol::armor::{armor, dearmor};
pub use protocol::bundle::{frame, unframe, Bundle};
