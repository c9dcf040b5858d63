//! Issue a license key and verify it again.
//!
//! This example walks the server-side and client-side halves of the
//! workflow with the PEM keys shipped in `tests/fixtures`, and shows how to
//! handle the common rejection cases.
//!
//! # Running
//!
//! ```bash
//! RUST_LOG=licensekey=debug cargo run --example issue_and_verify
//! ```
//!
//! Pass `PRIVATE_KEY` / `PUBLIC_KEY` paths to use your own key pair, and
//! `LICENSE_FILE` to verify an existing license instead of a fresh one.
//!
//! # Note
//!
//! In production the public key should be embedded in your binary (e.g.
//! with `include_bytes!`), not read from a path the user controls.

use licensekey::{read_private_key, read_public_key, Issuer, LicenseError, Verifier};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const DEFAULT_PRIVATE_KEY: &str = "tests/fixtures/keypair.pem";
const DEFAULT_PUBLIC_KEY: &str = "tests/fixtures/publickey.pem";

/// Payload shape shared by the issuer and the client.
#[derive(Debug, Serialize, Deserialize)]
struct Entitlement {
    customer: String,
    plan: String,
    seats: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Both sides must register the payload type before use.
    if let Err(e) = licensekey::register::<Entitlement>("entitlement") {
        eprintln!("Registry error: {}", e);
        std::process::exit(1);
    }

    let private_path =
        std::env::var("PRIVATE_KEY").unwrap_or_else(|_| DEFAULT_PRIVATE_KEY.to_string());
    let public_path =
        std::env::var("PUBLIC_KEY").unwrap_or_else(|_| DEFAULT_PUBLIC_KEY.to_string());

    // Server side: issue
    let license = match std::env::var("LICENSE_FILE") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Could not read {}: {}", path, e);
                std::process::exit(1);
            }
        },
        Err(_) => {
            let private_key = match read_private_key(&private_path) {
                Ok(key) => key,
                Err(e) => {
                    eprintln!("Could not load private key: {}", e);
                    std::process::exit(1);
                }
            };

            let entitlement = Entitlement {
                customer: "Example Corp".to_string(),
                plan: "pro".to_string(),
                seats: 25,
            };

            match Issuer::new(&private_key).issue(&entitlement) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Could not issue license: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    println!("{}\n", license);

    // Client side: verify
    let public_key = match read_public_key(&public_path) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Could not load public key: {}", e);
            std::process::exit(1);
        }
    };

    if let Ok(fingerprint) = public_key.fingerprint() {
        println!("Verifying with key {}", fingerprint);
    }

    match Verifier::new(&public_key).verify_as::<Entitlement>(&license) {
        Ok(entitlement) => {
            println!("✓ License valid!");
            println!("  Customer: {}", entitlement.customer);
            println!("  Plan: {}", entitlement.plan);
            println!("  Seats: {}", entitlement.seats);
        }
        Err(e) => {
            match &e {
                LicenseError::InvalidFormat(_) | LicenseError::MalformedBundle(_) => {
                    eprintln!("License key is corrupt: {}", e);
                }
                LicenseError::InvalidSignature => {
                    // Security: the key was altered or signed by someone else
                    eprintln!("SECURITY: License signature verification failed!");
                }
                LicenseError::Decode(_) | LicenseError::PayloadTypeMismatch { .. } => {
                    eprintln!("License payload not understood by this build: {}", e);
                }
                _ => {
                    eprintln!("Verification error: {}", e);
                }
            }
            std::process::exit(1);
        }
    }
}
