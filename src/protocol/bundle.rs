//! Bundle framing.
//!
//! A bundle pairs an encoded payload with its signature. Wire layout:
//!
//! ```text
//! version        u8      (currently 1)
//! payload_len    u32 BE
//! payload        payload_len bytes
//! signature_len  u32 BE
//! signature      signature_len bytes
//! ```
//!
//! Nothing may follow the signature. Unframing only checks this layout; the
//! signature itself is checked later by [`crate::crypto::verify`].

use crate::LicenseError;

/// Current bundle format version.
pub const FORMAT_VERSION: u8 = 1;

const LEN_PREFIX: usize = 4;

/// Encoded payload plus signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl Bundle {
    /// Pair an encoded payload with its signature.
    pub fn new(payload: Vec<u8>, signature: Vec<u8>) -> Self {
        Self { payload, signature }
    }

    /// The encoded payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The signature over [`payload`](Self::payload).
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Serialize the bundle.
    ///
    /// # Errors
    /// * `MalformedBundle` - a field is longer than `u32::MAX` bytes
    pub fn frame(&self) -> Result<Vec<u8>, LicenseError> {
        let mut out =
            Vec::with_capacity(1 + 2 * LEN_PREFIX + self.payload.len() + self.signature.len());
        out.push(FORMAT_VERSION);
        write_field(&mut out, &self.payload, "payload")?;
        write_field(&mut out, &self.signature, "signature")?;
        Ok(out)
    }

    /// Parse a serialized bundle.
    ///
    /// # Errors
    /// * `MalformedBundle` - empty input, unknown version, truncated field,
    ///   trailing bytes, or empty signature
    pub fn unframe(bytes: &[u8]) -> Result<Self, LicenseError> {
        let version = *bytes.first().ok_or_else(|| malformed("empty bundle"))?;
        if version != FORMAT_VERSION {
            return Err(malformed(format!("unsupported format version {}", version)));
        }

        let mut offset = 1;
        let payload = read_field(bytes, &mut offset, "payload")?;
        let signature = read_field(bytes, &mut offset, "signature")?;

        if offset != bytes.len() {
            return Err(malformed(format!(
                "{} trailing bytes after signature",
                bytes.len() - offset
            )));
        }
        if signature.is_empty() {
            return Err(malformed("empty signature"));
        }

        Ok(Self::new(payload.to_vec(), signature.to_vec()))
    }
}

/// Serialize an encoded payload and its signature.
pub fn frame(payload: &[u8], signature: &[u8]) -> Result<Vec<u8>, LicenseError> {
    Bundle::new(payload.to_vec(), signature.to_vec()).frame()
}

/// Split serialized bytes back into encoded payload and signature.
pub fn unframe(bytes: &[u8]) -> Result<(Vec<u8>, Vec<u8>), LicenseError> {
    let bundle = Bundle::unframe(bytes)?;
    Ok((bundle.payload, bundle.signature))
}

fn malformed(reason: impl Into<String>) -> LicenseError {
    LicenseError::MalformedBundle(reason.into())
}

fn write_field(out: &mut Vec<u8>, field: &[u8], name: &str) -> Result<(), LicenseError> {
    let len = u32::try_from(field.len())
        .map_err(|_| malformed(format!("{} too large ({} bytes)", name, field.len())))?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(field);
    Ok(())
}

fn read_field<'a>(
    buf: &'a [u8],
    offset: &mut usize,
    name: &str,
) -> Result<&'a [u8], LicenseError> {
    let len_bytes: [u8; LEN_PREFIX] = buf
        .get(*offset..*offset + LEN_PREFIX)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| malformed(format!("truncated {} length", name)))?;
    let len = u32::from_be_bytes(len_bytes) as usize;

    let start = *offset + LEN_PREFIX;
    let field = start
        .checked_add(len)
        .and_then(|end| buf.get(start..end))
        .ok_or_else(|| {
            malformed(format!(
                "truncated {}: need {} bytes, have {}",
                name,
                len,
                buf.len() - start
            ))
        })?;

    *offset = start + len;
    Ok(field)
}
