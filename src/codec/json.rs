//! Canonical JSON payload codec.
//!
//! Encoded form: `{"type":"<tag>","value":<value>}`. Object keys are
//! sorted explicitly before writing, so map-typed fields encode the same way
//! every time whether or not `serde_json/preserve_order` is enabled.
//! Non-finite floats are rejected because JSON has no lossless form for them.

use crate::codec::finite;
use crate::codec::payload::Payload;
use crate::codec::registry::{self, Registry};
use crate::codec::PayloadCodec;
use crate::LicenseError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::type_name;
use std::sync::Arc;

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    #[serde(rename = "type")]
    tag: String,
    value: Value,
}

/// JSON codec backed by a type registry.
///
/// [`JsonCodec::global`] reads the process-wide registry populated through
/// [`registry::register`]; [`JsonCodec::with_registry`] uses a private one.
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    registry: Option<Arc<Registry>>,
}

impl JsonCodec {
    /// Codec using the process-wide registry.
    pub fn global() -> Self {
        Self { registry: None }
    }

    /// Codec using its own registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry: Some(Arc::new(registry)),
        }
    }

    fn with_registry_ref<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        match &self.registry {
            Some(registry) => f(registry),
            None => f(&registry::global()),
        }
    }
}

/// Rebuild every object with its keys in sorted order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

impl PayloadCodec for JsonCodec {
    fn encode<T: Serialize + 'static>(&self, value: &T) -> Result<Vec<u8>, LicenseError> {
        let tag = self
            .with_registry_ref(|r| r.tag_of::<T>().map(str::to_owned))
            .ok_or_else(|| LicenseError::UnregisteredType(type_name::<T>().to_string()))?;

        finite::check(value).map_err(|e| LicenseError::Encode(e.to_string()))?;
        let value = serde_json::to_value(value)
            .map(canonicalize)
            .map_err(|e| LicenseError::Encode(e.to_string()))?;

        serde_json::to_vec(&Envelope { tag, value }).map_err(|e| LicenseError::Encode(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Payload, LicenseError> {
        let envelope: Envelope = serde_json::from_slice(bytes)
            .map_err(|e| LicenseError::Decode(format!("invalid payload envelope: {}", e)))?;

        let decode = self
            .with_registry_ref(|r| r.decoder(&envelope.tag))
            .ok_or_else(|| {
                LicenseError::Decode(format!("unregistered payload type {:?}", envelope.tag))
            })?;

        let value = decode(envelope.value).map_err(|e| {
            LicenseError::Decode(format!("payload does not match {:?}: {}", envelope.tag, e))
        })?;

        Ok(Payload::new(envelope.tag, value))
    }
}
