//! Registry of payload types that may travel inside a license.
//!
//! Each registered Rust type gets a string tag. The tag is written next to
//! the encoded value so the verifying side can rebuild the value without
//! knowing its type up front. Both sides must register the same types under
//! the same tags before the first license is issued or verified.

use crate::codec::payload::PayloadValue;
use crate::LicenseError;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

/// Rebuilds a boxed value of one registered type from its JSON form.
pub(crate) type DecodeFn = fn(Value) -> Result<PayloadValue, serde_json::Error>;

fn decode_as<T>(value: Value) -> Result<PayloadValue, serde_json::Error>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    serde_json::from_value::<T>(value).map(|v| Box::new(v) as PayloadValue)
}

#[derive(Clone)]
struct Entry {
    type_id: TypeId,
    decode: DecodeFn,
}

/// Tag table for payload types.
#[derive(Clone, Default)]
pub struct Registry {
    by_tag: HashMap<String, Entry>,
    by_type: HashMap<TypeId, String>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.by_tag.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("Registry").field("tags", &tags).finish()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in primitive types and vectors of them.
    ///
    /// | Rust type | tag |
    /// |---|---|
    /// | `bool` | `bool` |
    /// | `i8` .. `i64` | `int8` .. `int64` |
    /// | `u8` .. `u64` | `uint8` .. `uint64` |
    /// | `f32`, `f64` | `float32`, `float64` |
    /// | `char` | `char` |
    /// | `String` (and `&'static str` when encoding) | `string` |
    /// | `Vec<T>` of any type above | `[]` + tag of `T`, e.g. `[]uint8` |
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        registry.insert_with_vec::<bool>("bool");
        registry.insert_with_vec::<i8>("int8");
        registry.insert_with_vec::<i16>("int16");
        registry.insert_with_vec::<i32>("int32");
        registry.insert_with_vec::<i64>("int64");
        registry.insert_with_vec::<u8>("uint8");
        registry.insert_with_vec::<u16>("uint16");
        registry.insert_with_vec::<u32>("uint32");
        registry.insert_with_vec::<u64>("uint64");
        registry.insert_with_vec::<f32>("float32");
        registry.insert_with_vec::<f64>("float64");
        registry.insert_with_vec::<char>("char");
        registry.insert_with_vec::<String>("string");
        // String literals encode like `String` and decode as `String`.
        registry
            .by_type
            .insert(TypeId::of::<&'static str>(), "string".to_string());
        registry
    }

    fn insert_with_vec<T>(&mut self, tag: &str)
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.insert::<T>(tag);
        self.insert::<Vec<T>>(&format!("[]{}", tag));
    }

    fn insert<T>(&mut self, tag: &str)
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.by_tag.insert(
            tag.to_string(),
            Entry {
                type_id: TypeId::of::<T>(),
                decode: decode_as::<T>,
            },
        );
        self.by_type.insert(TypeId::of::<T>(), tag.to_string());
    }

    /// Register `T` under `tag`.
    ///
    /// Registering the same type under the same tag again is a no-op.
    ///
    /// # Errors
    /// * `RegistryConflict` - `tag` is taken by another type, or `T` is
    ///   already registered under another tag.
    pub fn register<T>(&mut self, tag: &str) -> Result<(), LicenseError>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();

        if let Some(existing) = self.by_tag.get(tag) {
            if existing.type_id == type_id {
                return Ok(());
            }
            return Err(LicenseError::RegistryConflict {
                tag: tag.to_string(),
            });
        }

        if let Some(existing_tag) = self.by_type.get(&type_id) {
            return Err(LicenseError::RegistryConflict {
                tag: existing_tag.clone(),
            });
        }

        tracing::debug!(tag, rust_type = type_name::<T>(), "registered payload type");
        self.insert::<T>(tag);
        Ok(())
    }

    /// Tag that `T` encodes under, if registered.
    pub fn tag_of<T: 'static>(&self) -> Option<&str> {
        self.by_type.get(&TypeId::of::<T>()).map(String::as_str)
    }

    /// Whether a tag is known.
    pub fn contains(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    pub(crate) fn decoder(&self, tag: &str) -> Option<DecodeFn> {
        self.by_tag.get(tag).map(|entry| entry.decode)
    }
}

/// Process-wide registry, seeded with the primitive types.
static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::with_primitives()));

/// Register `T` under `tag` in the process-wide registry.
///
/// Call this at startup on both the issuing and the verifying side.
pub fn register<T>(tag: &str) -> Result<(), LicenseError>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register::<T>(tag)
}

/// Read access to the process-wide registry.
pub(crate) fn global() -> RwLockReadGuard<'static, Registry> {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Seat {
        name: String,
    }

    #[allow(dead_code)]
    #[derive(Debug, Deserialize, PartialEq)]
    struct OtherSeat {
        name: String,
    }

    #[test]
    fn test_primitives_are_registered() {
        let registry = Registry::with_primitives();
        assert_eq!(registry.tag_of::<String>(), Some("string"));
        assert_eq!(registry.tag_of::<&'static str>(), Some("string"));
        assert_eq!(registry.tag_of::<i64>(), Some("int64"));
        assert_eq!(registry.tag_of::<bool>(), Some("bool"));
        assert!(registry.contains("uint16"));
        assert_eq!(registry.tag_of::<Vec<u8>>(), Some("[]uint8"));
        assert_eq!(registry.tag_of::<Vec<String>>(), Some("[]string"));
        assert_eq!(registry.tag_of::<Vec<f64>>(), Some("[]float64"));
        assert!(registry.tag_of::<Vec<Vec<u8>>>().is_none());
        assert!(registry.tag_of::<Seat>().is_none());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = Registry::new();
        registry.register::<Seat>("seat").unwrap();
        registry.register::<Seat>("seat").unwrap();
        assert_eq!(registry.tag_of::<Seat>(), Some("seat"));
    }

    #[test]
    fn test_register_tag_conflict() {
        let mut registry = Registry::new();
        registry.register::<Seat>("seat").unwrap();
        let result = registry.register::<OtherSeat>("seat");
        assert!(matches!(
            result,
            Err(LicenseError::RegistryConflict { ref tag }) if tag == "seat"
        ));
    }

    #[test]
    fn test_register_type_under_second_tag() {
        let mut registry = Registry::new();
        registry.register::<Seat>("seat").unwrap();
        let result = registry.register::<Seat>("chair");
        assert!(matches!(result, Err(LicenseError::RegistryConflict { .. })));
        assert!(!registry.contains("chair"));
    }

    #[test]
    fn test_decoder_rebuilds_value() {
        let mut registry = Registry::new();
        registry.register::<Seat>("seat").unwrap();
        let decode = registry.decoder("seat").unwrap();
        let value = decode(serde_json::json!({"name": "ada"})).unwrap();
        assert_eq!(
            value.downcast_ref::<Seat>(),
            Some(&Seat {
                name: "ada".to_string()
            })
        );
    }

    #[test]
    fn test_debug_lists_tags_only() {
        let mut registry = Registry::new();
        registry.register::<Seat>("seat").unwrap();
        assert_eq!(format!("{:?}", registry), r#"Registry { tags: ["seat"] }"#);
    }
}
