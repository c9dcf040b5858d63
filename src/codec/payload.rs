//! Decoded payload values.

use crate::LicenseError;
use std::any::{type_name, Any};
use std::fmt;

/// Type-erased payload value.
pub(crate) type PayloadValue = Box<dyn Any + Send + Sync>;

/// A payload recovered from a verified license.
///
/// Holds the value under the tag it was registered with. Use
/// [`downcast`](Self::downcast) to get the concrete type back; asking for
/// the wrong type is an ordinary error.
pub struct Payload {
    tag: String,
    value: PayloadValue,
}

impl Payload {
    pub(crate) fn new(tag: String, value: PayloadValue) -> Self {
        Self { tag, value }
    }

    /// Tag of the registered type this payload was encoded as.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the payload holds a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the payload as `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Result<&T, LicenseError> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| self.mismatch::<T>())
    }

    /// Take the payload as `T`.
    pub fn downcast<T: 'static>(self) -> Result<T, LicenseError> {
        if !self.value.is::<T>() {
            return Err(self.mismatch::<T>());
        }
        self.value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| LicenseError::PayloadTypeMismatch {
                expected: type_name::<T>(),
                found: self.tag,
            })
    }

    fn mismatch<T: 'static>(&self) -> LicenseError {
        LicenseError::PayloadTypeMismatch {
            expected: type_name::<T>(),
            found: self.tag.clone(),
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload").field("tag", &self.tag).finish_non_exhaustive()
    }
}
