//! License key wire format: bundle framing and text armor.

pub mod armor;
pub mod bundle;
