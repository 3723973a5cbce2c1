//! Schema-exact wire representations, one module per API version.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

pub mod blueprint_v1;

pub use blueprint_v1::{BlueprintV1, TargetDogu, TargetPackage};

/// Two-level registry configuration: namespace, then entry key, then an arbitrary value.
///
/// Ordered maps so documents differing only in key order compare equal and encode the same.
pub type RegistryConfig = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// Treat an explicit `null` like an omitted field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
