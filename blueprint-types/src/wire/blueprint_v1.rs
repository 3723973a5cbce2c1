use serde::{Deserialize, Serialize};

use crate::api::BlueprintApi;
use crate::error::BlueprintError;
use crate::general::GeneralBlueprint;
use crate::target_state::TargetState;
use crate::wire::{RegistryConfig, null_as_default};

/// Schema-exact wire representation of blueprint API `v1`.
///
/// Describes which dogus, OS packages and registry entries should be present or absent on
/// an instance. Applying the same blueprint to two instances must leave them equal in terms
/// of these components.
///
/// Additions without a version bump are fine as long as they don't change semantics.
/// Removal or renaming is a breaking change and requires a new API identifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlueprintV1 {
    /// Envelope carrying `blueprintApi`.
    #[serde(flatten)]
    pub general: GeneralBlueprint,

    /// Human-distinguishing name of this blueprint. Expected to be non-empty.
    #[serde(rename = "blueprintId", default)]
    pub id: String,

    /// Exact cesapp version expected after the blueprint was applied. Expected to be
    /// non-empty. Its meaning MUST NOT change within this API version.
    #[serde(rename = "cesappVersion", default)]
    pub ces_app_version: String,

    /// Exact dogu versions that should be present or absent after the blueprint was
    /// applied. Optional.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dogus: Vec<TargetDogu>,

    /// Exact package versions that should be present or absent after the blueprint was
    /// applied. Packages must match the operating system package manager. Optional.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub packages: Vec<TargetPackage>,

    /// Registry entries to set on blueprint upgrades, grouped by namespace.
    #[serde(
        rename = "registryConfig",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "RegistryConfig::is_empty"
    )]
    pub registry_config: RegistryConfig,

    /// Namespaces or entry keys to remove from the registry.
    #[serde(
        rename = "registryConfigAbsent",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub registry_config_absent: Vec<String>,

    /// Same shape as `registry_config`, for entries stored encrypted.
    #[serde(
        rename = "registryConfigEncrypted",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "RegistryConfig::is_empty"
    )]
    pub registry_config_encrypted: RegistryConfig,
}

impl BlueprintV1 {
    pub fn new(id: impl Into<String>, ces_app_version: impl Into<String>) -> Self {
        Self {
            general: GeneralBlueprint::new(BlueprintApi::V1),
            id: id.into(),
            ces_app_version: ces_app_version.into(),
            ..Self::default()
        }
    }

    /// Decode a full `v1` body. Does not check the declared API identifier.
    ///
    /// A `targetState` that is present but not a string fails with
    /// [`BlueprintError::MalformedEnum`]; any other structural failure is
    /// [`BlueprintError::MalformedDocument`].
    pub fn from_slice(raw: &[u8]) -> Result<Self, BlueprintError> {
        serde_json::from_slice(raw).map_err(BlueprintError::from_document)
    }

    pub fn api(&self) -> &BlueprintApi {
        &self.general.api
    }

    pub fn with_dogu(mut self, dogu: TargetDogu) -> Self {
        self.dogus.push(dogu);
        self
    }

    pub fn with_package(mut self, package: TargetPackage) -> Self {
        self.packages.push(package);
        self
    }

    pub fn with_registry_entry(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.registry_config
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn with_encrypted_entry(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.registry_config_encrypted
            .entry(namespace.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Marks a namespace or entry key for removal. Keys already listed are not repeated.
    pub fn with_absent_entry(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !self.registry_config_absent.contains(&key) {
            self.registry_config_absent.push(key);
        }
        self
    }
}

/// A dogu, its version and the state it must be in after the blueprint was applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetDogu {
    /// Name including its namespace, e.g. `official/nginx`.
    #[serde(default)]
    pub name: String,

    /// Required when the target state is present; not interpreted otherwise.
    #[serde(default)]
    pub version: String,

    /// Optional; defaults to present.
    #[serde(rename = "targetState", default)]
    pub target_state: TargetState,
}

impl TargetDogu {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            target_state: TargetState::Present,
        }
    }

    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            target_state: TargetState::Absent,
        }
    }

    pub fn requires_version(&self) -> bool {
        self.target_state.is_present()
    }
}

/// An operating system package, its version and its target state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetPackage {
    /// Package name. Expected to be non-empty.
    #[serde(default)]
    pub name: String,

    /// Required when the target state is present; not interpreted otherwise.
    #[serde(default)]
    pub version: String,

    /// Optional; defaults to present.
    #[serde(rename = "targetState", default)]
    pub target_state: TargetState,
}

impl TargetPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            target_state: TargetState::Present,
        }
    }

    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            target_state: TargetState::Absent,
        }
    }

    pub fn requires_version(&self) -> bool {
        self.target_state.is_present()
    }
}
