use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A blueprint API version identifier, e.g. `"v1"`.
///
/// The value is kept verbatim, including identifiers nobody knows about yet. Judging
/// whether an identifier is supported is the job of the version dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlueprintApi(Cow<'static, str>);

impl BlueprintApi {
    /// The production version 1 schema.
    pub const V1: BlueprintApi = BlueprintApi(Cow::Borrowed("v1"));

    /// Non-production identifier used by tests and tooling. Carries no body.
    pub const TEST_EMPTY: BlueprintApi = BlueprintApi(Cow::Borrowed("test/empty"));

    pub fn new(api: impl Into<String>) -> Self {
        BlueprintApi(Cow::Owned(api.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the document did not declare a version at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifiers this crate ships a schema for.
    pub fn known() -> [BlueprintApi; 2] {
        [BlueprintApi::V1, BlueprintApi::TEST_EMPTY]
    }

    pub fn is_known(&self) -> bool {
        Self::known().contains(self)
    }
}

impl fmt::Display for BlueprintApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlueprintApi {
    fn from(api: &str) -> Self {
        BlueprintApi::new(api)
    }
}

impl From<String> for BlueprintApi {
    fn from(api: String) -> Self {
        BlueprintApi(Cow::Owned(api))
    }
}

impl PartialEq<str> for BlueprintApi {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for BlueprintApi {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
