use crate::api::BlueprintApi;
use crate::error::BlueprintError;
use crate::fields;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The minimal envelope every blueprint version shares.
///
/// It only carries the API identifier used to select the full schema. The identifier is
/// empty when the document did not declare one.
///
/// This field MUST NOT be modified or removed in any future API version.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GeneralBlueprint {
    /// Identifier selecting the full schema. Serialized under `fields::BLUEPRINT_API`.
    #[serde(rename = "blueprintApi")]
    pub api: BlueprintApi,
}

impl GeneralBlueprint {
    pub fn new(api: BlueprintApi) -> Self {
        Self { api }
    }

    /// True when the document named an API identifier.
    pub fn is_declared(&self) -> bool {
        !self.api.is_empty()
    }
}

// Hand-written so unrelated keys are skipped without being materialized. A top-level
// `null` is an undeclared version; other non-object documents are rejected.
impl<'de> Deserialize<'de> for GeneralBlueprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EnvelopeVisitor;

        impl<'de> Visitor<'de> for EnvelopeVisitor {
            type Value = GeneralBlueprint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a blueprint object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut api = BlueprintApi::default();
                while let Some(key) = map.next_key::<std::borrow::Cow<'de, str>>()? {
                    // A repeated key overwrites the earlier value.
                    if key == fields::BLUEPRINT_API {
                        api = map.next_value()?;
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(GeneralBlueprint { api })
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(GeneralBlueprint::default())
            }
        }

        deserializer.deserialize_any(EnvelopeVisitor)
    }
}

/// Discover the API identifier of a raw blueprint without decoding its body.
///
/// Unrelated fields are ignored whatever their shape. A missing `blueprintApi` yields an
/// empty identifier, and so does a top-level `null`. Fails with
/// [`BlueprintError::MalformedDocument`] when the input is not well-formed JSON, is neither an
/// object nor `null`, or the identifier is present but not a string.
pub fn parse_blueprint(raw: &[u8]) -> Result<GeneralBlueprint, BlueprintError> {
    serde_json::from_slice(raw).map_err(BlueprintError::malformed_document)
}
