use crate::error::BlueprintError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Installation state an item must be in after a blueprint was applied.
///
/// Wire form is `"present"` or `"absent"`. Decoding is lenient: any other string,
/// `null` or a missing field resolves to [`TargetState::Present`]. Callers that need to
/// reject non-canonical text use [`TargetState::parse_strict`] on the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetState {
    /// The item must be installed.
    #[default]
    Present,
    /// The item must not be installed.
    Absent,
}

const WIRE_NAMES: [(TargetState, &str); 2] = [
    (TargetState::Present, "present"),
    (TargetState::Absent, "absent"),
];

impl TargetState {
    pub const ALL: [TargetState; 2] = [TargetState::Present, TargetState::Absent];

    pub fn as_str(self) -> &'static str {
        WIRE_NAMES[self as usize].1
    }

    /// Exact, case-sensitive match on the canonical wire names.
    pub fn parse_strict(text: &str) -> Option<TargetState> {
        WIRE_NAMES
            .iter()
            .find(|(_, name)| *name == text)
            .map(|(state, _)| *state)
    }

    /// Lenient decode of wire text; anything unrecognized is `Present`.
    pub fn from_wire(text: &str) -> TargetState {
        Self::parse_strict(text).unwrap_or_default()
    }

    /// Decode a single JSON value such as `"absent"`.
    ///
    /// Fails with [`BlueprintError::MalformedEnum`] when the value is not a string.
    pub fn from_json(raw: &[u8]) -> Result<TargetState, BlueprintError> {
        serde_json::from_slice(raw).map_err(|e| BlueprintError::malformed_enum(raw, e))
    }

    pub fn is_present(self) -> bool {
        matches!(self, TargetState::Present)
    }

    pub fn is_absent(self) -> bool {
        matches!(self, TargetState::Absent)
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TargetState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

const MALFORMED_PREFIX: &str = "cannot unmarshal value ";
const MALFORMED_SUFFIX: &str = " to a TargetState";

impl<'de> Deserialize<'de> for TargetState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => Ok(TargetState::from_wire(&text)),
            serde_json::Value::Null => Ok(TargetState::Present),
            other => Err(de::Error::custom(format!(
                "{MALFORMED_PREFIX}{other}{MALFORMED_SUFFIX}"
            ))),
        }
    }
}

/// The offending wire value, if `err` was raised by decoding a non-string `TargetState`.
pub(crate) fn malformed_enum_raw(err: &serde_json::Error) -> Option<String> {
    if !err.is_data() {
        return None;
    }
    let message = err.to_string();
    let rest = message.strip_prefix(MALFORMED_PREFIX)?;
    let end = rest.rfind(MALFORMED_SUFFIX)?;
    Some(rest[..end].to_string())
}

/// Classification of an item while comparing a blueprint to a live instance.
///
/// `Ignore` marks items found on the instance but not mentioned in the blueprint. It has
/// no wire form, so this type deliberately does not implement `Serialize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateMark {
    Target(TargetState),
    Ignore,
}

impl StateMark {
    /// The wire-representable state, if any.
    pub fn target_state(self) -> Option<TargetState> {
        match self {
            StateMark::Target(state) => Some(state),
            StateMark::Ignore => None,
        }
    }

    pub fn is_ignore(self) -> bool {
        matches!(self, StateMark::Ignore)
    }
}

impl Default for StateMark {
    fn default() -> Self {
        StateMark::Target(TargetState::default())
    }
}

impl From<TargetState> for StateMark {
    fn from(state: TargetState) -> Self {
        StateMark::Target(state)
    }
}
