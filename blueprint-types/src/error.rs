//! Error types for blueprint decoding.
//!
//! Both variants keep the underlying `serde_json::Error` as their source so callers can
//! report the low-level cause next to the hint.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlueprintError {
    /// The input is not well-formed JSON, or a field has the wrong shape.
    #[error("could not parse blueprint; check the blueprint for validity")]
    MalformedDocument {
        #[source]
        source: serde_json::Error,
    },

    /// A `targetState` value is present but is not a string.
    #[error("cannot unmarshal value {raw} to a TargetState")]
    MalformedEnum {
        /// The offending wire value, lossily decoded as UTF-8.
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BlueprintError {
    pub(crate) fn malformed_document(source: serde_json::Error) -> Self {
        BlueprintError::MalformedDocument { source }
    }

    /// Classifies a failed full-document decode, keeping non-string `targetState` values
    /// apart from other structural failures.
    pub(crate) fn from_document(source: serde_json::Error) -> Self {
        match crate::target_state::malformed_enum_raw(&source) {
            Some(raw) => BlueprintError::MalformedEnum { raw, source },
            None => BlueprintError::MalformedDocument { source },
        }
    }

    pub(crate) fn malformed_enum(raw: &[u8], source: serde_json::Error) -> Self {
        BlueprintError::MalformedEnum {
            raw: String::from_utf8_lossy(raw).into_owned(),
            source,
        }
    }

    /// The low-level decode error behind this failure.
    pub fn cause(&self) -> &serde_json::Error {
        match self {
            BlueprintError::MalformedDocument { source } => source,
            BlueprintError::MalformedEnum { source, .. } => source,
        }
    }

    /// True when the input ended before the document was complete.
    pub fn is_truncated(&self) -> bool {
        self.cause().is_eof()
    }
}
