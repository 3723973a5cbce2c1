use blueprint_types::{BlueprintApi, BlueprintError, BlueprintV1, GeneralBlueprint, parse_blueprint};
use thiserror::Error;
use tracing::debug;

use crate::config::DispatchConfig;

/// A fully decoded blueprint, one variant per supported API identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Blueprint {
    V1(BlueprintV1),
    /// The test-only identifier; it carries no body beyond the envelope.
    TestEmpty(GeneralBlueprint),
}

impl Blueprint {
    pub fn api(&self) -> &BlueprintApi {
        &self.general().api
    }

    pub fn general(&self) -> &GeneralBlueprint {
        match self {
            Blueprint::V1(blueprint) => &blueprint.general,
            Blueprint::TestEmpty(general) => general,
        }
    }

    pub fn as_v1(&self) -> Option<&BlueprintV1> {
        match self {
            Blueprint::V1(blueprint) => Some(blueprint),
            Blueprint::TestEmpty(_) => None,
        }
    }

    pub fn into_v1(self) -> Option<BlueprintV1> {
        match self {
            Blueprint::V1(blueprint) => Some(blueprint),
            Blueprint::TestEmpty(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Parse(#[from] BlueprintError),

    #[error("blueprint does not declare a blueprintApi version")]
    MissingVersion,

    #[error("unsupported blueprint API version '{api}'")]
    UnsupportedVersion { api: BlueprintApi },

    /// A test-only identifier was found while test identifiers are disabled.
    #[error("blueprint API version '{api}' is test-only and not enabled")]
    TestApiDisabled { api: BlueprintApi },
}

impl DecodeError {
    pub fn is_unsupported_version(&self) -> bool {
        matches!(
            self,
            DecodeError::UnsupportedVersion { .. } | DecodeError::TestApiDisabled { .. }
        )
    }
}

type DecodeFn = fn(&[u8], GeneralBlueprint) -> Result<Blueprint, BlueprintError>;

struct VersionDecoder {
    api: BlueprintApi,
    test_only: bool,
    decode: DecodeFn,
}

static DECODERS: [VersionDecoder; 2] = [
    VersionDecoder {
        api: BlueprintApi::V1,
        test_only: false,
        decode: decode_v1,
    },
    VersionDecoder {
        api: BlueprintApi::TEST_EMPTY,
        test_only: true,
        decode: decode_test_empty,
    },
];

fn decode_v1(raw: &[u8], _general: GeneralBlueprint) -> Result<Blueprint, BlueprintError> {
    BlueprintV1::from_slice(raw).map(Blueprint::V1)
}

fn decode_test_empty(_raw: &[u8], general: GeneralBlueprint) -> Result<Blueprint, BlueprintError> {
    Ok(Blueprint::TestEmpty(general))
}

/// Discover the API identifier of `raw`, then decode it with the matching schema.
pub fn decode_blueprint(raw: &[u8], config: &DispatchConfig) -> Result<Blueprint, DecodeError> {
    let general = parse_blueprint(raw)?;
    if !general.is_declared() {
        debug!("blueprint declares no api version");
        return Err(DecodeError::MissingVersion);
    }

    let Some(decoder) = DECODERS.iter().find(|d| d.api == general.api) else {
        debug!(api = %general.api, "no decoder for blueprint api");
        return Err(DecodeError::UnsupportedVersion { api: general.api });
    };

    if decoder.test_only && !config.allow_test_apis {
        debug!(api = %general.api, "test-only blueprint api rejected");
        return Err(DecodeError::TestApiDisabled { api: general.api });
    }

    debug!(api = %general.api, "decoding blueprint");
    Ok((decoder.decode)(raw, general)?)
}
