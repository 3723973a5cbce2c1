use anyhow::Context;
use blueprint_types::BlueprintApi;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use thiserror::Error;
use tracing::debug;

use crate::config::{DispatchConfig, LoaderConfig};
use crate::dispatch::{Blueprint, DecodeError, decode_blueprint};

#[derive(Debug, Clone)]
pub struct LoadedBlueprint {
    pub path: Utf8PathBuf,
    pub blueprint: Result<Blueprint, BlueprintLoadError>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlueprintLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("decode error: {message}")]
    Decode { message: String },

    #[error("unsupported blueprint API version '{api}'")]
    UnsupportedVersion { api: BlueprintApi },
}

impl From<DecodeError> for BlueprintLoadError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedVersion { api } | DecodeError::TestApiDisabled { api } => {
                BlueprintLoadError::UnsupportedVersion { api }
            }
            other => BlueprintLoadError::Decode {
                message: error_chain(&other),
            },
        }
    }
}

/// Display an error followed by each of its sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Read and decode a single blueprint file.
pub fn load_blueprint(path: &Utf8Path, config: &DispatchConfig) -> anyhow::Result<Blueprint> {
    let raw = fs::read(path).with_context(|| format!("read blueprint {}", path))?;
    let blueprint =
        decode_blueprint(&raw, config).with_context(|| format!("decode blueprint {}", path))?;
    debug!(path = %path, api = %blueprint.api(), "loaded blueprint");
    Ok(blueprint)
}

/// Decode every file in `dir` matching the configured pattern.
///
/// A file that fails does not fail the scan; its error is kept on its entry. A missing
/// directory yields no entries.
pub fn load_blueprints(dir: &Utf8Path, config: &LoaderConfig) -> anyhow::Result<Vec<LoadedBlueprint>> {
    let pattern = dir.join(&config.scan.pattern);
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning for blueprints");

    let mut out = Vec::new();
    for entry in glob(pattern_str).with_context(|| format!("glob {}", pattern_str))? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        let utf8_path = Utf8PathBuf::from(path);

        if utf8_path.is_dir() {
            debug!(path = %utf8_path, "skipping directory");
            continue;
        }

        let blueprint = match fs::read(&utf8_path) {
            Ok(raw) => decode_blueprint(&raw, &config.dispatch).map_err(BlueprintLoadError::from),
            Err(e) => Err(BlueprintLoadError::Io {
                message: e.to_string(),
            }),
        };

        out.push(LoadedBlueprint {
            path: utf8_path,
            blueprint,
        });
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}
