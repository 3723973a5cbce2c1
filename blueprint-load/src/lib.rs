//! Version dispatch and blueprint loading.
//!
//! Decoding happens in two phases: `blueprint_types::parse_blueprint` reads only the API
//! identifier, then [`decode_blueprint`] hands the raw bytes to the decoder registered for
//! that identifier. Identifiers without a decoder fail with
//! [`DecodeError::UnsupportedVersion`] instead of being forced into a known schema.

pub mod config;
mod dispatch;
mod load;

pub use config::{ConfigMerger, DispatchConfig, LoaderConfig, ScanConfig};
pub use dispatch::{Blueprint, DecodeError, decode_blueprint};
pub use load::{BlueprintLoadError, LoadedBlueprint, load_blueprint, load_blueprints};
