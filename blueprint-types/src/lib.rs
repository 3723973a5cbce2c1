//! Shared schema types (schemas-as-code) for blueprint documents.
//!
//! # Design constraints
//! - A document is read in two phases: first only its `blueprintApi` tag, then the
//!   version-specific body.
//! - Field additions to an API version must never change the meaning of existing fields.
//!   Removals, renames and semantic changes require a new API identifier.
//! - Every operation here is a pure function of its input.

pub mod api;
pub mod error;
pub mod general;
pub mod target_state;
pub mod wire;

pub use api::BlueprintApi;
pub use error::BlueprintError;
pub use general::{GeneralBlueprint, parse_blueprint};
pub use target_state::{StateMark, TargetState};
pub use wire::{BlueprintV1, RegistryConfig, TargetDogu, TargetPackage};

/// Wire field names shared by every API version.
pub mod fields {
    pub const BLUEPRINT_API: &str = "blueprintApi";
}
