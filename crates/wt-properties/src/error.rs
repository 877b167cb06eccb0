//! Property package errors.

use thiserror::Error;
use wt_core::WtError;

/// Result type for property operations.
pub type PropertyResult<T> = Result<T, PropertyError>;

/// Errors raised by the solute registry and stream calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// A solute identifier appears twice in the registry.
    #[error("Duplicate solute '{name}' in solute registry")]
    DuplicateSolute { name: String },

    /// The solvent name was registered as a solute.
    #[error("'{name}' is reserved for the solvent and cannot be a solute")]
    ReservedName { name: String },

    /// Empty or whitespace-only identifier.
    #[error("Solute identifiers must be non-empty")]
    EmptyName,

    /// A species name that is neither water nor a registered solute.
    #[error("Unknown species '{name}'")]
    UnknownSpecies { name: String },

    /// Non-physical values (negative density, negative flow, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}

impl From<PropertyError> for WtError {
    fn from(err: PropertyError) -> Self {
        match err {
            PropertyError::NonPhysical { what } => WtError::Invariant {
                what: format!("Non-physical property value: {what}"),
            },
            other => WtError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
