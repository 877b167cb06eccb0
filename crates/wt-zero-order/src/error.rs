//! Error types for zero-order unit models.

use thiserror::Error;
use wt_core::{UnitError, WtError};
use wt_database::DatabaseError;
use wt_model::ModelError;
use wt_properties::PropertyError;

#[derive(Error, Debug)]
pub enum UnitModelError {
    /// No explicit removal fraction for a solute and no usable default.
    #[error("No removal fraction for solute '{solute}' (and default removal not used or absent)")]
    MissingRemovalData { solute: String },

    /// A field the unit's flags require is absent from the parameter record.
    #[error("Parameter record for '{technology}' has no '{field}'")]
    MissingParameter {
        field: &'static str,
        technology: String,
    },

    /// Record units cannot be converted to the variable's units.
    #[error("Units of '{field}' ({found}) are incompatible with {expected}")]
    UnitInconsistency {
        field: &'static str,
        expected: String,
        found: String,
    },

    /// Flags in the unit configuration disagree with the database registry.
    #[error("Unit configured for '{technology}' with flags that differ from the database registry")]
    FlagMismatch { technology: String },

    #[error("Unknown species '{name}'")]
    UnknownSpecies { name: String },

    #[error("Unknown port '{name}'")]
    UnknownPort { name: String },

    #[error("Time index {t} out of range (time set has {len} points)")]
    TimeIndex { t: usize, len: usize },

    #[error("Invalid unit configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Property(#[from] PropertyError),
}

pub type UnitModelResult<T> = Result<T, UnitModelError>;

impl From<UnitModelError> for WtError {
    fn from(e: UnitModelError) -> Self {
        match e {
            UnitModelError::Model(m) => m.into(),
            UnitModelError::Property(p) => p.into(),
            UnitModelError::Unit(u) => u.into(),
            other => WtError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UnitModelError::MissingRemovalData {
            solute: "foo".into(),
        };
        assert!(err.to_string().contains("'foo'"));
    }

    #[test]
    fn error_conversion() {
        let err: WtError = UnitModelError::Model(ModelError::DegreesOfFreedom { dof: 1 }).into();
        assert!(matches!(err, WtError::InvalidArg { .. }));

        let err: WtError = UnitModelError::Property(PropertyError::NonPhysical {
            what: "negative mass flow",
        })
        .into();
        assert!(matches!(err, WtError::Invariant { .. }));
    }
}
