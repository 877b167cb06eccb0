//! Error types for model construction and evaluation.

use thiserror::Error;
use wt_core::{Dimension, VarId, WtError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Inconsistent units in {context}: {left} vs {right}")]
    UnitInconsistency {
        context: String,
        left: Dimension,
        right: Dimension,
    },

    #[error("Dimension exponent out of range in {context}")]
    DimensionOverflow { context: String },

    #[error("Degrees of freedom must be zero before solving (found {dof})")]
    DegreesOfFreedom { dof: i64 },

    #[error("Constraint {constraint} is not explicit in a single free variable")]
    NotExplicit { constraint: String },

    #[error("Could not order constraints for sequential evaluation: {pending} left unresolved")]
    Unresolved { pending: usize },

    #[error("Non-finite value computed for {var}")]
    NonFinite { var: String },

    #[error("Unknown variable {id}")]
    UnknownVar { id: VarId },

    #[error("Duplicate {what}: {name}")]
    Duplicate { what: &'static str, name: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl From<ModelError> for WtError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NonFinite { var } => WtError::Invariant {
                what: format!("non-finite value for {var}"),
            },
            other => WtError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
