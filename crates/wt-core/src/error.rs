use thiserror::Error;

pub type WtResult<T> = Result<T, WtError>;

#[derive(Error, Debug)]
pub enum WtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} out of range: {value} (expected {range})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Unit error: {0}")]
    Unit(#[from] crate::unit_tag::UnitError),

    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
