//! wt-core: stable foundation for the water treatment unit framework.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - unit_tag (runtime unit tags parsed from database strings, with dimensions)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact IDs for model variables and constraints)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod unit_tag;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WtError, WtResult};
pub use ids::*;
pub use numeric::*;
pub use unit_tag::{Dimension, UnitError, UnitTag};
pub use units::*;
