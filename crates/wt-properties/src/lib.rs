//! wt-properties: water property package for zero-order models.
//!
//! Provides:
//! - The flowsheet-wide solute registry (`SoluteRegistry`)
//! - Density models used to turn mass flows into volumetric flows
//! - The property package handed to every unit model (`WaterProperties`)
//! - Per-stream state with volumetric flow and mass concentrations
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wt_properties::{SoluteRegistry, WaterProperties};
//!
//! let solutes = SoluteRegistry::new(["sulfur", "toc", "tss"]).unwrap();
//! let props = Arc::new(WaterProperties::new(solutes));
//!
//! assert_eq!(props.component_list(), vec!["H2O", "sulfur", "toc", "tss"]);
//! ```

pub mod density;
pub mod error;
pub mod properties;
pub mod solutes;
pub mod stream;

// Re-exports for ergonomics
pub use density::{ConstantDensity, DensityModel};
pub use error::{PropertyError, PropertyResult};
pub use properties::WaterProperties;
pub use solutes::{SoluteRegistry, WATER};
pub use stream::StreamState;
