//! wt-zero-order: zero-order treatment unit models.
//!
//! A zero-order unit splits one inlet stream into a treated and a byproduct
//! stream using fixed performance fractions (water recovery, solute removal)
//! and, for most technologies, draws electricity in proportion to the inlet
//! volumetric flow. Every technology is the generic [`ZeroOrderUnit`]
//! configured by its [`TechnologyFlags`](wt_database::TechnologyFlags) and,
//! where needed, extended through [`ExtraRelations`].
//!
//! Lifecycle: build, load parameters, fix the inlet, solve, read back.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use wt_core::units::kgps;
//! use wt_core::Tolerances;
//! use wt_database::{Database, TechnologyRegistry};
//! use wt_properties::{SoluteRegistry, WaterProperties};
//! use wt_zero_order::{check_conservation, nanofiltration};
//!
//! let db = Database::load_dir(Path::new("data/techno_economic"), TechnologyRegistry::builtin())?;
//! let solutes = SoluteRegistry::new(["sulfur", "toc", "tss"])?;
//! let props = Arc::new(WaterProperties::new(solutes));
//!
//! let mut unit = nanofiltration::build(props)?;
//! unit.load_parameters_from_database(&db, false)?;
//! unit.fix_inlet(0, "H2O", kgps(10_000.0))?;
//! unit.fix_inlet(0, "sulfur", kgps(1.0))?;
//! unit.fix_inlet(0, "toc", kgps(2.0))?;
//! unit.fix_inlet(0, "tss", kgps(3.0))?;
//! unit.solve()?;
//!
//! check_conservation(&unit, Tolerances::conservation())?;
//! let treated = unit.stream_state("treated", 0)?;
//! println!("treated flow: {:?}", treated.flow_vol());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod conservation;
pub mod electricity;
pub mod error;
pub mod generic;
pub mod nanofiltration;
pub mod pump;
pub mod traits;
pub mod zero_order;

pub use config::UnitConfig;
pub use conservation::{ConservationError, check_conservation};
pub use error::{UnitModelError, UnitModelResult};
pub use generic::build_from_database;
pub use traits::{ExtraRelations, NoExtraRelations};
pub use zero_order::{BYPRODUCT, INLET, TREATED, ZeroOrderUnit};
