//! Zero-order pump.
//!
//! Pass-through: the treated stream is the inlet and the byproduct carries
//! nothing. Electricity demand follows the constant-intensity relation.

use std::sync::Arc;

use wt_database::TechnologyFlags;
use wt_properties::WaterProperties;

use crate::config::UnitConfig;
use crate::error::UnitModelResult;
use crate::zero_order::ZeroOrderUnit;

pub const TECHNOLOGY: &str = "pump";

pub fn build(properties: Arc<WaterProperties>) -> UnitModelResult<ZeroOrderUnit> {
    ZeroOrderUnit::build(
        properties,
        UnitConfig::new(TECHNOLOGY, TechnologyFlags::PASS_THROUGH),
    )
}
