//! Zero-order nanofiltration: single inlet, treated permeate and byproduct
//! retentate, constant electricity intensity.

use std::sync::Arc;

use wt_database::TechnologyFlags;
use wt_properties::WaterProperties;

use crate::config::UnitConfig;
use crate::error::UnitModelResult;
use crate::zero_order::ZeroOrderUnit;

pub const TECHNOLOGY: &str = "nanofiltration";

pub fn build(properties: Arc<WaterProperties>) -> UnitModelResult<ZeroOrderUnit> {
    ZeroOrderUnit::build(
        properties,
        UnitConfig::new(TECHNOLOGY, TechnologyFlags::SEPARATOR),
    )
}
