//! Units for any technology in the database.

use std::sync::Arc;

use wt_database::{Database, DatabaseError};
use wt_properties::WaterProperties;

use crate::config::UnitConfig;
use crate::error::UnitModelResult;
use crate::zero_order::ZeroOrderUnit;

/// Build a unit for `technology` with the database registry's flags, then
/// load the requested variant.
pub fn build_from_database(
    properties: Arc<WaterProperties>,
    db: &Database,
    technology: &str,
    variant: &str,
    use_default_removal: bool,
) -> UnitModelResult<ZeroOrderUnit> {
    if !db.contains(technology) {
        return Err(DatabaseError::NotFound {
            technology: technology.to_string(),
        }
        .into());
    }
    let config = UnitConfig::from_registry(db.registry(), technology).with_variant(variant);
    let mut unit = ZeroOrderUnit::build(properties, config)?;
    unit.load_parameters_from_database(db, use_default_removal)?;
    Ok(unit)
}
