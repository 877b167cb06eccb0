//! Units consistency check.

use crate::block::Block;
use crate::error::{ModelError, ModelResult};

/// Verify that every constraint relates quantities of the same dimension and
/// that every port term is internally consistent.
///
/// Constant factors such as seconds per hour carry their own units, so an
/// expression mixing kWh/m^3 with m^3/s is accepted as power.
pub fn assert_units_consistent(block: &Block) -> ModelResult<()> {
    for (_, con) in block.constraints() {
        let context = con.full_name();
        let left = con.lhs().dimension(block, &context)?;
        let right = con.rhs().dimension(block, &context)?;
        if left != right {
            return Err(ModelError::UnitInconsistency {
                context,
                left,
                right,
            });
        }
    }

    for port in block.ports() {
        for (t, species, term) in port.iter() {
            let context = format!("{}.flow_mass_comp[{t},{species}]", port.name());
            term.dimension(block, &context)?;
        }
    }

    Ok(())
}
