//! Extension point for technology-specific relations.

use crate::error::UnitModelResult;
use crate::zero_order::ZeroOrderUnit;

/// Relations a technology adds on top of the generic zero-order structure.
///
/// Called once, after the mass balances and the electricity relation have
/// been built. Implementations add variables, constraints or ports to
/// `unit.block_mut()`.
pub trait ExtraRelations {
    fn build_extra(&self, unit: &mut ZeroOrderUnit) -> UnitModelResult<()>;
}

/// No additional relations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtraRelations;

impl ExtraRelations for NoExtraRelations {
    fn build_extra(&self, _unit: &mut ZeroOrderUnit) -> UnitModelResult<()> {
        Ok(())
    }
}
