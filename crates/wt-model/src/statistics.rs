//! Structural model statistics.

use std::collections::BTreeSet;

use wt_core::VarId;

use crate::block::Block;

/// Variables referenced by at least one active constraint.
pub fn variables_in_active_constraints(block: &Block) -> BTreeSet<VarId> {
    block
        .active_constraints()
        .flat_map(|(_, c)| c.vars())
        .collect()
}

/// Fixed variables among those referenced by active constraints.
pub fn number_of_fixed_variables(block: &Block) -> usize {
    variables_in_active_constraints(block)
        .into_iter()
        .filter(|id| block.var(*id).is_some_and(|v| v.is_fixed()))
        .count()
}

/// Unfixed variables in active constraints minus the number of active
/// equality constraints.
pub fn degrees_of_freedom(block: &Block) -> i64 {
    let vars = variables_in_active_constraints(block);
    let unfixed = vars
        .iter()
        .filter(|id| block.var(**id).is_some_and(|v| !v.is_fixed()))
        .count();
    let equations = block.active_constraints().count();
    unfixed as i64 - equations as i64
}
