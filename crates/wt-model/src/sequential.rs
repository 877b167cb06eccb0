//! Sequential evaluation of explicit square systems.
//!
//! Every active constraint must have the form `v == expr` where `v` is an
//! unfixed variable defined by no other constraint. Constraints are then
//! evaluated in dependency order. Systems that need simultaneous solution
//! are rejected; those belong to a full nonlinear solver.

use std::collections::HashSet;

use wt_core::{ConId, VarId};

use crate::block::Block;
use crate::error::{ModelError, ModelResult};
use crate::expr::Expr;
use crate::statistics::degrees_of_freedom;

/// Outcome of [`solve_sequential`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// Number of variables assigned
    pub assigned: usize,
    /// Largest absolute constraint residual (SI) after assignment
    pub max_residual: f64,
    /// Variables whose computed value lies outside their bounds
    pub bound_violations: Vec<String>,
}

/// Evaluate every active constraint of `block` in dependency order.
pub fn solve_sequential(block: &mut Block) -> ModelResult<SolveReport> {
    let dof = degrees_of_freedom(block);
    if dof != 0 {
        return Err(ModelError::DegreesOfFreedom { dof });
    }

    let mut pending: Vec<(ConId, VarId)> = Vec::new();
    let mut defined: HashSet<VarId> = HashSet::new();
    for (cid, con) in block.active_constraints() {
        let target = match con.lhs() {
            Expr::Var(id) if !block.try_var(*id)?.is_fixed() => *id,
            _ => {
                return Err(ModelError::NotExplicit {
                    constraint: con.full_name(),
                });
            }
        };
        if !defined.insert(target) || con.rhs().vars().contains(&target) {
            return Err(ModelError::NotExplicit {
                constraint: con.full_name(),
            });
        }
        pending.push((cid, target));
    }

    let mut known: HashSet<VarId> = block
        .vars()
        .filter(|(_, v)| v.is_fixed())
        .map(|(id, _)| id)
        .collect();

    let mut report = SolveReport {
        assigned: 0,
        max_residual: 0.0,
        bound_violations: Vec::new(),
    };

    while !pending.is_empty() {
        let before = pending.len();
        let mut remaining = Vec::with_capacity(before);

        for (cid, target) in pending {
            let Some(con) = block.constraint(cid) else {
                continue;
            };
            let ready = con
                .rhs()
                .vars()
                .iter()
                .all(|id| known.contains(id) || !defined.contains(id));
            if !ready {
                remaining.push((cid, target));
                continue;
            }

            let value_si = con.rhs().eval_si(block)?;
            let var = block.try_var(target)?;
            let name = var.full_name();
            if !value_si.is_finite() {
                return Err(ModelError::NonFinite { var: name });
            }
            let value = var.units().from_si(value_si);
            block.set_value(target, value)?;

            let var = block.try_var(target)?;
            if !var.within_bounds() {
                tracing::warn!(
                    block = block.name(),
                    var = %name,
                    value,
                    lower = ?var.lower(),
                    upper = ?var.upper(),
                    "computed value outside bounds"
                );
                report.bound_violations.push(name);
            }

            known.insert(target);
            report.assigned += 1;
        }

        if remaining.len() == before {
            return Err(ModelError::Unresolved {
                pending: remaining.len(),
            });
        }
        pending = remaining;
    }

    for (_, con) in block.active_constraints() {
        let r = con.residual_si(block)?.abs();
        if r > report.max_residual {
            report.max_residual = r;
        }
    }

    tracing::debug!(
        block = block.name(),
        assigned = report.assigned,
        max_residual = report.max_residual,
        "sequential solve complete"
    );
    Ok(report)
}
