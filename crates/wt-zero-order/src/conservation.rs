//! Mass conservation check across a unit's ports.

use thiserror::Error;
use wt_core::{Tolerances, nearly_equal};
use wt_model::ModelError;

use crate::zero_order::{BYPRODUCT, INLET, TREATED, ZeroOrderUnit};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConservationError {
    #[error(
        "Mass imbalance for {species} at t[{t}]: inlet {inlet} kg/s vs outlets {outlets} kg/s"
    )]
    Imbalance {
        t: usize,
        species: String,
        inlet: f64,
        outlets: f64,
    },

    #[error("Port {port} has no term for {species} at t[{t}]")]
    MissingTerm {
        port: &'static str,
        t: usize,
        species: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Check `inlet = treated + byproduct` for every (time, species) pair.
///
/// Uses current variable values; no solve is required. Returns the first
/// offending pair.
pub fn check_conservation(unit: &ZeroOrderUnit, tol: Tolerances) -> Result<(), ConservationError> {
    let block = unit.block();
    let ports = [INLET, TREATED, BYPRODUCT].map(|name| (name, block.port(name)));

    for t in 0..unit.time().len() {
        for species in unit.properties().component_list() {
            let mut values = [0.0; 3];
            for (slot, &(name, port)) in values.iter_mut().zip(ports.iter()) {
                let term = port.and_then(|p| p.flow_mass_comp(t, species)).ok_or_else(|| {
                    ConservationError::MissingTerm {
                        port: name,
                        t,
                        species: species.to_string(),
                    }
                })?;
                *slot = term.eval_si(block)?;
            }

            let [inlet, treated, byproduct] = values;
            let outlets = treated + byproduct;
            if !nearly_equal(inlet, outlets, tol) {
                return Err(ConservationError::Imbalance {
                    t,
                    species: species.to_string(),
                    inlet,
                    outlets,
                });
            }
        }
    }
    Ok(())
}
