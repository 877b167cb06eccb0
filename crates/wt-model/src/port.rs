//! Ports: named bundles of stream terms.
//!
//! A port member is an expression, not necessarily a variable. Derived
//! streams (such as an outlet computed as inlet minus another outlet) are
//! exposed the same way as the streams that own variables.

use std::collections::BTreeMap;

use crate::block::Block;
use crate::error::ModelResult;
use crate::expr::Expr;

/// Mass flow terms of a stream keyed by `(time index, species)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Port {
    name: String,
    members: BTreeMap<(usize, String), Expr>,
}

impl Port {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, t: usize, species: impl Into<String>, term: Expr) {
        self.members.insert((t, species.into()), term);
    }

    pub fn flow_mass_comp(&self, t: usize, species: &str) -> Option<&Expr> {
        self.members.get(&(t, species.to_string()))
    }

    /// Evaluated term in SI (kg/s), or `None` for an unknown member.
    pub fn value_si(&self, block: &Block, t: usize, species: &str) -> ModelResult<Option<f64>> {
        match self.flow_mass_comp(t, species) {
            Some(expr) => Ok(Some(expr.eval_si(block)?)),
            None => Ok(None),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &Expr)> {
        self.members
            .iter()
            .map(|((t, species), expr)| (*t, species.as_str(), expr))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
