//! Block arena: variables, constraints and ports of one model.

use std::collections::{BTreeMap, HashMap};

use wt_core::{ConId, VarId};

use crate::constraint::Constraint;
use crate::error::{ModelError, ModelResult};
use crate::port::Port;
use crate::variable::Var;

/// Container for the algebraic model of a unit.
///
/// Variables and constraints are addressed by compact IDs; both are also
/// discoverable by `(name, index)` so tests and reports can look them up the
/// way a user names them.
#[derive(Debug, Clone, Default)]
pub struct Block {
    name: String,
    vars: Vec<Var>,
    var_lookup: HashMap<String, VarId>,
    constraints: Vec<Constraint>,
    con_lookup: HashMap<String, ConId>,
    ports: BTreeMap<String, Port>,
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ---- variables ----

    pub fn add_var(&mut self, var: Var) -> ModelResult<VarId> {
        let key = var.full_name();
        if self.var_lookup.contains_key(&key) {
            return Err(ModelError::Duplicate {
                what: "variable",
                name: key,
            });
        }
        let id = VarId::from_index(self.vars.len());
        self.vars.push(var);
        self.var_lookup.insert(key, id);
        Ok(id)
    }

    pub fn var(&self, id: VarId) -> Option<&Var> {
        self.vars.get(id.index())
    }

    pub fn try_var(&self, id: VarId) -> ModelResult<&Var> {
        self.var(id).ok_or(ModelError::UnknownVar { id })
    }

    fn try_var_mut(&mut self, id: VarId) -> ModelResult<&mut Var> {
        self.vars
            .get_mut(id.index())
            .ok_or(ModelError::UnknownVar { id })
    }

    pub fn find_var(&self, name: &str, index: Option<&str>) -> Option<VarId> {
        let key = match index {
            Some(idx) => format!("{name}[{idx}]"),
            None => name.to_string(),
        };
        self.var_lookup.get(&key).copied()
    }

    /// Current value in the variable's declared units.
    pub fn value(&self, id: VarId) -> ModelResult<f64> {
        Ok(self.try_var(id)?.value())
    }

    pub fn set_value(&mut self, id: VarId, value: f64) -> ModelResult<()> {
        self.try_var_mut(id)?.set_value(value);
        Ok(())
    }

    /// Set the value and mark the variable fixed.
    pub fn fix(&mut self, id: VarId, value: f64) -> ModelResult<()> {
        let var = self.try_var_mut(id)?;
        var.set_value(value);
        var.set_fixed(true);
        Ok(())
    }

    pub fn unfix(&mut self, id: VarId) -> ModelResult<()> {
        self.try_var_mut(id)?.set_fixed(false);
        Ok(())
    }

    pub fn vars(&self) -> impl Iterator<Item = (VarId, &Var)> {
        self.vars
            .iter()
            .enumerate()
            .map(|(i, v)| (VarId::from_index(i), v))
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    // ---- constraints ----

    pub fn add_constraint(&mut self, constraint: Constraint) -> ModelResult<ConId> {
        for id in constraint.vars() {
            self.try_var(id)?;
        }
        let key = constraint.full_name();
        if self.con_lookup.contains_key(&key) {
            return Err(ModelError::Duplicate {
                what: "constraint",
                name: key,
            });
        }
        let id = ConId::from_index(self.constraints.len());
        self.constraints.push(constraint);
        self.con_lookup.insert(key, id);
        Ok(id)
    }

    pub fn constraint(&self, id: ConId) -> Option<&Constraint> {
        self.constraints.get(id.index())
    }

    pub fn constraint_mut(&mut self, id: ConId) -> Option<&mut Constraint> {
        self.constraints.get_mut(id.index())
    }

    pub fn find_constraint(&self, name: &str, index: Option<&str>) -> Option<ConId> {
        let key = match index {
            Some(idx) => format!("{name}[{idx}]"),
            None => name.to_string(),
        };
        self.con_lookup.get(&key).copied()
    }

    pub fn constraints(&self) -> impl Iterator<Item = (ConId, &Constraint)> {
        self.constraints
            .iter()
            .enumerate()
            .map(|(i, c)| (ConId::from_index(i), c))
    }

    pub fn active_constraints(&self) -> impl Iterator<Item = (ConId, &Constraint)> {
        self.constraints().filter(|(_, c)| c.is_active())
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    // ---- ports ----

    pub fn add_port(&mut self, port: Port) -> ModelResult<()> {
        if self.ports.contains_key(port.name()) {
            return Err(ModelError::Duplicate {
                what: "port",
                name: port.name().to_string(),
            });
        }
        for (_, _, term) in port.iter() {
            for id in term.vars() {
                self.try_var(id)?;
            }
        }
        self.ports.insert(port.name().to_string(), port);
        Ok(())
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    pub fn port_mut(&mut self, name: &str) -> Option<&mut Port> {
        self.ports.get_mut(name)
    }

    pub fn ports(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }
}
