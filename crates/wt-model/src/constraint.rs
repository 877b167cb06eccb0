//! Equality constraints `lhs == rhs`.

use wt_core::VarId;

use crate::block::Block;
use crate::error::ModelResult;
use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    name: String,
    index: Option<String>,
    lhs: Expr,
    rhs: Expr,
    active: bool,
}

impl Constraint {
    pub fn new(name: impl Into<String>, lhs: Expr, rhs: Expr) -> Self {
        Self {
            name: name.into(),
            index: None,
            lhs,
            rhs,
            active: true,
        }
    }

    pub fn indexed(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    pub fn full_name(&self) -> String {
        match &self.index {
            Some(idx) => format!("{}[{}]", self.name, idx),
            None => self.name.clone(),
        }
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// `lhs - rhs` in SI units.
    pub fn residual_si(&self, block: &Block) -> ModelResult<f64> {
        Ok(self.lhs.eval_si(block)? - self.rhs.eval_si(block)?)
    }

    /// Variables referenced on either side.
    pub fn vars(&self) -> Vec<VarId> {
        let mut out = self.lhs.vars();
        for id in self.rhs.vars() {
            if !out.contains(&id) {
                out.push(id);
            }
        }
        out
    }
}
