//! Expression trees over block variables.
//!
//! Expressions are evaluated in SI: a variable contributes `units.to_si(value)`
//! and a constant contributes `units.to_si(value)`. Dimensions are inferred
//! structurally so a units check never needs numeric values.

use std::ops::{Add, Div, Mul, Sub};

use wt_core::{Dimension, UnitTag, VarId};

use crate::block::Block;
use crate::error::{ModelError, ModelResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(VarId),
    Const { value: f64, units: UnitTag },
    Sum(Vec<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(id: VarId) -> Self {
        Expr::Var(id)
    }

    pub fn constant(value: f64, units: UnitTag) -> Self {
        Expr::Const { value, units }
    }

    /// Zero with the given units; the term of a stream that carries nothing.
    pub fn zero(units: UnitTag) -> Self {
        Expr::Const { value: 0.0, units }
    }

    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Sum(terms.into_iter().collect())
    }

    /// Numeric value in SI units.
    ///
    /// Division by zero yields a non-finite value; callers that assign
    /// results check finiteness.
    pub fn eval_si(&self, block: &Block) -> ModelResult<f64> {
        Ok(match self {
            Expr::Var(id) => block.try_var(*id)?.value_si(),
            Expr::Const { value, units } => units.to_si(*value),
            Expr::Sum(terms) => {
                let mut acc = 0.0;
                for term in terms {
                    acc += term.eval_si(block)?;
                }
                acc
            }
            Expr::Sub(a, b) => a.eval_si(block)? - b.eval_si(block)?,
            Expr::Mul(a, b) => a.eval_si(block)? * b.eval_si(block)?,
            Expr::Div(a, b) => a.eval_si(block)? / b.eval_si(block)?,
        })
    }

    /// Value converted to `units`, or `None` when the dimensions differ.
    pub fn eval_in(&self, block: &Block, units: &UnitTag) -> ModelResult<Option<f64>> {
        if self.dimension(block, "expression")? != units.dimension() {
            return Ok(None);
        }
        Ok(Some(units.from_si(self.eval_si(block)?)))
    }

    /// Physical dimension of the expression.
    ///
    /// Sums and differences require matching operand dimensions; `context`
    /// names the owner in the resulting error.
    pub fn dimension(&self, block: &Block, context: &str) -> ModelResult<Dimension> {
        match self {
            Expr::Var(id) => Ok(block.try_var(*id)?.units().dimension()),
            Expr::Const { units, .. } => Ok(units.dimension()),
            Expr::Sum(terms) => {
                let mut iter = terms.iter();
                let Some(first) = iter.next() else {
                    return Ok(Dimension::NONE);
                };
                let dim = first.dimension(block, context)?;
                for term in iter {
                    let other = term.dimension(block, context)?;
                    if other != dim {
                        return Err(ModelError::UnitInconsistency {
                            context: context.to_string(),
                            left: dim,
                            right: other,
                        });
                    }
                }
                Ok(dim)
            }
            Expr::Sub(a, b) => {
                let left = a.dimension(block, context)?;
                let right = b.dimension(block, context)?;
                if left != right {
                    return Err(ModelError::UnitInconsistency {
                        context: context.to_string(),
                        left,
                        right,
                    });
                }
                Ok(left)
            }
            Expr::Mul(a, b) => {
                let left = a.dimension(block, context)?;
                let right = b.dimension(block, context)?;
                left.checked_mul(right).ok_or_else(|| ModelError::DimensionOverflow {
                    context: context.to_string(),
                })
            }
            Expr::Div(a, b) => {
                let left = a.dimension(block, context)?;
                let right = b.dimension(block, context)?;
                left.checked_div(right).ok_or_else(|| ModelError::DimensionOverflow {
                    context: context.to_string(),
                })
            }
        }
    }

    /// Variables referenced by the expression, in first-seen order.
    pub fn vars(&self) -> Vec<VarId> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut Vec<VarId>) {
        match self {
            Expr::Var(id) => {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
            Expr::Const { .. } => {}
            Expr::Sum(terms) => terms.iter().for_each(|t| t.collect_vars(out)),
            Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                a.collect_vars(out);
                b.collect_vars(out);
            }
        }
    }

    /// Human-readable rendering using variable names from `block`.
    pub fn render(&self, block: &Block) -> String {
        match self {
            Expr::Var(id) => block
                .try_var(*id)
                .map(|v| v.full_name())
                .unwrap_or_else(|_| format!("?{id}")),
            Expr::Const { value, units } if units.is_dimensionless() => format!("{value}"),
            Expr::Const { value, units } => format!("{value} {units}"),
            Expr::Sum(terms) => {
                let parts: Vec<String> = terms.iter().map(|t| t.render(block)).collect();
                format!("({})", parts.join(" + "))
            }
            Expr::Sub(a, b) => format!("({} - {})", a.render(block), b.render(block)),
            Expr::Mul(a, b) => format!("{}*{}", a.render(block), b.render(block)),
            Expr::Div(a, b) => format!("{}/{}", a.render(block), b.render(block)),
        }
    }
}

impl From<VarId> for Expr {
    fn from(id: VarId) -> Self {
        Expr::Var(id)
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        match self {
            Expr::Sum(mut terms) => {
                terms.push(rhs);
                Expr::Sum(terms)
            }
            lhs => Expr::Sum(vec![lhs, rhs]),
        }
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(Box::new(self), Box::new(rhs))
    }
}
