//! Equation-oriented model blocks.
//!
//! A [`Block`] owns variables (value, fixed flag, bounds, units), named and
//! indexed constraints `lhs == rhs` over [`Expr`] trees, and ports exposing
//! stream terms. The block is what an external solver consumes; this crate
//! also provides the structural checks run before any solve (degrees of
//! freedom, units consistency) and a sequential evaluator for explicit
//! systems where every constraint defines one variable.

pub mod block;
pub mod constraint;
pub mod error;
pub mod expr;
pub mod port;
pub mod sequential;
pub mod statistics;
pub mod units_check;
pub mod variable;

pub use block::Block;
pub use constraint::Constraint;
pub use error::{ModelError, ModelResult};
pub use expr::Expr;
pub use port::Port;
pub use sequential::{SolveReport, solve_sequential};
pub use statistics::{degrees_of_freedom, number_of_fixed_variables, variables_in_active_constraints};
pub use units_check::assert_units_consistent;
pub use variable::Var;
