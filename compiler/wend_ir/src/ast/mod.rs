//! Flat expression tree.
//!
//! Wend has no statement/expression split: assignments, loops and function
//! definitions are expressions that may produce no value.

mod expr;
mod operators;

pub use expr::{Expr, ExprKind, IfBranch};
pub use operators::{BinaryOp, UnaryOp};
