//! Wend IR - provenance and syntax tree types.
//!
//! This crate holds the data the evaluator consumes but never mutates:
//! - `Position` / `Span` for source provenance
//! - `Name` and `StringInterner` for identifiers and string literals
//! - The flat expression tree (`ExprArena`, `ExprId`, `ExprKind`)
//! - `AstBuilder`, the construction API used by parsers and tests
//!
//! # Design
//!
//! - **Intern everything**: identifiers and string literals become `Name(u32)`.
//! - **Flatten everything**: children are `ExprId(u32)` indices into an arena,
//!   never `Box<Expr>`.
//! - Floats are stored as `u64` bits so every node is `Copy + Eq + Hash`.

mod arena;
pub mod ast;
mod builder;
mod expr_id;
mod interner;
mod name;
mod span;

pub use arena::{ExprArena, SharedArena};
pub use ast::{BinaryOp, Expr, ExprKind, IfBranch, UnaryOp};
pub use builder::AstBuilder;
pub use expr_id::{BranchRange, ExprId, ExprRange, ParamRange};
pub use interner::StringInterner;
pub use name::Name;
pub use span::{Position, Span};
