//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, UnaryOp};
use crate::{BranchRange, ExprId, ExprRange, Name, ParamRange, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Expression variants.
///
/// All children are arena indices, so the whole enum is `Copy`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal: `42`
    Int(i64),
    /// Float literal stored as bits: `3.5`
    Float(u64),
    /// String literal, interned: `"hi"`
    Str(Name),

    /// Variable read: `x`
    Ident(Name),

    /// Variable binding: `object x = value`
    Assign { name: Name, value: ExprId },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    Unary { op: UnaryOp, operand: ExprId },

    /// `if c1 then b1 alsoif c2 then b2 otherwise e`
    ///
    /// Branches are tried in order; `else_branch` (the `otherwise` arm) runs when
    /// none matches.
    If {
        branches: BranchRange,
        else_branch: Option<ExprId>,
    },

    /// `walk var = start through end step s then body`
    For {
        var: Name,
        start: ExprId,
        end: ExprId,
        step: Option<ExprId>,
        body: ExprId,
    },

    /// `while cond then body`
    While { cond: ExprId, body: ExprId },

    /// `func name(params) -> body`; anonymous when `name` is `None`.
    FunctionDef {
        name: Option<Name>,
        params: ParamRange,
        body: ExprId,
    },

    /// `callee(args)`
    Call { func: ExprId, args: ExprRange },
}

impl ExprKind {
    /// Float literal value.
    #[inline]
    pub fn float(value: f64) -> Self {
        ExprKind::Float(value.to_bits())
    }
}

/// One `condition then body` arm of an `if` or `alsoif`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IfBranch {
    pub cond: ExprId,
    pub body: ExprId,
}
