//! Arena storage for the flat expression tree.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{BranchRange, Expr, ExprId, ExprRange, IfBranch, Name, ParamRange};

/// Convert a side-table length to `u32`.
///
/// # Panics
/// Panics if the arena grew past `u32::MAX` entries of one kind.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("expression arena: too many {what}"))
}

/// Contiguous storage for one program's expressions.
///
/// Child references are `ExprId` indices into `exprs`; lists live in flat
/// side tables and are addressed by ranges.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,
    /// Call arguments.
    expr_lists: Vec<ExprId>,
    /// `if` branches.
    branches: Vec<IfBranch>,
    /// Function parameter names.
    params: Vec<Name>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Expressions =====

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Lists =====

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "argument lists");
        self.expr_lists.extend(exprs);
        let len = to_u32(self.expr_lists.len(), "argument lists") - start;
        ExprRange::new(start, len)
    }

    #[inline]
    #[track_caller]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.to_range()]
    }

    pub fn alloc_branches(&mut self, branches: impl IntoIterator<Item = IfBranch>) -> BranchRange {
        let start = to_u32(self.branches.len(), "if branches");
        self.branches.extend(branches);
        let len = to_u32(self.branches.len(), "if branches") - start;
        BranchRange::new(start, len)
    }

    #[inline]
    #[track_caller]
    pub fn get_branches(&self, range: BranchRange) -> &[IfBranch] {
        &self.branches[range.to_range()]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Name>) -> ParamRange {
        let start = to_u32(self.params.len(), "parameters");
        self.params.extend(params);
        let len = to_u32(self.params.len(), "parameters") - start;
        ParamRange::new(start, len)
    }

    #[inline]
    #[track_caller]
    pub fn get_params(&self, range: ParamRange) -> &[Name] {
        &self.params[range.to_range()]
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("expr_lists", &self.expr_lists.len())
            .field("branches", &self.branches.len())
            .field("params", &self.params.len())
            .finish()
    }
}

/// Shared, immutable expression arena.
///
/// A function value keeps the arena its body lives in, so a function defined
/// by one program can still be called after a later program is evaluated
/// against the same runtime.
#[derive(Clone, Default)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether both handles point at the same arena.
    #[inline]
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &ExprArena {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedArena({:?})", &*self.0)
    }
}
