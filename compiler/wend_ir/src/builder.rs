//! Programmatic construction of expression arenas.
//!
//! Parsers drive this API while reducing; tests use it in place of source
//! text. Every node takes its span explicitly except `binary`, whose span is
//! always the union of its operands.

use crate::{
    BinaryOp, Expr, ExprArena, ExprId, ExprKind, IfBranch, Name, Span, StringInterner, UnaryOp,
};

/// Builds an `ExprArena` node by node, children first.
pub struct AstBuilder<'a> {
    arena: ExprArena,
    interner: &'a StringInterner,
}

impl<'a> AstBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        AstBuilder {
            arena: ExprArena::new(),
            interner,
        }
    }

    #[inline]
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    pub fn int(&mut self, value: i64, span: Span) -> ExprId {
        self.alloc(ExprKind::Int(value), span)
    }

    pub fn float(&mut self, value: f64, span: Span) -> ExprId {
        self.alloc(ExprKind::float(value), span)
    }

    pub fn string(&mut self, value: &str, span: Span) -> ExprId {
        let name = self.name(value);
        self.alloc(ExprKind::Str(name), span)
    }

    pub fn ident(&mut self, name: &str, span: Span) -> ExprId {
        let name = self.name(name);
        self.alloc(ExprKind::Ident(name), span)
    }

    pub fn assign(&mut self, name: &str, value: ExprId, span: Span) -> ExprId {
        let name = self.name(name);
        self.alloc(ExprKind::Assign { name, value }, span)
    }

    /// Binary node spanning from the start of `left` to the end of `right`.
    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).to(self.span_of(right));
        self.alloc(ExprKind::Binary { op, left, right }, span)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId, span: Span) -> ExprId {
        self.alloc(ExprKind::Unary { op, operand }, span)
    }

    /// `if` with `(condition, body)` branches tried in order.
    pub fn if_(
        &mut self,
        branches: impl IntoIterator<Item = (ExprId, ExprId)>,
        else_branch: Option<ExprId>,
        span: Span,
    ) -> ExprId {
        let branches = self
            .arena
            .alloc_branches(branches.into_iter().map(|(cond, body)| IfBranch { cond, body }));
        self.alloc(
            ExprKind::If {
                branches,
                else_branch,
            },
            span,
        )
    }

    pub fn for_(
        &mut self,
        var: &str,
        start: ExprId,
        end: ExprId,
        step: Option<ExprId>,
        body: ExprId,
        span: Span,
    ) -> ExprId {
        let var = self.name(var);
        self.alloc(
            ExprKind::For {
                var,
                start,
                end,
                step,
                body,
            },
            span,
        )
    }

    pub fn while_(&mut self, cond: ExprId, body: ExprId, span: Span) -> ExprId {
        self.alloc(ExprKind::While { cond, body }, span)
    }

    /// Function definition; `name: None` builds an anonymous function.
    pub fn func(&mut self, name: Option<&str>, params: &[&str], body: ExprId, span: Span) -> ExprId {
        let name = name.map(|n| self.name(n));
        let interner = self.interner;
        let params = self
            .arena
            .alloc_params(params.iter().map(|p| interner.intern(p)));
        self.alloc(ExprKind::FunctionDef { name, params, body }, span)
    }

    pub fn call(&mut self, func: ExprId, args: &[ExprId], span: Span) -> ExprId {
        let args = self.arena.alloc_expr_list(args.iter().copied());
        self.alloc(ExprKind::Call { func, args }, span)
    }

    pub fn finish(self) -> ExprArena {
        self.arena
    }
}
