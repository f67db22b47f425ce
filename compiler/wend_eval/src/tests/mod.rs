//! Whole-program tests.
//!
//! Programs are built with `AstBuilder` and evaluated statement by statement
//! against one `Runtime`, the way a REPL driver would.


use wend_ir::{AstBuilder, ExprId, SharedArena, Span, StringInterner};

use crate::{run, ContextId, EvalResult, InterpreterBuilder, Runtime, Value};

pub(crate) fn sp(start: u32, end: u32) -> Span {
    Span::from_range(start, end)
}

/// A finished arena plus the runtime it is evaluated against.
pub(crate) struct Session<'a> {
    pub interner: &'a StringInterner,
    pub arena: SharedArena,
    pub runtime: Runtime,
}

impl<'a> Session<'a> {
    pub fn new(interner: &'a StringInterner, builder: AstBuilder<'_>) -> Self {
        Session {
            interner,
            arena: SharedArena::new(builder.finish()),
            runtime: Runtime::new(interner),
        }
    }

    pub fn eval(&mut self, root: ExprId) -> EvalResult {
        run(
            &self.arena,
            root,
            self.interner,
            &mut self.runtime,
            ContextId::ROOT,
        )
    }

    /// Evaluate top-level statements in order; the last one's result.
    pub fn eval_all(&mut self, roots: &[ExprId]) -> EvalResult {
        let mut last = None;
        for &root in roots {
            last = self.eval(root)?;
        }
        Ok(last)
    }

    pub fn eval_limited(&mut self, root: ExprId, depth: usize) -> EvalResult {
        InterpreterBuilder::new(self.interner, &self.arena, &mut self.runtime)
            .max_call_depth(depth)
            .build()
            .eval(root, ContextId::ROOT)
    }

    /// A top-level binding.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.runtime
            .lookup(ContextId::ROOT, self.interner.intern(name))
    }
}
