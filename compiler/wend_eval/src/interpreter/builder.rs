//! `InterpreterBuilder` for configuring an `Interpreter`.

use wend_ir::{SharedArena, StringInterner};

use super::Interpreter;
use crate::context::Runtime;
use crate::diagnostics::CallStack;
use crate::stack::StackGrowth;

/// Builder for `Interpreter`.
///
/// The call depth is unlimited by default: the native stack grows on
/// demand, so only memory bounds recursion. Hosts that evaluate untrusted
/// programs should set `max_call_depth`.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    arena: &'a SharedArena,
    runtime: &'a mut Runtime,
    max_call_depth: Option<usize>,
    stack: StackGrowth,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(
        interner: &'a StringInterner,
        arena: &'a SharedArena,
        runtime: &'a mut Runtime,
    ) -> Self {
        Self {
            interner,
            arena,
            runtime,
            max_call_depth: None,
            stack: StackGrowth::DEFAULT,
        }
    }

    /// Fail calls nested deeper than `depth` with a recursion error.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Override the red zone and segment size used to grow the native
    /// stack during evaluation.
    #[must_use]
    pub fn stack_growth(mut self, stack: StackGrowth) -> Self {
        self.stack = stack;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            interner: self.interner,
            arena: self.arena.clone(),
            runtime: self.runtime,
            call_stack: CallStack::new(self.max_call_depth),
            stack: self.stack,
            anonymous_name: self.interner.intern("<anonymous>"),
        }
    }
}
