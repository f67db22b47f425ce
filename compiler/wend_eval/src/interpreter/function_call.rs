//! Function call evaluation.

use std::mem;

use wend_ir::Span;

use super::Interpreter;
use crate::context::ContextId;
use crate::errors::{not_callable, wrong_arg_count, EvalNote, EvalResult};
use crate::value::{FunctionValue, Value};

impl Interpreter<'_> {
    /// Invoke `callee` with already-evaluated arguments.
    pub(super) fn eval_call(
        &mut self,
        callee: &Value,
        args: Vec<Value>,
        call_span: Span,
        caller: ContextId,
    ) -> EvalResult {
        match callee.as_function() {
            Some(f) => self.call_function(f, args, call_span, caller),
            None => Err(not_callable(callee.type_name())
                .with_span(callee.span)
                .in_context(caller)),
        }
    }

    /// Run a function body in a fresh context.
    ///
    /// The arity check happens before anything else, so a mismatched call
    /// never enters the body. Contexts the call allocated are reclaimed when
    /// it returns successfully.
    #[tracing::instrument(level = "debug", skip_all)]
    fn call_function(
        &mut self,
        f: &FunctionValue,
        args: Vec<Value>,
        call_span: Span,
        caller: ContextId,
    ) -> EvalResult {
        let name = f.name.unwrap_or(self.anonymous_name);
        let params = f.param_names();
        if args.len() != params.len() {
            tracing::debug!(
                function = self.interner.lookup(name),
                expected = params.len(),
                got = args.len(),
                "arity mismatch"
            );
            return Err(
                wrong_arg_count(self.interner.lookup(name), params.len(), args.len())
                    .with_span(f.def_span)
                    .in_context(caller)
                    .with_note(EvalNote::with_span("called here", call_span)),
            );
        }

        self.call_stack
            .push()
            .map_err(|err| err.with_span(call_span).in_context(caller))?;

        let mark = self.runtime.mark();
        let call_ctx = self
            .runtime
            .new_child(name, Some(caller), Some(call_span), f.defining);
        for (&param, arg) in params.iter().zip(args) {
            self.runtime.define(call_ctx, param, arg.with_context(call_ctx));
        }

        let caller_arena = mem::replace(&mut self.arena, f.arena.clone());
        let result = self.eval(f.body, call_ctx);
        self.arena = caller_arena;
        self.call_stack.pop();

        let value = result?;
        self.runtime.release(mark);
        Ok(value.map(|v| v.stamped(call_span, caller)))
    }
}
