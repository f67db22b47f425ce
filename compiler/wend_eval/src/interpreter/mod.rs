//! Tree-walking interpreter.
//!
//! `eval` is structural recursion over `ExprKind`: one rule per variant, each
//! threading the current context and returning an `EvalResult`. Every
//! composite rule evaluates its children in source order and stops at the
//! first error.

mod builder;
mod control;
mod function_call;

use wend_ir::{ExprId, ExprKind, Name, SharedArena, Span, StringInterner};

use crate::context::{ContextId, Runtime};
use crate::diagnostics::CallStack;
use crate::errors::{illegal_operation, missing_value, undefined_variable, EvalError, EvalResult};
use crate::operators::evaluate_binary;
use crate::stack::StackGrowth;
use crate::unary_operators::evaluate_unary;
use crate::value::{FunctionValue, Number, Value};

pub use builder::InterpreterBuilder;

/// Evaluates expressions against a borrowed `Runtime`.
pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    /// Arena of the code currently executing; swapped for the callee's
    /// arena for the duration of a call.
    pub(crate) arena: SharedArena,
    pub(crate) runtime: &'a mut Runtime,
    pub(crate) call_stack: CallStack,
    pub(crate) stack: StackGrowth,
    /// Pre-interned display name for anonymous function frames.
    pub(crate) anonymous_name: Name,
}

impl Interpreter<'_> {
    /// Evaluate `expr` in `ctx`.
    pub fn eval(&mut self, expr: ExprId, ctx: ContextId) -> EvalResult {
        let growth = self.stack;
        growth.run(|| self.eval_inner(expr, ctx))
    }

    /// Evaluate `expr` where a value is required.
    ///
    /// An expression that produced nothing is an illegal operation at its
    /// own span.
    pub(crate) fn eval_value(&mut self, expr: ExprId, ctx: ContextId) -> Result<Value, EvalError> {
        match self.eval(expr, ctx)? {
            Some(value) => Ok(value),
            None => Err(missing_value()
                .with_span(self.span_of(expr))
                .in_context(ctx)),
        }
    }

    #[inline]
    pub(crate) fn span_of(&self, expr: ExprId) -> Span {
        self.arena.get_expr(expr).span
    }

    pub fn interner(&self) -> &StringInterner {
        self.interner
    }

    pub fn runtime(&self) -> &Runtime {
        &*self.runtime
    }

    /// Number of calls currently executing.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    fn eval_inner(&mut self, id: ExprId, ctx: ContextId) -> EvalResult {
        let expr = *self.arena.get_expr(id);
        let span = expr.span;
        match expr.kind {
            // Literals
            ExprKind::Int(n) => Ok(Some(Value::int(n).stamped(span, ctx))),
            ExprKind::Float(bits) => Ok(Some(Value::float(f64::from_bits(bits)).stamped(span, ctx))),
            ExprKind::Str(name) => Ok(Some(
                Value::string(self.interner.lookup(name)).stamped(span, ctx),
            )),

            // Variables
            ExprKind::Ident(name) => match self.runtime.lookup(ctx, name) {
                Some(value) => Ok(Some(value.clone().stamped(span, ctx))),
                None => Err(undefined_variable(self.interner.lookup(name))
                    .with_span(span)
                    .in_context(ctx)),
            },
            ExprKind::Assign { name, value } => {
                let value = self.eval_value(value, ctx)?;
                self.runtime.define(ctx, name, value.clone());
                Ok(Some(value))
            }

            // Operators
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_value(left, ctx)?;
                let right = self.eval_value(right, ctx)?;
                let result = evaluate_binary(&left, &right, op)?;
                Ok(Some(result.with_span(span)))
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_value(operand, ctx)?;
                let result = evaluate_unary(&operand, op)
                    .map_err(|err| err.with_span(span).in_context(ctx))?;
                Ok(Some(result.stamped(span, ctx)))
            }

            // Control flow
            ExprKind::If {
                branches,
                else_branch,
            } => self.eval_if(branches, else_branch, ctx),
            ExprKind::For {
                var,
                start,
                end,
                step,
                body,
            } => self.eval_for(var, start, end, step, body, span, ctx),
            ExprKind::While { cond, body } => self.eval_while(cond, body, ctx),

            // Functions
            ExprKind::FunctionDef { name, params, body } => {
                let function = FunctionValue {
                    name,
                    params,
                    body,
                    arena: self.arena.clone(),
                    defining: ctx,
                    def_span: span,
                };
                self.runtime.pin(ctx);
                let value = Value::function(function).stamped(span, ctx);
                if let Some(name) = name {
                    self.runtime.define(ctx, name, value.clone());
                }
                Ok(Some(value))
            }
            ExprKind::Call { func, args } => {
                let callee = self.eval_value(func, ctx)?.stamped(span, ctx);
                let arena = self.arena.clone();
                let arg_ids = arena.get_expr_list(args);
                let mut arg_values = Vec::with_capacity(arg_ids.len());
                for &arg in arg_ids {
                    arg_values.push(self.eval_value(arg, ctx)?);
                }
                self.eval_call(&callee, arg_values, span, ctx)
            }
        }
    }

    /// Require a number, for loop bounds.
    pub(crate) fn eval_number(
        &mut self,
        expr: ExprId,
        ctx: ContextId,
        role: &str,
    ) -> Result<Number, EvalError> {
        let value = self.eval_value(expr, ctx)?;
        value.as_number().ok_or_else(|| {
            illegal_operation(format!(
                "loop {role} must be a number, not a {}",
                value.type_name()
            ))
            .with_span(value.span)
            .in_context(ctx)
        })
    }
}

#[cfg(test)]
mod tests;
