//! Conditionals and loops.

use wend_ir::{BranchRange, ExprId, Name, Span};

use super::Interpreter;
use crate::context::ContextId;
use crate::errors::EvalResult;
use crate::value::{Number, Value};

impl Interpreter<'_> {
    /// First branch whose condition is truthy; else the `else` branch;
    /// else nothing. Bodies of unselected branches are never evaluated.
    pub(super) fn eval_if(
        &mut self,
        branches: BranchRange,
        else_branch: Option<ExprId>,
        ctx: ContextId,
    ) -> EvalResult {
        let arena = self.arena.clone();
        for branch in arena.get_branches(branches) {
            if self.eval_value(branch.cond, ctx)?.is_truthy() {
                return self.eval(branch.body, ctx);
            }
        }
        match else_branch {
            Some(body) => self.eval(body, ctx),
            None => Ok(None),
        }
    }

    /// Counting loop over `start..end` by `step` (default 1).
    ///
    /// A non-negative step runs while `counter < end`, a negative one while
    /// `counter > end`. A zero step whose condition holds never terminates.
    #[allow(clippy::too_many_arguments, reason = "mirrors the For node's fields")]
    pub(super) fn eval_for(
        &mut self,
        var: Name,
        start: ExprId,
        end: ExprId,
        step: Option<ExprId>,
        body: ExprId,
        span: Span,
        ctx: ContextId,
    ) -> EvalResult {
        let mut counter = self.eval_number(start, ctx, "start")?;
        let end = self.eval_number(end, ctx, "end")?;
        let step = match step {
            Some(step) => self.eval_number(step, ctx, "step")?,
            None => Number::Int(1),
        };

        let ascending = !step.is_negative();
        let target = if ascending {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        };
        while counter.num_cmp(end) == Some(target) {
            self.runtime
                .define(ctx, var, Value::number(counter).stamped(span, ctx));
            self.eval(body, ctx)?;
            counter = counter + step;
        }
        Ok(None)
    }

    /// Re-test `cond` before every iteration; no iteration cap.
    pub(super) fn eval_while(&mut self, cond: ExprId, body: ExprId, ctx: ContextId) -> EvalResult {
        while self.eval_value(cond, ctx)?.is_truthy() {
            self.eval(body, ctx)?;
        }
        Ok(None)
    }
}
