//! Wend evaluator.
//!
//! A tree-walking interpreter over the flat expression tree of `wend_ir`.
//!
//! # Architecture
//!
//! - `value`: the closed value set {number, string, function} with provenance
//! - `environment`: parent-linked scopes in an arena
//! - `context`: named frames owning one scope each, held by `Runtime`
//! - `operators` / `unary_operators`: the value-model operator rules
//! - `interpreter`: one evaluation rule per expression variant
//! - `diagnostics` / `report`: call stack, backtraces, rendered errors
//!
//! Errors are values: every rule returns `EvalResult` and propagates with
//! `?`. Nothing is recovered inside the evaluator.
//!
//! # Usage
//!
//! ```ignore
//! let interner = StringInterner::new();
//! let mut runtime = Runtime::new(&interner);
//! let root = runtime.root();
//! let arena = SharedArena::new(parsed_arena);
//! match wend_eval::run(&arena, program, &interner, &mut runtime, root) {
//!     Ok(Some(value)) => println!("{}", value.display(&interner)),
//!     Ok(None) => {}
//!     Err(err) => eprintln!("{}", ErrorReport::new(&err, &runtime, &interner)),
//! }
//! ```

mod context;
mod diagnostics;
mod environment;
mod errors;
mod interpreter;
mod operators;
mod report;
mod stack;
mod unary_operators;
mod value;

pub use context::{Context, ContextId, Runtime, RuntimeMark};
pub use diagnostics::{BacktraceFrame, CallStack, EvalBacktrace};
pub use environment::{Environment, ScopeId};
pub use errors::{
    division_by_zero, illegal_operation, missing_value, not_callable, recursion_limit_exceeded,
    undefined_variable, wrong_arg_count, EvalError, EvalErrorKind, EvalNote, EvalResult,
};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::evaluate_binary;
pub use report::ErrorReport;
pub use stack::StackGrowth;
pub use unary_operators::evaluate_unary;
pub use value::{FunctionValue, Number, Value, ValueDisplay, ValueKind};

use wend_ir::{ExprId, SharedArena, StringInterner};

/// Evaluate `root` of `arena` in `ctx` with default settings.
///
/// Bindings made at the top level stay in `runtime`, so a driver can feed
/// it one program after another, including after an error.
pub fn run(
    arena: &SharedArena,
    root: ExprId,
    interner: &StringInterner,
    runtime: &mut Runtime,
    ctx: ContextId,
) -> EvalResult {
    InterpreterBuilder::new(interner, arena, runtime)
        .build()
        .eval(root, ctx)
}

#[cfg(test)]
mod tests;
