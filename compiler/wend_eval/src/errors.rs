//! Runtime errors.
//!
//! Errors are ordinary values threaded through `Result` and `?`. Nothing in
//! the evaluator recovers from one: the first error aborts the enclosing
//! evaluation and travels back to the driver with its span and the context
//! it was raised in, which is all `Runtime::backtrace` needs.
//!
//! Factory functions are the public way to build errors; they fill in both
//! `kind` and `message`. Position is attached afterwards with `with_span` and
//! `in_context`.

use wend_ir::Span;

use crate::context::ContextId;
use crate::value::Value;

/// Result of evaluating one expression.
///
/// `Ok(None)` is the absence produced by forms such as loops, an `if`
/// without a matching branch, or a call whose body produced nothing.
pub type EvalResult = Result<Option<Value>, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Read of a variable bound in no enclosing scope.
    #[error("\"{name}\" is not defined")]
    NameError { name: String },

    /// Operator or call applied to operands that do not support it.
    #[error("illegal operation: {operation}")]
    IllegalOperation { operation: String },

    #[error("division by zero")]
    DivisionByZero,

    /// Call with the wrong number of arguments.
    #[error("{name} expects {expected} {}, got {got}", arg_word(.expected))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Call depth exceeded the configured limit.
    #[error("maximum recursion depth exceeded (limit: {depth})")]
    RecursionLimit { depth: usize },
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror passes fields by reference"
)]
fn arg_word(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl EvalErrorKind {
    /// Heading used by error reports.
    pub fn title(&self) -> &'static str {
        match self {
            Self::NameError { .. } => "Name Error",
            Self::IllegalOperation { .. } => "Illegal Operation",
            Self::DivisionByZero => "Runtime Error",
            Self::ArityMismatch { .. } => "Arity Error",
            Self::RecursionLimit { .. } => "Recursion Error",
        }
    }
}

/// Secondary information attached to an error, such as the call site of a
/// failed call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Source region the error points at.
    pub span: Option<Span>,
    /// Context the error was raised in; the start of the backtrace.
    pub context: Option<ContextId>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            context: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn in_context(mut self, context: ContextId) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Access

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NameError {
        name: name.to_string(),
    })
}

// Operators

#[cold]
pub fn illegal_operation(operation: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IllegalOperation {
        operation: operation.into(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

// Calls

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth: limit })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    illegal_operation(format!("{type_name} is not callable"))
}

#[cold]
pub fn missing_value() -> EvalError {
    illegal_operation("expression produced no value")
}
