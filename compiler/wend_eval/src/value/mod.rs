//! Runtime values.
//!
//! A `Value` is its content (`ValueKind`) plus provenance: the span it was
//! produced at and the context that produced it. Content never changes once
//! built. Provenance is rewritten every time a value is used somewhere new
//! (read from a variable, passed as an argument, returned from a call), so
//! diagnostics point at the use site. `Value` is cheap to clone, and a clone
//! is the independent copy that gets re-stamped; the stored original is
//! never touched.

mod number;

use std::fmt;
use std::rc::Rc;

use wend_ir::{ExprId, Name, ParamRange, SharedArena, Span, StringInterner};

use crate::context::ContextId;

pub use number::Number;

/// A user-defined function: parameters, a body, and the context it closes
/// over.
///
/// The closure holds the *index* of its defining context, not a copy of that
/// context's bindings, so it sees later mutations of its defining scope.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    /// `None` for anonymous functions.
    pub name: Option<Name>,
    pub params: ParamRange,
    pub body: ExprId,
    /// Arena holding `params` and `body`.
    pub arena: SharedArena,
    /// Context active when the function was defined.
    pub defining: ContextId,
    /// Span of the definition, kept apart from the value's own provenance
    /// span so arity errors can point at it after the value moved.
    pub def_span: Span,
}

impl FunctionValue {
    /// Parameter names, in declaration order.
    pub fn param_names(&self) -> &[Name] {
        self.arena.get_params(self.params)
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.params == other.params
            && self.body == other.body
            && self.defining == other.defining
            && self.def_span == other.def_span
            && self.arena.ptr_eq(&other.arena)
    }
}

/// Value content.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueKind {
    Number(Number),
    Str(Rc<str>),
    Function(FunctionValue),
}

/// A runtime value with provenance.
#[derive(Clone, Debug)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Span,
    pub context: Option<ContextId>,
}

impl Value {
    /// Unpositioned value; stamp it before it escapes.
    pub fn new(kind: ValueKind) -> Self {
        Value {
            kind,
            span: Span::DUMMY,
            context: None,
        }
    }

    pub fn number(n: Number) -> Self {
        Self::new(ValueKind::Number(n))
    }

    pub fn int(n: i64) -> Self {
        Self::number(Number::Int(n))
    }

    pub fn float(f: f64) -> Self {
        Self::number(Number::Float(f))
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Self::new(ValueKind::Str(s.into()))
    }

    pub fn function(f: FunctionValue) -> Self {
        Self::new(ValueKind::Function(f))
    }

    #[inline]
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_context(mut self, context: ContextId) -> Self {
        self.context = Some(context);
        self
    }

    /// Rebind both provenance fields.
    #[inline]
    #[must_use]
    pub fn stamped(self, span: Span, context: ContextId) -> Self {
        self.with_span(span).with_context(context)
    }

    /// Non-zero numbers and non-empty strings are truthy; functions never are.
    pub fn is_truthy(&self) -> bool {
        match &self.kind {
            ValueKind::Number(n) => !n.is_zero(),
            ValueKind::Str(s) => !s.is_empty(),
            ValueKind::Function(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self.kind {
            ValueKind::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionValue> {
        match &self.kind {
            ValueKind::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Name of the value's variant, for messages.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            ValueKind::Number(_) => "number",
            ValueKind::Str(_) => "string",
            ValueKind::Function(_) => "function",
        }
    }

    /// Display form: numbers and strings as written, functions as
    /// `<function name>`.
    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> ValueDisplay<'a> {
        ValueDisplay {
            value: self,
            interner,
        }
    }
}

/// Content equality; provenance is ignored.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Formatter returned by `Value::display`.
pub struct ValueDisplay<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value.kind {
            ValueKind::Number(n) => write!(f, "{n}"),
            ValueKind::Str(s) => write!(f, "{s}"),
            ValueKind::Function(func) => {
                let name = func
                    .name
                    .map_or("<anonymous>", |name| self.interner.lookup(name));
                write!(f, "<function {name}>")
            }
        }
    }
}
