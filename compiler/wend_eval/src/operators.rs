//! Binary operator implementations.
//!
//! Direct dispatch on the operand variants. The value set is closed, so a
//! match is exhaustive where a trait per variant would not be. Any pairing
//! without a rule is an `IllegalOperation` rather than a crash.

use std::rc::Rc;

use wend_ir::{BinaryOp, Span};

use crate::context::ContextId;
use crate::errors::{division_by_zero, illegal_operation, EvalError};
use crate::value::{Number, Value, ValueKind};

/// Longest string, in bytes, that repetition may build (1 GiB).
const MAX_STRING_LEN: usize = 1 << 30;

/// Apply `op` to two evaluated operands.
///
/// The result spans both operands and carries the left operand's context.
/// Errors are positioned: division by zero at the divisor, everything else
/// across both operands, always in the left operand's context.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    let span = left.span.to(right.span);
    let kind = match (&left.kind, &right.kind) {
        (ValueKind::Number(a), ValueKind::Number(b)) => Some(
            eval_number_binary(*a, *b, op)
                .map_err(|err| positioned(err, right.span, left.context))?,
        ),
        (ValueKind::Str(a), ValueKind::Str(b)) => eval_string_binary(a, b, op),
        (ValueKind::Str(s), ValueKind::Number(n)) if op == BinaryOp::Mul => {
            Some(repeat_string(s, *n).map_err(|err| positioned(err, span, left.context))?)
        }
        _ => None,
    };

    match kind {
        Some(kind) => Ok(Value {
            kind,
            span,
            context: left.context,
        }),
        None => Err(positioned(
            illegal_operation(format!(
                "{} {} {}",
                left.type_name(),
                op.as_symbol(),
                right.type_name()
            )),
            span,
            left.context,
        )),
    }
}

fn positioned(mut err: EvalError, span: Span, context: Option<ContextId>) -> EvalError {
    err.span = Some(span);
    err.context = context;
    err
}

#[inline]
fn flag(b: bool) -> Number {
    Number::Int(i64::from(b))
}

/// Every operator is defined on two numbers.
fn eval_number_binary(a: Number, b: Number, op: BinaryOp) -> Result<ValueKind, EvalError> {
    use std::cmp::Ordering::{Equal, Greater, Less};

    let n = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a.checked_div(b).ok_or_else(division_by_zero)?,
        BinaryOp::Pow => a.checked_pow(b).ok_or_else(division_by_zero)?,
        BinaryOp::Eq => flag(a.num_eq(b)),
        BinaryOp::NotEq => flag(!a.num_eq(b)),
        BinaryOp::Lt => flag(a.num_cmp(b) == Some(Less)),
        BinaryOp::Gt => flag(a.num_cmp(b) == Some(Greater)),
        BinaryOp::LtEq => flag(matches!(a.num_cmp(b), Some(Less | Equal))),
        BinaryOp::GtEq => flag(matches!(a.num_cmp(b), Some(Greater | Equal))),
        // The selected operand's integer part, not a normalized 0/1.
        BinaryOp::And => Number::Int(if a.is_zero() { a } else { b }.truncate()),
        BinaryOp::Or => Number::Int(if a.is_zero() { b } else { a }.truncate()),
    };
    Ok(ValueKind::Number(n))
}

fn eval_string_binary(a: &Rc<str>, b: &Rc<str>, op: BinaryOp) -> Option<ValueKind> {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Some(ValueKind::Str(joined.into()))
        }
        // Yields the right operand unchanged.
        BinaryOp::Sub => Some(ValueKind::Str(Rc::clone(b))),
        _ => None,
    }
}

fn repeat_string(s: &str, count: Number) -> Result<ValueKind, EvalError> {
    let times = repeat_count(count)
        .ok_or_else(|| illegal_operation(format!("cannot repeat a string {count} times")))?;
    let too_large = || illegal_operation("string repetition is too large");
    let len = s
        .len()
        .checked_mul(times)
        .filter(|&len| len <= MAX_STRING_LEN)
        .ok_or_else(too_large)?;
    let mut out = String::new();
    out.try_reserve_exact(len).map_err(|_| too_large())?;
    for _ in 0..times {
        out.push_str(s);
    }
    Ok(ValueKind::Str(out.into()))
}

/// A repetition count: a non-negative integer-valued number.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the float is checked to be a non-negative whole number first"
)]
fn repeat_count(n: Number) -> Option<usize> {
    match n {
        Number::Int(i) => usize::try_from(i).ok(),
        Number::Float(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => Some(f as usize),
        Number::Float(_) => None,
    }
}
