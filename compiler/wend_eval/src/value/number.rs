//! Numeric values.
//!
//! Integers stay integral while results fit in `i64`; an overflowing result
//! is computed in floating point instead of trapping. Division is always
//! true division.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A Wend number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[allow(
        clippy::cast_precision_loss,
        reason = "mixed arithmetic is defined in f64"
    )]
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        match self {
            Number::Int(n) => n < 0,
            Number::Float(f) => f < 0.0,
        }
    }

    /// True division; `None` when `other` is zero.
    pub fn checked_div(self, other: Number) -> Option<Number> {
        if other.is_zero() {
            return None;
        }
        Some(Number::Float(self.as_f64() / other.as_f64()))
    }

    /// Exponentiation; `None` when zero is raised to a negative power.
    ///
    /// A non-negative integer power of an integer stays integral; a negative
    /// one yields a float.
    pub fn checked_pow(self, other: Number) -> Option<Number> {
        if self.is_zero() && other.is_negative() {
            return None;
        }
        let result = match (self, other) {
            (Number::Int(base), Number::Int(exp)) if exp >= 0 => u32::try_from(exp)
                .ok()
                .and_then(|exp| base.checked_pow(exp))
                .map_or_else(
                    || Number::Float(self.as_f64().powf(other.as_f64())),
                    Number::Int,
                ),
            _ => Number::Float(self.as_f64().powf(other.as_f64())),
        };
        Some(result)
    }

    /// Numeric equality across representations: `1 == 1.0`.
    ///
    /// Exact: `2^53 + 1` is not equal to `2^53` as a float.
    #[allow(clippy::float_cmp, reason = "exact numeric equality is the semantics")]
    pub fn num_eq(self, other: Number) -> bool {
        match (self, other) {
            (Number::Float(a), Number::Float(b)) => a == b,
            _ => self.num_cmp(other) == Some(Ordering::Equal),
        }
    }

    /// Exact numeric ordering; `None` when either side is NaN.
    pub fn num_cmp(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
            (Number::Int(a), Number::Float(b)) => cmp_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => cmp_int_float(b, a).map(Ordering::reverse),
        }
    }

    /// Integer part, saturating at the `i64` bounds. NaN truncates to zero.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "saturating float-to-int truncation is the intent"
    )]
    pub fn truncate(self) -> i64 {
        match self {
            Number::Int(n) => n,
            Number::Float(f) => f.trunc() as i64,
        }
    }
}

/// Compare an integer with a float without rounding the integer.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the float is integral and inside the i64 range"
)]
fn cmp_int_float(i: i64, f: f64) -> Option<Ordering> {
    /// 2^63, the first float above every `i64`.
    const I64_END: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return None;
    }
    if f >= I64_END {
        return Some(Ordering::Less);
    }
    if f < -I64_END {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    let ordering = i.cmp(&(whole as i64));
    if ordering != Ordering::Equal {
        return Some(ordering);
    }
    // Same integer part; the fraction decides.
    Some(if f > whole {
        Ordering::Less
    } else if f < whole {
        Ordering::Greater
    } else {
        Ordering::Equal
    })
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            // Debug keeps the trailing `.0` on integral floats.
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Integer-preserving arithmetic with float fallback on overflow.
macro_rules! impl_arith {
    ($trait:ident, $method:ident, $checked:ident, $op:tt) => {
        impl $trait for Number {
            type Output = Number;

            fn $method(self, other: Number) -> Number {
                match (self, other) {
                    (Number::Int(a), Number::Int(b)) => a.$checked(b).map_or_else(
                        || Number::Float(self.as_f64() $op other.as_f64()),
                        Number::Int,
                    ),
                    _ => Number::Float(self.as_f64() $op other.as_f64()),
                }
            }
        }
    };
}

impl_arith!(Add, add, checked_add, +);
impl_arith!(Sub, sub, checked_sub, -);
impl_arith!(Mul, mul, checked_mul, *);
