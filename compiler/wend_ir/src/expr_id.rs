//! Expression IDs and arena ranges.
//!
//! Children are referenced by `ExprId(u32)` instead of `Box<Expr>`; lists
//! (call arguments, parameters, `if` branches) are `(start, len)` windows
//! into flat side tables of the arena.

use std::fmt;

/// Index into an `ExprArena`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Defines a `(start, len)` range type over one of the arena's side tables.
macro_rules! define_range {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// The range as `usize` bounds for slicing.
            #[inline]
            pub const fn to_range(self) -> ::std::ops::Range<usize> {
                self.start as usize..(self.start as usize + self.len as usize)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let range = self.to_range();
                write!(f, "{}({}..{})", stringify!($name), range.start, range.end)
            }
        }
    )* };
}

define_range!(
    /// Call arguments.
    ExprRange,
    /// Function parameter names.
    ParamRange,
    /// `(condition, body)` pairs of an `if`.
    BranchRange,
);
