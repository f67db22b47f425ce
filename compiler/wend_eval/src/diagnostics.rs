//! Call tracking and backtraces.
//!
//! - `CallStack`: depth of live calls, with the optional depth limit
//! - `EvalBacktrace`: the frame chain of a failure, rebuilt from the
//!   runtime's contexts by `Runtime::backtrace`
//!
//! Frame names and call sites live on the contexts themselves, so the live
//! stack only needs to count.

use wend_ir::{Name, Span};

use crate::errors::{recursion_limit_exceeded, EvalError};

/// Live call depth of one interpreter.
///
/// Push on call, pop on return. The depth check is part of `push`.
#[derive(Clone, Debug)]
pub struct CallStack {
    depth: usize,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Enter a call unless that would exceed the depth limit.
    pub fn push(&mut self) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.depth >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(self.depth > 0, "CallStack::pop() called on empty stack");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }
}

/// One frame of a backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Context display name.
    pub name: Name,
    /// Position inside this frame: the failure site for the innermost frame,
    /// the outgoing call for the others.
    pub span: Option<Span>,
}

/// Frames of a failed evaluation, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
