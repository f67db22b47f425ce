//! Native stack growth for deep evaluation.
//!
//! Each nested expression costs one `eval` frame and each Wend call several,
//! so a recursive program outruns the thread's stack long before it runs out
//! of memory. `Interpreter::eval` routes every step through a `StackGrowth`,
//! which switches to a fresh heap-allocated segment once the current one
//! runs low.

/// How the interpreter grows the native stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StackGrowth {
    /// Bytes that must remain on the current segment before `run` grows it.
    pub red_zone: usize,
    /// Size in bytes of each freshly allocated segment.
    pub segment: usize,
}

impl StackGrowth {
    /// 128 KiB red zone, 1 MiB segments.
    pub const DEFAULT: Self = Self {
        red_zone: 128 * 1024,
        segment: 1024 * 1024,
    };

    /// Run `f`, first moving to a new segment if fewer than `red_zone`
    /// bytes remain.
    #[inline]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        stacker::maybe_grow(self.red_zone, self.segment, f)
    }

    /// The wasm32 stack is owned by the engine and cannot be switched.
    #[inline]
    #[cfg(target_arch = "wasm32")]
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

impl Default for StackGrowth {
    fn default() -> Self {
        Self::DEFAULT
    }
}
