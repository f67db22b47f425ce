//! Source provenance.
//!
//! A `Position` is a point in the source text; a `Span` is the half-open
//! region between two positions. Both are plain `Copy` data: tokens, nodes
//! and runtime values carry them, and nothing ever mutates one in place.

use std::fmt;

/// A point in the source text.
///
/// `offset` is a byte offset from the start of the file; `line` and `column`
/// are zero-based and only used for display.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The start of a file.
    pub const ZERO: Position = Position {
        offset: 0,
        line: 0,
        column: 0,
    };

    #[inline]
    pub const fn new(offset: u32, line: u32, column: u32) -> Self {
        Position {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.offset, self.line, self.column)
    }
}

impl fmt::Display for Position {
    /// One-based `line:column`, the way editors show it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            u64::from(self.line) + 1,
            u64::from(self.column) + 1
        )
    }
}

/// Source region, `start` inclusive and `end` exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Span for synthesized values that have no source text.
    pub const DUMMY: Span = Span {
        start: Position::ZERO,
        end: Position::ZERO,
    };

    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Span over a byte range of a single-line source.
    ///
    /// Line is zero and columns equal offsets. Convenient for one-line
    /// programs and tests; real parsers construct positions directly.
    #[inline]
    pub const fn from_range(start: u32, end: u32) -> Self {
        Span {
            start: Position::new(start, 0, start),
            end: Position::new(end, 0, end),
        }
    }

    /// Span from the start of `self` to the end of `other`.
    ///
    /// Used for operator diagnostics that cover both operands.
    #[inline]
    #[must_use]
    pub const fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    /// Length in bytes (zero for inverted spans).
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.offset, self.end.offset)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}
