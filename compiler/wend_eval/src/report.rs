//! Human-readable error reports.
//!
//! ```text
//! Traceback (most recent call last):
//!   File main.wd, line 4, in <program>
//!   File main.wd, line 2, in half
//! Runtime Error: division by zero
//!
//! object y = x / 0
//!                ^
//! ```

use std::fmt;

use wend_ir::{Span, StringInterner};

use crate::context::Runtime;
use crate::diagnostics::EvalBacktrace;
use crate::errors::EvalError;

/// File name shown when no source was attached.
const UNKNOWN_FILE: &str = "<input>";

/// An error with its backtrace, ready to display.
///
/// The backtrace is captured from the runtime when the report is created,
/// so the report stays valid after the runtime moves on.
pub struct ErrorReport<'a> {
    error: &'a EvalError,
    backtrace: EvalBacktrace,
    interner: &'a StringInterner,
    file_name: &'a str,
    source: Option<&'a str>,
}

impl<'a> ErrorReport<'a> {
    pub fn new(error: &'a EvalError, runtime: &Runtime, interner: &'a StringInterner) -> Self {
        Self {
            error,
            backtrace: runtime.backtrace(error),
            interner,
            file_name: UNKNOWN_FILE,
            source: None,
        }
    }

    /// Attach the program text, enabling the underlined excerpt.
    #[must_use]
    pub fn with_source(mut self, file_name: &'a str, source: &'a str) -> Self {
        self.file_name = file_name;
        self.source = Some(source);
        self
    }

    pub fn backtrace(&self) -> &EvalBacktrace {
        &self.backtrace
    }
}

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceback (most recent call last):")?;
        for frame in self.backtrace.frames() {
            let name = self.interner.lookup(frame.name);
            match frame.span {
                Some(span) => writeln!(
                    f,
                    "  File {}, line {}, in {name}",
                    self.file_name,
                    u64::from(span.start.line) + 1
                )?,
                None => writeln!(f, "  File {}, in {name}", self.file_name)?,
            }
        }
        write!(f, "{}: {}", self.error.kind.title(), self.error.message)?;
        for note in &self.error.notes {
            match note.span {
                Some(span) => write!(f, "\nnote: {} at {span}", note.message)?,
                None => write!(f, "\nnote: {}", note.message)?,
            }
        }
        if let (Some(source), Some(span)) = (self.source, self.error.span) {
            let excerpt = underline(source, span);
            if !excerpt.is_empty() {
                write!(f, "\n\n{excerpt}")?;
            }
        }
        Ok(())
    }
}

/// The source lines covered by `span`, each followed by a `^` marker line.
fn underline(source: &str, span: Span) -> String {
    let first = span.start.line as usize;
    let last = span.end.line.max(span.start.line) as usize;
    let mut out = String::new();
    for (line_no, line) in source.lines().enumerate().skip(first).take(last - first + 1) {
        let start = if line_no == first {
            span.start.column as usize
        } else {
            0
        };
        let end = if line_no == last {
            span.end.column as usize
        } else {
            line.chars().count()
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
        out.push('\n');
        out.push_str(&" ".repeat(start));
        out.push_str(&"^".repeat(end.saturating_sub(start).max(1)));
    }
    out
}
