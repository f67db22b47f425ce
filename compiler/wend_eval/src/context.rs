//! Execution contexts and the runtime that owns them.
//!
//! A `Context` is a named frame: the program itself, or one function call.
//! It owns exactly one scope and links to the context that created it, along
//! with the span it was entered from. That chain is the backtrace.
//!
//! Two parent links exist and they differ on purpose. A context's `parent`
//! is its *caller*; its scope's parent is the scope of the context the
//! function was *defined* in.
//!
//! # Reclamation
//!
//! Contexts and scopes are arena slots. The interpreter takes a `mark`
//! before a call and `release`s it after the call returns successfully,
//! dropping every context the call created. A function definition `pin`s the
//! context it captures; release never drops a pinned context or anything
//! below it. Errors never release, so a failed evaluation can always be
//! traced.

use std::fmt;

use wend_ir::{Name, Span, StringInterner};

use crate::diagnostics::{BacktraceFrame, EvalBacktrace};
use crate::environment::{Environment, ScopeId};
use crate::errors::EvalError;
use crate::value::Value;

/// Index of a context in a `Runtime`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ContextId(u32);

impl ContextId {
    /// The program-level context every runtime starts with.
    pub const ROOT: ContextId = ContextId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextId({})", self.0)
    }
}

/// A named frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    /// Display name: `<program>`, a function name, or `<anonymous>`.
    pub name: Name,
    /// The context this one was entered from.
    pub parent: Option<ContextId>,
    /// Where in `parent` this context was entered (the call span).
    pub entry_span: Option<Span>,
    pub scope: ScopeId,
}

/// Arena position returned by `Runtime::mark`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RuntimeMark(usize);

/// Owner of every context and scope of one evaluation session.
///
/// Drivers create one per session and may evaluate any number of programs
/// against it; bindings made at the top level persist between them.
pub struct Runtime {
    contexts: Vec<Context>,
    env: Environment,
    /// Contexts below this index are never reclaimed.
    pinned: usize,
}

impl Runtime {
    /// Create a runtime with a root `<program>` context.
    pub fn new(interner: &StringInterner) -> Self {
        let mut env = Environment::new();
        let scope = env.push_scope(None);
        Runtime {
            contexts: vec![Context {
                name: interner.intern("<program>"),
                parent: None,
                entry_span: None,
                scope,
            }],
            env,
            pinned: 1,
        }
    }

    #[inline]
    pub fn root(&self) -> ContextId {
        ContextId::ROOT
    }

    /// # Panics
    /// Panics if `id` was reclaimed or belongs to another runtime.
    #[inline]
    #[track_caller]
    pub fn context(&self, id: ContextId) -> &Context {
        &self.contexts[id.index()]
    }

    /// Number of live contexts.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Enter a new context.
    ///
    /// `parent` and `entry_span` record where it was entered from; its scope
    /// resolves free names through the scope of `defining`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` contexts are alive.
    pub fn new_child(
        &mut self,
        name: Name,
        parent: Option<ContextId>,
        entry_span: Option<Span>,
        defining: ContextId,
    ) -> ContextId {
        let scope = self.env.push_scope(Some(self.context(defining).scope));
        let id = u32::try_from(self.contexts.len())
            .unwrap_or_else(|_| panic!("runtime exceeded u32::MAX contexts"));
        self.contexts.push(Context {
            name,
            parent,
            entry_span,
            scope,
        });
        tracing::trace!(context = id, ?parent, ?defining, "enter context");
        ContextId(id)
    }

    pub fn lookup(&self, ctx: ContextId, name: Name) -> Option<&Value> {
        self.env.lookup(self.context(ctx).scope, name)
    }

    pub fn define(&mut self, ctx: ContextId, name: Name, value: Value) {
        let scope = self.context(ctx).scope;
        self.env.define(scope, name, value);
    }

    /// Current arena position, for a later `release`.
    pub fn mark(&self) -> RuntimeMark {
        RuntimeMark(self.contexts.len())
    }

    /// Keep `ctx` (and everything allocated before it) alive for good.
    pub fn pin(&mut self, ctx: ContextId) {
        self.pinned = self.pinned.max(ctx.index() + 1);
    }

    /// Reclaim the contexts and scopes allocated since `mark`, except those
    /// at or below the highest pinned context.
    pub fn release(&mut self, mark: RuntimeMark) {
        let keep = mark.0.max(self.pinned);
        if keep >= self.contexts.len() {
            return;
        }
        // Scopes are allocated in step with contexts, so the last kept
        // context's scope bounds the kept scopes.
        let scopes = self.contexts[keep - 1].scope.index() + 1;
        tracing::trace!(
            reclaimed = self.contexts.len() - keep,
            live = keep,
            "release contexts"
        );
        self.contexts.truncate(keep);
        self.env.truncate(scopes);
    }

    /// Frames from the program down to the failure site, most recent last.
    ///
    /// The innermost frame is positioned at the error's span; each outer
    /// frame at the call span its callee was entered from. An error without
    /// a context is traced from the root.
    pub fn backtrace(&self, err: &EvalError) -> EvalBacktrace {
        let mut frames = Vec::new();
        let mut span = err.span;
        let mut current = Some(err.context.unwrap_or(ContextId::ROOT));
        while let Some(id) = current {
            let ctx = self.context(id);
            frames.push(BacktraceFrame {
                name: ctx.name,
                span,
            });
            span = ctx.entry_span;
            current = ctx.parent;
        }
        frames.reverse();
        EvalBacktrace::new(frames)
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("contexts", &self.contexts.len())
            .field("scopes", &self.env.len())
            .field("pinned", &self.pinned)
            .finish()
    }
}
