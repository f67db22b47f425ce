//! Variable scopes.
//!
//! Scopes live in one arena and point at their parent by index. A lookup
//! walks the chain outward; a definition only ever touches the scope it
//! names. Closures share a scope by holding its index, so no scope is ever
//! copied.

use std::fmt;

use rustc_hash::FxHashMap;
use wend_ir::Name;

use crate::value::Value;

/// Index of a scope in an `Environment`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<ScopeId>,
}

/// Arena of parent-linked scopes.
#[derive(Default)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty scope whose lookups fall back to `parent`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` scopes are alive.
    pub fn push_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = u32::try_from(self.scopes.len())
            .unwrap_or_else(|_| panic!("environment exceeded u32::MAX scopes"));
        self.scopes.push(Scope {
            bindings: FxHashMap::default(),
            parent,
        });
        ScopeId(id)
    }

    /// Look `name` up in `scope`, then in each ancestor.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<&Value> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.index()];
            if let Some(value) = scope.bindings.get(&name) {
                return Some(value);
            }
            current = scope.parent;
        }
        None
    }

    /// Bind `name` in `scope` itself, replacing any previous binding there.
    /// Bindings of the same name in ancestors are shadowed, not modified.
    pub fn define(&mut self, scope: ScopeId, name: Name, value: Value) {
        self.scopes[scope.index()].bindings.insert(name, value);
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.index()].parent
    }

    /// Number of live scopes.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Drop every scope at index `len` and above.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.scopes.truncate(len);
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("scopes", &self.scopes.len())
            .finish()
    }
}
