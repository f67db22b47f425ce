//! String interner for identifiers and string literals.
//!
//! Interned strings are leaked, so `lookup` can hand out `&'static str`
//! without holding the lock. Programs intern a bounded set of names, so the
//! leak is bounded too.

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Names every runtime needs, interned up front.
const PRE_INTERNED: &[&str] = &["<program>", "<anonymous>"];

#[derive(Default)]
struct InternState {
    /// Map from string content to its index.
    map: FxHashMap<&'static str, u32>,
    /// Storage, indexed by `Name::index()`.
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// Reads take a shared lock; only the first sighting of a string takes the
/// write lock.
pub struct StringInterner {
    state: RwLock<InternState>,
}

impl StringInterner {
    /// Create an interner with the empty string at `Name::EMPTY`.
    pub fn new() -> Self {
        let interner = StringInterner {
            state: RwLock::new(InternState::default()),
        };
        interner.intern("");
        for s in PRE_INTERNED {
            interner.intern(s);
        }
        interner
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&index) = self.state.read().map.get(s) {
            return Name::from_raw(index);
        }

        let mut state = self.state.write();
        // Another writer may have won the race between the two locks.
        if let Some(&index) = state.map.get(s) {
            return Name::from_raw(index);
        }

        let index = u32::try_from(state.strings.len())
            .unwrap_or_else(|_| panic!("string interner exceeded u32::MAX entries"));
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        state.strings.push(leaked);
        state.map.insert(leaked, index);
        Name::from_raw(index)
    }

    /// Look up the string for a `Name`.
    ///
    /// # Panics
    /// Panics if `name` was produced by a different interner and is out of range.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.state.read().strings[name.index()]
    }

    /// Look up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.state.read().map.get(s).copied().map(Name::from_raw)
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.state.read().strings.len()
    }

    /// Always false: the empty string is interned on construction.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}
