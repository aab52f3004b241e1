//! String interner for identifier storage.
//!
//! Provides O(1) interning and lookup with thread-safe concurrent access.
//! A registry run interns thousands of strings, not millions, so a single
//! map behind one lock is enough; interned strings are leaked to give them
//! `'static` lifetime for lock-free resolution.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Interner exceeded capacity (over 4 billion strings).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {count} strings, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// Read access to interned strings.
///
/// Components that only resolve names (diagnostic rendering, code emission)
/// take `&dyn StringLookup` instead of the full interner.
pub trait StringLookup {
    /// Resolve an interned name back to its string.
    fn resolve(&self, name: Name) -> &str;
}

#[derive(Debug)]
struct Inner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// # Thread Safety
/// Uses an `RwLock` for concurrent read/write access; resolved strings are
/// `'static`, so lookups escape the lock.
#[derive(Debug)]
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut inner = Inner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        let empty: &'static str = "";
        inner.map.insert(empty, 0);
        inner.strings.push(empty);
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&idx) = self.inner.read().map.get(s) {
            return Ok(Name::from_raw(idx));
        }

        let mut inner = self.inner.write();
        // Re-check under the write lock: another thread may have interned
        // this string between the read above and acquiring the write lock.
        if let Some(&idx) = inner.map.get(s) {
            return Ok(Name::from_raw(idx));
        }

        let count = inner.strings.len();
        let Ok(idx) = u32::try_from(count) else {
            return Err(InternError::Overflow { count });
        };

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        inner.map.insert(leaked, idx);
        inner.strings.push(leaked);
        Ok(Name::from_raw(idx))
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics on interner overflow (over 4 billion distinct strings).
    #[expect(
        clippy::unwrap_used,
        reason = "overflow requires 4 billion distinct strings; unreachable in practice"
    )]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap()
    }

    /// Look up an already-interned string without inserting.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.inner.read().map.get(s).map(|&idx| Name::from_raw(idx))
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Whether the interner holds only the pre-interned empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringLookup for StringInterner {
    fn resolve(&self, name: Name) -> &str {
        let inner = self.inner.read();
        inner
            .strings
            .get(name.index())
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_returns_same_name_for_same_string() {
        let interner = StringInterner::new();
        let a = interner.intern("Shape");
        let b = interner.intern("Shape");
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a), "Shape");
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("app.Circle");
        let b = interner.intern("lib.Circle");
        assert_ne!(a, b);
    }

    #[test]
    fn empty_string_is_pre_interned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.resolve(Name::EMPTY), "");
        assert!(interner.is_empty());
    }

    #[test]
    fn get_does_not_insert() {
        let interner = StringInterner::new();
        assert_eq!(interner.get("missing"), None);
        let len_before = interner.len();
        let _ = interner.get("missing");
        assert_eq!(interner.len(), len_before);
    }

    #[test]
    fn resolve_unknown_name_is_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.resolve(Name::from_raw(999)), "");
    }
}
