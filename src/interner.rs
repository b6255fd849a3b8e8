//! String interning for recurring interface and type names
//!
//! Interface names and stored-type names repeat across every binding,
//! candidate row and diagnostic; each unique name is stored once.
//! Uses DashMap for lock-free concurrent access.
//!
//! Benefits:
//! - Memory: single allocation per unique name
//! - Comparison: pointer equality fast path (O(1) vs O(n))
//! - Cloning: Arc::clone is O(1), no string copy

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

/// Global name interner (thread-safe, lock-free)
static INTERNER: Lazy<Interner> = Lazy::new(Interner::new);

/// Thread-safe string interner using DashMap
pub struct Interner {
    /// Map from string content to interned Arc<str>
    names: DashMap<Arc<str>, ()>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            names: DashMap::new(),
        }
    }

    /// Intern a name, returning a shared Arc<str>
    ///
    /// If the name was already interned, returns the existing Arc.
    /// Otherwise, creates a new Arc and stores it.
    pub fn intern(&self, name: &str) -> Arc<str> {
        let key: Arc<str> = Arc::from(name);

        if let Some(existing) = self.names.get(&key) {
            return Arc::clone(existing.key());
        }

        self.names.insert(Arc::clone(&key), ());
        key
    }

    /// Number of interned names
    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty
    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

/// Intern an interface or type name using the global interner
#[inline]
pub fn intern(name: &str) -> Arc<str> {
    INTERNER.intern(name)
}
