//! A thread-safe, append-only string table backing [`super::Symbol`].
//!
//! Mirrors the lock-free interner used elsewhere in this toolchain: a
//! [`DashMap`] keyed by string hash avoids locking readers against writers,
//! and interned strings are leaked to `'static` since the table lives for
//! the whole process and strings are never removed.

use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use super::Symbol;

pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

pub struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    strings: DashMap<u32, &'static str>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            strings: DashMap::with_capacity(256),
            next_index: AtomicU32::new(0),
        }
    }

    pub fn intern(&self, s: &str) -> Symbol {
        let hash = Self::hash_of(s);
        if let Some(existing) = self.map.get(&hash) {
            if existing.0 == s {
                return Symbol(existing.1);
            }
        }

        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let index = self.next_index.fetch_add(1, Ordering::Relaxed);
        self.map.insert(hash, (leaked, index));
        self.strings.insert(index, leaked);
        Symbol(index)
    }

    pub fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.strings.get(&symbol.0).map(|entry| *entry)
    }

    fn hash_of(s: &str) -> u64 {
        use ahash::AHasher;
        let mut hasher = AHasher::default();
        s.hash(&mut hasher);
        hasher.finish()
    }
}
