//! String interning.
//!
//! Every identifier, keyword, and literal lexeme that survives past the
//! tokenizer is eventually compared for equality many times over (class
//! extraction, subclass nesting by breadcrumb, name numbering). Interning
//! turns those comparisons into `u32` comparisons instead of `str` walks.

mod interner;

pub use interner::StringTable;

/// An interned string.
///
/// Two `Symbol`s are equal if and only if the strings they were interned
/// from are equal; comparison never touches the underlying bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub fn intern(s: &str) -> Self {
        interner::STRING_TABLE.intern(s)
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        interner::STRING_TABLE
            .get(*self)
            .expect("symbol index must come from StringTable::intern")
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static_assertions::assert_impl_all!(Symbol: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        let a = Symbol::intern("class");
        let b = Symbol::intern("class");
        assert_eq!(a, b);
    }

    #[test]
    fn different_strings_intern_differently() {
        let a = Symbol::intern("class");
        let b = Symbol::intern("function");
        assert_ne!(a, b);
    }

    #[test]
    fn round_trips_through_as_str() {
        let sym = Symbol::intern("extends");
        assert_eq!(sym.as_str(), "extends");
    }

    #[quickcheck_macros::quickcheck]
    fn intern_round_trip(s: String) -> bool {
        Symbol::intern(&s).as_str() == s
    }
}
