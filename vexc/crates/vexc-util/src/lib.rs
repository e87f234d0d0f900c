//! vexc-util - shared foundation for the Vex front-end organizer.
//!
//! String interning, source-location tracking, diagnostic collection, and
//! typed arenas. Every other `vexc-*` crate depends on this one and nothing
//! else outside the standard library plus `rustc-hash` for the occasional
//! map.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Category, Diagnostic, DiagnosticBuilder, Handler};
pub use error::SourceLoadError;
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
