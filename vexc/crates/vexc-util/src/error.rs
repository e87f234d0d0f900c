//! Error types for the fatal, non-diagnostic paths: file I/O and the two
//! early-termination conditions spec.md §7 calls out (file-open failure,
//! missing `Main.main`). Everything else is a [`crate::diagnostic::Diagnostic`],
//! never a [`std::error::Error`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceLoadError {
    #[error("could not open source file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("source file `{path}` is not valid UTF-8")]
    InvalidEncoding { path: String },
}
