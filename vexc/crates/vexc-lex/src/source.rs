//! Stage 1: the file loader.
//!
//! Maps a path to its contents as a single owned string, reused unchanged
//! by the import resolver for every recursive import (spec.md §4.6).

use std::path::Path;

use vexc_util::SourceLoadError;

pub fn load(path: &Path) -> Result<String, SourceLoadError> {
    std::fs::read(path)
        .map_err(|source| SourceLoadError::Io {
            path: path.display().to_string(),
            source,
        })
        .and_then(|bytes| {
            String::from_utf8(bytes).map_err(|_| SourceLoadError::InvalidEncoding {
                path: path.display().to_string(),
            })
        })
}
