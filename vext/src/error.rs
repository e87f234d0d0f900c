//! Error handling for the vext CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VextError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("compilation failed: {0}")]
    Compilation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, VextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_parse_failure_converts_via_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: VextError = json_err.into();
        assert!(matches!(err, VextError::Json(_)));
    }

    #[test]
    fn config_error_renders_its_message() {
        let err = VextError::Config("missing entry".to_string());
        assert_eq!(err.to_string(), "configuration error: missing entry");
    }
}
