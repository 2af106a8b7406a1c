//! Error types for the compile pipeline surface
//!
//! The layout and linking passes themselves are infallible by design: they
//! degrade to a possibly visually degenerate but valid layout rather than
//! block rendering, since compilation typically runs live on every edit of a
//! user-authored specification. Errors here cover the outer surface only:
//! reading files and decoding the specification or configuration.

use thiserror::Error;

use crate::layout::ConfigError;

/// Errors that can occur around a compile invocation
#[derive(Debug, Error)]
pub enum CompileError {
    /// Error reading a specification file
    #[error("failed to read specification: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding the specification JSON
    #[error("failed to decode specification: {0}")]
    Spec(#[from] serde_json::Error),

    /// Error loading the layout configuration
    #[error("invalid layout configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_error_display() {
        let err = serde_json::from_str::<crate::spec::RootSpec>("not json").unwrap_err();
        let err = CompileError::from(err);
        assert!(err.to_string().contains("failed to decode specification"));
    }
}
