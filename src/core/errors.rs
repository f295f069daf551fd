//! Error types for the lsgo-rs library.
//!
//! Every failure the listing pipeline can observe is represented by
//! [`LsgoError`]. Sequence items carry these errors verbatim from the stage that
//! produced them to the collector, so the variant a caller sees is always the
//! one raised at the source.

use std::io;

use thiserror::Error;

/// Main result type for lsgo operations.
pub type Result<T> = std::result::Result<T, LsgoError>;

/// Error type for all lsgo operations.
#[derive(Error, Debug)]
pub enum LsgoError {
    /// I/O related errors (output sink, configuration files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors, including invalid skip/keep patterns
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// The package discovery collaborator failed
    #[error("Discovery error: {message}")]
    Discovery {
        /// Error description
        message: String,
        /// Patterns that were being resolved
        patterns: Vec<String>,
    },

    /// A single path could not be rewritten
    #[error("Rewrite error for '{path}': {message}")]
    Rewrite {
        /// Path that failed to rewrite
        path: String,
        /// Error description
        message: String,
        /// Base directory the path was rewritten against
        base: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },
}

impl LsgoError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new discovery error for the given patterns
    pub fn discovery(message: impl Into<String>, patterns: &[String]) -> Self {
        Self::Discovery {
            message: message.into(),
            patterns: patterns.to_vec(),
        }
    }

    /// Create a new rewrite error that records the base directory
    pub fn rewrite_with_base(
        path: impl Into<String>,
        base: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Rewrite {
            path: path.into(),
            message: message.into(),
            base: Some(base.into()),
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl From<serde_yaml::Error> for LsgoError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LsgoError::config("Invalid configuration");
        assert!(matches!(err, LsgoError::Config { .. }));

        let err = LsgoError::rewrite_with_base("b.go", "/a", "not relative");
        assert!(matches!(err, LsgoError::Rewrite { .. }));
    }

    #[test]
    fn test_discovery_error_keeps_patterns() {
        let patterns = vec!["./...".to_string(), "example.com/x".to_string()];
        let err = LsgoError::discovery("go list failed", &patterns);

        if let LsgoError::Discovery { message, patterns: kept } = err {
            assert_eq!(message, "go list failed");
            assert_eq!(kept, patterns);
        } else {
            panic!("Expected Discovery error");
        }
    }

    #[test]
    fn test_rewrite_with_base() {
        let err = LsgoError::rewrite_with_base("rel/x.go", "/home/u", "mixed absolute and relative");
        let display = err.to_string();
        assert!(display.contains("rel/x.go"));
        assert!(display.contains("mixed absolute and relative"));

        if let LsgoError::Rewrite { base, .. } = err {
            assert_eq!(base, Some("/home/u".to_string()));
        } else {
            panic!("Expected Rewrite error");
        }
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<i32>("invalid: yaml: content").unwrap_err();
        let err: LsgoError = yaml_err.into();

        if let LsgoError::Serialization { data_type, .. } = err {
            assert_eq!(data_type, Some("YAML".to_string()));
        } else {
            panic!("Expected Serialization error");
        }
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err = LsgoError::io("Failed to flush output", io_err);
        assert!(err.to_string().contains("Failed to flush output"));

        if let LsgoError::Io { source, .. } = err {
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        } else {
            panic!("Expected Io error");
        }
    }

    #[test]
    fn test_error_debug_formatting() {
        let err = LsgoError::config_field("Invalid pattern", "skip_pattern");
        let debug = format!("{:?}", err);
        assert!(debug.contains("Config"));
        assert!(debug.contains("skip_pattern"));
    }
}
