//! Configuration error types.

use thiserror::Error;

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("No states declared")]
    NoStates,

    #[error("Initial state '{initial}' is not a declared state")]
    UnknownInitialState { initial: String },

    #[error("Transition '{event}' from '{state}' targets undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },
}

/// Errors that can occur when loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed into a configuration
    #[error("Configuration parse failed: {0}")]
    Parse(String),

    /// Serializing the configuration failed
    #[error("Configuration serialization failed: {0}")]
    Serialization(String),

    /// Every violation found, not just the first
    #[error("Invalid configuration ({} violation(s)): {}", .0.len(), describe(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
