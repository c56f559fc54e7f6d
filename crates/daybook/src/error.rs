//! Error types for registry lookups, sheet loading and overrides.
//!
//! Template entries themselves never fail. [`RenderError`] covers the
//! surfaces around them: resolving a name, matching an input to the entry's
//! shape, and loading template sheets.

use thiserror::Error;

/// Error type for everything outside the template entries.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No template is registered under this name.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// The input passed by name does not have the entry's shape.
    #[error("template '{template}' expects {expected} input, got {actual}")]
    InputMismatch {
        template: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// A dynamically-typed input could not be converted to the entry's shape.
    #[error("invalid input for template '{template}': {source}")]
    InvalidInput {
        template: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Template syntax error or render failure in a sheet override.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Malformed template sheet.
    #[error("sheet error: {0}")]
    Sheet(#[from] serde_yaml::Error),

    /// Invalid theme style definition.
    #[error("style error: {0}")]
    Style(String),

    /// Data serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (e.g., reading a sheet from disk).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
