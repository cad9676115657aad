//! Custom error types for authmigrate.
//!
//! These cover conditions that indicate a broken deployment or invalid
//! input, not "nothing detected" outcomes. A project with no auth patterns,
//! or a UAM with no matching conversion rule, is expected data and is never
//! represented as an error.

use thiserror::Error;

/// Main error type for authmigrate operations.
#[derive(Error, Debug)]
pub enum AuthmigrateError {
    // Configuration errors
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    // Rule table errors
    #[error("Failed to load rule table '{path}': {reason}")]
    RuleTableLoad { path: String, reason: String },

    #[error("Rule table parse error: {0}")]
    RuleTableParse(#[from] serde_json::Error),

    // Codegen errors
    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    // Detector errors
    #[error("Failed to load tree-sitter grammar: {0}")]
    GrammarError(String),
}
