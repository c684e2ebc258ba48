//! # Formatting Configuration
//!
//! Options recognized by the printer. Loadable from partial JSON documents
//! whose missing fields fall back to the `config` crate defaults.
//!
//! ## Example
//!
//! ```rust
//! use openscad_format::FormattingConfiguration;
//!
//! let config = FormattingConfiguration::from_json(r#"{"indentCount": 2}"#).unwrap();
//! assert_eq!(config.indent_unit(), "  ");
//! assert_eq!(config.module_instantiation_break_length, 40);
//! ```

use config::constants::{
    DEFAULT_INDENT_CHAR, DEFAULT_INDENT_COUNT, DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Printer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormattingConfiguration {
    /// Character repeated for one indentation unit.
    pub indent_char: char,
    /// Number of `indent_char` per indentation level.
    pub indent_count: usize,
    /// Width above which an instantiation chain is broken one link per line.
    pub module_instantiation_break_length: usize,
    /// Suppress module and function bodies.
    pub definitions_only: bool,
    /// Annotate every emitted newline with `/*reason*/`.
    pub debug_newlines: bool,
}

impl Default for FormattingConfiguration {
    fn default() -> Self {
        Self {
            indent_char: DEFAULT_INDENT_CHAR,
            indent_count: DEFAULT_INDENT_COUNT,
            module_instantiation_break_length: DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH,
            definitions_only: false,
            debug_newlines: false,
        }
    }
}

impl FormattingConfiguration {
    /// Parse a JSON document, layering it over the defaults.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::Json`] when the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// One level of indentation.
    pub fn indent_unit(&self) -> String {
        std::iter::repeat(self.indent_char)
            .take(self.indent_count)
            .collect()
    }
}

/// Failure to load a [`FormattingConfiguration`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or a field of the wrong type.
    #[error("invalid formatting configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormattingConfiguration::default();
        assert_eq!(config.indent_char, ' ');
        assert_eq!(config.indent_count, 4);
        assert_eq!(config.module_instantiation_break_length, 40);
        assert!(!config.definitions_only);
        assert!(!config.debug_newlines);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FormattingConfiguration::from_json(r#"{"indentChar": "\t", "indentCount": 1}"#)
            .unwrap();
        assert_eq!(config.indent_unit(), "\t");
        assert_eq!(config.module_instantiation_break_length, 40);
    }

    #[test]
    fn test_all_fields_camel_case() {
        let config = FormattingConfiguration::from_json(
            r#"{"moduleInstantiationBreakLength": 80, "definitionsOnly": true, "debugNewlines": true}"#,
        )
        .unwrap();
        assert_eq!(config.module_instantiation_break_length, 80);
        assert!(config.definitions_only);
        assert!(config.debug_newlines);
    }

    #[test]
    fn test_invalid_json() {
        let error = FormattingConfiguration::from_json(r#"{"indentCount": "four"}"#).unwrap_err();
        assert!(error.to_string().starts_with("invalid formatting configuration"));
    }
}
