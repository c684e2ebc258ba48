//! # OpenSCAD Formatter
//!
//! Comment-preserving source formatter built on the lossless AST of
//! [`openscad_parser`].
//!
//! ```text
//! Source Text → openscad_parser::parse_strict → ScadFile → Printer → Source Text
//! ```
//!
//! Spacing, operator symbols and useless commas are normalized. Newlines and
//! comments written by the user survive in place.
//!
//! ## Example
//!
//! ```rust
//! use openscad_format::{format_source, FormattingConfiguration};
//!
//! let config = FormattingConfiguration::default();
//! let out = format_source("module m(){cube(1);}", &config).unwrap();
//! assert_eq!(out, "module m() {\n    cube(1);\n}\n");
//! ```

pub mod configuration;
pub mod printer;

pub use configuration::{ConfigError, FormattingConfiguration};
pub use printer::Printer;

use openscad_ast::nodes::ScadFile;
use openscad_parser::CodeError;
use thiserror::Error;

/// Error returned by [`format_source`].
#[derive(Debug, Error)]
pub enum FormatError {
    /// The source did not lex or parse cleanly.
    #[error("cannot format invalid source: {0}")]
    Parse(#[from] CodeError),
}

/// Format an already parsed file.
///
/// Files holding error nodes are printed too; the tokens of broken regions
/// are reproduced as written.
pub fn format_file(root: &ScadFile, config: &FormattingConfiguration) -> String {
    Printer::new(config).print_file(root)
}

/// Parse and format source text.
///
/// ## Returns
///
/// The formatted text, or the first lexing or parsing error.
pub fn format_source(source: &str, config: &FormattingConfiguration) -> Result<String, FormatError> {
    let root = openscad_parser::parse_strict(source)?;
    Ok(format_file(&root, config))
}
