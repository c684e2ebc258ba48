//! # OpenSCAD Parser
//!
//! Lossless lexer and recursive descent parser for OpenSCAD source code.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens (+ extra tokens) → Parser → ScadFile
//! ```
//!
//! Lexing errors are fatal: no tree is produced. Parsing errors are
//! recovered per statement and collected in an [`ErrorCollector`]; the
//! skipped tokens stay in the tree as `ErrorNode`s.
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::parse;
//!
//! let parsed = parse("cube(10);");
//! assert!(!parsed.errors.has_errors());
//! assert_eq!(parsed.root.unwrap().statements.len(), 1);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

#[cfg(test)]
mod test_support;

pub use error::{
    CodeError, Diagnostic, ErrorCollector, LexingError, LexingErrorKind, ParsingError,
    ParsingErrorKind, Severity,
};
pub use lexer::Lexer;
pub use parser::Parser;

use openscad_ast::nodes::ScadFile;
use openscad_ast::span::CodeFile;
use openscad_ast::token::Token;
use std::sync::Arc;

/// Path given to sources parsed from a bare string.
const INLINE_SOURCE_PATH: &str = "<input>";

// =============================================================================
// PUBLIC API
// =============================================================================

/// Result of parsing a source string.
#[derive(Debug)]
pub struct ParsedFile {
    /// Parsed file; `None` when lexing failed.
    pub root: Option<Arc<ScadFile>>,
    /// Every error reported while lexing and parsing.
    pub errors: ErrorCollector,
}

/// Tokenize a file.
///
/// ## Returns
///
/// All tokens ending with `Eot`, or the first lexing error.
pub fn lex(file: &Arc<CodeFile>) -> Result<Vec<Token>, LexingError> {
    Lexer::new(Arc::clone(file)).scan()
}

/// Parse OpenSCAD source code.
///
/// ## Parameters
///
/// - `source`: OpenSCAD source code string
///
/// ## Example
///
/// ```rust
/// use openscad_parser::parse;
///
/// let parsed = parse("cube(; sphere(5);");
/// assert!(parsed.errors.has_errors());
/// assert_eq!(parsed.root.unwrap().statements.len(), 2);
/// ```
pub fn parse(source: &str) -> ParsedFile {
    let file = CodeFile::new(INLINE_SOURCE_PATH, source);
    let mut errors = ErrorCollector::new();
    let root = parse_file(&file, &mut errors);
    ParsedFile { root, errors }
}

/// Parse a file, reporting errors to `errors`.
///
/// ## Returns
///
/// The parsed file, or `None` when lexing failed.
pub fn parse_file(file: &Arc<CodeFile>, errors: &mut ErrorCollector) -> Option<Arc<ScadFile>> {
    let tokens = match lex(file) {
        Ok(tokens) => tokens,
        Err(error) => {
            errors.report(error);
            return None;
        }
    };
    let root = Parser::new(file, tokens, errors).parse();
    Some(Arc::new(root))
}

/// Parse source code, failing on the first error of any kind.
///
/// ## Example
///
/// ```rust
/// use openscad_parser::parse_strict;
///
/// assert!(parse_strict("x = 1;").is_ok());
/// assert!(parse_strict("x = ;").is_err());
/// ```
pub fn parse_strict(source: &str) -> Result<Arc<ScadFile>, CodeError> {
    let file = CodeFile::new(INLINE_SOURCE_PATH, source);
    let tokens = lex(&file)?;
    let mut errors = ErrorCollector::new();
    let root = Parser::new(&file, tokens, &mut errors).parse();
    errors.throw_if_any()?;
    Ok(Arc::new(root))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cube() {
        let parsed = parse("cube(10);");
        assert!(!parsed.errors.has_errors(), "{:?}", parsed.errors.errors());
        assert_eq!(parsed.root.unwrap().statements.len(), 1);
    }

    #[test]
    fn test_parse_union() {
        let parsed = parse("union() { cube(10); sphere(5); }");
        assert!(!parsed.errors.has_errors());
    }

    #[test]
    fn test_lexing_error_yields_no_root() {
        let parsed = parse("x = 1 & 2;");
        assert!(parsed.root.is_none());
        assert_eq!(parsed.errors.errors()[0].class_name(), "SingleAmpersandError");
    }

    #[test]
    fn test_parse_strict_returns_first_error() {
        let error = parse_strict("a = ;\nb = ;").unwrap_err();
        assert_eq!(error.location().line, 0);
    }

    #[test]
    fn test_parse_file_keeps_path() {
        let file = CodeFile::new("shapes/box.scad", "cube();");
        let mut errors = ErrorCollector::new();
        let root = parse_file(&file, &mut errors).unwrap();
        let span = root.statements[0].span().unwrap();
        assert_eq!(span.start.file.path().to_str(), Some("shapes/box.scad"));
    }
}
