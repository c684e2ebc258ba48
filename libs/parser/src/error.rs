//! # Errors
//!
//! Lexing and parsing errors, and the collector that accumulates them.
//!
//! Every error carries the [`CodeLocation`] where it was detected and a
//! deterministic message. [`CodeError`] unifies both families so that one
//! [`ErrorCollector`] holds everything a parse produced, in order.
//!
//! ## Example
//!
//! ```rust
//! use openscad_parser::error::ErrorCollector;
//!
//! let parsed = openscad_parser::parse("x = ;");
//! assert!(parsed.errors.has_errors());
//!
//! let mut out = Vec::new();
//! parsed.errors.print_errors(&mut out).unwrap();
//! ```

use openscad_ast::span::CodeLocation;
use openscad_ast::token::TokenKind;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

// =============================================================================
// LEXING ERROR
// =============================================================================

/// Fatal error raised while scanning; aborts tokenization.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct LexingError {
    /// Error kind with details.
    pub kind: LexingErrorKind,
    /// Where scanning failed.
    pub pos: CodeLocation,
}

impl LexingError {
    /// Create a new lexing error.
    pub fn new(kind: LexingErrorKind, pos: CodeLocation) -> Self {
        Self { kind, pos }
    }
}

/// Why a number literal was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidNumberReason {
    /// More than one `.`
    #[error("more than one decimal point")]
    MultipleDots,
    /// More than one exponent
    #[error("more than one exponent")]
    MultipleExponents,
    /// Text did not decode to a number
    #[error("not a number")]
    NotANumber,
}

/// Kinds of lexing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingErrorKind {
    /// `/*` without a closing `*/`
    #[error("unterminated multi-line comment")]
    UnterminatedMultiLineComment,
    /// `"` without a closing `"`
    #[error("unterminated string literal")]
    UnterminatedString,
    /// Escape other than `\" \\ \n \t \r`
    #[error("illegal escape sequence '\\{0}' in string literal")]
    IllegalStringEscape(char),
    /// Malformed number literal
    #[error("invalid number literal: {0}")]
    InvalidNumber(InvalidNumberReason),
    /// Lone `&`
    #[error("unexpected '&', did you mean '&&'?")]
    SingleAmpersand,
    /// Lone `|`
    #[error("unexpected '|', did you mean '||'?")]
    SinglePipe,
    /// `<` after `use`/`include` without a closing `>`
    #[error("unterminated filename, expected '>'")]
    UnterminatedFilename,
    /// Character that starts no token
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

impl LexingErrorKind {
    /// Name of the error class, for reports.
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::UnterminatedMultiLineComment => "UnterminatedMultiLineCommentError",
            Self::UnterminatedString => "UnterminatedStringError",
            Self::IllegalStringEscape(_) => "IllegalStringEscapeSequenceError",
            Self::InvalidNumber(_) => "InvalidNumberError",
            Self::SingleAmpersand => "SingleAmpersandError",
            Self::SinglePipe => "SinglePipeError",
            Self::UnterminatedFilename => "UnterminatedFilenameError",
            Self::UnexpectedCharacter(_) => "UnexpectedCharacterError",
        }
    }
}

// =============================================================================
// PARSING ERROR
// =============================================================================

/// Error raised while building the AST.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ParsingError {
    /// Error kind with details.
    pub kind: ParsingErrorKind,
    /// Where parsing failed.
    pub pos: CodeLocation,
}

impl ParsingError {
    /// Create a new parsing error.
    pub fn new(kind: ParsingErrorKind, pos: CodeLocation) -> Self {
        Self { kind, pos }
    }
}

/// Kinds of parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsingErrorKind {
    /// `use`/`include` not followed by `<filename>`
    #[error("expected <filename> after '{keyword}'")]
    UnterminatedUse {
        /// `use` or `include`.
        keyword: String,
    },
    /// Token that cannot start a statement
    #[error("unexpected token '{found}' in statement position")]
    UnexpectedToken {
        /// Token that was found.
        found: String,
    },
    /// Identifier followed by neither `=` nor `(`
    #[error("unexpected token '{found}' after identifier, expected '=' or '('")]
    UnexpectedTokenAfterIdentifier {
        /// Token that was found.
        found: String,
    },
    /// End of text where a child statement should start
    #[error("unexpected end of file before module instantiation")]
    UnexpectedEofBeforeModuleInstantiation,
    /// End of text inside `( ... )`
    #[error("unterminated parameter list")]
    UnterminatedParameterList,
    /// Token that cannot continue an argument list
    #[error("unexpected token '{found}' in argument list")]
    UnexpectedTokenInNamedArguments {
        /// Token that was found.
        found: String,
    },
    /// End of text inside `for ( ... )`
    #[error("unterminated for loop parameters")]
    UnterminatedForLoopParams,
    /// Token that cannot continue `for ( ... )`
    #[error("unexpected token '{found}' in for loop parameters")]
    UnexpectedTokenInForLoopParams {
        /// Token that was found.
        found: String,
    },
    /// Token that starts no expression
    #[error("failed to match primary expression at '{found}'")]
    FailedToMatchPrimaryExpression {
        /// Token that was found.
        found: String,
    },
    /// End of text inside `[ ... ]`
    #[error("unterminated vector expression")]
    UnterminatedVector,
    /// A required token was missing
    #[error("expected '{}', got '{found}' {context}", .expected.display())]
    Consume {
        /// Required token kind.
        expected: TokenKind,
        /// Token that was found.
        found: String,
        /// What was being parsed.
        context: String,
    },
}

impl ParsingErrorKind {
    /// Name of the error class, for reports.
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::UnterminatedUse { .. } => "UnterminatedUseStatementError",
            Self::UnexpectedToken { .. } => "UnexpectedTokenError",
            Self::UnexpectedTokenAfterIdentifier { .. } => "UnexpectedTokenAfterIdentifierError",
            Self::UnexpectedEofBeforeModuleInstantiation => {
                "UnexpectedEndOfFileBeforeModuleInstantiationError"
            }
            Self::UnterminatedParameterList => "UnterminatedParameterListError",
            Self::UnexpectedTokenInNamedArguments { .. } => {
                "UnexpectedTokenInNamedArgumentsListError"
            }
            Self::UnterminatedForLoopParams => "UnterminatedForLoopParamsError",
            Self::UnexpectedTokenInForLoopParams { .. } => "UnexpectedTokenInForLoopParamsError",
            Self::FailedToMatchPrimaryExpression { .. } => "FailedToMatchPrimaryExpressionError",
            Self::UnterminatedVector => "UnterminatedVectorExpressionError",
            Self::Consume { .. } => "ConsumptionError",
        }
    }
}

// =============================================================================
// CODE ERROR
// =============================================================================

/// Any error reported against source code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodeError {
    /// Scanning failed.
    #[error(transparent)]
    Lexing(#[from] LexingError),
    /// Parsing failed.
    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl CodeError {
    /// Where the error was detected.
    pub fn location(&self) -> &CodeLocation {
        match self {
            Self::Lexing(e) => &e.pos,
            Self::Parsing(e) => &e.pos,
        }
    }

    /// Human-readable message, without location.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Name of the error class.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Lexing(e) => e.kind.class_name(),
            Self::Parsing(e) => e.kind.class_name(),
        }
    }

    /// Converts the error into a serializable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let pos = self.location();
        Diagnostic {
            severity: Severity::Error,
            class: self.class_name().to_string(),
            message: self.message(),
            offset: pos.offset,
            line: pos.line,
            column: pos.col,
        }
    }
}

// =============================================================================
// DIAGNOSTIC
// =============================================================================

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// The input could not be processed as written.
    Error,
}

/// Error record for editor front ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Error class name.
    pub class: String,
    /// Message text.
    pub message: String,
    /// Byte offset.
    pub offset: usize,
    /// Zero-indexed line.
    pub line: usize,
    /// Zero-indexed column.
    pub column: usize,
}

// =============================================================================
// ERROR COLLECTOR
// =============================================================================

/// Ordered accumulator of reported errors.
///
/// Nothing is deduplicated or merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorCollector {
    errors: Vec<CodeError>,
}

impl ErrorCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error.
    pub fn report(&mut self, error: impl Into<CodeError>) {
        self.errors.push(error.into());
    }

    /// Returns true if any error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Reported errors in order.
    pub fn errors(&self) -> &[CodeError] {
        &self.errors
    }

    /// Consumes the collector, returning its errors.
    pub fn into_errors(self) -> Vec<CodeError> {
        self.errors
    }

    /// Returns the first reported error, if any, as `Err`.
    pub fn throw_if_any(&self) -> Result<(), CodeError> {
        match self.errors.first() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Writes one `<location> <ErrorClassName>: <message>` line per error.
    pub fn print_errors(&self, out: &mut impl io::Write) -> io::Result<()> {
        for error in &self.errors {
            writeln!(
                out,
                "{} {}: {}",
                error.location(),
                error.class_name(),
                error.message()
            )?;
        }
        Ok(())
    }

    /// Serializable records of every reported error.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(CodeError::to_diagnostic).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use openscad_ast::span::CodeFile;

    fn error_at(offset: usize) -> CodeError {
        let file = CodeFile::new("t.scad", "abc\ndef");
        ParsingError::new(
            ParsingErrorKind::UnexpectedToken {
                found: "d".to_string(),
            },
            file.location_at(offset),
        )
        .into()
    }

    #[test]
    fn test_collector_starts_empty() {
        let collector = ErrorCollector::new();
        assert!(!collector.has_errors());
        assert!(collector.throw_if_any().is_ok());
    }

    #[test]
    fn test_throw_if_any_returns_first() {
        let mut collector = ErrorCollector::new();
        collector.report(error_at(4));
        collector.report(error_at(5));
        let err = collector.throw_if_any().unwrap_err();
        assert_eq!(err.location().offset, 4);
        assert_eq!(collector.errors().len(), 2);
    }

    #[test]
    fn test_print_errors_format() {
        let mut collector = ErrorCollector::new();
        collector.report(error_at(4));
        let mut out = Vec::new();
        collector.print_errors(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "t.scad:2:1 UnexpectedTokenError: unexpected token 'd' in statement position\n"
        );
    }

    #[test]
    fn test_lexing_error_message() {
        let file = CodeFile::new("t.scad", "\"\\q\"");
        let error: CodeError =
            LexingError::new(LexingErrorKind::IllegalStringEscape('q'), file.location_at(1)).into();
        assert_eq!(error.class_name(), "IllegalStringEscapeSequenceError");
        assert_eq!(error.message(), "illegal escape sequence '\\q' in string literal");
    }

    #[test]
    fn test_consume_message_names_expected_token() {
        let kind = ParsingErrorKind::Consume {
            expected: TokenKind::Semicolon,
            found: ")".to_string(),
            context: "after assignment".to_string(),
        };
        assert_eq!(kind.to_string(), "expected ';', got ')' after assignment");
    }

    #[test]
    fn test_diagnostics_serialize() {
        let mut collector = ErrorCollector::new();
        collector.report(error_at(5));
        let diagnostics = collector.diagnostics();
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(diagnostics[0].column, 1);
        let json = serde_json::to_string(&diagnostics[0]).unwrap();
        assert!(json.contains("\"class\":\"UnexpectedTokenError\""));
        assert!(json.contains("\"severity\":\"Error\""));
        assert_eq!(diagnostics[0].severity, Severity::Error);
    }
}
