//! # OpenSCAD Lexer
//!
//! Tokenizes OpenSCAD source code into a lossless token stream.
//!
//! Whitespace and comments never become tokens of their own: they are
//! collected as [`ExtraToken`]s and attached to the next real token, or to
//! the closing [`TokenKind::Eot`] token at the end of the file. Concatenating
//! every extra token's text and every lexeme in order reproduces the input.
//!
//! Lexing errors are fatal: scanning stops at the first one.
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::span::CodeFile;
//! use openscad_ast::token::TokenKind;
//! use openscad_parser::lexer::Lexer;
//!
//! let tokens = Lexer::new(CodeFile::new("a.scad", "cube(10);")).scan().unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eot));
//! ```

mod cursor;

pub use cursor::Cursor;

use crate::error::{InvalidNumberReason, LexingError, LexingErrorKind};
use openscad_ast::span::{CodeFile, CodeLocation, CodeSpan};
use openscad_ast::token::{ExtraToken, ExtraTokenKind, Token, TokenKind, TokenValue};
use std::sync::Arc;
use tracing::trace;

/// Check if `c` may start an identifier.
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Check if `c` may continue an identifier.
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

// =============================================================================
// LEXER
// =============================================================================

/// OpenSCAD lexer.
pub struct Lexer {
    /// Character cursor.
    cursor: Cursor,
    /// Extra tokens waiting for the next real token.
    pending: Vec<ExtraToken>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl Lexer {
    /// Create a new lexer for a source file.
    pub fn new(file: Arc<CodeFile>) -> Self {
        Self {
            cursor: Cursor::new(file),
            pending: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire file.
    ///
    /// ## Returns
    ///
    /// Tokens ending with a single `Eot` token, or the first lexing error.
    pub fn scan(mut self) -> Result<Vec<Token>, LexingError> {
        loop {
            self.scan_extras()?;
            let start = self.cursor.location();
            match self.cursor.advance() {
                Some(c) => self.scan_token(c, start)?,
                None => {
                    self.push(TokenKind::Eot, start, None);
                    break;
                }
            }
        }
        trace!(tokens = self.tokens.len(), path = %self.cursor.file().path().display(), "scan complete");
        Ok(self.tokens)
    }

    // =========================================================================
    // TOKEN CONSTRUCTION
    // =========================================================================

    /// Push a token spanning from `start` to the cursor.
    fn push(&mut self, kind: TokenKind, start: CodeLocation, value: Option<TokenValue>) {
        let span = CodeSpan::new(start, self.cursor.location());
        self.tokens.push(Token {
            kind,
            span,
            extra_tokens: std::mem::take(&mut self.pending),
            value,
        });
    }

    /// Push an extra token spanning from `start` to the cursor.
    fn push_extra(&mut self, kind: ExtraTokenKind, start: CodeLocation) {
        let span = CodeSpan::new(start, self.cursor.location());
        self.pending.push(ExtraToken::new(kind, span));
    }

    fn error(&self, kind: LexingErrorKind, pos: CodeLocation) -> LexingError {
        LexingError::new(kind, pos)
    }

    // =========================================================================
    // EXTRA TOKENS
    // =========================================================================

    /// Collect whitespace, newlines and comments into `pending`.
    fn scan_extras(&mut self) -> Result<(), LexingError> {
        loop {
            let start = self.cursor.location();
            match (self.cursor.peek(), self.cursor.peek_next()) {
                (Some('\n'), _) => {
                    self.cursor.advance();
                    self.push_extra(ExtraTokenKind::NewLine, start);
                }
                (Some('\r'), Some('\n')) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    self.push_extra(ExtraTokenKind::NewLine, start);
                }
                (Some(c), _) if c.is_whitespace() => {
                    self.scan_whitespace_run();
                    self.push_extra(ExtraTokenKind::Whitespace, start);
                }
                (Some('/'), Some('/')) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    let body = self.cursor.offset();
                    while let Some(c) = self.cursor.peek() {
                        if c == '\n' || (c == '\r' && self.cursor.peek_next() == Some('\n')) {
                            break;
                        }
                        self.cursor.advance();
                    }
                    let contents = self.cursor.slice_from(body).to_string();
                    self.push_extra(ExtraTokenKind::SingleLineComment { contents }, start);
                }
                (Some('/'), Some('*')) => {
                    self.cursor.advance();
                    self.cursor.advance();
                    let body = self.cursor.offset();
                    let Some(len) = self.cursor.rest().find("*/") else {
                        return Err(self.error(LexingErrorKind::UnterminatedMultiLineComment, start));
                    };
                    while self.cursor.offset() < body + len {
                        self.cursor.advance();
                    }
                    let contents = self.cursor.slice_from(body).to_string();
                    self.cursor.advance();
                    self.cursor.advance();
                    self.push_extra(ExtraTokenKind::MultiLineComment { contents }, start);
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consume a run of whitespace that contains no line break.
    fn scan_whitespace_run(&mut self) {
        while let Some(c) = self.cursor.peek() {
            let line_break = c == '\n' || (c == '\r' && self.cursor.peek_next() == Some('\n'));
            if !c.is_whitespace() || line_break {
                break;
            }
            self.cursor.advance();
        }
    }

    // =========================================================================
    // TOKENS
    // =========================================================================

    /// Scan a single token whose first character `c` was consumed.
    fn scan_token(&mut self, c: char, start: CodeLocation) -> Result<(), LexingError> {
        let kind = match c {
            // Single-character tokens
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '#' => TokenKind::Hash,
            '?' => TokenKind::QuestionMark,
            ':' => TokenKind::Colon,

            // Two-character tokens
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '&' => {
                if self.cursor.peek() != Some('&') {
                    return Err(self.error(LexingErrorKind::SingleAmpersand, start));
                }
                self.cursor.advance();
                TokenKind::And
            }
            '|' => {
                if self.cursor.peek() != Some('|') {
                    return Err(self.error(LexingErrorKind::SinglePipe, start));
                }
                self.cursor.advance();
                TokenKind::Or
            }

            '"' => return self.scan_string(start),
            '0'..='9' => return self.scan_number(start),
            c if is_identifier_start(c) => return self.scan_identifier(start),
            other => {
                return Err(self.error(LexingErrorKind::UnexpectedCharacter(other), start));
            }
        };
        self.push(kind, start, None);
        Ok(())
    }

    /// Consume `next` if present, choosing between a two- and one-character token.
    fn either(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.cursor.peek() == Some(next) {
            self.cursor.advance();
            matched
        } else {
            single
        }
    }

    /// Scan a string literal. The opening quote was consumed.
    fn scan_string(&mut self, start: CodeLocation) -> Result<(), LexingError> {
        let mut value = String::new();
        loop {
            let escape_pos = self.cursor.location();
            match self.cursor.advance() {
                None => return Err(self.error(LexingErrorKind::UnterminatedString, start)),
                Some('"') => break,
                Some('\\') => match self.cursor.advance() {
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(other) => {
                        return Err(self.error(LexingErrorKind::IllegalStringEscape(other), escape_pos));
                    }
                    None => return Err(self.error(LexingErrorKind::UnterminatedString, start)),
                },
                Some(c) => value.push(c),
            }
        }
        self.push(TokenKind::String, start, Some(TokenValue::String(value)));
        Ok(())
    }

    /// Scan a number literal. The first digit was consumed.
    ///
    /// A digit run without a `.` that runs into identifier characters is
    /// re-scanned as an identifier (`7_`, `0z`). The exponent accepts a sign
    /// when a digit follows it, so `1e-9` is one number.
    fn scan_number(&mut self, start: CodeLocation) -> Result<(), LexingError> {
        let is_digit = |c: Option<char>| c.is_some_and(|c| c.is_ascii_digit());
        let mut has_dot = false;
        let mut has_exponent = false;

        self.cursor.advance_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.') && is_digit(self.cursor.peek_next()) {
            has_dot = true;
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }
        if self.exponent_follows() {
            has_exponent = true;
            self.scan_exponent();
        }

        match self.cursor.peek() {
            Some('.') if is_digit(self.cursor.peek_next()) => {
                return Err(self.error(
                    LexingErrorKind::InvalidNumber(InvalidNumberReason::MultipleDots),
                    start,
                ));
            }
            Some('e' | 'E') if has_exponent && self.exponent_follows() => {
                return Err(self.error(
                    LexingErrorKind::InvalidNumber(InvalidNumberReason::MultipleExponents),
                    start,
                ));
            }
            Some(c) if is_identifier_char(c) => {
                if has_dot {
                    return Err(self.error(
                        LexingErrorKind::InvalidNumber(InvalidNumberReason::NotANumber),
                        start,
                    ));
                }
                self.cursor.reset_to(&start);
                return self.scan_identifier(start);
            }
            _ => {}
        }

        let text = self.cursor.slice_from(start.offset);
        let value = match text.parse::<f64>() {
            Ok(value) if !value.is_nan() => value,
            _ => {
                return Err(self.error(
                    LexingErrorKind::InvalidNumber(InvalidNumberReason::NotANumber),
                    start,
                ));
            }
        };
        self.push(TokenKind::Number, start, Some(TokenValue::Number(value)));
        Ok(())
    }

    /// Check for `e`, an optional sign, and a digit at the cursor.
    fn exponent_follows(&self) -> bool {
        if !matches!(self.cursor.peek(), Some('e' | 'E')) {
            return false;
        }
        match self.cursor.peek_next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => self.cursor.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn scan_exponent(&mut self) {
        self.cursor.advance();
        if matches!(self.cursor.peek(), Some('+' | '-')) {
            self.cursor.advance();
        }
        self.cursor.advance_while(|c| c.is_ascii_digit());
    }

    /// Scan an identifier or keyword starting at `start`.
    fn scan_identifier(&mut self, start: CodeLocation) -> Result<(), LexingError> {
        self.cursor.advance_while(is_identifier_char);
        let text = self.cursor.slice_from(start.offset);
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Identifier);
        self.push(kind, start, None);

        if matches!(kind, TokenKind::Use | TokenKind::Include) {
            self.scan_extras()?;
            if self.cursor.peek() == Some('<') {
                self.scan_filename()?;
            }
        }
        Ok(())
    }

    /// Scan `<path>` verbatim. Any character but `>` belongs to the path.
    fn scan_filename(&mut self) -> Result<(), LexingError> {
        let start = self.cursor.location();
        self.cursor.advance();
        let body = self.cursor.offset();
        self.cursor.advance_while(|c| c != '>');
        if self.cursor.is_eof() {
            return Err(self.error(LexingErrorKind::UnterminatedFilename, start));
        }
        let path = self.cursor.slice_from(body).to_string();
        self.cursor.advance();
        self.push(TokenKind::FilenameInChevrons, start, Some(TokenValue::Filename(path)));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
