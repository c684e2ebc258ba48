//! # Tokens
//!
//! Token types shared by the lexer, the AST and the printer.
//!
//! Every token carries the whitespace and comments that appeared before it
//! as [`ExtraToken`]s. Together with the exact lexeme this makes the token
//! stream, and every AST built from it, lossless.
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::span::{CodeFile, CodeSpan};
//! use openscad_ast::token::{Token, TokenKind};
//!
//! let file = CodeFile::new("a.scad", "cube");
//! let span = CodeSpan::new(file.location_at(0), file.location_at(4));
//! let token = Token::new(TokenKind::Identifier, span, Vec::new());
//! assert_eq!(token.lexeme(), "cube");
//! ```

use crate::span::{CodeLocation, CodeSpan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to a token. AST nodes point at the exact tokens that
/// produced them through these handles.
pub type TokenRef = Arc<Token>;

// =============================================================================
// EXTRA TOKENS
// =============================================================================

/// Non-semantic source material attached to the token that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraToken {
    /// What kind of material this is.
    pub kind: ExtraTokenKind,
    /// Where it appeared.
    pub span: CodeSpan,
}

/// Kinds of extra tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraTokenKind {
    /// A line break (`\n` or `\r\n`).
    NewLine,
    /// A run of non-newline whitespace.
    Whitespace,
    /// `// contents`, not including the line break.
    SingleLineComment {
        /// Text after the `//`.
        contents: String,
    },
    /// `/* contents */`.
    MultiLineComment {
        /// Text between the delimiters.
        contents: String,
    },
}

impl ExtraToken {
    /// Creates an extra token.
    pub fn new(kind: ExtraTokenKind, span: CodeSpan) -> Self {
        Self { kind, span }
    }

    /// Returns the original source text of this extra token.
    pub fn text(&self) -> &str {
        self.span.text()
    }

    /// Returns true for comments of either kind.
    pub fn is_comment(&self) -> bool {
        matches!(
            self.kind,
            ExtraTokenKind::SingleLineComment { .. } | ExtraTokenKind::MultiLineComment { .. }
        )
    }
}

// =============================================================================
// TOKEN
// =============================================================================

/// Decoded value carried by literal tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Value of a number literal.
    Number(f64),
    /// Unescaped contents of a string literal.
    String(String),
    /// Path between the chevrons of `use <...>` / `include <...>`.
    Filename(String),
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span of the lexeme (extra tokens excluded).
    pub span: CodeSpan,
    /// Whitespace and comments that appeared before this token, in order.
    pub extra_tokens: Vec<ExtraToken>,
    /// Decoded literal value, for number, string and filename tokens.
    pub value: Option<TokenValue>,
}

impl Token {
    /// Creates a token without a literal value.
    pub fn new(kind: TokenKind, span: CodeSpan, extra_tokens: Vec<ExtraToken>) -> Self {
        Self {
            kind,
            span,
            extra_tokens,
            value: None,
        }
    }

    /// Creates a literal token carrying a decoded value.
    pub fn literal(
        kind: TokenKind,
        span: CodeSpan,
        extra_tokens: Vec<ExtraToken>,
        value: TokenValue,
    ) -> Self {
        Self {
            kind,
            span,
            extra_tokens,
            value: Some(value),
        }
    }

    /// Returns the exact source text of the token.
    pub fn lexeme(&self) -> &str {
        self.span.text()
    }

    /// Returns the start location of the lexeme.
    pub fn pos(&self) -> &CodeLocation {
        &self.span.start
    }

    /// Returns the end location of the lexeme.
    pub fn end(&self) -> &CodeLocation {
        &self.span.end
    }

    /// Returns true if any attached extra token is a line break.
    pub fn has_newline_before(&self) -> bool {
        self.extra_tokens
            .iter()
            .any(|extra| extra.kind == ExtraTokenKind::NewLine)
    }

    /// Returns true if any attached extra token is a comment.
    pub fn has_comment_before(&self) -> bool {
        self.extra_tokens.iter().any(ExtraToken::is_comment)
    }

    /// Returns the number value of a number token.
    pub fn number_value(&self) -> Option<f64> {
        match self.value {
            Some(TokenValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Returns the decoded text of a string or filename token.
    pub fn text_value(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::String(s)) | Some(TokenValue::Filename(s)) => Some(s),
            _ => None,
        }
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Meta
    /// End of text; carries the trailing extra tokens of the file.
    Eot,

    // Literals and names
    /// Identifier like `cube`, `my_var` or `$fn`
    Identifier,
    /// Number literal like `10`, `3.14` or `1e-9`
    Number,
    /// String literal like `"hello"`
    String,
    /// `<path>` following `use` or `include`
    FilenameInChevrons,

    // Keywords
    /// `use`
    Use,
    /// `include`
    Include,
    /// `module`
    Module,
    /// `function`
    Function,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`
    For,
    /// `let`
    Let,
    /// `assert`
    Assert,
    /// `echo`
    Echo,
    /// `each`
    Each,
    /// `true`
    True,
    /// `false`
    False,
    /// `undef`
    Undef,

    // Operators
    /// `!`
    Bang,
    /// `#`
    Hash,
    /// `%`
    Percent,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `=`
    Equal,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `?`
    QuestionMark,
    /// `:`
    Colon,

    // Delimiters
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
}

impl TokenKind {
    /// Looks up the keyword spelled by `text`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::token::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("module"), Some(TokenKind::Module));
    /// assert_eq!(TokenKind::keyword("cube"), None);
    /// ```
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "use" => Self::Use,
            "include" => Self::Include,
            "module" => Self::Module,
            "function" => Self::Function,
            "if" => Self::If,
            "else" => Self::Else,
            "for" => Self::For,
            "let" => Self::Let,
            "assert" => Self::Assert,
            "echo" => Self::Echo,
            "each" => Self::Each,
            "true" => Self::True,
            "false" => Self::False,
            "undef" => Self::Undef,
            _ => return None,
        };
        Some(kind)
    }

    /// Check if this is a keyword token.
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Use
                | Self::Include
                | Self::Module
                | Self::Function
                | Self::If
                | Self::Else
                | Self::For
                | Self::Let
                | Self::Assert
                | Self::Echo
                | Self::Each
                | Self::True
                | Self::False
                | Self::Undef
        )
    }

    /// Check if this token prefixes a module instantiation as a tag
    /// (`!` root, `#` highlight, `%` background, `*` disable).
    pub const fn is_tag(&self) -> bool {
        matches!(self, Self::Bang | Self::Hash | Self::Percent | Self::Star)
    }

    /// Check if this keyword may also name a module instantiation
    /// (`for (...) child();`).
    pub const fn is_keyword_module_name(&self) -> bool {
        matches!(
            self,
            Self::For | Self::Let | Self::Assert | Self::Echo | Self::Each
        )
    }

    /// Get display string for error messages.
    pub const fn display(&self) -> &'static str {
        match self {
            Self::Eot => "end of text",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::FilenameInChevrons => "<filename>",
            Self::Use => "use",
            Self::Include => "include",
            Self::Module => "module",
            Self::Function => "function",
            Self::If => "if",
            Self::Else => "else",
            Self::For => "for",
            Self::Let => "let",
            Self::Assert => "assert",
            Self::Echo => "echo",
            Self::Each => "each",
            Self::True => "true",
            Self::False => "false",
            Self::Undef => "undef",
            Self::Bang => "!",
            Self::Hash => "#",
            Self::Percent => "%",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Equal => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::QuestionMark => "?",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::CodeFile;

    fn token_at(source: &str, start: usize, end: usize, kind: TokenKind) -> Token {
        let file = CodeFile::new("t.scad", source);
        Token::new(
            kind,
            CodeSpan::new(file.location_at(start), file.location_at(end)),
            Vec::new(),
        )
    }

    #[test]
    fn test_keyword_lookup_covers_all_keywords() {
        for word in [
            "use", "include", "module", "function", "if", "else", "for", "let", "assert",
            "echo", "each", "true", "false", "undef",
        ] {
            let kind = TokenKind::keyword(word).expect("keyword");
            assert!(kind.is_keyword());
            assert_eq!(kind.display(), word);
        }
    }

    #[test]
    fn test_special_variable_is_not_keyword() {
        assert_eq!(TokenKind::keyword("$fn"), None);
    }

    #[test]
    fn test_tags() {
        assert!(TokenKind::Bang.is_tag());
        assert!(TokenKind::Star.is_tag());
        assert!(!TokenKind::Slash.is_tag());
    }

    #[test]
    fn test_lexeme_is_source_slice() {
        let token = token_at("x = 10;", 4, 6, TokenKind::Number);
        assert_eq!(token.lexeme(), "10");
        assert_eq!(token.pos().offset, 4);
        assert_eq!(token.end().offset, 6);
    }

    #[test]
    fn test_newline_detection() {
        let file = CodeFile::new("t.scad", "\nx");
        let newline = ExtraToken::new(
            ExtraTokenKind::NewLine,
            CodeSpan::new(file.location_at(0), file.location_at(1)),
        );
        let token = Token::new(
            TokenKind::Identifier,
            CodeSpan::new(file.location_at(1), file.location_at(2)),
            vec![newline],
        );
        assert!(token.has_newline_before());
        assert!(!token.has_comment_before());
        assert_eq!(token.extra_tokens[0].text(), "\n");
    }

    #[test]
    fn test_literal_values() {
        let file = CodeFile::new("t.scad", "\"hi\"");
        let span = CodeSpan::new(file.location_at(0), file.location_at(4));
        let token = Token::literal(
            TokenKind::String,
            span,
            Vec::new(),
            TokenValue::String("hi".to_string()),
        );
        assert_eq!(token.text_value(), Some("hi"));
        assert_eq!(token.number_value(), None);
    }
}
