//! # OpenSCAD Parser
//!
//! Recursive descent parser producing the lossless AST.
//!
//! Statement-level constructs are parsed through
//! [`Parser::statement_or_recover`]: a failure inside one statement is
//! recorded in the [`ErrorCollector`], the parser skips to the next statement
//! boundary, and the skipped tokens become an [`ErrorNode`]. Failures inside
//! an expression propagate as `Err` up to that boundary.
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::span::CodeFile;
//! use openscad_parser::error::ErrorCollector;
//! use openscad_parser::lexer::Lexer;
//! use openscad_parser::parser::Parser;
//!
//! let file = CodeFile::new("a.scad", "cube(10);");
//! let tokens = Lexer::new(file.clone()).scan().unwrap();
//! let mut errors = ErrorCollector::new();
//! let root = Parser::new(&file, tokens, &mut errors).parse();
//! assert_eq!(root.statements.len(), 1);
//! assert!(!errors.has_errors());
//! ```

mod arguments;
mod collections;
mod comprehensions;
mod control_flow;
mod declarations;
mod expressions;
mod module_call;
mod operators;
mod postfix;
mod primaries;
mod statements;

use crate::error::{ErrorCollector, ParsingError, ParsingErrorKind};
use openscad_ast::nodes::{ErrorNode, ScadFile, ScadFileTokens, Statement};
use openscad_ast::span::{CodeFile, CodeSpan};
use openscad_ast::token::{Token, TokenKind, TokenRef};
use std::sync::Arc;
use tracing::{debug, trace};

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for OpenSCAD.
pub struct Parser<'a> {
    /// Token stream; never empty and always ends with `Eot`.
    tokens: Vec<TokenRef>,
    /// Current token index.
    current: usize,
    /// Collector receiving recovered errors.
    errors: &'a mut ErrorCollector,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    ///
    /// ## Parameters
    ///
    /// - `file`: File the tokens were scanned from
    /// - `tokens`: Tokens from the lexer
    /// - `errors`: Collector receiving every reported error
    ///
    /// An `Eot` token at the end of `file` is appended when `tokens` does not
    /// already end with one.
    pub fn new(file: &Arc<CodeFile>, tokens: Vec<Token>, errors: &'a mut ErrorCollector) -> Self {
        let mut tokens: Vec<TokenRef> = tokens.into_iter().map(Arc::new).collect();
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eot) {
            let end = file.location_at(file.content().len());
            tokens.push(Arc::new(Token::new(
                TokenKind::Eot,
                CodeSpan::empty_at(end),
                Vec::new(),
            )));
        }
        Self {
            tokens,
            current: 0,
            errors,
        }
    }

    /// Parse the entire token stream into a file.
    ///
    /// Never fails: broken statements become [`ErrorNode`]s and their errors
    /// are reported to the collector.
    pub fn parse(&mut self) -> ScadFile {
        trace!(tokens = self.tokens.len(), "parsing file");
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.statement_or_recover());
        }
        ScadFile {
            statements,
            tokens: ScadFileTokens {
                eot: Arc::clone(self.peek()),
            },
        }
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token.
    fn peek(&self) -> &TokenRef {
        let index = self.current.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Get the kind of the token `n` positions ahead.
    fn peek_kind_at(&self, n: usize) -> TokenKind {
        let index = (self.current + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// Check if current token matches kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if at end of text.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eot
    }

    /// Advance to next token.
    ///
    /// ## Returns
    ///
    /// The token that was consumed. At the end of text the `Eot` token is
    /// returned without advancing.
    fn advance(&mut self) -> TokenRef {
        let token = Arc::clone(self.peek());
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consume a token of the expected kind.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Expected token kind
    /// - `context`: What was being parsed, for the error message
    fn consume(&mut self, kind: TokenKind, context: &str) -> Result<TokenRef, ParsingError> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error_here(ParsingErrorKind::Consume {
            expected: kind,
            found: self.found(),
            context: context.to_string(),
        }))
    }

    /// Consume the current token if it matches.
    fn match_token(&mut self, kind: TokenKind) -> Option<TokenRef> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a run of tokens of one kind.
    fn match_run(&mut self, kind: TokenKind) -> Vec<TokenRef> {
        let mut run = Vec::new();
        while let Some(token) = self.match_token(kind) {
            run.push(token);
        }
        run
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    /// Text of the current token, for error messages.
    fn found(&self) -> String {
        match self.peek_kind() {
            TokenKind::Eot => TokenKind::Eot.display().to_string(),
            _ => self.peek().lexeme().to_string(),
        }
    }

    /// Create an error located at the current token.
    fn error_here(&self, kind: ParsingErrorKind) -> ParsingError {
        ParsingError::new(kind, self.peek().pos().clone())
    }

    /// Record an error without aborting the current construct.
    fn report(&mut self, error: ParsingError) {
        self.errors.report(error);
    }

    // =========================================================================
    // ERROR RECOVERY
    // =========================================================================

    /// Parse one statement, recovering from a failure.
    ///
    /// On failure the error is reported, the parser synchronizes, and the
    /// tokens from the start of the statement through the skip point are
    /// returned as an [`ErrorNode`].
    fn statement_or_recover(&mut self) -> Statement {
        let start = self.current;
        match self.statement() {
            Ok(stmt) => stmt,
            Err(error) => {
                let pos = error.pos.clone();
                debug!(
                    class = error.kind.class_name(),
                    location = %pos,
                    "recovering from statement error"
                );
                self.report(error);
                self.synchronize(start);
                let skipped = self.tokens[start..self.current].to_vec();
                debug!(skipped = skipped.len(), "resynchronized");
                Statement::Error(Arc::new(ErrorNode {
                    tokens: skipped,
                    pos,
                }))
            }
        }
    }

    /// Skip to the next statement boundary.
    ///
    /// Skips the failing token when the statement consumed nothing, then
    /// stops after a `;` or before `}`, `module`, `function`, `use`,
    /// `include` or the end of text.
    fn synchronize(&mut self, start: usize) {
        if self.current == start {
            self.advance();
        }
        loop {
            if self.current > start && self.tokens[self.current - 1].kind == TokenKind::Semicolon {
                return;
            }
            match self.peek_kind() {
                TokenKind::RightBrace
                | TokenKind::Module
                | TokenKind::Function
                | TokenKind::Use
                | TokenKind::Include
                | TokenKind::Eot => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{parse_ok, parse_with_errors};

    #[test]
    fn test_parse_empty() {
        let root = parse_ok("");
        assert!(root.statements.is_empty());
        assert_eq!(root.tokens.eot.kind, TokenKind::Eot);
    }

    #[test]
    fn test_parse_multiple_statements() {
        let root = parse_ok("cube(10); sphere(5);");
        assert_eq!(root.statements.len(), 2);
    }

    #[test]
    fn test_parse_recovers_from_error() {
        let (root, errors) = parse_with_errors("cube(; sphere(5);");
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(root.statements.len(), 2);
        assert!(matches!(root.statements[0], Statement::Error(_)));
        assert!(matches!(root.statements[1], Statement::ModuleInstantiation(_)));
    }

    #[test]
    fn test_error_node_keeps_skipped_tokens() {
        let (root, _) = parse_with_errors("x = ;\ny = 2;");
        let Statement::Error(node) = &root.statements[0] else {
            panic!("expected error node");
        };
        let lexemes: Vec<_> = node.tokens.iter().map(|t| t.lexeme()).collect();
        assert_eq!(lexemes, vec!["x", "=", ";"]);
        assert_eq!(node.pos.offset, 4);
        assert!(matches!(root.statements[1], Statement::Assignment(_)));
    }

    #[test]
    fn test_recovery_stops_before_declaration() {
        let (root, errors) = parse_with_errors("x = (1 module m() {}");
        assert_eq!(errors.errors().len(), 1);
        assert!(matches!(root.statements[1], Statement::ModuleDeclaration(_)));
    }

    #[test]
    fn test_stray_closing_brace_is_skipped() {
        let (root, errors) = parse_with_errors("} cube();");
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(root.statements.len(), 2);
    }

    #[test]
    fn test_missing_eot_is_synthesized() {
        let file = CodeFile::new("t.scad", "");
        let mut errors = ErrorCollector::new();
        let root = Parser::new(&file, Vec::new(), &mut errors).parse();
        assert_eq!(root.tokens.eot.kind, TokenKind::Eot);
    }
}
