//! # Expression Parsing
//!
//! Facade module for parsing OpenSCAD expressions.
//!
//! ## Module Structure
//!
//! - `operators` - Binary, unary, ternary operators with precedence
//! - `primaries` - Literals, identifiers, call-like keywords
//! - `postfix` - Call, index, member access
//! - `collections` - Vector and range parsing
//! - `comprehensions` - List comprehension elements
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.expression()?;
//! ```

use super::operators::Precedence;
use super::Parser;
use crate::error::ParsingError;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use openscad_ast::nodes::Expression;
use openscad_ast::token::TokenKind;

impl<'a> Parser<'a> {
    /// Parse an expression.
    ///
    /// Entry point for expression parsing. Uses precedence climbing.
    ///
    /// ## Example
    ///
    /// ```text
    /// 1 + 2 * 3
    /// x > 0 ? 1 : 0
    /// [1, 2, 3]
    /// ```
    pub(super) fn expression(&mut self) -> Result<Expression, ParsingError> {
        self.with_stack(|parser| parser.parse_precedence(Precedence::Ternary))
    }

    /// Run a recursive step on a grown stack when the current one runs low.
    pub(super) fn with_stack<T>(&mut self, step: impl FnOnce(&mut Self) -> T) -> T {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || step(self))
    }

    /// Whether the current token can begin an expression.
    pub(super) fn can_start_expression(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Undef
                | TokenKind::Let
                | TokenKind::Assert
                | TokenKind::Echo
                | TokenKind::Function
                | TokenKind::LeftParen
                | TokenKind::LeftBracket
                | TokenKind::Bang
                | TokenKind::Plus
                | TokenKind::Minus
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::parse_expr;
    use openscad_ast::nodes::Expression;

    #[test]
    fn test_expression_dispatch() {
        assert!(matches!(parse_expr("1 + 2 * 3"), Expression::BinaryOp(_)));
    }

    #[test]
    fn test_deeply_nested_expression() {
        let source = format!("{}1{}", "(".repeat(2000), ")".repeat(2000));
        assert!(matches!(parse_expr(&source), Expression::Grouping(_)));
    }
}
