//! # Operator Parsing
//!
//! Parses binary and unary operators using precedence climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | ?: (ternary) | Right |
//! | 2 | \|\| | Left |
//! | 3 | && | Left |
//! | 4 | == != | Left |
//! | 5 | < > <= >= | Left |
//! | 6 | + - | Left |
//! | 7 | * / % | Left |
//! | 8 | ! - + (unary) | Right |
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_precedence(Precedence::Ternary)?;
//! ```

use super::Parser;
use crate::error::{ParsingError, ParsingErrorKind};
use openscad_ast::nodes::{
    BinaryOpExpr, BinaryOperator, Expression, OperatorTokens, TernaryExpr, TernaryTokens,
    UnaryOpExpr, UnaryOperator,
};
use openscad_ast::token::TokenKind;
use std::sync::Arc;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Ternary: `?:`
    Ternary = 1,
    /// Logical or: `||`
    Or = 2,
    /// Logical and: `&&`
    And = 3,
    /// Equality: `== !=`
    Equality = 4,
    /// Comparison: `< > <= >=`
    Comparison = 5,
    /// Addition/subtraction: `+ -`
    Term = 6,
    /// Multiplication/division: `* / %`
    Factor = 7,
    /// Unary: `! - +`
    Unary = 8,
}

impl Precedence {
    /// Get precedence for binary operator.
    ///
    /// ## Parameters
    ///
    /// - `kind`: Token kind of the operator
    ///
    /// ## Returns
    ///
    /// Precedence level if token is a binary operator, None otherwise
    pub(super) fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::QuestionMark => Some(Self::Ternary),
            TokenKind::Or => Some(Self::Or),
            TokenKind::And => Some(Self::And),
            TokenKind::EqualEqual | TokenKind::BangEqual => Some(Self::Equality),
            TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEqual
            | TokenKind::GreaterEqual => Some(Self::Comparison),
            TokenKind::Plus | TokenKind::Minus => Some(Self::Term),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(Self::Factor),
            _ => None,
        }
    }

    /// Get next higher precedence level.
    ///
    /// Used for left-associative operators.
    pub(super) fn next(&self) -> Self {
        match self {
            Self::Ternary => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Unary,
            Self::Unary => Self::Unary,
        }
    }
}

/// Map an operator token to its binary operation.
fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    let op = match kind {
        TokenKind::Or => BinaryOperator::Or,
        TokenKind::And => BinaryOperator::And,
        TokenKind::EqualEqual => BinaryOperator::Equal,
        TokenKind::BangEqual => BinaryOperator::NotEqual,
        TokenKind::Less => BinaryOperator::Less,
        TokenKind::LessEqual => BinaryOperator::LessEqual,
        TokenKind::Greater => BinaryOperator::Greater,
        TokenKind::GreaterEqual => BinaryOperator::GreaterEqual,
        TokenKind::Plus => BinaryOperator::Add,
        TokenKind::Minus => BinaryOperator::Subtract,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Percent => BinaryOperator::Modulo,
        _ => return None,
    };
    Some(op)
}

/// Map a prefix operator token to its unary operation.
fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Minus => Some(UnaryOperator::Negate),
        TokenKind::Plus => Some(UnaryOperator::Plus),
        TokenKind::Bang => Some(UnaryOperator::Not),
        _ => None,
    }
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl<'a> Parser<'a> {
    /// Parse expression with minimum precedence.
    ///
    /// ## Parameters
    ///
    /// - `min_prec`: Minimum precedence level to parse
    ///
    /// ## Returns
    ///
    /// Parsed expression node
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> Result<Expression, ParsingError> {
        let mut left = self.parse_unary()?;

        while let Some(prec) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }

            if self.check(TokenKind::QuestionMark) {
                left = self.parse_ternary(left)?;
                continue;
            }

            left = self.parse_binary_op(left, prec)?;
        }

        Ok(left)
    }

    /// Parse binary operator.
    fn parse_binary_op(&mut self, left: Expression, prec: Precedence) -> Result<Expression, ParsingError> {
        let operator = self.advance();
        let Some(operation) = binary_operator(operator.kind) else {
            return Err(self.error_here(ParsingErrorKind::UnexpectedToken {
                found: operator.lexeme().to_string(),
            }));
        };
        let right = self.parse_precedence(prec.next())?;

        Ok(Expression::BinaryOp(Arc::new(BinaryOpExpr {
            left,
            operation,
            right,
            tokens: OperatorTokens { operator },
        })))
    }

    /// Parse ternary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// ternary = or_expr "?" expression ":" expression
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// x > 0 ? 1 : 0
    /// ```
    pub(super) fn parse_ternary(&mut self, cond: Expression) -> Result<Expression, ParsingError> {
        let question_mark = self.consume(TokenKind::QuestionMark, "in ternary expression")?;
        let if_expr = self.expression()?;
        let colon = self.consume(TokenKind::Colon, "in ternary expression")?;
        let else_expr = self.expression()?;

        Ok(Expression::Ternary(Arc::new(TernaryExpr {
            cond,
            if_expr,
            else_expr,
            tokens: TernaryTokens {
                question_mark,
                colon,
            },
        })))
    }

    /// Parse unary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// unary = ("!" | "-" | "+") unary | postfix
    /// ```
    pub(super) fn parse_unary(&mut self) -> Result<Expression, ParsingError> {
        if let Some(operation) = unary_operator(self.peek_kind()) {
            let operator = self.advance();
            let right = self.with_stack(|parser| parser.parse_unary())?;

            return Ok(Expression::UnaryOp(Arc::new(UnaryOpExpr {
                operation,
                right,
                tokens: OperatorTokens { operator },
            })));
        }

        self.parse_postfix()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::parse_expr;
    use openscad_ast::nodes::{BinaryOperator, Expression, LiteralValue, UnaryOperator};

    #[test]
    fn test_parse_binary_add() {
        let Expression::BinaryOp(expr) = parse_expr("1 + 2") else {
            panic!("expected binary expression");
        };
        assert_eq!(expr.operation, BinaryOperator::Add);
        assert_eq!(expr.tokens.operator.lexeme(), "+");
    }

    #[test]
    fn test_parse_binary_precedence() {
        let Expression::BinaryOp(expr) = parse_expr("1 + 2 * 3") else {
            panic!("expected binary expression");
        };
        assert_eq!(expr.operation, BinaryOperator::Add);
        assert!(matches!(expr.left, Expression::Literal(_)));
        let Expression::BinaryOp(right) = &expr.right else {
            panic!("expected nested multiplication");
        };
        assert_eq!(right.operation, BinaryOperator::Multiply);
    }

    #[test]
    fn test_parse_left_associative() {
        let Expression::BinaryOp(expr) = parse_expr("10 * 6 / 5") else {
            panic!("expected binary expression");
        };
        assert_eq!(expr.operation, BinaryOperator::Divide);
        let Expression::BinaryOp(left) = &expr.left else {
            panic!("expected nested multiplication");
        };
        assert_eq!(left.operation, BinaryOperator::Multiply);
        let Expression::Literal(right) = &expr.right else {
            panic!("expected literal");
        };
        assert_eq!(right.value, LiteralValue::Number(5.0));
    }

    #[test]
    fn test_parse_unary_neg() {
        let Expression::UnaryOp(expr) = parse_expr("-5") else {
            panic!("expected unary expression");
        };
        assert_eq!(expr.operation, UnaryOperator::Negate);
    }

    #[test]
    fn test_parse_unary_binds_tighter_than_binary() {
        let Expression::BinaryOp(expr) = parse_expr("-a * b") else {
            panic!("expected binary expression");
        };
        assert!(matches!(expr.left, Expression::UnaryOp(_)));
    }

    #[test]
    fn test_parse_unary_not_chain() {
        let Expression::UnaryOp(expr) = parse_expr("!!true") else {
            panic!("expected unary expression");
        };
        assert_eq!(expr.operation, UnaryOperator::Not);
        assert!(matches!(expr.right, Expression::UnaryOp(_)));
    }

    #[test]
    fn test_parse_ternary() {
        let Expression::Ternary(expr) = parse_expr("x > 0 ? 1 : 0") else {
            panic!("expected ternary expression");
        };
        assert!(matches!(expr.cond, Expression::BinaryOp(_)));
    }

    #[test]
    fn test_parse_ternary_right_associative() {
        let Expression::Ternary(expr) = parse_expr("a ? 1 : b ? 2 : 3") else {
            panic!("expected ternary expression");
        };
        assert!(matches!(expr.else_expr, Expression::Ternary(_)));
    }

    #[test]
    fn test_parse_logical_operators() {
        let Expression::BinaryOp(expr) = parse_expr("true && false || true") else {
            panic!("expected binary expression");
        };
        assert_eq!(expr.operation, BinaryOperator::Or);
    }

    #[test]
    fn test_parse_comparison_below_term() {
        let Expression::BinaryOp(expr) = parse_expr("a + 1 <= b % 2") else {
            panic!("expected binary expression");
        };
        assert_eq!(expr.operation, BinaryOperator::LessEqual);
    }
}
