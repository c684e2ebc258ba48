//! # Primary Expression Parsing
//!
//! Parses primary expressions: literals, identifiers, parenthesized expressions.
//!
//! ## Responsibilities
//!
//! - Number literals: `42`, `1e-9`
//! - String literals: `"hello"`
//! - Boolean literals: `true`, `false`
//! - Undef: `undef`
//! - Identifiers: `x`, `$fn`
//! - Call-like keywords: `let(...)`, `assert(...)`, `echo(...)`
//! - Function literals: `function (x) x * 2`
//! - Parenthesized expressions: `(1 + 2)`
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_primary()?;
//! ```

use super::Parser;
use crate::error::{ParsingError, ParsingErrorKind};
use openscad_ast::nodes::{
    AnonymousFunctionExpr, AnonymousFunctionTokens, AssignmentRole, CallLikeExpr,
    CallLikeTokens, Expression, GroupingExpr, LiteralExpr, LiteralTokens, LiteralValue,
    LookupExpr, LookupTokens, ParenTokens,
};
use openscad_ast::token::{TokenKind, TokenRef};
use std::sync::Arc;

impl<'a> Parser<'a> {
    /// Parse primary expression.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// primary = number | string | boolean | undef | identifier
    ///         | ("let" | "assert" | "echo") "(" args ")" expression?
    ///         | "function" "(" params ")" expression
    ///         | vector | range | "(" expression ")"
    /// ```
    pub(super) fn parse_primary(&mut self) -> Result<Expression, ParsingError> {
        match self.peek_kind() {
            TokenKind::Number => {
                let literal = self.advance();
                let value = literal.number_value().unwrap_or(f64::NAN);
                Ok(Self::literal(LiteralValue::Number(value), literal))
            }
            TokenKind::String => {
                let literal = self.advance();
                let value = literal.text_value().unwrap_or_default().to_string();
                Ok(Self::literal(LiteralValue::String(value), literal))
            }
            TokenKind::True => Ok(Self::literal(LiteralValue::Boolean(true), self.advance())),
            TokenKind::False => Ok(Self::literal(LiteralValue::Boolean(false), self.advance())),
            TokenKind::Undef => Ok(Self::literal(LiteralValue::Undef, self.advance())),
            TokenKind::Identifier => {
                let identifier = self.advance();
                Ok(Expression::Lookup(Arc::new(LookupExpr {
                    name: identifier.lexeme().to_string(),
                    tokens: LookupTokens { identifier },
                })))
            }
            TokenKind::Let => Ok(Expression::Let(self.parse_call_like(true)?)),
            TokenKind::Assert => Ok(Expression::Assert(self.parse_call_like(false)?)),
            TokenKind::Echo => Ok(Expression::Echo(self.parse_call_like(false)?)),
            TokenKind::Function => self.parse_anonymous_function(),
            TokenKind::LeftBracket => self.parse_vector_or_range(),
            TokenKind::LeftParen => {
                let open = self.advance();
                let inner = self.expression()?;
                let close = self.consume(TokenKind::RightParen, "after grouped expression")?;
                Ok(Expression::Grouping(Arc::new(GroupingExpr {
                    inner,
                    tokens: ParenTokens { open, close },
                })))
            }
            _ => Err(self.error_here(ParsingErrorKind::FailedToMatchPrimaryExpression {
                found: self.found(),
            })),
        }
    }

    fn literal(value: LiteralValue, literal: TokenRef) -> Expression {
        Expression::Literal(Arc::new(LiteralExpr {
            value,
            tokens: LiteralTokens { literal },
        }))
    }

    /// Parse `let`, `assert` or `echo` followed by an argument list.
    ///
    /// ## Parameters
    ///
    /// - `body_required`: Whether an expression must follow the arguments
    ///
    /// `let` binds names and always has a body; `assert` and `echo` take one
    /// only when the next token can start an expression.
    fn parse_call_like(&mut self, body_required: bool) -> Result<Arc<CallLikeExpr>, ParsingError> {
        let keyword = self.advance();
        let role = if keyword.kind == TokenKind::Let {
            AssignmentRole::VariableDeclaration
        } else {
            AssignmentRole::ArgumentAssignment
        };
        let (args, arg_tokens) = self.parse_arguments(role)?;
        let expr = if body_required || self.can_start_expression() {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(Arc::new(CallLikeExpr {
            args,
            expr,
            tokens: CallLikeTokens {
                keyword,
                args: arg_tokens,
            },
        }))
    }

    /// Parse a function literal.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// anonymous_function = "function" "(" params ")" expression
    /// ```
    fn parse_anonymous_function(&mut self) -> Result<Expression, ParsingError> {
        let function_keyword = self.consume(TokenKind::Function, "in function literal")?;
        let (definition_args, args) = self.parse_arguments(AssignmentRole::ArgumentDeclaration)?;
        let expr = self.expression()?;
        Ok(Expression::AnonymousFunction(Arc::new(AnonymousFunctionExpr {
            definition_args,
            expr,
            tokens: AnonymousFunctionTokens {
                function_keyword,
                args,
            },
        })))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::{parse_expr, parse_with_errors};
    use openscad_ast::nodes::{AssignmentRole, Expression, LiteralValue};

    fn literal_value(source: &str) -> LiteralValue {
        match parse_expr(source) {
            Expression::Literal(lit) => lit.value.clone(),
            other => panic!("expected literal, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(literal_value("42"), LiteralValue::Number(42.0));
    }

    #[test]
    fn test_parse_negative_exponent_number() {
        assert_eq!(literal_value("1e-9"), LiteralValue::Number(1e-9));
    }

    #[test]
    fn test_parse_string_is_decoded() {
        assert_eq!(
            literal_value(r#""a\tb""#),
            LiteralValue::String("a\tb".to_string())
        );
    }

    #[test]
    fn test_parse_keywords_literals() {
        assert_eq!(literal_value("true"), LiteralValue::Boolean(true));
        assert_eq!(literal_value("false"), LiteralValue::Boolean(false));
        assert_eq!(literal_value("undef"), LiteralValue::Undef);
    }

    #[test]
    fn test_parse_special_variable() {
        let Expression::Lookup(lookup) = parse_expr("$fn") else {
            panic!("expected lookup");
        };
        assert_eq!(lookup.name, "$fn");
    }

    #[test]
    fn test_parse_grouping() {
        let Expression::Grouping(group) = parse_expr("(1 + 2)") else {
            panic!("expected grouping");
        };
        assert!(matches!(group.inner, Expression::BinaryOp(_)));
    }

    #[test]
    fn test_parse_let_expression() {
        let Expression::Let(expr) = parse_expr("let(a = 1, b = 2) a + b") else {
            panic!("expected let");
        };
        assert_eq!(expr.args.len(), 2);
        assert_eq!(expr.args[0].role, AssignmentRole::VariableDeclaration);
        assert!(expr.expr.is_some());
    }

    #[test]
    fn test_parse_assert_without_body() {
        let Expression::Assert(expr) = parse_expr("assert(x > 0, \"positive\")") else {
            panic!("expected assert");
        };
        assert_eq!(expr.args.len(), 2);
        assert!(expr.expr.is_none());
    }

    #[test]
    fn test_parse_echo_with_body() {
        let Expression::Echo(expr) = parse_expr("echo(\"v\", v) v * 2") else {
            panic!("expected echo");
        };
        assert!(matches!(expr.expr, Some(Expression::BinaryOp(_))));
    }

    #[test]
    fn test_parse_anonymous_function() {
        let Expression::AnonymousFunction(func) = parse_expr("function (x, y = 2) x * y") else {
            panic!("expected function literal");
        };
        assert_eq!(func.definition_args.len(), 2);
        assert_eq!(func.definition_args[0].name.as_deref(), Some("x"));
        assert!(func.definition_args[0].value.is_none());
    }

    #[test]
    fn test_failed_primary_is_reported() {
        let (_, errors) = parse_with_errors("x = ;");
        assert_eq!(
            errors.errors()[0].class_name(),
            "FailedToMatchPrimaryExpressionError"
        );
    }
}
