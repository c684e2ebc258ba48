//! # Postfix Expression Parsing
//!
//! Parses postfix expressions: function calls, index access, member access.
//!
//! ## Responsibilities
//!
//! - Function calls: `sin(x)`
//! - Index access: `arr[0]`
//! - Member access: `v.x`
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_postfix()?;
//! ```

use super::Parser;
use crate::error::ParsingError;
use openscad_ast::nodes::{
    ArrayLookupExpr, AssignmentRole, BracketTokens, Expression, FunctionCallExpr,
    MemberLookupExpr, MemberLookupTokens,
};
use openscad_ast::token::TokenKind;
use std::sync::Arc;

impl<'a> Parser<'a> {
    /// Parse postfix expressions (call, index, dot).
    ///
    /// ## Grammar
    ///
    /// ```text
    /// postfix = primary ("(" args ")" | "[" expr "]" | "." identifier)*
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// sin(x)
    /// arr[0]
    /// vec.x
    /// func(a)(b)
    /// arr[i].length
    /// ```
    pub(super) fn parse_postfix(&mut self) -> Result<Expression, ParsingError> {
        let mut expr = self.parse_primary()?;

        loop {
            expr = match self.peek_kind() {
                TokenKind::LeftParen => self.parse_function_call(expr)?,
                TokenKind::LeftBracket => self.parse_index_access(expr)?,
                TokenKind::Dot => self.parse_member_access(expr)?,
                _ => break,
            };
        }

        Ok(expr)
    }

    /// Parse function call arguments after the callee.
    fn parse_function_call(&mut self, callee: Expression) -> Result<Expression, ParsingError> {
        let (args, tokens) = self.parse_arguments(AssignmentRole::ArgumentAssignment)?;
        Ok(Expression::FunctionCall(Arc::new(FunctionCallExpr {
            callee,
            args,
            tokens,
        })))
    }

    /// Parse `[index]` after an expression.
    fn parse_index_access(&mut self, array: Expression) -> Result<Expression, ParsingError> {
        let open = self.consume(TokenKind::LeftBracket, "in index expression")?;
        let index = self.expression()?;
        let close = self.consume(TokenKind::RightBracket, "after index expression")?;
        Ok(Expression::ArrayLookup(Arc::new(ArrayLookupExpr {
            array,
            index,
            tokens: BracketTokens { open, close },
        })))
    }

    /// Parse `.member` after an expression.
    fn parse_member_access(&mut self, expr: Expression) -> Result<Expression, ParsingError> {
        let dot = self.consume(TokenKind::Dot, "in member access")?;
        let member = self.consume(TokenKind::Identifier, "after '.'")?;
        Ok(Expression::MemberLookup(Arc::new(MemberLookupExpr {
            expr,
            member: member.lexeme().to_string(),
            tokens: MemberLookupTokens { dot, member },
        })))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::{parse_expr, parse_with_errors};
    use openscad_ast::nodes::Expression;

    #[test]
    fn test_parse_function_call() {
        let Expression::FunctionCall(call) = parse_expr("sin(x)") else {
            panic!("expected function call");
        };
        assert!(matches!(call.callee, Expression::Lookup(_)));
        assert_eq!(call.args.len(), 1);
    }

    #[test]
    fn test_parse_index_access() {
        let Expression::ArrayLookup(lookup) = parse_expr("arr[0]") else {
            panic!("expected array lookup");
        };
        assert!(matches!(lookup.index, Expression::Literal(_)));
    }

    #[test]
    fn test_parse_member_access() {
        let Expression::MemberLookup(lookup) = parse_expr("v.x") else {
            panic!("expected member lookup");
        };
        assert_eq!(lookup.member, "x");
    }

    #[test]
    fn test_parse_chained_postfix() {
        let Expression::MemberLookup(outer) = parse_expr("f(a)(b)[i].len") else {
            panic!("expected member lookup");
        };
        let Expression::ArrayLookup(index) = &outer.expr else {
            panic!("expected array lookup");
        };
        let Expression::FunctionCall(call) = &index.array else {
            panic!("expected call");
        };
        assert!(matches!(call.callee, Expression::FunctionCall(_)));
    }

    #[test]
    fn test_member_requires_identifier() {
        let (_, errors) = parse_with_errors("x = v.1;");
        assert_eq!(errors.errors().len(), 1);
        assert_eq!(errors.errors()[0].class_name(), "ConsumptionError");
    }
}
