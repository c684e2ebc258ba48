//! # List Comprehension Parsing
//!
//! Parses the elements allowed inside `[ ... ]`: plain expressions and the
//! generator forms `for`, C-style `for`, `let`, `each` and `if`/`else`.
//!
//! ## Grammar
//!
//! ```text
//! element = "for" "(" for_arguments ")" element
//!         | "for" "(" for_arguments ";" expression ";" for_arguments ")" element
//!         | "let" "(" arguments ")" element
//!         | "each" element
//!         | "if" "(" expression ")" element ("else" element)?
//!         | "(" comprehension ")"
//!         | expression
//! ```

use super::Parser;
use crate::error::ParsingError;
use openscad_ast::nodes::{
    ArgumentListTokens, AssignmentRole, Expression, GroupingExpr, LcEachExpr, LcEachTokens,
    LcForCExpr, LcForCTokens, LcForExpr, LcForTokens, LcIfExpr, LcIfTokens, LcLetExpr,
    LcLetTokens, ParenTokens,
};
use openscad_ast::token::TokenKind;
use std::sync::Arc;

fn is_comprehension_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::For | TokenKind::Let | TokenKind::Each | TokenKind::If
    )
}

impl<'a> Parser<'a> {
    /// Whether the current token begins a comprehension element.
    pub(super) fn starts_comprehension(&self) -> bool {
        is_comprehension_keyword(self.peek_kind())
            || (self.check(TokenKind::LeftParen) && is_comprehension_keyword(self.peek_kind_at(1)))
    }

    /// Parse one vector element.
    pub(super) fn parse_element(&mut self) -> Result<Expression, ParsingError> {
        self.with_stack(|parser| match parser.peek_kind() {
            TokenKind::For => parser.parse_lc_for(),
            TokenKind::Let => parser.parse_lc_let(),
            TokenKind::Each => parser.parse_lc_each(),
            TokenKind::If => parser.parse_lc_if(),
            TokenKind::LeftParen if is_comprehension_keyword(parser.peek_kind_at(1)) => {
                let open = parser.advance();
                let inner = parser.parse_element()?;
                let close = parser.consume(TokenKind::RightParen, "after grouped comprehension")?;
                Ok(Expression::Grouping(Arc::new(GroupingExpr {
                    inner,
                    tokens: ParenTokens { open, close },
                })))
            }
            _ => parser.expression(),
        })
    }

    /// Parse `for (...) element`, in either form.
    fn parse_lc_for(&mut self) -> Result<Expression, ParsingError> {
        let for_keyword = self.consume(TokenKind::For, "in comprehension")?;
        let open = self.consume(TokenKind::LeftParen, "after 'for'")?;
        let (args, init_leading_commas) = self.parse_for_arguments()?;

        if let Some(first_semicolon) = self.match_token(TokenKind::Semicolon) {
            let cond = self.expression()?;
            let second_semicolon =
                self.consume(TokenKind::Semicolon, "after for loop condition")?;
            let (incr_args, incr_leading_commas) = self.parse_for_arguments()?;
            let close = self.consume(TokenKind::RightParen, "to close for loop parameters")?;
            let expr = self.parse_element()?;
            return Ok(Expression::LcForC(Arc::new(LcForCExpr {
                args,
                cond,
                incr_args,
                expr,
                tokens: LcForCTokens {
                    for_keyword,
                    open,
                    init_leading_commas,
                    first_semicolon,
                    second_semicolon,
                    incr_leading_commas,
                    close,
                },
            })));
        }

        let close = self.consume(TokenKind::RightParen, "to close for loop parameters")?;
        let expr = self.parse_element()?;
        Ok(Expression::LcFor(Arc::new(LcForExpr {
            args,
            expr,
            tokens: LcForTokens {
                for_keyword,
                args: ArgumentListTokens {
                    open,
                    leading_commas: init_leading_commas,
                    close,
                },
            },
        })))
    }

    /// Parse `let (...) element`.
    fn parse_lc_let(&mut self) -> Result<Expression, ParsingError> {
        let let_keyword = self.consume(TokenKind::Let, "in comprehension")?;
        let (args, arg_tokens) = self.parse_arguments(AssignmentRole::VariableDeclaration)?;
        let expr = self.parse_element()?;
        Ok(Expression::LcLet(Arc::new(LcLetExpr {
            args,
            expr,
            tokens: LcLetTokens {
                let_keyword,
                args: arg_tokens,
            },
        })))
    }

    /// Parse `each element`.
    fn parse_lc_each(&mut self) -> Result<Expression, ParsingError> {
        let each_keyword = self.consume(TokenKind::Each, "in comprehension")?;
        let expr = self.parse_element()?;
        Ok(Expression::LcEach(Arc::new(LcEachExpr {
            expr,
            tokens: LcEachTokens { each_keyword },
        })))
    }

    /// Parse `if (cond) element [else element]`.
    fn parse_lc_if(&mut self) -> Result<Expression, ParsingError> {
        let if_keyword = self.consume(TokenKind::If, "in comprehension")?;
        let open = self.consume(TokenKind::LeftParen, "after 'if'")?;
        let cond = self.expression()?;
        let close = self.consume(TokenKind::RightParen, "after if condition")?;
        let if_expr = self.parse_element()?;

        let (else_keyword, else_expr) = match self.match_token(TokenKind::Else) {
            Some(keyword) => (Some(keyword), Some(self.parse_element()?)),
            None => (None, None),
        };

        Ok(Expression::LcIf(Arc::new(LcIfExpr {
            cond,
            if_expr,
            else_expr,
            tokens: LcIfTokens {
                if_keyword,
                open,
                close,
                else_keyword,
            },
        })))
    }
}

// =============================================================================
// TESTS
// =============================================================================
