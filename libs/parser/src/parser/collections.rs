//! # Collection Parsing
//!
//! Parses vector and range expressions.
//!
//! ## Responsibilities
//!
//! - Vector literals: `[1, 2, 3]`, with comprehension elements
//! - Range expressions: `[0:10]`, `[0:2:10]`
//!
//! Commas are kept exactly as written: a run before the first element, and
//! one run after each element.
//!
//! ## Example
//!
//! ```rust,ignore
//! let expr = parser.parse_vector_or_range()?;
//! ```

use super::Parser;
use crate::error::{ParsingError, ParsingErrorKind};
use openscad_ast::nodes::{Expression, RangeExpr, RangeTokens, VectorExpr, VectorTokens};
use openscad_ast::token::{TokenKind, TokenRef};
use std::sync::Arc;

impl<'a> Parser<'a> {
    /// Parse vector or range.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// vector = "[" ","* "]"
    ///        | "[" element ("," ","* element)* ","* "]"
    /// range  = "[" expression ":" expression (":" expression)? "]"
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// []                  // empty vector
    /// [1, 2, 3,]          // vector with trailing comma
    /// [0:10]              // range (begin:end)
    /// [0:2:10]            // range (begin:step:end)
    /// [for (i = x) i]     // list comprehension
    /// ```
    pub(super) fn parse_vector_or_range(&mut self) -> Result<Expression, ParsingError> {
        let open = self.consume(TokenKind::LeftBracket, "to open vector")?;
        let leading_commas = self.match_run(TokenKind::Comma);

        if self.check(TokenKind::RightBracket) {
            let close = self.advance();
            return Ok(Self::vector(open, leading_commas, Vec::new(), Vec::new(), close));
        }
        if !leading_commas.is_empty() {
            return Err(self.error_here(ParsingErrorKind::Consume {
                expected: TokenKind::RightBracket,
                found: self.found(),
                context: "after leading commas in vector".to_string(),
            }));
        }

        let comprehension = self.starts_comprehension();
        let first = self.parse_element()?;
        if !comprehension && self.check(TokenKind::Colon) {
            return self.parse_range(open, first);
        }

        self.parse_vector_rest(open, leading_commas, first)
    }

    /// Parse the remaining vector elements after the first.
    fn parse_vector_rest(
        &mut self,
        open: TokenRef,
        leading_commas: Vec<TokenRef>,
        first: Expression,
    ) -> Result<Expression, ParsingError> {
        let mut children = vec![first];
        let mut commas = Vec::new();

        loop {
            let run = self.match_run(TokenKind::Comma);
            let separated = !run.is_empty();
            commas.push(run);

            match self.peek_kind() {
                TokenKind::RightBracket => break,
                TokenKind::Eot => {
                    return Err(self.error_here(ParsingErrorKind::UnterminatedVector));
                }
                _ if !separated => {
                    return Err(self.error_here(ParsingErrorKind::Consume {
                        expected: TokenKind::RightBracket,
                        found: self.found(),
                        context: "at end of vector".to_string(),
                    }));
                }
                _ => children.push(self.parse_element()?),
            }
        }

        let close = self.consume(TokenKind::RightBracket, "to close vector")?;
        Ok(Self::vector(open, leading_commas, children, commas, close))
    }

    fn vector(
        open: TokenRef,
        leading_commas: Vec<TokenRef>,
        children: Vec<Expression>,
        commas: Vec<Vec<TokenRef>>,
        close: TokenRef,
    ) -> Expression {
        Expression::Vector(Arc::new(VectorExpr {
            children,
            tokens: VectorTokens {
                open,
                leading_commas,
                commas,
                close,
            },
        }))
    }

    /// Parse range (after begin).
    ///
    /// ## Grammar
    ///
    /// ```text
    /// range = "[" begin ":" end "]"
    ///       | "[" begin ":" step ":" end "]"
    /// ```
    fn parse_range(&mut self, open: TokenRef, begin: Expression) -> Result<Expression, ParsingError> {
        let first_colon = self.consume(TokenKind::Colon, "in range")?;
        let second = self.expression()?;

        let (step, second_colon, end) = match self.match_token(TokenKind::Colon) {
            Some(colon) => (Some(second), Some(colon), self.expression()?),
            None => (None, None, second),
        };

        let close = self.consume(TokenKind::RightBracket, "to close range")?;
        Ok(Expression::Range(Arc::new(RangeExpr {
            begin,
            step,
            end,
            tokens: RangeTokens {
                open,
                first_colon,
                second_colon,
                close,
            },
        })))
    }
}

// =============================================================================
// TESTS
// =============================================================================
