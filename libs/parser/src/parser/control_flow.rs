//! # Control Flow Parsing
//!
//! Parses `if`/`else` statements.
//!
//! `for`, `let` and friends are ordinary module instantiations at statement
//! level and are handled in `module_call`.
//!
//! ## Example
//!
//! ```rust,ignore
//! let stmt = parser.parse_if_else(Vec::new())?;
//! ```

use super::Parser;
use crate::error::ParsingError;
use openscad_ast::nodes::{IfElseStatement, IfElseTokens, InstantiationTags, Statement};
use openscad_ast::token::{TokenKind, TokenRef};
use std::sync::Arc;

impl<'a> Parser<'a> {
    /// Parse if/else statement.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// if_else = tag* "if" "(" expression ")" child ("else" child)?
    /// ```
    ///
    /// ## Parameters
    ///
    /// - `tags`: Tag tokens already consumed before `if`
    ///
    /// ## Example
    ///
    /// ```text
    /// if (x > 0) cube(x);
    /// if (a) { cube(); } else if (b) sphere(); else cylinder();
    /// ```
    pub(super) fn parse_if_else(&mut self, tags: Vec<TokenRef>) -> Result<Statement, ParsingError> {
        let if_keyword = self.consume(TokenKind::If, "in if statement")?;
        let open = self.consume(TokenKind::LeftParen, "after 'if'")?;
        let cond = self.expression()?;
        let close = self.consume(TokenKind::RightParen, "after if condition")?;
        let then_branch = self.child_statement()?;

        let (else_keyword, else_branch) = match self.match_token(TokenKind::Else) {
            Some(keyword) => (Some(keyword), Some(self.child_statement()?)),
            None => (None, None),
        };

        Ok(Statement::IfElse(Arc::new(IfElseStatement {
            cond,
            then_branch,
            else_branch,
            tags: InstantiationTags::from_tokens(&tags),
            tokens: IfElseTokens {
                tags,
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
