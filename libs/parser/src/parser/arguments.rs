//! # Argument List Parsing
//!
//! Parses parenthesized argument and parameter lists shared by calls,
//! instantiations, declarations and comprehensions.
//!
//! ## Grammar
//!
//! ```text
//! arguments     = "(" ","* (argument ","*)* ")"
//! argument      = identifier "=" expression
//!               | expression                 (calls only)
//!               | identifier                 (declarations only)
//! for_arguments = ","* (identifier "=" expression ","*)*
//! ```
//!
//! Every comma is kept: leading commas on the list, trailing commas on the
//! argument they follow.

use super::Parser;
use crate::error::{ParsingError, ParsingErrorKind};
use openscad_ast::nodes::{ArgumentListTokens, AssignmentNode, AssignmentRole, AssignmentTokens};
use openscad_ast::token::{TokenKind, TokenRef};
use std::sync::Arc;

type Arguments = Vec<Arc<AssignmentNode>>;

impl<'a> Parser<'a> {
    /// Parse a parenthesized argument list.
    ///
    /// ## Parameters
    ///
    /// - `role`: Role given to every parsed argument. Positional
    ///   expressions are accepted only for [`AssignmentRole::ArgumentAssignment`].
    ///
    /// ## Returns
    ///
    /// The arguments in source order and the list's delimiter tokens.
    pub(super) fn parse_arguments(
        &mut self,
        role: AssignmentRole,
    ) -> Result<(Arguments, ArgumentListTokens), ParsingError> {
        let open = self.consume(TokenKind::LeftParen, "to open argument list")?;
        let leading_commas = self.match_run(TokenKind::Comma);
        let mut args = Vec::new();

        loop {
            match self.peek_kind() {
                TokenKind::RightParen => break,
                TokenKind::Eot => {
                    return Err(self.error_here(ParsingErrorKind::UnterminatedParameterList))
                }
                _ => {}
            }

            let mut arg = self.parse_argument(role)?;
            arg.tokens.trailing_commas = self.match_run(TokenKind::Comma);
            let separated = !arg.tokens.trailing_commas.is_empty();
            args.push(Arc::new(arg));

            if !separated {
                match self.peek_kind() {
                    TokenKind::RightParen => break,
                    TokenKind::Eot => {
                        return Err(self.error_here(ParsingErrorKind::UnterminatedParameterList))
                    }
                    _ => {
                        return Err(self.error_here(
                            ParsingErrorKind::UnexpectedTokenInNamedArguments {
                                found: self.found(),
                            },
                        ))
                    }
                }
            }
        }

        let close = self.consume(TokenKind::RightParen, "to close argument list")?;
        Ok((
            args,
            ArgumentListTokens {
                open,
                leading_commas,
                close,
            },
        ))
    }

    /// Parse a single argument without its trailing commas.
    fn parse_argument(&mut self, role: AssignmentRole) -> Result<AssignmentNode, ParsingError> {
        if self.check(TokenKind::Identifier) && self.peek_kind_at(1) == TokenKind::Equal {
            return self.parse_named_binding(role);
        }

        if role == AssignmentRole::ArgumentAssignment {
            let value = self.expression()?;
            return Ok(AssignmentNode {
                name: None,
                value: Some(value),
                role,
                tokens: AssignmentTokens::default(),
            });
        }

        if self.check(TokenKind::Identifier) {
            let name = self.advance();
            return Ok(Self::binding(role, name, None, None));
        }

        Err(self.error_here(ParsingErrorKind::UnexpectedTokenInNamedArguments {
            found: self.found(),
        }))
    }

    /// Parse `identifier = expression`.
    fn parse_named_binding(&mut self, role: AssignmentRole) -> Result<AssignmentNode, ParsingError> {
        let name = self.consume(TokenKind::Identifier, "in binding")?;
        let equals = self.consume(TokenKind::Equal, "after binding name")?;
        let value = self.expression()?;
        Ok(Self::binding(role, name, Some(equals), Some(value)))
    }

    fn binding(
        role: AssignmentRole,
        name: TokenRef,
        equals: Option<TokenRef>,
        value: Option<openscad_ast::nodes::Expression>,
    ) -> AssignmentNode {
        AssignmentNode {
            name: Some(name.lexeme().to_string()),
            value,
            role,
            tokens: AssignmentTokens {
                name: Some(name),
                equals,
                ..AssignmentTokens::default()
            },
        }
    }

    /// Parse the bindings of a `for (...)` header.
    ///
    /// Stops before `;` or `)`, which the caller consumes.
    ///
    /// ## Returns
    ///
    /// The bindings and the commas that preceded the first one.
    pub(super) fn parse_for_arguments(&mut self) -> Result<(Arguments, Vec<TokenRef>), ParsingError> {
        let leading_commas = self.match_run(TokenKind::Comma);
        let mut args = Vec::new();

        loop {
            match self.peek_kind() {
                TokenKind::RightParen | TokenKind::Semicolon => break,
                TokenKind::Eot => {
                    return Err(self.error_here(ParsingErrorKind::UnterminatedForLoopParams))
                }
                TokenKind::Identifier if self.peek_kind_at(1) == TokenKind::Equal => {}
                _ => {
                    return Err(self.error_here(ParsingErrorKind::UnexpectedTokenInForLoopParams {
                        found: self.found(),
                    }))
                }
            }

            let mut arg = self.parse_named_binding(AssignmentRole::VariableDeclaration)?;
            arg.tokens.trailing_commas = self.match_run(TokenKind::Comma);
            let separated = !arg.tokens.trailing_commas.is_empty();
            args.push(Arc::new(arg));

            if !separated {
                match self.peek_kind() {
                    TokenKind::RightParen | TokenKind::Semicolon => break,
                    TokenKind::Eot => {
                        return Err(self.error_here(ParsingErrorKind::UnterminatedForLoopParams))
                    }
                    _ => {
                        return Err(self.error_here(
                            ParsingErrorKind::UnexpectedTokenInForLoopParams {
                                found: self.found(),
                            },
                        ))
                    }
                }
            }
        }

        Ok((args, leading_commas))
    }
}

// =============================================================================
// TESTS
// =============================================================================
