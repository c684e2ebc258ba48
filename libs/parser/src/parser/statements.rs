//! # Statement Parsing
//!
//! Parses OpenSCAD statements and dispatches to the specialized parsers.
//!
//! ## Grammar
//!
//! ```text
//! statement  = ";"
//!            | "{" statement* "}"
//!            | module_declaration | function_declaration
//!            | ("use" | "include") filename ";"?
//!            | identifier "=" expression ";"
//!            | module_instantiation
//! ```

use super::Parser;
use crate::error::{ParsingError, ParsingErrorKind};
use openscad_ast::nodes::{
    AssignmentNode, AssignmentRole, AssignmentTokens, BlockStmt, BlockTokens, FileImportTokens,
    IncludeStmt, NoopStmt, NoopTokens, Statement, UseStmt,
};
use openscad_ast::token::TokenKind;
use std::sync::Arc;

impl<'a> Parser<'a> {
    /// Parse a statement.
    ///
    /// ## Example
    ///
    /// ```text
    /// cube(10);
    /// x = 10;
    /// module m() {}
    /// use <lib.scad>
    /// ```
    pub(super) fn statement(&mut self) -> Result<Statement, ParsingError> {
        match self.peek_kind() {
            TokenKind::Semicolon => {
                let semicolon = self.advance();
                Ok(Statement::Noop(Arc::new(NoopStmt {
                    tokens: NoopTokens { semicolon },
                })))
            }
            TokenKind::LeftBrace => self.parse_block(),
            TokenKind::Module => self.parse_module_declaration(),
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::Use | TokenKind::Include => self.parse_file_import(),
            TokenKind::Identifier => match self.peek_kind_at(1) {
                TokenKind::Equal => self.parse_assignment(),
                TokenKind::LeftParen => self.parse_module_instantiation(),
                _ => {
                    self.advance();
                    Err(self.error_here(ParsingErrorKind::UnexpectedTokenAfterIdentifier {
                        found: self.found(),
                    }))
                }
            },
            kind if kind.is_tag() || kind == TokenKind::If || kind.is_keyword_module_name() => {
                self.parse_module_instantiation()
            }
            _ => Err(self.error_here(ParsingErrorKind::UnexpectedToken {
                found: self.found(),
            })),
        }
    }

    /// Parse block statement.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// block = "{" statement* "}"
    /// ```
    pub(super) fn parse_block(&mut self) -> Result<Statement, ParsingError> {
        let open = self.consume(TokenKind::LeftBrace, "to open block")?;
        let mut children = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            children.push(self.statement_or_recover());
        }
        let close = self.consume(TokenKind::RightBrace, "to close block")?;
        Ok(Statement::Block(Arc::new(BlockStmt {
            children,
            tokens: BlockTokens { open, close },
        })))
    }

    /// Parse `use <file>` or `include <file>`.
    ///
    /// The trailing semicolon is optional.
    fn parse_file_import(&mut self) -> Result<Statement, ParsingError> {
        let keyword = self.advance();
        let Some(filename) = self.match_token(TokenKind::FilenameInChevrons) else {
            return Err(self.error_here(ParsingErrorKind::UnterminatedUse {
                keyword: keyword.lexeme().to_string(),
            }));
        };
        let semicolon = self.match_token(TokenKind::Semicolon);
        let path = filename.text_value().unwrap_or_default().to_string();
        let is_use = keyword.kind == TokenKind::Use;
        let tokens = FileImportTokens {
            keyword,
            filename,
            semicolon,
        };

        Ok(if is_use {
            Statement::Use(Arc::new(UseStmt {
                filename: path,
                tokens,
            }))
        } else {
            Statement::Include(Arc::new(IncludeStmt {
                filename: path,
                tokens,
            }))
        })
    }

    /// Parse assignment statement.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// assignment = identifier "=" expression ";"
    /// ```
    fn parse_assignment(&mut self) -> Result<Statement, ParsingError> {
        let name = self.consume(TokenKind::Identifier, "in assignment")?;
        let equals = self.consume(TokenKind::Equal, "in assignment")?;
        let value = self.expression()?;
        let semicolon = self.consume(TokenKind::Semicolon, "after assignment")?;

        Ok(Statement::Assignment(Arc::new(AssignmentNode {
            name: Some(name.lexeme().to_string()),
            value: Some(value),
            role: AssignmentRole::VariableDeclaration,
            tokens: AssignmentTokens {
                name: Some(name),
                equals: Some(equals),
                trailing_commas: Vec::new(),
                semicolon: Some(semicolon),
            },
        })))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::{parse_ok, parse_with_errors};
    use openscad_ast::nodes::{AssignmentRole, Statement};

    #[test]
    fn test_parse_assignment() {
        let root = parse_ok("x = 10;");
        let Statement::Assignment(assignment) = &root.statements[0] else {
            panic!("expected assignment");
        };
        assert_eq!(assignment.name.as_deref(), Some("x"));
        assert_eq!(assignment.role, AssignmentRole::VariableDeclaration);
        assert!(assignment.tokens.semicolon.is_some());
    }

    #[test]
    fn test_parse_noop() {
        let root = parse_ok(";;");
        assert_eq!(root.statements.len(), 2);
        assert!(matches!(root.statements[0], Statement::Noop(_)));
    }

    #[test]
    fn test_parse_block() {
        let root = parse_ok("{ cube(); sphere(); }");
        let Statement::Block(block) = &root.statements[0] else {
            panic!("expected block");
        };
        assert_eq!(block.children.len(), 2);
    }

    #[test]
    fn test_parse_empty_block() {
        let root = parse_ok("{}");
        let Statement::Block(block) = &root.statements[0] else {
            panic!("expected block");
        };
        assert!(block.children.is_empty());
    }

    #[test]
    fn test_parse_use_without_semicolon() {
        let root = parse_ok("use <lib/shapes.scad>\ncube();");
        let Statement::Use(stmt) = &root.statements[0] else {
            panic!("expected use");
        };
        assert_eq!(stmt.filename, "lib/shapes.scad");
        assert!(stmt.tokens.semicolon.is_none());
        assert_eq!(root.statements.len(), 2);
    }

    #[test]
    fn test_parse_include() {
        let root = parse_ok("include <common.scad>;");
        let Statement::Include(stmt) = &root.statements[0] else {
            panic!("expected include");
        };
        assert_eq!(stmt.filename, "common.scad");
        assert!(stmt.tokens.semicolon.is_some());
    }

    #[test]
    fn test_use_without_filename() {
        let (_, errors) = parse_with_errors("use x;");
        assert_eq!(errors.errors()[0].class_name(), "UnterminatedUseStatementError");
    }

    #[test]
    fn test_identifier_without_assignment_or_call() {
        let (_, errors) = parse_with_errors("x y;");
        assert_eq!(
            errors.errors()[0].class_name(),
            "UnexpectedTokenAfterIdentifierError"
        );
    }

    #[test]
    fn test_unexpected_statement_token() {
        let (_, errors) = parse_with_errors("10;");
        assert_eq!(errors.errors()[0].class_name(), "UnexpectedTokenError");
    }

    #[test]
    fn test_missing_semicolon_after_assignment() {
        let (_, errors) = parse_with_errors("x = 1\ny = 2;");
        assert_eq!(errors.errors()[0].class_name(), "ConsumptionError");
    }

    #[test]
    fn test_error_inside_block_is_contained() {
        let (root, errors) = parse_with_errors("{ x = ; cube(); }");
        assert_eq!(errors.errors().len(), 1);
        let Statement::Block(block) = &root.statements[0] else {
            panic!("expected block");
        };
        assert!(matches!(block.children[0], Statement::Error(_)));
        assert!(matches!(block.children[1], Statement::ModuleInstantiation(_)));
    }
}
