//! # Declaration Parsing
//!
//! Parses module and function declarations.
//!
//! ## Responsibilities
//!
//! - Module declarations: `module foo(a, b = 2) { ... }`
//! - Function declarations: `function foo(x) = x * 2;`
//!
//! ## Example
//!
//! ```rust,ignore
//! let stmt = parser.parse_module_declaration()?;
//! ```

use super::Parser;
use crate::error::ParsingError;
use openscad_ast::nodes::{
    AssignmentRole, FunctionDeclarationStmt, FunctionDeclarationTokens, ModuleDeclarationStmt,
    ModuleDeclarationTokens, Statement,
};
use openscad_ast::token::TokenKind;
use std::sync::Arc;

impl<'a> Parser<'a> {
    /// Parse module declaration.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// module_declaration = "module" identifier "(" parameters ")" child
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// module box(size = 10) { cube(size); }
    /// module asdf();
    /// ```
    pub(super) fn parse_module_declaration(&mut self) -> Result<Statement, ParsingError> {
        let module_keyword = self.consume(TokenKind::Module, "in module declaration")?;
        let name = self.consume(TokenKind::Identifier, "after 'module'")?;
        let (definition_args, args) = self.parse_arguments(AssignmentRole::ArgumentDeclaration)?;
        let body = self.child_statement()?;

        Ok(Statement::ModuleDeclaration(Arc::new(ModuleDeclarationStmt {
            name: name.lexeme().to_string(),
            definition_args,
            body,
            tokens: ModuleDeclarationTokens {
                module_keyword,
                name,
                args,
            },
        })))
    }

    /// Parse function declaration.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// function_declaration = "function" identifier "(" parameters ")" "=" expression ";"
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// function double(x) = x * 2;
    /// ```
    pub(super) fn parse_function_declaration(&mut self) -> Result<Statement, ParsingError> {
        let function_keyword = self.consume(TokenKind::Function, "in function declaration")?;
        let name = self.consume(TokenKind::Identifier, "after 'function'")?;
        let (definition_args, args) = self.parse_arguments(AssignmentRole::ArgumentDeclaration)?;
        let equals = self.consume(TokenKind::Equal, "after function parameters")?;
        let expr = self.expression()?;
        let semicolon = self.consume(TokenKind::Semicolon, "after function body")?;

        Ok(Statement::FunctionDeclaration(Arc::new(FunctionDeclarationStmt {
            name: name.lexeme().to_string(),
            definition_args,
            expr,
            tokens: FunctionDeclarationTokens {
                function_keyword,
                name,
                args,
                equals,
                semicolon,
            },
        })))
    }
}

// =============================================================================
// TESTS
// =============================================================================
