//! # Module Instantiation Parsing
//!
//! Parses module instantiations with their tags and child statement.
//!
//! ## Responsibilities
//!
//! - Module calls: `cube(10);`
//! - Transform with child: `translate([1,2,3]) cube(5);`
//! - Tags: `!`, `#`, `%`, `*`
//! - Keyword module names: `for`, `let`, `assert`, `echo`, `each`
//!
//! ## Example
//!
//! ```rust,ignore
//! let stmt = parser.parse_module_instantiation()?;
//! ```

use super::Parser;
use crate::error::{ParsingError, ParsingErrorKind};
use openscad_ast::nodes::{
    AssignmentRole, ErrorNode, InstantiationTags, ModuleInstantiationStmt,
    ModuleInstantiationTokens, Statement,
};
use openscad_ast::token::TokenKind;
use std::sync::Arc;

impl<'a> Parser<'a> {
    /// Parse a module instantiation, or a tagged `if`.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// module_instantiation = tag* (if_else | name "(" arguments ")" child)
    /// tag                  = "!" | "#" | "%" | "*"
    /// name                 = identifier | "for" | "let" | "assert" | "echo" | "each"
    /// ```
    ///
    /// ## Example
    ///
    /// ```text
    /// cube(10);
    /// translate([1,2,3]) cube(5);
    /// union() { cube(10); sphere(5); }
    /// #for (i = [0:3]) translate([i, 0, 0]) cube();
    /// ```
    pub(super) fn parse_module_instantiation(&mut self) -> Result<Statement, ParsingError> {
        let mut tags = Vec::new();
        while self.peek_kind().is_tag() {
            tags.push(self.advance());
        }

        if self.check(TokenKind::If) {
            return self.parse_if_else(tags);
        }

        let kind = self.peek_kind();
        if kind != TokenKind::Identifier && !kind.is_keyword_module_name() {
            return Err(self.error_here(ParsingErrorKind::UnexpectedToken {
                found: self.found(),
            }));
        }
        let name = self.advance();
        let (args, arg_tokens) = self.parse_arguments(AssignmentRole::ArgumentAssignment)?;
        let child = self.child_statement()?;

        Ok(Statement::ModuleInstantiation(Arc::new(ModuleInstantiationStmt {
            name: name.lexeme().to_string(),
            args,
            child,
            tags: InstantiationTags::from_tokens(&tags),
            tokens: ModuleInstantiationTokens {
                tags,
                name,
                args: arg_tokens,
            },
        })))
    }

    /// Parse the statement an instantiation or declaration applies to.
    ///
    /// At the end of text the error is reported and a zero-width
    /// [`ErrorNode`] stands in for the child, so the enclosing node survives.
    pub(super) fn child_statement(&mut self) -> Result<Statement, ParsingError> {
        if self.is_at_end() {
            let error = self.error_here(ParsingErrorKind::UnexpectedEofBeforeModuleInstantiation);
            let pos = error.pos.clone();
            self.report(error);
            return Ok(Statement::Error(Arc::new(ErrorNode {
                tokens: Vec::new(),
                pos,
            })));
        }
        self.with_stack(|parser| parser.statement())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::test_support::{parse_ok, parse_with_errors};
    use openscad_ast::nodes::Statement;

    #[test]
    fn test_parse_simple_instantiation() {
        let root = parse_ok("cube(10);");
        let Statement::ModuleInstantiation(inst) = &root.statements[0] else {
            panic!("expected module instantiation");
        };
        assert_eq!(inst.name, "cube");
        assert_eq!(inst.args.len(), 1);
        assert!(matches!(inst.child, Statement::Noop(_)));
    }

    #[test]
    fn test_parse_chained_instantiation() {
        let root = parse_ok("translate([1, 2, 3]) rotate(45) cube(5);");
        let Statement::ModuleInstantiation(outer) = &root.statements[0] else {
            panic!("expected module instantiation");
        };
        let Statement::ModuleInstantiation(inner) = &outer.child else {
            panic!("expected nested instantiation");
        };
        assert_eq!(inner.name, "rotate");
    }

    #[test]
    fn test_parse_tags() {
        let root = parse_ok("!#cube();");
        let Statement::ModuleInstantiation(inst) = &root.statements[0] else {
            panic!("expected module instantiation");
        };
        assert!(inst.tags.is_root);
        assert!(inst.tags.is_highlighted);
        assert!(!inst.tags.is_background);
        assert_eq!(inst.tokens.tags.len(), 2);
    }

    #[test]
    fn test_parse_keyword_module_name() {
        let root = parse_ok("for (i = [0:3]) translate([i, 0, 0]) cube();");
        let Statement::ModuleInstantiation(inst) = &root.statements[0] else {
            panic!("expected module instantiation");
        };
        assert_eq!(inst.name, "for");
        assert_eq!(inst.args[0].name.as_deref(), Some("i"));
    }

    #[test]
    fn test_eof_before_child_keeps_instantiation() {
        let (root, errors) = parse_with_errors("cube()");
        assert_eq!(
            errors.errors()[0].class_name(),
            "UnexpectedEndOfFileBeforeModuleInstantiationError"
        );
        let Statement::ModuleInstantiation(inst) = &root.statements[0] else {
            panic!("expected module instantiation");
        };
        assert!(inst.child.is_zero_width_error());
    }

    #[test]
    fn test_tag_without_instantiation() {
        let (_, errors) = parse_with_errors("% ;");
        assert_eq!(errors.errors()[0].class_name(), "UnexpectedTokenError");
    }
}
