//! Helpers shared by the parser's unit tests.

use crate::error::ErrorCollector;
use crate::lexer::Lexer;
use crate::parser::Parser;
use openscad_ast::nodes::{Expression, ScadFile, Statement};
use openscad_ast::span::CodeFile;

/// Parse `source`, returning the tree and the collected errors.
pub(crate) fn parse_with_errors(source: &str) -> (ScadFile, ErrorCollector) {
    let file = CodeFile::new("test.scad", source);
    let tokens = Lexer::new(file.clone()).scan().unwrap();
    let mut errors = ErrorCollector::new();
    let root = Parser::new(&file, tokens, &mut errors).parse();
    (root, errors)
}

/// Parse `source`, asserting that it has no errors.
pub(crate) fn parse_ok(source: &str) -> ScadFile {
    let (root, errors) = parse_with_errors(source);
    assert!(!errors.has_errors(), "errors: {:?}", errors.errors());
    root
}

/// Parse `x = <source>;` and return the assigned expression.
pub(crate) fn parse_expr(source: &str) -> Expression {
    let root = parse_ok(&format!("x = {source};"));
    match &root.statements[0] {
        Statement::Assignment(assignment) => assignment.value.clone().unwrap(),
        other => panic!("expected assignment, got {}", other.kind_name()),
    }
}
