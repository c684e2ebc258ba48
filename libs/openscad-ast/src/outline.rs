//! # Symbol Outline
//!
//! Collects the declared symbols of a tree for editor outlines.
//!
//! Built on the [`Assembler`]: every node's child symbols are gathered from
//! its parts, and declarations wrap what they contain.

use crate::assembler::{Assembler, AssemblyPart};
use crate::nodes::{AssignmentNode, AssignmentRole, NodeRef, ScadFile, Statement};
use crate::span::CodeSpan;
use crate::token::TokenRef;

/// Kinds of outline symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// `module name(...)`
    Module,
    /// `function name(...)`
    Function,
    /// `name = value;`
    Variable,
    /// Parameter of a module or function.
    Parameter,
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSymbol {
    /// Declared name.
    pub name: String,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// Span of the whole declaration.
    pub span: CodeSpan,
    /// Span of the name token.
    pub name_span: CodeSpan,
    /// Symbols declared inside this one.
    pub children: Vec<DocumentSymbol>,
}

/// Assembler producing the symbols declared in a node.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolOutline;

impl SymbolOutline {
    /// Returns the top-level symbols of a file, nested by declaration.
    pub fn of_file(file: &ScadFile) -> Vec<DocumentSymbol> {
        Self.assemble(NodeRef::File(file))
    }
}

impl Assembler for SymbolOutline {
    type Output = Vec<DocumentSymbol>;

    fn process_assembled_node(
        &mut self,
        parts: Vec<AssemblyPart<'_>>,
        node: NodeRef<'_>,
    ) -> Vec<DocumentSymbol> {
        let mut children = Vec::new();
        for part in parts {
            match part {
                // Expressions declare nothing visible outside themselves.
                AssemblyPart::Node(NodeRef::Expression(_)) | AssemblyPart::Token(_) => {}
                AssemblyPart::Node(child) => children.extend(self.assemble(child)),
            }
        }

        let declared = match node {
            NodeRef::Statement(Statement::ModuleDeclaration(n)) => {
                Some((n.name.clone(), SymbolKind::Module, &n.tokens.name))
            }
            NodeRef::Statement(Statement::FunctionDeclaration(n)) => {
                Some((n.name.clone(), SymbolKind::Function, &n.tokens.name))
            }
            NodeRef::Statement(Statement::Assignment(n)) => assignment_symbol(n),
            NodeRef::Assignment(n) => assignment_symbol(n),
            _ => None,
        };

        match declared {
            Some((name, kind, name_token)) => match node.span() {
                Some(span) => vec![DocumentSymbol {
                    name,
                    kind,
                    span,
                    name_span: name_token.span.clone(),
                    children,
                }],
                None => children,
            },
            None => children,
        }
    }
}

fn assignment_symbol(node: &AssignmentNode) -> Option<(String, SymbolKind, &TokenRef)> {
    let kind = match node.role {
        AssignmentRole::VariableDeclaration => SymbolKind::Variable,
        AssignmentRole::ArgumentDeclaration => SymbolKind::Parameter,
        AssignmentRole::ArgumentAssignment => return None,
    };
    Some((node.name.clone()?, kind, node.tokens.name.as_ref()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::two_assignments;

    #[test]
    fn test_variables_listed_in_order() {
        let (_src, file) = two_assignments();
        let symbols = SymbolOutline::of_file(&file);
        let names: Vec<_> = symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(symbols.iter().all(|s| s.kind == SymbolKind::Variable));
        assert_eq!(symbols[1].span.start.offset, 4);
        assert_eq!(symbols[1].span.end.offset, 8);
        assert_eq!(symbols[1].name_span.text(), "b");
    }
}
