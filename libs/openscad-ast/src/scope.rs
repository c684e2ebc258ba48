//! # Scope
//!
//! Name-resolution environment handed to resolution and completion passes.
//!
//! A scope maps names to their declarations for each of the three OpenSCAD
//! namespaces and falls back to its parent when a name is missing.

use crate::nodes::{AssignmentNode, FunctionDeclarationStmt, ModuleDeclarationStmt, ScadFile, Statement};
use std::collections::HashMap;
use std::sync::Arc;

/// Declarations visible at one nesting level.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    parent: Option<Arc<Scope>>,
    variables: HashMap<String, Arc<AssignmentNode>>,
    functions: HashMap<String, Arc<FunctionDeclarationStmt>>,
    modules: HashMap<String, Arc<ModuleDeclarationStmt>>,
}

impl Scope {
    /// Creates an empty root scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope nested in `parent`.
    pub fn with_parent(parent: Arc<Scope>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Creates a root scope holding the top-level declarations of `file`.
    ///
    /// A later declaration of the same name replaces an earlier one.
    pub fn root_for(file: &ScadFile) -> Self {
        let mut scope = Self::new();
        for stmt in &file.statements {
            match stmt {
                Statement::Assignment(node) => scope.define_variable(Arc::clone(node)),
                Statement::FunctionDeclaration(node) => scope.define_function(Arc::clone(node)),
                Statement::ModuleDeclaration(node) => scope.define_module(Arc::clone(node)),
                _ => {}
            }
        }
        scope
    }

    /// Enclosing scope.
    pub fn parent(&self) -> Option<&Arc<Scope>> {
        self.parent.as_ref()
    }

    /// Registers a variable. Assignments without a name are ignored.
    pub fn define_variable(&mut self, node: Arc<AssignmentNode>) {
        if let Some(name) = node.name.clone() {
            self.variables.insert(name, node);
        }
    }

    /// Registers a function.
    pub fn define_function(&mut self, node: Arc<FunctionDeclarationStmt>) {
        self.functions.insert(node.name.clone(), node);
    }

    /// Registers a module.
    pub fn define_module(&mut self, node: Arc<ModuleDeclarationStmt>) {
        self.modules.insert(node.name.clone(), node);
    }

    /// Finds a variable here or in an enclosing scope.
    pub fn lookup_variable(&self, name: &str) -> Option<&Arc<AssignmentNode>> {
        self.variables
            .get(name)
            .or_else(|| self.parent.as_ref()?.lookup_variable(name))
    }

    /// Finds a function here or in an enclosing scope.
    pub fn lookup_function(&self, name: &str) -> Option<&Arc<FunctionDeclarationStmt>> {
        self.functions
            .get(name)
            .or_else(|| self.parent.as_ref()?.lookup_function(name))
    }

    /// Finds a module here or in an enclosing scope.
    pub fn lookup_module(&self, name: &str) -> Option<&Arc<ModuleDeclarationStmt>> {
        self.modules
            .get(name)
            .or_else(|| self.parent.as_ref()?.lookup_module(name))
    }

    /// Names of the variables declared at this level.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Names of the functions declared at this level.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Names of the modules declared at this level.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::two_assignments;

    #[test]
    fn test_root_for_registers_variables() {
        let (_src, file) = two_assignments();
        let scope = Scope::root_for(&file);
        assert!(scope.lookup_variable("a").is_some());
        assert!(scope.lookup_variable("b").is_some());
        assert!(scope.lookup_variable("c").is_none());
        assert!(scope.lookup_module("a").is_none());
    }

    #[test]
    fn test_lookup_walks_parent_chain() {
        let (_src, file) = two_assignments();
        let root = Arc::new(Scope::root_for(&file));
        let child = Scope::with_parent(Arc::clone(&root));
        assert!(child.lookup_variable("a").is_some());
        assert_eq!(child.variable_names().count(), 0);
        assert!(child.parent().is_some());
    }

    #[test]
    fn test_inner_declaration_shadows_outer() {
        let (_src, file) = two_assignments();
        let root = Arc::new(Scope::root_for(&file));
        let mut child = Scope::with_parent(root);
        let Statement::Assignment(second) = &file.statements[1] else {
            panic!("expected assignment");
        };
        let mut shadow = (**second).clone();
        shadow.name = Some("a".into());
        let shadow = Arc::new(shadow);
        child.define_variable(Arc::clone(&shadow));
        let found = child.lookup_variable("a").expect("variable");
        assert!(Arc::ptr_eq(found, &shadow));
    }
}
