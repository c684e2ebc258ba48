//! # Visitor
//!
//! One `visit_*` method per node kind, dispatched by exhaustive matches in
//! [`Statement::accept`], [`Expression::accept`] and [`NodeRef::accept`].
//! Adding a node kind makes every visitor fail to compile until it handles
//! the new case.

use crate::nodes::*;

/// Visitor over every AST node kind.
pub trait Visitor {
    /// Value produced per visited node.
    type Output;

    /// Visit the file root.
    fn visit_scad_file(&mut self, node: &ScadFile) -> Self::Output;

    // Statements

    /// Visit `use <file>`.
    fn visit_use_stmt(&mut self, node: &UseStmt) -> Self::Output;
    /// Visit `include <file>`.
    fn visit_include_stmt(&mut self, node: &IncludeStmt) -> Self::Output;
    /// Visit a module instantiation.
    fn visit_module_instantiation_stmt(&mut self, node: &ModuleInstantiationStmt)
        -> Self::Output;
    /// Visit a module declaration.
    fn visit_module_declaration_stmt(&mut self, node: &ModuleDeclarationStmt) -> Self::Output;
    /// Visit a function declaration.
    fn visit_function_declaration_stmt(&mut self, node: &FunctionDeclarationStmt)
        -> Self::Output;
    /// Visit a block.
    fn visit_block_stmt(&mut self, node: &BlockStmt) -> Self::Output;
    /// Visit a lone `;`.
    fn visit_noop_stmt(&mut self, node: &NoopStmt) -> Self::Output;
    /// Visit an `if`/`else` statement.
    fn visit_if_else_statement(&mut self, node: &IfElseStatement) -> Self::Output;
    /// Visit an assignment, wherever it appears.
    fn visit_assignment_node(&mut self, node: &AssignmentNode) -> Self::Output;
    /// Visit a run of unparsed tokens.
    fn visit_error_node(&mut self, node: &ErrorNode) -> Self::Output;

    // Expressions

    /// Visit a prefix operation.
    fn visit_unary_op_expr(&mut self, node: &UnaryOpExpr) -> Self::Output;
    /// Visit an infix operation.
    fn visit_binary_op_expr(&mut self, node: &BinaryOpExpr) -> Self::Output;
    /// Visit `?:`.
    fn visit_ternary_expr(&mut self, node: &TernaryExpr) -> Self::Output;
    /// Visit `a[i]`.
    fn visit_array_lookup_expr(&mut self, node: &ArrayLookupExpr) -> Self::Output;
    /// Visit a literal.
    fn visit_literal_expr(&mut self, node: &LiteralExpr) -> Self::Output;
    /// Visit a range.
    fn visit_range_expr(&mut self, node: &RangeExpr) -> Self::Output;
    /// Visit a vector.
    fn visit_vector_expr(&mut self, node: &VectorExpr) -> Self::Output;
    /// Visit a name lookup.
    fn visit_lookup_expr(&mut self, node: &LookupExpr) -> Self::Output;
    /// Visit `a.b`.
    fn visit_member_lookup_expr(&mut self, node: &MemberLookupExpr) -> Self::Output;
    /// Visit a function call.
    fn visit_function_call_expr(&mut self, node: &FunctionCallExpr) -> Self::Output;
    /// Visit `let (...) expr`.
    fn visit_let_expr(&mut self, node: &LetExpr) -> Self::Output;
    /// Visit `assert (...) expr`.
    fn visit_assert_expr(&mut self, node: &AssertExpr) -> Self::Output;
    /// Visit `echo (...) expr`.
    fn visit_echo_expr(&mut self, node: &EchoExpr) -> Self::Output;
    /// Visit a comprehension `if`.
    fn visit_lc_if_expr(&mut self, node: &LcIfExpr) -> Self::Output;
    /// Visit a comprehension `each`.
    fn visit_lc_each_expr(&mut self, node: &LcEachExpr) -> Self::Output;
    /// Visit a comprehension `for`.
    fn visit_lc_for_expr(&mut self, node: &LcForExpr) -> Self::Output;
    /// Visit a C-style comprehension `for`.
    fn visit_lc_for_c_expr(&mut self, node: &LcForCExpr) -> Self::Output;
    /// Visit a comprehension `let`.
    fn visit_lc_let_expr(&mut self, node: &LcLetExpr) -> Self::Output;
    /// Visit `(expr)`.
    fn visit_grouping_expr(&mut self, node: &GroupingExpr) -> Self::Output;
    /// Visit a function literal.
    fn visit_anonymous_function_expr(&mut self, node: &AnonymousFunctionExpr) -> Self::Output;
}

impl Statement {
    /// Dispatches to the visitor method for this statement kind.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Use(n) => visitor.visit_use_stmt(n),
            Self::Include(n) => visitor.visit_include_stmt(n),
            Self::ModuleInstantiation(n) => visitor.visit_module_instantiation_stmt(n),
            Self::ModuleDeclaration(n) => visitor.visit_module_declaration_stmt(n),
            Self::FunctionDeclaration(n) => visitor.visit_function_declaration_stmt(n),
            Self::Block(n) => visitor.visit_block_stmt(n),
            Self::Noop(n) => visitor.visit_noop_stmt(n),
            Self::IfElse(n) => visitor.visit_if_else_statement(n),
            Self::Assignment(n) => visitor.visit_assignment_node(n),
            Self::Error(n) => visitor.visit_error_node(n),
        }
    }
}

impl Expression {
    /// Dispatches to the visitor method for this expression kind.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::UnaryOp(n) => visitor.visit_unary_op_expr(n),
            Self::BinaryOp(n) => visitor.visit_binary_op_expr(n),
            Self::Ternary(n) => visitor.visit_ternary_expr(n),
            Self::ArrayLookup(n) => visitor.visit_array_lookup_expr(n),
            Self::Literal(n) => visitor.visit_literal_expr(n),
            Self::Range(n) => visitor.visit_range_expr(n),
            Self::Vector(n) => visitor.visit_vector_expr(n),
            Self::Lookup(n) => visitor.visit_lookup_expr(n),
            Self::MemberLookup(n) => visitor.visit_member_lookup_expr(n),
            Self::FunctionCall(n) => visitor.visit_function_call_expr(n),
            Self::Let(n) => visitor.visit_let_expr(n),
            Self::Assert(n) => visitor.visit_assert_expr(n),
            Self::Echo(n) => visitor.visit_echo_expr(n),
            Self::LcIf(n) => visitor.visit_lc_if_expr(n),
            Self::LcEach(n) => visitor.visit_lc_each_expr(n),
            Self::LcFor(n) => visitor.visit_lc_for_expr(n),
            Self::LcForC(n) => visitor.visit_lc_for_c_expr(n),
            Self::LcLet(n) => visitor.visit_lc_let_expr(n),
            Self::Grouping(n) => visitor.visit_grouping_expr(n),
            Self::AnonymousFunction(n) => visitor.visit_anonymous_function_expr(n),
        }
    }
}

impl NodeRef<'_> {
    /// Dispatches to the visitor method for the referenced node.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::File(file) => visitor.visit_scad_file(file),
            Self::Statement(stmt) => stmt.accept(visitor),
            Self::Expression(expr) => expr.accept(visitor),
            Self::Assignment(node) => visitor.visit_assignment_node(node),
        }
    }
}
