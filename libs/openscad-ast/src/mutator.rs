//! # Mutator
//!
//! Copy-on-write tree rewriting.
//!
//! A [`Mutator`] rebuilds a node from its possibly transformed children.
//! When every child comes back as the same allocation the original node is
//! returned unchanged, so an untouched subtree is shared by reference
//! between the old and the new tree.
//!
//! Implementations override the hook for the node category they transform
//! and call the matching `walk_*` function for everything else.
//!
//! ## Example
//!
//! ```rust,ignore
//! struct RenameLookups;
//!
//! impl Mutator for RenameLookups {
//!     fn mutate_expression(&mut self, expr: &Expression) -> Expression {
//!         match expr {
//!             Expression::Lookup(n) if n.name == "old" => rename(n, "new"),
//!             _ => walk_expression(self, expr),
//!         }
//!     }
//! }
//! ```

use crate::nodes::*;
use std::sync::Arc;

/// Structural rewriting pass.
pub trait Mutator {
    /// Rewrites the file root.
    fn mutate_file(&mut self, file: &Arc<ScadFile>) -> Arc<ScadFile> {
        walk_file(self, file)
    }

    /// Rewrites a statement.
    fn mutate_statement(&mut self, stmt: &Statement) -> Statement {
        walk_statement(self, stmt)
    }

    /// Rewrites an expression.
    fn mutate_expression(&mut self, expr: &Expression) -> Expression {
        walk_expression(self, expr)
    }

    /// Rewrites an assignment inside an argument or binding list.
    fn mutate_assignment(&mut self, node: &Arc<AssignmentNode>) -> Arc<AssignmentNode> {
        walk_assignment(self, node)
    }
}

// =============================================================================
// IDENTITY CHECKS
// =============================================================================

fn same_statements(a: &[Statement], b: &[Statement]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_node(y))
}

fn same_assignments(a: &[Arc<AssignmentNode>], b: &[Arc<AssignmentNode>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

fn same_opt_expr(a: &Option<Expression>, b: &Option<Expression>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x.same_node(y),
        (None, None) => true,
        _ => false,
    }
}

fn same_opt_stmt(a: &Option<Statement>, b: &Option<Statement>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => x.same_node(y),
        (None, None) => true,
        _ => false,
    }
}

fn mutate_assignments<M: Mutator + ?Sized>(
    m: &mut M,
    args: &[Arc<AssignmentNode>],
) -> Vec<Arc<AssignmentNode>> {
    args.iter().map(|arg| m.mutate_assignment(arg)).collect()
}

fn mutate_opt_expr<M: Mutator + ?Sized>(m: &mut M, expr: &Option<Expression>) -> Option<Expression> {
    expr.as_ref().map(|e| m.mutate_expression(e))
}

// =============================================================================
// WALKERS
// =============================================================================

/// Rebuilds a file from its mutated statements.
pub fn walk_file<M: Mutator + ?Sized>(m: &mut M, file: &Arc<ScadFile>) -> Arc<ScadFile> {
    let statements: Vec<_> = file.statements.iter().map(|s| m.mutate_statement(s)).collect();
    if same_statements(&statements, &file.statements) {
        return Arc::clone(file);
    }
    Arc::new(ScadFile {
        statements,
        tokens: file.tokens.clone(),
    })
}

/// Rebuilds an assignment from its mutated value.
pub fn walk_assignment<M: Mutator + ?Sized>(
    m: &mut M,
    node: &Arc<AssignmentNode>,
) -> Arc<AssignmentNode> {
    let value = mutate_opt_expr(m, &node.value);
    if same_opt_expr(&value, &node.value) {
        return Arc::clone(node);
    }
    Arc::new(AssignmentNode {
        value,
        ..(**node).clone()
    })
}

/// Rebuilds a statement from its mutated children.
pub fn walk_statement<M: Mutator + ?Sized>(m: &mut M, stmt: &Statement) -> Statement {
    match stmt {
        Statement::Use(_) | Statement::Include(_) | Statement::Noop(_) | Statement::Error(_) => {
            stmt.clone()
        }
        Statement::ModuleInstantiation(n) => {
            let args = mutate_assignments(m, &n.args);
            let child = m.mutate_statement(&n.child);
            if same_assignments(&args, &n.args) && child.same_node(&n.child) {
                return stmt.clone();
            }
            Statement::ModuleInstantiation(Arc::new(ModuleInstantiationStmt {
                args,
                child,
                ..(**n).clone()
            }))
        }
        Statement::ModuleDeclaration(n) => {
            let definition_args = mutate_assignments(m, &n.definition_args);
            let body = m.mutate_statement(&n.body);
            if same_assignments(&definition_args, &n.definition_args) && body.same_node(&n.body) {
                return stmt.clone();
            }
            Statement::ModuleDeclaration(Arc::new(ModuleDeclarationStmt {
                definition_args,
                body,
                ..(**n).clone()
            }))
        }
        Statement::FunctionDeclaration(n) => {
            let definition_args = mutate_assignments(m, &n.definition_args);
            let expr = m.mutate_expression(&n.expr);
            if same_assignments(&definition_args, &n.definition_args) && expr.same_node(&n.expr) {
                return stmt.clone();
            }
            Statement::FunctionDeclaration(Arc::new(FunctionDeclarationStmt {
                definition_args,
                expr,
                ..(**n).clone()
            }))
        }
        Statement::Block(n) => {
            let children: Vec<_> = n.children.iter().map(|s| m.mutate_statement(s)).collect();
            if same_statements(&children, &n.children) {
                return stmt.clone();
            }
            Statement::Block(Arc::new(BlockStmt {
                children,
                tokens: n.tokens.clone(),
            }))
        }
        Statement::IfElse(n) => {
            let cond = m.mutate_expression(&n.cond);
            let then_branch = m.mutate_statement(&n.then_branch);
            let else_branch = n.else_branch.as_ref().map(|s| m.mutate_statement(s));
            if cond.same_node(&n.cond)
                && then_branch.same_node(&n.then_branch)
                && same_opt_stmt(&else_branch, &n.else_branch)
            {
                return stmt.clone();
            }
            Statement::IfElse(Arc::new(IfElseStatement {
                cond,
                then_branch,
                else_branch,
                ..(**n).clone()
            }))
        }
        Statement::Assignment(n) => {
            let node = m.mutate_assignment(n);
            if Arc::ptr_eq(&node, n) {
                return stmt.clone();
            }
            Statement::Assignment(node)
        }
    }
}

/// Rebuilds an expression from its mutated children.
pub fn walk_expression<M: Mutator + ?Sized>(m: &mut M, expr: &Expression) -> Expression {
    match expr {
        Expression::Literal(_) | Expression::Lookup(_) => expr.clone(),
        Expression::UnaryOp(n) => {
            let right = m.mutate_expression(&n.right);
            if right.same_node(&n.right) {
                return expr.clone();
            }
            Expression::UnaryOp(Arc::new(UnaryOpExpr {
                right,
                ..(**n).clone()
            }))
        }
        Expression::BinaryOp(n) => {
            let left = m.mutate_expression(&n.left);
            let right = m.mutate_expression(&n.right);
            if left.same_node(&n.left) && right.same_node(&n.right) {
                return expr.clone();
            }
            Expression::BinaryOp(Arc::new(BinaryOpExpr {
                left,
                right,
                ..(**n).clone()
            }))
        }
        Expression::Ternary(n) => {
            let cond = m.mutate_expression(&n.cond);
            let if_expr = m.mutate_expression(&n.if_expr);
            let else_expr = m.mutate_expression(&n.else_expr);
            if cond.same_node(&n.cond)
                && if_expr.same_node(&n.if_expr)
                && else_expr.same_node(&n.else_expr)
            {
                return expr.clone();
            }
            Expression::Ternary(Arc::new(TernaryExpr {
                cond,
                if_expr,
                else_expr,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::ArrayLookup(n) => {
            let array = m.mutate_expression(&n.array);
            let index = m.mutate_expression(&n.index);
            if array.same_node(&n.array) && index.same_node(&n.index) {
                return expr.clone();
            }
            Expression::ArrayLookup(Arc::new(ArrayLookupExpr {
                array,
                index,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::Range(n) => {
            let begin = m.mutate_expression(&n.begin);
            let step = mutate_opt_expr(m, &n.step);
            let end = m.mutate_expression(&n.end);
            if begin.same_node(&n.begin) && same_opt_expr(&step, &n.step) && end.same_node(&n.end) {
                return expr.clone();
            }
            Expression::Range(Arc::new(RangeExpr {
                begin,
                step,
                end,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::Vector(n) => {
            let children: Vec<_> = n.children.iter().map(|e| m.mutate_expression(e)).collect();
            let unchanged = children
                .iter()
                .zip(&n.children)
                .all(|(x, y)| x.same_node(y));
            if unchanged {
                return expr.clone();
            }
            Expression::Vector(Arc::new(VectorExpr {
                children,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::MemberLookup(n) => {
            let inner = m.mutate_expression(&n.expr);
            if inner.same_node(&n.expr) {
                return expr.clone();
            }
            Expression::MemberLookup(Arc::new(MemberLookupExpr {
                expr: inner,
                ..(**n).clone()
            }))
        }
        Expression::FunctionCall(n) => {
            let callee = m.mutate_expression(&n.callee);
            let args = mutate_assignments(m, &n.args);
            if callee.same_node(&n.callee) && same_assignments(&args, &n.args) {
                return expr.clone();
            }
            Expression::FunctionCall(Arc::new(FunctionCallExpr {
                callee,
                args,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::Let(n) => walk_call_like(m, n).map_or_else(|| expr.clone(), Expression::Let),
        Expression::Assert(n) => {
            walk_call_like(m, n).map_or_else(|| expr.clone(), Expression::Assert)
        }
        Expression::Echo(n) => walk_call_like(m, n).map_or_else(|| expr.clone(), Expression::Echo),
        Expression::LcIf(n) => {
            let cond = m.mutate_expression(&n.cond);
            let if_expr = m.mutate_expression(&n.if_expr);
            let else_expr = mutate_opt_expr(m, &n.else_expr);
            if cond.same_node(&n.cond)
                && if_expr.same_node(&n.if_expr)
                && same_opt_expr(&else_expr, &n.else_expr)
            {
                return expr.clone();
            }
            Expression::LcIf(Arc::new(LcIfExpr {
                cond,
                if_expr,
                else_expr,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::LcEach(n) => {
            let inner = m.mutate_expression(&n.expr);
            if inner.same_node(&n.expr) {
                return expr.clone();
            }
            Expression::LcEach(Arc::new(LcEachExpr {
                expr: inner,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::LcFor(n) => {
            let args = mutate_assignments(m, &n.args);
            let inner = m.mutate_expression(&n.expr);
            if same_assignments(&args, &n.args) && inner.same_node(&n.expr) {
                return expr.clone();
            }
            Expression::LcFor(Arc::new(LcForExpr {
                args,
                expr: inner,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::LcForC(n) => {
            let args = mutate_assignments(m, &n.args);
            let cond = m.mutate_expression(&n.cond);
            let incr_args = mutate_assignments(m, &n.incr_args);
            let inner = m.mutate_expression(&n.expr);
            if same_assignments(&args, &n.args)
                && cond.same_node(&n.cond)
                && same_assignments(&incr_args, &n.incr_args)
                && inner.same_node(&n.expr)
            {
                return expr.clone();
            }
            Expression::LcForC(Arc::new(LcForCExpr {
                args,
                cond,
                incr_args,
                expr: inner,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::LcLet(n) => {
            let args = mutate_assignments(m, &n.args);
            let inner = m.mutate_expression(&n.expr);
            if same_assignments(&args, &n.args) && inner.same_node(&n.expr) {
                return expr.clone();
            }
            Expression::LcLet(Arc::new(LcLetExpr {
                args,
                expr: inner,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::Grouping(n) => {
            let inner = m.mutate_expression(&n.inner);
            if inner.same_node(&n.inner) {
                return expr.clone();
            }
            Expression::Grouping(Arc::new(GroupingExpr {
                inner,
                tokens: n.tokens.clone(),
            }))
        }
        Expression::AnonymousFunction(n) => {
            let definition_args = mutate_assignments(m, &n.definition_args);
            let inner = m.mutate_expression(&n.expr);
            if same_assignments(&definition_args, &n.definition_args) && inner.same_node(&n.expr) {
                return expr.clone();
            }
            Expression::AnonymousFunction(Arc::new(AnonymousFunctionExpr {
                definition_args,
                expr: inner,
                tokens: n.tokens.clone(),
            }))
        }
    }
}

/// Rebuilds a `let`/`assert`/`echo` payload; `None` when nothing changed.
fn walk_call_like<M: Mutator + ?Sized>(
    m: &mut M,
    node: &Arc<CallLikeExpr>,
) -> Option<Arc<CallLikeExpr>> {
    let args = mutate_assignments(m, &node.args);
    let expr = mutate_opt_expr(m, &node.expr);
    if same_assignments(&args, &node.args) && same_opt_expr(&expr, &node.expr) {
        return None;
    }
    Some(Arc::new(CallLikeExpr {
        args,
        expr,
        tokens: node.tokens.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::two_assignments;
    use crate::token::TokenKind;

    /// Leaves every node alone.
    struct Identity;
    impl Mutator for Identity {}

    /// Replaces the literal `5` with a lookup of `five`.
    struct ReplaceFive;

    impl Mutator for ReplaceFive {
        fn mutate_expression(&mut self, expr: &Expression) -> Expression {
            match expr {
                Expression::Literal(n) if n.value == LiteralValue::Number(5.0) => {
                    Expression::Lookup(Arc::new(LookupExpr {
                        name: "five".into(),
                        tokens: LookupTokens {
                            identifier: crate::test_support::tok(TokenKind::Identifier, "five"),
                        },
                    }))
                }
                _ => walk_expression(self, expr),
            }
        }
    }

    #[test]
    fn test_identity_returns_same_root() {
        let (_src, file) = two_assignments();
        let file = Arc::new(file);
        let result = Identity.mutate_file(&file);
        assert!(Arc::ptr_eq(&file, &result));
    }

    #[test]
    fn test_mutation_copies_only_changed_path() {
        let (_src, file) = two_assignments();
        let file = Arc::new(file);
        let result = ReplaceFive.mutate_file(&file);

        assert!(!Arc::ptr_eq(&file, &result));
        // The changed assignment is new, the untouched one is shared.
        assert!(!result.statements[0].same_node(&file.statements[0]));
        assert!(result.statements[1].same_node(&file.statements[1]));

        let Statement::Assignment(first) = &result.statements[0] else {
            panic!("expected assignment");
        };
        match &first.value {
            Some(Expression::Lookup(lookup)) => assert_eq!(lookup.name, "five"),
            other => panic!("unexpected value {other:?}"),
        }
        assert_eq!(first.name.as_deref(), Some("a"));
    }

    #[test]
    fn test_original_tree_is_untouched() {
        let (_src, file) = two_assignments();
        let file = Arc::new(file);
        let _ = ReplaceFive.mutate_file(&file);
        let Statement::Assignment(first) = &file.statements[0] else {
            panic!("expected assignment");
        };
        assert!(matches!(first.value, Some(Expression::Literal(_))));
    }
}
