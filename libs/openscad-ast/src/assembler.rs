//! # Assembler
//!
//! Linearizes a node into its ordered lexical parts.
//!
//! Every node kind lists its own tokens and child nodes in source order, in
//! one exhaustive match. Child nodes are not expanded: a consumer decides
//! whether and how to recurse. [`Assembler`] implementations build their
//! output from that list through [`Assembler::process_assembled_node`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use openscad_ast::assembler::{Assembler, TokenCollector};
//! use openscad_ast::NodeRef;
//!
//! let tokens = TokenCollector.assemble(NodeRef::File(&file));
//! ```

use crate::nodes::*;
use crate::span::CodeSpan;
use crate::token::TokenRef;
use std::sync::Arc;

// =============================================================================
// PARTS
// =============================================================================

/// One lexical part of a node.
#[derive(Debug, Clone, Copy)]
pub enum AssemblyPart<'a> {
    /// A token owned directly by the node.
    Token(&'a TokenRef),
    /// A child node, not yet assembled.
    Node(NodeRef<'a>),
}

impl<'a> AssemblyPart<'a> {
    /// Returns the span of the part, without extra tokens.
    pub fn span(&self) -> Option<CodeSpan> {
        match self {
            Self::Token(token) => Some(token.span.clone()),
            Self::Node(node) => node.span(),
        }
    }
}

/// Ordered part list under construction.
struct Parts<'a>(Vec<AssemblyPart<'a>>);

impl<'a> Parts<'a> {
    fn token(&mut self, token: &'a TokenRef) -> &mut Self {
        self.0.push(AssemblyPart::Token(token));
        self
    }

    fn opt_token(&mut self, token: &'a Option<TokenRef>) -> &mut Self {
        if let Some(token) = token {
            self.token(token);
        }
        self
    }

    fn tokens(&mut self, tokens: &'a [TokenRef]) -> &mut Self {
        self.0.extend(tokens.iter().map(AssemblyPart::Token));
        self
    }

    fn stmt(&mut self, stmt: &'a Statement) -> &mut Self {
        self.0.push(AssemblyPart::Node(NodeRef::Statement(stmt)));
        self
    }

    fn expr(&mut self, expr: &'a Expression) -> &mut Self {
        self.0.push(AssemblyPart::Node(NodeRef::Expression(expr)));
        self
    }

    fn opt_expr(&mut self, expr: &'a Option<Expression>) -> &mut Self {
        if let Some(expr) = expr {
            self.expr(expr);
        }
        self
    }

    fn assignments(&mut self, args: &'a [Arc<AssignmentNode>]) -> &mut Self {
        self.0
            .extend(args.iter().map(|arg| AssemblyPart::Node(NodeRef::Assignment(arg))));
        self
    }

    fn arg_list(
        &mut self,
        tokens: &'a ArgumentListTokens,
        args: &'a [Arc<AssignmentNode>],
    ) -> &mut Self {
        self.token(&tokens.open)
            .tokens(&tokens.leading_commas)
            .assignments(args)
            .token(&tokens.close)
    }

    fn assignment(&mut self, node: &'a AssignmentNode) -> &mut Self {
        self.opt_token(&node.tokens.name)
            .opt_token(&node.tokens.equals)
            .opt_expr(&node.value)
            .tokens(&node.tokens.trailing_commas)
            .opt_token(&node.tokens.semicolon)
    }
}

/// Lists the ordered lexical parts of a node.
pub fn assembly_parts(node: NodeRef<'_>) -> Vec<AssemblyPart<'_>> {
    let mut parts = Parts(Vec::new());
    match node {
        NodeRef::File(file) => {
            for stmt in &file.statements {
                parts.stmt(stmt);
            }
            parts.token(&file.tokens.eot);
        }
        NodeRef::Statement(stmt) => statement_parts(&mut parts, stmt),
        NodeRef::Expression(expr) => expression_parts(&mut parts, expr),
        NodeRef::Assignment(node) => {
            parts.assignment(node);
        }
    }
    parts.0
}

fn statement_parts<'a>(parts: &mut Parts<'a>, stmt: &'a Statement) {
    match stmt {
        Statement::Use(n) => {
            parts
                .token(&n.tokens.keyword)
                .token(&n.tokens.filename)
                .opt_token(&n.tokens.semicolon);
        }
        Statement::Include(n) => {
            parts
                .token(&n.tokens.keyword)
                .token(&n.tokens.filename)
                .opt_token(&n.tokens.semicolon);
        }
        Statement::ModuleInstantiation(n) => {
            parts
                .tokens(&n.tokens.tags)
                .token(&n.tokens.name)
                .arg_list(&n.tokens.args, &n.args)
                .stmt(&n.child);
        }
        Statement::ModuleDeclaration(n) => {
            parts
                .token(&n.tokens.module_keyword)
                .token(&n.tokens.name)
                .arg_list(&n.tokens.args, &n.definition_args)
                .stmt(&n.body);
        }
        Statement::FunctionDeclaration(n) => {
            parts
                .token(&n.tokens.function_keyword)
                .token(&n.tokens.name)
                .arg_list(&n.tokens.args, &n.definition_args)
                .token(&n.tokens.equals)
                .expr(&n.expr)
                .token(&n.tokens.semicolon);
        }
        Statement::Block(n) => {
            parts.token(&n.tokens.open);
            for child in &n.children {
                parts.stmt(child);
            }
            parts.token(&n.tokens.close);
        }
        Statement::Noop(n) => {
            parts.token(&n.tokens.semicolon);
        }
        Statement::IfElse(n) => {
            parts
                .tokens(&n.tokens.tags)
                .token(&n.tokens.if_keyword)
                .token(&n.tokens.open)
                .expr(&n.cond)
                .token(&n.tokens.close)
                .stmt(&n.then_branch)
                .opt_token(&n.tokens.else_keyword);
            if let Some(else_branch) = &n.else_branch {
                parts.stmt(else_branch);
            }
        }
        Statement::Assignment(n) => {
            parts.assignment(n);
        }
        Statement::Error(n) => {
            parts.tokens(&n.tokens);
        }
    }
}

fn expression_parts<'a>(parts: &mut Parts<'a>, expr: &'a Expression) {
    match expr {
        Expression::UnaryOp(n) => {
            parts.token(&n.tokens.operator).expr(&n.right);
        }
        Expression::BinaryOp(n) => {
            parts.expr(&n.left).token(&n.tokens.operator).expr(&n.right);
        }
        Expression::Ternary(n) => {
            parts
                .expr(&n.cond)
                .token(&n.tokens.question_mark)
                .expr(&n.if_expr)
                .token(&n.tokens.colon)
                .expr(&n.else_expr);
        }
        Expression::ArrayLookup(n) => {
            parts
                .expr(&n.array)
                .token(&n.tokens.open)
                .expr(&n.index)
                .token(&n.tokens.close);
        }
        Expression::Literal(n) => {
            parts.token(&n.tokens.literal);
        }
        Expression::Range(n) => {
            parts
                .token(&n.tokens.open)
                .expr(&n.begin)
                .token(&n.tokens.first_colon)
                .opt_expr(&n.step)
                .opt_token(&n.tokens.second_colon)
                .expr(&n.end)
                .token(&n.tokens.close);
        }
        Expression::Vector(n) => {
            parts.token(&n.tokens.open).tokens(&n.tokens.leading_commas);
            for (index, child) in n.children.iter().enumerate() {
                parts.expr(child);
                if let Some(commas) = n.tokens.commas.get(index) {
                    parts.tokens(commas);
                }
            }
            parts.token(&n.tokens.close);
        }
        Expression::Lookup(n) => {
            parts.token(&n.tokens.identifier);
        }
        Expression::MemberLookup(n) => {
            parts
                .expr(&n.expr)
                .token(&n.tokens.dot)
                .token(&n.tokens.member);
        }
        Expression::FunctionCall(n) => {
            parts.expr(&n.callee).arg_list(&n.tokens, &n.args);
        }
        Expression::Let(n) | Expression::Assert(n) | Expression::Echo(n) => {
            parts
                .token(&n.tokens.keyword)
                .arg_list(&n.tokens.args, &n.args)
                .opt_expr(&n.expr);
        }
        Expression::LcIf(n) => {
            parts
                .token(&n.tokens.if_keyword)
                .token(&n.tokens.open)
                .expr(&n.cond)
                .token(&n.tokens.close)
                .expr(&n.if_expr)
                .opt_token(&n.tokens.else_keyword)
                .opt_expr(&n.else_expr);
        }
        Expression::LcEach(n) => {
            parts.token(&n.tokens.each_keyword).expr(&n.expr);
        }
        Expression::LcFor(n) => {
            parts
                .token(&n.tokens.for_keyword)
                .arg_list(&n.tokens.args, &n.args)
                .expr(&n.expr);
        }
        Expression::LcForC(n) => {
            parts
                .token(&n.tokens.for_keyword)
                .token(&n.tokens.open)
                .tokens(&n.tokens.init_leading_commas)
                .assignments(&n.args)
                .token(&n.tokens.first_semicolon)
                .expr(&n.cond)
                .token(&n.tokens.second_semicolon)
                .tokens(&n.tokens.incr_leading_commas)
                .assignments(&n.incr_args)
                .token(&n.tokens.close)
                .expr(&n.expr);
        }
        Expression::LcLet(n) => {
            parts
                .token(&n.tokens.let_keyword)
                .arg_list(&n.tokens.args, &n.args)
                .expr(&n.expr);
        }
        Expression::Grouping(n) => {
            parts
                .token(&n.tokens.open)
                .expr(&n.inner)
                .token(&n.tokens.close);
        }
        Expression::AnonymousFunction(n) => {
            parts
                .token(&n.tokens.function_keyword)
                .arg_list(&n.tokens.args, &n.definition_args)
                .expr(&n.expr);
        }
    }
}

// =============================================================================
// ASSEMBLER
// =============================================================================

/// Builds a value from a node's assembled parts.
pub trait Assembler {
    /// Value produced per node.
    type Output;

    /// Produces the output for `node` from its ordered parts.
    ///
    /// Implementations recurse into [`AssemblyPart::Node`] parts by calling
    /// [`Assembler::assemble`] when they need the child's output.
    fn process_assembled_node(&mut self, parts: Vec<AssemblyPart<'_>>, node: NodeRef<'_>)
        -> Self::Output;

    /// Assembles `node` and hands its parts to the implementation.
    fn assemble(&mut self, node: NodeRef<'_>) -> Self::Output {
        let parts = assembly_parts(node);
        self.process_assembled_node(parts, node)
    }
}

// =============================================================================
// TOKEN COLLECTOR
// =============================================================================

/// Flattens a node into every token it holds, in source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCollector;

impl Assembler for TokenCollector {
    type Output = Vec<TokenRef>;

    fn process_assembled_node(
        &mut self,
        parts: Vec<AssemblyPart<'_>>,
        _node: NodeRef<'_>,
    ) -> Vec<TokenRef> {
        let mut tokens = Vec::new();
        for part in parts {
            match part {
                AssemblyPart::Token(token) => tokens.push(Arc::clone(token)),
                AssemblyPart::Node(child) => tokens.extend(self.assemble(child)),
            }
        }
        tokens
    }
}

/// Returns every token of `node` in source order.
pub fn collect_tokens(node: NodeRef<'_>) -> Vec<TokenRef> {
    TokenCollector.assemble(node)
}
