//! # AST Nodes
//!
//! Lossless AST node model.
//!
//! Each node stores its semantic children together with the exact tokens that
//! realized it, grouped in a per-node `*Tokens` record. Nodes are immutable
//! and shared through [`Arc`]: a pass that rewrites a tree builds a new root
//! and reuses every unchanged subtree by reference.
//!
//! The closed set of node kinds is expressed as two enums, [`Statement`] and
//! [`Expression`], plus the [`AssignmentNode`] used for assignments, call
//! arguments, parameters and loop bindings. [`NodeRef`] borrows any of them
//! uniformly for traversals.

mod comprehensions;
mod expressions;
mod statements;

pub use comprehensions::*;
pub use expressions::*;
pub use statements::*;

use crate::span::CodeSpan;
use crate::token::TokenRef;
use std::sync::Arc;

// =============================================================================
// FILE
// =============================================================================

/// Root of a parsed file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScadFile {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
    /// Tokens of the file.
    pub tokens: ScadFileTokens,
}

/// Tokens owned directly by a [`ScadFile`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScadFileTokens {
    /// End-of-text token; carries the trailing whitespace and comments.
    pub eot: TokenRef,
}

// =============================================================================
// STATEMENT
// =============================================================================

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `use <file>`
    Use(Arc<UseStmt>),
    /// `include <file>`
    Include(Arc<IncludeStmt>),
    /// `tags name(args) child`
    ModuleInstantiation(Arc<ModuleInstantiationStmt>),
    /// `module name(params) body`
    ModuleDeclaration(Arc<ModuleDeclarationStmt>),
    /// `function name(params) = expr;`
    FunctionDeclaration(Arc<FunctionDeclarationStmt>),
    /// `{ statements }`
    Block(Arc<BlockStmt>),
    /// `;`
    Noop(Arc<NoopStmt>),
    /// `if (cond) then else otherwise`
    IfElse(Arc<IfElseStatement>),
    /// `name = value;`
    Assignment(Arc<AssignmentNode>),
    /// Tokens that failed to parse into any statement.
    Error(Arc<ErrorNode>),
}

impl Statement {
    /// Returns true when both values point at the same node allocation.
    pub fn same_node(&self, other: &Statement) -> bool {
        match (self, other) {
            (Self::Use(a), Self::Use(b)) => Arc::ptr_eq(a, b),
            (Self::Include(a), Self::Include(b)) => Arc::ptr_eq(a, b),
            (Self::ModuleInstantiation(a), Self::ModuleInstantiation(b)) => Arc::ptr_eq(a, b),
            (Self::ModuleDeclaration(a), Self::ModuleDeclaration(b)) => Arc::ptr_eq(a, b),
            (Self::FunctionDeclaration(a), Self::FunctionDeclaration(b)) => Arc::ptr_eq(a, b),
            (Self::Block(a), Self::Block(b)) => Arc::ptr_eq(a, b),
            (Self::Noop(a), Self::Noop(b)) => Arc::ptr_eq(a, b),
            (Self::IfElse(a), Self::IfElse(b)) => Arc::ptr_eq(a, b),
            (Self::Assignment(a), Self::Assignment(b)) => Arc::ptr_eq(a, b),
            (Self::Error(a), Self::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns the node's name for debugging and diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Use(_) => "UseStmt",
            Self::Include(_) => "IncludeStmt",
            Self::ModuleInstantiation(_) => "ModuleInstantiationStmt",
            Self::ModuleDeclaration(_) => "ModuleDeclarationStmt",
            Self::FunctionDeclaration(_) => "FunctionDeclarationStmt",
            Self::Block(_) => "BlockStmt",
            Self::Noop(_) => "NoopStmt",
            Self::IfElse(_) => "IfElseStatement",
            Self::Assignment(_) => "AssignmentNode",
            Self::Error(_) => "ErrorNode",
        }
    }

    /// Returns true for an [`ErrorNode`] that holds no tokens.
    pub fn is_zero_width_error(&self) -> bool {
        matches!(self, Self::Error(node) if node.tokens.is_empty())
    }

    /// Returns the source span of this statement.
    pub fn span(&self) -> Option<CodeSpan> {
        NodeRef::Statement(self).span()
    }
}

// =============================================================================
// EXPRESSION
// =============================================================================

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `-x`, `+x`, `!x`
    UnaryOp(Arc<UnaryOpExpr>),
    /// `a + b` and friends
    BinaryOp(Arc<BinaryOpExpr>),
    /// `cond ? a : b`
    Ternary(Arc<TernaryExpr>),
    /// `array[index]`
    ArrayLookup(Arc<ArrayLookupExpr>),
    /// Number, string, boolean or `undef`
    Literal(Arc<LiteralExpr>),
    /// `[begin : step : end]`
    Range(Arc<RangeExpr>),
    /// `[a, b, c]`
    Vector(Arc<VectorExpr>),
    /// Bare identifier
    Lookup(Arc<LookupExpr>),
    /// `expr.member`
    MemberLookup(Arc<MemberLookupExpr>),
    /// `callee(args)`
    FunctionCall(Arc<FunctionCallExpr>),
    /// `let (args) expr`
    Let(Arc<LetExpr>),
    /// `assert (args) expr`
    Assert(Arc<AssertExpr>),
    /// `echo (args) expr`
    Echo(Arc<EchoExpr>),
    /// `if (cond) expr else expr` inside a list comprehension
    LcIf(Arc<LcIfExpr>),
    /// `each expr` inside a list comprehension
    LcEach(Arc<LcEachExpr>),
    /// `for (args) expr` inside a list comprehension
    LcFor(Arc<LcForExpr>),
    /// `for (init; cond; update) expr` inside a list comprehension
    LcForC(Arc<LcForCExpr>),
    /// `let (args) expr` inside a list comprehension
    LcLet(Arc<LcLetExpr>),
    /// `(expr)`
    Grouping(Arc<GroupingExpr>),
    /// `function (params) expr`
    AnonymousFunction(Arc<AnonymousFunctionExpr>),
}

impl Expression {
    /// Returns true when both values point at the same node allocation.
    pub fn same_node(&self, other: &Expression) -> bool {
        match (self, other) {
            (Self::UnaryOp(a), Self::UnaryOp(b)) => Arc::ptr_eq(a, b),
            (Self::BinaryOp(a), Self::BinaryOp(b)) => Arc::ptr_eq(a, b),
            (Self::Ternary(a), Self::Ternary(b)) => Arc::ptr_eq(a, b),
            (Self::ArrayLookup(a), Self::ArrayLookup(b)) => Arc::ptr_eq(a, b),
            (Self::Literal(a), Self::Literal(b)) => Arc::ptr_eq(a, b),
            (Self::Range(a), Self::Range(b)) => Arc::ptr_eq(a, b),
            (Self::Vector(a), Self::Vector(b)) => Arc::ptr_eq(a, b),
            (Self::Lookup(a), Self::Lookup(b)) => Arc::ptr_eq(a, b),
            (Self::MemberLookup(a), Self::MemberLookup(b)) => Arc::ptr_eq(a, b),
            (Self::FunctionCall(a), Self::FunctionCall(b)) => Arc::ptr_eq(a, b),
            (Self::Let(a), Self::Let(b)) => Arc::ptr_eq(a, b),
            (Self::Assert(a), Self::Assert(b)) => Arc::ptr_eq(a, b),
            (Self::Echo(a), Self::Echo(b)) => Arc::ptr_eq(a, b),
            (Self::LcIf(a), Self::LcIf(b)) => Arc::ptr_eq(a, b),
            (Self::LcEach(a), Self::LcEach(b)) => Arc::ptr_eq(a, b),
            (Self::LcFor(a), Self::LcFor(b)) => Arc::ptr_eq(a, b),
            (Self::LcForC(a), Self::LcForC(b)) => Arc::ptr_eq(a, b),
            (Self::LcLet(a), Self::LcLet(b)) => Arc::ptr_eq(a, b),
            (Self::Grouping(a), Self::Grouping(b)) => Arc::ptr_eq(a, b),
            (Self::AnonymousFunction(a), Self::AnonymousFunction(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns the node's name for debugging and diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::UnaryOp(_) => "UnaryOpExpr",
            Self::BinaryOp(_) => "BinaryOpExpr",
            Self::Ternary(_) => "TernaryExpr",
            Self::ArrayLookup(_) => "ArrayLookupExpr",
            Self::Literal(_) => "LiteralExpr",
            Self::Range(_) => "RangeExpr",
            Self::Vector(_) => "VectorExpr",
            Self::Lookup(_) => "LookupExpr",
            Self::MemberLookup(_) => "MemberLookupExpr",
            Self::FunctionCall(_) => "FunctionCallExpr",
            Self::Let(_) => "LetExpr",
            Self::Assert(_) => "AssertExpr",
            Self::Echo(_) => "EchoExpr",
            Self::LcIf(_) => "LcIfExpr",
            Self::LcEach(_) => "LcEachExpr",
            Self::LcFor(_) => "LcForExpr",
            Self::LcForC(_) => "LcForCExpr",
            Self::LcLet(_) => "LcLetExpr",
            Self::Grouping(_) => "GroupingExpr",
            Self::AnonymousFunction(_) => "AnonymousFunctionExpr",
        }
    }

    /// Returns the source span of this expression.
    pub fn span(&self) -> Option<CodeSpan> {
        NodeRef::Expression(self).span()
    }
}

// =============================================================================
// ASSIGNMENT
// =============================================================================

/// What an [`AssignmentNode`] is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentRole {
    /// `x = 5;` statement, or a binding in `let`/`for`.
    VariableDeclaration,
    /// Parameter of a module, function or function literal.
    ArgumentDeclaration,
    /// Argument passed at a call site, named or positional.
    ArgumentAssignment,
}

/// Assignment of a value to a name.
///
/// Used uniformly for variable statements, call arguments, parameters and
/// loop bindings. A positional argument has no name; a parameter without a
/// default has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentNode {
    /// Assigned name.
    pub name: Option<String>,
    /// Assigned value.
    pub value: Option<Expression>,
    /// Usage of this node.
    pub role: AssignmentRole,
    /// Tokens of the assignment.
    pub tokens: AssignmentTokens,
}

/// Tokens of an [`AssignmentNode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentTokens {
    /// Name token.
    pub name: Option<TokenRef>,
    /// `=` token.
    pub equals: Option<TokenRef>,
    /// Comma run following the assignment inside an argument list.
    pub trailing_commas: Vec<TokenRef>,
    /// `;` ending an assignment statement.
    pub semicolon: Option<TokenRef>,
}

impl AssignmentNode {
    /// Returns the source span of this assignment.
    pub fn span(self: &Arc<Self>) -> Option<CodeSpan> {
        NodeRef::Assignment(self).span()
    }
}

// =============================================================================
// SHARED TOKEN RECORDS
// =============================================================================

/// Tokens of a parenthesized argument or parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentListTokens {
    /// `(` token.
    pub open: TokenRef,
    /// Useless commas before the first argument.
    pub leading_commas: Vec<TokenRef>,
    /// `)` token.
    pub close: TokenRef,
}

// =============================================================================
// NODE REFERENCE
// =============================================================================

/// Borrowed reference to any AST node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// The file root.
    File(&'a ScadFile),
    /// A statement.
    Statement(&'a Statement),
    /// An expression.
    Expression(&'a Expression),
    /// An assignment inside an argument or binding list.
    Assignment(&'a Arc<AssignmentNode>),
}

impl<'a> NodeRef<'a> {
    /// Returns the node's name for debugging and diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::File(_) => "ScadFile",
            Self::Statement(stmt) => stmt.kind_name(),
            Self::Expression(expr) => expr.kind_name(),
            Self::Assignment(_) => "AssignmentNode",
        }
    }

    /// Returns true when both references point at the same node allocation.
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        match (self, other) {
            (Self::File(a), NodeRef::File(b)) => std::ptr::eq(*a, *b),
            (Self::Statement(a), NodeRef::Statement(b)) => a.same_node(b),
            (Self::Expression(a), NodeRef::Expression(b)) => a.same_node(b),
            (Self::Assignment(a), NodeRef::Assignment(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Computes the span covering every token of the node.
    ///
    /// Extra tokens are not part of the span. A zero-width [`ErrorNode`]
    /// yields an empty span at its position. Returns `None` only for nodes
    /// that hold no tokens at all.
    pub fn span(&self) -> Option<CodeSpan> {
        if let Self::Statement(Statement::Error(node)) = self {
            if node.tokens.is_empty() {
                return Some(CodeSpan::empty_at(node.pos.clone()));
            }
        }
        let parts = crate::assembler::assembly_parts(*self);
        let start = parts.iter().find_map(|part| part.span())?;
        let end = parts.iter().rev().find_map(|part| part.span())?;
        Some(CodeSpan::new(start.start, end.end))
    }
}
