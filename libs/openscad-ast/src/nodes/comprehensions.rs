//! List comprehension node payloads.
//!
//! Every comprehension element wraps a continuation expression, which may be
//! another comprehension element: `[for (i = x) if (i > 0) let (j = i) j]`.

use super::{ArgumentListTokens, AssignmentNode, Expression};
use crate::token::TokenRef;
use std::sync::Arc;

/// `if (cond) if_expr else else_expr`
#[derive(Debug, Clone, PartialEq)]
pub struct LcIfExpr {
    /// Filter condition.
    pub cond: Expression,
    /// Element produced when the condition holds.
    pub if_expr: Expression,
    /// Element produced otherwise.
    pub else_expr: Option<Expression>,
    /// Tokens of the expression.
    pub tokens: LcIfTokens,
}

/// Tokens of an [`LcIfExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct LcIfTokens {
    /// `if` keyword.
    pub if_keyword: TokenRef,
    /// `(` token.
    pub open: TokenRef,
    /// `)` token.
    pub close: TokenRef,
    /// `else` keyword.
    pub else_keyword: Option<TokenRef>,
}

/// `each expr`
#[derive(Debug, Clone, PartialEq)]
pub struct LcEachExpr {
    /// Flattened expression.
    pub expr: Expression,
    /// Tokens of the expression.
    pub tokens: LcEachTokens,
}

/// Tokens of an [`LcEachExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct LcEachTokens {
    /// `each` keyword.
    pub each_keyword: TokenRef,
}

/// `for (bindings) expr`
#[derive(Debug, Clone, PartialEq)]
pub struct LcForExpr {
    /// Loop bindings.
    pub args: Vec<Arc<AssignmentNode>>,
    /// Element expression.
    pub expr: Expression,
    /// Tokens of the expression.
    pub tokens: LcForTokens,
}

/// Tokens of an [`LcForExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct LcForTokens {
    /// `for` keyword.
    pub for_keyword: TokenRef,
    /// Binding list tokens.
    pub args: ArgumentListTokens,
}

/// `for (init; cond; update) expr`
#[derive(Debug, Clone, PartialEq)]
pub struct LcForCExpr {
    /// Initial bindings.
    pub args: Vec<Arc<AssignmentNode>>,
    /// Loop condition.
    pub cond: Expression,
    /// Bindings evaluated after each iteration.
    pub incr_args: Vec<Arc<AssignmentNode>>,
    /// Element expression.
    pub expr: Expression,
    /// Tokens of the expression.
    pub tokens: LcForCTokens,
}

/// Tokens of an [`LcForCExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct LcForCTokens {
    /// `for` keyword.
    pub for_keyword: TokenRef,
    /// `(` token.
    pub open: TokenRef,
    /// Useless commas before the first initial binding.
    pub init_leading_commas: Vec<TokenRef>,
    /// `;` after the initial bindings.
    pub first_semicolon: TokenRef,
    /// `;` after the condition.
    pub second_semicolon: TokenRef,
    /// Useless commas before the first update binding.
    pub incr_leading_commas: Vec<TokenRef>,
    /// `)` token.
    pub close: TokenRef,
}

/// `let (bindings) expr` inside a list comprehension
#[derive(Debug, Clone, PartialEq)]
pub struct LcLetExpr {
    /// Bindings.
    pub args: Vec<Arc<AssignmentNode>>,
    /// Element expression.
    pub expr: Expression,
    /// Tokens of the expression.
    pub tokens: LcLetTokens,
}

/// Tokens of an [`LcLetExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct LcLetTokens {
    /// `let` keyword.
    pub let_keyword: TokenRef,
    /// Binding list tokens.
    pub args: ArgumentListTokens,
}
