//! Expression node payloads.

use super::{ArgumentListTokens, AssignmentNode, Expression};
use crate::token::TokenRef;
use std::sync::Arc;

// =============================================================================
// OPERATORS
// =============================================================================

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-`
    Negate,
    /// `+`
    Plus,
    /// `!`
    Not,
}

impl UnaryOperator {
    /// Source spelling of the operator.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "!",
        }
    }
}

/// Infix operators, listed from lowest to highest precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
}

impl BinaryOperator {
    /// Source spelling of the operator.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

// =============================================================================
// OPERATOR EXPRESSIONS
// =============================================================================

/// `op right`
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOpExpr {
    /// Operator.
    pub operation: UnaryOperator,
    /// Operand.
    pub right: Expression,
    /// Tokens of the expression.
    pub tokens: OperatorTokens,
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOpExpr {
    /// Left operand.
    pub left: Expression,
    /// Operator.
    pub operation: BinaryOperator,
    /// Right operand.
    pub right: Expression,
    /// Tokens of the expression.
    pub tokens: OperatorTokens,
}

/// Tokens of unary and binary operator expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorTokens {
    /// Operator token.
    pub operator: TokenRef,
}

/// `cond ? if_expr : else_expr`
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    /// Condition.
    pub cond: Expression,
    /// Value when the condition holds.
    pub if_expr: Expression,
    /// Value otherwise.
    pub else_expr: Expression,
    /// Tokens of the expression.
    pub tokens: TernaryTokens,
}

/// Tokens of a [`TernaryExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryTokens {
    /// `?` token.
    pub question_mark: TokenRef,
    /// `:` token.
    pub colon: TokenRef,
}

// =============================================================================
// POSTFIX EXPRESSIONS
// =============================================================================

/// `array[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLookupExpr {
    /// Indexed value.
    pub array: Expression,
    /// Index.
    pub index: Expression,
    /// Tokens of the expression.
    pub tokens: BracketTokens,
}

/// `expr.member`
#[derive(Debug, Clone, PartialEq)]
pub struct MemberLookupExpr {
    /// Accessed value.
    pub expr: Expression,
    /// Member name.
    pub member: String,
    /// Tokens of the expression.
    pub tokens: MemberLookupTokens,
}

/// Tokens of a [`MemberLookupExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemberLookupTokens {
    /// `.` token.
    pub dot: TokenRef,
    /// Member name token.
    pub member: TokenRef,
}

/// `callee(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpr {
    /// Called value; usually a [`LookupExpr`].
    pub callee: Expression,
    /// Arguments.
    pub args: Vec<Arc<AssignmentNode>>,
    /// Tokens of the argument list.
    pub tokens: ArgumentListTokens,
}

// =============================================================================
// PRIMARY EXPRESSIONS
// =============================================================================

/// Decoded value of a [`LiteralExpr`].
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Number literal.
    Number(f64),
    /// String literal, unescaped.
    String(String),
    /// `true` or `false`.
    Boolean(bool),
    /// `undef`.
    Undef,
}

/// Literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    /// Decoded value.
    pub value: LiteralValue,
    /// Tokens of the expression.
    pub tokens: LiteralTokens,
}

/// Tokens of a [`LiteralExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralTokens {
    /// Literal token.
    pub literal: TokenRef,
}

/// Reference to a variable or function by name.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupExpr {
    /// Looked-up name.
    pub name: String,
    /// Tokens of the expression.
    pub tokens: LookupTokens,
}

/// Tokens of a [`LookupExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTokens {
    /// Identifier token.
    pub identifier: TokenRef,
}

/// `(inner)`
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    /// Parenthesized expression.
    pub inner: Expression,
    /// Tokens of the expression.
    pub tokens: ParenTokens,
}

/// Open and close parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct ParenTokens {
    /// `(` token.
    pub open: TokenRef,
    /// `)` token.
    pub close: TokenRef,
}

/// Open and close brackets.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketTokens {
    /// `[` token.
    pub open: TokenRef,
    /// `]` token.
    pub close: TokenRef,
}

// =============================================================================
// VECTORS AND RANGES
// =============================================================================

/// `[begin : end]` or `[begin : step : end]`
#[derive(Debug, Clone, PartialEq)]
pub struct RangeExpr {
    /// First value.
    pub begin: Expression,
    /// Increment.
    pub step: Option<Expression>,
    /// Last value.
    pub end: Expression,
    /// Tokens of the expression.
    pub tokens: RangeTokens,
}

/// Tokens of a [`RangeExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct RangeTokens {
    /// `[` token.
    pub open: TokenRef,
    /// `:` after the begin value.
    pub first_colon: TokenRef,
    /// `:` after the step value.
    pub second_colon: Option<TokenRef>,
    /// `]` token.
    pub close: TokenRef,
}

/// `[a, b, c]`
///
/// Redundant commas never produce children. They are kept in the tokens so
/// the vector can be reprinted.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorExpr {
    /// Elements.
    pub children: Vec<Expression>,
    /// Tokens of the expression.
    pub tokens: VectorTokens,
}

/// Tokens of a [`VectorExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct VectorTokens {
    /// `[` token.
    pub open: TokenRef,
    /// Commas of an otherwise empty vector.
    pub leading_commas: Vec<TokenRef>,
    /// Comma run after each child; parallel to `children`.
    pub commas: Vec<Vec<TokenRef>>,
    /// `]` token.
    pub close: TokenRef,
}

// =============================================================================
// CALL-LIKE EXPRESSIONS
// =============================================================================

/// Shape shared by `let`, `assert` and `echo` expressions:
/// `keyword(args) expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallLikeExpr {
    /// Arguments.
    pub args: Vec<Arc<AssignmentNode>>,
    /// Decorated expression. Always present for `let`.
    pub expr: Option<Expression>,
    /// Tokens of the expression.
    pub tokens: CallLikeTokens,
}

/// Tokens of a [`CallLikeExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct CallLikeTokens {
    /// Keyword token.
    pub keyword: TokenRef,
    /// Argument list tokens.
    pub args: ArgumentListTokens,
}

/// `let (bindings) expr`
pub type LetExpr = CallLikeExpr;
/// `assert (args) expr`
pub type AssertExpr = CallLikeExpr;
/// `echo (args) expr`
pub type EchoExpr = CallLikeExpr;

/// `function (params) expr`
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousFunctionExpr {
    /// Parameters.
    pub definition_args: Vec<Arc<AssignmentNode>>,
    /// Body.
    pub expr: Expression,
    /// Tokens of the expression.
    pub tokens: AnonymousFunctionTokens,
}

/// Tokens of an [`AnonymousFunctionExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousFunctionTokens {
    /// `function` keyword.
    pub function_keyword: TokenRef,
    /// Parameter list tokens.
    pub args: ArgumentListTokens,
}
