//! Statement node payloads.

use super::{ArgumentListTokens, AssignmentNode, Expression, Statement};
use crate::span::CodeLocation;
use crate::token::{TokenKind, TokenRef};
use std::sync::Arc;

// =============================================================================
// USE / INCLUDE
// =============================================================================

/// `use <filename>`
#[derive(Debug, Clone, PartialEq)]
pub struct UseStmt {
    /// Path between the chevrons.
    pub filename: String,
    /// Tokens of the statement.
    pub tokens: FileImportTokens,
}

/// `include <filename>`
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeStmt {
    /// Path between the chevrons.
    pub filename: String,
    /// Tokens of the statement.
    pub tokens: FileImportTokens,
}

/// Tokens shared by `use` and `include`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileImportTokens {
    /// `use` or `include` keyword.
    pub keyword: TokenRef,
    /// `<filename>` token.
    pub filename: TokenRef,
    /// Optional `;` after the filename.
    pub semicolon: Option<TokenRef>,
}

// =============================================================================
// MODULE INSTANTIATION
// =============================================================================

/// Modifier flags set by tag tokens in front of an instantiation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstantiationTags {
    /// `!` was present.
    pub is_root: bool,
    /// `#` was present.
    pub is_highlighted: bool,
    /// `%` was present.
    pub is_background: bool,
    /// `*` was present.
    pub is_disabled: bool,
}

impl InstantiationTags {
    /// Computes the flags from a run of tag tokens.
    pub fn from_tokens(tokens: &[TokenRef]) -> Self {
        tokens.iter().fold(Self::default(), |mut tags, token| {
            match token.kind {
                TokenKind::Bang => tags.is_root = true,
                TokenKind::Hash => tags.is_highlighted = true,
                TokenKind::Percent => tags.is_background = true,
                TokenKind::Star => tags.is_disabled = true,
                _ => {}
            }
            tags
        })
    }
}

/// `name(args) child`, optionally prefixed by tags.
///
/// The child is a single statement; `;` gives a [`NoopStmt`] child and
/// `{ ... }` a [`BlockStmt`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInstantiationStmt {
    /// Instantiated module name. May be a keyword such as `for` or `echo`.
    pub name: String,
    /// Call arguments.
    pub args: Vec<Arc<AssignmentNode>>,
    /// Child statement.
    pub child: Statement,
    /// Tag flags.
    pub tags: InstantiationTags,
    /// Tokens of the instantiation.
    pub tokens: ModuleInstantiationTokens,
}

/// Tokens of a [`ModuleInstantiationStmt`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInstantiationTokens {
    /// Tag tokens in source order.
    pub tags: Vec<TokenRef>,
    /// Module name token.
    pub name: TokenRef,
    /// Argument list tokens.
    pub args: ArgumentListTokens,
}

// =============================================================================
// DECLARATIONS
// =============================================================================

/// `module name(params) body`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDeclarationStmt {
    /// Declared name.
    pub name: String,
    /// Parameters.
    pub definition_args: Vec<Arc<AssignmentNode>>,
    /// Module body.
    pub body: Statement,
    /// Tokens of the declaration.
    pub tokens: ModuleDeclarationTokens,
}

/// Tokens of a [`ModuleDeclarationStmt`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDeclarationTokens {
    /// `module` keyword.
    pub module_keyword: TokenRef,
    /// Name token.
    pub name: TokenRef,
    /// Parameter list tokens.
    pub args: ArgumentListTokens,
}

/// `function name(params) = expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclarationStmt {
    /// Declared name.
    pub name: String,
    /// Parameters.
    pub definition_args: Vec<Arc<AssignmentNode>>,
    /// Function body.
    pub expr: Expression,
    /// Tokens of the declaration.
    pub tokens: FunctionDeclarationTokens,
}

/// Tokens of a [`FunctionDeclarationStmt`].
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclarationTokens {
    /// `function` keyword.
    pub function_keyword: TokenRef,
    /// Name token.
    pub name: TokenRef,
    /// Parameter list tokens.
    pub args: ArgumentListTokens,
    /// `=` token.
    pub equals: TokenRef,
    /// `;` token.
    pub semicolon: TokenRef,
}

// =============================================================================
// BLOCKS AND CONTROL FLOW
// =============================================================================

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    /// Statements inside the braces.
    pub children: Vec<Statement>,
    /// Tokens of the block.
    pub tokens: BlockTokens,
}

/// Tokens of a [`BlockStmt`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTokens {
    /// `{` token.
    pub open: TokenRef,
    /// `}` token.
    pub close: TokenRef,
}

/// Lone `;`
#[derive(Debug, Clone, PartialEq)]
pub struct NoopStmt {
    /// Tokens of the statement.
    pub tokens: NoopTokens,
}

/// Tokens of a [`NoopStmt`].
#[derive(Debug, Clone, PartialEq)]
pub struct NoopTokens {
    /// `;` token.
    pub semicolon: TokenRef,
}

/// `if (cond) then else otherwise`
///
/// An else-if chain is an `else` branch holding another `IfElseStatement`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfElseStatement {
    /// Condition.
    pub cond: Expression,
    /// Statement run when the condition holds.
    pub then_branch: Statement,
    /// Statement run otherwise.
    pub else_branch: Option<Statement>,
    /// Tag flags.
    pub tags: InstantiationTags,
    /// Tokens of the statement.
    pub tokens: IfElseTokens,
}

/// Tokens of an [`IfElseStatement`].
#[derive(Debug, Clone, PartialEq)]
pub struct IfElseTokens {
    /// Tag tokens in source order.
    pub tags: Vec<TokenRef>,
    /// `if` keyword.
    pub if_keyword: TokenRef,
    /// `(` token.
    pub open: TokenRef,
    /// `)` token.
    pub close: TokenRef,
    /// `else` keyword.
    pub else_keyword: Option<TokenRef>,
}

// =============================================================================
// ERROR NODE
// =============================================================================

/// Run of tokens that failed to parse into any construct.
///
/// Keeps a broken region in the tree so the rest of the file still parses
/// and prints. A node without tokens marks a missing construct at `pos`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNode {
    /// Skipped tokens in source order.
    pub tokens: Vec<TokenRef>,
    /// Where the failure was detected.
    pub pos: CodeLocation,
}
