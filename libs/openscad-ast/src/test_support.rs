//! Hand-built tokens and nodes for unit tests.

use crate::nodes::*;
use crate::span::{CodeFile, CodeSpan};
use crate::token::{Token, TokenKind, TokenRef, TokenValue};
use std::sync::Arc;

/// Source text that hands out tokens by offset.
pub(crate) struct Source {
    file: Arc<CodeFile>,
}

impl Source {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            file: CodeFile::new("test.scad", text),
        }
    }

    pub(crate) fn file(&self) -> &Arc<CodeFile> {
        &self.file
    }

    /// Token covering `start..end`.
    pub(crate) fn token(&self, kind: TokenKind, start: usize, end: usize) -> TokenRef {
        let span = CodeSpan::new(self.file.location_at(start), self.file.location_at(end));
        let value = match kind {
            TokenKind::Number => span.text().parse().ok().map(TokenValue::Number),
            _ => None,
        };
        Arc::new(Token {
            kind,
            span,
            extra_tokens: Vec::new(),
            value,
        })
    }
}

/// Standalone token whose file holds only `text`.
pub(crate) fn tok(kind: TokenKind, text: &str) -> TokenRef {
    Source::new(text).token(kind, 0, text.len())
}

pub(crate) fn number(text: &str, value: f64) -> Expression {
    Expression::Literal(Arc::new(LiteralExpr {
        value: LiteralValue::Number(value),
        tokens: LiteralTokens {
            literal: tok(TokenKind::Number, text),
        },
    }))
}

pub(crate) fn ident(name: &str) -> Expression {
    Expression::Lookup(Arc::new(LookupExpr {
        name: name.to_string(),
        tokens: LookupTokens {
            identifier: tok(TokenKind::Identifier, name),
        },
    }))
}

/// `a=5;b=a;` laid out over one file, offsets matching the text.
pub(crate) fn two_assignments() -> (Source, ScadFile) {
    let src = Source::new("a=5;b=a;");
    let first = AssignmentNode {
        name: Some("a".into()),
        value: Some(Expression::Literal(Arc::new(LiteralExpr {
            value: LiteralValue::Number(5.0),
            tokens: LiteralTokens {
                literal: src.token(TokenKind::Number, 2, 3),
            },
        }))),
        role: AssignmentRole::VariableDeclaration,
        tokens: AssignmentTokens {
            name: Some(src.token(TokenKind::Identifier, 0, 1)),
            equals: Some(src.token(TokenKind::Equal, 1, 2)),
            trailing_commas: Vec::new(),
            semicolon: Some(src.token(TokenKind::Semicolon, 3, 4)),
        },
    };
    let second = AssignmentNode {
        name: Some("b".into()),
        value: Some(Expression::Lookup(Arc::new(LookupExpr {
            name: "a".into(),
            tokens: LookupTokens {
                identifier: src.token(TokenKind::Identifier, 6, 7),
            },
        }))),
        role: AssignmentRole::VariableDeclaration,
        tokens: AssignmentTokens {
            name: Some(src.token(TokenKind::Identifier, 4, 5)),
            equals: Some(src.token(TokenKind::Equal, 5, 6)),
            trailing_commas: Vec::new(),
            semicolon: Some(src.token(TokenKind::Semicolon, 7, 8)),
        },
    };
    let file = ScadFile {
        statements: vec![
            Statement::Assignment(Arc::new(first)),
            Statement::Assignment(Arc::new(second)),
        ],
        tokens: ScadFileTokens {
            eot: src.token(TokenKind::Eot, 8, 8),
        },
    };
    (src, file)
}
