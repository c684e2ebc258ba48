//! # OpenSCAD AST Crate
//!
//! Lossless syntax tree for OpenSCAD source.
//!
//! ## Architecture
//!
//! ```text
//! CodeFile → openscad-parser (tokens, AST) → openscad-ast consumers
//!                                           ├─ Assembler / TokenCollector / SymbolOutline
//!                                           ├─ Mutator (copy-on-write rewriting)
//!                                           ├─ Pinpointer (location → node)
//!                                           └─ Visitor (printer in openscad-format)
//! ```
//!
//! ## Design Principles
//!
//! - **Lossless**: every node references the exact tokens that produced it,
//!   and every token carries the whitespace and comments before it
//! - **Immutable**: nodes are shared through `Arc`; rewriting builds a new
//!   root and shares unchanged subtrees
//! - **Closed node set**: statements and expressions are enums, so every
//!   traversal is an exhaustive match
//!
//! ## Concurrency
//!
//! Trees are immutable once built and may be read from many threads at once.
//! A [`mutator::Mutator`] pass never writes into an existing tree; it returns
//! a new root, so readers of the old root are unaffected.

pub mod assembler;
pub mod mutator;
pub mod nodes;
pub mod outline;
pub mod pinpoint;
pub mod scope;
pub mod span;
pub mod token;
pub mod visitor;

pub use assembler::{assembly_parts, collect_tokens, Assembler, AssemblyPart, TokenCollector};
pub use mutator::Mutator;
pub use nodes::*;
pub use outline::{DocumentSymbol, SymbolKind, SymbolOutline};
pub use pinpoint::{pinpoint, PinpointResult, Pinpointer};
pub use scope::Scope;
pub use span::{CodeFile, CodeLocation, CodeSpan};
pub use token::{ExtraToken, ExtraTokenKind, Token, TokenKind, TokenRef, TokenValue};
pub use visitor::Visitor;

#[cfg(test)]
mod test_support;
