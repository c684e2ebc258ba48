//! # AST Printer
//!
//! Reconstructs formatted source text from a parsed [`ScadFile`].
//!
//! Spacing and operator symbols are normalized; newlines and comments
//! attached to tokens are re-emitted in place. All output goes through one
//! buffer and one [`NewlineState`], so newline requests made by different
//! nodes collapse instead of producing blank lines.
//!
//! ## Newline rules
//!
//! - A newline written by the user is always kept.
//! - A newline the printer requests (after a statement, inside a block) is
//!   pending until the next text is written, and is satisfied by a user
//!   newline if one comes first.
//! - Comments that follow a pending newline on the same source line stay on
//!   the line they trailed.
//!
//! ## Example
//!
//! ```rust
//! use openscad_format::{format_source, FormattingConfiguration};
//!
//! let out = format_source("x=1;cube ( 10 ) ;", &FormattingConfiguration::default()).unwrap();
//! assert_eq!(out, "x = 1;\ncube(10);\n");
//! ```

mod visit;

use crate::configuration::FormattingConfiguration;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use openscad_ast::nodes::{Expression, ScadFile, Statement};
use openscad_ast::token::{ExtraTokenKind, Token};
use openscad_ast::visitor::Visitor;
use tracing::debug;

// =============================================================================
// STATE
// =============================================================================

/// Newline bookkeeping shared by every node printed in one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NewlineState {
    /// Nothing but indentation may be written on the current line yet.
    at_line_start: bool,
    /// Newline requested by the printer, with its reason.
    pending_newline: Option<&'static str>,
    /// A single space is owed before the next text.
    pending_space: bool,
    /// A `//` comment was written; the line must end before more text.
    needs_break: bool,
}

impl Default for NewlineState {
    fn default() -> Self {
        Self {
            at_line_start: true,
            pending_newline: None,
            pending_space: false,
            needs_break: false,
        }
    }
}

/// Saved printer position for speculative rendering.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    len: usize,
    indent: usize,
    state: NewlineState,
}

// =============================================================================
// PRINTER
// =============================================================================

/// Formatting session over one tree.
pub struct Printer<'c> {
    config: &'c FormattingConfiguration,
    indent_unit: String,
    out: String,
    indent: usize,
    state: NewlineState,
    /// Printing the links of a module instantiation chain.
    in_chain: bool,
    /// The current chain is rendered one link per line.
    chain_broken: bool,
    /// Rendering a chain only to measure its first line.
    measuring: bool,
    /// Indent level of the statement whose value is being printed; lines
    /// starting at that level inside the value hang one level deeper.
    continuation: Option<usize>,
}

impl<'c> Printer<'c> {
    /// Create a printer.
    pub fn new(config: &'c FormattingConfiguration) -> Self {
        Self {
            config,
            indent_unit: config.indent_unit(),
            out: String::new(),
            indent: 0,
            state: NewlineState::default(),
            in_chain: false,
            chain_broken: false,
            measuring: false,
            continuation: None,
        }
    }

    /// Format a whole file.
    ///
    /// ## Returns
    ///
    /// The formatted text, ending with exactly one newline, or an empty
    /// string when there is nothing to print. A newline still pending at
    /// the end is replaced by that final newline.
    pub fn print_file(mut self, root: &ScadFile) -> String {
        self.visit_scad_file(root);

        let mut out = self.out.trim_end().to_string();
        if !out.is_empty() {
            out.push('\n');
        }
        debug!(bytes = out.len(), statements = root.statements.len(), "formatted file");
        out
    }

    // =========================================================================
    // RECURSION
    // =========================================================================

    fn statement(&mut self, stmt: &Statement) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            stmt.accept(self)
        })
    }

    fn expression(&mut self, expr: &Expression) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            expr.accept(self)
        })
    }

    // =========================================================================
    // LINES AND SPACES
    // =========================================================================

    /// End the current line now.
    fn newline(&mut self, reason: &'static str) {
        self.state.pending_newline = None;
        self.state.pending_space = false;
        self.state.needs_break = false;
        if self.out.is_empty() {
            return;
        }
        if self.config.debug_newlines {
            self.out.push_str("/*");
            self.out.push_str(reason);
            self.out.push_str("*/");
        }
        self.out.push('\n');
        self.state.at_line_start = true;
    }

    /// Ask for a line break before the next text.
    fn request_newline(&mut self, reason: &'static str) {
        if !self.state.at_line_start {
            self.state.pending_newline = Some(reason);
        }
    }

    /// Emit owed line breaks.
    fn flush(&mut self) {
        if let Some(reason) = self.state.pending_newline {
            self.newline(reason);
        } else if self.state.needs_break {
            self.newline("comment");
        }
    }

    /// Ask for a space before the next text on this line.
    fn space(&mut self) {
        self.state.pending_space = true;
    }

    /// Write text, honoring owed newlines, indentation and spaces.
    fn write(&mut self, text: &str) {
        self.emit(text, false);
    }

    fn emit(&mut self, text: &str, closing: bool) {
        self.flush();
        if self.state.at_line_start {
            self.indent_line(closing);
        } else if self.state.pending_space {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.state.at_line_start = false;
        self.state.pending_space = false;
    }

    /// Write text that never takes a space before it.
    fn write_glued(&mut self, text: &str) {
        self.state.pending_space = false;
        self.write(text);
    }

    /// Indent a fresh line. A closing delimiter never hangs.
    fn indent_line(&mut self, closing: bool) {
        let hanging = !closing && self.continuation == Some(self.indent);
        for _ in 0..self.indent + usize::from(hanging) {
            self.out.push_str(&self.indent_unit);
        }
    }

    // =========================================================================
    // TOKENS
    // =========================================================================

    /// Re-emit the newlines and comments attached before `token`.
    fn extras(&mut self, token: &Token) {
        let mut same_line = true;
        for extra in &token.extra_tokens {
            match &extra.kind {
                ExtraTokenKind::NewLine => {
                    same_line = false;
                    self.newline("user");
                }
                ExtraTokenKind::Whitespace => {}
                ExtraTokenKind::SingleLineComment { contents } => {
                    self.comment(&format!("//{contents}"), same_line);
                    self.state.needs_break = true;
                }
                ExtraTokenKind::MultiLineComment { contents } => {
                    self.comment(&format!("/*{contents}*/"), same_line);
                    self.state.pending_space = true;
                }
            }
        }
    }

    /// Write a comment, keeping it on the current line when it trails
    /// a pending newline.
    fn comment(&mut self, text: &str, same_line: bool) {
        let trailing = same_line && self.state.pending_newline.is_some();
        if !trailing {
            self.flush();
        }
        if self.state.at_line_start {
            self.indent_line(false);
        } else if !matches!(self.out.chars().last(), Some('(' | '[')) {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.state.at_line_start = false;
        self.state.pending_space = false;
    }

    /// Emit a token's extras followed by `text`.
    fn token(&mut self, token: &Token, text: &str) {
        self.extras(token);
        self.write(text);
    }

    /// Emit a token's extras followed by its own lexeme.
    fn lexeme(&mut self, token: &Token) {
        self.token(token, token.lexeme());
    }

    /// Emit a token that never takes a space before it.
    fn glued(&mut self, token: &Token, text: &str) {
        self.extras(token);
        self.write_glued(text);
    }

    /// Emit only a token's extras; its text is normalized away.
    fn silent(&mut self, token: &Token) {
        self.extras(token);
    }

    /// Emit an opening delimiter and indent its contents.
    fn open(&mut self, token: &Token, text: &str, glued: bool) {
        if glued {
            self.glued(token, text);
        } else {
            self.token(token, text);
        }
        self.indent += 1;
    }

    /// Emit a closing delimiter, dedenting before its text.
    fn close(&mut self, token: &Token, text: &str) {
        self.extras(token);
        self.indent = self.indent.saturating_sub(1);
        self.state.pending_space = false;
        self.emit(text, true);
    }

    /// Emit a token exactly as it appeared in the source.
    fn verbatim(&mut self, token: &Token) {
        for extra in &token.extra_tokens {
            self.out.push_str(extra.text());
        }
        self.out.push_str(token.lexeme());
        self.state.at_line_start = self.out.ends_with('\n');
    }

    // =========================================================================
    // SPECULATION
    // =========================================================================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.out.len(),
            indent: self.indent,
            state: self.state,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.out.truncate(checkpoint.len);
        self.indent = checkpoint.indent;
        self.state = checkpoint.state;
    }

    /// Width of the first line rendered since `checkpoint` that holds more
    /// than blanks or a comment.
    fn first_line_width(&self, checkpoint: &Checkpoint) -> usize {
        let starts_fresh =
            checkpoint.state.at_line_start || checkpoint.state.pending_newline.is_some();
        let line_start = if starts_fresh {
            checkpoint.len
        } else {
            self.out[..checkpoint.len].rfind('\n').map_or(0, |i| i + 1)
        };

        self.out[line_start..]
            .lines()
            .find(|line| {
                let trimmed = line.trim();
                !(trimmed.is_empty()
                    || trimmed.starts_with("//")
                    || (trimmed.starts_with("/*") && trimmed.ends_with("*/")))
            })
            .map_or(0, |line| line.chars().count())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{format_source, FormattingConfiguration};

    fn format(source: &str) -> String {
        format_source(source, &FormattingConfiguration::default()).unwrap()
    }

    #[test]
    fn test_normalizes_spacing() {
        assert_eq!(format("x=1+2*3;"), "x = 1 + 2 * 3;\n");
    }

    #[test]
    fn test_one_statement_per_line() {
        assert_eq!(format("a=1;b=2;cube();"), "a = 1;\nb = 2;\ncube();\n");
    }

    #[test]
    fn test_user_newline_is_not_doubled() {
        assert_eq!(format("a=1;\nb=2;\n"), "a = 1;\nb = 2;\n");
    }

    #[test]
    fn test_blank_line_is_kept() {
        assert_eq!(format("a=1;\n\nb=2;"), "a = 1;\n\nb = 2;\n");
    }

    #[test]
    fn test_leading_blank_lines_dropped() {
        assert_eq!(format("\n\n\ncube();"), "cube();\n");
    }

    #[test]
    fn test_trailing_comment_stays_on_line() {
        assert_eq!(
            format("a = 1; // one\nb = 2;"),
            "a = 1; // one\nb = 2;\n"
        );
    }

    #[test]
    fn test_trailing_block_comment_stays_on_line() {
        assert_eq!(format("a = 1; /* one */ b = 2;"), "a = 1; /* one */\nb = 2;\n");
    }

    #[test]
    fn test_comment_at_end_of_file() {
        assert_eq!(format("cube(); // done"), "cube(); // done\n");
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(format(""), "");
        assert_eq!(format("  \n\n"), "");
    }

    #[test]
    fn test_debug_newlines_annotate_reasons() {
        let config = FormattingConfiguration {
            debug_newlines: true,
            ..FormattingConfiguration::default()
        };
        let out = format_source("a=1;\nb=2;", &config).unwrap();
        assert_eq!(out, "a = 1;/*user*/\nb = 2;\n");
        let out = format_source("a=1;b=2;", &config).unwrap();
        assert_eq!(out, "a = 1;/*statement*/\nb = 2;\n");
    }
}
