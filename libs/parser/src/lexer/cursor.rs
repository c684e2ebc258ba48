//! # Character Cursor
//!
//! Peekable character cursor for the lexer.
//! Tracks position (byte, line, column) as it advances.
//!
//! ## Example
//!
//! ```rust
//! use openscad_ast::span::CodeFile;
//! use openscad_parser::lexer::Cursor;
//!
//! let mut cursor = Cursor::new(CodeFile::new("a.scad", "hello"));
//! assert_eq!(cursor.peek(), Some('h'));
//! cursor.advance();
//! assert_eq!(cursor.peek(), Some('e'));
//! ```

use openscad_ast::span::{CodeFile, CodeLocation};
use std::sync::Arc;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
///
/// Provides peekable iteration over the characters of a [`CodeFile`]
/// while tracking byte offset, line, and column.
#[derive(Debug, Clone)]
pub struct Cursor {
    /// File being scanned.
    file: Arc<CodeFile>,
    /// Current byte offset.
    byte: usize,
    /// Current line (0-indexed).
    line: usize,
    /// Current column in characters (0-indexed).
    column: usize,
}

impl Cursor {
    /// Create a new cursor at the start of `file`.
    pub fn new(file: Arc<CodeFile>) -> Self {
        Self {
            file,
            byte: 0,
            line: 0,
            column: 0,
        }
    }

    /// File being scanned.
    pub fn file(&self) -> &Arc<CodeFile> {
        &self.file
    }

    /// Current location.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use openscad_ast::span::CodeFile;
    /// use openscad_parser::lexer::Cursor;
    ///
    /// let mut cursor = Cursor::new(CodeFile::new("a.scad", "a\nb"));
    /// cursor.advance();
    /// cursor.advance();
    /// let loc = cursor.location();
    /// assert_eq!((loc.offset, loc.line, loc.col), (2, 1, 0));
    /// ```
    pub fn location(&self) -> CodeLocation {
        CodeLocation {
            file: Arc::clone(&self.file),
            offset: self.byte,
            line: self.line,
            col: self.column,
        }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.byte
    }

    /// Check if at end of file.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.file.content().len()
    }

    /// Unconsumed text.
    pub fn rest(&self) -> &str {
        &self.file.content()[self.byte..]
    }

    /// Text from byte offset `start` up to the current position.
    pub fn slice_from(&self, start: usize) -> &str {
        &self.file.content()[start..self.byte]
    }

    /// Peek at current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at next character (one ahead of current).
    pub fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// Peek `n` characters ahead of the current one.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Advance to next character.
    ///
    /// ## Returns
    ///
    /// Character that was consumed, or None if at EOF
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advance while predicate is true.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    /// Move back to an earlier location of the same file.
    pub fn reset_to(&mut self, loc: &CodeLocation) {
        self.byte = loc.offset;
        self.line = loc.line;
        self.column = loc.col;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(text: &str) -> Cursor {
        Cursor::new(CodeFile::new("t.scad", text))
    }

    #[test]
    fn test_cursor_empty() {
        let cursor = cursor("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_cursor_peek_does_not_advance() {
        let cursor = cursor("abc");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek_next(), Some('b'));
        assert_eq!(cursor.peek_nth(2), Some('c'));
        assert_eq!(cursor.peek_nth(3), None);
    }

    #[test]
    fn test_cursor_advance() {
        let mut cursor = cursor("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.offset(), 1);
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.is_eof());
    }

    #[test]
    fn test_cursor_newline() {
        let mut cursor = cursor("a\nb");
        cursor.advance();
        assert_eq!(cursor.location().line, 0);
        cursor.advance();
        assert_eq!(cursor.location().line, 1);
        assert_eq!(cursor.location().col, 0);
    }

    #[test]
    fn test_cursor_utf8_counts_columns_in_chars() {
        let mut cursor = cursor("é!");
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.location().col, 1);
    }

    #[test]
    fn test_cursor_reset_and_slice() {
        let mut cursor = cursor("abc123");
        let start = cursor.location();
        cursor.advance_while(|c| c.is_alphabetic());
        assert_eq!(cursor.slice_from(start.offset), "abc");
        cursor.reset_to(&start);
        assert_eq!(cursor.peek(), Some('a'));
    }

    #[test]
    fn test_location_matches_file_computation() {
        let text = "a\n  bé\nc";
        let mut cursor = cursor(text);
        while !cursor.is_eof() {
            let loc = cursor.location();
            let expected = cursor.file().location_at(loc.offset);
            assert_eq!((loc.line, loc.col), (expected.line, expected.col));
            cursor.advance();
        }
    }
}
