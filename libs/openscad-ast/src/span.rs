//! # Source Locations
//!
//! Immutable file content plus character/line/column addressing.
//! Locations and spans are preserved through the entire pipeline from
//! lexing to printing and pinpointing.
//!
//! ## Usage
//!
//! ```rust
//! use openscad_ast::span::{CodeFile, CodeSpan};
//!
//! let file = CodeFile::new("demo.scad", "a = 1;\nb = 2;");
//! let start = file.location_at(7);
//! assert_eq!((start.line, start.col), (1, 0));
//!
//! let span = CodeSpan::new(file.location_at(0), file.location_at(6));
//! assert_eq!(span.text(), "a = 1;");
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

// =============================================================================
// CODE FILE
// =============================================================================

/// An immutable source file: its path and its full text.
///
/// Files are shared (never owned) by every location pointing into them,
/// so they are always handled through an [`Arc`].
#[derive(Debug, PartialEq, Eq)]
pub struct CodeFile {
    path: PathBuf,
    content: String,
}

impl CodeFile {
    /// Creates a shared file from a path and its content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::span::CodeFile;
    ///
    /// let file = CodeFile::new("<stdin>", "cube(10);");
    /// assert_eq!(file.content(), "cube(10);");
    /// ```
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            path: path.into(),
            content: content.into(),
        })
    }

    /// Returns the path the file was created with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full text of the file.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the location of the start of the file.
    pub fn start(self: &Arc<Self>) -> CodeLocation {
        CodeLocation {
            file: Arc::clone(self),
            offset: 0,
            line: 0,
            col: 0,
        }
    }

    /// Computes the location of a byte offset.
    ///
    /// Offsets past the end of the file are clamped to the end; offsets
    /// inside a multi-byte character are moved back to its first byte.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::span::CodeFile;
    ///
    /// let file = CodeFile::new("a.scad", "x\n  y");
    /// let loc = file.location_at(4);
    /// assert_eq!((loc.line, loc.col), (1, 2));
    /// ```
    pub fn location_at(self: &Arc<Self>, offset: usize) -> CodeLocation {
        let mut offset = offset.min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &self.content[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let col = before[line_start..].chars().count();
        CodeLocation {
            file: Arc::clone(self),
            offset,
            line,
            col,
        }
    }
}

// =============================================================================
// CODE LOCATION
// =============================================================================

/// A position inside a [`CodeFile`].
///
/// `offset` is the byte offset into the file content; `line` and `col` are
/// zero-indexed, with `col` counted in characters. Locations are immutable:
/// advancing produces a new location.
#[derive(Debug, Clone)]
pub struct CodeLocation {
    /// File the location points into.
    pub file: Arc<CodeFile>,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Zero-indexed line.
    pub line: usize,
    /// Zero-indexed column, in characters.
    pub col: usize,
}

impl CodeLocation {
    /// Returns the location after `text`, which must start at this location.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::span::CodeFile;
    ///
    /// let file = CodeFile::new("a.scad", "ab\ncd");
    /// let loc = file.start().advanced_by("ab\nc");
    /// assert_eq!((loc.offset, loc.line, loc.col), (4, 1, 1));
    /// ```
    pub fn advanced_by(&self, text: &str) -> CodeLocation {
        let mut line = self.line;
        let mut col = self.col;
        for c in text.chars() {
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        CodeLocation {
            file: Arc::clone(&self.file),
            offset: self.offset + text.len(),
            line,
            col,
        }
    }
}

impl PartialEq for CodeLocation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.file, &other.file) && self.offset == other.offset
    }
}

impl Eq for CodeLocation {}

impl fmt::Display for CodeLocation {
    /// Formats as `path:line:col` with one-based line and column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file.path().display(),
            self.line + 1,
            self.col + 1
        )
    }
}

// =============================================================================
// CODE SPAN
// =============================================================================

/// Error returned when combining an empty set of spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot combine an empty set of spans")]
pub struct EmptySpanSet;

/// A range of source between two locations, end exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpan {
    /// First location covered by the span.
    pub start: CodeLocation,
    /// Location just after the span.
    pub end: CodeLocation,
}

impl CodeSpan {
    /// Creates a span between two locations.
    pub fn new(start: CodeLocation, end: CodeLocation) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width span at a location.
    pub fn empty_at(loc: CodeLocation) -> Self {
        Self {
            start: loc.clone(),
            end: loc,
        }
    }

    /// Computes the minimal span covering all `spans`.
    ///
    /// Spans may come in any order; the earliest start and the latest end
    /// (by offset) are picked. Combining a single span returns it unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use openscad_ast::span::{CodeFile, CodeSpan};
    ///
    /// let file = CodeFile::new("a.scad", "a = 1;");
    /// let eq = CodeSpan::new(file.location_at(2), file.location_at(3));
    /// let name = CodeSpan::new(file.location_at(0), file.location_at(1));
    /// let both = CodeSpan::combine([&eq, &name]).unwrap();
    /// assert_eq!(both.text(), "a =");
    /// assert!(CodeSpan::combine(std::iter::empty::<&CodeSpan>()).is_err());
    /// ```
    pub fn combine<'a>(
        spans: impl IntoIterator<Item = &'a CodeSpan>,
    ) -> Result<CodeSpan, EmptySpanSet> {
        let mut spans = spans.into_iter();
        let first = spans.next().ok_or(EmptySpanSet)?;
        let mut start = &first.start;
        let mut end = &first.end;
        for span in spans {
            if span.start.offset < start.offset {
                start = &span.start;
            }
            if span.end.offset > end.offset {
                end = &span.end;
            }
        }
        Ok(CodeSpan::new(start.clone(), end.clone()))
    }

    /// Returns the source text covered by the span.
    pub fn text(&self) -> &str {
        &self.start.file.content()[self.start.offset..self.end.offset]
    }

    /// Returns the length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns true if the span covers no source.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for CodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}:{}", self.start, self.end.line + 1, self.end.col + 1)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_at_start() {
        let file = CodeFile::new("a.scad", "cube(10);");
        let loc = file.location_at(0);
        assert_eq!((loc.offset, loc.line, loc.col), (0, 0, 0));
        assert_eq!(loc, file.start());
    }

    #[test]
    fn test_location_at_second_line() {
        let file = CodeFile::new("a.scad", "a = 1;\nbb = 2;");
        let loc = file.location_at(9);
        assert_eq!((loc.line, loc.col), (1, 2));
    }

    #[test]
    fn test_location_at_clamps_past_end() {
        let file = CodeFile::new("a.scad", "abc");
        assert_eq!(file.location_at(99).offset, 3);
    }

    #[test]
    fn test_location_columns_count_characters() {
        let file = CodeFile::new("a.scad", "\"é\" x");
        // `x` sits after a two-byte character.
        let loc = file.location_at(5);
        assert_eq!(loc.col, 4);
    }

    #[test]
    fn test_advanced_by_matches_location_at() {
        let file = CodeFile::new("a.scad", "module m() {\n  cube();\n}");
        let advanced = file.start().advanced_by("module m() {\n  cu");
        let computed = file.location_at(advanced.offset);
        assert_eq!(advanced.line, computed.line);
        assert_eq!(advanced.col, computed.col);
    }

    #[test]
    fn test_locations_in_different_files_differ() {
        let a = CodeFile::new("a.scad", "x");
        let b = CodeFile::new("a.scad", "x");
        assert_ne!(a.start(), b.start());
    }

    #[test]
    fn test_location_display_is_one_based() {
        let file = CodeFile::new("dir/a.scad", "a\nbc");
        assert_eq!(file.location_at(3).to_string(), "dir/a.scad:2:2");
    }

    #[test]
    fn test_combine_single_span_is_unchanged() {
        let file = CodeFile::new("a.scad", "abcdef");
        let span = CodeSpan::new(file.location_at(1), file.location_at(4));
        assert_eq!(CodeSpan::combine([&span]).unwrap(), span);
    }

    #[test]
    fn test_combine_unordered_spans() {
        let file = CodeFile::new("a.scad", "abcdefgh");
        let late = CodeSpan::new(file.location_at(5), file.location_at(7));
        let early = CodeSpan::new(file.location_at(1), file.location_at(2));
        let middle = CodeSpan::new(file.location_at(3), file.location_at(4));
        let all = CodeSpan::combine([&late, &early, &middle]).unwrap();
        assert_eq!(all.start.offset, 1);
        assert_eq!(all.end.offset, 7);
        assert_eq!(all.text(), "bcdefg");
    }

    #[test]
    fn test_combine_empty_is_error() {
        let none: Vec<CodeSpan> = Vec::new();
        assert_eq!(CodeSpan::combine(&none), Err(EmptySpanSet));
    }

    #[test]
    fn test_empty_span() {
        let file = CodeFile::new("a.scad", "abc");
        let span = CodeSpan::empty_at(file.location_at(2));
        assert!(span.is_empty());
        assert_eq!(span.text(), "");
    }
}
