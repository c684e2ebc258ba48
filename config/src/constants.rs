//! # Configuration Constants
//!
//! Centralized constants for the OpenSCAD front end.
//!
//! ## Categories
//!
//! - **Formatting**: Printer defaults (indentation, line breaking)
//! - **Recursion**: Stack growth parameters for deeply nested sources

// =============================================================================
// FORMATTING CONSTANTS
// =============================================================================

/// Character used for one unit of indentation.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_INDENT_CHAR, DEFAULT_INDENT_COUNT};
///
/// let unit: String = std::iter::repeat(DEFAULT_INDENT_CHAR)
///     .take(DEFAULT_INDENT_COUNT)
///     .collect();
/// assert_eq!(unit, "    ");
/// ```
pub const DEFAULT_INDENT_CHAR: char = ' ';

/// Number of indent characters per indentation level.
pub const DEFAULT_INDENT_COUNT: usize = 4;

/// Column width above which a chain of module instantiations
/// (`translate(...) rotate(...) cube(...);`) is broken into one
/// instantiation per line.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH;
///
/// let line = "translate([10, 20, 30]) rotate([0, 0, 45]) cube(10);";
/// assert!(line.len() > DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH);
/// ```
pub const DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH: usize = 40;

// =============================================================================
// RECURSION CONSTANTS
// =============================================================================

/// Remaining stack below which the parser and printer grow the stack.
///
/// Used together with [`STACKER_STACK_SIZE_BYTES`] by the `stacker` crate
/// around every recursive descent entry point.
///
/// # Example
///
/// ```rust
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
///
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size of each new stack segment allocated by `stacker`.
pub const STACKER_STACK_SIZE_BYTES: usize = 2 * 1024 * 1024;
