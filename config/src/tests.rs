//! # Tests for Config Constants
//!
//! Unit tests verifying the configuration constants.

use crate::constants::*;

// =============================================================================
// FORMATTING TESTS
// =============================================================================

#[test]
fn test_default_indent_char_is_whitespace() {
    assert!(DEFAULT_INDENT_CHAR.is_whitespace());
    assert_ne!(DEFAULT_INDENT_CHAR, '\n', "indentation must not break lines");
}

#[test]
fn test_default_indent_count() {
    assert_eq!(DEFAULT_INDENT_COUNT, 4);
}

#[test]
fn test_break_length_fits_a_short_instantiation() {
    assert!(
        "cube([10, 10, 10]);".len() < DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH,
        "a single short instantiation must never be broken"
    );
}

// =============================================================================
// RECURSION TESTS
// =============================================================================

#[test]
fn test_stacker_red_zone_smaller_than_segment() {
    assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
}

#[test]
fn test_stacker_segment_is_reasonable() {
    assert!(STACKER_STACK_SIZE_BYTES >= 1024 * 1024);
}
