//! # Config Crate
//!
//! Centralized configuration constants for the OpenSCAD front end.
//! Formatting defaults and recursion limits are defined here so that the
//! parser and printer crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_INDENT_COUNT, DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH};
//!
//! let indent = " ".repeat(DEFAULT_INDENT_COUNT);
//! assert_eq!(indent.len(), 4);
//! assert_eq!(DEFAULT_MODULE_INSTANTIATION_BREAK_LENGTH, 40);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure constants, usable from every crate
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
