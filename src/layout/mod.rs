//! Flex-style placement of template children.
//!
//! `solver` is pure integer arithmetic over child sizes; templates call it on every render pass
//! with the sizes of the bitmaps their children just produced.

/// Justify/align arithmetic.
pub mod solver;
