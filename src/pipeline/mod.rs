//! Background frame production.
//!
//! One production loop thread renders the active view's tree into a bounded queue; the
//! consumer pulls frames at its own pace. Installing a view swaps the loop atomically.

/// The production loop and its pull interface.
pub mod animation;
/// Cooperative cancellation.
pub mod cancel;
/// Bounded frame FIFO.
pub mod queue;
