//! Pixel surfaces and per-node render cadence.

/// Premultiplied RGBA8 bitmap and compositing helpers.
pub mod bitmap;
pub(crate) mod ticker;
