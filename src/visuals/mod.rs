//! Procedural visuals.
//!
//! Each visual fills its box (default: the whole parent) and is deterministic for a given
//! `seed`: `init` reseeds the generator and rebuilds all state, so identical markup yields
//! identical frame sequences.

use embedded_graphics::pixelcolor::Rgb888;

use crate::compile::attrs::Attrs;
use crate::foundation::core::Rgba8Premul;

/// Grid of randomly recoloring cells.
pub mod color_grid;
/// Sweeping hue bands.
pub mod color_wave;
/// Particles falling under gravity.
pub mod gravity;
/// Falling glyph trails.
pub mod matrix_rain;
/// Self-playing paddle game.
pub mod pong;
/// Expanding, fading rings.
pub mod pulse;
/// Text over a cycling rainbow.
pub mod rainbow_text;
/// Rotating spiral arms.
pub mod spiral;

pub(crate) fn seed_attr(a: &Attrs<'_, '_>) -> u64 {
    a.parsed("seed", "unsigned integer", |s| s.trim().parse().ok())
        .unwrap_or(0)
}

pub(crate) fn to_rgb888(c: Rgba8Premul) -> Rgb888 {
    Rgb888::new(c.r, c.g, c.b)
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/mod.rs"]
mod tests;
