//! Built-in view types.

/// Current time.
pub mod clock;
/// A single image.
pub mod image;
/// Static or scrolling text.
pub mod message;
/// Game scores.
pub mod scoreboard;
/// A single procedural visual.
pub mod visual;

use crate::assets::color::Color;
use crate::foundation::error::{BoardError, BoardResult};

fn check_color(field: &str, color: Option<&str>) -> BoardResult<()> {
    match color {
        Some(c) => Color::parse(c)
            .map(|_| ())
            .map_err(|e| BoardError::config(format!("{field}: {e}"))),
        None => Ok(()),
    }
}
