use crate::foundation::error::{BoardError, BoardResult};

pub use kurbo::Vec2;

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> BoardResult<Self> {
        if width == 0 || height == 0 {
            return Err(BoardError::config("canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Canvas extent as a [`Size`].
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
        }
    }
}

/// Resolved pixel extent of a node or bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Build a size from width and height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Top-left position assigned to a node by its parent during layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Horizontal offset in pixels; may be negative.
    pub x: i32,
    /// Vertical offset in pixels; may be negative.
    pub y: i32,
}

impl Pos {
    /// Build a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Declared size of a node along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dim {
    /// Absolute pixel count.
    Px(u32),
    /// Percentage of the parent extent (`"50%"`).
    Percent(f64),
}

impl Dim {
    /// Parse `"12"` or `"50%"`. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            let v: f64 = pct.trim().parse().ok()?;
            if !v.is_finite() || v < 0.0 {
                return None;
            }
            return Some(Self::Percent(v));
        }
        s.parse::<u32>().ok().map(Self::Px)
    }

    /// Resolve against the parent extent. Percentages floor toward zero.
    pub fn resolve(self, parent: u32) -> u32 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => ((f64::from(parent) * p) / 100.0).floor().max(0.0) as u32,
        }
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Opaque color from straight RGB.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channel array in `[r, g, b, a]` order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Scale all channels by `k` in `0..=255`.
    pub fn scaled(self, k: u8) -> Self {
        use crate::foundation::math::mul_div255_u8;
        let k = u16::from(k);
        Self {
            r: mul_div255_u8(u16::from(self.r), k),
            g: mul_div255_u8(u16::from(self.g), k),
            b: mul_div255_u8(u16::from(self.b), k),
            a: mul_div255_u8(u16::from(self.a), k),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
