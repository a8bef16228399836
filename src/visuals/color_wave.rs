use std::time::Instant;

use crate::assets::color::hsv;
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::Size;
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::render::bitmap::Bitmap;

/// Diagonal rainbow bands drifting across the box.
#[derive(Debug)]
pub struct ColorWave {
    base: NodeBase,
    seed: u64,
    wavelength: f64,
    speed: f64,
    phase: f64,
}

impl ColorWave {
    /// Bands `wavelength` pixels wide, shifting `speed` degrees of hue per frame.
    pub fn new(seed: u64, wavelength: f64, speed: f64) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            wavelength: if wavelength > 0.0 { wavelength } else { 32.0 },
            speed,
            phase: 0.0,
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        _ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(
            super::seed_attr(&a),
            a.float_or("wavelength", 32.0),
            a.float_or("speed", 4.0),
        );
        v.base = a.node_base();
        Box::new(v)
    }
}

impl Component for ColorWave {
    fn kind(&self) -> &'static str {
        "color-wave"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        self.base.resolve(parent, parent);
        self.phase = SplitMix64::new(self.seed).range_f64(0.0, 360.0);
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let mut out = Bitmap::new(size);
        for y in 0..size.height {
            for x in 0..size.width {
                let d = f64::from(x + y) / self.wavelength;
                out.set_pixel(x as i32, y as i32, hsv(d * 360.0 + self.phase, 1.0, 1.0));
            }
        }
        self.phase = (self.phase + self.speed) % 360.0;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/color_wave.rs"]
mod tests;
