use std::f64::consts::TAU;
use std::time::Instant;

use crate::assets::color::hsv;
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::{Size, Vec2};
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::render::bitmap::Bitmap;

/// A rotating multi-armed rainbow spiral centered in the box.
#[derive(Debug)]
pub struct Spiral {
    base: NodeBase,
    seed: u64,
    arms: u32,
    speed: f64,
    rotation: f64,
}

impl Spiral {
    /// Spiral with `arms` arms turning `speed` degrees per frame.
    pub fn new(seed: u64, arms: u32, speed: f64) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            arms: arms.max(1),
            speed,
            rotation: 0.0,
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        _ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(super::seed_attr(&a), a.uint_or("arms", 3), a.float_or("speed", 6.0));
        v.base = a.node_base();
        Box::new(v)
    }
}

impl Component for Spiral {
    fn kind(&self) -> &'static str {
        "spiral"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        self.base.resolve(parent, parent);
        self.rotation = SplitMix64::new(self.seed).range_f64(0.0, 360.0);
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let center = Vec2::new(f64::from(size.width) / 2.0, f64::from(size.height) / 2.0);
        let reach = center.hypot().max(1.0);
        let arms = f64::from(self.arms);
        let mut out = Bitmap::new(size);

        for y in 0..size.height {
            for x in 0..size.width {
                let d = Vec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5) - center;
                let r = d.hypot() / reach;
                let theta = d.atan2() / TAU * 360.0;
                let hue = theta * arms + r * 360.0 + self.rotation;
                // Brightness banding carves the arms out of the hue field.
                let band = ((theta * arms + r * 720.0 + self.rotation) / 360.0 * TAU).cos();
                let v = (0.35 + 0.65 * (band * 0.5 + 0.5)).clamp(0.0, 1.0);
                out.set_pixel(x as i32, y as i32, hsv(hue, 1.0, v));
            }
        }
        self.rotation = (self.rotation + self.speed) % 360.0;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/spiral.rs"]
mod tests;
