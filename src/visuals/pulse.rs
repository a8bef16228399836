use std::time::Instant;

use embedded_graphics::{
    Drawable as _,
    prelude::{Point, Primitive as _},
    primitives::{Circle, PrimitiveStyle},
};

use crate::assets::color::{Color, hsv};
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::{Rgba8Premul, Size};
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::render::bitmap::Bitmap;

#[derive(Clone, Copy, Debug)]
struct Ring {
    center: Point,
    radius: u32,
    max_radius: u32,
    color: Rgba8Premul,
}

/// Expanding rings that fade as they grow and respawn elsewhere.
#[derive(Debug)]
pub struct PulseCircles {
    base: NodeBase,
    seed: u64,
    count: u32,
    color: Option<Color>,
    rng: SplitMix64,
    rings: Vec<Ring>,
}

impl PulseCircles {
    /// `count` concurrent rings; `None` picks a random hue per ring.
    pub fn new(seed: u64, count: u32, color: Option<Color>) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            count,
            color,
            rng: SplitMix64::new(seed),
            rings: Vec::new(),
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        _ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(super::seed_attr(&a), a.uint_or("circles", 3), a.color("color"));
        v.base = a.node_base();
        Box::new(v)
    }

    fn spawn(&mut self) -> Ring {
        let size = self.base.size;
        let max = (size.width.max(size.height) / 2).max(2);
        Ring {
            center: Point::new(
                self.rng.below(size.width) as i32,
                self.rng.below(size.height) as i32,
            ),
            radius: self.rng.below(max),
            max_radius: max / 2 + self.rng.below(max / 2 + 1),
            color: match self.color {
                Some(c) => c.premul(),
                None => hsv(self.rng.range_f64(0.0, 360.0), 1.0, 1.0),
            },
        }
    }
}

impl Component for PulseCircles {
    fn kind(&self) -> &'static str {
        "pulse-circles"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        self.base.resolve(parent, parent);
        self.rng = SplitMix64::new(self.seed);
        self.rings.clear();
        for _ in 0..self.count {
            let ring = self.spawn();
            self.rings.push(ring);
        }
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let mut out = Bitmap::new(self.base.size);
        for i in 0..self.rings.len() {
            let mut ring = self.rings[i];
            ring.radius += 1;
            if ring.radius > ring.max_radius {
                ring = self.spawn();
                ring.radius = 0;
            }
            self.rings[i] = ring;

            let fade = 255 - (ring.radius * 200 / ring.max_radius.max(1)) as u8;
            let color = super::to_rgb888(ring.color.scaled(fade));
            let diameter = ring.radius * 2 + 1;
            let top_left = ring.center - Point::new(ring.radius as i32, ring.radius as i32);
            let _ = Circle::new(top_left, diameter)
                .into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(&mut out);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/pulse.rs"]
mod tests;
