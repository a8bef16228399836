use std::time::Instant;

use crate::assets::color::Color;
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::{Rgba8Premul, Size};
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::render::bitmap::Bitmap;

#[derive(Clone, Copy, Debug)]
struct Streak {
    head: i32,
    trail: u32,
}

/// Falling columns of fading trails.
#[derive(Debug)]
pub struct MatrixRain {
    base: NodeBase,
    seed: u64,
    color: Color,
    density_pct: u32,
    rng: SplitMix64,
    columns: Vec<Option<Streak>>,
}

impl MatrixRain {
    /// Rain in `color`; each idle column spawns a drop with `density_pct` percent chance per frame.
    pub fn new(seed: u64, color: Color, density_pct: u32) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            color,
            density_pct: density_pct.min(100),
            rng: SplitMix64::new(seed),
            columns: Vec::new(),
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        _ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(
            super::seed_attr(&a),
            a.color_or("color", Color::rgba(0, 255, 0, 255)),
            a.uint_or("density", 10),
        );
        v.base = a.node_base();
        Box::new(v)
    }
}

impl Component for MatrixRain {
    fn kind(&self) -> &'static str {
        "matrix-rain"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let size = self.base.resolve(parent, parent);
        self.rng = SplitMix64::new(self.seed);
        self.columns = vec![None; size.width as usize];
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let height = size.height as i32;
        let max_trail = (size.height / 2).max(3);
        let mut out = Bitmap::new(size);
        let head = Rgba8Premul::opaque(255, 255, 255);
        let body = self.color.premul();

        for x in 0..self.columns.len() {
            let drop = match self.columns[x] {
                Some(mut d) => {
                    d.head += 1;
                    (d.head - (d.trail as i32) < height).then_some(d)
                }
                None if self.rng.below(100) < self.density_pct => Some(Streak {
                    head: 0,
                    trail: 3 + self.rng.below(max_trail - 2),
                }),
                None => None,
            };
            self.columns[x] = drop;
            let Some(d) = drop else { continue };

            out.set_pixel(x as i32, d.head, head);
            for k in 1..=d.trail {
                let fade = 255 - (k * 255 / (d.trail + 1)) as u8;
                out.set_pixel(x as i32, d.head - k as i32, body.scaled(fade));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/matrix_rain.rs"]
mod tests;
