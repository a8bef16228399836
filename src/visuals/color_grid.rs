use std::time::Instant;

use crate::assets::color::hsv;
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::{Pos, Rgba8Premul, Size};
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::render::bitmap::Bitmap;

/// A grid of square cells, a few of which change hue every frame.
#[derive(Debug)]
pub struct ColorGrid {
    base: NodeBase,
    seed: u64,
    cell: u32,
    change_pct: u32,
    rng: SplitMix64,
    cols: u32,
    rows: u32,
    cells: Vec<Rgba8Premul>,
}

impl ColorGrid {
    /// Grid with `cell`-pixel squares, recoloring `change_pct` percent of them per frame.
    pub fn new(seed: u64, cell: u32, change_pct: u32) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            cell: cell.max(1),
            change_pct: change_pct.min(100),
            rng: SplitMix64::new(seed),
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        _ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(
            super::seed_attr(&a),
            a.uint_or("cell", 4),
            a.uint_or("change", 10),
        );
        v.base = a.node_base();
        Box::new(v)
    }

    fn random_color(&mut self) -> Rgba8Premul {
        hsv(self.rng.range_f64(0.0, 360.0), 1.0, 1.0)
    }
}

impl Component for ColorGrid {
    fn kind(&self) -> &'static str {
        "color-grid"
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
        self.cols = size.width.div_ceil(self.cell);
        self.rows = size.height.div_ceil(self.cell);
        let n = (self.cols * self.rows) as usize;
        self.cells = (0..n).map(|_| self.random_color()).collect();
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let n = self.cells.len() as u32;
        if n == 0 {
            return Ok(Bitmap::new(self.base.size));
        }
        let changes = (n * self.change_pct).div_ceil(100);
        for _ in 0..changes {
            let i = self.rng.below(n) as usize;
            self.cells[i] = self.random_color();
        }

        let mut out = Bitmap::new(self.base.size);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = self.cells[(row * self.cols + col) as usize];
                out.fill_rect(
                    Pos::new((col * self.cell) as i32, (row * self.cell) as i32),
                    Size::new(self.cell, self.cell),
                    c,
                );
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/color_grid.rs"]
mod tests;
