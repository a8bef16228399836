use std::path::PathBuf;
use std::time::Instant;

use crate::assets::color::{Color, hsv};
use crate::assets::text::{load_font, rasterize_text};
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::{Pos, Size};
use crate::foundation::error::BoardResult;
use crate::foundation::math::SplitMix64;
use crate::layout::solver::{Distribute, distribute};
use crate::render::bitmap::Bitmap;

/// Text centered in its box with a hue gradient sweeping through the glyphs.
#[derive(Debug)]
pub struct RainbowText {
    base: NodeBase,
    seed: u64,
    content: String,
    font: String,
    font_size: f32,
    font_dir: PathBuf,
    speed: f64,
    phase: f64,
    mask: Option<Bitmap>,
}

impl RainbowText {
    /// Rainbow text in the built-in `6x10` font.
    pub fn new(seed: u64, content: impl Into<String>, speed: f64) -> Self {
        Self {
            base: NodeBase::default(),
            seed,
            content: content.into(),
            font: "6x10".to_owned(),
            font_size: 10.0,
            font_dir: PathBuf::from("fonts"),
            speed,
            phase: 0.0,
            mask: None,
        }
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let mut v = Self::new(super::seed_attr(&a), a.text(), a.float_or("speed", 8.0));
        v.base = a.node_base();
        v.font = a.str_or("font", &ctx.font);
        v.font_size = a.float_or("size", f64::from(ctx.font_size)) as f32;
        v.font_dir = ctx.font_dir.clone();
        Box::new(v)
    }
}

impl Component for RainbowText {
    fn kind(&self) -> &'static str {
        "rainbow-text"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let face = load_font(&self.font, self.font_size, &self.font_dir)?;
        self.mask = Some(rasterize_text(&self.content, &face, Color::WHITE)?);
        self.base.resolve(parent, parent);
        self.phase = SplitMix64::new(self.seed).range_f64(0.0, 360.0);
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let mut out = Bitmap::new(size);
        let Some(mask) = &self.mask else {
            return Ok(out);
        };

        let span = f64::from(mask.width().max(1));
        let mut glyphs = Bitmap::new(mask.size());
        for y in 0..mask.height() as i32 {
            for x in 0..mask.width() as i32 {
                let a = mask.pixel(x, y).a;
                if a == 0 {
                    continue;
                }
                let hue = f64::from(x) / span * 360.0 + self.phase;
                glyphs.set_pixel(x, y, hsv(hue, 1.0, 1.0).scaled(a));
            }
        }
        let (dx, _) = distribute(size.width, mask.width(), 1, Distribute::Center);
        let (dy, _) = distribute(size.height, mask.height(), 1, Distribute::Center);
        out.draw_over(&glyphs, Pos::new(dx, dy));
        self.phase = (self.phase + self.speed) % 360.0;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visuals/rainbow_text.rs"]
mod tests;
