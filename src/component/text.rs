use std::path::PathBuf;
use std::time::Instant;

use crate::assets::color::Color;
use crate::assets::text::{FontFace, load_font, rasterize_text};
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::Size;
use crate::foundation::error::BoardResult;
use crate::render::bitmap::Bitmap;

/// A run of text in a pixel or outline font.
///
/// The glyphs are rasterized once at `init`; the natural size is the text extent and a
/// declared size crops or pads it.
#[derive(Debug)]
pub struct Text {
    base: NodeBase,
    content: String,
    font: String,
    font_size: f32,
    color: Color,
    font_dir: PathBuf,
    raster: Option<Bitmap>,
}

impl Text {
    /// Text in the built-in `6x10` font, white.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            base: NodeBase::default(),
            content: content.into(),
            font: "6x10".to_owned(),
            font_size: 10.0,
            color: Color::WHITE,
            font_dir: PathBuf::from("fonts"),
            raster: None,
        }
    }

    /// Replace the node base (declared size and interval).
    pub fn with_base(mut self, base: NodeBase) -> Self {
        self.base = base;
        self
    }

    /// Select a font by built-in name or file name.
    pub fn with_font(mut self, font: impl Into<String>, size: f32) -> Self {
        self.font = font.into();
        self.font_size = size;
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        Box::new(Self {
            base: a.node_base(),
            content: a.text(),
            font: a.str_or("font", &ctx.font),
            font_size: a.float_or("size", f64::from(ctx.font_size)) as f32,
            color: a.color_or("color", ctx.color),
            font_dir: ctx.font_dir.clone(),
            raster: None,
        })
    }

    pub(crate) fn face(&self) -> BoardResult<FontFace> {
        load_font(&self.font, self.font_size, &self.font_dir)
    }
}

impl Component for Text {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let raster = rasterize_text(&self.content, &self.face()?, self.color)?;
        let size = self.base.resolve(parent, raster.size());
        self.raster = Some(raster.fit_to(size));
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        Ok(match &self.raster {
            Some(r) => r.clone(),
            None => Bitmap::new(self.base.size),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/text.rs"]
mod tests;
