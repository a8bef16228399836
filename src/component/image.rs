use std::path::PathBuf;
use std::time::Instant;

use crate::assets::decode::{DecodedFrame, load_image_file};
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::{Component, NodeBase};
use crate::foundation::core::Size;
use crate::foundation::error::BoardResult;
use crate::render::bitmap::Bitmap;

/// A still image, animated GIF, or SVG loaded from the image directory.
#[derive(Debug)]
pub struct Image {
    base: NodeBase,
    src: PathBuf,
    frames: Vec<DecodedFrame>,
    index: usize,
}

impl Image {
    /// Image loaded from `src` at `init`.
    pub fn new(src: impl Into<PathBuf>) -> Self {
        Self {
            base: NodeBase::default(),
            src: src.into(),
            frames: Vec::new(),
            index: 0,
        }
    }

    /// Replace the node base (declared size and interval).
    pub fn with_base(mut self, base: NodeBase) -> Self {
        self.base = base;
        self
    }

    /// Number of decoded frames (zero before `init`).
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let src = a.str_or("src", "");
        Box::new(Self::new(ctx.image_dir.join(src)).with_base(a.node_base()))
    }

    /// Target size for the declared dimensions, keeping aspect when only one is declared.
    fn target(&self, parent: Size, natural: Size) -> Size {
        let w = self.base.width.map(|d| d.resolve(parent.width));
        let h = self.base.height.map(|d| d.resolve(parent.height));
        let scale = |num: u32, den: u32, other: u32| -> u32 {
            if den == 0 {
                return other;
            }
            ((u64::from(other) * u64::from(num)) / u64::from(den)) as u32
        };
        match (w, h) {
            (Some(w), Some(h)) => Size::new(w, h),
            (Some(w), None) => Size::new(w, scale(w, natural.width, natural.height)),
            (None, Some(h)) => Size::new(scale(h, natural.height, natural.width), h),
            (None, None) => natural,
        }
    }
}

impl Component for Image {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let mut frames = load_image_file(&self.src, None)?;
        let natural = frames
            .first()
            .map_or(Size::default(), |f| f.bitmap.size());
        let target = self.target(parent, natural);
        if target != natural && !target.is_empty() {
            frames = load_image_file(&self.src, Some(target))?;
        }
        self.base.resolve(parent, target);

        // Animated images default to their own frame delay.
        let fallback = match frames.as_slice() {
            [first, _, ..] => first.delay.as_millis() as i64,
            _ => 0,
        };
        self.frames = frames;
        self.index = 0;
        self.base.arm(fallback, Instant::now());
        tracing::debug!(src = %self.src.display(), frames = self.frames.len(), "image loaded");
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let Some(frame) = self.frames.get(self.index) else {
            return Ok(Bitmap::new(size));
        };
        let out = frame.bitmap.fit_to(size);
        self.index = (self.index + 1) % self.frames.len();
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/image.rs"]
mod tests;
