use std::time::Instant;

use crate::assets::color::Color;
use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::template::Template;
use crate::component::{Component, NodeBase, render_or_reuse};
use crate::foundation::core::{Pos, Size};
use crate::foundation::error::BoardResult;
use crate::render::bitmap::Bitmap;

/// A box with padding, an optional border and background around an inner template.
#[derive(Debug)]
pub struct Container {
    base: NodeBase,
    padding: u32,
    border: u32,
    border_color: Color,
    background: Option<Color>,
    inner: Template,
}

impl Container {
    /// Wrap `inner` with no padding or border.
    pub fn new(inner: Template) -> Self {
        Self {
            base: NodeBase::default(),
            padding: 0,
            border: 0,
            border_color: Color::WHITE,
            background: None,
            inner,
        }
    }

    /// Replace the node base (declared size and interval).
    pub fn with_base(mut self, base: NodeBase) -> Self {
        self.base = base;
        self
    }

    /// Inset on every side, inside the border.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Border thickness and color.
    pub fn with_border(mut self, px: u32, color: Color) -> Self {
        self.border = px;
        self.border_color = color;
        self
    }

    /// The wrapped template.
    pub fn inner(&self) -> &Template {
        &self.inner
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        // The inner template reads direction/justify/align from this element; its own box
        // is pinned at init, so width/height here belong to the container only.
        let inner = Template::from_node(node, ctx).with_base(NodeBase::default());
        Box::new(Self {
            base: a.node_base(),
            padding: a.uint_or("padding", 0),
            border: a.uint_or("border", 0),
            border_color: a.color_or("border-color", ctx.color),
            background: a.color("background"),
            inner,
        })
    }

    fn inset(&self) -> u32 {
        self.padding.saturating_add(self.border)
    }
}

impl Component for Container {
    fn kind(&self) -> &'static str {
        "container"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let size = self.base.resolve(parent, parent);
        let inset = self.inset().saturating_mul(2);
        let inner = Size::new(
            size.width.saturating_sub(inset),
            size.height.saturating_sub(inset),
        );
        self.inner.pin_size(inner);
        self.inner.set_parent_size(size);
        self.inner.init(size)?;
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let size = self.base.size;
        let mut out = match self.background {
            Some(bg) => Bitmap::filled(size, bg.premul()),
            None => Bitmap::new(size),
        };

        if self.border > 0 {
            let b = self.border;
            let c = self.border_color.premul();
            out.fill_rect(Pos::new(0, 0), Size::new(size.width, b), c);
            out.fill_rect(
                Pos::new(0, size.height as i32 - b as i32),
                Size::new(size.width, b),
                c,
            );
            out.fill_rect(Pos::new(0, 0), Size::new(b, size.height), c);
            out.fill_rect(
                Pos::new(size.width as i32 - b as i32, 0),
                Size::new(b, size.height),
                c,
            );
        }

        render_or_reuse(&mut self.inner, Instant::now())?;
        if let Some(img) = self.inner.prev_img() {
            let at = self.inset() as i32;
            out.draw_over(img, Pos::new(at, at));
        }
        Ok(out)
    }

    fn stop(&mut self) {
        self.base.ticker.stop();
        self.inner.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/container.rs"]
mod tests;
