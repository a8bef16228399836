use std::time::Instant;

use crate::assets::color::Color;
use crate::compile::attrs::Attrs;
use crate::compile::compiler::{CompileCtx, compile_children};
use crate::component::{Component, NodeBase, render_or_reuse};
use crate::foundation::core::{Dim, Size};
use crate::foundation::error::BoardResult;
use crate::layout::solver::{Direction, Distribute, place_children};
use crate::render::bitmap::Bitmap;

/// A layout node: children placed along a direction with justify/align rules.
///
/// The box defaults to the full parent size. Children size against this box at `init` and are
/// positioned from their actual bitmap sizes on every render.
#[derive(Debug)]
pub struct Template {
    base: NodeBase,
    children: Vec<Box<dyn Component>>,
    direction: Direction,
    justify: Distribute,
    align: Distribute,
    background: Option<Color>,
    surface: Bitmap,
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Template {
    /// An empty row template filling its parent.
    pub fn new() -> Self {
        Self {
            base: NodeBase::default(),
            children: Vec::new(),
            direction: Direction::Row,
            justify: Distribute::Start,
            align: Distribute::Start,
            background: None,
            surface: Bitmap::new(Size::default()),
        }
    }

    /// Replace the node base (declared size and interval).
    pub fn with_base(mut self, base: NodeBase) -> Self {
        self.base = base;
        self
    }

    /// Set direction and both distribution modes.
    pub fn with_layout(
        mut self,
        direction: Direction,
        justify: Distribute,
        align: Distribute,
    ) -> Self {
        self.direction = direction;
        self.justify = justify;
        self.align = align;
        self
    }

    /// Fill the box with `color` before drawing children.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Append a child.
    pub fn push_child(&mut self, child: Box<dyn Component>) {
        self.children.push(child);
    }

    /// Children in layout order.
    pub fn children(&self) -> &[Box<dyn Component>] {
        &self.children
    }

    /// Direction of the primary axis.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn from_node(node: roxmltree::Node<'_, '_>, ctx: &CompileCtx<'_>) -> Self {
        let a = Attrs::of(node);
        let mut t = Self::new()
            .with_base(a.node_base())
            .with_layout(
                a.parsed("direction", "row or column", Direction::parse)
                    .unwrap_or_default(),
                a.parsed("justify", "distribution mode", Distribute::parse)
                    .unwrap_or_default(),
                a.parsed("align", "distribution mode", Distribute::parse)
                    .unwrap_or_default(),
            );
        t.background = a.color("background");
        t.children = compile_children(node, ctx);
        t
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        Box::new(Self::from_node(node, ctx))
    }

    /// Force the box to `size`, ignoring declared dimensions.
    pub(crate) fn pin_size(&mut self, size: Size) {
        self.base.width = Some(Dim::Px(size.width));
        self.base.height = Some(Dim::Px(size.height));
    }

    /// One layout and composite pass at `now`.
    pub fn render_at(&mut self, now: Instant) -> BoardResult<Bitmap> {
        let mut sizes = Vec::with_capacity(self.children.len());
        for child in &mut self.children {
            render_or_reuse(child.as_mut(), now)?;
            sizes.push(child.prev_img().map_or(child.size(), Bitmap::size));
        }

        let positions = place_children(
            self.base.size,
            &sizes,
            self.direction,
            self.justify,
            self.align,
        );

        match self.background {
            Some(bg) => self.surface.fill(bg.premul()),
            None => self.surface.clear(),
        }
        for (child, pos) in self.children.iter_mut().zip(positions) {
            child.set_position(pos);
            if let Some(img) = child.prev_img() {
                self.surface.draw_over(img, pos);
            }
        }
        Ok(self.surface.clone())
    }
}

impl Component for Template {
    fn kind(&self) -> &'static str {
        "template"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let size = self.base.resolve(parent, parent);
        self.surface = Bitmap::new(size);
        for child in &mut self.children {
            child.set_parent_size(size);
            child.init(size)?;
        }
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        self.render_at(Instant::now())
    }

    fn stop(&mut self) {
        self.base.ticker.stop();
        for child in &mut self.children {
            child.stop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/template.rs"]
mod tests;
