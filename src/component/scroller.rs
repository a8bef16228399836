use std::time::Instant;

use crate::compile::attrs::Attrs;
use crate::compile::compiler::CompileCtx;
use crate::component::template::Template;
use crate::component::{Component, NodeBase, render_or_reuse};
use crate::foundation::core::{Dim, Pos, Size};
use crate::foundation::error::BoardResult;
use crate::render::bitmap::Bitmap;

/// Direction content travels in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDir {
    /// Right to left (marquee).
    #[default]
    Left,
    /// Left to right.
    Right,
    /// Bottom to top.
    Up,
    /// Top to bottom.
    Down,
}

impl ScrollDir {
    /// Parse `left`, `right`, `up`, `down`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    fn horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Scrolls an inner template across its box, wrapping with a gap between repetitions.
#[derive(Debug)]
pub struct Scroller {
    base: NodeBase,
    dir: ScrollDir,
    speed: u32,
    gap: u32,
    content_width: Dim,
    content_height: Dim,
    offset: u32,
    inner: Template,
}

impl Scroller {
    /// Scroll `inner` leftwards at one pixel per render.
    pub fn new(inner: Template) -> Self {
        Self {
            base: NodeBase::default(),
            dir: ScrollDir::Left,
            speed: 1,
            gap: 0,
            content_width: Dim::Percent(100.0),
            content_height: Dim::Percent(100.0),
            offset: 0,
            inner,
        }
    }

    /// Replace the node base (declared size and interval).
    pub fn with_base(mut self, base: NodeBase) -> Self {
        self.base = base;
        self
    }

    /// Direction, pixels per render, and gap between repetitions.
    pub fn with_motion(mut self, dir: ScrollDir, speed: u32, gap: u32) -> Self {
        self.dir = dir;
        self.speed = speed;
        self.gap = gap;
        self
    }

    /// Size of the scrolled content, resolved against this box.
    pub fn with_content_size(mut self, width: Dim, height: Dim) -> Self {
        self.content_width = width;
        self.content_height = height;
        self
    }

    /// Current scroll offset in pixels.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub(crate) fn decode(
        node: roxmltree::Node<'_, '_>,
        ctx: &CompileCtx<'_>,
    ) -> Box<dyn Component> {
        let a = Attrs::of(node);
        let inner = Template::from_node(node, ctx).with_base(NodeBase::default());
        Box::new(
            Self::new(inner)
                .with_base(a.node_base())
                .with_motion(
                    a.parsed("scroll", "left, right, up or down", ScrollDir::parse)
                        .unwrap_or_default(),
                    a.uint_or("speed", 1),
                    a.uint_or("gap", 0),
                )
                .with_content_size(
                    a.dim("content-width").unwrap_or(Dim::Percent(100.0)),
                    a.dim("content-height").unwrap_or(Dim::Percent(100.0)),
                ),
        )
    }

    fn period(&self) -> u32 {
        let len = if self.dir.horizontal() {
            self.inner.width()
        } else {
            self.inner.height()
        };
        len.saturating_add(self.gap).min(i32::MAX as u32)
    }
}

impl Component for Scroller {
    fn kind(&self) -> &'static str {
        "scroller"
    }

    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn init(&mut self, parent: Size) -> BoardResult<()> {
        let size = self.base.resolve(parent, parent);
        let content = Size::new(
            self.content_width.resolve(size.width),
            self.content_height.resolve(size.height),
        );
        self.inner.pin_size(content);
        self.inner.set_parent_size(size);
        self.inner.init(size)?;
        self.offset = 0;
        self.base.arm(0, Instant::now());
        Ok(())
    }

    fn render(&mut self) -> BoardResult<Bitmap> {
        let mut out = Bitmap::new(self.base.size);
        render_or_reuse(&mut self.inner, Instant::now())?;
        let period = self.period();
        if let Some(img) = self.inner.prev_img()
            && period > 0
        {
            let off = i64::from(self.offset % period);
            let p = i64::from(period);
            let (mut lead, len) = match self.dir {
                ScrollDir::Left => (-off, i64::from(self.base.size.width)),
                ScrollDir::Up => (-off, i64::from(self.base.size.height)),
                ScrollDir::Right => (off - p, i64::from(self.base.size.width)),
                ScrollDir::Down => (off - p, i64::from(self.base.size.height)),
            };
            while lead < len {
                // Both bounds fit i32: the period is capped at i32::MAX.
                let at = lead as i32;
                let at = if self.dir.horizontal() {
                    Pos::new(at, 0)
                } else {
                    Pos::new(0, at)
                };
                out.draw_over(img, at);
                lead += p;
            }
            self.offset = (self.offset + self.speed % period) % period;
        }
        Ok(out)
    }

    fn stop(&mut self) {
        self.base.ticker.stop();
        self.inner.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/scroller.rs"]
mod tests;
