//! The component contract and the built-in layout/content components.
//!
//! Every node of a compiled tree is a `Box<dyn Component>`. Shared per-node state (declared
//! and resolved size, position, render cadence, cached frame) lives in [`NodeBase`], which the
//! trait's default methods delegate to.

use std::time::Instant;

use crate::foundation::core::{Dim, Pos, Size};
use crate::foundation::error::BoardResult;
use crate::render::bitmap::Bitmap;
use crate::render::ticker::RenderTicker;

/// Content-sized stack of children.
pub mod container;
/// Still, animated or vector images.
pub mod image;
/// Scrolling viewport over an inner template.
pub mod scroller;
/// Fixed-size box that places its children.
pub mod template;
/// Text in a pixel or outline font.
pub mod text;

/// A renderable node of a compiled tree.
pub trait Component: Send + std::fmt::Debug {
    /// Registry name of the variant (`"text"`, `"template"`, ...).
    fn kind(&self) -> &'static str;

    /// Shared node state.
    fn base(&self) -> &NodeBase;

    /// Shared node state, mutably.
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Resolve sizing against `parent`, load assets, and arm the render ticker.
    ///
    /// Calling `init` again re-resolves and re-arms.
    fn init(&mut self, parent: Size) -> BoardResult<()>;

    /// Produce one frame sized to the resolved width and height.
    fn render(&mut self) -> BoardResult<Bitmap>;

    /// Resolved width in pixels (zero before `init`).
    fn width(&self) -> u32 {
        self.base().size.width
    }

    /// Resolved height in pixels (zero before `init`).
    fn height(&self) -> u32 {
        self.base().size.height
    }

    /// Resolved size.
    fn size(&self) -> Size {
        self.base().size
    }

    /// Position assigned by the parent during the last layout pass.
    fn position(&self) -> Pos {
        self.base().pos
    }

    /// Record the position assigned by the parent.
    fn set_position(&mut self, pos: Pos) {
        self.base_mut().pos = pos;
    }

    /// The last frame this node produced, if any.
    fn prev_img(&self) -> Option<&Bitmap> {
        self.base().prev.as_ref()
    }

    /// Cache `img` as the frame to reuse until the next tick.
    fn set_prev_img(&mut self, img: Bitmap) {
        self.base_mut().prev = Some(img);
    }

    /// Return `true` when the render interval elapsed since the last poll.
    fn tick_signal(&mut self, now: Instant) -> bool {
        self.base_mut().ticker.poll(now)
    }

    /// Disarm the ticker. Safe without a prior `init`; containers also stop their subtree.
    fn stop(&mut self) {
        self.base_mut().ticker.stop();
    }

    /// Record the parent box that percentage sizes resolve against.
    fn set_parent_size(&mut self, parent: Size) {
        self.base_mut().parent = parent;
    }
}

/// State shared by every component variant.
#[derive(Clone, Debug, Default)]
pub struct NodeBase {
    pub(crate) width: Option<Dim>,
    pub(crate) height: Option<Dim>,
    pub(crate) size: Size,
    pub(crate) pos: Pos,
    pub(crate) interval_ms: Option<i64>,
    pub(crate) prev: Option<Bitmap>,
    pub(crate) ticker: RenderTicker,
    pub(crate) parent: Size,
    pub(crate) renders: u64,
}

impl NodeBase {
    /// Base with optional declared size and render interval.
    pub fn new(width: Option<Dim>, height: Option<Dim>, interval_ms: Option<i64>) -> Self {
        Self {
            width,
            height,
            interval_ms,
            ..Self::default()
        }
    }

    /// Declared width.
    pub fn declared_width(&self) -> Option<Dim> {
        self.width
    }

    /// Declared height.
    pub fn declared_height(&self) -> Option<Dim> {
        self.height
    }

    /// Declared render interval in milliseconds.
    pub fn interval_ms(&self) -> Option<i64> {
        self.interval_ms
    }

    /// How many times the node actually rendered (cache misses).
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Record `parent` and resolve the box: declared dims win, `natural` fills the gaps.
    pub(crate) fn resolve(&mut self, parent: Size, natural: Size) -> Size {
        self.parent = parent;
        self.size = Size::new(
            self.width.map_or(natural.width, |d| d.resolve(parent.width)),
            self.height.map_or(natural.height, |d| d.resolve(parent.height)),
        );
        self.size
    }

    /// Arm the ticker from the declared interval, or `fallback_ms` when none was declared.
    pub(crate) fn arm(&mut self, fallback_ms: i64, now: Instant) {
        self.prev = None;
        self.ticker.arm(self.interval_ms.unwrap_or(fallback_ms), now);
    }
}

/// Render `child` if it has no cached frame or its ticker fired; otherwise keep the cache.
///
/// On return the child's `prev_img` holds the frame to composite.
pub fn render_or_reuse(child: &mut dyn Component, now: Instant) -> BoardResult<()> {
    let fired = child.tick_signal(now);
    if child.prev_img().is_some() && !fired {
        return Ok(());
    }
    let mut img = child.render()?;
    let size = child.size();
    if img.size() != size {
        img = img.fit_to(size);
    }
    child.base_mut().renders += 1;
    child.set_prev_img(img);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/component/mod.rs"]
mod tests;
