//! Views: content sources that emit markup, plus the machinery that keeps their compiled
//! tree current.

use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::component::Component;
use crate::component::template::Template;
use crate::config::Presentation;
use crate::foundation::error::{BoardError, BoardResult};
use crate::render::bitmap::Bitmap;

pub mod refresh;
mod refresher;
/// View-type table.
pub mod registry;
pub mod schema;

use refresher::Refresher;

/// A content source: owns data and produces a markup template over it.
pub trait View: Send + Sync + Debug {
    /// Registered view-type name.
    fn kind(&self) -> &'static str;

    /// Markup template text, expanded against [`View::data`] merged with presentation defaults.
    fn template(&self) -> String;

    /// Data exposed to the template. Keys here override presentation defaults.
    fn data(&self) -> serde_json::Map<String, serde_json::Value>;

    /// Pull fresh data. Called once at install and then on every refresh.
    fn update(&self) -> BoardResult<()> {
        Ok(())
    }

    /// How often to update and recompile; `None` compiles once.
    fn refresh_interval(&self) -> Option<Duration> {
        None
    }
}

/// Shared handle on a compiled tree.
pub type SharedTemplate = Arc<Mutex<Template>>;

/// The view's current compiled tree, swapped atomically on refresh.
#[derive(Debug, Default)]
pub struct TemplateSlot {
    current: Mutex<Option<SharedTemplate>>,
}

impl TemplateSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tree to render, if one was published.
    pub fn current(&self) -> Option<SharedTemplate> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the tree and return the previous one.
    pub fn publish(&self, root: Template) -> Option<SharedTemplate> {
        let mut cur = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        cur.replace(Arc::new(Mutex::new(root)))
    }

    /// Remove the tree.
    pub fn take(&self) -> Option<SharedTemplate> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// A view plus its compiled tree and optional refresher thread.
#[derive(Debug)]
pub struct ViewHandle {
    view: Arc<dyn View>,
    slot: Arc<TemplateSlot>,
    presentation: Arc<Presentation>,
    refresher: Mutex<Option<Refresher>>,
}

impl ViewHandle {
    /// Wrap `view`; nothing is compiled until [`ViewHandle::init`].
    pub fn new(view: Arc<dyn View>, presentation: Arc<Presentation>) -> Self {
        Self {
            view,
            slot: Arc::new(TemplateSlot::new()),
            presentation,
            refresher: Mutex::new(None),
        }
    }

    /// First data update and compile, then start the refresher if the view has an interval.
    pub fn init(&self) -> BoardResult<()> {
        self.view.update()?;
        refresh::template_refresh(self.view.as_ref(), &self.slot, &self.presentation)?;
        if let Some(every) = self.view.refresh_interval() {
            let r = Refresher::spawn(
                self.view.clone(),
                self.slot.clone(),
                self.presentation.clone(),
                every,
            )?;
            let old = self
                .refresher
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .replace(r);
            if let Some(mut old) = old {
                old.stop();
            }
        }
        Ok(())
    }

    /// Stop the refresher and the compiled tree.
    pub fn stop(&self) {
        let r = self
            .refresher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut r) = r {
            r.stop();
        }
        if let Some(root) = self.slot.take() {
            root.lock().unwrap_or_else(PoisonError::into_inner).stop();
        }
    }

    /// Registered view-type name.
    pub fn kind(&self) -> &'static str {
        self.view.kind()
    }

    /// The view's tree slot.
    pub fn slot(&self) -> &Arc<TemplateSlot> {
        &self.slot
    }

    /// Render the current tree into a canvas-sized bitmap; blank when nothing is compiled.
    pub fn render_frame(&self, now: Instant) -> BoardResult<Bitmap> {
        let canvas = self.presentation.canvas.size();
        let Some(root) = self.slot.current() else {
            return Ok(Bitmap::new(canvas));
        };
        let mut root = root
            .lock()
            .map_err(|_| BoardError::render("template lock poisoned by an earlier fault"))?;
        let img = root.render_at(now)?;
        Ok(img.fit_to(canvas))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/mod.rs"]
mod tests;
