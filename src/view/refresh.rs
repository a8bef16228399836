//! Expand, compile, initialize and publish a view's tree.

use std::sync::PoisonError;

use serde_json::{Map, Value};

use crate::compile::compiler::{CompileCtx, compile_markup};
use crate::component::Component;
use crate::config::Presentation;
use crate::expand::expand;
use crate::foundation::error::BoardResult;
use crate::view::{TemplateSlot, View};

/// Presentation defaults merged with `data`; keys in `data` win.
pub fn template_context(presentation: &Presentation, data: Map<String, Value>) -> Value {
    let mut ctx = Map::new();
    ctx.insert("Width".into(), presentation.canvas.width.into());
    ctx.insert("Height".into(), presentation.canvas.height.into());
    ctx.insert("Font".into(), presentation.font.clone().into());
    ctx.insert("FontSize".into(), f64::from(presentation.font_size).into());
    ctx.insert("Color".into(), presentation.color.clone().into());
    ctx.insert(
        "FontDir".into(),
        presentation.font_dir.display().to_string().into(),
    );
    ctx.insert(
        "ImageDir".into(),
        presentation.image_dir.display().to_string().into(),
    );
    ctx.extend(data);
    Value::Object(ctx)
}

/// Rebuild the view's tree from its current data and publish it into `slot`.
///
/// On error the slot is left untouched, so the previous tree keeps rendering.
#[tracing::instrument(skip_all, fields(view = view.kind()))]
pub fn template_refresh(
    view: &dyn View,
    slot: &TemplateSlot,
    presentation: &Presentation,
) -> BoardResult<()> {
    let ctx = template_context(presentation, view.data());
    let markup = expand(&view.template(), &ctx)?;
    tracing::debug!(bytes = markup.len(), "template expanded");

    let mut root = compile_markup(&markup, &CompileCtx::new(presentation))?;
    root.init(presentation.canvas.size())?;

    if let Some(old) = slot.publish(root) {
        old.lock().unwrap_or_else(PoisonError::into_inner).stop();
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/view/refresh.rs"]
mod tests;
