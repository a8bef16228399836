use std::path::PathBuf;

use crate::assets::color::Color;
use crate::compile::registry::Registry;
use crate::component::Component;
use crate::component::template::Template;
use crate::config::Presentation;
use crate::foundation::error::{BoardError, BoardResult};

/// Defaults and lookup tables available to every decoder.
#[derive(Clone, Debug)]
pub struct CompileCtx<'r> {
    pub(crate) registry: &'r Registry,
    pub(crate) font: String,
    pub(crate) font_size: f32,
    pub(crate) color: Color,
    pub(crate) font_dir: PathBuf,
    pub(crate) image_dir: PathBuf,
}

impl CompileCtx<'static> {
    /// Context over the global registry.
    pub fn new(presentation: &Presentation) -> Self {
        Self::with_registry(Registry::global(), presentation)
    }
}

impl<'r> CompileCtx<'r> {
    /// Context over a caller-provided registry.
    pub fn with_registry(registry: &'r Registry, presentation: &Presentation) -> Self {
        Self {
            registry,
            font: presentation.font.clone(),
            font_size: presentation.font_size,
            color: presentation.default_color(),
            font_dir: presentation.font_dir.clone(),
            image_dir: presentation.image_dir.clone(),
        }
    }
}

/// Compile a markup document whose root element is `template`.
///
/// Unknown elements are skipped; malformed XML or another root element is an error.
pub fn compile_markup(src: &str, ctx: &CompileCtx<'_>) -> BoardResult<Template> {
    let doc = roxmltree::Document::parse(src)
        .map_err(|e| BoardError::compile(format!("malformed markup: {e}")))?;
    let root = doc.root_element();
    let name = root.tag_name().name();
    if name != "template" {
        return Err(BoardError::compile(format!(
            "root element must be <template>, got <{name}>"
        )));
    }
    Ok(Template::from_node(root, ctx))
}

/// Decode every element child of `node` through the registry, in document order.
pub(crate) fn compile_children(
    node: roxmltree::Node<'_, '_>,
    ctx: &CompileCtx<'_>,
) -> Vec<Box<dyn Component>> {
    let mut out = Vec::new();
    for child in node.children().filter(|n| n.is_element()) {
        let name = child.tag_name().name();
        match ctx.registry.get(name) {
            Some(decode) => out.push(decode(child, ctx)),
            None => tracing::warn!(element = name, "unknown element; skipping"),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
