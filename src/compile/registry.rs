use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::compile::compiler::CompileCtx;
use crate::component::{Component, container, image, scroller, template, text};
use crate::visuals;

/// Builds a fully decoded node from its element.
pub type Decoder = fn(roxmltree::Node<'_, '_>, &CompileCtx<'_>) -> Box<dyn Component>;

/// Element name → decoder table.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: BTreeMap<&'static str, Decoder>,
}

impl Registry {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every built-in component and visual.
    pub fn builtin() -> Self {
        let mut r = Self::empty();
        r.register("text", text::Text::decode);
        r.register("image", image::Image::decode);
        r.register("template", template::Template::decode);
        r.register("container", container::Container::decode);
        r.register("scroller", scroller::Scroller::decode);
        r.register("color-grid", visuals::color_grid::ColorGrid::decode);
        r.register("color-wave", visuals::color_wave::ColorWave::decode);
        r.register("gravity", visuals::gravity::Gravity::decode);
        r.register("pong", visuals::pong::Pong::decode);
        r.register("matrix-rain", visuals::matrix_rain::MatrixRain::decode);
        r.register("pulse-circles", visuals::pulse::PulseCircles::decode);
        r.register("spiral", visuals::spiral::Spiral::decode);
        r.register("rainbow-text", visuals::rainbow_text::RainbowText::decode);
        r
    }

    /// The shared built-in table, built on first use.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::builtin)
    }

    /// Add or replace an entry.
    pub fn register(&mut self, name: &'static str, decoder: Decoder) {
        if self.entries.insert(name, decoder).is_some() {
            tracing::debug!(name, "registry entry replaced");
        }
    }

    /// Look up the decoder for `name`.
    pub fn get(&self, name: &str) -> Option<Decoder> {
        self.entries.get(name).copied()
    }

    /// Registered element names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/registry.rs"]
mod tests;
