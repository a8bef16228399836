use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::Presentation;
use crate::foundation::error::{BoardError, BoardResult};
use crate::view::View;
use crate::view::registry::ViewConfig;
use crate::view::schema::{ConfigSchema, FieldKind, FieldRule};

/// Element names of the procedural visuals.
pub const VISUALS: [&str; 8] = [
    "color-grid",
    "color-wave",
    "gravity",
    "matrix-rain",
    "pong",
    "pulse-circles",
    "rainbow-text",
    "spiral",
];

const TEMPLATE: &str = r#"<template>
  <{{ .Visual }} seed="{{ .Seed }}">{{ .Text | xml }}</{{ .Visual }}>
</template>"#;

/// Configuration of the `visual` view.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisualConfig {
    /// Visual element name, one of [`VISUALS`].
    pub kind: String,
    /// Deterministic seed.
    #[serde(default)]
    pub seed: u64,
    /// Text for `rainbow-text`.
    #[serde(default)]
    pub text: Option<String>,
}

impl ViewConfig for VisualConfig {
    const KIND: &'static str = "visual";

    fn schema() -> ConfigSchema {
        ConfigSchema::new()
            .field(
                FieldRule::required("kind", FieldKind::string(Some(1), None))
                    .describe(VISUALS.join(", ")),
            )
            .field(FieldRule::optional("seed", FieldKind::int(Some(0), None)))
            .field(FieldRule::optional("text", FieldKind::string(None, Some(256))))
    }

    fn build(self, _presentation: &Presentation) -> BoardResult<Arc<dyn View>> {
        if !VISUALS.contains(&self.kind.as_str()) {
            return Err(BoardError::config(format!(
                "kind: unknown visual '{}', expected one of {}",
                self.kind,
                VISUALS.join(", ")
            )));
        }
        Ok(Arc::new(VisualView { config: self }))
    }
}

/// A single full-canvas procedural visual.
#[derive(Debug)]
pub struct VisualView {
    config: VisualConfig,
}

impl View for VisualView {
    fn kind(&self) -> &'static str {
        VisualConfig::KIND
    }

    fn template(&self) -> String {
        TEMPLATE.to_owned()
    }

    fn data(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("Visual".into(), self.config.kind.clone().into());
        m.insert("Seed".into(), self.config.seed.into());
        m.insert("Text".into(), self.config.text.clone().into());
        m
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/visual.rs"]
mod tests;
