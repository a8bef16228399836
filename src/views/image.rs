use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::Presentation;
use crate::foundation::error::BoardResult;
use crate::view::View;
use crate::view::registry::ViewConfig;
use crate::view::schema::{ConfigSchema, FieldKind, FieldRule};

const TEMPLATE: &str = r#"<template justify="center" align="center">
  <image src="{{ .Src | xml }}"{{ if .Fill }} width="100%" height="100%"{{ end }}/>
</template>"#;

/// Configuration of the `image` view.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Path relative to the presentation image directory.
    pub src: String,
    /// Stretch to the whole canvas instead of centering at natural size.
    #[serde(default)]
    pub fill: bool,
}

impl ViewConfig for ImageConfig {
    const KIND: &'static str = "image";

    fn schema() -> ConfigSchema {
        ConfigSchema::new()
            .field(FieldRule::required("src", FieldKind::string(Some(1), None)))
            .field(FieldRule::optional("fill", FieldKind::Bool))
    }

    fn build(self, _presentation: &Presentation) -> BoardResult<Arc<dyn View>> {
        Ok(Arc::new(ImageView { config: self }))
    }
}

/// A single still, animated GIF, or SVG.
#[derive(Debug)]
pub struct ImageView {
    config: ImageConfig,
}

impl View for ImageView {
    fn kind(&self) -> &'static str {
        ImageConfig::KIND
    }

    fn template(&self) -> String {
        TEMPLATE.to_owned()
    }

    fn data(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("Src".into(), self.config.src.clone().into());
        m.insert("Fill".into(), self.config.fill.into());
        m
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/image.rs"]
mod tests;
