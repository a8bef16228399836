use std::sync::Arc;

use serde_json::{Map, Value};

use crate::assets::text::{builtin_mono, mono_extent};
use crate::config::Presentation;
use crate::foundation::error::BoardResult;
use crate::view::View;
use crate::view::registry::ViewConfig;
use crate::view::schema::{ConfigSchema, FieldKind, FieldRule};

const TEMPLATE: &str = r#"<template justify="center" align="center">
{{- if .Scroll }}
  <scroller width="100%" height="100%" align="center" speed="{{ .Speed }}" gap="{{ div .Width 2 }}" content-width="{{ .ContentWidth }}">
    <text{{ with .TextFont }} font="{{ . | xml }}"{{ end }} color="{{ .TextColor | default .Color | xml }}">{{ .Text | xml }}</text>
  </scroller>
{{- else }}
  <text{{ with .TextFont }} font="{{ . | xml }}"{{ end }} color="{{ .TextColor | default .Color | xml }}">{{ .Text | xml }}</text>
{{- end }}
</template>"#;

/// Configuration of the `message` view.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageConfig {
    /// Text to show.
    pub text: String,
    /// Text color; presentation color when absent.
    #[serde(default)]
    pub color: Option<String>,
    /// Font name; presentation font when absent.
    #[serde(default)]
    pub font: Option<String>,
    /// Scroll horizontally instead of centering.
    #[serde(default)]
    pub scroll: bool,
    /// Scroll speed in pixels per frame.
    #[serde(default = "default_speed")]
    pub speed: u32,
}

fn default_speed() -> u32 {
    1
}

impl ViewConfig for MessageConfig {
    const KIND: &'static str = "message";

    fn schema() -> ConfigSchema {
        ConfigSchema::new()
            .field(
                FieldRule::required("text", FieldKind::string(Some(1), Some(512)))
                    .describe("text to show"),
            )
            .field(FieldRule::optional("color", FieldKind::string(Some(4), Some(9))))
            .field(FieldRule::optional("font", FieldKind::string(Some(1), None)))
            .field(FieldRule::optional("scroll", FieldKind::Bool))
            .field(
                FieldRule::optional("speed", FieldKind::int(Some(1), Some(16)))
                    .describe("pixels per frame when scrolling"),
            )
    }

    fn build(self, presentation: &Presentation) -> BoardResult<Arc<dyn View>> {
        super::check_color("color", self.color.as_deref())?;
        let font = self.font.as_deref().unwrap_or(&presentation.font);
        let content_width = text_width(&self.text, font, presentation.font_size);
        Ok(Arc::new(MessageView {
            config: self,
            content_width,
        }))
    }
}

/// Estimated single-line width of `text`, exact for built-in pixel fonts.
fn text_width(text: &str, font: &str, size_px: f32) -> u32 {
    match builtin_mono(font) {
        Some(mono) => mono_extent(text, mono).width,
        None => (text.chars().count() as f32 * size_px * 3.0 / 5.0).ceil() as u32,
    }
}

/// Static or scrolling text.
#[derive(Debug)]
pub struct MessageView {
    config: MessageConfig,
    content_width: u32,
}

impl View for MessageView {
    fn kind(&self) -> &'static str {
        MessageConfig::KIND
    }

    fn template(&self) -> String {
        TEMPLATE.to_owned()
    }

    fn data(&self) -> Map<String, Value> {
        let c = &self.config;
        let mut m = Map::new();
        m.insert("Text".into(), c.text.clone().into());
        m.insert("TextColor".into(), c.color.clone().into());
        m.insert("TextFont".into(), c.font.clone().into());
        m.insert("Scroll".into(), c.scroll.into());
        m.insert("Speed".into(), c.speed.into());
        m.insert("ContentWidth".into(), self.content_width.max(1).into());
        m
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/message.rs"]
mod tests;
