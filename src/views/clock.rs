use std::sync::Arc;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde_json::{Map, Value};

use crate::config::Presentation;
use crate::foundation::error::{BoardError, BoardResult};
use crate::view::View;
use crate::view::registry::ViewConfig;
use crate::view::schema::{ConfigSchema, FieldKind, FieldRule};

const DATE_FORMAT: &str = "%a %d %b";

const TEMPLATE: &str = r#"<template direction="column" justify="center" align="center">
  <text>{{ date .Format | xml }}</text>
{{- if .ShowDate }}
  <text>{{ date .DateFormat | xml }}</text>
{{- end }}
</template>"#;

/// Configuration of the `clock` view.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClockConfig {
    /// strftime-style time format.
    #[serde(default = "default_format")]
    pub format: String,
    /// Add a second line with the date.
    #[serde(default)]
    pub show_date: bool,
    /// Seconds between recompiles.
    #[serde(default = "default_refresh")]
    pub refresh_secs: u64,
}

fn default_format() -> String {
    "%H:%M".to_owned()
}

fn default_refresh() -> u64 {
    1
}

fn check_format(field: &str, fmt: &str) -> BoardResult<()> {
    if StrftimeItems::new(fmt).any(|i| matches!(i, Item::Error)) {
        return Err(BoardError::config(format!("{field}: invalid time format \"{fmt}\"")));
    }
    Ok(())
}

impl ViewConfig for ClockConfig {
    const KIND: &'static str = "clock";

    fn schema() -> ConfigSchema {
        ConfigSchema::new()
            .field(
                FieldRule::optional("format", FieldKind::string(Some(1), Some(64)))
                    .describe("strftime format, default %H:%M"),
            )
            .field(FieldRule::optional("show_date", FieldKind::Bool))
            .field(FieldRule::optional(
                "refresh_secs",
                FieldKind::int(Some(1), Some(3600)),
            ))
    }

    fn build(self, _presentation: &Presentation) -> BoardResult<Arc<dyn View>> {
        check_format("format", &self.format)?;
        Ok(Arc::new(ClockView { config: self }))
    }
}

/// Current local time, recompiled every `refresh_secs`.
#[derive(Debug)]
pub struct ClockView {
    config: ClockConfig,
}

impl View for ClockView {
    fn kind(&self) -> &'static str {
        ClockConfig::KIND
    }

    fn template(&self) -> String {
        TEMPLATE.to_owned()
    }

    fn data(&self) -> Map<String, Value> {
        let mut m = Map::new();
        m.insert("Format".into(), self.config.format.clone().into());
        m.insert("ShowDate".into(), self.config.show_date.into());
        m.insert("DateFormat".into(), DATE_FORMAT.into());
        m
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.config.refresh_secs.max(1)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/clock.rs"]
mod tests;
