//! View-type table: schema plus typed-config factory per registered name.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Presentation;
use crate::foundation::error::{BoardError, BoardResult};
use crate::view::View;
use crate::view::schema::ConfigSchema;

/// Typed configuration of one view type.
///
/// The raw JSON is validated against [`ViewConfig::schema`] before it is deserialized.
pub trait ViewConfig: DeserializeOwned {
    /// Registered name.
    const KIND: &'static str;

    /// Declarative schema for the raw JSON.
    fn schema() -> ConfigSchema;

    /// Construct the view.
    fn build(self, presentation: &Presentation) -> BoardResult<Arc<dyn View>>;
}

type Factory = fn(Value, &Presentation) -> BoardResult<Arc<dyn View>>;

struct Entry {
    schema: ConfigSchema,
    factory: Factory,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

fn construct<C: ViewConfig>(
    config: Value,
    presentation: &Presentation,
) -> BoardResult<Arc<dyn View>> {
    let typed: C = serde_json::from_value(config)
        .map_err(|e| BoardError::config(format!("{} config: {e}", C::KIND)))?;
    typed.build(presentation)
}

/// Name → view-type table.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    entries: BTreeMap<&'static str, Entry>,
}

impl ViewRegistry {
    /// Registry with no view types.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in view type.
    pub fn builtin() -> Self {
        use crate::views::{clock, image, message, scoreboard, visual};
        let mut r = Self::empty();
        r.register::<message::MessageConfig>();
        r.register::<clock::ClockConfig>();
        r.register::<scoreboard::ScoreboardConfig>();
        r.register::<visual::VisualConfig>();
        r.register::<image::ImageConfig>();
        r
    }

    /// Add or replace the view type `C::KIND`.
    pub fn register<C: ViewConfig>(&mut self) {
        self.entries.insert(
            C::KIND,
            Entry {
                schema: C::schema(),
                factory: construct::<C>,
            },
        );
    }

    /// Registered names in sorted order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Schema of `kind`.
    pub fn schema(&self, kind: &str) -> BoardResult<&ConfigSchema> {
        self.entry(kind).map(|e| &e.schema)
    }

    /// Validate `config` and construct a view of `kind`.
    pub fn create(
        &self,
        kind: &str,
        config: Value,
        presentation: &Presentation,
    ) -> BoardResult<Arc<dyn View>> {
        let entry = self.entry(kind)?;
        entry.schema.validate(&config)?;
        (entry.factory)(config, presentation)
    }

    /// Like [`ViewRegistry::create`], from `key=value` string pairs.
    pub fn create_from_pairs(
        &self,
        kind: &str,
        pairs: &[(String, String)],
        presentation: &Presentation,
    ) -> BoardResult<Arc<dyn View>> {
        let config = self.entry(kind)?.schema.coerce_pairs(pairs)?;
        self.create(kind, config, presentation)
    }

    fn entry(&self, kind: &str) -> BoardResult<&Entry> {
        self.entries
            .get(kind)
            .ok_or_else(|| BoardError::config(format!("unknown view type '{kind}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/registry.rs"]
mod tests;
