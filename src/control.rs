//! In-process control surface: list view types, inspect schemas, install views.

use std::sync::Arc;

use serde_json::Value;

use crate::config::{BoardConfig, Presentation};
use crate::foundation::error::BoardResult;
use crate::pipeline::animation::Animation;
use crate::view::registry::ViewRegistry;
use crate::view::schema::ConfigSchema;

/// A running board: view registry plus animation pipeline.
#[derive(Debug)]
pub struct Board {
    registry: ViewRegistry,
    animation: Animation,
}

impl Board {
    /// Idle board with the built-in view types.
    pub fn new(config: &BoardConfig) -> Self {
        Self::with_registry(config, ViewRegistry::builtin())
    }

    /// Idle board over a caller-provided registry.
    pub fn with_registry(config: &BoardConfig, registry: ViewRegistry) -> Self {
        Self {
            registry,
            animation: Animation::new(
                config.pipeline.clone(),
                Arc::new(config.presentation.clone()),
            ),
        }
    }

    /// Board that has already installed `config.view`, when present.
    pub fn start(config: &BoardConfig) -> BoardResult<Self> {
        let board = Self::new(config);
        if let Some(v) = &config.view {
            board.install(&v.kind, v.config.clone())?;
        }
        Ok(board)
    }

    /// Registered view-type names.
    pub fn list_views(&self) -> Vec<&'static str> {
        self.registry.kinds()
    }

    /// Configuration schema of `kind`.
    pub fn view_schema(&self, kind: &str) -> BoardResult<&ConfigSchema> {
        self.registry.schema(kind)
    }

    /// Validate `config`, build the view and hot-swap it in; returns the new generation.
    pub fn install(&self, kind: &str, config: Value) -> BoardResult<u64> {
        let view = self.registry.create(kind, config, self.presentation())?;
        self.animation.install(view)
    }

    /// Like [`Board::install`], from `key=value` string pairs.
    pub fn install_pairs(&self, kind: &str, pairs: &[(String, String)]) -> BoardResult<u64> {
        let view = self
            .registry
            .create_from_pairs(kind, pairs, self.presentation())?;
        self.animation.install(view)
    }

    /// The frame pipeline.
    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Presentation defaults.
    pub fn presentation(&self) -> &Presentation {
        self.animation.presentation()
    }
}

#[cfg(test)]
#[path = "../tests/unit/control.rs"]
mod tests;
