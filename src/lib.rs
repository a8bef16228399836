//! ledboard drives low-resolution LED matrix displays from hot-swappable markup scenes.
//!
//! A [`View`] emits a markup template; the template is expanded with presentation defaults
//! and live data, compiled into a tree of [`Component`]s rooted at a [`Template`], and
//! rendered by a background production loop into a bounded frame queue:
//!
//! - Build a [`Board`] from a [`BoardConfig`]
//! - Install a view by kind and JSON config
//! - Pull frames with [`Animation::next_frame`] or stream them into a [`FrameSink`]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod foundation;

/// Markup compilation and the element registry.
pub mod compile;
/// The component contract and layout/content components.
pub mod component;
/// Board configuration.
pub mod config;
/// In-process control adapter.
pub mod control;
/// Text-template expansion.
pub mod expand;
/// Child placement.
pub mod layout;
/// Frame production and hot-swap.
pub mod pipeline;
/// Pixel surfaces and render cadence.
pub mod render;
/// Frame consumers.
pub mod sink;
/// View contract, registry and refresh.
pub mod view;
/// Built-in view types.
pub mod views;
/// Procedural visual components.
pub mod visuals;

pub use crate::assets::color::Color;
pub use crate::foundation::core::{Canvas, Dim, Pos, Rgba8Premul, Size, Vec2};
pub use crate::foundation::error::{BoardError, BoardResult};

pub use crate::compile::compiler::{CompileCtx, compile_markup};
pub use crate::compile::registry::Registry;
pub use crate::component::template::Template;
pub use crate::component::{Component, NodeBase, render_or_reuse};
pub use crate::config::{BoardConfig, Presentation, StartupView};
pub use crate::control::Board;
pub use crate::expand::{ExpandError, TextTemplate, expand};
pub use crate::layout::solver::{Direction, Distribute};
pub use crate::pipeline::animation::{
    Animation, AnimationStats, FaultPolicy, Frame, PipelineOpts,
};
pub use crate::render::bitmap::Bitmap;
pub use crate::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, drive};
pub use crate::view::registry::{ViewConfig, ViewRegistry};
pub use crate::view::schema::ConfigSchema;
pub use crate::view::{TemplateSlot, View, ViewHandle};
