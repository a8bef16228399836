//! Board-level configuration loaded from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::assets::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{BoardError, BoardResult};
use crate::pipeline::animation::PipelineOpts;

/// Presentation defaults shared by every view: canvas, default font and color, asset roots.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Presentation {
    /// Output canvas.
    pub canvas: Canvas,
    /// Default font: a built-in pixel font name (`6x10`) or a font file under `font_dir`.
    pub font: String,
    /// Default font size in pixels for outline fonts.
    pub font_size: f32,
    /// Default text color (`#RRGGBB` or `#RRGGBBAA`).
    pub color: String,
    /// Directory that relative font names resolve against.
    pub font_dir: PathBuf,
    /// Directory that relative image sources resolve against.
    pub image_dir: PathBuf,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            font: "6x10".to_owned(),
            font_size: 10.0,
            color: "#FFFFFF".to_owned(),
            font_dir: PathBuf::from("fonts"),
            image_dir: PathBuf::from("images"),
        }
    }
}

impl Presentation {
    /// Default text color, falling back to white when `color` does not parse.
    pub fn default_color(&self) -> Color {
        Color::parse(&self.color).unwrap_or_else(|e| {
            tracing::warn!(color = %self.color, error = %e, "invalid presentation color");
            Color::WHITE
        })
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> BoardResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(BoardError::config("presentation.font_size must be finite and > 0"));
        }
        Color::parse(&self.color)
            .map_err(|e| BoardError::config(format!("presentation.color: {e}")))?;
        Ok(())
    }
}

/// A view selected at startup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartupView {
    /// Registered view-type name.
    pub kind: String,
    /// Raw JSON configuration validated by the view type's schema.
    #[serde(default = "empty_object")]
    pub config: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Top-level board configuration file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Presentation defaults.
    pub presentation: Presentation,
    /// Production loop tuning.
    pub pipeline: PipelineOpts,
    /// View to install when the board starts.
    pub view: Option<StartupView>,
}

impl BoardConfig {
    /// Parse a board configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BoardResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| BoardError::serde(format!("parse board config JSON: {e}")))?;
        cfg.presentation.validate()?;
        cfg.pipeline.validate()?;
        Ok(cfg)
    }

    /// Parse a board configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BoardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BoardError::config(format!("open board config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
