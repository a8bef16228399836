//! Frame consumers and the pull loop that feeds them.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::BoardResult;
use crate::pipeline::animation::{Animation, Frame};

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

/// Consumer of produced frames, in pull order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BoardResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, frame: &Frame) -> BoardResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> BoardResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<Frame>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BoardResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame) -> BoardResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> BoardResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, created on `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Frames written since `begin`.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> BoardResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame) -> BoardResult<()> {
        let path = self.dir.join(format!("frame_{:05}.png", self.written));
        frame.bitmap.save_png(&path)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> BoardResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Pull `max_frames` frames from `animation` into `sink`, holding each for its delay.
pub fn drive(
    animation: &Animation,
    sink: &mut dyn FrameSink,
    max_frames: usize,
) -> BoardResult<()> {
    let canvas = animation.presentation().canvas;
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
    })?;
    for _ in 0..max_frames {
        let (frame, delay) = animation.next_frame()?;
        sink.push_frame(&frame)?;
        std::thread::sleep(delay);
    }
    sink.end()
}

#[cfg(test)]
#[path = "../../tests/unit/sink/mod.rs"]
mod tests;
