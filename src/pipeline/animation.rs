use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;

use crate::config::Presentation;
use crate::foundation::error::{BoardError, BoardResult};
use crate::pipeline::cancel::CancelToken;
use crate::pipeline::queue::{FrameConsumer, FrameProducer, FrameQueue, PushError};
use crate::render::bitmap::Bitmap;
use crate::view::{View, ViewHandle};

/// What the production loop does when a render pass fails or panics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Log and terminate the process; a supervisor restarts the board.
    #[default]
    Exit,
    /// Stop producing and report the fault to the consumer.
    Halt,
}

/// Production loop tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineOpts {
    /// Frames buffered ahead of the consumer.
    pub queue_capacity: usize,
    /// Delay the consumer should hold each frame for.
    pub min_frame_delay_ms: u64,
    /// Sleep while the queue is full (producer) or empty (consumer).
    pub idle_backoff_ms: u64,
    /// Reaction to render faults.
    pub fault_policy: FaultPolicy,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            queue_capacity: 4,
            min_frame_delay_ms: 20,
            idle_backoff_ms: 5,
            fault_policy: FaultPolicy::Exit,
        }
    }
}

impl PipelineOpts {
    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> BoardResult<()> {
        if self.queue_capacity == 0 {
            return Err(BoardError::config("pipeline.queue_capacity must be > 0"));
        }
        if self.idle_backoff_ms == 0 {
            return Err(BoardError::config("pipeline.idle_backoff_ms must be > 0"));
        }
        Ok(())
    }

    /// [`PipelineOpts::min_frame_delay_ms`] as a duration.
    pub fn min_frame_delay(&self) -> Duration {
        Duration::from_millis(self.min_frame_delay_ms)
    }

    /// [`PipelineOpts::idle_backoff_ms`] as a duration.
    pub fn idle_backoff(&self) -> Duration {
        Duration::from_millis(self.idle_backoff_ms.max(1))
    }
}

/// One produced frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Canvas-sized pixels.
    pub bitmap: Bitmap,
    /// Install generation that produced the frame.
    pub generation: u64,
    /// Position within the generation, starting at 0.
    pub seq: u64,
}

/// Snapshot of the pipeline state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationStats {
    /// Number of successful installs so far.
    pub generation: u64,
    /// Frames the current loop pushed.
    pub frames_produced: u64,
    /// Kind of the running view.
    pub active_view: Option<&'static str>,
}

#[derive(Debug)]
struct Active {
    handle: Arc<ViewHandle>,
    cancel: CancelToken,
    join: Option<JoinHandle<()>>,
    frames: FrameConsumer<Frame>,
    produced: Arc<AtomicU64>,
    fault: Arc<Mutex<Option<String>>>,
}

impl Active {
    fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(j) = self.join.take()
            && j.join().is_err()
        {
            tracing::warn!("production loop panicked");
        }
        self.handle.stop();
    }

    fn fault(&self) -> Option<String> {
        self.fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Background frame producer with atomic view hot-swap.
///
/// At most one production loop runs; [`Animation::install`] replaces it, and every frame
/// pulled after `install` returns belongs to the new generation.
#[derive(Debug)]
pub struct Animation {
    opts: PipelineOpts,
    presentation: Arc<Presentation>,
    active: Mutex<Option<Active>>,
    generation: AtomicU64,
}

impl Animation {
    /// Idle pipeline.
    pub fn new(opts: PipelineOpts, presentation: Arc<Presentation>) -> Self {
        Self {
            opts,
            presentation,
            active: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Tuning in effect.
    pub fn opts(&self) -> &PipelineOpts {
        &self.opts
    }

    /// Presentation every installed view renders with.
    pub fn presentation(&self) -> &Arc<Presentation> {
        &self.presentation
    }

    /// Initialize `view` and make it the running view; returns the new generation.
    ///
    /// The view's first update and compile happen before the running view is touched, so a
    /// failing install leaves it running.
    #[tracing::instrument(skip_all, fields(view = view.kind()))]
    pub fn install(&self, view: Arc<dyn View>) -> BoardResult<u64> {
        let handle = Arc::new(ViewHandle::new(view, self.presentation.clone()));
        handle.init()?;

        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(old) = active.take() {
            tracing::debug!(view = old.handle.kind(), "stopping previous view");
            old.shutdown();
        }

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let (producer, frames) = FrameQueue::bounded(self.opts.queue_capacity);
        let cancel = CancelToken::new();
        let produced = Arc::new(AtomicU64::new(0));
        let fault = Arc::new(Mutex::new(None));

        let job = LoopJob {
            handle: handle.clone(),
            producer,
            cancel: cancel.clone(),
            generation,
            backoff: self.opts.idle_backoff(),
            policy: self.opts.fault_policy,
            produced: produced.clone(),
            fault: fault.clone(),
        };
        let join = std::thread::Builder::new()
            .name("ledboard-render".into())
            .spawn(move || job.run())
            .context("spawn production loop");
        let join = match join {
            Ok(j) => j,
            Err(e) => {
                handle.stop();
                return Err(e.into());
            }
        };

        *active = Some(Active {
            handle,
            cancel,
            join: Some(join),
            frames,
            produced,
            fault,
        });
        tracing::info!(generation, "view installed");
        Ok(generation)
    }

    /// Block until a frame is available; returns it with the delay to hold it for.
    ///
    /// Fails with [`BoardError::Render`] once a halted loop's queue is drained.
    pub fn next_frame(&self) -> BoardResult<(Frame, Duration)> {
        loop {
            if let Some(out) = self.poll_frame()? {
                return Ok(out);
            }
            std::thread::sleep(self.opts.idle_backoff());
        }
    }

    /// Like [`Animation::next_frame`], giving up after `timeout`.
    pub fn next_frame_timeout(&self, timeout: Duration) -> BoardResult<Option<(Frame, Duration)>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(out) = self.poll_frame()? {
                return Ok(Some(out));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            std::thread::sleep(self.opts.idle_backoff().min(deadline - now));
        }
    }

    fn poll_frame(&self) -> BoardResult<Option<(Frame, Duration)>> {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(a) = active.as_ref() else {
            return Ok(None);
        };
        if let Some(f) = a.frames.try_pop() {
            return Ok(Some((f, self.opts.min_frame_delay())));
        }
        match a.fault() {
            Some(msg) => Err(BoardError::render(msg)),
            None => Ok(None),
        }
    }

    /// Cancel the loop and stop the running view.
    pub fn stop(&self) {
        let old = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(old) = old {
            old.shutdown();
            tracing::info!("animation stopped");
        }
    }

    /// Current generation, frame count and view kind.
    pub fn stats(&self) -> AnimationStats {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        AnimationStats {
            generation: self.generation.load(Ordering::Acquire),
            frames_produced: active
                .as_ref()
                .map_or(0, |a| a.produced.load(Ordering::Acquire)),
            active_view: active.as_ref().map(|a| a.handle.kind()),
        }
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.stop();
    }
}

struct LoopJob {
    handle: Arc<ViewHandle>,
    producer: FrameProducer<Frame>,
    cancel: CancelToken,
    generation: u64,
    backoff: Duration,
    policy: FaultPolicy,
    produced: Arc<AtomicU64>,
    fault: Arc<Mutex<Option<String>>>,
}

impl LoopJob {
    fn run(self) {
        tracing::debug!(generation = self.generation, "production loop started");
        let mut seq = 0u64;
        while !self.cancel.is_cancelled() {
            if self.producer.is_full() {
                self.cancel.sleep(self.backoff);
                continue;
            }
            let pass = panic::catch_unwind(AssertUnwindSafe(|| {
                self.handle.render_frame(Instant::now())
            }));
            let bitmap = match pass {
                Ok(Ok(b)) => b,
                Ok(Err(e)) => return self.on_fault(e.to_string()),
                Err(payload) => return self.on_fault(panic_message(payload.as_ref())),
            };
            let frame = Frame {
                bitmap,
                generation: self.generation,
                seq,
            };
            match self.producer.try_push(frame) {
                Ok(()) => {
                    seq += 1;
                    self.produced.fetch_add(1, Ordering::AcqRel);
                }
                Err(PushError::Full(_)) => {}
                Err(PushError::Disconnected(_)) => break,
            }
        }
        tracing::debug!(generation = self.generation, frames = seq, "production loop exited");
    }

    fn on_fault(&self, msg: String) {
        match self.policy {
            FaultPolicy::Exit => {
                tracing::error!(
                    view = self.handle.kind(),
                    generation = self.generation,
                    error = %msg,
                    "render fault; exiting"
                );
                std::process::exit(1);
            }
            FaultPolicy::Halt => {
                tracing::error!(
                    view = self.handle.kind(),
                    generation = self.generation,
                    error = %msg,
                    "render fault; production halted"
                );
                *self.fault.lock().unwrap_or_else(PoisonError::into_inner) = Some(msg);
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("render panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("render panicked: {s}")
    } else {
        "render panicked".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/animation.rs"]
mod tests;
