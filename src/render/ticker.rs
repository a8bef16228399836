use std::time::{Duration, Instant};

/// Interval used when a node declares no render interval (or `0`).
pub(crate) const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(50);

/// Deadline-based render cadence for one node.
///
/// The ticker owns no thread: polling compares `now` against the next deadline. A negative
/// declared interval arms it in `Once` mode, which never fires, so the parent keeps reusing the
/// first cached frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum RenderTicker {
    #[default]
    Disarmed,
    Once,
    Every {
        interval: Duration,
        next: Instant,
    },
}

impl RenderTicker {
    /// Arm from a declared interval in milliseconds.
    pub(crate) fn arm(&mut self, interval_ms: i64, now: Instant) {
        *self = if interval_ms < 0 {
            Self::Once
        } else {
            let interval = if interval_ms == 0 {
                DEFAULT_RENDER_INTERVAL
            } else {
                Duration::from_millis(interval_ms as u64)
            };
            Self::Every {
                interval,
                next: now + interval,
            }
        };
    }

    /// Return `true` when the deadline passed since the last poll, and schedule the next one.
    pub(crate) fn poll(&mut self, now: Instant) -> bool {
        let Self::Every { interval, next } = self else {
            return false;
        };
        if now < *next {
            return false;
        }
        // Skip missed deadlines instead of firing a burst to catch up.
        *next = now + *interval;
        true
    }

    pub(crate) fn stop(&mut self) {
        *self = Self::Disarmed;
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self) -> bool {
        !matches!(self, Self::Disarmed)
    }

    #[cfg(test)]
    pub(crate) fn interval(&self) -> Option<Duration> {
        match self {
            Self::Every { interval, .. } => Some(*interval),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ticker.rs"]
mod tests;
