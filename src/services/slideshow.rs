//! Slideshow state: which frame is showing and when to move on.
//!
//! The slideshow owns at most one pending timer. Every transition samples a
//! fresh random delay, and the handle of the armed timer is kept on the
//! state object so replacing or detaching the sequence can cancel it before
//! anything else happens. Timer ids are never reused, so a callback that
//! still fires after cancellation is recognized as stale and ignored.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::rendering::Frame;

/// Lower bound of the per-slide delay (inclusive).
pub const MIN_SLIDE_DELAY: Duration = Duration::from_millis(3000);
/// Upper bound of the per-slide delay (exclusive).
pub const MAX_SLIDE_DELAY: Duration = Duration::from_millis(5000);

/// Identifies one armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A pending single-shot timer.
pub trait TimerHandle {
    /// Stop the timer. Cancelling an already fired timer is a no-op.
    fn cancel(&mut self);
}

/// Arms single-shot timers that report back with their [`TimerId`].
pub trait Scheduler {
    type Handle: TimerHandle;

    fn schedule(&mut self, id: TimerId, delay: Duration) -> Self::Handle;
}

/// Sample a slide delay uniformly from `[3000 ms, 5000 ms)`.
pub fn random_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    let min = MIN_SLIDE_DELAY.as_millis() as u64;
    let max = MAX_SLIDE_DELAY.as_millis() as u64;
    Duration::from_millis(rng.gen_range(min..max))
}

/// Transition label carried through from configuration.
///
/// Purely descriptive: every kind switches frames instantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionKind {
    #[default]
    Cut,
    Fade,
    Slide,
    Zoom,
}

impl TransitionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransitionKind::Cut => "cut",
            TransitionKind::Fade => "fade",
            TransitionKind::Slide => "slide",
            TransitionKind::Zoom => "zoom",
        }
    }

    /// Parse a label, falling back to [`TransitionKind::Cut`] for anything
    /// unrecognized.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::debug!(label, "Unknown transition label, using cut");
            TransitionKind::Cut
        })
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "cut" | "none" => Ok(TransitionKind::Cut),
            "fade" | "crossfade" => Ok(TransitionKind::Fade),
            "slide" => Ok(TransitionKind::Slide),
            "zoom" => Ok(TransitionKind::Zoom),
            other => Err(format!("unknown transition '{other}'")),
        }
    }
}

/// Cycling state for a sequence of frames.
pub struct Slideshow<S: Scheduler, R: Rng = StdRng> {
    frames: Vec<Frame>,
    current: usize,
    pending: Option<(TimerId, S::Handle)>,
    scheduler: S,
    rng: R,
    next_id: u64,
    transition: TransitionKind,
}

impl<S: Scheduler> Slideshow<S> {
    pub fn new(scheduler: S) -> Self {
        Self::with_rng(scheduler, StdRng::from_entropy())
    }
}

impl<S: Scheduler, R: Rng> Slideshow<S, R> {
    pub fn with_rng(scheduler: S, rng: R) -> Self {
        Self {
            frames: Vec::new(),
            current: 0,
            pending: None,
            scheduler,
            rng,
            next_id: 0,
            transition: TransitionKind::default(),
        }
    }

    /// Replace the sequence and restart at its first frame.
    ///
    /// Any pending timer is cancelled first. A timer is armed only when
    /// there is more than one frame to cycle through.
    pub fn attach(&mut self, frames: Vec<Frame>, transition: TransitionKind) {
        self.cancel_pending();
        self.frames = frames;
        self.current = 0;
        self.transition = transition;
        tracing::debug!(
            frames = self.frames.len(),
            transition = %transition,
            "Slideshow attached"
        );
        if self.frames.len() > 1 {
            self.arm();
        }
    }

    /// Cancel the pending timer and drop the sequence.
    pub fn detach(&mut self) -> Vec<Frame> {
        self.cancel_pending();
        self.current = 0;
        std::mem::take(&mut self.frames)
    }

    /// Handle a fired timer.
    ///
    /// Advances to the next frame (wrapping), re-arms with a fresh delay and
    /// returns the new index. Returns `None` for ids that are no longer
    /// pending.
    pub fn on_timer(&mut self, id: TimerId) -> Option<usize> {
        match self.pending {
            Some((pending, _)) if pending == id => {}
            _ => {
                tracing::trace!(timer = id.get(), "Ignoring stale slideshow timer");
                return None;
            }
        }
        self.pending = None;
        if self.frames.len() < 2 {
            return None;
        }
        self.current = (self.current + 1) % self.frames.len();
        self.arm();
        Some(self.current)
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Id of the pending timer, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending.as_ref().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn transition(&self) -> TransitionKind {
        self.transition
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn arm(&mut self) {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let delay = random_delay(&mut self.rng);
        tracing::trace!(
            timer = id.get(),
            delay_ms = delay.as_millis() as u64,
            "Arming slideshow timer"
        );
        let handle = self.scheduler.schedule(id, delay);
        self.pending = Some((id, handle));
    }

    fn cancel_pending(&mut self) {
        if let Some((_, mut handle)) = self.pending.take() {
            handle.cancel();
        }
    }
}

impl<S: Scheduler, R: Rng> Drop for Slideshow<S, R> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
