//! Frame pacing, restart and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use epi_sim::Simulation;
use tracing::info;

use crate::{AnimResult, AnimationController, AnimationConfig, AnimationObserver, StopReason};

/// How frames are spaced in wall-clock time.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pacing {
    /// One frame every `iteration_time_ms` (minus the time the frame took).
    #[default]
    RealTime,
    /// As fast as possible; used for export and tests.
    Headless,
}

/// Cooperative cancellation flag, checked between frames.
///
/// Clones share the flag, so a handle can be moved to another thread or
/// into an observer.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Drives an [`AnimationController`] until its budget is spent, a step
/// fails, or the stop handle fires.
///
/// Each pass starts with `init()`.  With `repeat` on, a finished finite pass
/// starts over; only the stop handle (or a failure) ends a repeating run.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    interval: Duration,
    pacing:   Pacing,
    repeat:   bool,
    stop:     StopHandle,
}

impl FrameScheduler {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.iteration_time_ms),
            pacing:   config.pacing,
            repeat:   config.repeat,
            stop:     StopHandle::new(),
        }
    }

    /// Same cadence, different pacing and repeat.
    pub fn with_mode(mut self, pacing: Pacing, repeat: bool) -> Self {
        self.pacing = pacing;
        self.repeat = repeat;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run passes until the animation stops.
    ///
    /// Returns why it stopped; a failed step is returned as its error after
    /// `on_stop(StepFailed)` has been called.
    pub fn run<S: Simulation, O: AnimationObserver>(
        &self,
        ctrl:     &mut AnimationController<S>,
        observer: &mut O,
    ) -> AnimResult<StopReason> {
        loop {
            let update = ctrl.init()?;
            observer.on_init(&update, &ctrl.figure()?);

            while !ctrl.is_exhausted() {
                if self.stop.is_stopped() {
                    return Ok(self.finish(ctrl, observer, StopReason::Cancelled));
                }
                let started = Instant::now();
                let update = match ctrl.step() {
                    Ok(update) => update,
                    Err(e) => {
                        observer.on_stop(StopReason::StepFailed, ctrl.frames_produced());
                        return Err(e);
                    }
                };
                let frame = ctrl.current_frame().unwrap_or_default();
                observer.on_frame(frame, &update, &ctrl.figure()?);

                if self.pacing == Pacing::RealTime {
                    thread::sleep(self.interval.saturating_sub(started.elapsed()));
                }
            }

            if !self.repeat {
                return Ok(self.finish(ctrl, observer, StopReason::BudgetExhausted));
            }
            if self.stop.is_stopped() {
                return Ok(self.finish(ctrl, observer, StopReason::Cancelled));
            }
            info!(frames = ctrl.frames_produced(), "pass complete; restarting");
        }
    }

    fn finish<S: Simulation, O: AnimationObserver>(
        &self,
        ctrl:     &mut AnimationController<S>,
        observer: &mut O,
        reason:   StopReason,
    ) -> StopReason {
        ctrl.stop(reason);
        observer.on_stop(reason, ctrl.frames_produced());
        reason
    }
}
