//! Animation observer trait for compositing, recording and progress output.

use epi_core::Frame;
use epi_render::{Figure, FigureView, FrameUpdate};

use crate::StopReason;

/// Callbacks invoked by [`FrameScheduler::run`][crate::FrameScheduler::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The figure handed to each hook is the
/// state *after* the update was applied.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl AnimationObserver for Progress {
///     fn on_frame(&mut self, frame: Frame, update: &FrameUpdate, _: &FigureView<'_>) {
///         println!("{frame}: {} handles", update.handles.len());
///     }
/// }
/// ```
pub trait AnimationObserver {
    /// Called after every `init()`: before the first frame and on restart.
    fn on_init(&mut self, _update: &FrameUpdate, _figure: &FigureView<'_>) {}

    /// Called after each successful frame.  Never called for a failed one.
    fn on_frame(&mut self, _frame: Frame, _update: &FrameUpdate, _figure: &FigureView<'_>) {}

    /// Called once when the scheduler stops.  `frames` is the number of
    /// frames produced in the final pass.
    fn on_stop(&mut self, _reason: StopReason, _frames: u64) {}
}

/// An [`AnimationObserver`] that does nothing.
pub struct NoopObserver;

impl AnimationObserver for NoopObserver {}

impl<O: AnimationObserver + ?Sized> AnimationObserver for &mut O {
    fn on_init(&mut self, update: &FrameUpdate, figure: &FigureView<'_>) {
        (**self).on_init(update, figure);
    }

    fn on_frame(&mut self, frame: Frame, update: &FrameUpdate, figure: &FigureView<'_>) {
        (**self).on_frame(frame, update, figure);
    }

    fn on_stop(&mut self, reason: StopReason, frames: u64) {
        (**self).on_stop(reason, frames);
    }
}

/// Fan out to two observers, left first.
impl<A: AnimationObserver, B: AnimationObserver> AnimationObserver for (A, B) {
    fn on_init(&mut self, update: &FrameUpdate, figure: &FigureView<'_>) {
        self.0.on_init(update, figure);
        self.1.on_init(update, figure);
    }

    fn on_frame(&mut self, frame: Frame, update: &FrameUpdate, figure: &FigureView<'_>) {
        self.0.on_frame(frame, update, figure);
        self.1.on_frame(frame, update, figure);
    }

    fn on_stop(&mut self, reason: StopReason, frames: u64) {
        self.0.on_stop(reason, frames);
        self.1.on_stop(reason, frames);
    }
}

// ── FrameRecorder ─────────────────────────────────────────────────────────────

/// Keeps an owned [`Figure`] of every frame of the first pass.
///
/// Later passes (after a repeat restart) are not recorded, so a repeating
/// animation yields exactly one finite sequence.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<Figure>,
    sealed: bool,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Figure] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn into_frames(self) -> Vec<Figure> {
        self.frames
    }
}

impl AnimationObserver for FrameRecorder {
    fn on_init(&mut self, _update: &FrameUpdate, _figure: &FigureView<'_>) {
        if !self.frames.is_empty() {
            self.sealed = true;
        }
    }

    fn on_frame(&mut self, _frame: Frame, _update: &FrameUpdate, figure: &FigureView<'_>) {
        if !self.sealed {
            self.frames.push(figure.to_figure());
        }
    }
}
