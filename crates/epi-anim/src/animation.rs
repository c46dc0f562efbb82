//! The `Animation` handle returned by [`run_animation`].

use std::path::Path;

use epi_render::Figure;
use epi_render::raster::save_png;
use epi_sim::Simulation;
use tracing::info;

use crate::{
    AnimResult, AnimationConfig, AnimationController, AnimationObserver, FrameRecorder,
    FrameScheduler, Pacing, StopHandle, StopReason,
};

/// Build a controller for `sim`, initialize it, and return the handle.
///
/// The returned animation shows the preview frame; nothing has been stepped
/// yet.  Call [`Animation::play`] to run it or
/// [`export_animation`][crate::export_animation] to encode it.
pub fn run_animation<S: Simulation>(sim: S, config: AnimationConfig) -> AnimResult<Animation<S>> {
    let scheduler = FrameScheduler::new(&config);
    let mut controller = AnimationController::new(sim, config)?;
    controller.initialize()?;
    Ok(Animation { controller, scheduler, recorded: Vec::new() })
}

/// A live animation: controller, scheduler and any recorded frames.
pub struct Animation<S: Simulation> {
    controller: AnimationController<S>,
    scheduler:  FrameScheduler,
    recorded:   Vec<Figure>,
}

impl<S: Simulation> Animation<S> {
    /// Run with the configured pacing and repeat until the animation stops.
    ///
    /// With `record_frames` on, the first pass is kept for export.
    pub fn play<O: AnimationObserver>(&mut self, observer: &mut O) -> AnimResult<StopReason> {
        let scheduler = self.scheduler.clone();
        self.run_with(&scheduler, self.controller.config().record_frames, observer)
    }

    /// Run one headless pass (no repeat) and record it.
    pub fn record<O: AnimationObserver>(&mut self, observer: &mut O) -> AnimResult<StopReason> {
        let scheduler = self.scheduler.clone().with_mode(Pacing::Headless, false);
        self.run_with(&scheduler, true, observer)
    }

    /// Write the current figure as a PNG still.
    pub fn save_frame(&self, path: &Path) -> AnimResult<()> {
        let figure = self.controller.figure()?;
        save_png(&figure, path, self.controller.config().canvas)?;
        info!(path = %path.display(), "frame saved");
        Ok(())
    }

    /// Fires the scheduler's stop flag; safe to call from another thread
    /// through a clone.
    pub fn stop_handle(&self) -> StopHandle {
        self.scheduler.stop_handle()
    }

    pub fn controller(&self) -> &AnimationController<S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController<S> {
        &mut self.controller
    }

    pub fn config(&self) -> &AnimationConfig {
        self.controller.config()
    }

    /// Frames kept by the last recording run.
    pub fn recorded(&self) -> &[Figure] {
        &self.recorded
    }

    pub fn take_recorded(&mut self) -> Vec<Figure> {
        std::mem::take(&mut self.recorded)
    }

    fn run_with<O: AnimationObserver>(
        &mut self,
        scheduler: &FrameScheduler,
        record:    bool,
        observer:  &mut O,
    ) -> AnimResult<StopReason> {
        if !record {
            return scheduler.run(&mut self.controller, observer);
        }
        let mut recorder = FrameRecorder::new();
        let result = scheduler.run(&mut self.controller, &mut (&mut recorder, &mut *observer));
        if !recorder.is_empty() {
            self.recorded = recorder.into_frames();
        }
        result
    }
}
