//! The `AnimationController` state machine.

use std::fmt;

use epi_core::{ColorMapping, Frame};
use epi_render::{
    Figure, FigureView, FrameUpdate, SpatialRenderer, TimeSeriesRenderer, spatial_renderer,
};
use epi_sim::Simulation;
use epi_stats::StatisticsAccumulator;
use tracing::{debug, info, warn};

use crate::{AnimError, AnimResult, AnimationConfig};

// ── States ────────────────────────────────────────────────────────────────────

/// Why an animation stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StopReason {
    /// A finite pass ended and `repeat` is off.
    BudgetExhausted,
    /// The collaborator, a statistics snapshot or a renderer failed.
    StepFailed,
    /// The scheduler's stop handle fired.
    Cancelled,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::BudgetExhausted => "budget exhausted",
            StopReason::StepFailed      => "step failed",
            StopReason::Cancelled       => "cancelled",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum AnimState {
    Uninitialized,
    /// Preview built; `step()` may be called.
    Initialized,
    Running,
    Stopped(StopReason),
}

impl fmt::Display for AnimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimState::Uninitialized => f.write_str("Uninitialized"),
            AnimState::Initialized   => f.write_str("Initialized"),
            AnimState::Running       => f.write_str("Running"),
            AnimState::Stopped(r)    => write!(f, "Stopped({r})"),
        }
    }
}

// ── AnimationController ───────────────────────────────────────────────────────

/// Owns the collaborator, the statistics tables and every drawable, and
/// advances them together one frame at a time.
///
/// Frame `n` of a pass (0-based, counted from the last `init()`) executes
/// the collaborator once and appends row `n` to both statistics tables, so
/// after `N` successful steps each table holds exactly `N` rows.
///
/// A failed step moves the controller to `Stopped(StepFailed)` and leaves
/// the drawables as they were after the last good frame.
pub struct AnimationController<S: Simulation> {
    sim:     S,
    config:  AnimationConfig,
    colors:  ColorMapping,
    stats:   StatisticsAccumulator,
    spatial: Box<dyn SpatialRenderer>,
    series:  Option<TimeSeriesRenderer>,
    state:   AnimState,
    /// `init()` ran since the last `initialize()` or stop.
    cleared: bool,
    /// Frames produced in the current pass.
    frames:  u64,
}

impl<S: Simulation> AnimationController<S> {
    /// Controller with the stock color palette.
    pub fn new(sim: S, config: AnimationConfig) -> AnimResult<Self> {
        Self::with_colors(sim, config, ColorMapping::standard())
    }

    /// Controller with a custom palette.  Both `config` and `colors` are
    /// validated here.
    pub fn with_colors(sim: S, config: AnimationConfig, colors: ColorMapping) -> AnimResult<Self> {
        config.validate()?;
        colors.validate()?;
        let spatial = spatial_renderer(config.layout, config.edges_enabled);
        Ok(Self {
            sim,
            config,
            colors,
            stats: StatisticsAccumulator::new(),
            spatial,
            series: None,
            state: AnimState::Uninitialized,
            cleared: false,
            frames: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Initialize the collaborator and build the preview frame from its
    /// initial statistics snapshot, which also fixes both table schemas.
    pub fn initialize(&mut self) -> AnimResult<()> {
        if self.state != AnimState::Uninitialized {
            return Err(self.invalid("initialize"));
        }
        if let Err(e) = self.build_preview() {
            self.state = AnimState::Stopped(StopReason::StepFailed);
            warn!(error = %e, "animation initialization failed");
            return Err(e);
        }
        self.state = AnimState::Initialized;
        info!(
            layout = ?self.config.layout,
            population = self.sim.population().len(),
            "animation initialized"
        );
        Ok(())
    }

    /// Clear every drawable and all table rows (schemas are kept).
    ///
    /// Called before the first frame and on every restart.  Returns the
    /// cleared handles.
    pub fn init(&mut self) -> AnimResult<FrameUpdate> {
        match self.state {
            AnimState::Uninitialized | AnimState::Stopped(StopReason::StepFailed) => {
                return Err(self.invalid("init"));
            }
            _ => {}
        }
        let series = self.series.as_mut().ok_or(AnimError::InvalidState {
            op:    "init",
            state: AnimState::Uninitialized.to_string(),
        })?;

        let spatial = self.spatial.clear();
        let handles = series.clear();
        self.stats.reset();
        self.frames = 0;
        self.cleared = true;
        self.state = AnimState::Initialized;
        debug!("animation cleared");
        Ok(FrameUpdate::new(spatial, handles))
    }

    /// Produce one frame.
    ///
    /// Executes the collaborator, records both statistics snapshots, then
    /// steps the spatial and time-series renderers.  The returned update
    /// holds exactly the drawables this frame mutated.
    pub fn step(&mut self) -> AnimResult<FrameUpdate> {
        match self.state {
            AnimState::Initialized if !self.cleared => {
                self.init()?;
            }
            AnimState::Initialized | AnimState::Running => {}
            AnimState::Uninitialized | AnimState::Stopped(_) => return Err(self.invalid("step")),
        }
        if self.is_exhausted() {
            self.state = AnimState::Stopped(StopReason::BudgetExhausted);
            return Err(AnimError::BudgetExhausted { frames: self.frames });
        }

        match self.advance() {
            Ok(update) => {
                self.frames += 1;
                self.state = AnimState::Running;
                debug!(
                    frame = self.frames - 1,
                    handles = update.handles.len(),
                    relayout = update.relayout,
                    "frame"
                );
                Ok(update)
            }
            Err(e) => {
                self.state = AnimState::Stopped(StopReason::StepFailed);
                warn!(frame = self.frames, error = %e, "animation step failed; stopping");
                Err(e)
            }
        }
    }

    /// Stop the animation.  A stopped controller can be restarted with
    /// `init()` unless the stop was a failure.
    pub fn stop(&mut self, reason: StopReason) {
        if self.state == AnimState::Uninitialized {
            return;
        }
        self.state = AnimState::Stopped(reason);
        self.cleared = false;
        info!(%reason, frames = self.frames, "animation stopped");
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> AnimState {
        self.state
    }

    /// Frames produced since the last `init()`.
    pub fn frames_produced(&self) -> u64 {
        self.frames
    }

    /// The most recently produced frame, if any.
    pub fn current_frame(&self) -> Option<Frame> {
        self.frames.checked_sub(1).map(Frame)
    }

    /// `true` once the current pass has used its whole frame budget.
    pub fn is_exhausted(&self) -> bool {
        self.config.iterations.is_exhausted(self.frames)
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn colors(&self) -> &ColorMapping {
        &self.colors
    }

    pub fn stats(&self) -> &StatisticsAccumulator {
        &self.stats
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    /// Mutable access to the collaborator between frames.
    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn spatial(&self) -> &dyn SpatialRenderer {
        self.spatial.as_ref()
    }

    pub fn series(&self) -> Option<&TimeSeriesRenderer> {
        self.series.as_ref()
    }

    /// Borrowed view of every drawable, for compositing.
    pub fn figure(&self) -> AnimResult<FigureView<'_>> {
        let series = self.series.as_ref().ok_or_else(|| self.invalid("figure"))?;
        Ok(FigureView {
            bounds:      self.sim.bounds(),
            environment: self.spatial.view(),
            contagion:   series.contagion(),
            economy:     series.economy(),
        })
    }

    /// Owned copy of every drawable.
    pub fn snapshot(&self) -> AnimResult<Figure> {
        Ok(self.figure()?.to_figure())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn build_preview(&mut self) -> AnimResult<()> {
        self.sim.initialize()?;
        self.stats.refresh(&self.sim)?;
        self.spatial.setup(&self.sim, &self.colors)?;
        self.series = Some(TimeSeriesRenderer::setup(
            &self.stats,
            self.sim.critical_limit(),
            self.config.iterations.limit(),
            &self.colors,
        )?);
        Ok(())
    }

    fn advance(&mut self) -> AnimResult<FrameUpdate> {
        self.sim.execute()?;
        self.stats.refresh(&self.sim)?;
        // The rows just committed belong to this frame only if it completes.
        self.redraw().inspect_err(|_| self.stats.discard_last())
    }

    fn redraw(&mut self) -> AnimResult<FrameUpdate> {
        let spatial = self.spatial.step(&self.sim, &self.colors)?;
        let series = self
            .series
            .as_mut()
            .ok_or(AnimError::InvalidState { op: "step", state: "no time series".into() })?
            .step(&self.stats)?;
        Ok(FrameUpdate::new(spatial, series))
    }

    fn invalid(&self, op: &'static str) -> AnimError {
        AnimError::InvalidState { op, state: self.state.to_string() }
    }
}
