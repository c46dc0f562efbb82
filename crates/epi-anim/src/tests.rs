//! Tests for the controller, scheduler, observers and export.

use epi_core::{
    Bounds, EntityId, FrameBudget, InfectionSeverity, Position, StatKind, Status, StepRecord,
};
use epi_render::{FigureView, FrameUpdate, LayoutMode};
use epi_sim::{Business, Facility, FixedSimulation, Household, Person};

use crate::{AnimationConfig, AnimationObserver, Pacing, StopHandle, StopReason};

const CANVAS: (u32, u32) = (300, 100);

fn info_record(s: f64, i: f64) -> StepRecord {
    StepRecord::new()
        .with("Susceptible", s)
        .with("Infected", i)
        .with("Recovered_Immune", 0.0)
        .with("Death", 0.0)
        .with("Hospitalization", 0.0)
        .with("Severe", 0.0)
}

fn ecom_record(base: f64) -> StepRecord {
    ["Q1", "Q2", "Q3", "Q4", "Q5"]
        .into_iter()
        .enumerate()
        .map(|(i, q)| (q, base * (i + 1) as f64))
        .collect()
}

fn sim() -> FixedSimulation {
    FixedSimulation::new(Bounds::new(100.0, 100.0), 0.15)
        .with_population(vec![
            Person::new(EntityId(10), Position::new(1.0, 1.0), Status::Susceptible),
            Person::new(EntityId(11), Position::new(2.0, 3.0), Status::Infected)
                .with_severity(InfectionSeverity::Severe),
        ])
        .with_statistics(StatKind::Info, info_record(0.9, 0.1))
        .with_statistics(StatKind::Ecom, ecom_record(10.0))
}

fn sim_with_topology() -> FixedSimulation {
    sim().with_topology(
        Facility { id: EntityId(1), position: Position::new(50.0, 50.0) },
        vec![Household {
            id:        EntityId(2),
            position:  Position::new(10.0, 10.0),
            homemates: vec![EntityId(10), EntityId(11)],
        }],
        vec![Business {
            id:        EntityId(3),
            position:  Position::new(90.0, 90.0),
            employees: vec![EntityId(11)],
        }],
    )
}

fn headless(frames: u64) -> AnimationConfig {
    AnimationConfig {
        iterations: FrameBudget::Finite(frames),
        pacing: Pacing::Headless,
        canvas: CANVAS,
        ..AnimationConfig::default()
    }
}

/// Counts callbacks; optionally fires a stop handle after `n` frames.
#[derive(Default)]
struct Counter {
    inits:   u32,
    frames:  Vec<u64>,
    stops:   Vec<(StopReason, u64)>,
    stop_at: Option<(usize, StopHandle)>,
}

impl AnimationObserver for Counter {
    fn on_init(&mut self, _update: &FrameUpdate, _figure: &FigureView<'_>) {
        self.inits += 1;
    }

    fn on_frame(&mut self, frame: epi_core::Frame, _update: &FrameUpdate, _figure: &FigureView<'_>) {
        self.frames.push(frame.0);
        if let Some((n, handle)) = &self.stop_at {
            if self.frames.len() >= *n {
                handle.stop();
            }
        }
    }

    fn on_stop(&mut self, reason: StopReason, frames: u64) {
        self.stops.push((reason, frames));
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::AnimError;

    #[test]
    fn defaults() {
        let c = AnimationConfig::default();
        assert_eq!(c.iterations, FrameBudget::Finite(100));
        assert_eq!(c.iteration_time_ms, 250);
        assert_eq!(c.layout, LayoutMode::Scatter);
        assert!(!c.edges_enabled);
        assert_eq!(c.export_fps, 60);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn graph_preset_repeats() {
        let c = AnimationConfig::graph(true);
        assert_eq!(c.layout, LayoutMode::Graph);
        assert!(c.edges_enabled);
        assert!(c.repeat);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let zero_fps = AnimationConfig { export_fps: 0, ..AnimationConfig::default() };
        assert!(matches!(zero_fps.validate(), Err(AnimError::Config(_))));

        let no_frames = AnimationConfig { iterations: FrameBudget::Finite(0), ..AnimationConfig::default() };
        assert!(matches!(no_frames.validate(), Err(AnimError::Config(_))));

        let tiny = AnimationConfig { canvas: (2, 10), ..AnimationConfig::default() };
        assert!(matches!(tiny.validate(), Err(AnimError::Config(_))));
    }
}

#[cfg(test)]
mod controller_tests {
    use super::*;
    use crate::{AnimError, AnimState, AnimationController};
    use epi_core::{ColorMapping, NamedColor};
    use epi_render::{Handle, PanelId, RenderError};
    use epi_sim::{SimResult, Simulation};

    fn initialized(config: AnimationConfig) -> AnimationController<FixedSimulation> {
        let mut ctrl = AnimationController::new(sim(), config).unwrap();
        ctrl.initialize().unwrap();
        ctrl
    }

    #[test]
    fn incomplete_colors_are_rejected_up_front() {
        let err = AnimationController::with_colors(sim(), headless(3), ColorMapping::empty(NamedColor::White))
            .err()
            .unwrap();
        assert!(matches!(err, AnimError::Colors(_)));
    }

    #[test]
    fn preview_matches_initial_snapshot() {
        let ctrl = initialized(headless(10));
        assert_eq!(ctrl.state(), AnimState::Initialized);
        assert_eq!(ctrl.stats().row_count(), 1);
        assert_eq!(ctrl.stats().info().record_at(0).unwrap(), info_record(0.9, 0.1));

        let series = ctrl.series().unwrap();
        assert_eq!(series.contagion().series().len(), 6);
        assert_eq!(series.economy().series().len(), 5);
        assert_eq!(series.contagion().reference.as_ref().unwrap().y, 0.15);
        assert!(ctrl.simulation().is_initialized());
    }

    #[test]
    fn lifecycle_calls_out_of_order_fail() {
        let mut ctrl = AnimationController::new(sim(), headless(3)).unwrap();
        assert!(matches!(ctrl.step(), Err(AnimError::InvalidState { op: "step", .. })));
        assert!(matches!(ctrl.init(), Err(AnimError::InvalidState { op: "init", .. })));
        assert!(ctrl.figure().is_err());

        ctrl.initialize().unwrap();
        assert!(matches!(ctrl.initialize(), Err(AnimError::InvalidState { op: "initialize", .. })));
    }

    #[test]
    fn row_count_equals_steps() {
        let mut ctrl = initialized(headless(10));
        for n in 1..=7u64 {
            ctrl.step().unwrap();
            assert_eq!(ctrl.stats().row_count() as u64, n);
            assert_eq!(ctrl.frames_produced(), n);
        }
        assert_eq!(ctrl.state(), AnimState::Running);
        assert_eq!(ctrl.simulation().steps(), 7);
        let infected = ctrl.series().unwrap().contagion().series_for("Infected").unwrap();
        assert_eq!(infected.len(), 7);
        assert_eq!(infected.points()[0].0, 0);
    }

    #[test]
    fn scatter_frame_reports_scatter_and_every_series() {
        let mut ctrl = initialized(headless(5));
        let update = ctrl.step().unwrap();
        assert!(!update.relayout);
        assert_eq!(update.handles[0], Handle::Scatter);
        assert_eq!(update.handles.len(), 1 + 6 + 5);
        assert_eq!(update.handles.iter().filter(|h| **h == Handle::Scatter).count(), 1);
        assert_eq!(update.dirty_panels(), PanelId::ALL.to_vec());
    }

    #[test]
    fn graph_frame_is_a_relayout() {
        let config = AnimationConfig { layout: LayoutMode::Graph, edges_enabled: true, ..headless(5) };
        let mut ctrl = AnimationController::new(sim_with_topology(), config).unwrap();
        ctrl.initialize().unwrap();
        let update = ctrl.step().unwrap();
        assert!(update.relayout);
        assert!(!update.handles.contains(&Handle::Scatter));
        assert_eq!(update.handles.len(), 11);
    }

    #[test]
    fn graph_without_topology_fails_initialize() {
        let config = AnimationConfig { layout: LayoutMode::Graph, ..headless(5) };
        let mut ctrl = AnimationController::new(sim(), config).unwrap();
        assert!(matches!(ctrl.initialize(), Err(AnimError::Render(_))));
        assert_eq!(ctrl.state(), AnimState::Stopped(StopReason::StepFailed));
    }

    #[test]
    fn init_returns_cleared_handles_and_empties_everything() {
        let mut ctrl = initialized(headless(10));
        ctrl.step().unwrap();
        ctrl.step().unwrap();

        let update = ctrl.init().unwrap();
        assert_eq!(update.handles.len(), 11);
        assert_eq!(ctrl.state(), AnimState::Initialized);
        assert_eq!(ctrl.stats().row_count(), 0);
        assert_eq!(ctrl.frames_produced(), 0);
        let series = ctrl.series().unwrap();
        assert!(series.contagion().series().iter().all(|s| s.is_empty()));

        ctrl.step().unwrap();
        for s in series_points(&ctrl) {
            assert_eq!(s, vec![0]);
        }
    }

    fn series_points(ctrl: &AnimationController<FixedSimulation>) -> Vec<Vec<u64>> {
        let series = ctrl.series().unwrap();
        series
            .contagion()
            .series()
            .iter()
            .chain(series.economy().series())
            .map(|s| s.points().iter().map(|p| p.0).collect())
            .collect()
    }

    #[test]
    fn failed_step_stops_for_good() {
        let mut ctrl = AnimationController::new(sim().fail_after(2), headless(10)).unwrap();
        ctrl.initialize().unwrap();
        ctrl.step().unwrap();
        ctrl.step().unwrap();

        assert!(matches!(ctrl.step(), Err(AnimError::Simulation(_))));
        assert_eq!(ctrl.state(), AnimState::Stopped(StopReason::StepFailed));
        assert_eq!(ctrl.stats().row_count(), 2);
        assert!(ctrl.step().is_err());
        assert!(ctrl.init().is_err());
    }

    /// Loses track of one agent's position from step `from` on.
    struct Drifting {
        inner: FixedSimulation,
        from:  u64,
    }

    impl Simulation for Drifting {
        fn initialize(&mut self) -> SimResult<()> {
            self.inner.initialize()
        }

        fn execute(&mut self) -> SimResult<()> {
            self.inner.execute()
        }

        fn population(&self) -> &[Person] {
            self.inner.population()
        }

        fn positions(&self) -> Vec<Position> {
            let mut positions = self.inner.positions();
            if self.inner.steps() >= self.from {
                positions.pop();
            }
            positions
        }

        fn statistics(&self, kind: StatKind) -> StepRecord {
            self.inner.statistics(kind)
        }

        fn bounds(&self) -> Bounds {
            self.inner.bounds()
        }

        fn critical_limit(&self) -> f64 {
            self.inner.critical_limit()
        }
    }

    #[test]
    fn render_failure_rolls_back_the_statistics_row() {
        let drifting = Drifting { inner: sim(), from: 3 };
        let mut ctrl = AnimationController::new(drifting, headless(10)).unwrap();
        ctrl.initialize().unwrap();
        ctrl.step().unwrap();
        ctrl.step().unwrap();

        let err = ctrl.step().unwrap_err();
        assert!(matches!(
            err,
            AnimError::Render(RenderError::PopulationMismatch { population: 2, positions: 1 })
        ));
        assert_eq!(ctrl.state(), AnimState::Stopped(StopReason::StepFailed));
        assert_eq!(ctrl.frames_produced(), 2);
        assert_eq!(ctrl.stats().row_count(), 2);
        assert_eq!(ctrl.stats().ecom().row_count(), 2);
        let infected = ctrl.series().unwrap().contagion().series_for("Infected").unwrap();
        assert_eq!(infected.len(), 2);
    }

    #[test]
    fn schema_drift_stops_the_animation() {
        let mut ctrl = initialized(headless(10));
        ctrl.step().unwrap();
        ctrl.simulation_mut()
            .set_statistics(StatKind::Info, info_record(0.5, 0.5).with("Asymptomatic", 0.1));
        assert!(matches!(ctrl.step(), Err(AnimError::Stats(_))));
        assert_eq!(ctrl.state(), AnimState::Stopped(StopReason::StepFailed));
        assert_eq!(ctrl.stats().row_count(), 1);
    }

    #[test]
    fn stepping_past_the_budget_stops() {
        let mut ctrl = initialized(headless(3));
        for _ in 0..3 {
            ctrl.step().unwrap();
        }
        assert!(ctrl.is_exhausted());
        assert!(matches!(ctrl.step(), Err(AnimError::BudgetExhausted { frames: 3 })));
        assert_eq!(ctrl.state(), AnimState::Stopped(StopReason::BudgetExhausted));

        ctrl.init().unwrap();
        ctrl.step().unwrap();
        assert_eq!(ctrl.stats().row_count(), 1);
    }

    #[test]
    fn population_changes_between_frames_resize_scatter() {
        let mut ctrl = initialized(headless(10));
        ctrl.simulation_mut().population_mut().clear();
        ctrl.step().unwrap();
        match ctrl.figure().unwrap().environment {
            epi_render::EnvironmentView::Scatter(d) => assert!(d.is_empty()),
            other => panic!("unexpected environment {other:?}"),
        }
    }
}

#[cfg(test)]
mod scheduler_tests {
    use super::*;
    use crate::{AnimError, AnimState, AnimationController, FrameScheduler, NoopObserver};

    #[test]
    fn headless_run_ends_on_budget() {
        let config = headless(5);
        let mut ctrl = AnimationController::new(sim(), config.clone()).unwrap();
        ctrl.initialize().unwrap();

        let mut counter = Counter::default();
        let reason = FrameScheduler::new(&config).run(&mut ctrl, &mut counter).unwrap();
        assert_eq!(reason, StopReason::BudgetExhausted);
        assert_eq!(counter.inits, 1);
        assert_eq!(counter.frames, vec![0, 1, 2, 3, 4]);
        assert_eq!(counter.stops, vec![(StopReason::BudgetExhausted, 5)]);
        assert_eq!(ctrl.state(), AnimState::Stopped(StopReason::BudgetExhausted));
        assert_eq!(ctrl.stats().row_count(), 5);
    }

    #[test]
    fn repeat_restarts_until_cancelled() {
        let config = AnimationConfig { repeat: true, ..headless(3) };
        let mut ctrl = AnimationController::new(sim(), config.clone()).unwrap();
        ctrl.initialize().unwrap();
        let scheduler = FrameScheduler::new(&config);

        let mut counter = Counter { stop_at: Some((7, scheduler.stop_handle())), ..Counter::default() };
        let reason = scheduler.run(&mut ctrl, &mut counter).unwrap();
        assert_eq!(reason, StopReason::Cancelled);
        assert_eq!(counter.inits, 3);
        assert_eq!(counter.frames, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(counter.stops, vec![(StopReason::Cancelled, 1)]);
        assert_eq!(ctrl.stats().row_count(), 1);
    }

    #[test]
    fn unbounded_run_stops_on_handle() {
        let config = AnimationConfig { iterations: FrameBudget::Unbounded, ..headless(1) };
        let mut ctrl = AnimationController::new(sim(), config.clone()).unwrap();
        ctrl.initialize().unwrap();
        let scheduler = FrameScheduler::new(&config);

        let mut counter = Counter { stop_at: Some((20, scheduler.stop_handle())), ..Counter::default() };
        assert_eq!(scheduler.run(&mut ctrl, &mut counter).unwrap(), StopReason::Cancelled);
        assert_eq!(counter.frames.len(), 20);
    }

    #[test]
    fn failure_is_returned_and_reported() {
        let config = headless(10);
        let mut ctrl = AnimationController::new(sim().fail_after(2), config.clone()).unwrap();
        ctrl.initialize().unwrap();

        let mut counter = Counter::default();
        let err = FrameScheduler::new(&config).run(&mut ctrl, &mut counter).unwrap_err();
        assert!(matches!(err, AnimError::Simulation(_)));
        assert_eq!(counter.frames, vec![0, 1]);
        assert_eq!(counter.stops, vec![(StopReason::StepFailed, 2)]);
    }

    #[test]
    fn stop_handle_clones_share_the_flag() {
        let a = StopHandle::new();
        let b = a.clone();
        b.stop();
        assert!(a.is_stopped());
        a.reset();
        assert!(!b.is_stopped());
    }

    #[test]
    fn noop_observer_runs() {
        let config = headless(2);
        let mut ctrl = AnimationController::new(sim(), config.clone()).unwrap();
        ctrl.initialize().unwrap();
        let reason = FrameScheduler::new(&config).run(&mut ctrl, &mut NoopObserver).unwrap();
        assert_eq!(reason, StopReason::BudgetExhausted);
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{BitmapCompositor, FrameRecorder, run_animation};
    use epi_render::{Handle, PanelId, SpatialUpdate};

    #[test]
    fn play_records_first_pass() {
        let config = AnimationConfig { record_frames: true, ..headless(4) };
        let mut animation = run_animation(sim(), config).unwrap();
        let reason = animation.play(&mut Counter::default()).unwrap();
        assert_eq!(reason, StopReason::BudgetExhausted);

        let frames = animation.recorded();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].contagion.series()[0].len(), 1);
        assert_eq!(frames[3].contagion.series()[0].len(), 4);
    }

    #[test]
    fn recorder_ignores_later_passes() {
        let config = AnimationConfig { repeat: true, ..headless(2) };
        let mut animation = run_animation(sim(), config).unwrap();
        let handle = animation.stop_handle();

        let mut recorder = FrameRecorder::new();
        let mut counter = Counter { stop_at: Some((5, handle)), ..Counter::default() };
        animation.play(&mut (&mut recorder, &mut counter)).unwrap();
        assert_eq!(counter.frames.len(), 5);
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn compositor_repaints_only_dirty_panels() {
        let animation = run_animation(sim(), headless(3)).unwrap();
        let figure = animation.controller().figure().unwrap();

        let mut compositor = BitmapCompositor::new(CANVAS);
        compositor.on_init(&FrameUpdate::default(), &figure);
        assert_eq!(compositor.last_redrawn(), PanelId::ALL);

        let update = FrameUpdate::new(
            SpatialUpdate::Unchanged,
            vec![Handle::Series { panel: PanelId::Economy, index: 0 }],
        );
        compositor.on_frame(epi_core::Frame(0), &update, &figure);
        assert_eq!(compositor.last_redrawn(), [PanelId::Economy]);
        assert_eq!(compositor.redraw_count(PanelId::Environment), 1);
        assert_eq!(compositor.redraw_count(PanelId::Economy), 2);
        assert!(compositor.take_error().is_none());
    }

    #[test]
    fn compositor_follows_a_live_run() {
        let mut animation = run_animation(sim(), headless(3)).unwrap();
        let mut compositor = BitmapCompositor::new(CANVAS);
        animation.play(&mut compositor).unwrap();
        assert_eq!(compositor.redraw_count(PanelId::Contagion), 1 + 3);
        assert_eq!(compositor.buffer().len(), (CANVAS.0 * CANVAS.1 * 3) as usize);
        assert!(compositor.take_error().is_none());
    }
}

#[cfg(test)]
mod export_tests {
    use super::*;
    use crate::{ExportError, export_animation, export_frames, run_animation};

    #[test]
    fn exports_gif_running_budget_headless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.gif");
        let mut animation = run_animation(sim(), headless(3)).unwrap();

        let written = export_animation(&mut animation, &path).unwrap();
        assert_eq!(written, 3);
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        assert_eq!(animation.controller().simulation().steps(), 3);
    }

    #[test]
    fn exports_recorded_frames_without_rerunning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.GIF");
        let config = AnimationConfig { record_frames: true, ..headless(2) };
        let mut animation = run_animation(sim(), config).unwrap();
        animation.play(&mut crate::NoopObserver).unwrap();

        assert_eq!(export_animation(&mut animation, &path).unwrap(), 2);
        assert_eq!(animation.controller().simulation().steps(), 2);
    }

    #[test]
    fn only_gif_is_supported() {
        let mut animation = run_animation(sim(), headless(2)).unwrap();
        let err = export_animation(&mut animation, std::path::Path::new("out.mp4")).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedEncoding(ext) if ext == "mp4"));
        assert_eq!(animation.controller().simulation().steps(), 0);
    }

    #[test]
    fn unbounded_animation_cannot_be_exported() {
        let config = AnimationConfig { iterations: FrameBudget::Unbounded, ..headless(1) };
        let mut animation = run_animation(sim(), config).unwrap();
        let err = export_animation(&mut animation, std::path::Path::new("out.gif")).unwrap_err();
        assert!(matches!(err, ExportError::UnboundedSequence));
    }

    #[test]
    fn empty_sequence_and_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_frames(&[], &dir.path().join("a.gif"), CANVAS, 60).unwrap_err();
        assert!(matches!(err, ExportError::EmptySequence));

        let mut animation = run_animation(sim(), headless(1)).unwrap();
        let frames = vec![animation.controller_mut().snapshot().unwrap()];
        let err = export_frames(&frames, &dir.path().join("missing/a.gif"), CANVAS, 60).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[test]
    fn failed_run_surfaces_as_animation_error() {
        let mut animation = run_animation(sim().fail_after(1), headless(3)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = export_animation(&mut animation, &dir.path().join("x.gif")).unwrap_err();
        assert!(matches!(err, ExportError::Animation(_)));
    }

    #[test]
    fn save_frame_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let animation = run_animation(sim_with_topology(), AnimationConfig {
            layout: LayoutMode::Graph,
            ..headless(3)
        })
        .unwrap();
        animation.save_frame(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
