//! village: end-to-end demo of the epi-viz animation pipeline.
//!
//! Runs a 200-person toy village for 60 days with the scatter layout,
//! compositing every frame into a live bitmap, then exports:
//!
//! - `preview.png` : the figure before the first day
//! - `village.gif` : the recorded scatter run at 60 fps
//! - `final.png`   : the figure after the last day
//! - `info.csv`, `ecom.csv`: the statistics tables
//! - `village_graph.gif`: a shorter run with the network-graph layout
//!
//! Set `RUST_LOG=debug` to see every frame.

mod model;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use epi_anim::{
    AnimationConfig, AnimationObserver, BitmapCompositor, Pacing, StopReason, export_animation,
    run_animation,
};
use epi_core::{Frame, FrameBudget};
use epi_render::{FigureView, FrameUpdate};
use epi_stats::write_tables;

use model::{Village, VillageParams};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64        = 42;
const DAYS:        u64        = 60;
const GRAPH_DAYS:  u64        = 20;
const CANVAS:      (u32, u32) = (1200, 300);
const OUTPUT_DIR:  &str       = "output/village";
const LOG_EVERY:   u64        = 10;

// ── Progress observer ─────────────────────────────────────────────────────────

/// Logs the contagion share every `LOG_EVERY` frames.
struct Progress;

impl AnimationObserver for Progress {
    fn on_frame(&mut self, frame: Frame, update: &FrameUpdate, figure: &FigureView<'_>) {
        if frame.0 % LOG_EVERY != 0 {
            return;
        }
        let infected = figure
            .contagion
            .series_for("Infected")
            .and_then(|s| s.last())
            .map_or(0.0, |(_, v)| v);
        info!(%frame, infected_pct = infected * 100.0, dirty = update.handles.len(), "day");
    }

    fn on_stop(&mut self, reason: StopReason, frames: u64) {
        info!(%reason, frames, "run finished");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let out = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(out)?;

    // ── Scatter run ───────────────────────────────────────────────────────
    let config = AnimationConfig {
        iterations:    FrameBudget::Finite(DAYS),
        pacing:        Pacing::Headless,
        canvas:        CANVAS,
        record_frames: true,
        ..AnimationConfig::default()
    };
    let village = Village::new(VillageParams::default(), SEED);
    let mut animation = run_animation(village, config)?;
    animation.save_frame(&out.join("preview.png"))?;

    let started = Instant::now();
    let mut compositor = BitmapCompositor::new(CANVAS);
    animation.play(&mut (Progress, &mut compositor))?;
    if let Some(e) = compositor.take_error() {
        return Err(e.into());
    }
    info!(
        days = animation.controller().simulation().day(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scatter run complete"
    );

    animation.save_frame(&out.join("final.png"))?;
    let frames = export_animation(&mut animation, &out.join("village.gif"))?;
    info!(frames, "scatter animation exported");
    write_tables(animation.controller().stats(), out)?;

    // ── Graph run ─────────────────────────────────────────────────────────
    let graph_config = AnimationConfig {
        iterations: FrameBudget::Finite(GRAPH_DAYS),
        pacing:     Pacing::Headless,
        canvas:     CANVAS,
        ..AnimationConfig::graph(true)
    };
    let village = Village::new(VillageParams::default(), SEED);
    let mut graph = run_animation(village, graph_config)?;
    let frames = export_animation(&mut graph, &out.join("village_graph.gif"))?;
    info!(frames, "graph animation exported");

    Ok(())
}
