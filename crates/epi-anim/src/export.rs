//! GIF export.
//!
//! Export encodes a finite, already produced frame sequence.  The GIF frame
//! delay comes from `export_fps` alone; the live `iteration_time_ms` cadence
//! plays no part.

use std::path::Path;

use epi_core::FrameBudget;
use epi_render::raster::draw_figure;
use epi_render::{Figure, PanelId};
use epi_sim::Simulation;
use plotters::prelude::{BitMapBackend, IntoDrawingArea};
use tracing::{debug, info};

use crate::{Animation, ExportError, ExportResult, NoopObserver};

/// Encodings `export_animation` accepts, by file extension.
pub const SUPPORTED_ENCODINGS: &[&str] = &["gif"];

/// Encode the animation's frames as a GIF at its `export_fps`.
///
/// Uses the frames recorded by the last `play()`/`record()`.  When nothing
/// was recorded the finite budget is first run headless (one pass, from
/// `init()`).  Returns the number of frames written.
pub fn export_animation<S: Simulation>(
    animation: &mut Animation<S>,
    path:      &Path,
) -> ExportResult<usize> {
    check_encoding(path)?;

    if animation.recorded().is_empty() {
        if animation.config().iterations == FrameBudget::Unbounded {
            return Err(ExportError::UnboundedSequence);
        }
        debug!("no recorded frames; running the budget headless");
        animation.record(&mut NoopObserver)?;
    }

    let config = animation.config();
    export_frames(animation.recorded(), path, config.canvas, config.export_fps)
}

/// Encode `frames` as a GIF of `size` pixels playing at `fps`.
pub fn export_frames(
    frames: &[Figure],
    path:   &Path,
    size:   (u32, u32),
    fps:    u32,
) -> ExportResult<usize> {
    check_encoding(path)?;
    if frames.is_empty() {
        return Err(ExportError::EmptySequence);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::metadata(parent)?;
    }

    let delay_ms = 1000 / fps.max(1);
    let root = BitMapBackend::gif(path, size, delay_ms)
        .map_err(|e| ExportError::Drawing(e.to_string()))?
        .into_drawing_area();

    for figure in frames {
        draw_figure(&root, &figure.view(), &PanelId::ALL)?;
        root.present().map_err(|e| ExportError::Drawing(e.to_string()))?;
    }

    info!(path = %path.display(), frames = frames.len(), fps, "animation exported");
    Ok(frames.len())
}

fn check_encoding(path: &Path) -> ExportResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if SUPPORTED_ENCODINGS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ExportError::UnsupportedEncoding(ext))
    }
}
