//! Animation configuration.

use epi_core::FrameBudget;
use epi_render::LayoutMode;

use crate::{AnimError, AnimResult, Pacing};

/// GIF delays are stored in centiseconds; faster rates cannot be encoded.
pub const MAX_EXPORT_FPS: u32 = 100;

/// Everything an animation run needs besides the collaborator.
///
/// | Field               | Default         |
/// |---------------------|-----------------|
/// | `iterations`        | `Finite(100)`   |
/// | `iteration_time_ms` | 250             |
/// | `layout`            | `Scatter`       |
/// | `edges_enabled`     | `false`         |
/// | `repeat`            | `false`         |
/// | `pacing`            | `RealTime`      |
/// | `export_fps`        | 60              |
/// | `canvas`            | 2000 × 500 px   |
/// | `record_frames`     | `false`         |
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationConfig {
    /// Frames per pass.
    pub iterations: FrameBudget,
    /// Wall-clock interval between frames under real-time pacing.
    pub iteration_time_ms: u64,
    pub layout: LayoutMode,
    /// Draw household and business membership edges (graph layout only).
    pub edges_enabled: bool,
    /// Restart with `init()` when a finite pass ends.
    pub repeat: bool,
    pub pacing: Pacing,
    /// Playback rate of exported GIFs, independent of `iteration_time_ms`.
    pub export_fps: u32,
    /// Figure size in pixels (width, height).
    pub canvas: (u32, u32),
    /// Keep a snapshot of every frame of the first pass for export.
    pub record_frames: bool,
}

impl AnimationConfig {
    /// The network-graph preset: graph layout, repeating.
    pub fn graph(edges_enabled: bool) -> Self {
        Self {
            layout: LayoutMode::Graph,
            edges_enabled,
            repeat: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> AnimResult<()> {
        if self.iterations == FrameBudget::Finite(0) {
            return Err(AnimError::Config("iterations must be at least 1".into()));
        }
        if self.export_fps == 0 || self.export_fps > MAX_EXPORT_FPS {
            return Err(AnimError::Config(format!(
                "export_fps must be in 1..={MAX_EXPORT_FPS}, got {}",
                self.export_fps
            )));
        }
        let (w, h) = self.canvas;
        if w < 3 || h == 0 {
            return Err(AnimError::Config(format!("canvas {w}x{h} is too small for three panels")));
        }
        Ok(())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            iterations:        FrameBudget::default(),
            iteration_time_ms: 250,
            layout:            LayoutMode::Scatter,
            edges_enabled:     false,
            repeat:            false,
            pacing:            Pacing::RealTime,
            export_fps:        60,
            canvas:            (2000, 500),
            record_frames:     false,
        }
    }
}
