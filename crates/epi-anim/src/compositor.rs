//! `BitmapCompositor`: keeps a live RGB image of the animation.

use epi_core::Frame;
use epi_render::raster::draw_into_buffer;
use epi_render::{FigureView, FrameUpdate, PanelId, RenderError};
use tracing::trace;

use crate::{AnimationObserver, StopReason};

/// An [`AnimationObserver`] that repaints a persistent RGB buffer.
///
/// After `init()` all three panels are repainted.  After a frame only the
/// panels owning a dirty handle are; the others keep their pixels.
///
/// Drawing errors are stored internally because observer methods have no
/// return value.  Check with [`take_error`][Self::take_error] after the run.
pub struct BitmapCompositor {
    size:         (u32, u32),
    buffer:       Vec<u8>,
    last_redrawn: Vec<PanelId>,
    redraws:      [u64; 3],
    last_error:   Option<RenderError>,
}

impl BitmapCompositor {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            buffer:       vec![255; size.0 as usize * size.1 as usize * 3],
            last_redrawn: Vec::new(),
            redraws:      [0; 3],
            last_error:   None,
        }
    }

    /// Row-major RGB pixels.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Panels repainted by the most recent callback.
    pub fn last_redrawn(&self) -> &[PanelId] {
        &self.last_redrawn
    }

    /// How many times `panel` has been repainted.
    pub fn redraw_count(&self, panel: PanelId) -> u64 {
        self.redraws[panel.slot()]
    }

    /// Take the stored drawing error (if any).  Only the first is kept.
    pub fn take_error(&mut self) -> Option<RenderError> {
        self.last_error.take()
    }

    fn redraw(&mut self, figure: &FigureView<'_>, panels: Vec<PanelId>) {
        if !panels.is_empty() {
            if let Err(e) = draw_into_buffer(&mut self.buffer, self.size, figure, &panels) {
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
            }
            for p in &panels {
                self.redraws[p.slot()] += 1;
            }
        }
        trace!(panels = ?panels, "composited");
        self.last_redrawn = panels;
    }
}

impl AnimationObserver for BitmapCompositor {
    fn on_init(&mut self, _update: &FrameUpdate, figure: &FigureView<'_>) {
        self.redraw(figure, PanelId::ALL.to_vec());
    }

    fn on_frame(&mut self, _frame: Frame, update: &FrameUpdate, figure: &FigureView<'_>) {
        self.redraw(figure, update.dirty_panels());
    }

    fn on_stop(&mut self, _reason: StopReason, _frames: u64) {
        self.last_redrawn.clear();
    }
}
