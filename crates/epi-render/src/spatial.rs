//! The `SpatialRenderer` trait shared by both environment strategies.

use epi_core::ColorMapping;
use epi_sim::Simulation;

use crate::{EnvironmentView, GraphStrategy, RenderResult, ScatterStrategy, SpatialUpdate};

/// Which environment strategy an animation uses.
///
/// | Mode      | Per frame                          | Partial redraw |
/// |-----------|------------------------------------|----------------|
/// | `Scatter` | re-color and move one scatter      | yes            |
/// | `Graph`   | rebuild nodes and membership edges | no (relayout)  |
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutMode {
    #[default]
    Scatter,
    Graph,
}

/// Renders the environment panel from the collaborator's state.
///
/// Implementations own their drawable and report each change as a
/// [`SpatialUpdate`]; the animation controller merges it with the series
/// handles of the frame.
pub trait SpatialRenderer {
    fn layout(&self) -> LayoutMode;

    /// Build the initial drawable (the preview shown before frame 0).
    fn setup(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<()>;

    /// Reset before the first frame or on restart.
    fn clear(&mut self) -> SpatialUpdate;

    /// Re-read the collaborator after it advanced one step.
    fn step(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<SpatialUpdate>;

    /// Borrowed drawable for compositing.
    fn view(&self) -> EnvironmentView<'_>;
}

/// Construct the strategy for `mode`.  `edges_enabled` only affects the
/// graph strategy.
pub fn spatial_renderer(mode: LayoutMode, edges_enabled: bool) -> Box<dyn SpatialRenderer> {
    match mode {
        LayoutMode::Scatter => Box::new(ScatterStrategy::new()),
        LayoutMode::Graph => Box::new(GraphStrategy::new(edges_enabled)),
    }
}
