//! Coordinate-scatter strategy: the fast, partial-redraw path.

use epi_core::{ColorMapping, NamedColor, Position};
use epi_sim::{Person, Simulation};

use crate::{EnvironmentView, Handle, LayoutMode, RenderError, RenderResult, SpatialRenderer, SpatialUpdate};

/// One dot per agent: parallel position and color arrays.
///
/// Both arrays always have the same length; they are replaced together so a
/// resize of the population can never leave them out of step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterDrawable {
    offsets: Vec<Position>,
    colors:  Vec<NamedColor>,
}

impl ScatterDrawable {
    pub fn offsets(&self) -> &[Position] {
        &self.offsets
    }

    pub fn colors(&self) -> &[NamedColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Replace both arrays.  Lengths must match; `colors` carries one entry
    /// per agent, so a mismatch is reported as the population size.
    pub fn set(&mut self, offsets: Vec<Position>, colors: Vec<NamedColor>) -> RenderResult<()> {
        if offsets.len() != colors.len() {
            return Err(RenderError::PopulationMismatch {
                population: colors.len(),
                positions:  offsets.len(),
            });
        }
        self.offsets = offsets;
        self.colors = colors;
        Ok(())
    }
}

/// [`SpatialRenderer`] that re-colors and re-positions one persistent
/// scatter each frame.  O(population) per frame.
#[derive(Debug, Default)]
pub struct ScatterStrategy {
    drawable: ScatterDrawable,
}

impl ScatterStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawable(&self) -> &ScatterDrawable {
        &self.drawable
    }

    fn refresh(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<()> {
        let people = sim.population();
        self.drawable.set(sim.positions(), agent_colors(people, colors))
    }
}

impl SpatialRenderer for ScatterStrategy {
    fn layout(&self) -> LayoutMode {
        LayoutMode::Scatter
    }

    fn setup(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<()> {
        self.refresh(sim, colors)
    }

    /// The scatter is not part of the clear lifecycle: positions and colors
    /// are only ever replaced by the next step.
    fn clear(&mut self) -> SpatialUpdate {
        SpatialUpdate::Unchanged
    }

    fn step(&mut self, sim: &dyn Simulation, colors: &ColorMapping) -> RenderResult<SpatialUpdate> {
        self.refresh(sim, colors)?;
        Ok(SpatialUpdate::Handle(Handle::Scatter))
    }

    fn view(&self) -> EnvironmentView<'_> {
        EnvironmentView::Scatter(&self.drawable)
    }
}

#[cfg(not(feature = "parallel"))]
fn agent_colors(people: &[Person], colors: &ColorMapping) -> Vec<NamedColor> {
    people
        .iter()
        .map(|p| colors.agent_color(p.status, p.severity))
        .collect()
}

#[cfg(feature = "parallel")]
fn agent_colors(people: &[Person], colors: &ColorMapping) -> Vec<NamedColor> {
    use rayon::prelude::*;

    people
        .par_iter()
        .map(|p| colors.agent_color(p.status, p.severity))
        .collect()
}
