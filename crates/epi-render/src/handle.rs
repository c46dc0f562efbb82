//! Handles: names for the drawables a frame mutated.
//!
//! The partial-redraw contract is that a compositor only recomposites what a
//! frame reports.  Everything not reported is assumed unchanged.

use std::fmt;

/// The three panels of the figure, left to right.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PanelId {
    Environment,
    Contagion,
    Economy,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [PanelId::Environment, PanelId::Contagion, PanelId::Economy];

    /// Column of the panel in the 1 × 3 figure grid.
    #[inline]
    pub fn slot(self) -> usize {
        match self {
            PanelId::Environment => 0,
            PanelId::Contagion   => 1,
            PanelId::Economy     => 2,
        }
    }
}

/// One independently redrawable artist.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Handle {
    /// The persistent agent scatter of the environment panel.
    Scatter,
    /// Series `index` (schema order) of a time-series panel.
    Series { panel: PanelId, index: usize },
}

impl Handle {
    pub fn panel(self) -> PanelId {
        match self {
            Handle::Scatter => PanelId::Environment,
            Handle::Series { panel, .. } => panel,
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Scatter => f.write_str("scatter"),
            Handle::Series { panel, index } => write!(f, "{panel:?}[{index}]"),
        }
    }
}

/// What a spatial strategy changed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SpatialUpdate {
    /// Nothing changed.
    Unchanged,
    /// Exactly this drawable changed (partial-redraw path).
    Handle(Handle),
    /// The environment panel was rebuilt and must be redrawn whole.
    Relayout,
}

/// Everything one `init()` or `step()` changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameUpdate {
    /// Mutated drawables, spatial handle first, then series in panel order.
    pub handles:  Vec<Handle>,
    /// The environment panel needs a full redraw.
    pub relayout: bool,
}

impl FrameUpdate {
    /// Combine a spatial update with the series handles of a frame.
    pub fn new(spatial: SpatialUpdate, series: Vec<Handle>) -> Self {
        let mut handles = Vec::with_capacity(series.len() + 1);
        let mut relayout = false;
        match spatial {
            SpatialUpdate::Unchanged => {}
            SpatialUpdate::Handle(h) => handles.push(h),
            SpatialUpdate::Relayout => relayout = true,
        }
        handles.extend(series);
        Self { handles, relayout }
    }

    /// Panels that own at least one dirty drawable, in figure order.
    pub fn dirty_panels(&self) -> Vec<PanelId> {
        PanelId::ALL
            .into_iter()
            .filter(|&p| {
                (p == PanelId::Environment && self.relayout)
                    || self.handles.iter().any(|h| h.panel() == p)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty() && !self.relayout
    }
}
