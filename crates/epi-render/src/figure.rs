//! The figure: every drawable of one frame, borrowed or owned.

use epi_core::Bounds;

use crate::{GraphLayout, Panel, PanelId, ScatterDrawable};

pub const ENVIRONMENT_TITLE: &str = "Simulation Environment";

/// Borrowed environment drawable.
#[derive(Copy, Clone, Debug)]
pub enum EnvironmentView<'a> {
    Scatter(&'a ScatterDrawable),
    Graph(&'a GraphLayout),
}

/// Owned environment drawable.
#[derive(Clone, Debug)]
pub enum Environment {
    Scatter(ScatterDrawable),
    Graph(GraphLayout),
}

impl Environment {
    pub fn view(&self) -> EnvironmentView<'_> {
        match self {
            Environment::Scatter(s) => EnvironmentView::Scatter(s),
            Environment::Graph(g) => EnvironmentView::Graph(g),
        }
    }
}

/// Borrowed view of all three panels; what compositors draw from.
#[derive(Copy, Clone, Debug)]
pub struct FigureView<'a> {
    pub bounds:      Bounds,
    pub environment: EnvironmentView<'a>,
    pub contagion:   &'a Panel,
    pub economy:     &'a Panel,
}

impl FigureView<'_> {
    /// Time-series panel by id; `None` for the environment panel.
    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        match id {
            PanelId::Environment => None,
            PanelId::Contagion => Some(self.contagion),
            PanelId::Economy => Some(self.economy),
        }
    }

    /// Deep copy, e.g. to keep a frame for export.
    pub fn to_figure(&self) -> Figure {
        Figure {
            bounds:      self.bounds,
            environment: match self.environment {
                EnvironmentView::Scatter(s) => Environment::Scatter(s.clone()),
                EnvironmentView::Graph(g) => Environment::Graph(g.clone()),
            },
            contagion:   self.contagion.clone(),
            economy:     self.economy.clone(),
        }
    }
}

/// Owned snapshot of one frame.
#[derive(Clone, Debug)]
pub struct Figure {
    pub bounds:      Bounds,
    pub environment: Environment,
    pub contagion:   Panel,
    pub economy:     Panel,
}

impl Figure {
    pub fn view(&self) -> FigureView<'_> {
        FigureView {
            bounds:      self.bounds,
            environment: self.environment.view(),
            contagion:   &self.contagion,
            economy:     &self.economy,
        }
    }
}
