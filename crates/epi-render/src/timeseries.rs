//! Contagion and economy panels.

use epi_core::{ColorMapping, Frame, StatKind};
use epi_stats::{StatisticsAccumulator, StatisticsTable, StatsError};

use crate::{Handle, LineSeries, Panel, PanelId, ReferenceLine, RenderError, RenderResult};

/// `info` columns never plotted on the contagion panel.
pub const EXCLUDED_CONTAGION_COLUMNS: &[&str] = &["Asymptomatic"];

pub const CONTAGION_TITLE: &str = "Contagion Evolution";
pub const ECONOMY_TITLE:   &str = "Economical Impact";
pub const DAYS_LABEL:      &str = "Nº of Days";

/// One [`LineSeries`] per tracked statistics column, split over two panels.
///
/// Series are created once, from the table schemas, and live for the whole
/// animation; `clear` only empties them.
#[derive(Clone, Debug)]
pub struct TimeSeriesRenderer {
    contagion:     Panel,
    economy:       Panel,
    /// Table column index feeding each contagion series.
    contagion_src: Vec<usize>,
}

impl TimeSeriesRenderer {
    /// Create both panels from the accumulator's schemas and plot whatever
    /// history it already holds (the preview frame).
    ///
    /// `frames` is the x limit of both panels (`None` grows with data).
    pub fn setup(
        stats:          &StatisticsAccumulator,
        critical_limit: f64,
        frames:         Option<u64>,
        colors:         &ColorMapping,
    ) -> RenderResult<Self> {
        let info = stats.info();
        let ecom = stats.ecom();
        for table in [info, ecom] {
            if !table.has_schema() {
                return Err(StatsError::NoSchema { kind: table.kind() }.into());
            }
        }

        let mut contagion = Panel::new(PanelId::Contagion, CONTAGION_TITLE, DAYS_LABEL, "% of Population");
        contagion.x_limit = frames;
        contagion.reference = Some(ReferenceLine::critical_limit(critical_limit));
        let mut contagion_src = Vec::new();
        for (idx, col) in info.columns().iter().enumerate() {
            if EXCLUDED_CONTAGION_COLUMNS.contains(&col.as_str()) {
                continue;
            }
            contagion.push_series(LineSeries::new(col.as_str(), col.as_str(), colors.status_color(col)));
            contagion_src.push(idx);
        }

        let mut economy = Panel::new(PanelId::Economy, ECONOMY_TITLE, DAYS_LABEL, "Wealth");
        economy.x_limit = frames;
        for col in ecom.columns() {
            economy.push_series(LineSeries::new(
                col.as_str(),
                colors.quintile_legend(col),
                colors.quintile_color(col),
            ));
        }

        let mut renderer = Self { contagion, economy, contagion_src };
        for frame in 0..info.row_count() {
            renderer.append_row(info, ecom, frame)?;
        }
        Ok(renderer)
    }

    /// Append the newest row of each table to every series.
    pub fn step(&mut self, stats: &StatisticsAccumulator) -> RenderResult<Vec<Handle>> {
        let info = stats.info();
        let ecom = stats.ecom();
        let frame = newest_frame(info, ecom)?;
        self.append_row(info, ecom, frame)?;
        Ok(self.handles())
    }

    /// Empty every series; returns every series handle.
    pub fn clear(&mut self) -> Vec<Handle> {
        let mut handles = self.contagion.clear();
        handles.extend(self.economy.clear());
        handles
    }

    /// All series handles, contagion first.
    pub fn handles(&self) -> Vec<Handle> {
        let mut handles = self.contagion.handles();
        handles.extend(self.economy.handles());
        handles
    }

    pub fn contagion(&self) -> &Panel {
        &self.contagion
    }

    pub fn economy(&self) -> &Panel {
        &self.economy
    }

    fn append_row(
        &mut self,
        info:  &StatisticsTable,
        ecom:  &StatisticsTable,
        frame: usize,
    ) -> RenderResult<()> {
        let info_row = info.row(frame).ok_or(RenderError::EmptyTable(StatKind::Info))?;
        let ecom_row = ecom.row(frame).ok_or(RenderError::EmptyTable(StatKind::Ecom))?;
        let at = Frame(frame as u64);

        // Check every series first so a bad frame appends nothing.
        for s in self.contagion.series().iter().chain(self.economy.series()) {
            if s.next_frame() != at {
                return Err(RenderError::SeriesOutOfStep {
                    column:   s.column().to_owned(),
                    expected: s.next_frame().0,
                    got:      at.0,
                });
            }
        }

        for (series, &src) in self.contagion.series_mut().iter_mut().zip(&self.contagion_src) {
            series.push(at, info_row[src])?;
        }
        for (series, &value) in self.economy.series_mut().iter_mut().zip(ecom_row) {
            series.push(at, value)?;
        }
        Ok(())
    }
}

/// Index of the newest row shared by both tables.
pub(crate) fn newest_frame(info: &StatisticsTable, ecom: &StatisticsTable) -> RenderResult<usize> {
    if info.row_count() != ecom.row_count() {
        return Err(RenderError::RowCountMismatch {
            info: info.row_count(),
            ecom: ecom.row_count(),
        });
    }
    info.row_count()
        .checked_sub(1)
        .ok_or(RenderError::EmptyTable(StatKind::Info))
}
