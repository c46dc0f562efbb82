//! A time-series panel: ordered series plus axis metadata.

use crate::{Handle, LineSeries, PanelId, ReferenceLine};

/// Series are kept in schema order; a series' position is its handle index.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub id:        PanelId,
    pub title:     String,
    pub x_label:   String,
    pub y_label:   String,
    /// Upper x limit; `None` grows with the data.
    pub x_limit:   Option<u64>,
    pub reference: Option<ReferenceLine>,
    series:        Vec<LineSeries>,
}

impl Panel {
    pub fn new(id: PanelId, title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            id,
            title:     title.into(),
            x_label:   x_label.into(),
            y_label:   y_label.into(),
            x_limit:   None,
            reference: None,
            series:    Vec::new(),
        }
    }

    pub fn push_series(&mut self, series: LineSeries) -> Handle {
        self.series.push(series);
        Handle::Series { panel: self.id, index: self.series.len() - 1 }
    }

    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }

    pub(crate) fn series_mut(&mut self) -> &mut [LineSeries] {
        &mut self.series
    }

    pub fn series_for(&self, column: &str) -> Option<&LineSeries> {
        self.series.iter().find(|s| s.column() == column)
    }

    pub fn handles(&self) -> Vec<Handle> {
        (0..self.series.len())
            .map(|index| Handle::Series { panel: self.id, index })
            .collect()
    }

    /// Empty every series; returns their handles.
    pub fn clear(&mut self) -> Vec<Handle> {
        for s in &mut self.series {
            s.clear();
        }
        self.handles()
    }

    /// Plotted x range.
    pub fn x_range(&self) -> (f64, f64) {
        let longest = self.series.iter().map(LineSeries::len).max().unwrap_or(0) as u64;
        let upper = self.x_limit.unwrap_or(0).max(longest).max(1);
        (0.0, upper as f64)
    }

    /// Plotted y range: data and reference line, padded by 5 %.  `(0, 1)`
    /// when there is nothing to plot.
    pub fn y_range(&self) -> (f64, f64) {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points().iter().map(|&(_, v)| v))
            .chain(self.reference.as_ref().map(|r| r.y))
            .filter(|v| v.is_finite());

        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if lo > hi {
            return (0.0, 1.0);
        }
        let lo = lo.min(0.0);
        let span = hi - lo;
        let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
        (lo, hi + pad)
    }
}
