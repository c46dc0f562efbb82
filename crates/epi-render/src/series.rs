//! Time-series artists.

use epi_core::{Frame, NamedColor};

use crate::{RenderError, RenderResult};

/// An append-only `(frame, value)` curve for one statistics column.
///
/// Frames start at 0 after every [`clear`][Self::clear] and increase by
/// exactly one per point.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    column: String,
    label:  String,
    color:  NamedColor,
    points: Vec<(u64, f64)>,
}

impl LineSeries {
    pub fn new(column: impl Into<String>, label: impl Into<String>, color: NamedColor) -> Self {
        Self {
            column: column.into(),
            label:  label.into(),
            color,
            points: Vec::new(),
        }
    }

    /// Statistics column this series plots.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Legend text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> NamedColor {
        self.color
    }

    pub fn points(&self) -> &[(u64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Frame the next point must carry.
    pub fn next_frame(&self) -> Frame {
        Frame(self.points.len() as u64)
    }

    pub fn last(&self) -> Option<(u64, f64)> {
        self.points.last().copied()
    }

    /// Append one point.  `frame` must be [`next_frame`][Self::next_frame].
    pub fn push(&mut self, frame: Frame, value: f64) -> RenderResult<()> {
        let expected = self.next_frame();
        if frame != expected {
            return Err(RenderError::SeriesOutOfStep {
                column:   self.column.clone(),
                expected: expected.0,
                got:      frame.0,
            });
        }
        self.points.push((frame.0, value));
        Ok(())
    }

    /// Drop all points, keeping column, label and color.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// A static horizontal threshold drawn once at setup.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceLine {
    pub y:      f64,
    pub label:  String,
    pub color:  NamedColor,
    pub dashed: bool,
}

impl ReferenceLine {
    /// The dashed black "Critical limit" line of the contagion panel.
    pub fn critical_limit(y: f64) -> Self {
        Self {
            y,
            label:  "Critical limit".into(),
            color:  NamedColor::Black,
            dashed: true,
        }
    }
}
