//! `StatisticsTable`: append-only history of one record kind.

use epi_core::{Frame, StatKind, StepRecord};

use crate::{StatsError, StatsResult};

/// Rows of one statistics kind, indexed by frame.
///
/// The column set is fixed by the first recorded snapshot and survives
/// [`reset`][Self::reset]; only rows are discarded.  Row `i` is the snapshot
/// taken during frame `i`.
#[derive(Clone, Debug)]
pub struct StatisticsTable {
    kind:    StatKind,
    columns: Option<Vec<String>>,
    rows:    Vec<Vec<f64>>,
}

impl StatisticsTable {
    pub fn new(kind: StatKind) -> Self {
        Self { kind, columns: None, rows: Vec::new() }
    }

    pub fn kind(&self) -> StatKind {
        self.kind
    }

    /// Column names in schema order; empty until the first record.
    pub fn columns(&self) -> &[String] {
        self.columns.as_deref().unwrap_or(&[])
    }

    pub fn has_schema(&self) -> bool {
        self.columns.is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The frame the next recorded row will belong to.
    pub fn next_frame(&self) -> Frame {
        Frame(self.rows.len() as u64)
    }

    /// Verify `snapshot` against the schema without recording it.
    ///
    /// Always succeeds while the table has no schema.
    pub fn check(&self, snapshot: &StepRecord) -> StatsResult<()> {
        match &self.columns {
            Some(cols) if !snapshot.matches_schema(cols) => Err(StatsError::SchemaDrift {
                kind:     self.kind,
                frame:    self.next_frame().0,
                expected: cols.clone(),
                got:      snapshot.keys().map(str::to_owned).collect(),
            }),
            _ => Ok(()),
        }
    }

    /// Append `snapshot` as the next row and return the updated table.
    ///
    /// The first call establishes the schema.  On schema drift the table is
    /// left untouched.
    pub fn record(&mut self, snapshot: &StepRecord) -> StatsResult<&Self> {
        self.check(snapshot)?;
        if self.columns.is_none() {
            self.columns = Some(snapshot.keys().map(str::to_owned).collect());
        }
        self.rows.push(snapshot.values().collect());
        Ok(self)
    }

    /// Remove the newest row; `false` if there was none.
    pub fn discard_last(&mut self) -> bool {
        self.rows.pop().is_some()
    }

    /// Drop every row, keeping the schema.
    pub fn reset(&mut self) {
        self.rows.clear();
    }

    pub fn row(&self, frame: usize) -> Option<&[f64]> {
        self.rows.get(frame).map(Vec::as_slice)
    }

    pub fn last_row(&self) -> Option<&[f64]> {
        self.rows.last().map(Vec::as_slice)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c == name)
    }

    /// Full history of one column.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx]).collect())
    }

    pub fn value(&self, frame: usize, name: &str) -> Option<f64> {
        let idx = self.column_index(name)?;
        self.rows.get(frame).map(|r| r[idx])
    }

    /// Rebuild row `frame` as a record.
    pub fn record_at(&self, frame: usize) -> Option<StepRecord> {
        let row = self.rows.get(frame)?;
        Some(self.columns().iter().cloned().zip(row.iter().copied()).collect())
    }
}
