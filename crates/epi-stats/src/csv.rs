//! CSV export of statistics tables.
//!
//! Each table becomes one file with a leading `frame` column followed by the
//! table's columns in schema order.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use epi_core::Frame;
use tracing::info;

use crate::{StatisticsAccumulator, StatisticsTable, StatsError, StatsResult};

/// Streams rows of one table schema into a CSV file.
pub struct CsvTableWriter {
    out:      Writer<File>,
    width:    usize,
    finished: bool,
}

impl CsvTableWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path, columns: &[String]) -> StatsResult<Self> {
        let mut out = Writer::from_path(path)?;
        let header = std::iter::once("frame").chain(columns.iter().map(String::as_str));
        out.write_record(header)?;

        Ok(Self {
            out,
            width:    columns.len(),
            finished: false,
        })
    }

    pub fn write_row(&mut self, frame: Frame, values: &[f64]) -> StatsResult<()> {
        debug_assert_eq!(values.len(), self.width, "row width must match header");
        let record = std::iter::once(frame.0.to_string())
            .chain(values.iter().map(f64::to_string));
        self.out.write_record(record)?;
        Ok(())
    }

    pub fn finish(&mut self) -> StatsResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

/// Write the whole of `table` to `path`.
pub fn write_csv(table: &StatisticsTable, path: &Path) -> StatsResult<()> {
    if !table.has_schema() {
        return Err(StatsError::NoSchema { kind: table.kind() });
    }
    let mut writer = CsvTableWriter::new(path, table.columns())?;
    for frame in 0..table.row_count() {
        if let Some(row) = table.row(frame) {
            writer.write_row(Frame(frame as u64), row)?;
        }
    }
    writer.finish()
}

/// Write `info.csv` and `ecom.csv` into `dir`; returns the two paths.
pub fn write_tables(stats: &StatisticsAccumulator, dir: &Path) -> StatsResult<[PathBuf; 2]> {
    let info_path = dir.join("info.csv");
    let ecom_path = dir.join("ecom.csv");
    write_csv(stats.info(), &info_path)?;
    write_csv(stats.ecom(), &ecom_path)?;
    info!(rows = stats.row_count(), dir = %dir.display(), "statistics written");
    Ok([info_path, ecom_path])
}
