//! `epi-stats`: per-frame statistics history.
//!
//! Each frame the collaborator produces one `info` and one `ecom`
//! [`StepRecord`][epi_core::StepRecord].  [`StatisticsAccumulator`] appends
//! both to their [`StatisticsTable`]s, whose column set is fixed by the
//! first record.  A later record with a different key set is rejected with
//! [`StatsError::SchemaDrift`] rather than misaligning columns.
//!
//! Tables can be exported with the CSV backend:
//!
//! | File        | Columns                          |
//! |-------------|----------------------------------|
//! | `info.csv`  | `frame`, then the `info` columns |
//! | `ecom.csv`  | `frame`, then the `ecom` columns |
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut stats = StatisticsAccumulator::new();
//! stats.refresh(&sim)?;
//! assert_eq!(stats.info().row_count(), 1);
//! epi_stats::write_tables(&stats, Path::new("./output"))?;
//! ```

pub mod accumulator;
pub mod csv;
pub mod error;
pub mod table;


pub use accumulator::StatisticsAccumulator;
pub use self::csv::{CsvTableWriter, write_csv, write_tables};
pub use error::{StatsError, StatsResult};
pub use table::StatisticsTable;
