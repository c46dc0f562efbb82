//! `StatisticsAccumulator`: pulls both snapshot kinds per frame.

use epi_core::StatKind;
use epi_sim::Simulation;
use tracing::trace;

use crate::{StatisticsTable, StatsResult};

/// The `info` and `ecom` tables of one animation run.
#[derive(Clone, Debug)]
pub struct StatisticsAccumulator {
    info: StatisticsTable,
    ecom: StatisticsTable,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self {
            info: StatisticsTable::new(StatKind::Info),
            ecom: StatisticsTable::new(StatKind::Ecom),
        }
    }

    /// Query both snapshots from `sim` and append them.
    ///
    /// Both records are checked before either is committed, so the tables
    /// always have equal row counts.
    pub fn refresh<S: Simulation + ?Sized>(&mut self, sim: &S) -> StatsResult<()> {
        let info = sim.statistics(StatKind::Info);
        let ecom = sim.statistics(StatKind::Ecom);

        self.info.check(&info)?;
        self.ecom.check(&ecom)?;

        self.info.record(&info)?;
        self.ecom.record(&ecom)?;
        trace!(rows = self.info.row_count(), "statistics refreshed");
        Ok(())
    }

    pub fn table(&self, kind: StatKind) -> &StatisticsTable {
        match kind {
            StatKind::Info => &self.info,
            StatKind::Ecom => &self.ecom,
        }
    }

    pub fn info(&self) -> &StatisticsTable {
        &self.info
    }

    pub fn ecom(&self) -> &StatisticsTable {
        &self.ecom
    }

    /// Rows recorded so far (the same for both tables).
    pub fn row_count(&self) -> usize {
        self.info.row_count()
    }

    /// Roll back the most recent [`refresh`][Self::refresh].
    ///
    /// Used when a frame fails after its snapshots were committed, so the
    /// row count keeps matching the number of completed frames.
    pub fn discard_last(&mut self) {
        if self.info.discard_last() | self.ecom.discard_last() {
            trace!(rows = self.info.row_count(), "statistics row discarded");
        }
    }

    /// Discard all rows; schemas are kept.
    pub fn reset(&mut self) {
        self.info.reset();
        self.ecom.reset();
    }
}

impl Default for StatisticsAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
