//! A collaborator whose state only changes when the caller changes it.

use epi_core::{Bounds, StatKind, StepRecord};

use crate::{Business, Facility, Household, Person, SimError, SimResult, Simulation, Topology};

/// A [`Simulation`] that holds fixed state and counts steps.
///
/// Useful in tests and for rendering previews of a hand-built scene.  State
/// can be edited between steps through the setters; `fail_after(n)` makes
/// every `execute` after the `n`th successful one fail.
#[derive(Clone, Debug)]
pub struct FixedSimulation {
    people:         Vec<Person>,
    info:           StepRecord,
    ecom:           StepRecord,
    bounds:         Bounds,
    critical_limit: f64,
    healthcare:     Option<Facility>,
    houses:         Vec<Household>,
    business:       Vec<Business>,
    initialized:    bool,
    steps:          u64,
    fail_after:     Option<u64>,
}

impl FixedSimulation {
    pub fn new(bounds: Bounds, critical_limit: f64) -> Self {
        Self {
            people:         Vec::new(),
            info:           StepRecord::new(),
            ecom:           StepRecord::new(),
            bounds,
            critical_limit,
            healthcare:     None,
            houses:         Vec::new(),
            business:       Vec::new(),
            initialized:    false,
            steps:          0,
            fail_after:     None,
        }
    }

    pub fn with_population(mut self, people: Vec<Person>) -> Self {
        self.people = people;
        self
    }

    pub fn with_statistics(mut self, kind: StatKind, record: StepRecord) -> Self {
        self.set_statistics(kind, record);
        self
    }

    /// Give the simulation a topology so the graph layout can be used.
    pub fn with_topology(
        mut self,
        healthcare: Facility,
        houses:     Vec<Household>,
        business:   Vec<Business>,
    ) -> Self {
        self.healthcare = Some(healthcare);
        self.houses = houses;
        self.business = business;
        self
    }

    /// Fail every `execute` once `n` steps have succeeded.
    pub fn fail_after(mut self, n: u64) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn set_statistics(&mut self, kind: StatKind, record: StepRecord) {
        match kind {
            StatKind::Info => self.info = record,
            StatKind::Ecom => self.ecom = record,
        }
    }

    pub fn population_mut(&mut self) -> &mut Vec<Person> {
        &mut self.people
    }

    pub fn houses_mut(&mut self) -> &mut Vec<Household> {
        &mut self.houses
    }

    pub fn business_mut(&mut self) -> &mut Vec<Business> {
        &mut self.business
    }

    /// Number of successful `execute` calls.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Simulation for FixedSimulation {
    fn initialize(&mut self) -> SimResult<()> {
        if self.initialized {
            return Err(SimError::Initialize("already initialized".into()));
        }
        self.initialized = true;
        Ok(())
    }

    fn execute(&mut self) -> SimResult<()> {
        if !self.initialized {
            return Err(SimError::Execute("execute before initialize".into()));
        }
        if self.fail_after.is_some_and(|n| self.steps >= n) {
            return Err(SimError::Execute(format!("injected failure after {} steps", self.steps)));
        }
        self.steps += 1;
        Ok(())
    }

    fn population(&self) -> &[Person] {
        &self.people
    }

    fn statistics(&self, kind: StatKind) -> StepRecord {
        match kind {
            StatKind::Info => self.info.clone(),
            StatKind::Ecom => self.ecom.clone(),
        }
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn critical_limit(&self) -> f64 {
        self.critical_limit
    }

    fn topology(&self) -> Option<Topology<'_>> {
        self.healthcare.as_ref().map(|healthcare| Topology {
            healthcare,
            houses:   &self.houses,
            business: &self.business,
        })
    }
}
