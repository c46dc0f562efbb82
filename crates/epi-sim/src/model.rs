//! The `Simulation` trait: the pipeline's only view of the model.

use epi_core::{Bounds, Position, StatKind, StepRecord};

use crate::{Person, SimResult, Topology};

/// A stepped agent-based simulation the animation can drive.
///
/// The animation calls [`initialize`][Self::initialize] exactly once, then
/// [`execute`][Self::execute] once per frame, and reads everything else
/// between steps.  Reads must not mutate observable state.
///
/// # Required methods
///
/// Everything except [`positions`][Self::positions] (derived from the
/// population) and [`topology`][Self::topology] (only needed by the graph
/// layout).
///
/// # Example
///
/// ```rust,ignore
/// struct Frozen { people: Vec<Person> }
///
/// impl Simulation for Frozen {
///     fn initialize(&mut self) -> SimResult<()> { Ok(()) }
///     fn execute(&mut self) -> SimResult<()> { Ok(()) }
///     fn population(&self) -> &[Person] { &self.people }
///     fn statistics(&self, kind: StatKind) -> StepRecord { StepRecord::new() }
///     fn bounds(&self) -> Bounds { Bounds::new(100.0, 100.0) }
///     fn critical_limit(&self) -> f64 { 0.05 }
/// }
/// ```
pub trait Simulation {
    /// Prepare the simulation for stepping.  Not assumed idempotent.
    fn initialize(&mut self) -> SimResult<()>;

    /// Advance by one discrete time unit.
    fn execute(&mut self) -> SimResult<()>;

    /// Current agents.
    fn population(&self) -> &[Person];

    /// Agent positions, same length and order as
    /// [`population`][Self::population].
    fn positions(&self) -> Vec<Position> {
        self.population().iter().map(|p| p.position).collect()
    }

    /// One statistics snapshot of the given kind.
    fn statistics(&self, kind: StatKind) -> StepRecord;

    /// Size of the environment rectangle.
    fn bounds(&self) -> Bounds;

    /// Capacity threshold drawn as the contagion panel's reference line.
    fn critical_limit(&self) -> f64;

    /// Buildings and memberships.  `None` if the model has no topology, in
    /// which case only the scatter layout can be used.
    fn topology(&self) -> Option<Topology<'_>> {
        None
    }
}

impl<S: Simulation + ?Sized> Simulation for Box<S> {
    fn initialize(&mut self) -> SimResult<()> {
        (**self).initialize()
    }

    fn execute(&mut self) -> SimResult<()> {
        (**self).execute()
    }

    fn population(&self) -> &[Person] {
        (**self).population()
    }

    fn positions(&self) -> Vec<Position> {
        (**self).positions()
    }

    fn statistics(&self, kind: StatKind) -> StepRecord {
        (**self).statistics(kind)
    }

    fn bounds(&self) -> Bounds {
        (**self).bounds()
    }

    fn critical_limit(&self) -> f64 {
        (**self).critical_limit()
    }

    fn topology(&self) -> Option<Topology<'_>> {
        (**self).topology()
    }
}
