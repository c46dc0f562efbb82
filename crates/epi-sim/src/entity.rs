//! Entities observed by the spatial renderers.
//!
//! These are plain snapshots owned by the collaborator.  Membership lists
//! hold ids, not entities: a household does not own its members' lifetimes,
//! and the renderers re-read everything each frame.

use epi_core::{EntityId, InfectionSeverity, Position, Status};

/// One simulated individual.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id:       EntityId,
    pub position: Position,
    pub status:   Status,
    /// Only meaningful while `status == Infected`.
    pub severity: InfectionSeverity,
}

impl Person {
    pub fn new(id: EntityId, position: Position, status: Status) -> Self {
        Self {
            id,
            position,
            status,
            severity: InfectionSeverity::default(),
        }
    }

    pub fn with_severity(mut self, severity: InfectionSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// The healthcare facility (one per simulation).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    pub id:       EntityId,
    pub position: Position,
}

/// A house and the ids of the people currently living in it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Household {
    pub id:        EntityId,
    pub position:  Position,
    pub homemates: Vec<EntityId>,
}

/// A business and the ids of the people it currently employs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Business {
    pub id:        EntityId,
    pub position:  Position,
    pub employees: Vec<EntityId>,
}

/// Borrowed view of the collaborator's buildings.
///
/// People are not part of the topology; the graph layout reads them from
/// [`Simulation::population`][crate::Simulation::population].
#[derive(Copy, Clone, Debug)]
pub struct Topology<'a> {
    pub healthcare: &'a Facility,
    pub houses:     &'a [Household],
    pub business:   &'a [Business],
}
