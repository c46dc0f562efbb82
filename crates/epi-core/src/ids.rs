//! Strongly typed entity identifier.
//!
//! Ids are assigned by the simulation collaborator and only compared and
//! hashed here, never generated.

use std::fmt;

/// Identifier of a facility, household, business, or person.
///
/// All entity kinds share one id space so graph nodes can be keyed by id
/// alone.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u64);

impl EntityId {
    /// Sentinel meaning "no valid id".
    pub const INVALID: EntityId = EntityId(u64::MAX);
}

impl Default for EntityId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl From<u64> for EntityId {
    #[inline(always)]
    fn from(n: u64) -> Self {
        EntityId(n)
    }
}
