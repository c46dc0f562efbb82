//! `epi-sim`: the simulation collaborator as seen by the animation pipeline.
//!
//! The pipeline never runs epidemic or economic rules itself.  It drives an
//! implementation of [`Simulation`] one step per frame and only reads from
//! it: agent statuses and positions, statistics snapshots, and (for the
//! graph layout) the building topology.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`model`]     | `Simulation` trait                                        |
//! | [`entity`]    | `Person`, `Facility`, `Household`, `Business`, `Topology` |
//! | [`fixed`]     | `FixedSimulation`: a static collaborator                 |
//! | [`error`]     | `SimError`, `SimResult`                                   |

pub mod entity;
pub mod error;
pub mod fixed;
pub mod model;

#[cfg(test)]
mod tests;

pub use entity::{Business, Facility, Household, Person, Topology};
pub use error::{SimError, SimResult};
pub use fixed::FixedSimulation;
pub use model::Simulation;
