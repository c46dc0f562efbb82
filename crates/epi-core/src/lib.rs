//! `epi-core`: foundational types for the `epi-viz` animation pipeline.
//!
//! This crate is a dependency of every other `epi-*` crate.  It has no
//! `epi-*` dependencies and only `thiserror` (plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`                                            |
//! | [`geo`]         | `Position`, `Bounds`                                  |
//! | [`frame`]       | `Frame`, `FrameBudget`                                |
//! | [`status`]      | `Status`, `InfectionSeverity`, `Quintile`, `StatKind` |
//! | [`record`]      | `StepRecord` (one statistics snapshot)                |
//! | [`color`]       | `NamedColor`, `ColorMapping`                          |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod color;
pub mod error;
pub mod frame;
pub mod geo;
pub mod ids;
pub mod record;
pub mod status;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::{ColorMapping, NamedColor, UNMAPPED_COLOR};
pub use error::{CoreError, CoreResult};
pub use frame::{Frame, FrameBudget};
pub use geo::{Bounds, Position};
pub use ids::EntityId;
pub use record::StepRecord;
pub use status::{InfectionSeverity, Quintile, StatKind, Status};
