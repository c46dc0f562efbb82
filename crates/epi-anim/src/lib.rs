//! `epi-anim`: drives a [`Simulation`][epi_sim::Simulation] frame by frame
//! and turns it into an animation.
//!
//! # Lifecycle
//!
//! ```text
//!   Uninitialized ──initialize()──▶ Initialized ──step()──▶ Running ─┐
//!                                     ▲    │                  │  ▲    │ step()
//!                                     └────┘ init()           │  └────┘
//!                                     ▲                       ▼
//!                                     └──── init() ──── Stopped(reason)
//! ```
//!
//! [`AnimationController`] owns the collaborator and every drawable.
//! [`FrameScheduler`] calls it at a fixed cadence (or headless) and hands
//! each frame to an [`AnimationObserver`].  [`run_animation`] wires both
//! together; [`export_animation`] encodes the frames as a GIF.
//!
//! # Quick start
//!
//! ```rust,ignore
//! let config = AnimationConfig { pacing: Pacing::Headless, ..AnimationConfig::default() };
//! let mut animation = run_animation(my_sim, config)?;
//! animation.save_frame(Path::new("preview.png"))?;
//! export_animation(&mut animation, Path::new("run.gif"))?;
//! ```

pub mod animation;
pub mod compositor;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod observer;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use animation::{Animation, run_animation};
pub use compositor::BitmapCompositor;
pub use config::AnimationConfig;
pub use controller::{AnimState, AnimationController, StopReason};
pub use error::{AnimError, AnimResult, ExportError, ExportResult};
pub use export::{export_animation, export_frames};
pub use observer::{AnimationObserver, FrameRecorder, NoopObserver};
pub use scheduler::{FrameScheduler, Pacing, StopHandle};
