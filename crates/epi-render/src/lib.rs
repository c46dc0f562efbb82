//! `epi-render`: visual state of the three animation panels.
//!
//! # Panels
//!
//! ```text
//! ┌──────────────────────┬──────────────────────┬──────────────────────┐
//! │ Environment          │ Contagion            │ Economy              │
//! │ SpatialRenderer      │ one LineSeries per   │ one LineSeries per   │
//! │  · ScatterStrategy   │ info column (minus   │ ecom column (quintile│
//! │  · GraphStrategy     │ Asymptomatic) + the  │ colors and legends)  │
//! │                      │ critical-limit line  │                      │
//! └──────────────────────┴──────────────────────┴──────────────────────┘
//! ```
//!
//! Renderers mutate drawables and report what changed as [`Handle`]s (or a
//! relayout for the graph strategy).  A compositor redraws only what was
//! reported; [`raster`] turns a [`FigureView`] into pixels with plotters.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Scatter colors computed on Rayon's thread pool.           |
//! | `fx-hash`  | FxHash for the graph layout's id index.                   |
//! | `fonts`    | Captions, axis labels and legends (plotters `ttf`).       |
//! | `serde`    | Derives on `LayoutMode`.                                  |

pub mod error;
pub mod figure;
pub mod graph;
pub mod handle;
pub mod panel;
pub mod raster;
pub mod scatter;
pub mod series;
pub mod spatial;
pub mod timeseries;


pub use error::{RenderError, RenderResult};
pub use figure::{Environment, EnvironmentView, Figure, FigureView};
pub use graph::{EntityKind, GraphLayout, GraphNode, GraphStrategy};
pub use handle::{FrameUpdate, Handle, PanelId, SpatialUpdate};
pub use panel::Panel;
pub use scatter::{ScatterDrawable, ScatterStrategy};
pub use series::{LineSeries, ReferenceLine};
pub use spatial::{LayoutMode, SpatialRenderer, spatial_renderer};
pub use timeseries::TimeSeriesRenderer;
