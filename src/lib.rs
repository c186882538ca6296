//! scope-rs: layered redraw cache engine for real-time chart widgets.
//!
//! Slow-changing content (grids, static curves) is painted once into
//! off-screen surfaces and reused across frames; fast-changing content
//! (live curves, scrolling traces, the crosshair) is repainted every frame
//! on top without re-touching the cached layers. An external
//! [`provider::ContentProvider`] decides per frame which layers are dirty.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod provider;
pub mod render;
pub mod telemetry;

pub use api::{DrawSummary, GraphEngine, GraphEngineConfig};
pub use error::{GraphError, GraphResult};
