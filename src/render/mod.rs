//! Software rasterization: pixel surfaces, the surface store, layer
//! painters, and the optional Cairo presentation backend.

#[cfg(feature = "cairo-backend")]
pub mod cairo_backend;
pub mod primitives;
pub mod store;
pub mod style;
pub mod surface;
pub mod text;

pub use primitives::{CrosshairStyle, LabelBackdrop};
pub use store::{MovingPair, SurfaceStore};
pub use style::GraphStyle;
pub use surface::{Color, Surface};
