pub mod layers;
pub mod types;

pub use layers::{DirtyLayers, LayerKind, Phase};
pub use types::{PlotArea, Viewport};
