//! Negotiation contract between the compositor and the external data source.
//!
//! The provider decides per frame which layers are dirty and supplies the
//! numeric payload for each one; the engine knows nothing about what a
//! layer means. Layer content is delivered as finite lazy iterators that
//! restart on every pass. Providers are untrusted: the compositor caps every sequence
//! at the content width and treats non-finite samples as gaps.

use serde::{Deserialize, Serialize};

use crate::core::{DirtyLayers, Phase};
use crate::render::Color;

/// Answer to the once-per-cycle dirty-layer query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerResponse {
    pub layers: DirtyLayers,
    pub changed: bool,
}

impl LayerResponse {
    /// "Nothing to repaint, skip the whole cycle."
    #[must_use]
    pub fn unchanged() -> Self {
        Self {
            layers: DirtyLayers::none(),
            changed: false,
        }
    }

    #[must_use]
    pub fn dirty(layers: DirtyLayers) -> Self {
        Self {
            layers,
            changed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One grid line with an optional legend drawn at its outer end.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    /// Normalized position: horizontal lines use the sample-value mapping
    /// (0.5 = midline), vertical lines the [0, 1] width fraction.
    pub position: f64,
    pub orientation: Orientation,
    pub legend: Option<String>,
    pub color: Option<Color>,
}

impl GridLine {
    #[must_use]
    pub fn horizontal(position: f64) -> Self {
        Self {
            position,
            orientation: Orientation::Horizontal,
            legend: None,
            color: None,
        }
    }

    #[must_use]
    pub fn vertical(position: f64) -> Self {
        Self {
            position,
            orientation: Orientation::Vertical,
            legend: None,
            color: None,
        }
    }

    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }
}

/// How one series of samples is turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GraphMode {
    /// Open polyline connecting consecutive finite samples.
    Line,
    /// Polyline closed down to the bottom edge and filled.
    Fill,
    /// One rectangle per run of equal samples, anchored at the bottom edge.
    Bar,
    /// Thin marker rectangle at each run's value.
    Tick,
    /// Bars anchored at the vertical midline.
    CenteredBar,
    /// Bars anchored at a baseline offset from the midline (normalized units).
    CenteredBarOffset(f64),
}

/// One curve: a sample per horizontal pixel of the content area.
/// Non-finite samples mean "gap here, do not connect".
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSeries {
    pub samples: Vec<f64>,
    pub mode: GraphMode,
    pub color: Option<Color>,
}

impl GraphSeries {
    #[must_use]
    pub fn new(samples: Vec<f64>, mode: GraphMode) -> Self {
        Self {
            samples,
            mode,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Which edge new moving-trace data enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

/// One column (or row) of a scrolling trace, e.g. a spectrogram slice.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingTrace {
    pub samples: Vec<f64>,
    pub direction: MoveDirection,
    /// Distance in pixels from the entry edge for this slice.
    pub offset: u32,
    pub color: Option<Color>,
}

/// One point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    /// Normalized horizontal position in [0, 1].
    pub x: f64,
    /// Normalized sample value, same mapping as graph samples.
    pub y: f64,
    /// Radius in pixels.
    pub size: f64,
    pub color: Option<Color>,
}

/// Capability interface the engine consumes; all sequence methods default
/// to empty so providers implement only the layers they produce.
pub trait ContentProvider {
    /// Called once per prospective redraw with the engine's generation
    /// counter, so the provider can distinguish "same frame, nothing new"
    /// from "new frame, recompute".
    fn layers(&mut self, generation: u64) -> LayerResponse;

    fn grid_lines(&mut self, phase: Phase) -> Box<dyn Iterator<Item = GridLine> + '_> {
        let _ = phase;
        Box::new(std::iter::empty())
    }

    /// `samples` is the number of horizontal pixels each series should cover.
    fn graphs(&mut self, phase: Phase, samples: usize) -> Box<dyn Iterator<Item = GraphSeries> + '_> {
        let _ = (phase, samples);
        Box::new(std::iter::empty())
    }

    fn moving_traces(
        &mut self,
        width: usize,
        height: usize,
    ) -> Box<dyn Iterator<Item = MovingTrace> + '_> {
        let _ = (width, height);
        Box::new(std::iter::empty())
    }

    fn dots(&mut self, phase: Phase) -> Box<dyn Iterator<Item = Dot> + '_> {
        let _ = phase;
        Box::new(std::iter::empty())
    }

    /// On-demand label for the pointer-tracking crosshair; coordinates are
    /// pixels relative to the content origin.
    fn crosshair_label(&mut self, x: f64, y: f64) -> String {
        let _ = (x, y);
        String::new()
    }
}
