//! Application-facing engine surface: configuration, lifecycle, pointer
//! event entry points, and the draw-cycle driver in [`compositor`].

pub mod compositor;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DirtyLayers, PlotArea, Viewport};
use crate::error::{GraphError, GraphResult};
use crate::interaction::{
    DEFAULT_MIN_HANDLE_DISTANCE, HandleChange, HandleConfig, InteractionOutcome, InteractionState,
};
use crate::provider::ContentProvider;
use crate::render::{GraphStyle, Surface, SurfaceStore};

pub use compositor::DrawSummary;

/// Engine bootstrap configuration.
///
/// Serializable so host applications can persist chart setup without
/// inventing their own format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphEngineConfig {
    pub viewport: Viewport,
    /// Horizontal padding between the widget edge and the content area.
    #[serde(default)]
    pub pad_x: u32,
    /// Vertical padding between the widget edge and the content area.
    #[serde(default)]
    pub pad_y: u32,
    /// Constrain the content area to a square (goniometer-style widgets).
    #[serde(default)]
    pub square: bool,
    #[serde(default)]
    pub crosshair_enabled: bool,
    #[serde(default)]
    pub enforce_handle_order: bool,
    #[serde(default = "default_min_handle_distance")]
    pub min_handle_distance: f64,
    #[serde(default)]
    pub style: GraphStyle,
}

impl GraphEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pad_x: 0,
            pad_y: 0,
            square: false,
            crosshair_enabled: false,
            enforce_handle_order: false,
            min_handle_distance: default_min_handle_distance(),
            style: GraphStyle::default(),
        }
    }

    /// Sets padding between the widget edge and the content area.
    #[must_use]
    pub fn with_padding(mut self, pad_x: u32, pad_y: u32) -> Self {
        self.pad_x = pad_x;
        self.pad_y = pad_y;
        self
    }

    /// Constrains the content area to a square.
    #[must_use]
    pub fn with_square(mut self, square: bool) -> Self {
        self.square = square;
        self
    }

    #[must_use]
    pub fn with_crosshair(mut self, enabled: bool) -> Self {
        self.crosshair_enabled = enabled;
        self
    }

    /// Enables ordering enforcement between adjacent 1-D handles.
    #[must_use]
    pub fn with_handle_order(mut self, enforce: bool, min_distance: f64) -> Self {
        self.enforce_handle_order = enforce;
        self.min_handle_distance = min_distance;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: GraphStyle) -> Self {
        self.style = style;
        self
    }
}

fn default_min_handle_distance() -> f64 {
    DEFAULT_MIN_HANDLE_DISTANCE
}

/// The chart engine: surface store, dirty-layer bookkeeping, interaction
/// state, and the two-phase compositor that ties them together.
///
/// The engine polls its [`ContentProvider`] once per draw cycle; the
/// provider decides which layers are dirty and supplies the payload for
/// each one. Without a provider every cycle is a no-op.
pub struct GraphEngine {
    style: GraphStyle,
    square: bool,
    pad_x: u32,
    pad_y: u32,
    viewport: Viewport,
    area: PlotArea,
    store: SurfaceStore,
    window: Surface,
    dirty: DirtyLayers,
    generation: u64,
    force_full_rebuild: bool,
    force_single_redraw: bool,
    handle_redraw: bool,
    mask_polled: bool,
    provider: Option<Box<dyn ContentProvider>>,
    interaction: InteractionState,
    events: Vec<HandleChange>,
}

impl GraphEngine {
    pub fn new(config: GraphEngineConfig) -> GraphResult<Self> {
        config.style.validate()?;
        let viewport = effective_viewport(config.viewport, config.square);
        if !viewport.is_valid() {
            return Err(GraphError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let store = SurfaceStore::new(viewport)?;
        let window = Surface::new(viewport.width, viewport.height)?;
        let mut interaction = InteractionState::default();
        interaction.set_crosshair_enabled(config.crosshair_enabled);
        interaction.set_enforce_handle_order(config.enforce_handle_order);
        interaction.set_min_handle_distance(config.min_handle_distance);

        Ok(Self {
            style: config.style,
            square: config.square,
            pad_x: config.pad_x,
            pad_y: config.pad_y,
            viewport,
            area: PlotArea::from_viewport(viewport, config.pad_x, config.pad_y),
            store,
            window,
            dirty: DirtyLayers::none(),
            generation: 0,
            force_full_rebuild: true,
            force_single_redraw: false,
            handle_redraw: false,
            mask_polled: false,
            provider: None,
            interaction,
            events: Vec::new(),
        })
    }

    /// Recreates every surface at the new size and schedules a full
    /// rebuild. On allocation failure the old store is left intact.
    pub fn resize(&mut self, viewport: Viewport) -> GraphResult<()> {
        let viewport = effective_viewport(viewport, self.square);
        self.store.recreate(viewport)?;
        self.window = Surface::new(viewport.width, viewport.height)?;
        self.viewport = viewport;
        self.area = PlotArea::from_viewport(viewport, self.pad_x, self.pad_y);
        self.force_full_rebuild = true;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "engine resized"
        );
        Ok(())
    }

    pub fn set_provider(&mut self, provider: Box<dyn ContentProvider>) {
        self.provider = Some(provider);
        self.force_full_rebuild = true;
    }

    pub fn clear_provider(&mut self) -> Option<Box<dyn ContentProvider>> {
        self.provider.take()
    }

    /// Requests an opaque full rebuild of every layer on the next cycle.
    pub fn force_redraw(&mut self) {
        self.force_full_rebuild = true;
    }

    /// Timer body for hosts driving the widget at a fixed rate: asks the
    /// provider whether anything is dirty and merges the reported mask.
    /// Returns `true` when a repaint should be requested.
    pub fn poll(&mut self) -> bool {
        let Some(mut provider) = self.provider.take() else {
            return false;
        };
        let generation = if self.force_full_rebuild {
            0
        } else {
            self.generation
        };
        let response = provider.layers(generation);
        self.provider = Some(provider);
        if response.changed {
            self.dirty = self.dirty.union(response.layers);
        }
        // the next render cycle consumes the merged mask as-is instead of
        // asking the provider a second time at the same generation
        self.mask_polled = true;
        !self.dirty.is_empty()
            || self.force_full_rebuild
            || self.force_single_redraw
            || self.handle_redraw
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: GraphStyle) -> GraphResult<()> {
        style.validate()?;
        self.style = style;
        self.force_full_rebuild = true;
        Ok(())
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// The last composited frame.
    #[must_use]
    pub fn window(&self) -> &Surface {
        &self.window
    }

    #[must_use]
    pub fn surfaces(&self) -> &SurfaceStore {
        &self.store
    }

    /// Committed handle edits since the last call, oldest first.
    pub fn take_handle_events(&mut self) -> Vec<HandleChange> {
        std::mem::take(&mut self.events)
    }

    pub fn configure_handle(&mut self, index: usize, config: HandleConfig) -> bool {
        let applied = self.interaction.configure_handle(index, config);
        if applied {
            self.handle_redraw = true;
            self.force_single_redraw = true;
        }
        applied
    }

    pub fn deactivate_handle(&mut self, index: usize) -> bool {
        let applied = self.interaction.deactivate_handle(index);
        if applied {
            self.handle_redraw = true;
            self.force_single_redraw = true;
        }
        applied
    }

    /// Moves a handle programmatically; clamps to bounds, fires no event.
    pub fn set_handle_position(&mut self, index: usize, x: f64, y: f64, z: f64) -> bool {
        let applied = self.interaction.set_handle_position(index, x, y, z);
        if applied {
            self.handle_redraw = true;
            self.force_single_redraw = true;
        }
        applied
    }

    pub fn pointer_press(&mut self, x: f64, y: f64, double: bool) {
        let outcome = self.interaction.on_press(x, y, double, self.area);
        self.apply_outcome(outcome);
    }

    pub fn pointer_motion(&mut self, x: f64, y: f64) {
        let outcome = self.interaction.on_motion(x, y, self.area);
        self.apply_outcome(outcome);
    }

    pub fn pointer_release(&mut self) {
        let outcome = self.interaction.on_release();
        self.apply_outcome(outcome);
    }

    pub fn pointer_scroll(&mut self, up: bool) {
        let outcome = self.interaction.on_scroll(up, self.area);
        self.apply_outcome(outcome);
    }

    pub fn pointer_leave(&mut self) {
        let outcome = self.interaction.on_leave();
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: InteractionOutcome) {
        self.events.extend(outcome.events);
        if outcome.redraw_handles {
            self.handle_redraw = true;
        }
        if outcome.request_redraw {
            self.force_single_redraw = true;
        }
    }
}

impl std::fmt::Debug for GraphEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphEngine")
            .field("viewport", &self.viewport)
            .field("generation", &self.generation)
            .field("dirty", &self.dirty)
            .field("has_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

fn effective_viewport(viewport: Viewport, square: bool) -> Viewport {
    if square { viewport.squared() } else { viewport }
}
