//! Pointer interaction: hit-testing, hover/grab tracking, drag clamping,
//! ordering enforcement and the crosshair toggle for draggable overlay
//! handles.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlotArea;

/// Fixed handle capacity; handles are allocated once at widget
/// construction and only ever toggled active/inactive.
pub const MAX_HANDLES: usize = 32;
/// Hit-test width of a handle in pixels (band width for 1-D handles,
/// circle diameter for 2-D handles).
pub const HANDLE_WIDTH: f64 = 20.0;
/// Default minimum separation between ordered 1-D handles, normalized.
pub const DEFAULT_MIN_HANDLE_DISTANCE: f64 = 0.025;

/// Per-scroll-step applied to a handle's z parameter.
pub const SCROLL_Z_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleDimensions {
    /// Carries only a horizontal position.
    One,
    /// Carries (x, y).
    Two,
}

/// Decorative overlay drawn around a 1-D handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HandleStyle {
    #[default]
    Bell,
    HighPass,
    LowShelf,
    HighShelf,
    LowPass,
}

/// A draggable overlay marker bound to an external parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    pub active: bool,
    pub dimensions: HandleDimensions,
    pub style: HandleStyle,
    pub label: Option<String>,
    /// Normalized horizontal position in [0, 1]; negative = not yet set.
    pub x: f64,
    /// Normalized top-down screen fraction in [0, 1] (0 = top edge).
    pub y: f64,
    /// Optional third parameter (e.g. width/Q), only meaningful with `has_z`.
    pub z: f64,
    pub has_z: bool,
    pub default_x: f64,
    pub default_y: f64,
    /// Dynamic clamping bounds, tightened on grab when ordering
    /// enforcement is on.
    pub left_bound: f64,
    pub right_bound: f64,
}

impl Handle {
    fn inactive() -> Self {
        Self {
            active: false,
            dimensions: HandleDimensions::One,
            style: HandleStyle::Bell,
            label: None,
            x: -1.0,
            y: -1.0,
            z: 0.0,
            has_z: false,
            default_x: 0.5,
            default_y: 0.5,
            left_bound: DEFAULT_MIN_HANDLE_DISTANCE,
            right_bound: 1.0 - DEFAULT_MIN_HANDLE_DISTANCE,
        }
    }
}

/// Host-facing setup for one handle slot.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleConfig {
    pub dimensions: HandleDimensions,
    pub style: HandleStyle,
    pub label: Option<String>,
    pub has_z: bool,
    pub default_x: f64,
    pub default_y: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            dimensions: HandleDimensions::One,
            style: HandleStyle::Bell,
            label: None,
            has_z: false,
            default_x: 0.5,
            default_y: 0.5,
        }
    }
}

/// A committed handle edit, queued for the host to drain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleChange {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// What a pointer entry point asks the widget glue to do next.
#[derive(Debug, Default)]
pub struct InteractionOutcome {
    pub events: SmallVec<[HandleChange; 4]>,
    /// The handle overlay surface must be rebuilt.
    pub redraw_handles: bool,
    /// A repaint should be requested from the host.
    pub request_redraw: bool,
}

/// Pointer-driven state: `idle -> hover -> grabbed -> idle`, plus the
/// crosshair toggle. Owns the fixed handle array.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    handles: Vec<Handle>,
    pointer_x: f64,
    pointer_y: f64,
    hovered: Option<usize>,
    grabbed: Option<usize>,
    crosshair_enabled: bool,
    crosshair_active: bool,
    enforce_order: bool,
    min_distance: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            handles: vec![Handle::inactive(); MAX_HANDLES],
            pointer_x: -1.0,
            pointer_y: -1.0,
            hovered: None,
            grabbed: None,
            crosshair_enabled: false,
            crosshair_active: false,
            enforce_order: false,
            min_distance: DEFAULT_MIN_HANDLE_DISTANCE,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }

    #[must_use]
    pub fn handle(&self, index: usize) -> Option<&Handle> {
        self.handles.get(index)
    }

    #[must_use]
    pub fn hovered_handle(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn grabbed_handle(&self) -> Option<usize> {
        self.grabbed
    }

    #[must_use]
    pub fn pointer(&self) -> (f64, f64) {
        (self.pointer_x, self.pointer_y)
    }

    #[must_use]
    pub fn crosshair_active(&self) -> bool {
        self.crosshair_active
    }

    #[must_use]
    pub fn crosshair_enabled(&self) -> bool {
        self.crosshair_enabled
    }

    pub fn set_crosshair_enabled(&mut self, enabled: bool) {
        self.crosshair_enabled = enabled;
        if !enabled {
            self.crosshair_active = false;
        }
    }

    pub fn set_enforce_handle_order(&mut self, enforce: bool) {
        self.enforce_order = enforce;
    }

    pub fn set_min_handle_distance(&mut self, distance: f64) {
        self.min_distance = distance.clamp(0.0, 0.5);
    }

    /// True when any handle slot is active (the overlay surface is only
    /// rebuilt and composited in that case).
    #[must_use]
    pub fn any_active_handle(&self) -> bool {
        self.handles.iter().any(|handle| handle.active)
    }

    /// Activates and configures a handle slot. Returns `false` when the
    /// index is outside the fixed capacity (clamped defensively, never an
    /// error, to keep the UI responsive).
    pub fn configure_handle(&mut self, index: usize, config: HandleConfig) -> bool {
        let Some(handle) = self.handles.get_mut(index) else {
            return false;
        };
        handle.active = true;
        handle.dimensions = config.dimensions;
        handle.style = config.style;
        handle.label = config.label;
        handle.has_z = config.has_z;
        handle.default_x = config.default_x.clamp(0.0, 1.0);
        handle.default_y = config.default_y.clamp(0.0, 1.0);
        if handle.x < 0.0 {
            handle.x = handle.default_x;
        }
        if handle.y < 0.0 {
            handle.y = handle.default_y;
        }
        true
    }

    pub fn deactivate_handle(&mut self, index: usize) -> bool {
        let Some(handle) = self.handles.get_mut(index) else {
            return false;
        };
        handle.active = false;
        true
    }

    /// Repositions a handle from the owning application (not a drag);
    /// values are clamped, no change event is emitted.
    pub fn set_handle_position(&mut self, index: usize, x: f64, y: f64, z: f64) -> bool {
        let Some(handle) = self.handles.get_mut(index) else {
            return false;
        };
        handle.x = x.clamp(0.0, 1.0);
        handle.y = y.clamp(0.0, 1.0);
        handle.z = z.clamp(0.0, 1.0);
        true
    }

    /// Index of the topmost active handle under the pointer, if any.
    #[must_use]
    pub fn handle_at(&self, px: f64, py: f64, area: PlotArea) -> Option<usize> {
        for (i, handle) in self.handles.iter().enumerate() {
            if !handle.active {
                continue;
            }
            match handle.dimensions {
                HandleDimensions::One => {
                    let hx = area.pos_to_x(handle.x);
                    if (px - hx).abs() <= HANDLE_WIDTH / 2.0 {
                        return Some(i);
                    }
                }
                HandleDimensions::Two => {
                    let dx = px - area.pos_to_x(handle.x);
                    let dy = py - area.frac_to_y(handle.y);
                    if (dx * dx + dy * dy).sqrt() <= HANDLE_WIDTH / 2.0 {
                        return Some(i);
                    }
                }
            }
        }
        None
    }

    pub fn on_press(&mut self, px: f64, py: f64, double: bool, area: PlotArea) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();
        self.pointer_x = px;
        self.pointer_y = py;

        match self.handle_at(px, py, area) {
            Some(i) => {
                self.grabbed = Some(i);
                if self.handles[i].dimensions == HandleDimensions::One && self.enforce_order {
                    self.update_order_bounds(i);
                }
                if double {
                    let handle = &mut self.handles[i];
                    handle.x = handle.default_x;
                    handle.y = handle.default_y;
                    outcome.events.push(HandleChange {
                        index: i,
                        x: handle.x,
                        y: handle.y,
                        z: handle.z,
                    });
                }
            }
            None => {
                if self.crosshair_enabled {
                    self.crosshair_active = !self.crosshair_active;
                }
            }
        }

        outcome.redraw_handles = true;
        outcome.request_redraw = true;
        outcome
    }

    pub fn on_motion(&mut self, px: f64, py: f64, area: PlotArea) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();
        self.pointer_x = px;
        self.pointer_y = py;

        if let Some(i) = self.grabbed {
            let handle = &mut self.handles[i];
            let span_x = f64::from(area.width.saturating_sub(1)).max(1.0);
            let span_y = f64::from(area.height.saturating_sub(1)).max(1.0);
            let new_x =
                ((px - f64::from(area.x)) / span_x).clamp(handle.left_bound, handle.right_bound);
            let mut new_y = handle.y;
            if handle.dimensions == HandleDimensions::Two {
                new_y = ((py - f64::from(area.y)) / span_y).clamp(0.0, 1.0);
            }
            if new_x != handle.x || new_y != handle.y {
                handle.x = new_x;
                handle.y = new_y;
                outcome.events.push(HandleChange {
                    index: i,
                    x: handle.x,
                    y: handle.y,
                    z: handle.z,
                });
            }
            outcome.redraw_handles = true;
            outcome.request_redraw = true;
        }

        let hovered = self.handle_at(px, py, area);
        if hovered != self.hovered {
            self.hovered = hovered;
            outcome.redraw_handles = true;
            outcome.request_redraw = true;
        }

        if self.crosshair_enabled && self.crosshair_active {
            outcome.request_redraw = true;
        }
        outcome
    }

    pub fn on_release(&mut self) -> InteractionOutcome {
        self.grabbed = None;
        InteractionOutcome {
            events: SmallVec::new(),
            redraw_handles: false,
            request_redraw: true,
        }
    }

    /// Scroll over a handle with a bound z parameter steps z by 0.05.
    pub fn on_scroll(&mut self, up: bool, area: PlotArea) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();
        let Some(i) = self.handle_at(self.pointer_x, self.pointer_y, area) else {
            return outcome;
        };
        let handle = &mut self.handles[i];
        if !handle.has_z {
            return outcome;
        }
        let step = if up { SCROLL_Z_STEP } else { -SCROLL_Z_STEP };
        let new_z = (handle.z + step).clamp(0.0, 1.0);
        if new_z != handle.z {
            handle.z = new_z;
            outcome.events.push(HandleChange {
                index: i,
                x: handle.x,
                y: handle.y,
                z: handle.z,
            });
        }
        outcome.redraw_handles = true;
        outcome.request_redraw = true;
        outcome
    }

    pub fn on_leave(&mut self) -> InteractionOutcome {
        let was_inside = self.pointer_x >= 0.0 || self.pointer_y >= 0.0;
        self.pointer_x = -1.0;
        self.pointer_y = -1.0;
        self.hovered = None;
        InteractionOutcome {
            events: SmallVec::new(),
            redraw_handles: true,
            request_redraw: was_inside,
        }
    }

    /// Whether the finalize step should draw the crosshair this cycle.
    #[must_use]
    pub fn crosshair_should_draw(&self, area: PlotArea) -> bool {
        self.crosshair_enabled
            && self.crosshair_active
            && self.grabbed.is_none()
            && area.contains(self.pointer_x, self.pointer_y)
    }

    /// Recomputes a 1-D handle's drag bounds from its nearest active 1-D
    /// neighbors plus the minimum separation.
    fn update_order_bounds(&mut self, index: usize) {
        let mut left = self.min_distance;
        let mut right = 1.0 - self.min_distance;

        for j in (0..index).rev() {
            let prev = &self.handles[j];
            if prev.active && prev.dimensions == HandleDimensions::One {
                left = prev.x + self.min_distance;
                break;
            }
        }
        for next in &self.handles[index + 1..] {
            if next.active && next.dimensions == HandleDimensions::One {
                right = next.x - self.min_distance;
                break;
            }
        }

        let handle = &mut self.handles[index];
        handle.left_bound = left;
        handle.right_bound = right.max(left);
    }
}
