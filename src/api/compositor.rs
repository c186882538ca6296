//! The two-phase draw cycle.
//!
//! One cycle per redraw event: gate on the provider's dirty report, run
//! the cache pass for cached layers, age the cache into the realtime base,
//! run the realtime pass, then composite window + handle overlay +
//! crosshair. Layer categories are always processed grid, curve, moving,
//! point, and the cache pass fully completes before the realtime pass
//! begins.

use tracing::{trace, warn};

use crate::core::{LayerKind, Phase, PlotArea};
use crate::error::GraphResult;
use crate::interaction::InteractionState;
use crate::provider::{ContentProvider, MoveDirection};
use crate::render::primitives::{self, CrosshairStyle, LabelBackdrop};
use crate::render::{GraphStyle, MovingPair, Surface};

use super::GraphEngine;

/// What one call to [`GraphEngine::render`] actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSummary {
    /// The cycle was gated: no surface touched, generation unchanged.
    pub skipped: bool,
    pub cache_pass: bool,
    pub realtime_pass: bool,
    /// Generation after the cycle.
    pub generation: u64,
}

impl DrawSummary {
    const fn gated(generation: u64) -> Self {
        Self {
            skipped: true,
            cache_pass: false,
            realtime_pass: false,
            generation,
        }
    }
}

impl GraphEngine {
    /// Runs one draw cycle. Without a provider the cycle is a no-op.
    pub fn render(&mut self) -> GraphResult<DrawSummary> {
        let Some(mut provider) = self.provider.take() else {
            trace!("no content provider, cycle skipped");
            return Ok(DrawSummary::gated(self.generation));
        };
        let result = self.render_with(provider.as_mut());
        self.provider = Some(provider);
        result
    }

    fn render_with(&mut self, provider: &mut dyn ContentProvider) -> GraphResult<DrawSummary> {
        // a preceding poll() already fetched and merged the mask at this
        // generation; a pending full rebuild re-queries at generation 0
        if self.force_full_rebuild || !self.mask_polled {
            let generation = if self.force_full_rebuild {
                0
            } else {
                self.generation
            };
            let response = provider.layers(generation);
            if response.changed {
                self.dirty = self.dirty.union(response.layers);
            }
        }
        self.mask_polled = false;
        if self.force_full_rebuild {
            self.dirty = self.dirty.union(crate::core::DirtyLayers::all_cached());
        }

        if self.dirty.is_empty() && !self.force_single_redraw && !self.handle_redraw {
            trace!("nothing dirty, cycle gated");
            return Ok(DrawSummary::gated(self.generation));
        }

        let cache_pass = self.force_full_rebuild || self.dirty.any_cached();
        let realtime_pass = self.dirty.any_realtime();
        trace!(
            dirty = ?self.dirty,
            cache_pass,
            realtime_pass,
            force_full = self.force_full_rebuild,
            "draw cycle"
        );

        if self.force_full_rebuild {
            self.store.background.fill(self.style.background_color);
        }

        if cache_pass {
            self.run_cache_pass(provider);
        }

        // transition: age the cached base into the realtime surface. A
        // finalize-only cycle (handle edit, single redraw) skips it and
        // leaves the realtime content as it is. When the realtime pass
        // starts at the moving traces, the seed is opaque.
        if cache_pass || realtime_pass {
            let moving_seed = !cache_pass
                && self.dirty.contains(LayerKind::Moving, Phase::Realtime)
                && !self.dirty.contains(LayerKind::Graph, Phase::Realtime);
            if self.force_full_rebuild || moving_seed {
                replace(&mut self.store.realtime, &self.store.cache);
            } else {
                self.store
                    .realtime
                    .copy_from_faded(&self.store.cache, 0, 0, self.style.fade);
            }
        }

        if realtime_pass {
            self.run_realtime_pass(provider);
        }

        self.finalize(provider);

        self.force_full_rebuild = false;
        self.force_single_redraw = false;
        self.handle_redraw = false;
        self.dirty.clear();
        self.generation += 1;

        Ok(DrawSummary {
            skipped: false,
            cache_pass,
            realtime_pass,
            generation: self.generation,
        })
    }

    /// Phase 0: repaint dirty cached categories in order, chaining each
    /// onto the buffers the previous one produced. Once an earlier
    /// category repaints, every later one repaints too, so the cache ends
    /// up pixel-identical to a full rebuild of the dirty subset.
    fn run_cache_pass(&mut self, provider: &mut dyn ContentProvider) {
        let area = self.area;
        let cap = area.width as usize;
        let mut repaint = self.force_full_rebuild;
        let mut cache_seeded = false;

        if repaint || self.dirty.contains(LayerKind::Grid, Phase::Cache) {
            replace(&mut self.store.grid, &self.store.background);
            let mut drawn = 0usize;
            for line in provider.grid_lines(Phase::Cache) {
                primitives::draw_grid_line(&mut self.store.grid, area, &line, &self.style);
                drawn += 1;
                if drawn >= cap {
                    warn!(cap, "grid line sequence never ended, truncating");
                    break;
                }
            }
            replace(&mut self.store.cache, &self.store.grid);
            cache_seeded = true;
            repaint = true;
        }

        if repaint || self.dirty.contains(LayerKind::Graph, Phase::Cache) {
            if !cache_seeded {
                replace(&mut self.store.cache, &self.store.grid);
                cache_seeded = true;
            }
            let mut drawn = 0usize;
            for series in provider.graphs(Phase::Cache, cap) {
                let color = series.color.unwrap_or(self.style.graph_color);
                primitives::draw_graph(
                    &mut self.store.cache,
                    area,
                    &series.samples,
                    series.mode,
                    color,
                );
                drawn += 1;
                if drawn >= cap {
                    warn!(cap, "graph sequence never ended, truncating");
                    break;
                }
            }
            repaint = true;
        }

        if repaint || self.dirty.contains(LayerKind::Moving, Phase::Cache) {
            if !cache_seeded {
                replace(&mut self.store.cache, &self.store.grid);
                cache_seeded = true;
            }
            paint_moving(
                &mut self.store.moving,
                &mut self.store.cache,
                area,
                &self.style,
                provider,
            );
            repaint = true;
        }

        if repaint || self.dirty.contains(LayerKind::Dot, Phase::Cache) {
            if !cache_seeded {
                replace(&mut self.store.cache, &self.store.grid);
            }
            let mut drawn = 0usize;
            for dot in provider.dots(Phase::Cache) {
                primitives::draw_dot(&mut self.store.cache, area, &dot, &self.style);
                drawn += 1;
                if drawn >= cap {
                    warn!(cap, "dot sequence never ended, truncating");
                    break;
                }
            }
        }
    }

    /// Phase 1: same categories, painted straight onto the realtime
    /// surface. The base was refreshed from `cache` just before, so every
    /// flagged category paints on current content.
    fn run_realtime_pass(&mut self, provider: &mut dyn ContentProvider) {
        let area = self.area;
        let cap = area.width as usize;

        if self.dirty.contains(LayerKind::Grid, Phase::Realtime) {
            let mut drawn = 0usize;
            for line in provider.grid_lines(Phase::Realtime) {
                primitives::draw_grid_line(&mut self.store.realtime, area, &line, &self.style);
                drawn += 1;
                if drawn >= cap {
                    warn!(cap, "grid line sequence never ended, truncating");
                    break;
                }
            }
        }

        if self.dirty.contains(LayerKind::Graph, Phase::Realtime) {
            let mut drawn = 0usize;
            for series in provider.graphs(Phase::Realtime, cap) {
                let color = series.color.unwrap_or(self.style.graph_color);
                primitives::draw_graph(
                    &mut self.store.realtime,
                    area,
                    &series.samples,
                    series.mode,
                    color,
                );
                drawn += 1;
                if drawn >= cap {
                    warn!(cap, "graph sequence never ended, truncating");
                    break;
                }
            }
        }

        if self.dirty.contains(LayerKind::Moving, Phase::Realtime) {
            paint_moving(
                &mut self.store.moving,
                &mut self.store.realtime,
                area,
                &self.style,
                provider,
            );
        }

        if self.dirty.contains(LayerKind::Dot, Phase::Realtime) {
            let mut drawn = 0usize;
            for dot in provider.dots(Phase::Realtime) {
                primitives::draw_dot(&mut self.store.realtime, area, &dot, &self.style);
                drawn += 1;
                if drawn >= cap {
                    warn!(cap, "dot sequence never ended, truncating");
                    break;
                }
            }
        }
    }

    /// Composites realtime + handle overlay + crosshair into the window
    /// surface. The crosshair is painted directly, never cached.
    fn finalize(&mut self, provider: &mut dyn ContentProvider) {
        replace(&mut self.window, &self.store.realtime);

        if self.interaction.any_active_handle() {
            if self.handle_redraw || self.force_full_rebuild || self.force_single_redraw {
                self.store.handles.clear();
                primitives::draw_handles(
                    &mut self.store.handles,
                    self.area,
                    &self.store.background,
                    self.interaction.handles(),
                    self.interaction.hovered_handle(),
                    &self.style,
                );
            }
            self.window.copy_from(&self.store.handles, 0, 0, 1.0);
        }

        if self.interaction.crosshair_should_draw(self.area) {
            draw_pointer_crosshair(
                &mut self.window,
                &self.store.background,
                self.area,
                &self.interaction,
                &self.style,
                provider,
            );
        }
    }
}

/// Repaints the scrolling traces: draw the fresh slices on the current
/// ping-pong buffer, blit the previous buffer shifted by the accumulated
/// scroll delta behind them, composite onto the target, toggle.
fn paint_moving(
    moving: &mut MovingPair,
    target: &mut Surface,
    area: PlotArea,
    style: &GraphStyle,
    provider: &mut dyn ContentProvider,
) {
    let cap = area.width.max(area.height) as usize;
    let (current, previous) = moving.split();
    current.clear();

    let mut total_offset: i64 = 0;
    let mut last_direction = None;
    let mut drawn = 0usize;
    for trace in provider.moving_traces(area.width as usize, area.height as usize) {
        primitives::draw_moving(current, area, &trace, style);
        total_offset += i64::from(trace.offset);
        last_direction = Some(trace.direction);
        drawn += 1;
        if drawn >= cap {
            warn!(cap, "moving trace sequence never ended, truncating");
            break;
        }
    }

    let Some(direction) = last_direction else {
        return;
    };
    let shift = total_offset + 1;
    let (dx, dy) = match direction {
        MoveDirection::Left => (-shift, 0),
        MoveDirection::Right => (shift, 0),
        MoveDirection::Up => (0, -shift),
        MoveDirection::Down => (0, shift),
    };
    current.copy_from(previous, dx, dy, 1.0);
    target.copy_from(current, 0, 0, 1.0);
    moving.swap();
}

fn draw_pointer_crosshair(
    window: &mut Surface,
    background: &Surface,
    area: PlotArea,
    interaction: &InteractionState,
    style: &GraphStyle,
    provider: &mut dyn ContentProvider,
) {
    let (px, py) = interaction.pointer();
    let rel_x = px - f64::from(area.x);
    let rel_y = py - f64::from(area.y);
    let label = provider.crosshair_label(rel_x, rel_y);
    let cross = CrosshairStyle {
        gradient: false,
        gradient_radius: 0,
        alpha: style.crosshair_alpha,
        mask: 5,
        circle: false,
    };
    primitives::draw_crosshair(
        window,
        area,
        background,
        rel_x.round() as i64,
        rel_y.round() as i64,
        &cross,
        &label,
        LabelBackdrop::Unclipped(0.5),
        style.label_text_color,
    );
}

/// Exact overwrite of `dst` with `src` (blending onto a cleared surface
/// reproduces the source pixels).
fn replace(dst: &mut Surface, src: &Surface) {
    dst.clear();
    dst.copy_from(src, 0, 0, 1.0);
}
