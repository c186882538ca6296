//! Stateless layer painters.
//!
//! Each routine is a pure function of (surface, geometry, payload, style)
//! with no shared mutable state between calls; the compositor decides which
//! surface each one targets. Non-finite sample values always mean "gap
//! here, do not connect" and are never an error.

use crate::core::PlotArea;
use crate::interaction::{HANDLE_WIDTH, Handle, HandleDimensions, HandleStyle};
use crate::provider::{Dot, GraphMode, GridLine, MoveDirection, MovingTrace, Orientation};

use super::{Color, GraphStyle, Surface, text};

/// How a label restores its background before text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelBackdrop {
    /// Restore the background only inside each text line's extents.
    Clipped(f64),
    /// Additionally paint the whole background at this opacity first
    /// (used under the crosshair).
    Unclipped(f64),
}

/// Crosshair rendering variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrosshairStyle {
    /// Draw the four arms with an alpha gradient instead of flat ink.
    pub gradient: bool,
    /// Arm length for the radial gradient variant; 0 extends arms to the
    /// content edges.
    pub gradient_radius: u32,
    pub alpha: f64,
    /// Arms keep this distance in pixels from the center.
    pub mask: u32,
    /// Fill a circle of `mask` radius at the center (2-D handles).
    pub circle: bool,
}

pub fn draw_grid_line(surface: &mut Surface, area: PlotArea, line: &GridLine, style: &GraphStyle) {
    let color = line.color.unwrap_or(style.grid_line_color);
    let legend = line.legend.as_deref().unwrap_or("");
    let (tw, th) = text::line_extents(legend);
    let reserve = if legend.is_empty() {
        0
    } else {
        i64::from(match line.orientation {
            Orientation::Vertical => th,
            Orientation::Horizontal => tw,
        }) + 5
    };

    match line.orientation {
        Orientation::Vertical => {
            let x = area.pos_to_x(line.position).floor() as i64;
            surface.vspan(
                x,
                i64::from(area.y),
                i64::from(area.bottom()) - 1 - reserve,
                color,
            );
            if !legend.is_empty() {
                text::draw_line(
                    surface,
                    x - i64::from(tw / 2),
                    i64::from(area.bottom()) - 2 - i64::from(th),
                    legend,
                    style.label_text_color,
                );
            }
        }
        Orientation::Horizontal => {
            let y = area.value_to_y(line.position).floor() as i64;
            surface.hspan(
                y,
                i64::from(area.x),
                i64::from(area.right()) - 1 - reserve,
                color,
            );
            if !legend.is_empty() {
                text::draw_line(
                    surface,
                    i64::from(area.right()) - 4 - i64::from(tw),
                    y - i64::from(th / 2) - 1,
                    legend,
                    style.label_text_color,
                );
            }
        }
    }
}

/// Paints one series of per-column samples in the requested mode.
pub fn draw_graph(
    surface: &mut Surface,
    area: PlotArea,
    samples: &[f64],
    mode: GraphMode,
    color: Color,
) {
    let n = samples.len().min(area.width as usize);
    let samples = &samples[..n];
    let ox = i64::from(area.x);
    let bottom = i64::from(area.bottom()) - 1;

    match mode {
        GraphMode::Line => {
            let mut prev_y: Option<i64> = None;
            for (i, &value) in samples.iter().enumerate() {
                if !value.is_finite() {
                    prev_y = None;
                    continue;
                }
                let y = area.value_to_y(value).round() as i64;
                let x = ox + i as i64;
                match prev_y {
                    Some(py) => surface.vspan(x, py, y, color),
                    None => surface.blend_pixel(x, y, color),
                }
                prev_y = Some(y);
            }
        }
        GraphMode::Fill => {
            for (i, &value) in samples.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let y = area.value_to_y(value).round() as i64;
                surface.vspan(ox + i as i64, y, bottom, color);
            }
        }
        GraphMode::Bar => {
            for (start, len, value) in value_runs(samples) {
                let y = area.value_to_y(value).round() as i64;
                surface.fill_rect(ox + start, y, len, bottom + 1 - y, color);
            }
        }
        GraphMode::Tick => {
            for (start, len, value) in value_runs(samples) {
                let y = area.value_to_y(value).round() as i64;
                surface.fill_rect(ox + start, y - 1, len, 2, color);
            }
        }
        GraphMode::CenteredBar => {
            let mid = area.mid_y().round() as i64;
            for (start, len, value) in value_runs(samples) {
                let y = area.value_to_y(value).round() as i64;
                surface.fill_rect(ox + start, mid, len, y - mid, color);
            }
        }
        GraphMode::CenteredBarOffset(offset) => {
            let base = area.value_to_y(0.5 + offset).round() as i64;
            for (start, len, value) in value_runs(samples) {
                let y = area.value_to_y(value).round() as i64;
                surface.fill_rect(ox + start, base, len, y - base, color);
            }
        }
    }
}

/// Runs of equal finite samples: (start column, length, value). Bar-style
/// modes draw one rectangle per run instead of one per sample.
fn value_runs(samples: &[f64]) -> Vec<(i64, i64, f64)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < samples.len() {
        let value = samples[i];
        if !value.is_finite() {
            i += 1;
            continue;
        }
        let start = i;
        while i < samples.len() && samples[i].is_finite() && samples[i] == value {
            i += 1;
        }
        runs.push((start as i64, (i - start) as i64, value));
    }
    runs
}

/// Paints one slice of a scrolling trace at its offset from the entry
/// edge. Sample values modulate the ink alpha; gaps skip segments.
pub fn draw_moving(surface: &mut Surface, area: PlotArea, trace: &MovingTrace, style: &GraphStyle) {
    let base = trace.color.unwrap_or(style.moving_color);
    let ox = i64::from(area.x);
    let oy = i64::from(area.y);
    let sx = i64::from(area.width);
    let sy = i64::from(area.height);
    let offset = i64::from(trace.offset);

    let span = match trace.direction {
        MoveDirection::Up | MoveDirection::Down => area.width as usize,
        MoveDirection::Left | MoveDirection::Right => area.height as usize,
    };
    let n = trace.samples.len().min(span);

    let mut last = 0i64;
    for i in 1..n {
        let value = trace.samples[i];
        if !value.is_finite() {
            continue;
        }
        let color = base.with_alpha(value.clamp(0.0, 1.0) * base.alpha);
        let run = i as i64 - last;
        match trace.direction {
            MoveDirection::Left => surface.fill_rect(ox + sx - 1 - offset, oy + last, 1, run, color),
            MoveDirection::Right => surface.fill_rect(ox + offset, oy + last, 1, run, color),
            MoveDirection::Up => surface.fill_rect(ox + last, oy + sy - 1 - offset, run, 1, color),
            MoveDirection::Down => surface.fill_rect(ox + last, oy + offset, run, 1, color),
        }
        last = i as i64;
    }
}

pub fn draw_dot(surface: &mut Surface, area: PlotArea, dot: &Dot, style: &GraphStyle) {
    if !dot.x.is_finite() || !dot.y.is_finite() {
        return;
    }
    let color = dot.color.unwrap_or(style.dot_color);
    fill_circle(
        surface,
        area.pos_to_x(dot.x),
        area.value_to_y(dot.y),
        dot.size.max(0.0),
        color,
    );
}

fn fill_circle(surface: &mut Surface, cx: f64, cy: f64, radius: f64, color: Color) {
    let y0 = (cy - radius).floor() as i64;
    let y1 = (cy + radius).ceil() as i64;
    for py in y0..=y1 {
        let dy = py as f64 - cy;
        let chord = radius * radius - dy * dy;
        if chord < 0.0 {
            continue;
        }
        let half = chord.sqrt();
        surface.hspan(
            py,
            (cx - half).round() as i64,
            (cx + half).round() as i64,
            color,
        );
    }
}

/// Draws a multi-line label whose text ends just left of `x`, restoring
/// each line's background patch from the background surface first.
/// Coordinates are absolute surface pixels; `centered` centers the block
/// vertically on `y`.
pub fn draw_label(
    surface: &mut Surface,
    background: &Surface,
    label: &str,
    x: i64,
    y: i64,
    backdrop: LabelBackdrop,
    centered: bool,
    text_color: Color,
) {
    const HMARG: i64 = 8;
    const PAD: i64 = 2;

    let lines: Vec<&str> = label.split('\n').filter(|line| !line.is_empty()).collect();
    if lines.is_empty() {
        return;
    }

    let nh = i64::from(text::GLYPH_HEIGHT);
    let count = lines.len() as i64;
    let mut p = if centered {
        y - count * (nh + PAD * 2) / 2
    } else {
        y
    };

    let alpha = match backdrop {
        LabelBackdrop::Unclipped(alpha) => {
            surface.copy_from(background, 0, 0, alpha);
            alpha
        }
        LabelBackdrop::Clipped(alpha) => alpha,
    };

    for line in lines {
        let (tw, _) = text::line_extents(line);
        let tw = i64::from(tw);
        surface.copy_rect_from(
            background,
            x - HMARG - tw - 2 * PAD,
            p,
            tw + 2 * PAD,
            nh + PAD,
            alpha,
        );
        text::draw_line(surface, x - HMARG - tw - PAD, p + PAD / 2, line, text_color);
        p += nh + PAD;
    }
}

/// Draws crosshair arms (plus the optional center circle and label) around
/// a content-relative point.
pub fn draw_crosshair(
    surface: &mut Surface,
    area: PlotArea,
    background: &Surface,
    x: i64,
    y: i64,
    cross: &CrosshairStyle,
    label: &str,
    backdrop: LabelBackdrop,
    text_color: Color,
) {
    let ox = i64::from(area.x);
    let oy = i64::from(area.y);
    let sx = i64::from(area.width);
    let sy = i64::from(area.height);
    let cx = ox + x;
    let cy = oy + y;
    let mask = i64::from(cross.mask);
    let ink = |alpha: f64| Color::rgba(0.0, 0.0, 0.0, alpha);

    if mask > 0 && cross.circle {
        fill_circle(surface, cx as f64, cy as f64, mask as f64, ink(cross.alpha));
        if cross.alpha < 0.3 {
            fill_circle(surface, cx as f64, cy as f64, HANDLE_WIDTH / 2.0, ink(0.2));
        }
    }

    if cross.gradient && cross.gradient_radius > 0 {
        // arms of fixed length with a radial falloff
        let radius = i64::from(cross.gradient_radius);
        let falloff = |distance: i64| {
            cross.alpha * (1.0 - distance as f64 / (radius as f64 * 2.0)).clamp(0.0, 1.0)
        };
        for d in mask..radius {
            surface.blend_pixel(cx, cy - d, ink(falloff(d)));
            surface.blend_pixel(cx + d, cy, ink(falloff(d)));
            surface.blend_pixel(cx, cy + d, ink(falloff(d)));
            surface.blend_pixel(cx - d, cy, ink(falloff(d)));
        }
    } else if cross.gradient {
        // arms running to the content edges, fading out toward them
        for py in oy..(cy - mask) {
            let t = (py - oy) as f64 / (cy - oy).max(1) as f64;
            surface.blend_pixel(cx, py, ink(cross.alpha * t));
        }
        for px in (cx + mask)..(ox + sx) {
            let t = (px - cx) as f64 / (ox + sx - cx).max(1) as f64;
            surface.blend_pixel(px, cy, ink(cross.alpha * (1.0 - t)));
        }
        for py in (cy + mask)..(oy + sy) {
            let t = (py - cy) as f64 / (oy + sy - cy).max(1) as f64;
            surface.blend_pixel(cx, py, ink(cross.alpha * (1.0 - t)));
        }
        for px in ox..(cx - mask) {
            let t = (px - ox) as f64 / (cx - ox).max(1) as f64;
            surface.blend_pixel(px, cy, ink(cross.alpha * t));
        }
    } else {
        let color = ink(cross.alpha);
        surface.vspan(cx, oy, cy - mask, color);
        surface.hspan(cy, cx + mask, ox + sx - 1, color);
        surface.vspan(cx, cy + mask, oy + sy - 1, color);
        surface.hspan(cy, ox, cx - mask, color);
    }

    draw_label(
        surface,
        background,
        label,
        cx - mask,
        cy,
        backdrop,
        true,
        text_color,
    );
}

/// Repaints the full handle overlay: position lines, per-style decorative
/// gradient zones, circled crosshairs for 2-D handles, labels.
pub fn draw_handles(
    surface: &mut Surface,
    area: PlotArea,
    background: &Surface,
    handles: &[Handle],
    hovered: Option<usize>,
    style: &GraphStyle,
) {
    let ox = i64::from(area.x);
    let oy = i64::from(area.y);
    let sx = i64::from(area.width);
    let sy = i64::from(area.height);

    for (i, handle) in handles.iter().enumerate() {
        if !handle.active || handle.x < 0.0 || handle.x > 1.0 {
            continue;
        }
        let is_hovered = hovered == Some(i);
        let (pat_alpha, gradient, ink_alpha, backdrop_alpha) = if is_hovered {
            (0.3, false, 0.7, 0.8)
        } else {
            (0.1, true, 0.5, 0.5)
        };
        let ink = style.handle_ink_color.with_alpha(ink_alpha);
        let val_x = area.pos_to_x(handle.x).round() as i64;
        let label = handle_label(handle);

        match handle.dimensions {
            HandleDimensions::One => {
                surface.vspan(val_x, oy, oy + sy - 1, ink);
                match handle.style {
                    HandleStyle::Bell => {
                        vertical_bloom(surface, area, val_x - 7, 6, pat_alpha);
                        vertical_bloom(surface, area, val_x + 2, 6, pat_alpha);
                    }
                    HandleStyle::HighPass => {
                        horizontal_ramp(surface, area, ox, val_x - 1, 0.0, pat_alpha);
                    }
                    HandleStyle::LowShelf => {
                        vertical_bloom(surface, area, ox, val_x - 1 - ox, pat_alpha * 1.5);
                    }
                    HandleStyle::HighShelf => {
                        vertical_bloom(
                            surface,
                            area,
                            val_x + 2,
                            ox + sx - val_x - 2,
                            pat_alpha * 1.5,
                        );
                    }
                    HandleStyle::LowPass => {
                        horizontal_ramp(surface, area, val_x + 2, ox + sx - 1, pat_alpha, 0.0);
                    }
                }
                draw_label(
                    surface,
                    background,
                    &label,
                    val_x,
                    oy + 2,
                    LabelBackdrop::Clipped(backdrop_alpha),
                    false,
                    style.label_text_color,
                );
            }
            HandleDimensions::Two => {
                let val_y = area.frac_to_y(handle.y).round() as i64;
                let mask =
                    (30.0 - (1.0 + handle.z * 9.0).log10() * 30.0 + HANDLE_WIDTH / 2.0) as u32;
                let cross = CrosshairStyle {
                    gradient,
                    gradient_radius: 0,
                    alpha: pat_alpha,
                    mask,
                    circle: true,
                };
                draw_crosshair(
                    surface,
                    area,
                    background,
                    val_x - ox,
                    val_y - oy,
                    &cross,
                    &label,
                    LabelBackdrop::Clipped(backdrop_alpha),
                    style.label_text_color,
                );
            }
        }
    }
}

fn handle_label(handle: &Handle) -> String {
    let readout = match handle.dimensions {
        HandleDimensions::One => format!("{:.0}%", handle.x * 100.0),
        HandleDimensions::Two => format!(
            "{:.0}%, {:.0}%",
            handle.x * 100.0,
            (1.0 - handle.y) * 100.0
        ),
    };
    match handle.label.as_deref() {
        Some(label) if !label.is_empty() => format!("{label}\n{readout}"),
        _ => readout,
    }
}

/// Fills full-height columns with an alpha peak at the vertical midline.
fn vertical_bloom(surface: &mut Surface, area: PlotArea, x0: i64, w: i64, peak: f64) {
    if w <= 0 || area.height == 0 {
        return;
    }
    let oy = i64::from(area.y);
    let sy = i64::from(area.height);
    for py in oy..oy + sy {
        let t = (py - oy) as f64 / (sy - 1).max(1) as f64;
        let alpha = peak * (1.0 - (2.0 * t - 1.0).abs());
        surface.fill_rect(x0, py, w, 1, Color::rgba(0.0, 0.0, 0.0, alpha));
    }
}

/// Fills full-height columns with alpha interpolated from left to right.
fn horizontal_ramp(surface: &mut Surface, area: PlotArea, x0: i64, x1: i64, from: f64, to: f64) {
    if x1 < x0 {
        return;
    }
    let oy = i64::from(area.y);
    let sy = i64::from(area.height);
    let span = (x1 - x0).max(1) as f64;
    for px in x0..=x1 {
        let t = (px - x0) as f64 / span;
        let alpha = from + (to - from) * t;
        surface.fill_rect(px, oy, 1, sy, Color::rgba(0.0, 0.0, 0.0, alpha));
    }
}
