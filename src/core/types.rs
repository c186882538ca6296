use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Shrinks the viewport to a centered square (smaller dimension wins).
    /// Used for goniometer-style widgets that request square allocation.
    #[must_use]
    pub fn squared(self) -> Self {
        let side = self.width.min(self.height);
        Self {
            width: side,
            height: side,
        }
    }
}

/// Drawable content area of the widget: the viewport inset by the pad
/// offsets, plus the normalized-value to pixel mapping shared by every
/// drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PlotArea {
    #[must_use]
    pub fn from_viewport(viewport: Viewport, pad_x: u32, pad_y: u32) -> Self {
        Self {
            x: pad_x,
            y: pad_y,
            width: viewport.width.saturating_sub(pad_x * 2),
            height: viewport.height.saturating_sub(pad_y * 2),
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn right(self) -> u32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> u32 {
        self.y + self.height
    }

    /// True when an absolute pixel position lies inside the content area.
    #[must_use]
    pub fn contains(self, px: f64, py: f64) -> bool {
        px >= f64::from(self.x)
            && px < f64::from(self.right())
            && py >= f64::from(self.y)
            && py < f64::from(self.bottom())
    }

    /// Maps a normalized sample value in [0, 1] (1.0 = top edge) to an
    /// absolute y pixel. Values outside [0, 1] map outside the content
    /// area; callers clip at the surface boundary.
    #[must_use]
    pub fn value_to_y(self, value: f64) -> f64 {
        f64::from(self.y) + (1.0 - value) * f64::from(self.height.saturating_sub(1))
    }

    /// Maps a normalized horizontal position in [0, 1] to an absolute x pixel.
    #[must_use]
    pub fn pos_to_x(self, pos: f64) -> f64 {
        f64::from(self.x) + pos * f64::from(self.width.saturating_sub(1))
    }

    /// Maps a top-down screen fraction in [0, 1] (0 = top edge) to an
    /// absolute y pixel. Handle y positions use this convention.
    #[must_use]
    pub fn frac_to_y(self, frac: f64) -> f64 {
        f64::from(self.y) + frac * f64::from(self.height.saturating_sub(1))
    }

    /// Vertical midline in absolute pixels; centered bar modes anchor here.
    #[must_use]
    pub fn mid_y(self) -> f64 {
        self.value_to_y(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotArea, Viewport};

    #[test]
    fn plot_area_insets_viewport_by_padding() {
        let area = PlotArea::from_viewport(Viewport::new(120, 80), 4, 2);
        assert_eq!(area.x, 4);
        assert_eq!(area.y, 2);
        assert_eq!(area.width, 112);
        assert_eq!(area.height, 76);
        assert_eq!(area.right(), 116);
        assert_eq!(area.bottom(), 78);
    }

    #[test]
    fn value_mapping_puts_half_on_the_midline() {
        let area = PlotArea::from_viewport(Viewport::new(100, 101), 0, 0);
        assert_eq!(area.value_to_y(1.0), 0.0);
        assert_eq!(area.value_to_y(0.0), 100.0);
        assert_eq!(area.value_to_y(0.5), 50.0);
        assert_eq!(area.mid_y(), 50.0);
    }

    #[test]
    fn squared_viewport_uses_smaller_dimension() {
        assert_eq!(Viewport::new(120, 80).squared(), Viewport::new(80, 80));
        assert_eq!(Viewport::new(60, 90).squared(), Viewport::new(60, 60));
    }
}
