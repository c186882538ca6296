use serde::{Deserialize, Serialize};

use super::Color;

/// Style contract applied to one draw cycle.
///
/// Colors here are fallbacks; providers may override color per item on the
/// payload types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    pub graph_color: Color,
    pub moving_color: Color,
    pub dot_color: Color,
    pub handle_ink_color: Color,
    pub crosshair_alpha: f64,
    pub label_text_color: Color,
    /// Fade factor for aging cached content into the realtime base; 1.0
    /// disables the trail effect.
    pub fade: f64,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(0.88, 0.88, 0.82),
            grid_line_color: Color::rgba(0.15, 0.2, 0.0, 0.66),
            graph_color: Color::rgba(0.15, 0.2, 0.0, 0.8),
            moving_color: Color::rgba(0.35, 0.4, 0.2, 1.0),
            dot_color: Color::rgba(0.15, 0.2, 0.0, 1.0),
            handle_ink_color: Color::rgba(0.0, 0.0, 0.0, 0.5),
            crosshair_alpha: 0.5,
            label_text_color: Color::rgba(0.0, 0.0, 0.0, 0.5),
            fade: 1.0,
        }
    }
}

impl GraphStyle {
    #[must_use]
    pub fn with_fade(mut self, fade: f64) -> Self {
        self.fade = fade;
        self
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn validate(&self) -> crate::error::GraphResult<()> {
        for color in [
            self.background_color,
            self.grid_line_color,
            self.graph_color,
            self.moving_color,
            self.dot_color,
            self.handle_ink_color,
            self.label_text_color,
        ] {
            color.validate()?;
        }
        if !self.fade.is_finite() || !(0.0..=1.0).contains(&self.fade) {
            return Err(crate::error::GraphError::InvalidData(
                "fade must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}
