use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

/// RGBA color in normalized 0..=1 channel values, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> GraphResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GraphError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn to_f32(self) -> [f32; 4] {
        [
            self.red as f32,
            self.green as f32,
            self.blue as f32,
            self.alpha as f32,
        ]
    }

    fn from_f32(px: [f32; 4]) -> Self {
        Self::rgba(
            f64::from(px[0]),
            f64::from(px[1]),
            f64::from(px[2]),
            f64::from(px[3]),
        )
    }
}

/// An owned off-screen pixel buffer.
///
/// All cached layers, the handle overlay and the visible window image are
/// `Surface` values; compositing is plain src-over blending so a sequence
/// of identical paint operations is bit-reproducible, which the layer
/// consistency tests rely on.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Surface {
    /// Allocates a transparent surface. Allocation failure is reported
    /// instead of aborting: a widget without buffers is a host-level error.
    pub fn new(width: u32, height: u32) -> GraphResult<Self> {
        let len = width as usize * height as usize;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| GraphError::SurfaceAllocation { width, height })?;
        pixels.resize(len, [0.0; 4]);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resets every pixel to transparent (the CLEAR operator).
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Replaces every pixel with `color` without blending.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_f32());
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        Some(Color::from_f32(self.pixels[idx]))
    }

    /// Blends `color` over the pixel at (x, y); out-of-bounds positions are
    /// silently clipped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = blend_over(self.pixels[idx], color.to_f32(), 1.0);
    }

    /// Fills an axis-aligned rectangle with src-over blending. Negative
    /// width/height select the mirrored extent, like cairo rectangle
    /// calls with negative spans.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        let (x, w) = normalize_span(x, w);
        let (y, h) = normalize_span(y, h);
        if w == 0 || h == 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(i64::from(self.width));
        let y1 = (y + h).min(i64::from(self.height));
        let src = color.to_f32();
        for py in y0..y1 {
            let row = py as usize * self.width as usize;
            for px in x0..x1 {
                let idx = row + px as usize;
                self.pixels[idx] = blend_over(self.pixels[idx], src, 1.0);
            }
        }
    }

    /// One-pixel-wide vertical span covering rows `y0..=y1` at column `x`.
    pub fn vspan(&mut self, x: i64, y0: i64, y1: i64, color: Color) {
        let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.fill_rect(x, top, 1, bottom - top + 1, color);
    }

    /// One-pixel-high horizontal span covering columns `x0..=x1` at row `y`.
    pub fn hspan(&mut self, y: i64, x0: i64, x1: i64, color: Color) {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.fill_rect(left, y, right - left + 1, 1, color);
    }

    /// Paints `source` over this surface offset by (dx, dy), scaling the
    /// source alpha by `alpha` (1.0 is a plain paint).
    pub fn copy_from(&mut self, source: &Surface, dx: i64, dy: i64, alpha: f64) {
        let alpha = alpha.clamp(0.0, 1.0) as f32;
        if alpha == 0.0 {
            return;
        }
        for sy in 0..i64::from(source.height) {
            let ty = sy + dy;
            if ty < 0 || ty >= i64::from(self.height) {
                continue;
            }
            let src_row = sy as usize * source.width as usize;
            let dst_row = ty as usize * self.width as usize;
            for sx in 0..i64::from(source.width) {
                let tx = sx + dx;
                if tx < 0 || tx >= i64::from(self.width) {
                    continue;
                }
                let src = source.pixels[src_row + sx as usize];
                let idx = dst_row + tx as usize;
                self.pixels[idx] = blend_over(self.pixels[idx], src, alpha);
            }
        }
    }

    /// Paints `source` over this surface at the same position, restricted
    /// to one destination rectangle. Used for label background patches that
    /// restore a clipped window of the background surface.
    pub fn copy_rect_from(
        &mut self,
        source: &Surface,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        alpha: f64,
    ) {
        let alpha = alpha.clamp(0.0, 1.0) as f32;
        if alpha == 0.0 {
            return;
        }
        let (x, w) = normalize_span(x, w);
        let (y, h) = normalize_span(y, h);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w)
            .min(i64::from(self.width))
            .min(i64::from(source.width));
        let y1 = (y + h)
            .min(i64::from(self.height))
            .min(i64::from(source.height));
        for py in y0..y1 {
            let src_row = py as usize * source.width as usize;
            let dst_row = py as usize * self.width as usize;
            for px in x0..x1 {
                let src = source.pixels[src_row + px as usize];
                let idx = dst_row + px as usize;
                self.pixels[idx] = blend_over(self.pixels[idx], src, alpha);
            }
        }
    }

    /// Paints `source` over this surface with the fade curve used when
    /// aging cached content into the realtime base: the effective paint
    /// alpha is `fade * 0.35 + 0.05` for fades below 1.0 and a plain paint
    /// otherwise.
    pub fn copy_from_faded(&mut self, source: &Surface, dx: i64, dy: i64, fade: f64) {
        if fade < 1.0 {
            self.copy_from(source, dx, dy, fade * 0.35 + 0.05);
        } else {
            self.copy_from(source, dx, dy, 1.0);
        }
    }
}

fn normalize_span(start: i64, extent: i64) -> (i64, i64) {
    if extent < 0 {
        (start + extent, -extent)
    } else {
        (start, extent)
    }
}

/// Src-over for straight-alpha pixels, with a global alpha factor on the source.
fn blend_over(dst: [f32; 4], src: [f32; 4], global_alpha: f32) -> [f32; 4] {
    let sa = src[3] * global_alpha;
    if sa <= 0.0 {
        return dst;
    }
    if sa >= 1.0 {
        return [src[0], src[1], src[2], 1.0];
    }
    let da = dst[3];
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0.0; 4];
    }
    let blend = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    [
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        out_a,
    ]
}

#[cfg(test)]
mod tests {
    use super::{Color, Surface};

    #[test]
    fn new_surface_is_transparent() {
        let surface = Surface::new(4, 3).expect("alloc");
        assert_eq!(surface.size(), (4, 3));
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(3, 2), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn fill_then_clear_round_trips() {
        let mut surface = Surface::new(2, 2).expect("alloc");
        surface.fill(Color::rgb(0.5, 0.25, 0.125));
        assert_eq!(surface.pixel(1, 1), Some(Color::rgb(0.5, 0.25, 0.125)));
        surface.clear();
        assert_eq!(surface.pixel(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn opaque_blend_replaces_destination() {
        let mut surface = Surface::new(1, 1).expect("alloc");
        surface.fill(Color::rgb(1.0, 0.0, 0.0));
        surface.blend_pixel(0, 0, Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(surface.pixel(0, 0), Some(Color::rgb(0.0, 1.0, 0.0)));
    }

    #[test]
    fn fill_rect_clips_and_accepts_negative_extents() {
        let mut surface = Surface::new(4, 4).expect("alloc");
        surface.fill_rect(3, 3, -2, -2, Color::rgb(0.0, 0.0, 1.0));
        // covers (1..3) x (1..3)
        assert_eq!(surface.pixel(1, 1), Some(Color::rgb(0.0, 0.0, 1.0)));
        assert_eq!(surface.pixel(2, 2), Some(Color::rgb(0.0, 0.0, 1.0)));
        assert_eq!(surface.pixel(3, 3), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn copy_from_offsets_source() {
        let mut src = Surface::new(2, 2).expect("alloc");
        src.fill(Color::rgb(1.0, 1.0, 1.0));
        let mut dst = Surface::new(4, 4).expect("alloc");
        dst.copy_from(&src, 2, 1, 1.0);
        assert_eq!(dst.pixel(2, 1), Some(Color::rgb(1.0, 1.0, 1.0)));
        assert_eq!(dst.pixel(3, 2), Some(Color::rgb(1.0, 1.0, 1.0)));
        assert_eq!(dst.pixel(1, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn full_fade_is_a_plain_paint() {
        let mut src = Surface::new(1, 1).expect("alloc");
        src.fill(Color::rgb(0.2, 0.4, 0.6));
        let mut plain = Surface::new(1, 1).expect("alloc");
        plain.copy_from(&src, 0, 0, 1.0);
        let mut faded = Surface::new(1, 1).expect("alloc");
        faded.copy_from_faded(&src, 0, 0, 1.0);
        assert_eq!(plain, faded);
    }

    #[test]
    fn partial_fade_scales_source_alpha() {
        let mut src = Surface::new(1, 1).expect("alloc");
        src.fill(Color::rgb(1.0, 1.0, 1.0));
        let mut dst = Surface::new(1, 1).expect("alloc");
        dst.fill(Color::rgb(0.0, 0.0, 0.0));
        // fade 0.0 => paint alpha 0.05
        dst.copy_from_faded(&src, 0, 0, 0.0);
        let px = dst.pixel(0, 0).expect("pixel");
        assert!(px.red > 0.0 && px.red < 0.1);
        assert_eq!(px.alpha, 1.0);
    }
}
