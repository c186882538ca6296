//! Cairo presentation backend.
//!
//! The engine composites into plain pixel surfaces; this module uploads the
//! finished window surface to Cairo, either as an offscreen `ImageSurface`
//! or painted straight onto an external context (for example a GTK
//! `DrawingArea` callback).

use cairo::{Context, Format, ImageSurface};

use crate::error::{GraphError, GraphResult};
use crate::render::Surface;

/// Converts a composited surface into a premultiplied ARGB32 image surface.
pub fn to_image_surface(surface: &Surface) -> GraphResult<ImageSurface> {
    let width = i32::try_from(surface.width())
        .map_err(|_| GraphError::InvalidData("surface too wide for cairo".to_owned()))?;
    let height = i32::try_from(surface.height())
        .map_err(|_| GraphError::InvalidData("surface too tall for cairo".to_owned()))?;

    let stride = Format::ARgb32
        .stride_for_width(surface.width())
        .map_err(|err| map_backend_error("unsupported cairo stride", err))?;
    let mut data = vec![0u8; stride as usize * height as usize];

    for y in 0..surface.height() {
        let row = &mut data[y as usize * stride as usize..];
        for x in 0..surface.width() {
            let Some(color) = surface.pixel(x, y) else {
                continue;
            };
            let packed = pack_argb32(color.red, color.green, color.blue, color.alpha);
            row[x as usize * 4..x as usize * 4 + 4].copy_from_slice(&packed.to_ne_bytes());
        }
    }

    ImageSurface::create_for_data(data, Format::ARgb32, width, height, stride)
        .map_err(|err| map_backend_error("failed to create cairo image surface", err))
}

/// Paints the composited surface onto an external Cairo context at the
/// origin.
pub fn present_on_context(context: &Context, surface: &Surface) -> GraphResult<()> {
    let image = to_image_surface(surface)?;
    context
        .set_source_surface(&image, 0.0, 0.0)
        .map_err(|err| map_backend_error("failed to set cairo source", err))?;
    context
        .paint()
        .map_err(|err| map_backend_error("failed to paint cairo surface", err))
}

// Cairo's ARGB32 is premultiplied, native-endian.
fn pack_argb32(red: f64, green: f64, blue: f64, alpha: f64) -> u32 {
    let channel = |value: f64| (value.clamp(0.0, 1.0) * alpha.clamp(0.0, 1.0) * 255.0) as u32;
    let a = (alpha.clamp(0.0, 1.0) * 255.0) as u32;
    (a << 24) | (channel(red) << 16) | (channel(green) << 8) | channel(blue)
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> GraphError {
    GraphError::InvalidData(format!("{prefix}: {err}"))
}
