//! Built-in 5x7 glyph raster for legends and crosshair labels.
//!
//! Labels need exact, deterministic extents so their background patches
//! (blitted from the background surface) stay pixel-reproducible without a
//! system font stack. The glyph set covers digits, common punctuation and
//! the letters appearing in typical axis legends (Hz, dB, kHz, ms, q, L/R);
//! anything else renders as a hollow box.

use super::{Color, Surface};

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal pen advance per glyph (one column of spacing).
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Extents of a single line of text; (0, 0) for an empty line.
#[must_use]
pub fn line_extents(line: &str) -> (u32, u32) {
    let count = line.chars().count() as u32;
    if count == 0 {
        return (0, 0);
    }
    (count * GLYPH_ADVANCE - 1, GLYPH_HEIGHT)
}

/// Draws one line of text with its top-left cell corner at (x, y).
pub fn draw_line(surface: &mut Surface, x: i64, y: i64, line: &str, color: Color) {
    let mut pen_x = x;
    for ch in line.chars() {
        let rows = glyph(ch);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    surface.blend_pixel(pen_x + i64::from(col), y + row as i64, color);
                }
            }
        }
        pen_x += i64::from(GLYPH_ADVANCE);
    }
}

#[rustfmt::skip]
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        ' ' => [0, 0, 0, 0, 0, 0, 0],
        '.' => [0, 0, 0, 0, 0, 0b00100, 0b00100],
        ',' => [0, 0, 0, 0, 0, 0b00100, 0b01000],
        '-' => [0, 0, 0, 0b01110, 0, 0, 0],
        '+' => [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0],
        ':' => [0, 0b00100, 0b00100, 0, 0b00100, 0b00100, 0],
        '%' => [0b11001, 0b11010, 0b00010, 0b00100, 0b01000, 0b01011, 0b10011],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'a' => [0, 0, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'c' => [0, 0, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'd' => [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10011, 0b01101],
        'e' => [0, 0, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'f' => [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000],
        'g' => [0, 0, 0b01111, 0b10001, 0b01111, 0b00001, 0b01110],
        'i' => [0b00100, 0, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'k' => [0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010],
        'm' => [0, 0, 0b11010, 0b10101, 0b10101, 0b10101, 0b10101],
        'n' => [0, 0, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'o' => [0, 0, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        's' => [0, 0, 0b01111, 0b10000, 0b01110, 0b00001, 0b11110],
        't' => [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        'u' => [0, 0, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101],
        'z' => [0, 0, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[cfg(test)]
mod tests {
    use super::{GLYPH_HEIGHT, draw_line, line_extents};
    use crate::render::{Color, Surface};

    #[test]
    fn extents_count_glyph_advances() {
        assert_eq!(line_extents(""), (0, 0));
        assert_eq!(line_extents("1"), (5, GLYPH_HEIGHT));
        assert_eq!(line_extents("20 Hz"), (29, GLYPH_HEIGHT));
    }

    #[test]
    fn drawing_stays_inside_the_glyph_cell() {
        let mut surface = Surface::new(12, 10).expect("alloc");
        draw_line(&mut surface, 2, 1, "1", Color::rgb(0.0, 0.0, 0.0));
        // nothing outside the 5x7 cell rooted at (2, 1)
        for y in 0..10 {
            for x in 0..12 {
                let inside = (2..7).contains(&x) && (1..8).contains(&y);
                if !inside {
                    assert_eq!(surface.pixel(x, y), Some(Color::TRANSPARENT));
                }
            }
        }
        // the digit stem is present
        assert_eq!(surface.pixel(4, 3), Some(Color::rgb(0.0, 0.0, 0.0)));
    }
}
