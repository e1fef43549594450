//! Seven-segment time digits
//!
//! The time is drawn from filled rectangles only, so no font data is
//! needed and the digits scale to whatever frame the face gives them.
//! A digit cell is three units wide and a colon one unit.

use heapless::Vec;
use tickring_core::geometry::Rect;
use tickring_core::state::ControlMode;
use tickring_core::timer::TimeParts;

use crate::backend::{Color, DisplayBackend, DisplayError};

/// Lit segments per digit, bit 0 = a (top) through bit 6 = g (middle)
pub const SEGMENTS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

/// Part of the time string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    /// Field being edited in `mode`, if any
    pub fn for_mode(mode: ControlMode) -> Option<Field> {
        match mode {
            ControlMode::EditHours => Some(Field::Hours),
            ControlMode::EditMinutes => Some(Field::Minutes),
            ControlMode::EditSeconds => Some(Field::Seconds),
            ControlMode::Counting => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Glyph {
    Digit(u8, Field),
    Colon,
}

/// Longest string: five hour digits, two colons, four digits
const MAX_GLYPHS: usize = 11;

/// Build "H:MM:SS", or "MM:SS" when there are no hours
fn glyphs(parts: TimeParts) -> Vec<Glyph, MAX_GLYPHS> {
    let mut out = Vec::new();
    if parts.hours > 0 {
        let mut hours: Vec<u8, 5> = Vec::new();
        let mut h = parts.hours;
        while h > 0 {
            let _ = hours.push((h % 10) as u8);
            h /= 10;
        }
        for &d in hours.iter().rev() {
            let _ = out.push(Glyph::Digit(d, Field::Hours));
        }
        let _ = out.push(Glyph::Colon);
    }
    let _ = out.push(Glyph::Digit(parts.minutes / 10, Field::Minutes));
    let _ = out.push(Glyph::Digit(parts.minutes % 10, Field::Minutes));
    let _ = out.push(Glyph::Colon);
    let _ = out.push(Glyph::Digit(parts.seconds / 10, Field::Seconds));
    let _ = out.push(Glyph::Digit(parts.seconds % 10, Field::Seconds));
    out
}

/// Draw `parts` centered in `frame`, underlining the `highlight` field
///
/// Draws nothing if the frame is too small to hold the string.
pub fn draw_time<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    frame: Rect,
    parts: TimeParts,
    highlight: Option<Field>,
    color: Color,
) -> Result<(), DisplayError> {
    let glyphs = glyphs(parts);
    let units: i16 = glyphs
        .iter()
        .map(|g| match g {
            Glyph::Digit(..) => 3,
            Glyph::Colon => 1,
        })
        .sum();

    let unit = frame.size.w / units;
    let thickness = (unit / 2).max(1);
    let glyph_h = frame.size.h - 2 * thickness;
    if unit < 2 || glyph_h < 3 * thickness {
        return Ok(());
    }

    let mut x = frame.origin.x + (frame.size.w - unit * units) / 2;
    let y = frame.origin.y;
    let mut underline: Option<(i16, i16)> = None;

    for glyph in glyphs.iter() {
        match *glyph {
            Glyph::Digit(digit, field) => {
                let width = 3 * unit - thickness;
                let cell = Rect::new(x, y, width, glyph_h);
                draw_digit(backend, cell, digit, thickness, color)?;

                if highlight == Some(field) {
                    let start = underline.map_or(x, |(start, _)| start);
                    underline = Some((start, x + width));
                }
                x += 3 * unit;
            }
            Glyph::Colon => {
                let dot_x = x + (unit - thickness) / 2 - thickness / 2;
                for row in [glyph_h / 3, 2 * glyph_h / 3] {
                    let dot = Rect::new(dot_x, y + row - thickness / 2, thickness, thickness);
                    backend.fill_rect(dot, color)?;
                }
                x += unit;
            }
        }
    }

    if let Some((start, end)) = underline {
        let bar = Rect::new(start, y + glyph_h + thickness, end - start, thickness);
        backend.fill_rect(bar, color)?;
    }
    Ok(())
}

/// Draw one digit into `cell` with segments `t` pixels thick
fn draw_digit<B: DisplayBackend + ?Sized>(
    backend: &mut B,
    cell: Rect,
    digit: u8,
    t: i16,
    color: Color,
) -> Result<(), DisplayError> {
    let mask = SEGMENTS[(digit % 10) as usize];
    let Rect { origin, size } = cell;
    let (x, y, w, h) = (origin.x, origin.y, size.w, size.h);
    let mid = y + h / 2 - t / 2;
    let upper = mid - (y + t);
    let lower = y + h - t - (mid + t);

    let segments = [
        Rect::new(x + t, y, w - 2 * t, t),         // a
        Rect::new(x + w - t, y + t, t, upper),     // b
        Rect::new(x + w - t, mid + t, t, lower),   // c
        Rect::new(x + t, y + h - t, w - 2 * t, t), // d
        Rect::new(x, mid + t, t, lower),           // e
        Rect::new(x, y + t, t, upper),             // f
        Rect::new(x + t, mid, w - 2 * t, t),       // g
    ];

    for (i, segment) in segments.iter().enumerate() {
        if mask & (1 << i) != 0 {
            backend.fill_rect(*segment, color)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameBuffer;

    const FRAME: Rect = Rect::new(10, 14, 108, 36);

    fn parts(hours: u16, minutes: u8, seconds: u8) -> TimeParts {
        TimeParts {
            hours,
            minutes,
            seconds,
        }
    }

    fn render(parts: TimeParts, highlight: Option<Field>) -> FrameBuffer {
        let mut frame = FrameBuffer::new();
        draw_time(&mut frame, FRAME, parts, highlight, Color::White).unwrap();
        frame
    }

    #[test]
    fn test_segment_counts() {
        let lit: [u32; 10] = [6, 2, 5, 5, 4, 5, 6, 3, 7, 6];
        for (digit, expected) in lit.iter().enumerate() {
            assert_eq!(SEGMENTS[digit].count_ones(), *expected, "digit {}", digit);
        }
    }

    #[test]
    fn test_layout_with_and_without_hours() {
        assert_eq!(glyphs(parts(0, 5, 7)).len(), 5);
        assert_eq!(glyphs(parts(1, 5, 7)).len(), 7);
        assert_eq!(glyphs(parts(12, 0, 0)).len(), 8);
        assert_eq!(glyphs(parts(u16::MAX, 59, 59)).len(), MAX_GLYPHS);
    }

    #[test]
    fn test_eights_light_more_than_ones() {
        let ones = render(parts(0, 11, 11), None);
        let eights = render(parts(0, 88, 88), None);
        assert!(eights.count_lit(FRAME) > ones.count_lit(FRAME));
    }

    #[test]
    fn test_drawing_stays_inside_frame() {
        let frame = render(parts(9, 59, 59), Some(Field::Hours));
        let total = frame.count_lit(frame_bounds());
        assert!(total > 0);
        assert_eq!(frame.count_lit(FRAME), total);
    }

    #[test]
    fn test_underline_only_for_present_field() {
        let plain = render(parts(0, 3, 4), None);
        let minutes = render(parts(0, 3, 4), Some(Field::Minutes));
        let hours = render(parts(0, 3, 4), Some(Field::Hours));

        assert!(minutes.count_lit(FRAME) > plain.count_lit(FRAME));
        // No hours are shown, so nothing to underline
        assert_eq!(hours.count_lit(FRAME), plain.count_lit(FRAME));
    }

    #[test]
    fn test_tiny_frame_draws_nothing() {
        let mut frame = FrameBuffer::new();
        draw_time(&mut frame, Rect::new(0, 0, 8, 4), parts(0, 1, 2), None, Color::White).unwrap();
        assert_eq!(frame.count_lit(frame_bounds()), 0);
    }

    #[test]
    fn test_field_for_mode() {
        assert_eq!(Field::for_mode(ControlMode::EditHours), Some(Field::Hours));
        assert_eq!(Field::for_mode(ControlMode::EditSeconds), Some(Field::Seconds));
        assert_eq!(Field::for_mode(ControlMode::Counting), None);
    }

    fn frame_bounds() -> Rect {
        Rect::new(0, 0, 128, 64)
    }
}
