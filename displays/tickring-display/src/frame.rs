//! Page-organized 1-bit frame buffer
//!
//! The layout matches SH1106/SSD1306 controllers: the 64 rows are split
//! into 8 pages of 8 rows, and each byte holds one column of a page with
//! the top row in bit 0. A page can be written to the panel as-is.

use heapless::Vec;
use tickring_core::geometry::{Point, Rect, Size};

use crate::backend::{Color, DisplayBackend, DisplayError};

pub const FRAME_WIDTH: usize = 128;
pub const FRAME_HEIGHT: usize = 64;
pub const FRAME_PAGES: usize = FRAME_HEIGHT / 8;

/// Most vertices `fill_polygon` accepts
pub const MAX_POLYGON_POINTS: usize = 16;

/// In-memory frame for a 128x64 monochrome panel
#[derive(Clone)]
pub struct FrameBuffer {
    pages: [[u8; FRAME_WIDTH]; FRAME_PAGES],
    /// Set on every draw, cleared once the frame was flushed
    dirty: bool,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; FRAME_WIDTH]; FRAME_PAGES],
            dirty: true,
        }
    }

    /// Raw page data, ready to stream to the panel
    pub fn pages(&self) -> &[[u8; FRAME_WIDTH]; FRAME_PAGES] {
        &self.pages
    }

    /// Check if the frame changed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark frame as clean (after flushing)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Read a pixel; anything off-screen reads as black
    pub fn pixel(&self, x: i16, y: i16) -> Color {
        if !Self::on_screen(x, y) {
            return Color::Black;
        }
        let (x, y) = (x as usize, y as usize);
        if self.pages[y / 8][x] & (1 << (y % 8)) != 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Write a pixel; off-screen writes are ignored
    pub fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
        if !Self::on_screen(x, y) {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let mask = 1 << (y % 8);
        match color {
            Color::White => self.pages[y / 8][x] |= mask,
            Color::Black => self.pages[y / 8][x] &= !mask,
        }
        self.dirty = true;
    }

    /// Number of lit pixels inside `rect`
    pub fn count_lit(&self, rect: Rect) -> usize {
        let area = rect.intersect(&self.bounds());
        let mut lit = 0;
        for y in area.origin.y..area.bottom() {
            for x in area.origin.x..area.right() {
                if self.pixel(x, y) == Color::White {
                    lit += 1;
                }
            }
        }
        lit
    }

    fn on_screen(x: i16, y: i16) -> bool {
        x >= 0 && y >= 0 && (x as usize) < FRAME_WIDTH && (y as usize) < FRAME_HEIGHT
    }

    /// Fill `[x0, x1)` on row `y`, clipped to the frame
    fn fill_span(&mut self, y: i16, x0: i32, x1: i32, color: Color) {
        let x0 = x0.max(0);
        let x1 = x1.min(FRAME_WIDTH as i32);
        for x in x0..x1 {
            self.set_pixel(x as i16, y, color);
        }
    }
}

impl DisplayBackend for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(FRAME_WIDTH as i16, FRAME_HEIGHT as i16)
    }

    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        let fill = match color {
            Color::White => 0xFF,
            Color::Black => 0x00,
        };
        for page in self.pages.iter_mut() {
            page.fill(fill);
        }
        self.dirty = true;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError> {
        let area = rect.intersect(&self.bounds());
        for y in area.origin.y..area.bottom() {
            self.fill_span(y, area.origin.x as i32, area.right() as i32, color);
        }
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<(), DisplayError> {
        if points.len() > MAX_POLYGON_POINTS {
            return Err(DisplayError::BufferOverflow);
        }
        if points.len() < 3 {
            return Ok(());
        }

        let top = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let bottom = points
            .iter()
            .map(|p| p.y)
            .max()
            .unwrap_or(0)
            .min(FRAME_HEIGHT as i16 - 1);

        // Scanlines sample pixel centers; coordinates are doubled so the
        // half-pixel offset stays integral.
        for y in top..=bottom {
            let yc2 = 2 * y as i32 + 1;
            let mut crossings: Vec<i32, MAX_POLYGON_POINTS> = Vec::new();

            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay2, by2) = (2 * a.y as i32, 2 * b.y as i32);
                if (ay2 < yc2) == (by2 < yc2) {
                    continue;
                }
                let dx = b.x as i32 - a.x as i32;
                let dy = b.y as i32 - a.y as i32;
                let x2 = 2 * a.x as i32 + (yc2 - ay2) * dx / dy;
                crossings
                    .push(x2)
                    .map_err(|_| DisplayError::BufferOverflow)?;
            }

            crossings.sort_unstable();
            for pair in crossings.chunks_exact(2) {
                // A pixel is inside when its center 2x+1 is in [start, end)
                self.fill_span(y, pair[0].div_euclid(2), pair[1].div_euclid(2), color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(frame: &FrameBuffer) -> usize {
        frame.count_lit(frame.bounds())
    }

    #[test]
    fn test_new_frame_is_black_and_dirty() {
        let frame = FrameBuffer::new();
        assert_eq!(lit(&frame), 0);
        assert!(frame.is_dirty());
    }

    #[test]
    fn test_pixel_page_layout() {
        let mut frame = FrameBuffer::new();
        frame.set_pixel(5, 9, Color::White);
        // Row 9 lives in page 1, bit 1
        assert_eq!(frame.pages()[1][5], 0b0000_0010);
        assert_eq!(frame.pixel(5, 9), Color::White);

        frame.set_pixel(5, 9, Color::Black);
        assert_eq!(frame.pages()[1][5], 0);
    }

    #[test]
    fn test_off_screen_pixels_ignored() {
        let mut frame = FrameBuffer::new();
        frame.mark_clean();
        frame.set_pixel(-1, 0, Color::White);
        frame.set_pixel(0, 64, Color::White);
        frame.set_pixel(128, 10, Color::White);
        assert_eq!(lit(&frame), 0);
        assert!(!frame.is_dirty());
    }

    #[test]
    fn test_clear_white_fills_every_page() {
        let mut frame = FrameBuffer::new();
        frame.clear(Color::White).unwrap();
        assert_eq!(lit(&frame), FRAME_WIDTH * FRAME_HEIGHT);
        assert!(frame.pages().iter().all(|page| page.iter().all(|&b| b == 0xFF)));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut frame = FrameBuffer::new();
        frame.fill_rect(Rect::new(-10, -10, 20, 20), Color::White).unwrap();
        assert_eq!(lit(&frame), 100);
        assert_eq!(frame.pixel(9, 9), Color::White);
        assert_eq!(frame.pixel(10, 10), Color::Black);

        frame.fill_rect(Rect::new(2, 2, 2, 2), Color::Black).unwrap();
        assert_eq!(lit(&frame), 96);
    }

    #[test]
    fn test_polygon_square_matches_rect() {
        let mut frame = FrameBuffer::new();
        let square = [
            Point::new(10, 10),
            Point::new(20, 10),
            Point::new(20, 20),
            Point::new(10, 20),
        ];
        frame.fill_polygon(&square, Color::White).unwrap();
        assert_eq!(lit(&frame), 100);
        assert_eq!(frame.count_lit(Rect::new(10, 10, 10, 10)), 100);
    }

    #[test]
    fn test_polygon_triangle() {
        let mut frame = FrameBuffer::new();
        let triangle = [Point::new(0, 0), Point::new(20, 0), Point::new(0, 20)];
        frame.fill_polygon(&triangle, Color::White).unwrap();

        assert_eq!(frame.pixel(2, 2), Color::White);
        assert_eq!(frame.pixel(0, 18), Color::White);
        assert_eq!(frame.pixel(15, 15), Color::Black);
        assert_eq!(frame.pixel(25, 5), Color::Black);
    }

    #[test]
    fn test_polygon_larger_than_screen_clips() {
        let mut frame = FrameBuffer::new();
        let huge = [
            Point::new(-500, -500),
            Point::new(500, -500),
            Point::new(500, 500),
            Point::new(-500, 500),
        ];
        frame.fill_polygon(&huge, Color::White).unwrap();
        assert_eq!(lit(&frame), FRAME_WIDTH * FRAME_HEIGHT);
    }

    #[test]
    fn test_degenerate_and_oversized_polygons() {
        let mut frame = FrameBuffer::new();
        let line = [Point::new(0, 0), Point::new(10, 10)];
        assert_eq!(frame.fill_polygon(&line, Color::White), Ok(()));
        assert_eq!(lit(&frame), 0);

        let many = [Point::new(0, 0); MAX_POLYGON_POINTS + 1];
        assert_eq!(
            frame.fill_polygon(&many, Color::White),
            Err(DisplayError::BufferOverflow)
        );
    }
}
