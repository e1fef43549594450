//! Display backend trait
//!
//! Defines the interface the face renderer draws through.

use tickring_core::geometry::{Point, Rect, Size};

/// Pixel color on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off
    Black,
    /// Pixel lit
    White,
}

impl Color {
    /// The other color
    pub const fn invert(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for filling shapes. Shapes may
/// extend past the display edges; implementations clip them.
pub trait DisplayBackend {
    /// Get the display dimensions in pixels
    fn size(&self) -> Size;

    /// Fill the entire display with `color`
    fn clear(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError>;

    /// Fill a closed polygon using the even-odd rule
    ///
    /// Fewer than three points draws nothing.
    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<(), DisplayError>;

    /// Full display rectangle
    fn bounds(&self) -> Rect {
        let size = self.size();
        Rect::new(0, 0, size.w, size.h)
    }
}
