/*!
Drawing-surface boundary.

Rendering is an external collaborator: the facade only needs a target that
accepts filled circles, filled polygons, and line segments in pixel
coordinates, plus a double-buffer flip. Shapes hand this trait vertices
that are already transformed into screen space (y-down, pixels); no
implementation of it should do coordinate math.
*/

use crate::convert::Point2;

/// An RGBA display color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// A pixel-space drawing target with a double-buffer flip.
///
/// All coordinates are screen-space pixels (top-left origin, y-down).
pub trait Surface {
    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Color);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point2, radius: f32, color: Color);

    /// Draw a filled polygon from its vertices in order.
    fn fill_polygon(&mut self, vertices: &[Point2], color: Color);

    /// Draw a line segment `width` pixels thick.
    fn line(&mut self, a: Point2, b: Point2, width: f32, color: Color);

    /// Flip the back buffer onto the display.
    fn present(&mut self);
}
