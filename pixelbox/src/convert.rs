/*!
Pixel-space ↔ physics-space conversions.

The drawing surface has its origin at the top-left with y increasing
downward; the engine has y increasing upward and measures in meters. Every
position and velocity crossing the facade boundary passes through here.

# Composition order

The flip and the scale do not commute for positions: pixel→physics is flip
**then** scale, physics→pixel is scale **then** flip. Composing them the
other way skews every round-trip by `screen_height * (1 - 1/PPM)`.
Velocities are vectors, not anchored to the origin, so their flip is a pure
sign change with no translation term and no ordering concern.

All functions are pure and deterministic.
*/

use nalgebra as na;

use crate::constants::PPM;

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Point2 = na::Point2<f32>;
pub type Iso2 = na::Isometry2<f32>;

/// Convert a pixel distance to meters.
#[inline]
pub fn to_physical(pixels: f32) -> f32 {
    pixels / PPM
}

/// Convert a distance in meters to pixels.
#[inline]
pub fn to_pixels(meters: f32) -> f32 {
    meters * PPM
}

/// Componentwise pixel→meter conversion.
#[inline]
pub fn to_physical_v(v: Vec2) -> Vec2 {
    v / PPM
}

/// Componentwise meter→pixel conversion.
#[inline]
pub fn to_pixels_v(v: Vec2) -> Vec2 {
    v * PPM
}

/// Mirror a position across the horizontal midline of a surface
/// `screen_height` units tall. Involutive: applying it twice with the same
/// height returns the input.
#[inline]
pub fn flip_y_position(p: Vec2, screen_height: f32) -> Vec2 {
    Vec2::new(p.x, screen_height - p.y)
}

/// Mirror a velocity between y-down and y-up conventions.
#[inline]
pub fn flip_y_velocity(v: Vec2) -> Vec2 {
    Vec2::new(v.x, -v.y)
}

/// Pixel-space position (y-down, pixels) → physics position (y-up, meters).
#[inline]
pub fn position_to_physics(p: Vec2, screen_height: f32) -> Vec2 {
    to_physical_v(flip_y_position(p, screen_height))
}

/// Physics position (y-up, meters) → pixel-space position (y-down, pixels).
#[inline]
pub fn position_to_pixels(p: Vec2, screen_height: f32) -> Vec2 {
    flip_y_position(to_pixels_v(p), screen_height)
}

/// Pixel-space velocity (pixels/second, y-down) → physics velocity (m/s, y-up).
#[inline]
pub fn velocity_to_physics(v: Vec2) -> Vec2 {
    to_physical_v(flip_y_velocity(v))
}

/// Physics velocity (m/s, y-up) → pixel-space velocity (pixels/second, y-down).
#[inline]
pub fn velocity_to_pixels(v: Vec2) -> Vec2 {
    to_pixels_v(flip_y_velocity(v))
}
