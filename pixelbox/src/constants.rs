/*!
Simulation and conversion constants.

These centralize the parameters shared by the coordinate conversions, the
world stepper, and the shape constructors. Keeping them together makes
tuning easier and keeps pixel/meter conversions consistent everywhere.

Notes
- Pixel distances are `f32`; physical distances are meters.
- The fixed timestep pairs with `TARGET_FPS`; vary one, vary the other.
*/

/// Pixels per meter. Every pixel-space quantity entering the engine is
/// divided by this; every engine quantity leaving it is multiplied.
pub const PPM: f32 = 20.0;

/// Default drawing surface width in pixels.
pub const SCREEN_WIDTH: f32 = 640.0;

/// Default drawing surface height in pixels.
///
/// The y-flip between screen space (y-down) and physics space (y-up) is
/// anchored on the surface height, so a [`crate::world::PixelWorld`] must be
/// told the real height if it differs from this default.
pub const SCREEN_HEIGHT: f32 = 480.0;

/// Target simulation rate in frames per second.
pub const TARGET_FPS: f32 = 60.0;

/// Fixed timestep fed to the engine on every [`crate::world::PixelWorld::step`].
/// It is generally best to keep the timestep and iteration count fixed.
pub const TIME_STEP: f32 = 1.0 / TARGET_FPS;

/// Solver iterations per step. Higher values improve stacking stability at
/// the cost of more work per step.
pub const SOLVER_ITERATIONS: usize = 10;

/// Thickness, in pixels, of the quadrilateral standing in for a dynamic
/// line. The engine has no mass-bearing zero-thickness shape, so dynamic
/// lines are built as a quad this tall through both endpoints.
pub const DYNAMIC_LINE_THICKNESS: f32 = 1.0;
