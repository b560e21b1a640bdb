/*!
Pixel-space facade over the rapier2d rigid-body engine.

Simulations place, move, query, and render physics bodies using screen
coordinates (top-left origin, y-down, pixels) while the engine runs in
meters with y-up and center-of-mass positions. The facade performs the
flip/scale conversion on every read and write, classifies bodies as
static/kinematic/dynamic, manages collision filtering, and tracks shape
lifecycle so a deleted shape's engine resources are released exactly once.

A control loop typically: polls input into an [`InputState`], mutates
shapes, calls [`PixelWorld::step`] once, then draws via
[`ShapeRegistry::draw_all`] onto any [`Surface`] implementation.
*/

pub mod constants;
pub mod convert;
pub mod draw;
pub mod error;
pub mod groups;
pub mod input;
pub mod registry;
pub mod shape;
pub mod world;

// Re-export rapier so downstream code can reach engine types (e.g. gravity
// vectors, body handles) without depending on `rapier2d` directly.
pub use rapier2d;

pub use constants::{PPM, SCREEN_HEIGHT, SCREEN_WIDTH, TARGET_FPS, TIME_STEP};
pub use convert::{Point2, Vec2};
pub use draw::{Color, Surface};
pub use error::ShapeError;
pub use groups::{CollisionGroup, GroupMask};
pub use input::InputState;
pub use registry::ShapeRegistry;
pub use shape::{BodyClass, Geometry, Material, Shape, ShapeId};
pub use world::{ContactEvent, PixelWorld};
