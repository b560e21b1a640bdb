/*!
Input-collaborator state tracking.

The control loop polls a windowing backend once per iteration and feeds
key/mouse transitions in here; simulation code then asks about state
without caring which backend produced it. Key codes are opaque `u32`s,
whatever the backend uses.

"Down" persists across frames; "pressed" and "released" are transitions
that live for exactly one frame and are cleared by
[`InputState::begin_frame`], as is the mouse's relative motion.
*/

use std::collections::HashSet;

use crate::convert::Vec2;

/// Per-frame keyboard and mouse state.
#[derive(Default, Debug)]
pub struct InputState {
    down: HashSet<u32>,
    pressed: HashSet<u32>,
    released: HashSet<u32>,
    mouse_position: Vec2,
    mouse_relative: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the one-frame transition state. Call at the top of every loop
    /// iteration, before feeding this frame's events.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.mouse_relative = Vec2::zeros();
    }

    /// Record a key-down event.
    pub fn mark_pressed(&mut self, key: u32) {
        self.down.insert(key);
        self.pressed.insert(key);
    }

    /// Record a key-up event.
    pub fn mark_released(&mut self, key: u32) {
        self.down.remove(&key);
        self.released.insert(key);
    }

    /// Record the mouse position (pixels) and accumulate relative motion.
    pub fn mark_mouse(&mut self, position: Vec2, relative: Vec2) {
        self.mouse_position = position;
        self.mouse_relative += relative;
    }

    /// Is the key currently held?
    pub fn is_key_down(&self, key: u32) -> bool {
        self.down.contains(&key)
    }

    /// Did the key go down this frame?
    pub fn is_key_pressed(&self, key: u32) -> bool {
        self.pressed.contains(&key)
    }

    /// Did the key come up this frame?
    pub fn is_key_released(&self, key: u32) -> bool {
        self.released.contains(&key)
    }

    /// Latest mouse position in pixel coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Mouse motion accumulated since [`begin_frame`](Self::begin_frame),
    /// in pixels. Multiply by the frame rate for a pixels-per-second
    /// velocity, e.g. to fling a cursor-tracking shape.
    pub fn mouse_relative(&self) -> Vec2 {
        self.mouse_relative
    }

    /// `+1`/`-1`/`0` axis helper: `positive` minus `negative`, as held.
    pub fn axis(&self, negative: u32, positive: u32) -> f32 {
        (self.is_key_down(positive) as i8 - self.is_key_down(negative) as i8) as f32
    }
}
