/*!
The live-shape registry.

One registry tracks the shapes sharing one [`PixelWorld`]. It is the sole
authority for destruction: `delete` removes the shape from the tracked set
*before* destroying its body, and never destroys for an absent shape, so a
double delete can never double-free the engine resources.

Shapes are tracked by identity ([`ShapeId`]), not geometry; insertion order
is irrelevant and draw order is unspecified; don't lean on it for
z-ordering.
*/

use std::collections::HashMap;

use crate::draw::Surface;
use crate::shape::{Shape, ShapeId};
use crate::world::PixelWorld;

/// Tracked set of live shapes for one world.
#[derive(Default)]
pub struct ShapeRegistry {
    shapes: HashMap<ShapeId, Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a shape. Re-adding a shape already present is a no-op.
    pub fn add(&mut self, shape: &Shape) {
        self.shapes.entry(shape.id()).or_insert_with(|| shape.clone());
    }

    /// Track a batch of shapes.
    pub fn add_all<'a>(&mut self, shapes: impl IntoIterator<Item = &'a Shape>) {
        for shape in shapes {
            self.add(shape);
        }
    }

    /// Stop tracking a shape and destroy its body in the world.
    ///
    /// Idempotent: deleting a shape that is not tracked (never added, or
    /// already deleted) does nothing. In particular it never reaches the
    /// engine a second time.
    pub fn delete(&mut self, world: &mut PixelWorld, shape: &Shape) {
        match self.shapes.remove(&shape.id()) {
            Some(tracked) => world.destroy_shape(tracked.id(), tracked.body_handle()),
            None => log::debug!("ignoring delete of untracked shape {:?}", shape.id()),
        }
    }

    /// Number of tracked shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Is this shape currently tracked?
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Look up a tracked shape by identity, e.g. from a contact event.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Draw every tracked shape, in unspecified order.
    pub fn draw_all(&self, world: &PixelWorld, surface: &mut dyn Surface) {
        for shape in self.shapes.values() {
            shape.draw(world, surface);
        }
    }
}
