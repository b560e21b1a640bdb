/*!
Engine ownership and stepping.

[`PixelWorld`] owns every rapier structure for one simulation: the body and
collider sets, the broad/narrow phases, and the solver pipelines. Shapes
hold handles into it; the registry is the only caller of
[`PixelWorld::destroy_shape`].

Conventions
- Gravity is in engine units (m/s², y-up), exactly as the engine takes it.
- `step()` always advances the fixed [`TIME_STEP`](crate::constants::TIME_STEP);
  callers drive the pacing.
- Collision events are collected during the step and exposed afterwards as
  [`ContactEvent`]s carrying the shape identities recovered from collider
  user data.
*/

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use rapier2d::prelude::*;

use crate::constants::{SOLVER_ITERATIONS, TIME_STEP};
use crate::convert::Vec2;
use crate::shape::ShapeId;

/// A contact transition reported by the engine for one step.
///
/// `touching == true` means the pair started touching during the step;
/// `false` means an existing contact ended. The identities are recovered
/// from the colliders' user data, so gameplay logic can match them against
/// the shapes it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: ShapeId,
    pub b: ShapeId,
    pub touching: bool,
}

impl ContactEvent {
    /// Does this event involve the given pair, in either order?
    #[inline]
    pub fn involves_pair(&self, x: ShapeId, y: ShapeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// Event sink handed to the engine during a step.
///
/// The engine may invoke handlers from its internal parallelism, so the
/// buffer sits behind a mutex even though this facade itself is
/// single-threaded.
#[derive(Default)]
struct CollisionChannel {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionChannel {
    fn drain(&self) -> Vec<CollisionEvent> {
        std::mem::take(&mut *self.events.lock().expect("collision channel poisoned"))
    }
}

impl EventHandler for CollisionChannel {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.events
            .lock()
            .expect("collision channel poisoned")
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Force thresholds are never requested, so this cannot fire.
    }
}

/// The shared physics world all shapes are created into.
pub struct PixelWorld {
    gravity: Vector<Real>,
    screen_height: f32,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    channel: CollisionChannel,
    frame_events: Vec<ContactEvent>,
    touching: HashSet<(ShapeId, ShapeId)>,
    next_id: u64,
}

impl PixelWorld {
    /// Create a world with the given gravity (m/s², y-up) for a drawing
    /// surface `screen_height` pixels tall.
    ///
    /// The screen height anchors the y-flip on every position crossing the
    /// facade boundary, so it must match the surface the shapes are drawn
    /// to. [`SCREEN_HEIGHT`](crate::constants::SCREEN_HEIGHT) is the usual
    /// value.
    pub fn new(gravity: Vec2, screen_height: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: TIME_STEP,
            num_solver_iterations: NonZeroUsize::new(SOLVER_ITERATIONS)
                .unwrap_or(NonZeroUsize::MIN)
                .get(),
            ..IntegrationParameters::default()
        };

        Self {
            gravity,
            screen_height,
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            channel: CollisionChannel::default(),
            frame_events: Vec::new(),
            touching: HashSet::new(),
            next_id: 0,
        }
    }

    /// Height of the target surface in pixels.
    #[inline]
    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    /// Number of live rigid bodies.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance the simulation by exactly one fixed timestep.
    ///
    /// All shape mutation happens between calls; nothing here suspends.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &self.channel,
        );

        self.frame_events.clear();
        for event in self.channel.drain() {
            let (h1, h2, touching) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };

            // Resolve collider handles back to shape identities. A handle
            // that no longer resolves belongs to a shape deleted mid-frame;
            // its pairs were already purged at destruction.
            let (Some(a), Some(b)) = (self.shape_id_of(h1), self.shape_id_of(h2)) else {
                continue;
            };

            let key = ordered(a, b);
            if touching {
                self.touching.insert(key);
            } else {
                self.touching.remove(&key);
            }
            self.frame_events.push(ContactEvent { a, b, touching });
        }
    }

    /// Contact transitions observed during the most recent [`step`](Self::step).
    #[inline]
    pub fn contact_events(&self) -> &[ContactEvent] {
        &self.frame_events
    }

    /// Pairs of shapes currently in touching contact.
    pub fn touching_pairs(&self) -> impl Iterator<Item = (ShapeId, ShapeId)> + '_ {
        self.touching.iter().copied()
    }

    /// Are these two shapes currently touching (in either order)?
    #[inline]
    pub fn pair_touching(&self, a: ShapeId, b: ShapeId) -> bool {
        self.touching.contains(&ordered(a, b))
    }

    /// Reserve the identity for a shape about to be created.
    pub(crate) fn allocate_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a body with its collider attached, returning both handles.
    pub(crate) fn insert_body(
        &mut self,
        body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body_handle = self.bodies.insert(body);
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);
        log::debug!("created body {body_handle:?} with collider {collider_handle:?}");
        (body_handle, collider_handle)
    }

    /// Destroy a shape's body and everything attached to it.
    ///
    /// Only [`ShapeRegistry::delete`](crate::registry::ShapeRegistry::delete)
    /// calls this, after removing the shape from its tracked set, which is
    /// what makes deletion idempotent. The shape's pairs leave the touching
    /// set immediately so it stops participating in contact queries without
    /// waiting for the engine's removal events.
    pub(crate) fn destroy_shape(&mut self, id: ShapeId, body: RigidBodyHandle) {
        self.bodies.remove(
            body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.touching.retain(|&(a, b)| a != id && b != id);
        self.frame_events.retain(|e| e.a != id && e.b != id);
        log::debug!("destroyed body {body:?} for shape {id:?}");
    }

    fn shape_id_of(&self, handle: ColliderHandle) -> Option<ShapeId> {
        self.colliders
            .get(handle)
            .map(|c| ShapeId(c.user_data as u64))
    }

    pub(crate) fn body_ref(&self, handle: RigidBodyHandle) -> &RigidBody {
        self.bodies
            .get(handle)
            .expect("shape body accessed after deletion")
    }

    pub(crate) fn body_mut(&mut self, handle: RigidBodyHandle) -> &mut RigidBody {
        self.bodies
            .get_mut(handle)
            .expect("shape body accessed after deletion")
    }

    pub(crate) fn collider_ref(&self, handle: ColliderHandle) -> &Collider {
        self.colliders
            .get(handle)
            .expect("shape collider accessed after deletion")
    }

    pub(crate) fn collider_mut(&mut self, handle: ColliderHandle) -> &mut Collider {
        self.colliders
            .get_mut(handle)
            .expect("shape collider accessed after deletion")
    }
}

#[inline]
fn ordered(a: ShapeId, b: ShapeId) -> (ShapeId, ShapeId) {
    if a <= b { (a, b) } else { (b, a) }
}
