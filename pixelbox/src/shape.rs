/*!
The shape facade: one engine body + one collider per shape, addressed in
pixel coordinates.

A [`Shape`] is constructed from a pixel-space [`Geometry`] descriptor, a
[`BodyClass`], an optional [`Material`] (required iff Dynamic), and a
display color. Construction performs the screen→physics conversion exactly
once; every accessor converts back on the way out. The shape's identity is
stored as user data on its collider so contact events can name the shapes
involved.

Classification is chosen once and is immutable; changing it means deleting
the shape and creating a new one.
*/

use rapier2d::prelude::{
    ActiveEvents, Collider, ColliderBuilder, ColliderHandle, RigidBody, RigidBodyBuilder,
    RigidBodyHandle,
};

use crate::constants::DYNAMIC_LINE_THICKNESS;
use crate::convert::{self, Point2, Vec2};
use crate::draw::{Color, Surface};
use crate::error::ShapeError;
use crate::groups::{CollisionGroup, GroupMask};
use crate::world::PixelWorld;

/// Opaque identity of a shape within one world.
///
/// This is what contact events carry, and what the collider's user data
/// holds: an index-like token, never a pointer, so a stale id after
/// deletion can dangle harmlessly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub(crate) u64);

impl ShapeId {
    /// The raw identity value, as stored in collider user data.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Collision behavior, fixed at construction.
///
/// - `Static`: immovable, infinite mass.
/// - `Kinematic`: moves by prescribed velocity, infinite mass, unaffected
///   by forces or collisions.
/// - `Dynamic`: full physical response; requires a [`Material`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyClass {
    Static,
    Kinematic,
    Dynamic,
}

impl BodyClass {
    /// Only dynamic shapes carry mass-bearing material data.
    #[inline]
    pub fn carries_material(self) -> bool {
        matches!(self, BodyClass::Dynamic)
    }

    fn body_builder(self) -> RigidBodyBuilder {
        match self {
            BodyClass::Static => RigidBodyBuilder::fixed(),
            // Velocity-based: kinematic shapes are driven through
            // `set_velocity`, matching how the engine integrates them.
            BodyClass::Kinematic => RigidBodyBuilder::kinematic_velocity_based(),
            BodyClass::Dynamic => RigidBodyBuilder::dynamic(),
        }
    }
}

/// Material properties of a dynamic shape's collider.
///
/// Values are non-negative; restitution is conventionally in `[0, 1]` but
/// not enforced. After construction, mutation goes through the shape's
/// setters, which write to the live collider, not to this value object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Material {
    #[inline]
    pub const fn new(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            density,
            friction,
            restitution,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.0,
            restitution: 1.0,
        }
    }
}

/// Pixel-space geometry descriptor handed to [`Shape::new`].
///
/// All coordinates are screen-space (top-left origin, y-down, pixels).
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// A circle described by its center and radius.
    Circle { center: Vec2, radius: f32 },
    /// An axis-aligned rectangle described by its top-left corner and size.
    /// The engine wants a center and half-extents; the conversion happens
    /// here so callers can keep thinking toward the screen origin.
    Rectangle { top_left: Vec2, size: Vec2 },
    /// A segment between two endpoints.
    Line { a: Vec2, b: Vec2 },
    /// A convex polygon through the given vertices.
    Polygon { vertices: Vec<Vec2> },
}

impl Geometry {
    #[inline]
    pub fn circle(center: Vec2, radius: f32) -> Geometry {
        Geometry::Circle { center, radius }
    }

    #[inline]
    pub fn rectangle(top_left: Vec2, size: Vec2) -> Geometry {
        Geometry::Rectangle { top_left, size }
    }

    #[inline]
    pub fn line(a: Vec2, b: Vec2) -> Geometry {
        Geometry::Line { a, b }
    }

    #[inline]
    pub fn polygon(vertices: Vec<Vec2>) -> Geometry {
        Geometry::Polygon { vertices }
    }
}

/// Draw-time dispatch record, in physics space relative to the body.
///
/// Lines keep their local endpoints: a dynamic line's collider is a thin
/// quad, but it still renders as the segment through both endpoints.
/// Everything else reads its local geometry back from the live collider.
#[derive(Clone, Debug)]
enum LocalGeometry {
    Circle,
    Rectangle,
    Line { a: Point2, b: Point2 },
    Polygon,
}

/// A physics body addressed in pixel coordinates.
///
/// The shape owns its body and collider for its whole lifetime; the body is
/// never reassigned. Destruction goes through
/// [`ShapeRegistry::delete`](crate::registry::ShapeRegistry::delete) only.
/// Accessing a deleted shape's body is a programming error and panics.
#[derive(Clone, Debug)]
pub struct Shape {
    id: ShapeId,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    class: BodyClass,
    color: Color,
    local: LocalGeometry,
}

impl Shape {
    /// Create a shape and register its body with the world.
    ///
    /// Fails fast on a classification/material mismatch: Dynamic requires a
    /// material, Static and Kinematic must not be given one. A degenerate
    /// polygon (or dynamic line with coincident endpoints) surfaces the
    /// engine's rejection unchanged.
    pub fn new(
        world: &mut PixelWorld,
        geometry: Geometry,
        class: BodyClass,
        material: Option<Material>,
        color: Color,
    ) -> Result<Shape, ShapeError> {
        match (class.carries_material(), material.is_some()) {
            (true, false) => return Err(ShapeError::MissingMaterial),
            (false, true) => return Err(ShapeError::MaterialNotAllowed { class }),
            _ => {}
        }

        let screen_height = world.screen_height();
        let id = world.allocate_id();
        let (body, collider, local) =
            build_parts(&geometry, class, material, screen_height, id)?;

        let (body_handle, collider_handle) = world.insert_body(body, collider);

        Ok(Shape {
            id,
            body: body_handle,
            collider: collider_handle,
            class,
            color,
            local,
        })
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[inline]
    pub fn class(&self) -> BodyClass {
        self.class
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    /// Current position in pixel coordinates.
    ///
    /// Circles report their center, rectangles their top-left corner (the
    /// same point they were constructed with), lines and polygons the
    /// body origin their vertices move with.
    pub fn position(&self, world: &PixelWorld) -> Vec2 {
        let screen_height = world.screen_height();
        let center =
            convert::position_to_pixels(*world.body_ref(self.body).translation(), screen_height);
        match self.local {
            LocalGeometry::Rectangle => center - self.rect_size_px(world) / 2.0,
            _ => center,
        }
    }

    /// Teleport the shape, using the same pixel-space anchor as
    /// [`position`](Self::position).
    pub fn set_position(&self, world: &mut PixelWorld, position: Vec2) {
        let anchor = match self.local {
            LocalGeometry::Rectangle => position + self.rect_size_px(world) / 2.0,
            _ => position,
        };
        let translation = convert::position_to_physics(anchor, world.screen_height());
        world.body_mut(self.body).set_translation(translation, true);
    }

    /// Current velocity in pixels per second (y-down).
    pub fn velocity(&self, world: &PixelWorld) -> Vec2 {
        convert::velocity_to_pixels(*world.body_ref(self.body).linvel())
    }

    /// Set the velocity in pixels per second (y-down).
    ///
    /// This is how a Kinematic shape is driven: the engine moves it by this
    /// prescribed velocity and ignores forces and collisions.
    pub fn set_velocity(&self, world: &mut PixelWorld, velocity: Vec2) {
        world
            .body_mut(self.body)
            .set_linvel(convert::velocity_to_physics(velocity), true);
    }

    /// Angular velocity in the engine convention (rad/s, counter-clockwise
    /// positive in physics space).
    pub fn angular_velocity(&self, world: &PixelWorld) -> f32 {
        world.body_ref(self.body).angvel()
    }

    pub fn set_angular_velocity(&self, world: &mut PixelWorld, angular_velocity: f32) {
        world.body_mut(self.body).set_angvel(angular_velocity, true);
    }

    /// Collider density. Errors on Static/Kinematic shapes, which carry no
    /// material identity.
    pub fn density(&self, world: &PixelWorld) -> Result<f32, ShapeError> {
        self.require_material()?;
        Ok(world.collider_ref(self.collider).density())
    }

    /// Set the collider density; the body's mass properties follow.
    pub fn set_density(&self, world: &mut PixelWorld, density: f32) -> Result<(), ShapeError> {
        self.require_material()?;
        world.collider_mut(self.collider).set_density(density);
        Ok(())
    }

    pub fn friction(&self, world: &PixelWorld) -> Result<f32, ShapeError> {
        self.require_material()?;
        Ok(world.collider_ref(self.collider).friction())
    }

    pub fn set_friction(&self, world: &mut PixelWorld, friction: f32) -> Result<(), ShapeError> {
        self.require_material()?;
        world.collider_mut(self.collider).set_friction(friction);
        Ok(())
    }

    pub fn restitution(&self, world: &PixelWorld) -> Result<f32, ShapeError> {
        self.require_material()?;
        Ok(world.collider_ref(self.collider).restitution())
    }

    pub fn set_restitution(
        &self,
        world: &mut PixelWorld,
        restitution: f32,
    ) -> Result<(), ShapeError> {
        self.require_material()?;
        world.collider_mut(self.collider).set_restitution(restitution);
        Ok(())
    }

    /// The shape's (membership, filter) collision-group pair.
    pub fn collision_group(&self, world: &PixelWorld) -> CollisionGroup {
        CollisionGroup::from_interaction_groups(
            world.collider_ref(self.collider).collision_groups(),
        )
    }

    /// Assign collision filtering. Two shapes touch only if each one's
    /// membership intersects the other's filter; the engine evaluates the
    /// test, this layer owns the values.
    pub fn set_collision_group(
        &self,
        world: &mut PixelWorld,
        membership: GroupMask,
        filter: GroupMask,
    ) {
        world
            .collider_mut(self.collider)
            .set_collision_groups(CollisionGroup::new(membership, filter).to_interaction_groups());
    }

    /// Render the shape's current engine transform onto `surface`.
    pub fn draw(&self, world: &PixelWorld, surface: &mut dyn Surface) {
        let screen_height = world.screen_height();
        let iso = *world.body_ref(self.body).position();
        let collider = world.collider_ref(self.collider);

        match &self.local {
            LocalGeometry::Circle => {
                let ball = collider
                    .shape()
                    .as_ball()
                    .expect("circle shape lost its ball collider");
                let center = to_screen(Point2::from(iso.translation.vector), screen_height);
                surface.fill_circle(center, convert::to_pixels(ball.radius), self.color);
            }
            LocalGeometry::Rectangle => {
                let cuboid = collider
                    .shape()
                    .as_cuboid()
                    .expect("rectangle shape lost its cuboid collider");
                let he = cuboid.half_extents;
                let corners = [
                    Point2::new(-he.x, -he.y),
                    Point2::new(he.x, -he.y),
                    Point2::new(he.x, he.y),
                    Point2::new(-he.x, he.y),
                ];
                let vertices: Vec<Point2> = corners
                    .iter()
                    .map(|c| to_screen(iso * c, screen_height))
                    .collect();
                surface.fill_polygon(&vertices, self.color);
            }
            LocalGeometry::Line { a, b } => {
                surface.line(
                    to_screen(iso * a, screen_height),
                    to_screen(iso * b, screen_height),
                    1.0,
                    self.color,
                );
            }
            LocalGeometry::Polygon => {
                let polygon = collider
                    .shape()
                    .as_convex_polygon()
                    .expect("polygon shape lost its convex collider");
                let vertices: Vec<Point2> = polygon
                    .points()
                    .iter()
                    .map(|p| to_screen(iso * p, screen_height))
                    .collect();
                surface.fill_polygon(&vertices, self.color);
            }
        }
    }

    fn require_material(&self) -> Result<(), ShapeError> {
        if self.class.carries_material() {
            Ok(())
        } else {
            Err(ShapeError::NoMaterial { class: self.class })
        }
    }

    fn rect_size_px(&self, world: &PixelWorld) -> Vec2 {
        let he = world
            .collider_ref(self.collider)
            .shape()
            .as_cuboid()
            .expect("rectangle shape lost its cuboid collider")
            .half_extents;
        convert::to_pixels_v(he) * 2.0
    }
}

/// Convert the geometry into positioned body + collider builders and the
/// draw-dispatch record. This is the single place where pixel geometry is
/// flipped and scaled into the engine.
fn build_parts(
    geometry: &Geometry,
    class: BodyClass,
    material: Option<Material>,
    screen_height: f32,
    id: ShapeId,
) -> Result<(RigidBody, Collider, LocalGeometry), ShapeError> {
    let (body_builder, collider_builder, local) = match geometry {
        Geometry::Circle { center, radius } => {
            let translation = convert::position_to_physics(*center, screen_height);
            (
                class.body_builder().translation(translation),
                ColliderBuilder::ball(convert::to_physical(*radius)),
                LocalGeometry::Circle,
            )
        }
        Geometry::Rectangle { top_left, size } => {
            // The engine wants the center; move there before flipping so the
            // y-flip lands on the right anchor.
            let center = top_left + size / 2.0;
            let translation = convert::position_to_physics(center, screen_height);
            let half = convert::to_physical_v(size / 2.0);
            (
                class.body_builder().translation(translation),
                ColliderBuilder::cuboid(half.x, half.y),
                LocalGeometry::Rectangle,
            )
        }
        Geometry::Line { a, b } => {
            let pa = Point2::from(convert::position_to_physics(*a, screen_height));
            let pb = Point2::from(convert::position_to_physics(*b, screen_height));

            let builder = if class.carries_material() {
                // No mass-bearing zero-thickness shape exists, so a dynamic
                // line is a quad one pixel tall through both endpoints.
                let drop = Vec2::new(0.0, DYNAMIC_LINE_THICKNESS);
                let pa2 =
                    Point2::from(convert::position_to_physics(a + drop, screen_height));
                let pb2 =
                    Point2::from(convert::position_to_physics(b + drop, screen_height));
                ColliderBuilder::convex_hull(&[pa, pa2, pb, pb2]).ok_or(
                    ShapeError::DegenerateGeometry("dynamic line endpoints coincide"),
                )?
            } else {
                ColliderBuilder::segment(pa, pb)
            };

            // Line bodies sit at the origin; the endpoints are the collider's
            // local vertices and travel with the body transform.
            (class.body_builder(), builder, LocalGeometry::Line { a: pa, b: pb })
        }
        Geometry::Polygon { vertices } => {
            let points: Vec<Point2> = vertices
                .iter()
                .map(|v| Point2::from(convert::position_to_physics(*v, screen_height)))
                .collect();
            let builder = ColliderBuilder::convex_hull(&points).ok_or(
                ShapeError::DegenerateGeometry("polygon needs three non-collinear vertices"),
            )?;
            (class.body_builder(), builder, LocalGeometry::Polygon)
        }
    };

    let mut collider_builder = collider_builder
        .user_data(id.raw() as u128)
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .collision_groups(CollisionGroup::default().to_interaction_groups());

    if let Some(material) = material {
        collider_builder = collider_builder
            .density(material.density)
            .friction(material.friction)
            .restitution(material.restitution);
    }

    Ok((body_builder.build(), collider_builder.build(), local))
}

#[inline]
fn to_screen(p: Point2, screen_height: f32) -> Point2 {
    Point2::from(convert::position_to_pixels(p.coords, screen_height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCREEN_HEIGHT;
    use crate::draw::recording::{Primitive, RecordingSurface};

    const TOL: f32 = 1.0e-3;

    fn world() -> PixelWorld {
        PixelWorld::new(Vec2::new(0.0, -10.0), SCREEN_HEIGHT)
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).norm() < TOL
    }

    #[test]
    fn dynamic_without_material_fails() {
        let mut w = world();
        let result = Shape::new(
            &mut w,
            Geometry::circle(Vec2::new(150.0, 250.0), 30.0),
            BodyClass::Dynamic,
            None,
            Color::WHITE,
        );
        assert!(matches!(result, Err(ShapeError::MissingMaterial)));
        assert_eq!(w.body_count(), 0, "no body may leak from failed construction");
    }

    #[test]
    fn static_and_kinematic_reject_materials() {
        let mut w = world();
        for class in [BodyClass::Static, BodyClass::Kinematic] {
            let result = Shape::new(
                &mut w,
                Geometry::rectangle(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)),
                class,
                Some(Material::default()),
                Color::WHITE,
            );
            assert!(matches!(
                result,
                Err(ShapeError::MaterialNotAllowed { class: c }) if c == class
            ));
        }
        assert_eq!(w.body_count(), 0);
    }

    #[test]
    fn rectangle_reports_top_left_before_any_step() {
        let mut w = world();
        let rect = Shape::new(
            &mut w,
            Geometry::rectangle(Vec2::new(100.0, 350.0), Vec2::new(200.0, 50.0)),
            BodyClass::Static,
            None,
            Color::WHITE,
        )
        .expect("static rectangle");

        assert!(
            close(rect.position(&w), Vec2::new(100.0, 350.0)),
            "top-left/center conversion must round-trip at t=0, got {:?}",
            rect.position(&w)
        );
    }

    #[test]
    fn rectangle_set_position_uses_the_same_anchor() {
        let mut w = world();
        let rect = Shape::new(
            &mut w,
            Geometry::rectangle(Vec2::new(0.0, 0.0), Vec2::new(40.0, 30.0)),
            BodyClass::Kinematic,
            None,
            Color::WHITE,
        )
        .expect("kinematic rectangle");

        rect.set_position(&mut w, Vec2::new(250.0, 125.0));
        assert!(close(rect.position(&w), Vec2::new(250.0, 125.0)));
    }

    #[test]
    fn circle_reports_its_center() {
        let mut w = world();
        let circle = Shape::new(
            &mut w,
            Geometry::circle(Vec2::new(320.0, 275.0), 25.0),
            BodyClass::Static,
            None,
            Color::WHITE,
        )
        .expect("static circle");

        assert!(close(circle.position(&w), Vec2::new(320.0, 275.0)));
    }

    #[test]
    fn kinematic_line_moves_by_prescribed_velocity() {
        let mut w = world();
        let line = Shape::new(
            &mut w,
            Geometry::line(Vec2::new(30.0, 20.0), Vec2::new(130.0, 100.0)),
            BodyClass::Kinematic,
            None,
            Color::WHITE,
        )
        .expect("kinematic line");

        let start = line.position(&w);
        line.set_velocity(&mut w, Vec2::new(400.0, 0.0));

        // One simulated second at the fixed step.
        for _ in 0..60 {
            w.step();
        }

        let end = line.position(&w);
        assert!(
            (end.x - start.x - 400.0).abs() < 1.0,
            "x should advance ~400px, moved {}",
            end.x - start.x
        );
        assert!((end.y - start.y).abs() < TOL, "y must not drift");
        assert!(close(line.velocity(&w), Vec2::new(400.0, 0.0)));
    }

    #[test]
    fn dynamic_circle_falls_toward_the_bottom_of_the_screen() {
        let mut w = world();
        let ball = Shape::new(
            &mut w,
            Geometry::circle(Vec2::new(320.0, 100.0), 10.0),
            BodyClass::Dynamic,
            Some(Material::default()),
            Color::WHITE,
        )
        .expect("dynamic circle");

        for _ in 0..60 {
            w.step();
        }

        // Gravity points down in physics space, which is +y in pixel space.
        assert!(ball.position(&w).y > 100.0);
    }

    #[test]
    fn material_accessors_write_to_the_live_collider() {
        let mut w = world();
        let ball = Shape::new(
            &mut w,
            Geometry::circle(Vec2::new(100.0, 100.0), 15.0),
            BodyClass::Dynamic,
            Some(Material::new(1.0, 0.2, 0.9)),
            Color::WHITE,
        )
        .expect("dynamic circle");

        assert!((ball.density(&w).expect("density") - 1.0).abs() < TOL);
        assert!((ball.friction(&w).expect("friction") - 0.2).abs() < TOL);
        assert!((ball.restitution(&w).expect("restitution") - 0.9).abs() < TOL);

        ball.set_density(&mut w, 2.5).expect("set_density");
        ball.set_friction(&mut w, 0.05).expect("set_friction");
        ball.set_restitution(&mut w, 0.7).expect("set_restitution");

        assert!((ball.density(&w).expect("density") - 2.5).abs() < TOL);
        assert!((ball.friction(&w).expect("friction") - 0.05).abs() < TOL);
        assert!((ball.restitution(&w).expect("restitution") - 0.7).abs() < TOL);
    }

    #[test]
    fn material_accessors_fail_without_a_material() {
        let mut w = world();
        let wall = Shape::new(
            &mut w,
            Geometry::line(Vec2::new(5.0, 5.0), Vec2::new(635.0, 5.0)),
            BodyClass::Static,
            None,
            Color::WHITE,
        )
        .expect("static line");

        assert!(matches!(
            wall.density(&w),
            Err(ShapeError::NoMaterial {
                class: BodyClass::Static
            })
        ));
        assert!(wall.set_friction(&mut w, 0.5).is_err());
    }

    #[test]
    fn angular_velocity_passes_through_unconverted() {
        let mut w = world();
        let ball = Shape::new(
            &mut w,
            Geometry::circle(Vec2::new(100.0, 100.0), 15.0),
            BodyClass::Dynamic,
            Some(Material::default()),
            Color::WHITE,
        )
        .expect("dynamic circle");

        ball.set_angular_velocity(&mut w, -12.5);
        assert!((ball.angular_velocity(&w) + 12.5).abs() < TOL);
    }

    #[test]
    fn default_groups_touch_and_disjoint_groups_do_not() {
        // Two overlapping dynamic circles; run once with default filtering,
        // once with disjoint category/mask pairs.
        let build = |w: &mut PixelWorld| {
            let a = Shape::new(
                w,
                Geometry::circle(Vec2::new(100.0, 100.0), 10.0),
                BodyClass::Dynamic,
                Some(Material::default()),
                Color::WHITE,
            )
            .expect("circle a");
            let b = Shape::new(
                w,
                Geometry::circle(Vec2::new(105.0, 100.0), 10.0),
                BodyClass::Dynamic,
                Some(Material::default()),
                Color::WHITE,
            )
            .expect("circle b");
            (a, b)
        };

        let mut touching_world = PixelWorld::new(Vec2::zeros(), SCREEN_HEIGHT);
        let (a, b) = build(&mut touching_world);
        touching_world.step();
        assert!(touching_world.pair_touching(a.id(), b.id()));

        let mut filtered_world = PixelWorld::new(Vec2::zeros(), SCREEN_HEIGHT);
        let (a, b) = build(&mut filtered_world);
        a.set_collision_group(&mut filtered_world, GroupMask(2), GroupMask(1));
        b.set_collision_group(&mut filtered_world, GroupMask(4), GroupMask(1));
        for _ in 0..10 {
            filtered_world.step();
        }
        assert!(!filtered_world.pair_touching(a.id(), b.id()));
        assert!(filtered_world.contact_events().is_empty());
    }

    #[test]
    fn draw_emits_transformed_pixel_geometry() {
        let mut w = world();
        let rect = Shape::new(
            &mut w,
            Geometry::rectangle(Vec2::new(100.0, 350.0), Vec2::new(200.0, 50.0)),
            BodyClass::Static,
            None,
            Color::rgb(100, 150, 255),
        )
        .expect("static rectangle");
        let circle = Shape::new(
            &mut w,
            Geometry::circle(Vec2::new(320.0, 275.0), 25.0),
            BodyClass::Static,
            None,
            Color::WHITE,
        )
        .expect("static circle");
        let line = Shape::new(
            &mut w,
            Geometry::line(Vec2::new(10.0, 10.0), Vec2::new(630.0, 470.0)),
            BodyClass::Static,
            None,
            Color::WHITE,
        )
        .expect("static line");

        let mut surface = RecordingSurface::default();
        rect.draw(&w, &mut surface);
        circle.draw(&w, &mut surface);
        line.draw(&w, &mut surface);

        assert_eq!(surface.primitives.len(), 3);

        let Primitive::Polygon { vertices, color } = &surface.primitives[0] else {
            panic!("rectangle must draw a polygon");
        };
        assert_eq!(*color, Color::rgb(100, 150, 255));
        assert_eq!(vertices.len(), 4);
        for expected in [
            Point2::new(100.0, 350.0),
            Point2::new(300.0, 350.0),
            Point2::new(300.0, 400.0),
            Point2::new(100.0, 400.0),
        ] {
            assert!(
                vertices.iter().any(|v| (v - expected).norm() < TOL),
                "missing corner {expected:?} in {vertices:?}"
            );
        }

        let Primitive::Circle { center, radius, .. } = &surface.primitives[1] else {
            panic!("circle must draw a circle");
        };
        assert!((center - Point2::new(320.0, 275.0)).norm() < TOL);
        assert!((radius - 25.0).abs() < TOL);

        let Primitive::Line { a, b, .. } = &surface.primitives[2] else {
            panic!("line must draw a line");
        };
        assert!((a - Point2::new(10.0, 10.0)).norm() < TOL);
        assert!((b - Point2::new(630.0, 470.0)).norm() < TOL);
    }

    #[test]
    fn polygon_constructs_and_draws_for_every_class() {
        let octagon = vec![
            Vec2::new(300.0, 80.0),
            Vec2::new(320.0, 80.0),
            Vec2::new(340.0, 100.0),
            Vec2::new(340.0, 120.0),
            Vec2::new(320.0, 140.0),
            Vec2::new(300.0, 140.0),
            Vec2::new(280.0, 120.0),
            Vec2::new(280.0, 100.0),
        ];

        let mut w = world();
        for (class, material) in [
            (BodyClass::Static, None),
            (BodyClass::Kinematic, None),
            (BodyClass::Dynamic, Some(Material::default())),
        ] {
            let polygon = Shape::new(
                &mut w,
                Geometry::polygon(octagon.clone()),
                class,
                material,
                Color::WHITE,
            )
            .expect("polygon");

            let mut surface = RecordingSurface::default();
            polygon.draw(&w, &mut surface);
            let Primitive::Polygon { vertices, .. } = &surface.primitives[0] else {
                panic!("polygon must draw a polygon");
            };
            assert_eq!(vertices.len(), 8, "octagon hull keeps all vertices");
        }
    }

    #[test]
    fn degenerate_polygon_is_rejected() {
        let mut w = world();
        let result = Shape::new(
            &mut w,
            Geometry::polygon(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(20.0, 0.0),
            ]),
            BodyClass::Static,
            None,
            Color::WHITE,
        );
        assert!(matches!(result, Err(ShapeError::DegenerateGeometry(_))));
        assert_eq!(w.body_count(), 0);
    }

    #[test]
    fn dynamic_line_carries_mass_and_still_draws_as_a_segment() {
        let mut w = world();
        let line = Shape::new(
            &mut w,
            Geometry::line(Vec2::new(10.0, 10.0), Vec2::new(100.0, 10.0)),
            BodyClass::Dynamic,
            Some(Material::new(1.0, 0.0, 1.0)),
            Color::WHITE,
        )
        .expect("dynamic line");

        assert!(line.density(&w).is_ok());

        let mut surface = RecordingSurface::default();
        line.draw(&w, &mut surface);
        assert!(matches!(surface.primitives[0], Primitive::Line { .. }));
    }
}
