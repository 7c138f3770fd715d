use glam::Vec2;

use crate::error::PhysicsError;

/// Geometric variant attached to a body.
#[derive(Clone, Debug)]
pub enum Shape {
    /// Static infinite plane `{x : normal·x = intercept}`; solid where
    /// `normal·x < intercept`. The normal is world-fixed and never re-derived
    /// from the body's orientation.
    HalfSpace { normal: Vec2, intercept: f32 },
    /// Centered circle.
    Circle { radius: f32 },
    /// Convex polygon as counter-clockwise local-space vertex offsets.
    Polygon { vertices: Vec<Vec2> },
}

/// Shape tag, used by the narrowphase dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    HalfSpace,
    Circle,
    Polygon,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::HalfSpace { .. } => ShapeKind::HalfSpace,
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Polygon { .. } => ShapeKind::Polygon,
        }
    }
}

/// One rigid object: mutable physical state plus lazily cached world-space
/// geometry.
///
/// State fields are public; any mutation of `position`, `orientation`,
/// `velocity`, or `angular_velocity` from outside must be followed by an
/// explicit [`Body::clear_caches`] call, or polygon geometry goes stale.
/// Half-spaces carry `f32::INFINITY` mass and inertia and are never
/// integrated.
#[derive(Clone, Debug)]
pub struct Body {
    /// Strictly positive, or infinite for immovable bodies.
    pub mass: f32,
    /// Moment of inertia including the parallel-axis term
    /// `mass * |center_of_mass|²`; infinite for immovable bodies.
    pub moment_of_inertia: f32,
    /// World location of the body's local coordinate origin (not necessarily
    /// the center of mass).
    pub position: Vec2,
    pub velocity: Vec2,
    /// Rotation about the local origin, radians.
    pub orientation: f32,
    pub angular_velocity: f32,
    /// Center-of-mass offset in local (unrotated) coordinates.
    pub center_of_mass: Vec2,
    /// Force accumulator, summed externally each tick and cleared at tick end.
    pub force: Vec2,
    pub shape: Shape,

    vertex_cache: Option<Vec<Vec2>>,
    normal_cache: Option<Vec<Vec2>>,
}

impl Body {
    fn new(
        mass: f32,
        moment_of_inertia: f32,
        center_of_mass: Vec2,
        position: Vec2,
        velocity: Vec2,
        orientation: f32,
        angular_velocity: f32,
        shape: Shape,
    ) -> Self {
        Self {
            mass,
            moment_of_inertia,
            position,
            velocity,
            orientation,
            angular_velocity,
            center_of_mass,
            force: Vec2::ZERO,
            shape,
            vertex_cache: None,
            normal_cache: None,
        }
    }

    /// Circle body. The center of mass is deliberately offset to
    /// `(radius / 2, 0)` so free circles wobble as they roll.
    pub fn circle(
        mass: f32,
        radius: f32,
        position: Vec2,
        velocity: Vec2,
        orientation: f32,
        angular_velocity: f32,
    ) -> Result<Self, PhysicsError> {
        check_positive("mass", mass)?;
        check_positive("radius", radius)?;
        let center_of_mass = Vec2::new(radius / 2.0, 0.0);
        let moment_of_inertia =
            mass * radius * radius / 2.0 + mass * center_of_mass.length_squared();
        Ok(Self::new(
            mass,
            moment_of_inertia,
            center_of_mass,
            position,
            velocity,
            orientation,
            angular_velocity,
            Shape::Circle { radius },
        ))
    }

    /// General convex polygon body from counter-clockwise local vertices.
    /// Centroid and moment of inertia are derived from the vertex list.
    pub fn polygon(
        mass: f32,
        vertices: Vec<Vec2>,
        position: Vec2,
        velocity: Vec2,
        orientation: f32,
        angular_velocity: f32,
    ) -> Result<Self, PhysicsError> {
        check_positive("mass", mass)?;
        let (center_of_mass, moment_of_inertia) = polygon_mass_properties(mass, &vertices)?;
        Ok(Self::new(
            mass,
            moment_of_inertia,
            center_of_mass,
            position,
            velocity,
            orientation,
            angular_velocity,
            Shape::Polygon { vertices },
        ))
    }

    /// Isosceles right triangle with both legs of length `width`, right angle
    /// at the local origin.
    pub fn triangle(
        mass: f32,
        width: f32,
        position: Vec2,
        velocity: Vec2,
        orientation: f32,
        angular_velocity: f32,
    ) -> Result<Self, PhysicsError> {
        check_positive("width", width)?;
        let vertices = vec![
            Vec2::ZERO,
            Vec2::new(width, 0.0),
            Vec2::new(0.0, width),
        ];
        Self::polygon(mass, vertices, position, velocity, orientation, angular_velocity)
    }

    /// Axis-aligned (at zero orientation) square with side `width` and its
    /// lower-left corner at the local origin.
    pub fn square(
        mass: f32,
        width: f32,
        position: Vec2,
        velocity: Vec2,
        orientation: f32,
        angular_velocity: f32,
    ) -> Result<Self, PhysicsError> {
        check_positive("width", width)?;
        let vertices = vec![
            Vec2::ZERO,
            Vec2::new(width, 0.0),
            Vec2::new(width, width),
            Vec2::new(0.0, width),
        ];
        Self::polygon(mass, vertices, position, velocity, orientation, angular_velocity)
    }

    /// Immovable half-space through `point` with outward `normal`.
    pub fn half_space(point: Vec2, normal: Vec2) -> Result<Self, PhysicsError> {
        let normal = normal
            .try_normalize()
            .ok_or(PhysicsError::ZeroLengthNormal {
                context: "half-space normal",
            })?;
        let intercept = normal.dot(point);
        Ok(Self::new(
            f32::INFINITY,
            f32::INFINITY,
            Vec2::ZERO,
            point,
            Vec2::ZERO,
            0.0,
            0.0,
            Shape::HalfSpace { normal, intercept },
        ))
    }

    /// Immovable bodies are never integrated or impulse-updated.
    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    /// Center of mass in world coordinates: the local offset rotated by
    /// `orientation` and translated by `position`.
    pub fn global_center_of_mass(&self) -> Vec2 {
        Vec2::from_angle(self.orientation).rotate(self.center_of_mass) + self.position
    }

    /// Re-derive the geometric origin from a known world center of mass and
    /// the current orientation.
    pub fn set_global_center_of_mass(&mut self, world_com: Vec2) {
        self.position = world_com - Vec2::from_angle(self.orientation).rotate(self.center_of_mass);
    }

    /// Drop cached world-space geometry. Must be called after every mutation
    /// of `position` or `orientation`.
    pub fn clear_caches(&mut self) {
        self.vertex_cache = None;
        self.normal_cache = None;
    }

    /// World-space polygon vertices (empty for non-polygons), recomputed only
    /// when the cache was invalidated.
    pub fn vertices(&mut self) -> &[Vec2] {
        self.refresh_caches();
        self.vertex_cache.as_deref().unwrap_or(&[])
    }

    /// Outward unit edge normals in vertex order (empty for non-polygons).
    pub fn normals(&mut self) -> &[Vec2] {
        self.refresh_caches();
        self.normal_cache.as_deref().unwrap_or(&[])
    }

    /// Both world-space slices at once, for callers that need vertices and
    /// normals without re-borrowing.
    pub fn polygon_world(&mut self) -> (&[Vec2], &[Vec2]) {
        self.refresh_caches();
        (
            self.vertex_cache.as_deref().unwrap_or(&[]),
            self.normal_cache.as_deref().unwrap_or(&[]),
        )
    }

    fn refresh_caches(&mut self) {
        if self.vertex_cache.is_some() {
            return;
        }
        let Shape::Polygon { vertices } = &self.shape else {
            return;
        };
        let rot = Vec2::from_angle(self.orientation);
        let world: Vec<Vec2> = vertices
            .iter()
            .map(|&v| rot.rotate(v) + self.position)
            .collect();
        let n = world.len();
        let normals: Vec<Vec2> = (0..n)
            .map(|i| {
                let e = world[(i + 1) % n] - world[i];
                Vec2::new(e.y, -e.x).normalize()
            })
            .collect();
        self.vertex_cache = Some(world);
        self.normal_cache = Some(normals);
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), PhysicsError> {
    if value <= 0.0 {
        return Err(PhysicsError::InvalidParameter { name, value });
    }
    Ok(())
}

/// Centroid and moment of inertia about the geometric origin for a uniform
/// convex CCW polygon of total mass `mass`. Inertia about the origin equals
/// the centroidal inertia plus the parallel-axis term.
fn polygon_mass_properties(mass: f32, vertices: &[Vec2]) -> Result<(Vec2, f32), PhysicsError> {
    if vertices.len() < 3 {
        return Err(PhysicsError::DegeneratePolygon {
            reason: "fewer than 3 vertices",
        });
    }
    let n = vertices.len();
    let mut twice_area = 0.0;
    let mut centroid_sum = Vec2::ZERO;
    let mut inertia_sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let e = b - a;
        if e.length_squared() == 0.0 {
            return Err(PhysicsError::DegeneratePolygon {
                reason: "zero-length edge",
            });
        }
        let c = vertices[(i + 2) % n];
        if e.perp_dot(c - b) < 0.0 {
            return Err(PhysicsError::DegeneratePolygon {
                reason: "vertices are not convex counter-clockwise",
            });
        }
        let cross = a.perp_dot(b);
        twice_area += cross;
        centroid_sum += (a + b) * cross;
        inertia_sum += cross * (a.length_squared() + a.dot(b) + b.length_squared());
    }
    if twice_area <= 0.0 {
        return Err(PhysicsError::DegeneratePolygon {
            reason: "non-positive area",
        });
    }
    let centroid = centroid_sum / (3.0 * twice_area);
    let moment = mass / 6.0 * inertia_sum / twice_area;
    Ok((centroid, moment))
}
