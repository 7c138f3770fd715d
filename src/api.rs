use glam::Vec2;

use crate::body::Body;
use crate::error::PhysicsError;
use crate::types::*;

/// Public API contract for the rigid-body simulator.
pub trait PhysicsWorldApi {
    /// Construct a new world with the given configuration.
    fn new(cfg: WorldConfig) -> Self
    where
        Self: Sized;

    // --- World setup -------------------------------------------------------

    /// Register an immovable half-space boundary through `point` with
    /// outward `normal`.
    fn add_boundary(&mut self, point: Vec2, normal: Vec2) -> Result<BodyId, PhysicsError>;

    /// Convenience: register the four half-spaces enclosing a centered
    /// square extent of side `width`.
    fn add_extent(&mut self, width: f32) -> Result<(), PhysicsError>;

    /// Register a dynamic body (validated at construction) and return its id.
    fn add_body(&mut self, body: Body) -> BodyId;

    // --- Tick --------------------------------------------------------------

    /// Accumulate an external force on one body for the next tick.
    fn apply_force(&mut self, id: BodyId, force: Vec2) -> Result<(), PhysicsError>;

    /// Advance the world by one fixed timestep: apply gravity, integrate all
    /// bodies, run the configured number of detect-and-resolve passes, clear
    /// force accumulators.
    fn step(&mut self, dt: f32);

    /// Rotate every boundary normal by `angle` (radians), leaving intercepts
    /// unchanged.
    fn rotate_boundaries(&mut self, angle: f32);

    // --- State queries -----------------------------------------------------

    /// All dynamic bodies in registration order.
    fn bodies(&self) -> &[Body];

    /// All boundary half-spaces in registration order.
    fn boundaries(&self) -> &[Body];

    /// One dynamic body by id.
    fn body(&self, id: BodyId) -> Option<&Body>;
}

/// Narrowphase detection signatures.
///
/// The primitive routines are pure; `contact` performs shape-pair dispatch
/// and may refresh the bodies' cached world-space geometry.
pub trait NarrowphaseApi {
    /// Pairwise test over two bodies; `None` for disjoint or exactly
    /// touching shapes.
    fn contact(a: &mut Body, b: &mut Body) -> Option<Manifold>;

    // Primitive routines ----------------------------------------------------

    fn halfspace_circle(
        normal: Vec2,
        intercept: f32,
        center: Vec2,
        radius: f32,
    ) -> Option<Manifold>;
    fn halfspace_polygon(normal: Vec2, intercept: f32, verts: &[Vec2]) -> Option<Manifold>;
    fn circle_circle(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> Option<Manifold>;
    fn circle_polygon(
        center: Vec2,
        radius: f32,
        verts: &[Vec2],
        normals: &[Vec2],
    ) -> Option<Manifold>;
    fn polygon_polygon(va: &[Vec2], na: &[Vec2], vb: &[Vec2], nb: &[Vec2]) -> Option<Manifold>;
}
