use glam::Vec2;

use std::time::Instant;

use crate::api::{NarrowphaseApi, PhysicsWorldApi};
use crate::body::{Body, Shape};
use crate::dynamics::{integrate, resolve};
use crate::error::PhysicsError;
use crate::narrowphase::Narrowphase;
use crate::types::*;

/// Single-threaded rigid-body simulator: boundary half-spaces plus dynamic
/// bodies, advanced by fixed-timestep ticks.
///
/// Bodies and boundaries are registered at setup and processed in
/// registration order; a tick is one non-reentrant call that integrates,
/// then runs several full detect-and-resolve passes, then clears forces.
pub struct PhysicsWorld {
    pub cfg: WorldConfig,

    boundaries: Vec<Body>,
    bodies: Vec<Body>,

    // Timing for the last step (optional)
    last_timing: Option<WorldTiming>,
}

impl PhysicsWorldApi for PhysicsWorld {
    fn new(cfg: WorldConfig) -> Self {
        Self {
            cfg,
            boundaries: Vec::new(),
            bodies: Vec::new(),
            last_timing: None,
        }
    }

    fn add_boundary(&mut self, point: Vec2, normal: Vec2) -> Result<BodyId, PhysicsError> {
        let hs = Body::half_space(point, normal)?;
        self.boundaries.push(hs);
        Ok(self.boundaries.len() - 1)
    }

    fn add_extent(&mut self, width: f32) -> Result<(), PhysicsError> {
        if width <= 0.0 {
            return Err(PhysicsError::InvalidParameter {
                name: "width",
                value: width,
            });
        }
        let half = width / 2.0;
        let lo = Vec2::splat(-half);
        let hi = Vec2::splat(half);
        self.add_boundary(lo, Vec2::Y)?;
        self.add_boundary(lo, Vec2::X)?;
        self.add_boundary(hi, -Vec2::Y)?;
        self.add_boundary(hi, -Vec2::X)?;
        Ok(())
    }

    fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    fn apply_force(&mut self, id: BodyId, force: Vec2) -> Result<(), PhysicsError> {
        let count = self.bodies.len();
        let body = self
            .bodies
            .get_mut(id)
            .ok_or(PhysicsError::BodyIndexOutOfRange { index: id, count })?;
        body.force += force;
        Ok(())
    }

    fn step(&mut self, dt: f32) {
        let t_all = self.cfg.enable_timing.then(Instant::now);
        self.last_timing = None;

        let t_integrate = self.cfg.enable_timing.then(Instant::now);
        for body in &mut self.bodies {
            body.force += self.cfg.gravity * body.mass;
            integrate(body, dt);
        }
        let integrate_ms = t_integrate
            .map(|t| t.elapsed().as_secs_f64() * 1000.0)
            .unwrap_or(0.0);

        let t_resolve = self.cfg.enable_timing.then(Instant::now);
        let mut contacts = 0usize;
        for _ in 0..self.cfg.iterations {
            for i in 0..self.bodies.len() {
                for bi in 0..self.boundaries.len() {
                    let hs = &mut self.boundaries[bi];
                    let body = &mut self.bodies[i];
                    if let Some(m) = Narrowphase::contact(hs, body) {
                        resolve(hs, body, &m);
                        contacts += 1;
                    }
                }
                for j in 0..self.bodies.len() {
                    if i == j {
                        continue;
                    }
                    let (other, body) = pair_mut(&mut self.bodies, j, i);
                    if let Some(m) = Narrowphase::contact(other, body) {
                        resolve(other, body, &m);
                        contacts += 1;
                    }
                }
            }
        }
        let resolve_ms = t_resolve
            .map(|t| t.elapsed().as_secs_f64() * 1000.0)
            .unwrap_or(0.0);

        for body in &mut self.bodies {
            body.force = Vec2::ZERO;
        }

        if let Some(t_all) = t_all {
            self.last_timing = Some(WorldTiming {
                step_ms: t_all.elapsed().as_secs_f64() * 1000.0,
                integrate_ms,
                resolve_ms,
                contacts,
            });
        }
    }

    fn rotate_boundaries(&mut self, angle: f32) {
        // Intercepts are left untouched, so this is only physically
        // consistent when the boundary reference point is the rotation pivot.
        let rot = Vec2::from_angle(angle);
        for hs in &mut self.boundaries {
            if let Shape::HalfSpace { normal, .. } = &mut hs.shape {
                *normal = rot.rotate(*normal);
            }
        }
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn boundaries(&self) -> &[Body] {
        &self.boundaries
    }

    fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }
}

impl PhysicsWorld {
    /// Return debug stats for the current world contents.
    pub fn debug_stats(&self) -> WorldStats {
        let boundaries = self.boundaries.len();
        let bodies = self.bodies.len();
        WorldStats {
            boundaries,
            bodies,
            pairs_per_iteration: bodies * (boundaries + bodies.saturating_sub(1)),
        }
    }

    /// Return the timing breakdown for the last `step`, if enabled.
    pub fn timing(&self) -> Option<WorldTiming> {
        self.last_timing
    }
}

/// Disjoint mutable borrows of two distinct slice elements.
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(a, b);
    if a < b {
        let (lo, hi) = bodies.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
