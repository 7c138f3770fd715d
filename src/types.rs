use glam::Vec2;

/// Index of a registered body within its world (registration order).
pub type BodyId = usize;

/// Contact manifold for a single overlapping shape pair.
///
/// `normal` is a unit vector pointing from the first body of the pair toward
/// the second; detecting the swapped pair yields the same manifold with the
/// normal negated.
#[derive(Copy, Clone, Debug)]
pub struct Manifold {
    /// World-space contact point.
    pub position: Vec2,
    /// Unit separating direction, from body A toward body B.
    pub normal: Vec2,
    /// Penetration depth (≥ 0).
    pub depth: f32,
}

impl Manifold {
    /// Mirror manifold for the swapped argument order.
    pub fn flip(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// World-level configuration for the simulator.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Full detect-and-resolve passes per tick. Repeating the whole pass
    /// approximates simultaneous multi-contact resolution.
    pub iterations: usize,
    /// Acceleration applied to every finite-mass body each tick.
    pub gravity: Vec2,
    /// Enable internal timing instrumentation (adds small overhead when true).
    pub enable_timing: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            iterations: 4,
            gravity: Vec2::new(0.0, -10.0),
            enable_timing: false,
        }
    }
}

/// Debug statistics for the current world contents.
#[derive(Copy, Clone, Debug, Default)]
pub struct WorldStats {
    pub boundaries: usize,
    pub bodies: usize,
    /// Ordered narrowphase tests performed per resolution iteration.
    pub pairs_per_iteration: usize,
}

/// Timing breakdown for the last completed `step`.
#[derive(Copy, Clone, Debug, Default)]
pub struct WorldTiming {
    pub step_ms: f64,
    pub integrate_ms: f64,
    pub resolve_ms: f64,
    /// Contacts resolved across all iterations of the step.
    pub contacts: usize,
}
