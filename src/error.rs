use core::fmt;

/// Construction-time error type.
///
/// Everything here surfaces synchronously while a world is being set up;
/// nothing in the tick path returns an error. Degenerate geometry inside the
/// resolver is skipped locally instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PhysicsError {
    /// A scalar construction parameter was out of range (non-positive mass,
    /// radius, or side length).
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A zero-length direction was provided where a unit vector is required.
    ZeroLengthNormal {
        /// Context describing where the zero-length vector was encountered.
        context: &'static str,
    },
    /// A polygon vertex list does not describe a usable convex shape.
    DegeneratePolygon {
        /// Human-readable description of the problem.
        reason: &'static str,
    },
    /// A body id does not refer to a registered body.
    BodyIndexOutOfRange {
        /// The invalid index that was provided.
        index: usize,
        /// Current number of bodies in the world.
        count: usize,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter {name} = {value}")
            }
            Self::ZeroLengthNormal { context } => {
                write!(f, "zero-length normal: {context}")
            }
            Self::DegeneratePolygon { reason } => {
                write!(f, "degenerate polygon: {reason}")
            }
            Self::BodyIndexOutOfRange { index, count } => {
                write!(f, "body index {index} out of range (count={count})")
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
