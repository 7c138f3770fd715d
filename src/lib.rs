//! tumble: 2D rigid-body physics core (SAT narrowphase, impulse resolution)

pub mod types;
pub mod error;
pub mod api;
pub mod body;
pub mod narrowphase;
pub mod dynamics;
pub mod world;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::body::{Body, Shape, ShapeKind};
pub use crate::error::PhysicsError;
pub use crate::world::PhysicsWorld;
