//! Setup validation errors
//!
//! The simulation itself never fails: rule violations are rejected moves.
//! Only a malformed match configuration is an error, caught at construction.

use glam::Vec3;
use thiserror::Error;

/// Reasons a match cannot be constructed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("arena {axis} must be positive and finite, got {value}")]
    InvalidArena { axis: &'static str, value: f32 },

    #[error("tuning value `{name}` must be positive and finite, got {value}")]
    InvalidTuning { name: &'static str, value: f32 },

    #[error("{entity} starts at {position} which is outside the arena")]
    OutOfArena { entity: &'static str, position: Vec3 },

    #[error("drones start {distance} apart, inside the collision radius {radius}")]
    DronesOverlap { distance: f32, radius: f32 },

    #[error("divider wall at x={x} must be finite and strictly inside the arena")]
    InvalidWall { x: f32 },

    #[error("obstacle {axis} must be positive and finite, got {value}")]
    InvalidObstacle { axis: &'static str, value: f32 },

    #[error("obstacle centre {center} is outside the arena")]
    ObstacleOutOfArena { center: Vec3 },

    #[error("{entity} starts inside the obstacle footprint")]
    SpawnInObstacle { entity: &'static str },

    #[error("snapshot is inconsistent: {reason}")]
    InconsistentSnapshot { reason: &'static str },
}
