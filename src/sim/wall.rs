//! Divider wall splitting the arena into the red (-x) and blue (+x) halves

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::crosses_plane;
use super::entity::Pose;
use crate::consts::{WALL_FLOOR_Y, WALL_THICKNESS};

/// A translucent vertical plane at a fixed x. Drones may pass through it
/// freely unless they are carrying a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerWall {
    /// Base of the wall; only `position.x` takes part in collision
    pub pose: Pose,
    pub height: f32,
    pub depth: f32,
    pub thickness: f32,
}

impl DividerWall {
    pub fn new(x: f32, height: f32, depth: f32) -> Self {
        Self {
            pose: Pose::at(Vec3::new(x, WALL_FLOOR_Y, 0.0)),
            height,
            depth,
            thickness: WALL_THICKNESS,
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pose.position.x
    }

    /// Does a move from `from_x` to `to_x` pass through the wall plane?
    pub fn is_crossed(&self, from_x: f32, to_x: f32) -> bool {
        crosses_plane(from_x, to_x, self.x())
    }
}
