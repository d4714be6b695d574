//! Toggleable obstacle block
//!
//! Collision ignores the yaw: the box is tested as an axis-aligned volume
//! around its center, padded by a buffer on every half-extent. The yaw is
//! carried only so the renderer can draw the block rotated.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::collision::within_rect;
use super::entity::Pose;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBox {
    pub pose: Pose,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub visible: bool,
}

impl ObstacleBox {
    pub fn new(center: Vec3, size: Vec3, yaw: f32) -> Self {
        Self {
            pose: Pose::with_yaw(center, yaw),
            width: size.x,
            height: size.y,
            depth: size.z,
            visible: true,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Padded half-extents (width, height, depth)
    #[inline]
    pub fn padded_half_extents(&self, buffer: f32) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) / 2.0 + Vec3::splat(buffer)
    }

    /// Horizontal test: does (x, z) fall inside the padded footprint?
    ///
    /// A hidden obstacle never collides.
    pub fn blocks_xz(&self, x: f32, z: f32, buffer: f32) -> bool {
        if !self.visible {
            return false;
        }
        let c = self.pose.position;
        let half = self.padded_half_extents(buffer);
        within_rect(Vec2::new(x, z), Vec2::new(c.x, c.z), Vec2::new(half.x, half.z))
    }

    /// Vertical test: does (x, y) fall inside the padded front profile?
    ///
    /// Depth is not consulted, matching the horizontal test ignoring height.
    pub fn blocks_xy(&self, x: f32, y: f32, buffer: f32) -> bool {
        if !self.visible {
            return false;
        }
        let c = self.pose.position;
        let half = self.padded_half_extents(buffer);
        within_rect(Vec2::new(x, y), Vec2::new(c.x, c.y), Vec2::new(half.x, half.y))
    }
}
