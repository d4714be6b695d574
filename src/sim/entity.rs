//! Base pose shared by every simulated object

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{heading, normalize_degrees};

/// Position, rotation and scale of an entity.
///
/// Rotation is (pitch, yaw, roll) in degrees. Only yaw is driven by the
/// simulation; pitch and roll exist for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_yaw(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            rotation: Vec3::new(0.0, normalize_degrees(yaw), 0.0),
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    /// Add `delta` degrees to yaw, keeping it in [0, 360)
    pub fn turn(&mut self, delta: f32) {
        self.rotation.y = normalize_degrees(self.rotation.y + delta);
    }

    /// Unit forward vector in the XZ plane
    #[inline]
    pub fn forward(&self) -> Vec3 {
        heading(self.yaw())
    }
}
