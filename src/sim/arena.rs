//! Arena bounds
//!
//! The playfield is an axis-aligned box centered at the origin. Membership is
//! strict: a drone may approach a face but never touch it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::within_open;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn from_size(size: Vec3) -> Self {
        Self::new(size.x, size.y, size.z)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) / 2.0
    }

    /// Horizontal membership: x and z strictly inside
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        let half = self.half_extents();
        within_open(x, half.x) && within_open(z, half.z)
    }

    /// Vertical membership: y strictly inside
    pub fn contains_y(&self, y: f32) -> bool {
        within_open(y, self.half_extents().y)
    }

    /// Full membership on all three axes
    pub fn contains(&self, point: Vec3) -> bool {
        self.contains_xz(point.x, point.z) && self.contains_y(point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_strict() {
        let arena = Arena::new(36.0, 10.0, 18.0);
        assert!(arena.contains_xz(17.99, -8.99));
        assert!(!arena.contains_xz(18.0, 0.0));
        assert!(!arena.contains_xz(0.0, -9.0));
        assert!(arena.contains_y(-4.9));
        assert!(!arena.contains_y(5.0));
        assert!(!arena.contains(Vec3::new(0.0, -5.0, 0.0)));
        assert!(arena.contains(Vec3::new(-10.0, -3.0, 0.0)));
    }
}
