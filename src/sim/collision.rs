//! Collision predicates shared by the arena, obstacle and drone checks
//!
//! Every test here is a total function over finite floats. The arena uses
//! open intervals, the obstacle closed ones; mixing them up lets a drone sit
//! exactly on the arena wall or graze the obstacle buffer.

use glam::{Vec2, Vec3};

/// Strict containment: `-half < value < half`
#[inline]
pub fn within_open(value: f32, half: f32) -> bool {
    -half < value && value < half
}

/// Inclusive containment of `point` in the rectangle `center ± half`
#[inline]
pub fn within_rect(point: Vec2, center: Vec2, half: Vec2) -> bool {
    let d = (point - center).abs();
    d.x <= half.x && d.y <= half.y
}

/// True if `a` and `b` are no further apart than `radius` (x/y/z)
#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) <= radius * radius
}

/// True if moving from `from` to `to` changes which side of `plane` we are on.
///
/// Landing exactly on the plane counts as reaching the far side.
#[inline]
pub fn crosses_plane(from: f32, to: f32, plane: f32) -> bool {
    (from < plane) != (to < plane)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_open_excludes_boundary() {
        assert!(within_open(17.9, 18.0));
        assert!(!within_open(18.0, 18.0));
        assert!(!within_open(-18.0, 18.0));
        assert!(within_open(0.0, 18.0));
    }

    #[test]
    fn test_within_rect_includes_boundary() {
        let half = Vec2::new(4.5, 2.0);
        assert!(within_rect(Vec2::new(4.5, 2.0), Vec2::ZERO, half));
        assert!(within_rect(Vec2::new(-4.5, 0.0), Vec2::ZERO, half));
        assert!(!within_rect(Vec2::new(4.51, 0.0), Vec2::ZERO, half));
        assert!(!within_rect(Vec2::new(0.0, -2.01), Vec2::ZERO, half));
    }

    #[test]
    fn test_within_radius() {
        let a = Vec3::new(0.0, -3.0, 0.0);
        assert!(within_radius(a, Vec3::new(2.0, -3.0, 0.0), 2.0));
        assert!(!within_radius(a, Vec3::new(2.0, -3.0, 0.1), 2.0));
        // y counts
        assert!(!within_radius(a, Vec3::new(0.0, -0.9, 0.0), 2.0));
    }

    #[test]
    fn test_crosses_plane() {
        assert!(crosses_plane(-0.1, 0.2, 0.0));
        assert!(crosses_plane(0.2, -0.1, 0.0));
        assert!(!crosses_plane(0.2, 0.5, 0.0));
        assert!(!crosses_plane(-0.5, -0.2, 0.0));
        assert!(crosses_plane(-0.3, 0.0, 0.0));
    }
}
