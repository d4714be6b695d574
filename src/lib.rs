//! Drone CTF - a two-drone capture-the-flag arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, flags, match state)
//! - `settings`: Construction-time tuning and initial layout
//! - `error`: Setup validation errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SetupError;
pub use settings::{Layout, StepMode, Tuning};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, synced to the render frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (x, y, z)
    pub const ARENA_WIDTH: f32 = 36.0;
    pub const ARENA_HEIGHT: f32 = 10.0;
    pub const ARENA_DEPTH: f32 = 18.0;

    /// Drone defaults
    pub const DRONE_SPEED: f32 = 0.3; // units per tick
    pub const DRONE_ROTATION_SPEED: f32 = 3.0; // degrees per tick
    pub const DRONE_SIZE: f32 = 0.75; // nose offset from center
    /// Two drones closer than this block each other (and tag a carried flag)
    pub const DRONE_COLLISION_RADIUS: f32 = 2.0;

    /// Nose-to-flag distance that counts as a capture
    pub const FLAG_CAPTURE_RADIUS: f32 = 3.0;
    /// How far in front of the nose a carried flag rides
    pub const FLAG_CARRY_OFFSET: f32 = 1.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 8.0;
    pub const OBSTACLE_HEIGHT: f32 = 6.0;
    pub const OBSTACLE_DEPTH: f32 = 3.0;
    pub const OBSTACLE_YAW: f32 = 75.0; // cosmetic only
    /// Added to each obstacle half-extent before testing
    pub const OBSTACLE_BUFFER: f32 = 0.5;

    /// Divider wall
    pub const WALL_X: f32 = 0.0;
    pub const WALL_FLOOR_Y: f32 = -5.0;
    pub const WALL_THICKNESS: f32 = 0.005;

    /// Home base platform radius (visual only)
    pub const BASE_RADIUS: f32 = 2.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit heading in the XZ plane for a yaw in degrees (0° faces +z, 90° faces +x)
#[inline]
pub fn heading(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}
