//! Match tuning and initial layout
//!
//! Both are fixed when a match is constructed. Defaults reproduce the
//! standard arena: red on the left (-x), blue on the right (+x).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;
use crate::sim::{Arena, ObstacleBox, Team};

/// How far a drone moves per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StepMode {
    /// Fixed step every tick; simulation speed follows the frame rate
    #[default]
    PerTick,
    /// Step scaled by `dt / SIM_DT` for frame-rate independence
    ElapsedScaled,
}

/// Longest `dt` an elapsed-scaled tick may cover
pub const MAX_SCALED_DT: f32 = MAX_SUBSTEPS as f32 * SIM_DT;

impl StepMode {
    /// Scale factor to apply to the base step for a tick of length `dt`.
    ///
    /// `dt` is clamped to `[0, MAX_SCALED_DT]` and non-finite values count as
    /// zero, so a scaled step never runs backwards and stays shorter than the
    /// padded obstacle and the opponent's collision diameter.
    pub fn scale(&self, dt: f32) -> f32 {
        match self {
            StepMode::PerTick => 1.0,
            StepMode::ElapsedScaled => {
                let dt = if dt.is_finite() {
                    dt.clamp(0.0, MAX_SCALED_DT)
                } else {
                    0.0
                };
                dt / SIM_DT
            }
        }
    }
}

/// Movement and collision tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Translation per tick (units)
    pub drone_speed: f32,
    /// Yaw change per tick (degrees)
    pub rotation_speed: f32,
    /// Distance from drone center to its nose
    pub drone_size: f32,
    /// Drone-drone and flag-defender blocking radius
    pub collision_radius: f32,
    /// Nose-to-flag capture radius
    pub capture_radius: f32,
    /// Carried flag distance in front of the nose
    pub carry_offset: f32,
    /// Padding added to obstacle half-extents
    pub obstacle_buffer: f32,
    pub step_mode: StepMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drone_speed: DRONE_SPEED,
            rotation_speed: DRONE_ROTATION_SPEED,
            drone_size: DRONE_SIZE,
            collision_radius: DRONE_COLLISION_RADIUS,
            capture_radius: FLAG_CAPTURE_RADIUS,
            carry_offset: FLAG_CARRY_OFFSET,
            obstacle_buffer: OBSTACLE_BUFFER,
            step_mode: StepMode::PerTick,
        }
    }
}

impl Tuning {
    /// Check every value is usable; the buffer and carry offset may be zero
    pub fn validate(&self) -> Result<(), SetupError> {
        let strictly_positive = [
            ("drone_speed", self.drone_speed),
            ("rotation_speed", self.rotation_speed),
            ("drone_size", self.drone_size),
            ("collision_radius", self.collision_radius),
            ("capture_radius", self.capture_radius),
        ];
        for (name, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SetupError::InvalidTuning { name, value });
            }
        }

        let non_negative = [
            ("carry_offset", self.carry_offset),
            ("obstacle_buffer", self.obstacle_buffer),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SetupError::InvalidTuning { name, value });
            }
        }

        Ok(())
    }
}

/// Starting pose of one drone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneSpawn {
    pub position: Vec3,
    /// Yaw in degrees, [0, 360)
    pub yaw: f32,
}

/// Canonical initial layout, used at construction and on every reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Arena size (width, height, depth)
    pub arena: Vec3,
    pub red_drone: DroneSpawn,
    pub blue_drone: DroneSpawn,
    /// Flag home positions (bases sit at the same spot)
    pub red_home: Vec3,
    pub blue_home: Vec3,
    /// Obstacle center and size (width, height, depth)
    pub obstacle_center: Vec3,
    pub obstacle_size: Vec3,
    pub wall_x: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            arena: Vec3::new(ARENA_WIDTH, ARENA_HEIGHT, ARENA_DEPTH),
            red_drone: DroneSpawn {
                position: Vec3::new(-10.0, -3.0, 0.0),
                yaw: 90.0, // face right
            },
            blue_drone: DroneSpawn {
                position: Vec3::new(10.0, -3.0, 0.0),
                yaw: 270.0, // face left
            },
            red_home: Vec3::new(-15.0, -5.0, 0.0),
            blue_home: Vec3::new(15.0, -5.0, 0.0),
            obstacle_center: Vec3::new(0.0, -2.0, 0.0),
            obstacle_size: Vec3::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT, OBSTACLE_DEPTH),
            wall_x: WALL_X,
        }
    }
}

impl Layout {
    /// Spawn point for a team's drone
    pub fn drone_spawn(&self, team: Team) -> DroneSpawn {
        match team {
            Team::Red => self.red_drone,
            Team::Blue => self.blue_drone,
        }
    }

    /// Home position of a team's flag and base
    pub fn home(&self, team: Team) -> Vec3 {
        match team {
            Team::Red => self.red_home,
            Team::Blue => self.blue_home,
        }
    }

    /// Check the arena is well-formed and every entity starts inside it.
    ///
    /// Drones must start strictly inside the arena and clear of the padded
    /// obstacle. Flags and bases rest on the floor plane, so they only need
    /// to be within the closed bounds.
    pub fn validate(&self, tuning: &Tuning) -> Result<(), SetupError> {
        for (axis, value) in [
            ("width", self.arena.x),
            ("height", self.arena.y),
            ("depth", self.arena.z),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SetupError::InvalidArena { axis, value });
            }
        }

        let arena = Arena::from_size(self.arena);
        let half = arena.half_extents();
        let inside_closed = |p: Vec3| p.abs().cmple(half).all();

        if !(self.wall_x.is_finite() && self.wall_x.abs() < half.x) {
            return Err(SetupError::InvalidWall { x: self.wall_x });
        }

        for (axis, value) in [
            ("width", self.obstacle_size.x),
            ("height", self.obstacle_size.y),
            ("depth", self.obstacle_size.z),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SetupError::InvalidObstacle { axis, value });
            }
        }
        if !arena.contains(self.obstacle_center) {
            return Err(SetupError::ObstacleOutOfArena {
                center: self.obstacle_center,
            });
        }

        for (entity, spawn) in [("red drone", self.red_drone), ("blue drone", self.blue_drone)] {
            if !arena.contains(spawn.position) {
                return Err(SetupError::OutOfArena {
                    entity,
                    position: spawn.position,
                });
            }
        }
        for (entity, position) in [("red flag", self.red_home), ("blue flag", self.blue_home)] {
            if !inside_closed(position) {
                return Err(SetupError::OutOfArena { entity, position });
            }
        }

        let obstacle = ObstacleBox::new(self.obstacle_center, self.obstacle_size, OBSTACLE_YAW);
        let buffer = tuning.obstacle_buffer;
        for (entity, spawn) in [("red drone", self.red_drone), ("blue drone", self.blue_drone)] {
            let p = spawn.position;
            if obstacle.blocks_xz(p.x, p.z, buffer) || obstacle.blocks_xy(p.x, p.y, buffer) {
                return Err(SetupError::SpawnInObstacle { entity });
            }
        }

        let distance = self.red_drone.position.distance(self.blue_drone.position);
        if distance <= tuning.collision_radius {
            return Err(SetupError::DronesOverlap {
                distance,
                radius: tuning.collision_radius,
            });
        }

        Ok(())
    }
}
