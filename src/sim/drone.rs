//! Drone movement integrator and collision arbiter
//!
//! A drone evaluates a single command against its surroundings and either
//! commits the new pose or leaves itself untouched. It never mutates anything
//! else: side effects on flags, the opponent, or the match as a whole are
//! reported through [`MoveResult`] and applied by the match state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::within_radius;
use super::entity::Pose;
use super::flag::Team;
use super::obstacle::ObstacleBox;
use super::wall::DividerWall;
use crate::settings::{DroneSpawn, Tuning};

/// A single movement command for one drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveForward,
    MoveBackward,
    MoveUp,
    MoveDown,
    RotateLeft,
    RotateRight,
}

/// Why a move was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Candidate left the open arena volume
    OutOfBounds,
    /// Candidate entered the padded obstacle volume
    Obstacle,
    /// Candidate came within the collision radius of the opponent
    Opponent,
}

/// Outcome of evaluating a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// Position committed; `horizontal` is false for up/down moves
    Moved { horizontal: bool },
    /// Yaw changed (rotation always succeeds)
    Rotated,
    /// Nothing changed
    Rejected(Rejection),
    /// Nothing changed, and the carrier tried to take a flag across the divider
    TriggersReset,
}

impl MoveResult {
    /// Did the drone's pose change?
    pub fn succeeded(&self) -> bool {
        matches!(self, MoveResult::Moved { .. } | MoveResult::Rotated)
    }
}

/// Everything a drone must not run into, borrowed for one command
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub arena: &'a Arena,
    pub obstacle: &'a ObstacleBox,
    pub wall: &'a DividerWall,
    pub opponent: &'a Drone,
    pub tuning: &'a Tuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub team: Team,
    pub pose: Pose,
    /// Translation per tick
    pub speed: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
    /// Center-to-nose distance
    pub size: f32,
    /// Handle of the enemy flag being carried, if any
    pub captured_flag: Option<Team>,
}

impl Drone {
    pub fn new(team: Team, spawn: DroneSpawn, tuning: &Tuning) -> Self {
        Self {
            team,
            pose: Pose::with_yaw(spawn.position, spawn.yaw),
            speed: tuning.drone_speed,
            rotation_speed: tuning.rotation_speed,
            size: tuning.drone_size,
            captured_flag: None,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    #[inline]
    pub fn is_carrying(&self) -> bool {
        self.captured_flag.is_some()
    }

    /// Point at the tip of the drone, used for capture tests
    pub fn nose(&self) -> Vec3 {
        self.pose.position + self.pose.forward() * self.size
    }

    /// Where a carried flag rides: `offset` past the nose, at drone height
    pub fn carry_point(&self, offset: f32) -> Vec3 {
        self.pose.position + self.pose.forward() * (self.size + offset)
    }

    /// Restore the spawn pose and drop any carried-flag handle
    pub fn reset_to(&mut self, spawn: DroneSpawn) {
        self.pose = Pose::with_yaw(spawn.position, spawn.yaw);
        self.captured_flag = None;
    }

    /// Evaluate `command` and commit it if nothing blocks it.
    ///
    /// `step_scale` multiplies the per-tick translation (1.0 for fixed steps).
    pub fn apply(&mut self, command: Command, step_scale: f32, env: &Surroundings<'_>) -> MoveResult {
        let step = self.speed * step_scale;
        match command {
            Command::MoveForward => self.move_horizontal(step, env),
            Command::MoveBackward => self.move_horizontal(-step, env),
            Command::MoveUp => self.move_vertical(step, env),
            Command::MoveDown => self.move_vertical(-step, env),
            Command::RotateLeft => {
                self.pose.turn(self.rotation_speed);
                MoveResult::Rotated
            }
            Command::RotateRight => {
                self.pose.turn(-self.rotation_speed);
                MoveResult::Rotated
            }
        }
    }

    /// Signed move along the current heading. Checks run in a fixed order:
    /// bounds, obstacle, divider, opponent.
    fn move_horizontal(&mut self, distance: f32, env: &Surroundings<'_>) -> MoveResult {
        let current = self.pose.position;
        let candidate = current + self.pose.forward() * distance;

        if !env.arena.contains_xz(candidate.x, candidate.z) {
            return MoveResult::Rejected(Rejection::OutOfBounds);
        }
        if env
            .obstacle
            .blocks_xz(candidate.x, candidate.z, env.tuning.obstacle_buffer)
        {
            return MoveResult::Rejected(Rejection::Obstacle);
        }
        if self.is_carrying() && env.wall.is_crossed(current.x, candidate.x) {
            return MoveResult::TriggersReset;
        }
        if within_radius(candidate, env.opponent.position(), env.tuning.collision_radius) {
            return MoveResult::Rejected(Rejection::Opponent);
        }

        self.pose.position.x = candidate.x;
        self.pose.position.z = candidate.z;
        MoveResult::Moved { horizontal: true }
    }

    /// Signed climb. Only bounds and the obstacle's front profile apply.
    fn move_vertical(&mut self, distance: f32, env: &Surroundings<'_>) -> MoveResult {
        let x = self.pose.position.x;
        let y = self.pose.position.y + distance;

        if !env.arena.contains_y(y) {
            return MoveResult::Rejected(Rejection::OutOfBounds);
        }
        if env.obstacle.blocks_xy(x, y, env.tuning.obstacle_buffer) {
            return MoveResult::Rejected(Rejection::Obstacle);
        }

        self.pose.position.y = y;
        MoveResult::Moved { horizontal: false }
    }
}
