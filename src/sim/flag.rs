//! Teams, flags and home bases

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::Pose;
use crate::consts::BASE_RADIUS;

/// Side of the arena. Also the handle for that side's drone, flag and base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    /// Fixed iteration order for anything that visits both teams
    pub const ALL: [Team; 2] = [Team::Red, Team::Blue];

    /// Index into the two-slot entity tables
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// Where a flag currently is, from the match's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagState {
    AtHome,
    Carried { by: Team },
}

/// A capturable flag. Its home never moves after setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    pub team: Team,
    pub pose: Pose,
    home: Vec3,
}

impl Flag {
    pub fn new(team: Team, home: Vec3) -> Self {
        Self {
            team,
            pose: Pose::at(home),
            home,
        }
    }

    #[inline]
    pub fn home(&self) -> Vec3 {
        self.home
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    pub fn is_home(&self) -> bool {
        self.pose.position == self.home
    }

    /// Put the flag back on its base
    pub fn return_home(&mut self) {
        self.pose = Pose::at(self.home);
    }

    /// Move the flag while it is being carried
    pub fn carry_to(&mut self, position: Vec3, yaw: f32) {
        self.pose = Pose::with_yaw(position, yaw);
    }
}

/// Circular platform marking a team's home. Visual only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeBase {
    pub team: Team,
    pub pose: Pose,
    pub radius: f32,
}

impl HomeBase {
    pub fn new(team: Team, position: Vec3) -> Self {
        Self {
            team,
            pose: Pose::at(position),
            radius: BASE_RADIUS,
        }
    }
}
