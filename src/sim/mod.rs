//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (red before blue)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod drone;
pub mod entity;
pub mod flag;
pub mod obstacle;
pub mod state;
pub mod tick;
pub mod wall;

pub use arena::Arena;
pub use drone::{Command, Drone, MoveResult, Rejection, Surroundings};
pub use entity::Pose;
pub use flag::{Flag, FlagState, HomeBase, Team};
pub use obstacle::ObstacleBox;
pub use state::{GameEvent, MatchState, ResetCause, ReturnCause};
pub use tick::{Controls, TickInput, tick};
pub use wall::DividerWall;
