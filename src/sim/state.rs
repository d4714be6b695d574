//! Match state and the rules that span more than one entity
//!
//! `MatchState` owns every entity. Drones only decide whether their own move
//! is legal; everything that touches a flag, the opponent, or the whole match
//! (tagging, capture, carrying, interception, global reset) happens here.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::within_radius;
use super::drone::{Command, Drone, MoveResult, Rejection, Surroundings};
use super::entity::Pose;
use super::flag::{Flag, FlagState, HomeBase, Team};
use super::obstacle::ObstacleBox;
use super::wall::DividerWall;
use crate::consts::OBSTACLE_YAW;
use crate::error::SetupError;
use crate::settings::{Layout, Tuning};

/// Why a carried flag went back to its base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnCause {
    /// The opponent tried to move into the carrier
    Tagged,
    /// The carried flag came within reach of the opponent
    Intercepted,
}

/// Why the match was reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    /// A carrier tried to take a flag across the divider
    FlagCarriedAcrossDivider { carrier: Team },
    /// External request (reset button)
    Requested,
}

/// Discrete events for the renderer/HUD, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FlagCaptured { flag: Team, by: Team },
    FlagReturned { flag: Team, cause: ReturnCause },
    MatchReset { cause: ResetCause },
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    tuning: Tuning,
    layout: Layout,
    arena: Arena,
    obstacle: ObstacleBox,
    wall: DividerWall,
    /// Indexed by `Team::index`
    drones: [Drone; 2],
    flags: [Flag; 2],
    bases: [HomeBase; 2],
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of global resets since construction
    pub resets: u32,
    /// Pending events (not part of a snapshot)
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl MatchState {
    /// Build a match from a validated configuration
    pub fn new(tuning: Tuning, layout: Layout) -> Result<Self, SetupError> {
        tuning.validate()?;
        layout.validate(&tuning)?;

        let arena = Arena::from_size(layout.arena);
        let state = Self {
            obstacle: ObstacleBox::new(layout.obstacle_center, layout.obstacle_size, OBSTACLE_YAW),
            wall: DividerWall::new(layout.wall_x, arena.height, arena.depth),
            drones: Team::ALL.map(|team| Drone::new(team, layout.drone_spawn(team), &tuning)),
            flags: Team::ALL.map(|team| Flag::new(team, layout.home(team))),
            bases: Team::ALL.map(|team| HomeBase::new(team, layout.home(team))),
            arena,
            tuning,
            layout,
            time_ticks: 0,
            resets: 0,
            events: Vec::new(),
        };

        info!(
            "Match created: arena {}x{}x{}",
            state.arena.width, state.arena.height, state.arena.depth
        );
        Ok(state)
    }

    /// Match with the standard tuning and layout
    pub fn standard() -> Result<Self, SetupError> {
        Self::new(Tuning::default(), Layout::default())
    }

    /// Accept a deserialized snapshot only if it could have come from play
    pub fn restore(snapshot: MatchState) -> Result<Self, SetupError> {
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the configuration and the carry rules on an existing state.
    ///
    /// Deserializing bypasses `new`, so a snapshot must pass this before it
    /// is played.
    pub fn validate(&self) -> Result<(), SetupError> {
        let inconsistent = |reason| Err(SetupError::InconsistentSnapshot { reason });

        self.tuning.validate()?;
        self.layout.validate(&self.tuning)?;
        if self.arena != Arena::from_size(self.layout.arena) {
            return inconsistent("arena does not match the layout");
        }

        for (i, team) in Team::ALL.into_iter().enumerate() {
            let drone = &self.drones[i];
            if drone.team != team || self.flags[i].team != team || self.bases[i].team != team {
                return inconsistent("entities are not in team order");
            }
            if !self.arena.contains(drone.position()) {
                return inconsistent("drone outside the arena");
            }
            if drone.captured_flag == Some(team) {
                return inconsistent("drone carries its own flag");
            }
        }

        for flag in Team::ALL {
            let carriers = self
                .drones
                .iter()
                .filter(|d| d.captured_flag == Some(flag))
                .count();
            if carriers > 1 {
                return inconsistent("flag has more than one carrier");
            }
            if carriers == 0 && !self.flag(flag).is_home() {
                return inconsistent("uncarried flag is off its base");
            }
        }

        Ok(())
    }

    // === Accessors ===

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn obstacle(&self) -> &ObstacleBox {
        &self.obstacle
    }

    pub fn wall(&self) -> &DividerWall {
        &self.wall
    }

    pub fn drone(&self, team: Team) -> &Drone {
        &self.drones[team.index()]
    }

    pub fn flag(&self, team: Team) -> &Flag {
        &self.flags[team.index()]
    }

    pub fn base(&self, team: Team) -> &HomeBase {
        &self.bases[team.index()]
    }

    /// Which drone, if any, carries `flag`
    pub fn carrier_of(&self, flag: Team) -> Option<Team> {
        self.drones
            .iter()
            .find(|d| d.captured_flag == Some(flag))
            .map(|d| d.team)
    }

    pub fn flag_state(&self, flag: Team) -> FlagState {
        match self.carrier_of(flag) {
            Some(by) => FlagState::Carried { by },
            None => FlagState::AtHome,
        }
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Operations ===

    /// Flip obstacle visibility. Entities already overlapping it are only
    /// affected by their next move.
    pub fn toggle_obstacle(&mut self) {
        self.obstacle.toggle();
        debug!("Obstacle visible: {}", self.obstacle.visible);
    }

    /// Restore the initial layout: drone poses, flags at home, bases in place,
    /// no carried flags. Safe to call any number of times.
    pub fn reset(&mut self) {
        for team in Team::ALL {
            let i = team.index();
            self.drones[i].reset_to(self.layout.drone_spawn(team));
            self.flags[i].return_home();
            self.bases[i].pose = Pose::at(self.layout.home(team));
        }
    }

    /// Reset and announce it
    pub fn request_reset(&mut self) {
        self.reset_with(ResetCause::Requested);
    }

    /// Apply one fixed-size movement command to `team`'s drone
    pub fn apply_movement(&mut self, team: Team, command: Command) -> MoveResult {
        self.apply_movement_scaled(team, command, 1.0)
    }

    /// Apply one movement command with the translation scaled by `step_scale`
    pub fn apply_movement_scaled(&mut self, team: Team, command: Command, step_scale: f32) -> MoveResult {
        let result = {
            let [red, blue] = &mut self.drones;
            let (mover, opponent) = match team {
                Team::Red => (red, &*blue),
                Team::Blue => (blue, &*red),
            };
            let env = Surroundings {
                arena: &self.arena,
                obstacle: &self.obstacle,
                wall: &self.wall,
                opponent,
                tuning: &self.tuning,
            };
            mover.apply(command, step_scale, &env)
        };

        match result {
            MoveResult::TriggersReset => {
                info!("{team:?} carried a flag into the divider");
                self.reset_with(ResetCause::FlagCarriedAcrossDivider { carrier: team });
                return result;
            }
            MoveResult::Rejected(Rejection::Opponent) => {
                debug!("{team:?} {command:?} blocked by opponent");
                self.strip_flag(team.opponent(), ReturnCause::Tagged);
            }
            MoveResult::Rejected(reason) => {
                debug!("{team:?} {command:?} rejected: {reason:?}");
            }
            MoveResult::Moved { horizontal: true } => {
                if !self.drone(team).is_carrying() {
                    self.try_capture(team);
                }
            }
            MoveResult::Moved { horizontal: false } | MoveResult::Rotated => {}
        }

        if result.succeeded() {
            self.carry_flag(team);
        }
        result
    }

    fn reset_with(&mut self, cause: ResetCause) {
        self.reset();
        self.resets += 1;
        self.events.push(GameEvent::MatchReset { cause });
        info!("Match reset ({cause:?}), total resets: {}", self.resets);
    }

    /// Attach the first enemy flag within reach of `team`'s nose
    fn try_capture(&mut self, team: Team) {
        let drone = &self.drones[team.index()];
        let nose = drone.nose();
        let radius = self.tuning.capture_radius;

        let captured = Team::ALL.into_iter().find(|&flag| {
            flag != team
                && self.carrier_of(flag).is_none()
                && within_radius(nose, self.flags[flag.index()].position(), radius)
        });

        if let Some(flag) = captured {
            self.drones[team.index()].captured_flag = Some(flag);
            self.events.push(GameEvent::FlagCaptured { flag, by: team });
            info!("{team:?} captured the {flag:?} flag");
        }
    }

    /// Move a carried flag in front of its carrier, then check whether the
    /// opponent is close enough to take it back
    fn carry_flag(&mut self, team: Team) {
        let drone = &self.drones[team.index()];
        let Some(flag) = drone.captured_flag else {
            return;
        };

        let point = drone.carry_point(self.tuning.carry_offset);
        let yaw = drone.pose.yaw();
        self.flags[flag.index()].carry_to(point, yaw);

        let defender = self.drones[team.opponent().index()].position();
        if within_radius(point, defender, self.tuning.collision_radius) {
            self.strip_flag(team, ReturnCause::Intercepted);
        }
    }

    /// Send whatever `carrier` holds back home
    fn strip_flag(&mut self, carrier: Team, cause: ReturnCause) {
        if let Some(flag) = self.drones[carrier.index()].captured_flag.take() {
            self.flags[flag.index()].return_home();
            self.events.push(GameEvent::FlagReturned { flag, cause });
            info!("{flag:?} flag returned home ({cause:?})");
        }
    }

    /// Teleport a drone, bypassing every rule. Test setup only.
    #[cfg(test)]
    pub(crate) fn place_drone(&mut self, team: Team, position: glam::Vec3, yaw: f32) {
        self.drones[team.index()].pose = Pose::with_yaw(position, yaw);
    }
}
