//! Fixed timestep simulation tick
//!
//! Input is level-triggered: a held control repeats its command every tick.
//! All mutation happens here, before the renderer reads the state.

use serde::{Deserialize, Serialize};

use super::drone::Command;
use super::flag::Team;
use super::state::MatchState;

/// Movement controls held by one pilot this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub forward: bool,
    pub backward: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub up: bool,
    pub down: bool,
}

impl Controls {
    /// Held commands in application order
    pub fn commands(&self) -> impl Iterator<Item = Command> {
        [
            (self.forward, Command::MoveForward),
            (self.backward, Command::MoveBackward),
            (self.rotate_left, Command::RotateLeft),
            (self.rotate_right, Command::RotateRight),
            (self.up, Command::MoveUp),
            (self.down, Command::MoveDown),
        ]
        .into_iter()
        .filter_map(|(held, command)| held.then_some(command))
    }

    pub fn is_idle(&self) -> bool {
        self.commands().next().is_none()
    }
}

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub red: Controls,
    pub blue: Controls,
    /// Obstacle toggle button (one-shot)
    pub toggle_obstacle: bool,
    /// Reset button (one-shot)
    pub reset: bool,
}

impl TickInput {
    pub fn controls(&self, team: Team) -> &Controls {
        match team {
            Team::Red => &self.red,
            Team::Blue => &self.blue,
        }
    }
}

/// Advance the match by one tick.
///
/// `dt` only matters when the tuning asks for elapsed-scaled steps; with the
/// default per-tick steps every tick moves the same distance.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) {
    if input.reset {
        state.request_reset();
    }
    if input.toggle_obstacle {
        state.toggle_obstacle();
    }

    state.time_ticks += 1;

    let step_scale = state.tuning().step_mode.scale(dt);
    for team in Team::ALL {
        for command in input.controls(team).commands() {
            state.apply_movement_scaled(team, command, step_scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::{Layout, StepMode, Tuning};
    use crate::sim::{FlagState, GameEvent, ResetCause};
    use glam::Vec3;

    fn forward() -> Controls {
        Controls {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_commands_order() {
        let all = Controls {
            forward: true,
            backward: true,
            rotate_left: true,
            rotate_right: true,
            up: true,
            down: true,
        };
        let commands: Vec<_> = all.commands().collect();
        assert_eq!(
            commands,
            vec![
                Command::MoveForward,
                Command::MoveBackward,
                Command::RotateLeft,
                Command::RotateRight,
                Command::MoveUp,
                Command::MoveDown,
            ]
        );
        assert!(Controls::default().is_idle());
    }

    #[test]
    fn test_held_key_repeats_every_tick() {
        let mut state = MatchState::standard().unwrap();
        let input = TickInput {
            red: forward(),
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.time_ticks, 10);
        assert!((state.drone(Team::Red).position().x - -7.0).abs() < 1e-4);
        // Blue held nothing
        assert_eq!(state.drone(Team::Blue).position(), Vec3::new(10.0, -3.0, 0.0));
    }

    #[test]
    fn test_per_tick_step_ignores_dt() {
        let mut state = MatchState::standard().unwrap();
        let input = TickInput {
            red: forward(),
            ..Default::default()
        };
        tick(&mut state, &input, 0.1);
        assert!((state.drone(Team::Red).position().x - -9.7).abs() < 1e-5);
    }

    #[test]
    fn test_elapsed_scaled_step() {
        let tuning = Tuning {
            step_mode: StepMode::ElapsedScaled,
            ..Default::default()
        };
        let mut state = MatchState::new(tuning, Layout::default()).unwrap();
        let input = TickInput {
            red: forward(),
            ..Default::default()
        };
        // Half a frame moves half a step
        tick(&mut state, &input, SIM_DT / 2.0);
        assert!((state.drone(Team::Red).position().x - -9.85).abs() < 1e-4);
    }

    #[test]
    fn test_long_frame_cannot_jump_obstacle() {
        let tuning = Tuning {
            step_mode: StepMode::ElapsedScaled,
            ..Default::default()
        };
        let mut state = MatchState::new(tuning, Layout::default()).unwrap();
        state.place_drone(Team::Red, Vec3::new(-5.0, -3.0, 0.0), 90.0);
        let input = TickInput {
            red: forward(),
            ..Default::default()
        };

        // Unclamped, 0.6s would carry red 10.8 units to x=5.8, past the far side
        tick(&mut state, &input, 0.6);
        assert_eq!(state.drone(Team::Red).position(), Vec3::new(-5.0, -3.0, 0.0));

        // Negative and NaN frame times do not move the drone at all
        tick(&mut state, &input, -1.0);
        tick(&mut state, &input, f32::NAN);
        assert_eq!(state.drone(Team::Red).position(), Vec3::new(-5.0, -3.0, 0.0));
    }

    #[test]
    fn test_one_shot_buttons() {
        let mut state = MatchState::standard().unwrap();
        tick(
            &mut state,
            &TickInput {
                toggle_obstacle: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert!(!state.obstacle().visible);

        tick(
            &mut state,
            &TickInput {
                red: forward(),
                reset: true,
                ..Default::default()
            },
            SIM_DT,
        );
        // Reset happens before movement in the same tick
        assert!((state.drone(Team::Red).position().x - -9.7).abs() < 1e-5);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::MatchReset { cause: ResetCause::Requested }]
        );
    }

    fn run(state: &mut MatchState, red: Controls, blue: Controls, ticks: usize) {
        let input = TickInput {
            red,
            blue,
            ..Default::default()
        };
        for _ in 0..ticks {
            tick(state, &input, SIM_DT);
        }
    }

    #[test]
    fn test_flag_capture_and_return_run() {
        let idle = Controls::default();
        let left = Controls {
            rotate_left: true,
            ..Default::default()
        };
        let right = Controls {
            rotate_right: true,
            ..Default::default()
        };
        let backward = Controls {
            backward: true,
            ..Default::default()
        };
        let mut state = MatchState::standard().unwrap();

        // Red swings north to z=6, blue swings south to z=-6, out of the way
        run(&mut state, right, right, 30);
        run(&mut state, forward(), forward(), 20);
        assert!((state.drone(Team::Red).position().z - 6.0).abs() < 1e-3);
        assert!((state.drone(Team::Blue).position().z - -6.0).abs() < 1e-3);

        // Red crosses the divider empty-handed, past the obstacle's footprint
        run(&mut state, left, idle, 30);
        run(&mut state, forward(), idle, 77);
        assert_eq!(state.resets, 0);
        assert!((state.drone(Team::Red).position().x - 13.1).abs() < 1e-3);

        // Face south and close in on the blue flag
        run(&mut state, left, idle, 30);
        let mut captured = false;
        for _ in 0..40 {
            run(&mut state, forward(), idle, 1);
            if state.flag_state(Team::Blue) == (FlagState::Carried { by: Team::Red }) {
                captured = true;
                break;
            }
        }
        assert!(captured, "red never reached the blue flag");
        assert!(!state.flag(Team::Blue).is_home());

        // Back off to z=6, face west and carry it home: the divider resets the match
        run(&mut state, backward, idle, 14);
        run(&mut state, left, idle, 30);
        assert_eq!(state.drone(Team::Red).captured_flag, Some(Team::Blue));
        for _ in 0..100 {
            run(&mut state, forward(), idle, 1);
            if state.resets > 0 {
                break;
            }
        }
        assert_eq!(state.resets, 1);
        assert_eq!(state.flag_state(Team::Blue), FlagState::AtHome);
        assert!(state.flag(Team::Blue).is_home());
        assert_eq!(state.drone(Team::Red).position(), Vec3::new(-10.0, -3.0, 0.0));
        assert_eq!(state.drone(Team::Blue).position(), Vec3::new(10.0, -3.0, 0.0));

        let events = state.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::FlagCaptured { flag: Team::Blue, by: Team::Red }));
        assert_eq!(
            events.last(),
            Some(&GameEvent::MatchReset {
                cause: ResetCause::FlagCarriedAcrossDivider { carrier: Team::Red }
            })
        );
    }
}

#[cfg(test)]
mod proptest_invariants {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn controls() -> impl Strategy<Value = Controls> {
        (any::<[bool; 6]>()).prop_map(|[forward, backward, rotate_left, rotate_right, up, down]| {
            Controls {
                forward,
                backward,
                rotate_left,
                rotate_right,
                up,
                down,
            }
        })
    }

    fn tick_input() -> impl Strategy<Value = TickInput> {
        (controls(), controls(), prop::bool::weighted(0.02)).prop_map(|(red, blue, toggle)| {
            TickInput {
                red,
                blue,
                toggle_obstacle: toggle,
                reset: false,
            }
        })
    }

    /// Each input is held for a few ticks so drones actually travel
    fn script() -> impl Strategy<Value = Vec<(TickInput, u8)>> {
        prop::collection::vec((tick_input(), 1u8..40), 1..60)
    }

    fn check_invariants(state: &MatchState) -> Result<(), TestCaseError> {
        let half = state.arena().half_extents();
        for team in Team::ALL {
            let p = state.drone(team).position();
            prop_assert!(p.x.abs() < half.x && p.z.abs() < half.z, "{team:?} left the arena at {p}");
            prop_assert!(p.y.abs() < half.y, "{team:?} left the arena vertically at {p}");
        }

        for flag in Team::ALL {
            let carriers = Team::ALL
                .iter()
                .filter(|&&t| state.drone(t).captured_flag == Some(flag))
                .count();
            prop_assert!(carriers <= 1, "{flag:?} flag has {carriers} carriers");
            if carriers == 0 {
                prop_assert!(state.flag(flag).is_home(), "{flag:?} flag loose off its base");
            }
        }

        for team in Team::ALL {
            if let Some(flag) = state.drone(team).captured_flag {
                prop_assert_ne!(flag, team, "{:?} carries its own flag", team);
            }
        }
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Drones stay inside the arena and flags obey the carry rules
        #[test]
        fn test_invariants_hold_every_tick(script in script()) {
            let mut state = MatchState::standard().unwrap();
            for (input, repeat) in &script {
                for _ in 0..*repeat {
                    tick(&mut state, input, SIM_DT);
                    check_invariants(&state)?;
                }
            }
        }

        /// Reset always lands on the same state
        #[test]
        fn test_reset_idempotent_after_any_play(script in script()) {
            let mut state = MatchState::standard().unwrap();
            for (input, repeat) in &script {
                for _ in 0..*repeat {
                    tick(&mut state, input, SIM_DT);
                }
            }
            state.reset();
            let once = state.clone();
            state.reset();
            prop_assert_eq!(state, once);
        }
    }
}
