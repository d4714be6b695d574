//! Drone CTF entry point
//!
//! Runs a headless session: a seeded script of held controls drives both
//! drones through the fixed-timestep loop, match events are logged as they
//! happen, and the final state is printed as a JSON snapshot.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use drone_ctf::consts::*;
use drone_ctf::sim::{Controls, MatchState, Team, TickInput, tick};

/// Seed for the pilot script
const DEMO_SEED: u64 = 0x0D20_4E5F;
/// Session length in seconds of simulated time
const DEMO_SECONDS: f32 = 60.0;
/// Render frame time; the tick loop catches up through the accumulator
const FRAME_DT: f32 = 1.0 / 50.0;
/// Ticks a pilot keeps the same controls held
const HOLD_TICKS: u32 = 20;

/// Headless session holding the match and the frame accumulator
struct Session {
    state: MatchState,
    accumulator: f32,
    input: TickInput,
    hold_remaining: u32,
    rng: Pcg32,
}

impl Session {
    fn new(state: MatchState, seed: u64) -> Self {
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            hold_remaining: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Run as many simulation ticks as the frame time allows
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.next_input();
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.toggle_obstacle = false;
            self.input.reset = false;
        }

        for event in self.state.drain_events() {
            log::info!("tick {}: {:?}", self.state.time_ticks, event);
        }
    }

    /// Pick fresh held controls every `HOLD_TICKS` ticks
    fn next_input(&mut self) {
        if self.hold_remaining == 0 {
            self.input.red = random_controls(&mut self.rng);
            self.input.blue = random_controls(&mut self.rng);
            self.input.toggle_obstacle = self.rng.random_bool(0.02);
            self.hold_remaining = HOLD_TICKS;
        }
        self.hold_remaining -= 1;
    }
}

fn random_controls(rng: &mut Pcg32) -> Controls {
    Controls {
        forward: rng.random_bool(0.6),
        backward: rng.random_bool(0.1),
        rotate_left: rng.random_bool(0.25),
        rotate_right: rng.random_bool(0.25),
        up: rng.random_bool(0.1),
        down: rng.random_bool(0.1),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let state = MatchState::standard()?;
    for team in Team::ALL {
        log::info!("{:?} drone at {}", team, state.drone(team).position());
    }

    let mut session = Session::new(state, DEMO_SEED);
    let frames = (DEMO_SECONDS / FRAME_DT) as u32;
    for _ in 0..frames {
        session.update(FRAME_DT);
    }

    log::info!(
        "Session over after {} ticks, {} resets",
        session.state.time_ticks,
        session.state.resets
    );
    let snapshot = serde_json::to_string_pretty(&session.state)?;
    MatchState::restore(serde_json::from_str(&snapshot)?)?;
    println!("{snapshot}");
    Ok(())
}
