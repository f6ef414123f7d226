//! Lunar Lander entry point
//!
//! Headless sanity driver: plays one scripted game against the simulation
//! and reports the outcome. Usage: `lunar-lander [settings.json]`

use std::path::PathBuf;

use lunar_lander::sim::{
    Action, GameHost, GamePhase, GameState, SoundEffect, TickInput, new_game, tick,
};
use lunar_lander::{AudioManager, HighScores, Settings};

/// Seed used when the settings file does not pin one
const DEFAULT_SEED: u64 = 0x4C41_4E44;
/// Give up on a session that never reaches game over
const MAX_FRAMES: u64 = 20_000;
const THRUST_FRAMES: u32 = 100;
const COAST_FRAMES: u32 = 60;

/// Routes simulation call-outs to the audio tally and the leaderboard
struct SessionHost {
    audio: AudioManager,
    high_scores: HighScores,
    /// Level the running game is on, recorded with its final score
    level: u32,
}

impl GameHost for SessionHost {
    fn play(&mut self, effect: SoundEffect) {
        self.audio.play(effect);
    }

    fn check_score(&mut self, score: u64) {
        match self.high_scores.add_score(score, self.level) {
            Some(rank) => log::info!("score {score} entered the table at rank {rank}"),
            None => log::info!("score {score} did not qualify"),
        }
    }
}

struct Session {
    state: GameState,
    input: TickInput,
    host: SessionHost,
}

impl Session {
    fn step(&mut self) -> bool {
        if self.state.frame >= MAX_FRAMES {
            return false;
        }
        let before = self.state.phase;
        self.host.level = self.state.level;
        tick(&mut self.state, &mut self.input, 1.0, &mut self.host);
        self.host.audio.drain();
        if self.state.phase != before {
            log::info!(
                "frame {}: {} -> {}",
                self.state.frame,
                before.as_str(),
                self.state.phase.as_str()
            );
        }
        true
    }

    /// Tick until the phase matches or the frame cap is hit
    fn run_until(&mut self, done: impl Fn(GamePhase) -> bool) -> bool {
        while !done(self.state.phase) {
            if !self.step() {
                log::warn!("frame cap reached in {}", self.state.phase.as_str());
                return false;
            }
        }
        true
    }

    fn run_for(&mut self, frames: u32) {
        for _ in 0..frames {
            if !self.step() {
                return;
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Lunar Lander (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or(DEFAULT_SEED);

    let mut session = Session {
        state: GameState::new(seed, &settings),
        input: TickInput::default(),
        host: SessionHost {
            audio: AudioManager::from_settings(&settings),
            high_scores: HighScores::new(),
            level: settings.start_level,
        },
    };
    new_game(&mut session.state, &settings, &mut session.host);

    session.run_until(|p| p != GamePhase::FadeIn);

    session.input.set(Action::Thrust, true);
    session.run_for(THRUST_FRAMES);
    session.input.set(Action::Thrust, false);
    log::info!(
        "after thrust: pos ({:.1}, {:.1}), fuel {:.0}",
        session.state.ship.pos.x,
        session.state.ship.pos.y,
        session.state.fuel
    );
    session.run_for(COAST_FRAMES);

    if session.state.phase == GamePhase::InGame {
        session.input.set(Action::Abort, true);
        session.step();
    }
    if session.state.phase == GamePhase::Explode {
        session.input.set(Action::Skip, true);
        session.step();
    }
    let finished = session.run_until(|p| p == GamePhase::GameOver);

    let state = &session.state;
    println!("Seed:   {seed}");
    println!("Frames: {}", state.frame);
    println!("Phase:  {}", state.phase.as_str());
    println!("Level:  {}", state.level);
    println!("Score:  {}", state.score);
    println!("Sounds: {}", session.host.audio.total_plays());
    println!("High scores:");
    if session.host.high_scores.is_empty() {
        println!("  (none)");
    }
    for (i, entry) in session.host.high_scores.entries.iter().enumerate() {
        println!("  {:2}. {:>6}  level {}", i + 1, entry.score, entry.level);
    }
    if !finished {
        std::process::exit(1);
    }
}
