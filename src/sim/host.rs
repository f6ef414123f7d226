//! Collaborators the simulation calls out to
//!
//! The core never plays audio or stores scores itself. It triggers sounds and
//! hands the final score to whatever host drives it.

use serde::{Deserialize, Serialize};

/// Sound effect triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ship destroyed
    Explode,
    /// Touched down on a pad
    Land,
    KeyCollect,
    /// A wall missile launched
    MissileFire,
    /// Ship struck a live gateway beam
    Electric,
    ExtraLife,
    LevelStart,
    GameOver,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Explode => "explode",
            SoundEffect::Land => "land",
            SoundEffect::KeyCollect => "key",
            SoundEffect::MissileFire => "fire",
            SoundEffect::Electric => "electric",
            SoundEffect::ExtraLife => "extra_life",
            SoundEffect::LevelStart => "level_start",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Outbound calls from `tick`
///
/// Both are fire-and-forget: nothing they return feeds back into the simulation.
pub trait GameHost {
    fn play(&mut self, effect: SoundEffect);

    /// Called once when the game ends with the final score
    fn check_score(&mut self, score: u64);
}

/// Host that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl GameHost for NullHost {
    fn play(&mut self, _effect: SoundEffect) {}

    fn check_score(&mut self, _score: u64) {}
}

/// Host that records every call, for tests and replays
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub sounds: Vec<SoundEffect>,
    pub scores: Vec<u64>,
}

impl GameHost for RecordingHost {
    fn play(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    fn check_score(&mut self, score: u64) {
        self.scores.push(score);
    }
}
