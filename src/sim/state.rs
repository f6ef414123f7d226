//! Game state and core simulation types
//!
//! Everything a running game owns lives in `GameState`. A seed plus the
//! stream of inputs and time scales reproduces a game exactly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::ObjectGrid;
use super::hazards::{Hazard, Key};
use super::ship::Ship;
use super::surface::{LandingPad, Surface};
use super::viewport::Viewport;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No game started yet
    None,
    /// Ship under player control
    InGame,
    /// Ship destroyed, wreck still tumbling
    Explode,
    /// Final score handed off; nothing left to simulate
    GameOver,
    /// Short wait after the wreck settles
    DeathWait,
    /// Level fading in from black
    FadeIn,
    /// Fading out before the game-over hand-off
    FadeToDeath,
    /// Fading out before the level is rebuilt
    FadeToRestart,
    /// Landed; score counting up
    LevelComplete,
    /// Physics frozen
    Paused,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::None => "None",
            GamePhase::InGame => "InGame",
            GamePhase::Explode => "Explode",
            GamePhase::GameOver => "GameOver",
            GamePhase::DeathWait => "DeathWait",
            GamePhase::FadeIn => "FadeIn",
            GamePhase::FadeToDeath => "FadeToDeath",
            GamePhase::FadeToRestart => "FadeToRestart",
            GamePhase::LevelComplete => "LevelComplete",
            GamePhase::Paused => "Paused",
        }
    }

    /// Phases in which the ship moves and can collide
    pub fn is_flying(&self) -> bool {
        matches!(self, GamePhase::InGame | GamePhase::Explode)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,

    // === Progress ===
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Score above which the next extra life is awarded
    pub next_extra_life: u64,

    // === Level ===
    pub level_width: i32,
    pub level_height: i32,
    pub gravity: f32,
    pub fuel: f32,
    pub max_fuel: f32,

    // === Entities ===
    pub ship: Ship,
    pub surface: Surface,
    pub pads: Vec<LandingPad>,
    pub grid: ObjectGrid,
    pub hazards: Vec<Hazard>,
    pub keys: Vec<Key>,
    pub keys_remaining: u32,
    pub viewport: Viewport,

    // === Timers (frames) and fades ===
    /// Screen fade, 0 = clear, 1 = black
    pub fade_alpha: f32,
    /// Lives-counter fade; above `LIFE_ALPHA_BASE` means idle
    pub life_alpha: f32,
    pub death_timeout: f32,
    pub level_text_timeout: f32,
    /// Landing score still to be counted into `score`
    pub level_score: i64,
    pub complete_countdown: f32,
    pub complete_pause: f32,

    /// Debug overlay (hotspots, grid, timers) requested by the player.
    /// The simulation only toggles it; the renderer reads it.
    pub debug: bool,
    /// Frames simulated (not counting pauses)
    pub frame: u64,
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create an idle state; call `new_game` to start playing
    pub fn new(seed: u64, settings: &Settings) -> Self {
        Self {
            phase: GamePhase::None,
            level: settings.start_level,
            lives: settings.lives,
            score: 0,
            next_extra_life: settings.extra_life_score,
            level_width: 0,
            level_height: 0,
            gravity: GRAVITY,
            fuel: 0.0,
            max_fuel: 0.0,
            ship: Ship::new(),
            surface: Surface::default(),
            pads: Vec::new(),
            grid: ObjectGrid::default(),
            hazards: Vec::new(),
            keys: Vec::new(),
            keys_remaining: 0,
            viewport: Viewport::new(settings.screen_width as f32, settings.screen_height as f32),
            fade_alpha: 1.0,
            life_alpha: LIFE_ALPHA_BASE + 1.0,
            death_timeout: 0.0,
            level_text_timeout: 0.0,
            level_score: 0,
            complete_countdown: 0.0,
            complete_pause: 0.0,
            debug: false,
            frame: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Destroy the ship and start the lives-counter fade
    pub fn explode_ship(&mut self) {
        log::debug!("ship exploded at ({:.1}, {:.1})", self.ship.pos.x, self.ship.pos.y);
        self.phase = GamePhase::Explode;
        self.life_alpha = LIFE_ALPHA_BASE - 1.0;
    }

    /// Lives-counter fade in progress
    pub fn life_fading(&self) -> bool {
        self.life_alpha < LIFE_ALPHA_BASE
    }

    /// Remaining fuel in [0, 1]
    pub fn fuel_fraction(&self) -> f32 {
        if self.max_fuel <= 0.0 {
            0.0
        } else {
            (self.fuel / self.max_fuel).clamp(0.0, 1.0)
        }
    }

    /// Descent-speed gauge width in pixels
    pub fn speed_bar(&self) -> f32 {
        (self.ship.vel.y * 15.0).clamp(0.0, 124.0)
    }

    /// Whether a descent speed is slow enough to land
    pub fn safe_speed(&self) -> bool {
        self.ship.vel.y < LAND_SPEED
    }
}
