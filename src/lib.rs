//! Lunar Lander - a 2D physics lander on procedurally generated planets
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, ship physics, hazards, game phases)
//! - `settings`: New-game configuration read from a JSON key-value file
//! - `highscores`: Leaderboard that receives the final score of each game
//! - `audio`: Sound trigger bookkeeping for the host
//! - `error`: Typed errors for bounded retries and configuration

pub mod audio;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use audio::AudioManager;
pub use error::{SettingsError, SimError};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    // === Object grid ===
    /// Side of one grid cell (pixels)
    pub const OBJ_GRID_SIZE: i32 = 32;
    /// World-space y of grid row 0
    pub const OBJ_GRID_TOP: i32 = 100;
    /// Rejection-sampling cap for grid allocation
    pub const GRID_ALLOC_ATTEMPTS: u32 = 10_000;
    /// Gap between the last grid row and the top of the surface band
    pub const GRID_BOTTOM_MARGIN: i32 = 100;

    // === Surface ===
    /// Width of one surface segment (pixels)
    pub const SURFACE_SIZE: i32 = 20;
    pub const MIN_SURFACE_HEIGHT: i32 = 0;
    pub const MAX_SURFACE_HEIGHT: i32 = 300;
    /// Surface perturbation range
    pub const VARIANCE: i32 = 50;
    /// Asteroid contour perturbation range
    pub const AS_VARIANCE: i32 = 64;
    /// Cap on re-rolling a perturbation into range
    pub const REROLL_ATTEMPTS: u32 = 1_000;
    pub const SURFACE_TEXTURE_COUNT: u32 = 5;
    /// Texture U-offset steps before the tiling wraps
    pub const TEXTURE_STEPS: u32 = 10;

    // === Landing pads ===
    pub const MAX_PADS: u32 = 3;
    /// Shortest pad length in segments
    pub const MAX_PAD_SIZE: i32 = 3;
    pub const PAD_PLACEMENT_ATTEMPTS: u32 = 1_000;

    // === Level ===
    pub const LEVEL_BASE_WIDTH: i32 = 2000;
    pub const LEVEL_BASE_HEIGHT: i32 = 1500;

    // === Ship ===
    pub const SHIP_WIDTH: i32 = 32;
    pub const SHIP_HEIGHT: i32 = 32;
    pub const SHIP_START_Y: f32 = 60.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.035;
    /// Thrust acceleration (pixels/frame²)
    pub const SHIP_THRUST: f32 = 0.15;
    /// Turn rate (degrees/frame)
    pub const TURN_ANGLE: f32 = 3.0;
    /// Fastest safe touchdown speed
    pub const LAND_SPEED: f32 = 2.0;
    /// Degrees either side of upright that still count as a landing
    pub const LANDING_ANGLE_TOLERANCE: f32 = 30.0;
    /// Wreck spin while exploding (degrees/frame)
    pub const DEATH_SPIN: f32 = 5.0;
    /// Rebound speed below which a wreck has come to rest
    pub const EXPLODE_SETTLE_SPEED: f32 = 0.05;

    // === Fuel ===
    pub const FUEL_BASE: f32 = 750.0;
    pub const FUEL_PER_LEVEL: f32 = 50.0;
    /// Fuel burnt per frame of thrust
    pub const FUEL_BURN: f32 = 1.0;

    // === Lives and timers (frames) ===
    pub const START_LIVES: u32 = 3;
    pub const EXTRA_LIFE_SCORE: u64 = 1000;
    pub const DEATH_TIMEOUT: f32 = 50.0;
    pub const LEVEL_TEXT_TIMEOUT: f32 = 75.0;
    pub const FADE_SPEED: f32 = 0.1;
    pub const LIFE_ALPHA_BASE: f32 = 2.0;
    pub const LIFE_FADE_SPEED: f32 = 0.03;
    pub const LEVEL_COMPLETE_COUNTDOWN: f32 = 70.0;
    pub const LEVEL_COMPLETE_PAUSE: f32 = 40.0;

    // === Scoring ===
    pub const SCORE_PER_LEVEL: i64 = 100;
    pub const SCORE_PAD_BONUS: i64 = 10;
    pub const SCORE_FUEL_DIV: f32 = 10.0;

    // === Hazards ===
    pub const MAX_KEYS: u32 = 5;
    pub const KEY_FADE_SPEED: f32 = 0.02;

    pub const MAX_ASTEROIDS: u32 = 50;
    pub const MIN_ASTEROID_WIDTH: i32 = 4;
    pub const MAX_ASTEROID_WIDTH: i32 = 15;
    /// Asteroid height in grid cells
    pub const ASTEROID_HEIGHT: i32 = 4;

    pub const MAX_GATEWAYS: u32 = 4;
    pub const MIN_GATEWAY_LENGTH: i32 = 3;
    pub const MAX_GATEWAY_LENGTH: i32 = 10;
    /// Gateway timer value below which the full beam is live
    pub const GATEWAY_ACTIVE: f32 = 30.0;
    /// Gateway timer reload
    pub const GATEWAY_PERIOD: f32 = 100.0;

    pub const MAX_MINES: u32 = 5;
    /// Mine glide speed between cells (pixels/frame)
    pub const MINE_MOVE_SPEED: f32 = 0.5;
    /// Direction candidates a mine tries before stopping
    pub const MINE_DIR_TRIES: u32 = 5;
    /// Cells a mine commits to a direction before re-rolling
    pub const MINE_COMMIT: u32 = 5;

    pub const MAX_MISSILES: u32 = 4;
    pub const MISSILE_ACCEL: f32 = 0.1;
    pub const MISSILE_MAX_SPEED: f32 = 8.0;
    pub const MISSILE_HORIZ_FIRE_RANGE: f32 = 400.0;
    pub const MISSILE_VERT_FIRE_RANGE: f32 = 64.0;
    pub const MISSILE_WIDTH: f32 = 32.0;
    pub const MISSILE_HEIGHT: f32 = 16.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// World-space pixel position of the top-left corner of a grid cell
#[inline]
pub fn grid_to_world(x: i32, y: i32) -> glam::Vec2 {
    use consts::{OBJ_GRID_SIZE, OBJ_GRID_TOP};
    glam::Vec2::new((x * OBJ_GRID_SIZE) as f32, (y * OBJ_GRID_SIZE + OBJ_GRID_TOP) as f32)
}
