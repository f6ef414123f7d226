//! Level construction and difficulty scaling
//!
//! `start_level` rebuilds everything for `state.level`: dimensions, the
//! object grid, pads and surface, then keys and hazards in grid order.
//! Hazards of a kind stop being placed at the first failed allocation.

use rand::Rng;

use super::grid::ObjectGrid;
use super::hazards::{Asteroid, ElectricGate, Hazard, Key, KeyColour, Mine, Missile, Side};
use super::host::{GameHost, SoundEffect};
use super::state::{GamePhase, GameState};
use super::surface::{Surface, place_pads};
use crate::consts::*;
use crate::settings::Settings;

pub fn level_width(level: u32) -> i32 {
    LEVEL_BASE_WIDTH + 2 * SURFACE_SIZE * level as i32
}

pub fn level_height(level: u32) -> i32 {
    LEVEL_BASE_HEIGHT + 2 * SURFACE_SIZE * level as i32
}

pub fn fuel_capacity(level: u32) -> f32 {
    FUEL_BASE + FUEL_PER_LEVEL * level as f32
}

pub fn key_count(level: u32) -> u32 {
    (level / 2 + level % 2).min(MAX_KEYS)
}

/// Grid size in cells for a level of the given pixel size
pub fn grid_size(width: i32, height: i32) -> (i32, i32) {
    let rows = (height - OBJ_GRID_TOP - MAX_SURFACE_HEIGHT - GRID_BOTTOM_MARGIN) / OBJ_GRID_SIZE;
    ((width / OBJ_GRID_SIZE).max(1), rows.max(1))
}

/// Reset score and lives from settings and build the first level
pub fn new_game(state: &mut GameState, settings: &Settings, host: &mut dyn GameHost) {
    state.score = 0;
    state.lives = settings.lives;
    state.level = settings.start_level;
    state.next_extra_life = settings.extra_life_score;
    state.frame = 0;
    log::info!(
        "new game: level {}, {} lives, seed {}",
        state.level,
        state.lives,
        state.seed
    );
    start_level(state, host);
}

/// Generate the current level and fade it in
pub fn start_level(state: &mut GameState, host: &mut dyn GameHost) {
    let level = state.level;
    let width = level_width(level);
    let height = level_height(level);

    state.level_width = width;
    state.level_height = height;
    state.gravity = GRAVITY;
    state.viewport.set_level_size(width as f32, height as f32);

    let (cols, rows) = grid_size(width, height);
    state.grid.reset(cols, rows);

    let pad_count = state.rng.random_range(1..=MAX_PADS);
    state.pads = place_pads(&mut state.rng, width / SURFACE_SIZE, pad_count);
    let texture = state.rng.random_range(0..SURFACE_TEXTURE_COUNT);
    state.surface = Surface::generate(&mut state.rng, width, height, texture, &mut state.pads);

    // Keys go first so they always find room
    state.keys = place_keys(&mut state.grid, &mut state.rng, key_count(level));
    state.keys_remaining = state.keys.len() as u32;

    state.hazards.clear();
    place_asteroids(&mut state.grid, &mut state.rng, level, &mut state.hazards);
    place_gates(&mut state.grid, &mut state.rng, level, &mut state.hazards);
    place_mines(&mut state.grid, &mut state.rng, level, &mut state.hazards);
    place_missiles(&mut state.grid, &mut state.rng, level, &mut state.hazards);

    state.ship.reset(width as f32);
    state.max_fuel = fuel_capacity(level);
    state.fuel = state.max_fuel;

    state.phase = GamePhase::FadeIn;
    state.fade_alpha = 1.0;
    state.life_alpha = LIFE_ALPHA_BASE + 1.0;
    state.death_timeout = 0.0;
    state.level_score = 0;
    state.complete_countdown = 0.0;
    state.complete_pause = 0.0;
    state.level_text_timeout = LEVEL_TEXT_TIMEOUT;
    state.viewport.centre_on(state.ship.centre());

    log::info!(
        "level {level}: {width}x{height}, {} pad(s), {} key(s), {} hazard(s)",
        state.pads.len(),
        state.keys.len(),
        state.hazards.len()
    );
    host.play(SoundEffect::LevelStart);
}

fn place_keys<R: Rng + ?Sized>(grid: &mut ObjectGrid, rng: &mut R, count: u32) -> Vec<Key> {
    let mut keys = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        match grid.alloc_point(rng) {
            Ok(pos) => keys.push(Key::new(pos, KeyColour::from_index(i))),
            Err(err) => {
                log::warn!("key {i} not placed: {err}");
                break;
            }
        }
    }
    keys
}

fn place_asteroids<R: Rng + ?Sized>(
    grid: &mut ObjectGrid,
    rng: &mut R,
    level: u32,
    out: &mut Vec<Hazard>,
) {
    let count = (level * 2 + rng.random_range(0..level + 3)).min(MAX_ASTEROIDS);
    for _ in 0..count {
        let width = rng.random_range(MIN_ASTEROID_WIDTH..MAX_ASTEROID_WIDTH);
        match grid.alloc_block(rng, width, ASTEROID_HEIGHT) {
            Ok(pos) => out.push(Hazard::Asteroid(Asteroid::generate(rng, pos, width))),
            Err(err) => {
                log::debug!("asteroid placement stopped: {err}");
                break;
            }
        }
    }
}

fn place_gates<R: Rng + ?Sized>(
    grid: &mut ObjectGrid,
    rng: &mut R,
    level: u32,
    out: &mut Vec<Hazard>,
) {
    let count = (level / 2 + rng.random_range(0..level.max(1))).min(MAX_GATEWAYS);
    for _ in 0..count {
        let length = rng.random_range(MIN_GATEWAY_LENGTH..MAX_GATEWAY_LENGTH);
        let vertical = rng.random_bool(0.5);
        let (w, h) = ElectricGate::footprint(length, vertical);
        match grid.alloc_block(rng, w, h) {
            Ok(pos) => {
                let timer = rng.random_range(10.0..80.0);
                out.push(Hazard::Gate(ElectricGate::new(pos, length, vertical, timer)));
            }
            Err(err) => {
                log::debug!("gateway placement stopped: {err}");
                break;
            }
        }
    }
}

fn place_mines<R: Rng + ?Sized>(
    grid: &mut ObjectGrid,
    rng: &mut R,
    level: u32,
    out: &mut Vec<Hazard>,
) {
    let cells = super::hazards::mine::MINE_CELLS;
    let count = (level / 2 + rng.random_range(0..level.max(1))).min(MAX_MINES);
    for _ in 0..count {
        match grid.alloc_block(rng, cells, cells) {
            Ok(pos) => {
                // Mines roam, so they only use the grid to find a clear start
                grid.unlock_block(pos, cells, cells);
                out.push(Hazard::Mine(Mine::new(pos)));
            }
            Err(err) => {
                log::debug!("mine placement stopped: {err}");
                break;
            }
        }
    }
}

fn place_missiles<R: Rng + ?Sized>(
    grid: &mut ObjectGrid,
    rng: &mut R,
    level: u32,
    out: &mut Vec<Hazard>,
) {
    let count = (level / 3).min(MAX_MISSILES);
    for _ in 0..count {
        let side = if rng.random_bool(0.5) { Side::Left } else { Side::Right };
        match grid.alloc_in_column(rng, side.column(grid.width())) {
            Ok(cell) => out.push(Hazard::Missile(Missile::new(cell, side))),
            Err(err) => {
                log::debug!("missile placement stopped: {err}");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hazards::MissileState;
    use crate::sim::host::RecordingHost;

    fn started(level: u32, seed: u64) -> GameState {
        let settings = Settings {
            start_level: level,
            ..Settings::default()
        };
        let mut state = GameState::new(seed, &settings);
        new_game(&mut state, &settings, &mut RecordingHost::default());
        state
    }

    #[test]
    fn test_level_formulas() {
        assert_eq!(level_width(1), 2040);
        assert_eq!(level_height(1), 1540);
        assert_eq!(fuel_capacity(1), 800.0);
        assert_eq!(key_count(1), 1);
        assert_eq!(key_count(2), 1);
        assert_eq!(key_count(3), 2);
        assert_eq!(key_count(20), MAX_KEYS);
        assert_eq!(grid_size(2040, 1540), (63, 32));
    }

    #[test]
    fn test_difficulty_scales_with_level() {
        let mut prev: Option<GameState> = None;
        for level in 1..=8 {
            let state = started(level, 1000 + level as u64);
            assert_eq!(state.keys.len() as u32, key_count(level));
            assert_eq!(state.keys_remaining, key_count(level));
            if let Some(p) = prev {
                assert_eq!(state.level_width - p.level_width, 2 * SURFACE_SIZE);
                assert_eq!(state.max_fuel - p.max_fuel, FUEL_PER_LEVEL);
                assert!(state.keys.len() >= p.keys.len());
            }
            prev = Some(state);
        }
    }

    #[test]
    fn test_start_level_resets_play_state() {
        let state = started(1, 7);
        assert_eq!(state.phase, GamePhase::FadeIn);
        assert_eq!(state.fade_alpha, 1.0);
        assert_eq!(state.fuel, state.max_fuel);
        assert_eq!(state.ship.pos.x, 1020.0);
        assert_eq!(state.ship.vel, glam::Vec2::ZERO);
        assert!(!state.pads.is_empty() && state.pads.len() <= MAX_PADS as usize);
        assert_eq!(state.surface.segments().len(), 102);
    }

    #[test]
    fn test_grid_claims_match_static_hazards() {
        let state = started(9, 55);
        let mut expected = state.keys.len() as i32;
        for hazard in &state.hazards {
            expected += match hazard {
                Hazard::Asteroid(rock) => rock.width * ASTEROID_HEIGHT,
                Hazard::Gate(gate) => {
                    let (w, h) = ElectricGate::footprint(gate.length, gate.vertical);
                    w * h
                }
                Hazard::Mine(_) => 0,
                Hazard::Missile(m) => (m.state == MissileState::Fixed) as i32,
            };
        }
        assert_eq!(state.grid.occupied() as i32, expected);
    }

    #[test]
    fn test_counts_respect_caps() {
        let state = started(30, 3);
        let count = |f: fn(&Hazard) -> bool| state.hazards.iter().filter(|h| f(h)).count() as u32;
        assert!(count(|h| matches!(h, Hazard::Asteroid(_))) <= MAX_ASTEROIDS);
        assert!(count(|h| matches!(h, Hazard::Gate(_))) <= MAX_GATEWAYS);
        assert!(count(|h| matches!(h, Hazard::Mine(_))) <= MAX_MINES);
        assert!(count(|h| matches!(h, Hazard::Missile(_))) <= MAX_MISSILES);
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = started(4, 77);
        let b = started(4, 77);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_level_start_sound() {
        let settings = Settings::default();
        let mut state = GameState::new(5, &settings);
        let mut host = RecordingHost::default();
        new_game(&mut state, &settings, &mut host);
        assert_eq!(host.sounds, vec![SoundEffect::LevelStart]);
    }
}
