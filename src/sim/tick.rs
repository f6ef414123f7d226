//! Per-frame simulation step
//!
//! `tick` runs one frame: input, physics, hazard motion, collision response
//! and the phase transition table. Every rate is scaled by the frame's time
//! scale (1.0 at the reference frame rate).

use super::hazards::Frame;
use super::host::{GameHost, SoundEffect};
use super::level::start_level;
use super::state::{GamePhase, GameState};
use super::surface::SurfaceContact;
use crate::consts::*;
use crate::normalize_degrees;

/// Player actions sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Thrust,
    TurnLeft,
    TurnRight,
    Pause,
    Abort,
    Skip,
    Debug,
}

/// Input state for a single tick
///
/// One-shot actions (pause, abort, skip, debug) are consumed by `tick` when
/// they take effect so a held key does not repeat.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub pause: bool,
    pub abort: bool,
    pub skip: bool,
    pub debug: bool,
}

impl TickInput {
    fn slot(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Thrust => &mut self.thrust,
            Action::TurnLeft => &mut self.turn_left,
            Action::TurnRight => &mut self.turn_right,
            Action::Pause => &mut self.pause,
            Action::Abort => &mut self.abort,
            Action::Skip => &mut self.skip,
            Action::Debug => &mut self.debug,
        }
    }

    pub fn is_active(&self, action: Action) -> bool {
        match action {
            Action::Thrust => self.thrust,
            Action::TurnLeft => self.turn_left,
            Action::TurnRight => self.turn_right,
            Action::Pause => self.pause,
            Action::Abort => self.abort,
            Action::Skip => self.skip,
            Action::Debug => self.debug,
        }
    }

    pub fn set(&mut self, action: Action, active: bool) {
        *self.slot(action) = active;
    }

    /// Clear an action until the host reports it again
    pub fn consume(&mut self, action: Action) {
        *self.slot(action) = false;
    }

    /// Read and clear in one go
    fn take(&mut self, action: Action) -> bool {
        std::mem::take(self.slot(action))
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &mut TickInput, time_scale: f32, host: &mut dyn GameHost) {
    if matches!(state.phase, GamePhase::None | GamePhase::GameOver) {
        return;
    }

    // Pause and debug toggles work even while paused
    if matches!(state.phase, GamePhase::InGame | GamePhase::Paused) && input.take(Action::Pause) {
        state.phase = match state.phase {
            GamePhase::Paused => GamePhase::InGame,
            _ => GamePhase::Paused,
        };
        log::debug!("pause toggled: {}", state.phase.as_str());
    }
    if input.take(Action::Debug) {
        state.debug = !state.debug;
    }
    if state.phase == GamePhase::Paused {
        return;
    }

    state.frame += 1;
    handle_controls(state, input, time_scale, host);

    if state.phase.is_flying() {
        state.ship.apply_gravity(state.gravity, time_scale);
        let on_floor = state
            .ship
            .advance(time_scale, state.level_width as f32, state.level_height as f32);
        // A wreck that slipped through the ground stops at the level floor
        if on_floor && state.phase == GamePhase::Explode {
            log::debug!("wreck came to rest on the level floor");
            enter_death_wait(state, DEATH_TIMEOUT);
        }
    }
    if state.phase == GamePhase::Explode {
        state.ship.turn(DEATH_SPIN, time_scale);
        state.ship.refresh_hotspots();
    }

    advance_entities(state, time_scale, host);
    state.viewport.centre_on(state.ship.centre());

    if state.phase.is_flying() {
        check_collisions(state, time_scale, host);
    }
    collect_keys(state, time_scale, host);

    update_phase(state, time_scale, host);
    update_life_fade(state, time_scale);

    if state.level_text_timeout > 0.0 {
        state.level_text_timeout = (state.level_text_timeout - time_scale).max(0.0);
    }
}

fn handle_controls(
    state: &mut GameState,
    input: &mut TickInput,
    time_scale: f32,
    host: &mut dyn GameHost,
) {
    state.ship.thrusting = false;

    if state.phase == GamePhase::InGame {
        if input.thrust && state.fuel > 0.0 {
            state.ship.thrust(SHIP_THRUST, time_scale);
            state.fuel = (state.fuel - FUEL_BURN * time_scale).max(0.0);
        }
        if input.turn_left {
            state.ship.turn(-TURN_ANGLE, time_scale);
        }
        if input.turn_right {
            state.ship.turn(TURN_ANGLE, time_scale);
        }
    }

    if state.phase == GamePhase::Explode && input.take(Action::Skip) {
        let timeout = if state.lives == 0 { DEATH_TIMEOUT } else { 1.0 };
        enter_death_wait(state, timeout);
    }

    if state.phase == GamePhase::InGame && input.take(Action::Abort) {
        log::info!("level abandoned");
        crash(state, host);
        state.lives = 0;
    }
}

fn advance_entities(state: &mut GameState, time_scale: f32, host: &mut dyn GameHost) {
    let frame = Frame {
        ship: &state.ship,
        viewport: &state.viewport,
        level_size: glam::Vec2::new(state.level_width as f32, state.level_height as f32),
        time_scale,
    };
    for hazard in state.hazards.iter_mut() {
        if let Some(effect) = hazard.advance(&mut state.grid, &mut state.rng, &frame) {
            host.play(effect);
        }
    }
    for key in state.keys.iter_mut() {
        key.advance(time_scale);
    }
}

fn check_collisions(state: &mut GameState, time_scale: f32, host: &mut dyn GameHost) {
    if let Some(contact) = state.surface.check_collisions(&state.ship, time_scale) {
        match (state.phase, contact) {
            (GamePhase::InGame, SurfaceContact::Pad(p)) if landing_ok(state) => land(state, p, host),
            (GamePhase::InGame, _) => crash(state, host),
            _ => wreck_hit(state, false),
        }
        return;
    }

    let frame = Frame {
        ship: &state.ship,
        viewport: &state.viewport,
        level_size: glam::Vec2::new(state.level_width as f32, state.level_height as f32),
        time_scale,
    };
    let Some(i) = state.hazards.iter().position(|h| h.collides(&frame)) else {
        return;
    };

    let live_gate = state.hazards[i].is_live_gate();
    if let Some(effect) = state.hazards[i].on_hit(&mut state.grid) {
        host.play(effect);
    }
    match state.phase {
        GamePhase::InGame => crash(state, host),
        _ => wreck_hit(state, live_gate),
    }
}

fn collect_keys(state: &mut GameState, time_scale: f32, host: &mut dyn GameHost) {
    for key in state.keys.iter_mut() {
        if key.collides(&state.ship, &state.viewport, time_scale) {
            key.collect(&mut state.grid);
            state.keys_remaining = state.keys_remaining.saturating_sub(1);
            log::debug!("key collected, {} remaining", state.keys_remaining);
            host.play(SoundEffect::KeyCollect);
        }
    }
}

/// Upright, slow enough and holding every key
fn landing_ok(state: &GameState) -> bool {
    let angle = normalize_degrees(state.ship.angle);
    let upright = angle >= 360.0 - LANDING_ANGLE_TOLERANCE || angle <= LANDING_ANGLE_TOLERANCE;
    upright && state.safe_speed() && state.keys_remaining == 0
}

fn land(state: &mut GameState, pad: usize, host: &mut dyn GameHost) {
    let level = state.level as i64;
    let bonus = state.pads.get(pad).map_or(0, |p| p.size_bonus());
    state.level_score = SCORE_PER_LEVEL * level
        + bonus * SCORE_PAD_BONUS * level
        + (state.fuel / SCORE_FUEL_DIV) as i64;
    state.ship.vel = glam::Vec2::ZERO;
    state.phase = GamePhase::LevelComplete;
    state.complete_countdown = LEVEL_COMPLETE_COUNTDOWN;
    state.complete_pause = 0.0;
    log::info!("landed on pad {pad}, level score {}", state.level_score);
    host.play(SoundEffect::Land);
}

fn crash(state: &mut GameState, host: &mut dyn GameHost) {
    state.explode_ship();
    state.ship.bounce();
    host.play(SoundEffect::Explode);
}

/// The wreck struck something again
fn wreck_hit(state: &mut GameState, live_gate: bool) {
    if live_gate {
        enter_death_wait(state, DEATH_TIMEOUT);
        return;
    }
    state.ship.bounce();
    if -state.ship.vel.y < EXPLODE_SETTLE_SPEED {
        enter_death_wait(state, DEATH_TIMEOUT);
    }
}

fn enter_death_wait(state: &mut GameState, timeout: f32) {
    state.phase = GamePhase::DeathWait;
    state.death_timeout = timeout;
}

fn update_phase(state: &mut GameState, time_scale: f32, host: &mut dyn GameHost) {
    match state.phase {
        GamePhase::DeathWait => {
            state.death_timeout -= time_scale;
            if state.death_timeout <= 0.0 {
                let fading = state.life_fading();
                if state.lives == 0 || (state.lives == 1 && fading) {
                    state.phase = GamePhase::FadeToDeath;
                } else {
                    if fading {
                        state.life_alpha = LIFE_ALPHA_BASE + 1.0;
                        state.lives -= 1;
                    }
                    state.phase = GamePhase::FadeToRestart;
                }
                state.fade_alpha = 0.0;
                log::debug!("death wait over: {}", state.phase.as_str());
            }
        }
        GamePhase::FadeIn => {
            state.fade_alpha -= FADE_SPEED * time_scale;
            if state.fade_alpha < 0.0 {
                state.fade_alpha = 0.0;
                state.phase = GamePhase::InGame;
            }
        }
        GamePhase::FadeToRestart => {
            state.fade_alpha += FADE_SPEED * time_scale;
            if state.fade_alpha > 1.0 {
                start_level(state, host);
            }
        }
        GamePhase::FadeToDeath => {
            state.fade_alpha += FADE_SPEED * time_scale;
            if state.fade_alpha > 1.0 {
                state.fade_alpha = 1.0;
                state.phase = GamePhase::GameOver;
                log::info!("game over: score {}, level {}", state.score, state.level);
                host.play(SoundEffect::GameOver);
                host.check_score(state.score);
            }
        }
        GamePhase::LevelComplete => count_level_score(state, time_scale, host),
        _ => {}
    }
}

fn count_level_score(state: &mut GameState, time_scale: f32, host: &mut dyn GameHost) {
    if state.complete_countdown > 0.0 {
        state.complete_countdown -= time_scale;
        return;
    }

    if state.complete_pause > 0.0 {
        state.complete_pause -= time_scale;
        if state.complete_pause <= 0.0 {
            state.level += 1;
            state.phase = GamePhase::FadeToRestart;
            state.fade_alpha = 0.0;
        }
        return;
    }

    let step = 2 * state.level as i64;
    if state.level_score - step < 0 {
        state.score += state.level_score.max(0) as u64;
        state.level_score = 0;
        state.complete_pause = LEVEL_COMPLETE_PAUSE;
    } else {
        state.level_score -= step;
        state.score += step as u64;
    }
    check_extra_life(state, host);
}

fn check_extra_life(state: &mut GameState, host: &mut dyn GameHost) {
    if state.score > state.next_extra_life {
        state.lives += 1;
        state.next_extra_life *= 2;
        log::info!("extra life, {} lives", state.lives);
        host.play(SoundEffect::ExtraLife);
    }
}

fn update_life_fade(state: &mut GameState, time_scale: f32) {
    if state.life_alpha > LIFE_ALPHA_BASE {
        return;
    }
    state.life_alpha -= LIFE_FADE_SPEED * time_scale;
    if state.life_alpha < 0.0 {
        state.lives = state.lives.saturating_sub(1);
        state.life_alpha = LIFE_ALPHA_BASE + 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::grid::GridPos;
    use crate::sim::hazards::{ElectricGate, Hazard, Key, KeyColour};
    use crate::sim::host::{NullHost, RecordingHost};
    use crate::sim::level::new_game;
    use crate::sim::ship::hotspot_offsets;
    use glam::Vec2;

    /// A level in play with nothing in the sky and every key taken
    fn quiet_game(seed: u64) -> (GameState, RecordingHost) {
        let settings = Settings::default();
        let mut state = GameState::new(seed, &settings);
        let mut host = RecordingHost::default();
        new_game(&mut state, &settings, &mut host);
        state.hazards.clear();
        state.keys.clear();
        state.keys_remaining = 0;
        state.phase = GamePhase::InGame;
        state.fade_alpha = 0.0;
        host.sounds.clear();
        (state, host)
    }

    /// Put the ship over the first pad so its lowest hotspot crosses the pad next frame
    fn descend_onto_pad(state: &mut GameState, angle: f32) {
        let pad = state.pads[0];
        let pad_y = state.surface.world_y(pad.y);
        let lowest = hotspot_offsets(angle)
            .iter()
            .map(|p| p.y)
            .fold(f32::MIN, f32::max);

        state.gravity = 0.0;
        state.ship.angle = angle;
        state.ship.vel = Vec2::new(0.0, 1.5);
        state.ship.pos = Vec2::new(
            (pad.index * SURFACE_SIZE) as f32 + 10.0,
            // After this frame's move the lowest point sits 0.75px above the pad
            pad_y - lowest - 0.75 - 1.5,
        );
        state.ship.refresh_hotspots();
    }

    #[test]
    fn test_upright_slow_landing_completes_level() {
        let (mut state, mut host) = quiet_game(11);
        descend_onto_pad(&mut state, 0.0);

        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.level_score > 0);
        assert_eq!(host.sounds, vec![SoundEffect::Land]);
    }

    #[test]
    fn test_sideways_touchdown_explodes() {
        let (mut state, mut host) = quiet_game(11);
        descend_onto_pad(&mut state, 90.0);

        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);

        assert_eq!(state.phase, GamePhase::Explode);
        assert!(state.life_fading());
        assert!(state.ship.vel.y < 0.0);
        assert_eq!(host.sounds, vec![SoundEffect::Explode]);
    }

    #[test]
    fn test_landing_with_keys_outstanding_explodes() {
        let (mut state, mut host) = quiet_game(12);
        state.keys_remaining = 1;
        descend_onto_pad(&mut state, 0.0);

        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);
        assert_eq!(state.phase, GamePhase::Explode);
    }

    #[test]
    fn test_landing_score_formula() {
        let (mut state, mut host) = quiet_game(13);
        state.fuel = 500.0;
        descend_onto_pad(&mut state, 355.0);
        let bonus = state.pads[0].size_bonus();

        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.level_score, 100 + bonus * 10 + 50);
    }

    #[test]
    fn test_level_complete_counts_score_then_advances() {
        let (mut state, mut host) = quiet_game(14);
        state.phase = GamePhase::LevelComplete;
        state.level_score = 101;
        state.complete_countdown = LEVEL_COMPLETE_COUNTDOWN;

        let mut input = TickInput::default();
        for _ in 0..70 {
            tick(&mut state, &mut input, 1.0, &mut host);
        }
        assert_eq!(state.score, 0);

        // 50 steps of 2, then the odd point lands on the 51st
        for _ in 0..51 {
            tick(&mut state, &mut input, 1.0, &mut host);
        }
        assert_eq!(state.score, 101);
        assert_eq!(state.level_score, 0);
        assert_eq!(state.complete_pause, LEVEL_COMPLETE_PAUSE);

        for _ in 0..40 {
            tick(&mut state, &mut input, 1.0, &mut host);
        }
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::FadeToRestart);

        // Fade out, then the next level is built and fades in
        for _ in 0..11 {
            tick(&mut state, &mut input, 1.0, &mut host);
        }
        assert_eq!(state.phase, GamePhase::FadeIn);
        assert_eq!(state.level_width, 2080);
    }

    #[test]
    fn test_extra_life_threshold_doubles() {
        let (mut state, mut host) = quiet_game(15);
        state.score = 999;
        state.phase = GamePhase::LevelComplete;
        state.level_score = 10;
        let lives = state.lives;

        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);
        assert_eq!(state.score, 1001);
        assert_eq!(state.lives, lives + 1);
        assert_eq!(state.next_extra_life, 2000);
        assert!(host.sounds.contains(&SoundEffect::ExtraLife));
    }

    #[test]
    fn test_pause_freezes_physics() {
        let (mut state, mut host) = quiet_game(16);
        let mut input = TickInput {
            pause: true,
            ..TickInput::default()
        };
        tick(&mut state, &mut input, 1.0, &mut host);
        assert_eq!(state.phase, GamePhase::Paused);
        assert!(!input.pause);

        let pos = state.ship.pos;
        for _ in 0..10 {
            tick(&mut state, &mut input, 1.0, &mut host);
        }
        assert_eq!(state.ship.pos, pos);

        input.set(Action::Pause, true);
        tick(&mut state, &mut input, 1.0, &mut host);
        assert_eq!(state.phase, GamePhase::InGame);
        assert!(state.ship.pos != pos);
    }

    #[test]
    fn test_thrust_burns_fuel_until_empty() {
        let (mut state, mut host) = quiet_game(17);
        state.fuel = 2.0;
        let mut input = TickInput {
            thrust: true,
            ..TickInput::default()
        };

        tick(&mut state, &mut input, 1.0, &mut host);
        assert!(state.ship.thrusting);
        tick(&mut state, &mut input, 1.0, &mut host);
        assert_eq!(state.fuel, 0.0);

        let vy = state.ship.vel.y;
        tick(&mut state, &mut input, 1.0, &mut host);
        assert!(!state.ship.thrusting);
        assert_eq!(state.ship.vel.y, vy + GRAVITY);
    }

    #[test]
    fn test_time_scale_applies_to_turning() {
        let (mut state, mut host) = quiet_game(18);
        let mut input = TickInput {
            turn_right: true,
            ..TickInput::default()
        };
        tick(&mut state, &mut input, 2.0, &mut host);
        assert_eq!(state.ship.angle, 6.0);
    }

    #[test]
    fn test_abort_ends_game() {
        let (mut state, mut host) = quiet_game(19);
        let mut input = TickInput {
            abort: true,
            ..TickInput::default()
        };
        tick(&mut state, &mut input, 1.0, &mut host);
        assert_eq!(state.phase, GamePhase::Explode);
        assert_eq!(state.lives, 0);

        input.set(Action::Skip, true);
        tick(&mut state, &mut input, 1.0, &mut host);
        assert_eq!(state.phase, GamePhase::DeathWait);
        assert_eq!(state.death_timeout, DEATH_TIMEOUT - 1.0);

        let mut frames = 0;
        while state.phase != GamePhase::GameOver && frames < 500 {
            tick(&mut state, &mut input, 1.0, &mut host);
            frames += 1;
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(host.scores, vec![state.score]);

        // Nothing moves after the hand-off
        let frame = state.frame;
        tick(&mut state, &mut input, 1.0, &mut host);
        assert_eq!(state.frame, frame);
        assert_eq!(host.scores.len(), 1);
    }

    #[test]
    fn test_death_costs_one_life_and_restarts() {
        let (mut state, mut host) = quiet_game(20);
        let lives = state.lives;
        descend_onto_pad(&mut state, 90.0);
        let mut input = TickInput::default();
        tick(&mut state, &mut input, 1.0, &mut host);
        assert_eq!(state.phase, GamePhase::Explode);

        input.set(Action::Skip, true);
        tick(&mut state, &mut input, 1.0, &mut host);
        // One-frame wait when lives remain
        assert_eq!(state.phase, GamePhase::FadeToRestart);
        assert_eq!(state.lives, lives - 1);

        let mut frames = 0;
        while state.phase != GamePhase::InGame && frames < 100 {
            tick(&mut state, &mut input, 1.0, &mut host);
            frames += 1;
        }
        assert_eq!(state.phase, GamePhase::InGame);
        assert_eq!(state.lives, lives - 1);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_wreck_settles_into_death_wait() {
        let (mut state, mut host) = quiet_game(21);
        state.phase = GamePhase::Explode;
        let pad = state.pads[0];
        let ground = state.surface.world_y(pad.y);
        let lowest = hotspot_offsets(0.0).iter().map(|p| p.y).fold(f32::MIN, f32::max);

        state.gravity = 0.0;
        // This frame's spin brings the wreck upright
        state.ship.angle = 360.0 - DEATH_SPIN;
        state.ship.vel = Vec2::new(0.0, 0.08);
        state.ship.pos = Vec2::new(
            (pad.index * SURFACE_SIZE) as f32 + 10.0,
            ground - lowest - 0.04 - 0.08,
        );
        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);

        assert_eq!(state.phase, GamePhase::DeathWait);
        // The wait already counted down once this frame
        assert_eq!(state.death_timeout, DEATH_TIMEOUT - 1.0);
    }

    #[test]
    fn test_wreck_hitting_live_gate_skips_bounce() {
        let (mut state, mut host) = quiet_game(23);
        state.explode_ship();
        // Horizontal beam over x 320..544, y 260..292
        state
            .hazards
            .push(Hazard::Gate(ElectricGate::new(GridPos::new(10, 5), 6, false, 10.0)));

        // After this frame's move the feet sit 1px above the beam
        state.gravity = 0.0;
        state.ship.angle = 360.0 - DEATH_SPIN;
        state.ship.vel = Vec2::new(0.0, 2.0);
        state.ship.pos = Vec2::new(400.0, 226.0);
        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);

        assert_eq!(state.phase, GamePhase::DeathWait);
        assert_eq!(state.death_timeout, DEATH_TIMEOUT - 1.0);
        assert_eq!(state.ship.vel, Vec2::new(0.0, 2.0));
        assert_eq!(host.sounds, vec![SoundEffect::Electric]);
    }

    #[test]
    fn test_wreck_below_ground_stops_at_level_floor() {
        let (mut state, _) = quiet_game(24);
        state.explode_ship();
        let floor = (state.level_height - SHIP_HEIGHT) as f32;

        // Already under the terrain line, so no ground segment can catch it
        state.ship.angle = 45.0;
        state.ship.pos = Vec2::new(600.0, floor - 1.0);
        state.ship.vel = Vec2::new(0.5, 3.0);

        let mut host = NullHost;
        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);

        assert_eq!(state.phase, GamePhase::DeathWait);
        assert_eq!(state.death_timeout, DEATH_TIMEOUT - 1.0);
        assert_eq!(state.ship.pos.y, floor);

        let mut frames = 0;
        while state.phase == GamePhase::DeathWait && frames < 100 {
            tick(&mut state, &mut TickInput::default(), 1.0, &mut host);
            frames += 1;
        }
        assert_eq!(state.phase, GamePhase::FadeToRestart);
    }

    #[test]
    fn test_spinning_wreck_collides_with_current_rotation() {
        let (mut state, mut host) = quiet_game(25);
        state.explode_ship();
        state.gravity = 0.0;
        state.ship.angle = 10.0;
        state.ship.pos = Vec2::new(600.0, 300.0);
        state.ship.vel = Vec2::ZERO;
        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);

        let expected: Vec<Vec2> = hotspot_offsets(state.ship.angle)
            .iter()
            .map(|&o| state.ship.pos + o)
            .collect();
        assert_eq!(state.ship.angle, 10.0 + DEATH_SPIN);
        assert_eq!(state.ship.hotspots().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_debug_toggle_works_while_paused() {
        let (mut state, mut host) = quiet_game(26);
        state.phase = GamePhase::Paused;
        let mut input = TickInput::default();
        input.set(Action::Debug, true);
        assert!(input.is_active(Action::Debug));

        tick(&mut state, &mut input, 1.0, &mut host);
        assert!(state.debug);
        assert!(!input.is_active(Action::Debug));
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_key_collection() {
        let (mut state, mut host) = quiet_game(22);
        // One-cell grid so the key's claim is the only one
        state.grid.reset(1, 1);
        let cell = state.grid.alloc_point(&mut state.rng).unwrap();
        state.keys = vec![Key::new(cell, KeyColour::Blue)];
        state.keys_remaining = 1;

        // Key box spans y 103..129; after this frame's move the feet sit at y 101
        state.gravity = 0.0;
        state.ship.pos = Vec2::new(0.0, 64.0);
        state.ship.vel = Vec2::new(0.0, 6.0);
        state.ship.refresh_hotspots();

        tick(&mut state, &mut TickInput::default(), 1.0, &mut host);
        assert_eq!(state.keys_remaining, 0);
        assert!(!state.keys[0].active);
        assert!(!state.grid.is_filled(0, 0));
        assert!(host.sounds.contains(&SoundEffect::KeyCollect));
    }
}
