//! Sound effect bookkeeping
//!
//! The simulation only names the effect to play. `AudioManager` applies the
//! volume settings and keeps a tally of what was triggered, which a front end
//! can drain to drive a real mixer.

use std::collections::HashMap;

use crate::settings::Settings;
use crate::sim::SoundEffect;

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    plays: HashMap<SoundEffect, u32>,
    /// Effects triggered since the last `drain`, with the volume to play at
    pending: Vec<(SoundEffect, f32)>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            plays: HashMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Trigger a sound effect
    ///
    /// Every trigger is counted; only audible ones are queued for output.
    pub fn play(&mut self, effect: SoundEffect) {
        *self.plays.entry(effect).or_insert(0) += 1;

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("sfx {} at {:.2}", effect.as_str(), vol);
        self.pending.push((effect, vol));
    }

    /// How many times an effect has been triggered
    pub fn play_count(&self, effect: SoundEffect) -> u32 {
        self.plays.get(&effect).copied().unwrap_or(0)
    }

    pub fn total_plays(&self) -> u32 {
        self.plays.values().sum()
    }

    /// Take the queued effects
    pub fn drain(&mut self) -> Vec<(SoundEffect, f32)> {
        std::mem::take(&mut self.pending)
    }
}
