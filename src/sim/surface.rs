//! Planet surface: height-field generation and ground collision
//!
//! The ground is a row of trapezoidal segments, one per `SURFACE_SIZE` pixels.
//! Heights are measured downward from the top of the surface band
//! (`level_height - MAX_SURFACE_HEIGHT`), so 0 is the highest ground.
//! Segments under a landing pad are flat and the pad records their height.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::LineSegment;
use super::ship::Ship;
use crate::consts::*;
use crate::error::SimError;

/// A landing pad spanning `length` surface columns from `index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingPad {
    pub index: i32,
    pub length: i32,
    /// Flattened height (surface units) assigned by `Surface::generate`
    pub y: i32,
}

impl LandingPad {
    pub fn new(index: i32, length: i32) -> Self {
        Self { index, length, y: 0 }
    }

    pub fn covers(&self, column: i32) -> bool {
        column >= self.index && column < self.index + self.length
    }

    /// Overlapping or directly adjacent
    fn touches(&self, index: i32, length: i32) -> bool {
        index <= self.index + self.length && self.index <= index + length
    }

    /// Shorter pads are worth more
    pub fn size_bonus(&self) -> i64 {
        ((MAX_PAD_SIZE + 2 - self.length) as i64).max(0)
    }
}

/// Pick `count` non-touching pads across `columns` surface columns
///
/// Each pad is rejection-sampled under a cap. If a pad cannot be placed the
/// level keeps the pads it already has.
pub fn place_pads<R: Rng + ?Sized>(rng: &mut R, columns: i32, count: u32) -> Vec<LandingPad> {
    let mut pads: Vec<LandingPad> = Vec::with_capacity(count as usize);
    for _ in 0..count {
        match try_place_pad(rng, columns, &pads) {
            Ok(pad) => pads.push(pad),
            Err(err) => {
                log::warn!("{err}");
                break;
            }
        }
    }
    pads
}

fn try_place_pad<R: Rng + ?Sized>(
    rng: &mut R,
    columns: i32,
    existing: &[LandingPad],
) -> Result<LandingPad, SimError> {
    for _ in 0..PAD_PLACEMENT_ATTEMPTS {
        let length = MAX_PAD_SIZE + rng.random_range(0..3);
        let index = rng.random_range(0..columns.max(1));
        if index + length > columns {
            continue;
        }
        if existing.iter().any(|p| p.touches(index, length)) {
            continue;
        }
        return Ok(LandingPad::new(index, length));
    }
    Err(SimError::PadPlacementExhausted {
        placed: existing.len(),
    })
}

/// Re-roll `base + offset` (offset in `[-variance/2, variance/2]`) until it lands in `[min, max]`
pub fn perturb_within<R: Rng + ?Sized>(
    rng: &mut R,
    base: i32,
    variance: i32,
    min: i32,
    max: i32,
) -> Result<i32, SimError> {
    let half = variance / 2;
    for _ in 0..REROLL_ATTEMPTS {
        let candidate = base + rng.random_range(-half..=half);
        if (min..=max).contains(&candidate) {
            return Ok(candidate);
        }
    }
    Err(SimError::RerollExhausted {
        attempts: REROLL_ATTEMPTS,
    })
}

/// One column of ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSegment {
    pub left: i32,
    pub right: i32,
    /// Texture U offset in [0, 1)
    pub tex_offset: f32,
    /// Index into the level's pads when this column is part of one
    pub pad: Option<usize>,
}

/// What the ship hit on the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceContact {
    Terrain,
    /// Index into the level's pads
    Pad(usize),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Surface {
    segments: Vec<SurfaceSegment>,
    level_height: i32,
    texture: u32,
}

impl Surface {
    /// Build the height-field for a level and record each pad's landing height
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        level_width: i32,
        level_height: i32,
        texture: u32,
        pads: &mut [LandingPad],
    ) -> Self {
        let count = (level_width / SURFACE_SIZE).max(0);
        let mut segments = Vec::with_capacity(count as usize);
        let mut previous: Option<i32> = None;

        for i in 0..count {
            let left = previous
                .unwrap_or_else(|| rng.random_range(MIN_SURFACE_HEIGHT..=MAX_SURFACE_HEIGHT));
            let pad = pads.iter().position(|p| p.covers(i));

            let right = match pad {
                Some(p) => {
                    pads[p].y = left;
                    left
                }
                None => perturb_within(rng, left, VARIANCE, MIN_SURFACE_HEIGHT, MAX_SURFACE_HEIGHT)
                    .unwrap_or_else(|err| {
                        log::warn!("surface column {i}: {err}, flattening");
                        left
                    }),
            };

            segments.push(SurfaceSegment {
                left,
                right,
                tex_offset: (i as u32 % TEXTURE_STEPS) as f32 / TEXTURE_STEPS as f32,
                pad,
            });
            previous = Some(right);
        }

        Self {
            segments,
            level_height,
            texture,
        }
    }

    pub fn segments(&self) -> &[SurfaceSegment] {
        &self.segments
    }

    pub fn texture(&self) -> u32 {
        self.texture
    }

    /// World y of the top of the surface band
    pub fn band_top(&self) -> f32 {
        (self.level_height - MAX_SURFACE_HEIGHT) as f32
    }

    /// World y of a surface height value
    pub fn world_y(&self, height: i32) -> f32 {
        self.band_top() + height as f32
    }

    /// Ground line of column `i` in world space
    pub fn segment_line(&self, i: usize) -> LineSegment {
        let seg = &self.segments[i];
        let x = (i as i32 * SURFACE_SIZE) as f32;
        LineSegment::from_coords(
            x,
            self.world_y(seg.left),
            x + SURFACE_SIZE as f32,
            self.world_y(seg.right),
        )
    }

    /// Test the ship against the ground columns around it
    pub fn check_collisions(&self, ship: &Ship, time_scale: f32) -> Option<SurfaceContact> {
        if self.segments.is_empty() {
            return None;
        }

        // Nothing on the ship can reach the band this frame
        let reach = ship.lowest_point() + (ship.vel.y * time_scale).max(0.0);
        if reach < self.band_top() {
            return None;
        }

        let centre = ((ship.pos.x + SHIP_WIDTH as f32 / 2.0) / SURFACE_SIZE as f32) as i32;
        let last = self.segments.len() as i32 - 1;
        let lo = (centre - 2).clamp(0, last) as usize;
        let hi = (centre + 2).clamp(0, last) as usize;

        (lo..=hi)
            .find(|&i| ship.segment_collision(&self.segment_line(i), time_scale))
            .map(|i| match self.segments[i].pad {
                Some(p) => SurfaceContact::Pad(p),
                None => SurfaceContact::Terrain,
            })
    }
}
