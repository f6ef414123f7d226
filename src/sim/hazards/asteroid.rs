//! Asteroids: static rocks with jagged top and bottom contours
//!
//! An asteroid is `width` cells wide and `ASTEROID_HEIGHT` cells tall. The
//! upper contour lives in the top two cells and the lower contour in the
//! bottom two; both taper to the middle line at each end so the outline closes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::geometry::LineSegment;
use crate::sim::grid::GridPos;
use crate::sim::ship::Ship;
use crate::sim::surface::perturb_within;
use crate::sim::viewport::Viewport;

/// One cell-wide contour piece; heights in `[0, AS_VARIANCE]` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsteroidPoly {
    pub left: i32,
    pub right: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: GridPos,
    pub width: i32,
    up: Vec<AsteroidPoly>,
    down: Vec<AsteroidPoly>,
}

fn contour<R: Rng + ?Sized>(rng: &mut R, width: i32) -> Vec<AsteroidPoly> {
    let mut polys = Vec::with_capacity(width as usize);
    let mut left = rng.random_range(0..AS_VARIANCE);
    for _ in 0..width {
        let right = perturb_within(rng, left, AS_VARIANCE, 0, AS_VARIANCE).unwrap_or_else(|err| {
            log::warn!("asteroid contour: {err}");
            left
        });
        polys.push(AsteroidPoly { left, right });
        left = right;
    }
    polys
}

impl Asteroid {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, pos: GridPos, width: i32) -> Self {
        let mut up = contour(rng, width);
        let mut down = contour(rng, width);

        // Taper both contours onto the middle line
        if let Some(first) = up.first_mut() {
            first.left = AS_VARIANCE;
        }
        if let Some(last) = up.last_mut() {
            last.right = AS_VARIANCE;
        }
        if let Some(first) = down.first_mut() {
            first.left = 0;
        }
        if let Some(last) = down.last_mut() {
            last.right = 0;
        }

        Self {
            pos,
            width,
            up,
            down,
        }
    }

    pub fn up_polys(&self) -> &[AsteroidPoly] {
        &self.up
    }

    pub fn down_polys(&self) -> &[AsteroidPoly] {
        &self.down
    }

    fn boundary(&self, i: usize, base_row: i32, poly: &AsteroidPoly) -> LineSegment {
        let x = ((self.pos.x + i as i32) * OBJ_GRID_SIZE) as f32;
        let base = (base_row * OBJ_GRID_SIZE + OBJ_GRID_TOP) as f32;
        LineSegment::from_coords(
            x,
            base + poly.left as f32,
            x + OBJ_GRID_SIZE as f32,
            base + poly.right as f32,
        )
    }

    /// Upper contour of column `i`
    pub fn up_boundary(&self, i: usize) -> LineSegment {
        self.boundary(i, self.pos.y, &self.up[i])
    }

    /// Lower contour of column `i`
    pub fn down_boundary(&self, i: usize) -> LineSegment {
        self.boundary(i, self.pos.y + 2, &self.down[i])
    }

    pub fn collides(&self, ship: &Ship, viewport: &Viewport, time_scale: f32) -> bool {
        if !viewport.object_in_screen(self.pos.x, self.pos.y, self.width, ASTEROID_HEIGHT) {
            return false;
        }
        (0..self.width as usize).any(|i| {
            ship.segment_collision(&self.up_boundary(i), time_scale)
                || ship.segment_collision(&self.down_boundary(i), time_scale)
        })
    }
}
