//! Level hazards
//!
//! Everything the ship can crash into besides the ground. Each kind keeps its
//! own state; `Hazard` dispatches the per-frame update, the collision test
//! and the draw bounds. Keys are not hazards and live in their own list.

pub mod asteroid;
pub mod gate;
pub mod key;
pub mod mine;
pub mod missile;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use asteroid::{Asteroid, AsteroidPoly};
pub use gate::ElectricGate;
pub use key::{Key, KeyColour};
pub use mine::{Direction, Mine};
pub use missile::{Missile, MissileState, Side};

use super::geometry::Rect;
use super::grid::ObjectGrid;
use super::host::SoundEffect;
use super::ship::Ship;
use super::viewport::Viewport;
use crate::consts::{ASTEROID_HEIGHT, OBJ_GRID_SIZE};
use crate::grid_to_world;

/// Read-only view of the frame a hazard is updated in
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub ship: &'a Ship,
    pub viewport: &'a Viewport,
    pub level_size: Vec2,
    pub time_scale: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Hazard {
    Asteroid(Asteroid),
    Gate(ElectricGate),
    Mine(Mine),
    Missile(Missile),
}

impl Hazard {
    /// Step the hazard's own motion; returns a sound to trigger, if any
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        grid: &mut ObjectGrid,
        rng: &mut R,
        frame: &Frame,
    ) -> Option<SoundEffect> {
        match self {
            Hazard::Asteroid(_) => None,
            Hazard::Gate(gate) => {
                gate.advance(frame.time_scale);
                None
            }
            Hazard::Mine(mine) => {
                mine.advance(grid, rng, frame.time_scale);
                None
            }
            Hazard::Missile(missile) => missile
                .advance(grid, frame.ship, frame.level_size, frame.time_scale)
                .then_some(SoundEffect::MissileFire),
        }
    }

    pub fn collides(&self, frame: &Frame) -> bool {
        let (ship, vp, ts) = (frame.ship, frame.viewport, frame.time_scale);
        match self {
            Hazard::Asteroid(rock) => rock.collides(ship, vp, ts),
            Hazard::Gate(gate) => gate.collides(ship, vp, ts),
            Hazard::Mine(mine) => mine.collides(ship, vp, ts),
            Hazard::Missile(missile) => missile.collides(ship, vp, ts),
        }
    }

    /// React to the ship striking this hazard
    pub fn on_hit(&mut self, grid: &mut ObjectGrid) -> Option<SoundEffect> {
        match self {
            Hazard::Gate(gate) if gate.is_active() => Some(SoundEffect::Electric),
            Hazard::Missile(missile) => {
                missile.destroy(grid);
                None
            }
            _ => None,
        }
    }

    /// World-space box covering the hazard, for drawing and culling
    pub fn bounds(&self) -> Rect {
        match self {
            Hazard::Asteroid(rock) => {
                let p = grid_to_world(rock.pos.x, rock.pos.y);
                let cell = OBJ_GRID_SIZE as f32;
                Rect::new(p.x, p.y, rock.width as f32 * cell, ASTEROID_HEIGHT as f32 * cell)
            }
            Hazard::Gate(gate) => gate.bounds(),
            Hazard::Mine(mine) => {
                let p = mine.world_pos();
                let size = (mine::MINE_CELLS * OBJ_GRID_SIZE) as f32;
                Rect::new(p.x, p.y, size, size)
            }
            Hazard::Missile(missile) => missile.bounds(),
        }
    }

    /// A gateway with its beam switched on
    pub fn is_live_gate(&self) -> bool {
        matches!(self, Hazard::Gate(gate) if gate.is_active())
    }
}
