//! Mines: 2x2 cell hazards that wander the grid
//!
//! A mine glides one cell at a time. Each time it lines up with a cell it
//! either keeps its heading or re-rolls one, skipping any heading whose next
//! footprint is off the grid or blocked by a claimed cell.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MINE_COMMIT, MINE_DIR_TRIES, MINE_MOVE_SPEED, OBJ_GRID_SIZE};
use crate::grid_to_world;
use crate::sim::geometry::Rect;
use crate::sim::grid::{GridPos, ObjectGrid};
use crate::sim::ship::Ship;
use crate::sim::viewport::Viewport;

/// Mine footprint in cells
pub const MINE_CELLS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const MOVING: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mine {
    /// Top-left cell of the footprint
    pub pos: GridPos,
    pub dir: Direction,
    /// Cells left before the heading is re-rolled
    commit: u32,
    /// Pixels travelled towards the next cell
    pub displacement: f32,
}

impl Mine {
    pub fn new(pos: GridPos) -> Self {
        Self {
            pos,
            dir: Direction::None,
            commit: 1,
            displacement: 0.0,
        }
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, grid: &ObjectGrid, rng: &mut R, time_scale: f32) {
        let cell = OBJ_GRID_SIZE as f32;
        if self.dir == Direction::None || self.displacement >= cell {
            let (dx, dy) = self.dir.delta();
            self.pos = GridPos::new(self.pos.x + dx, self.pos.y + dy);
            self.displacement = 0.0;
            self.choose_direction(grid, rng);
        } else {
            self.displacement = (self.displacement + MINE_MOVE_SPEED * time_scale).min(cell);
        }
    }

    fn choose_direction<R: Rng + ?Sized>(&mut self, grid: &ObjectGrid, rng: &mut R) {
        for attempt in 0..MINE_DIR_TRIES {
            if attempt > 0 || self.commit == 0 {
                self.dir = Direction::MOVING[rng.random_range(0..Direction::MOVING.len())];
                self.commit = MINE_COMMIT;
            } else {
                self.commit -= 1;
            }

            let (dx, dy) = self.dir.delta();
            if grid.region_is_free(self.pos.x + dx, self.pos.y + dy, MINE_CELLS, MINE_CELLS) {
                return;
            }
        }
        log::debug!("mine at ({}, {}) boxed in", self.pos.x, self.pos.y);
        self.dir = Direction::None;
    }

    /// Top-left of the sprite in world pixels, including the glide offset
    pub fn world_pos(&self) -> Vec2 {
        let (dx, dy) = self.dir.delta();
        grid_to_world(self.pos.x, self.pos.y) + Vec2::new(dx as f32, dy as f32) * self.displacement
    }

    pub fn bounds(&self) -> Rect {
        let p = self.world_pos();
        Rect::new(p.x + 3.0, p.y + 6.0, 58.0, 52.0)
    }

    pub fn collides(&self, ship: &Ship, viewport: &Viewport, time_scale: f32) -> bool {
        ship.box_collision(&self.bounds(), viewport, time_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_boxed_in_mine_stops() {
        let mut rng = Pcg32::seed_from_u64(3);
        // Grid exactly the mine's size: every move leaves the grid
        let grid = ObjectGrid::new(2, 2);
        let mut mine = Mine::new(GridPos::new(0, 0));
        for _ in 0..50 {
            mine.advance(&grid, &mut rng, 1.0);
            assert_eq!(mine.pos, GridPos::new(0, 0));
            assert_eq!(mine.dir, Direction::None);
        }
    }

    #[test]
    fn test_mine_glides_then_steps() {
        let mut rng = Pcg32::seed_from_u64(17);
        let grid = ObjectGrid::new(12, 12);
        let mut mine = Mine::new(GridPos::new(5, 5));

        // Let it pick a heading
        while mine.dir == Direction::None {
            mine.advance(&grid, &mut rng, 1.0);
        }
        let start = mine.pos;
        let (dx, dy) = mine.dir.delta();

        // 32px at 0.5px/frame, then one frame to commit the step
        for _ in 0..64 {
            mine.advance(&grid, &mut rng, 1.0);
            assert_eq!(mine.pos, start);
        }
        assert_eq!(mine.displacement, OBJ_GRID_SIZE as f32);
        mine.advance(&grid, &mut rng, 1.0);
        assert_eq!(mine.pos, GridPos::new(start.x + dx, start.y + dy));
        assert_eq!(mine.displacement, 0.0);
    }

    #[test]
    fn test_mine_never_enters_claimed_cells() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut grid = ObjectGrid::new(10, 10);
        // Wall off column 6
        for _ in 0..10 {
            grid.alloc_in_column(&mut rng, 6).unwrap();
        }

        let mut mine = Mine::new(GridPos::new(2, 4));
        for _ in 0..5000 {
            mine.advance(&grid, &mut rng, 1.0);
            assert!(grid.contains(mine.pos.x, mine.pos.y));
            assert!(mine.pos.x + MINE_CELLS - 1 < 6);
            assert!(mine.pos.y + MINE_CELLS <= 10);
        }
    }

    #[test]
    fn test_bounds_follow_glide() {
        let mut mine = Mine::new(GridPos::new(1, 0));
        mine.dir = Direction::Right;
        mine.displacement = 10.0;
        assert_eq!(mine.bounds(), Rect::new(32.0 + 10.0 + 3.0, 106.0, 58.0, 52.0));
    }
}
