//! Object grid: coarse occupancy map used to place hazards
//!
//! Every hazard and key claims whole cells at level start so nothing overlaps.
//! Placement is rejection sampling under a hard attempt cap:
//! - `alloc_point` claims one random free cell
//! - `alloc_block` claims a random free `w x h` block (top-left corner sampled)
//! - `unlock` releases a cell when its occupant leaves

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::GRID_ALLOC_ATTEMPTS;
use crate::error::SimError;

/// A cell coordinate in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Boolean occupancy grid, row-major
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl ObjectGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let mut grid = Self::default();
        grid.reset(width, height);
        grid
    }

    /// Replace the grid with an all-free one of the given size
    pub fn reset(&mut self, width: i32, height: i32) {
        assert!(width > 0 && height > 0, "grid must be non-empty, got {width}x{height}");
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize((width * height) as usize, false);
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.contains(x, y),
            "grid access ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        (y * self.width + x) as usize
    }

    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        self.cells[self.index(x, y)]
    }

    /// Release a single claimed cell
    pub fn unlock(&mut self, x: i32, y: i32) {
        let i = self.index(x, y);
        debug_assert!(self.cells[i], "released free grid cell ({x}, {y})");
        self.cells[i] = false;
    }

    /// Release every cell of a claimed block
    pub fn unlock_block(&mut self, pos: GridPos, width: i32, height: i32) {
        for y in pos.y..pos.y + height {
            for x in pos.x..pos.x + width {
                self.unlock(x, y);
            }
        }
    }

    /// True when the block lies inside the grid and every cell is free
    pub fn region_is_free(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        if !self.contains(x, y) || !self.contains(x + width - 1, y + height - 1) {
            return false;
        }
        (y..y + height).all(|cy| (x..x + width).all(|cx| !self.cells[self.index(cx, cy)]))
    }

    fn fill(&mut self, pos: GridPos, width: i32, height: i32) {
        for y in pos.y..pos.y + height {
            for x in pos.x..pos.x + width {
                let i = self.index(x, y);
                self.cells[i] = true;
            }
        }
    }

    /// Claim one uniformly random free cell
    pub fn alloc_point<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<GridPos, SimError> {
        self.alloc_block(rng, 1, 1)
    }

    /// Claim a free `width x height` block at a random top-left corner
    pub fn alloc_block<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        width: i32,
        height: i32,
    ) -> Result<GridPos, SimError> {
        if width < 1 || height < 1 || width > self.width || height > self.height {
            return Err(SimError::BlockTooLarge {
                width,
                height,
                grid_width: self.width,
                grid_height: self.height,
            });
        }

        for _ in 0..GRID_ALLOC_ATTEMPTS {
            let x = rng.random_range(0..=self.width - width);
            let y = rng.random_range(0..=self.height - height);
            if self.region_is_free(x, y, width, height) {
                let pos = GridPos::new(x, y);
                self.fill(pos, width, height);
                return Ok(pos);
            }
        }

        Err(SimError::GridExhausted {
            attempts: GRID_ALLOC_ATTEMPTS,
        })
    }

    /// Claim a random free cell in column `x`
    pub fn alloc_in_column<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        x: i32,
    ) -> Result<GridPos, SimError> {
        if !self.contains(x, 0) {
            return Err(SimError::BlockTooLarge {
                width: 1,
                height: 1,
                grid_width: self.width,
                grid_height: self.height,
            });
        }

        for _ in 0..GRID_ALLOC_ATTEMPTS {
            let y = rng.random_range(0..self.height);
            if !self.is_filled(x, y) {
                let pos = GridPos::new(x, y);
                self.fill(pos, 1, 1);
                return Ok(pos);
            }
        }

        Err(SimError::GridExhausted {
            attempts: GRID_ALLOC_ATTEMPTS,
        })
    }

    /// Number of claimed cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
