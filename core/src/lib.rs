#![no_std]

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use gesture::*;
pub use grid::*;
pub use session::*;
pub use tier::*;
pub use types::*;

mod error;
mod gesture;
mod grid;
mod session;
mod tier;
mod types;

/// Number of sand cells a bucket activation turns into rocks.
pub const CONVERSION_COUNT: usize = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPlacement {
    pub row: Coord,
    pub col: Coord,
    pub tier: Tier,
}

impl SeedPlacement {
    pub const fn new(row: Coord, col: Coord, tier: Tier) -> Self {
        Self { row, col, tier }
    }

    pub const fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Board shape plus the cells that start out as something other than sand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    #[serde(default)]
    pub seed_placements: Vec<SeedPlacement>,
}

impl GameConfig {
    pub const REFERENCE_ROWS: Coord = 9;
    pub const REFERENCE_COLS: Coord = 7;

    pub fn new(rows: Coord, cols: Coord, seed_placements: Vec<SeedPlacement>) -> Self {
        Self {
            rows,
            cols,
            seed_placements,
        }
    }

    /// The beach layout: a 9x7 board ringed with succulents and a single bucket.
    pub fn reference() -> Self {
        use Tier::*;

        const SUCCULENTS: [(Coord, Coord); 12] = [
            (0, 0),
            (0, 1),
            (0, 3),
            (0, 4),
            (1, 0),
            (1, 6),
            (2, 2),
            (2, 5),
            (5, 0),
            (6, 0),
            (8, 5),
            (8, 6),
        ];

        let mut seed_placements: Vec<SeedPlacement> = SUCCULENTS
            .iter()
            .map(|&(row, col)| SeedPlacement::new(row, col, Succulent))
            .collect();
        seed_placements.push(SeedPlacement::new(5, 3, Bucket));

        Self::new(Self::REFERENCE_ROWS, Self::REFERENCE_COLS, seed_placements)
    }

    /// Blank board of the given size, every cell sand.
    pub fn empty(rows: Coord, cols: Coord) -> Self {
        Self::new(rows, cols, vec![])
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("Rejected game config: {}", err);
            GameError::InvalidConfig
        })
    }

    pub const fn size(&self) -> (Coord, Coord) {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::reference()
    }
}
