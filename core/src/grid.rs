use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cell storage for one session. Every cell always holds exactly one [`Tier`]; emptiness is [`Tier::Sand`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Tier>,
    won: bool,
}

impl Grid {
    pub fn new(rows: Coord, cols: Coord, seed_placements: &[SeedPlacement]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyGrid);
        }

        let mut cells = Array2::from_elem((rows, cols).to_nd_index(), Tier::Sand);
        let mut seeded = BTreeSet::new();

        for seed in seed_placements {
            let pos = seed.position();
            if pos.row >= rows || pos.col >= cols {
                return Err(GameError::InvalidCoords);
            }
            if !seeded.insert(pos) {
                return Err(GameError::DuplicatePlacement);
            }
            cells[pos.to_nd_index()] = seed.tier;
        }

        let mut grid = Self { cells, won: false };
        if grid.latch_win() {
            log::debug!("Grid seeded with a terminal tier, starting already won");
        }
        Ok(grid)
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Self::new(config.rows, config.cols, &config.seed_placements)
    }

    /// `(rows, cols)`
    pub fn size(&self) -> (Coord, Coord) {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_position(&self, pos: Position) -> Result<Position> {
        let (rows, cols) = self.size();
        if pos.row < rows && pos.col < cols {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Panics when `pos` is outside the grid, use [`Grid::get`] for a checked read.
    pub fn tier_at(&self, pos: Position) -> Tier {
        self.cells[pos.to_nd_index()]
    }

    pub fn get(&self, pos: Position) -> Result<Tier> {
        let pos = self.validate_position(pos)?;
        Ok(self.tier_at(pos))
    }

    pub fn is_mergeable(&self, tier: Tier) -> bool {
        tier.is_mergeable()
    }

    pub fn successor(&self, tier: Tier) -> Option<Tier> {
        tier.successor()
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Tier)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &tier)| (Position::new(row as Coord, col as Coord), tier))
    }

    pub fn positions_of(&self, tier: Tier) -> Vec<Position> {
        self.iter()
            .filter(|&(_, cell)| cell == tier)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count_of(&self, tier: Tier) -> CellCount {
        self.cells
            .iter()
            .filter(|&&cell| cell == tier)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Either a cell currently holds the terminal tier, or one did at some earlier point.
    pub fn has_won(&self) -> bool {
        self.won || self.cells.iter().any(|cell| cell.is_terminal())
    }

    /// Records the win flag, returning `true` only for the call that first observes the win.
    pub fn latch_win(&mut self) -> bool {
        if self.won {
            return false;
        }
        self.won = self.has_won();
        self.won
    }

    pub fn set_tier(&mut self, pos: Position, tier: Tier) -> Result<()> {
        let pos = self.validate_position(pos)?;
        self.cells[pos.to_nd_index()] = tier;
        Ok(())
    }

    /// Picks up to `count` distinct cells holding `tier`, uniformly at random and without replacement.
    ///
    /// Returns every matching cell (in random order) when fewer than `count` exist.
    pub fn select_random_cells_of_tier<R: Rng + ?Sized>(
        &self,
        tier: Tier,
        count: usize,
        rng: &mut R,
    ) -> Vec<Position> {
        let candidates = self.positions_of(tier);
        let amount = count.min(candidates.len());

        rand::seq::index::sample(rng, candidates.len(), amount)
            .into_iter()
            .map(|i| candidates[i])
            .collect()
    }

    /// Turns every listed cell into [`Tier::LOWEST`]. Nothing changes if any position is out of bounds.
    pub fn convert_to_lowest_tier(&mut self, positions: &[Position]) -> Result<()> {
        for &pos in positions {
            self.validate_position(pos)?;
        }
        for &pos in positions {
            self.cells[pos.to_nd_index()] = Tier::LOWEST;
        }
        Ok(())
    }
}

impl Index<Position> for Grid {
    type Output = Tier;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn grid_with(rows: Coord, cols: Coord, seeds: &[(Coord, Coord, Tier)]) -> Grid {
        let seeds: Vec<_> = seeds
            .iter()
            .map(|&(row, col, tier)| SeedPlacement::new(row, col, tier))
            .collect();
        Grid::new(rows, cols, &seeds).unwrap()
    }

    #[test]
    fn unseeded_cells_are_sand() {
        let grid = Grid::from_config(&GameConfig::reference()).unwrap();

        assert_eq!(grid.size(), (9, 7));
        assert_eq!(grid.tier_at(Position::new(5, 3)), Tier::Bucket);
        assert_eq!(grid.tier_at(Position::new(0, 0)), Tier::Succulent);
        assert_eq!(grid.tier_at(Position::new(4, 4)), Tier::Sand);
        assert_eq!(grid.count_of(Tier::Succulent), 12);
        assert_eq!(grid.count_of(Tier::Sand), 63 - 13);
        assert!(!grid.has_won());
    }

    #[test]
    fn seed_outside_bounds_is_rejected() {
        let seeds = [SeedPlacement::new(2, 0, Tier::Bucket)];
        assert_eq!(Grid::new(2, 2, &seeds), Err(GameError::InvalidCoords));
        assert_eq!(Grid::new(0, 2, &[]), Err(GameError::EmptyGrid));
    }

    #[test]
    fn duplicate_seed_is_rejected() {
        let seeds = [
            SeedPlacement::new(1, 1, Tier::Bucket),
            SeedPlacement::new(1, 1, Tier::Succulent),
        ];
        assert_eq!(Grid::new(2, 2, &seeds), Err(GameError::DuplicatePlacement));
    }

    #[test]
    fn out_of_bounds_access_fails() {
        let mut grid = grid_with(2, 2, &[]);

        assert_eq!(grid.get(Position::new(0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(
            grid.set_tier(Position::new(2, 0), Tier::Rock),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            grid.convert_to_lowest_tier(&[Position::new(0, 0), Position::new(9, 9)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(grid.count_of(Tier::Sand), 4);
    }

    #[test]
    #[should_panic]
    fn unchecked_read_panics_out_of_bounds() {
        let grid = grid_with(2, 2, &[]);
        grid.tier_at(Position::new(3, 0));
    }

    #[test]
    fn iter_is_row_major() {
        let grid = grid_with(2, 2, &[(0, 1, Tier::Gem)]);
        let cells: Vec<_> = grid.iter().collect();

        assert_eq!(
            cells,
            vec![
                (Position::new(0, 0), Tier::Sand),
                (Position::new(0, 1), Tier::Gem),
                (Position::new(1, 0), Tier::Sand),
                (Position::new(1, 1), Tier::Sand),
            ]
        );
        assert_eq!(grid[Position::new(0, 1)], Tier::Gem);
    }

    #[test]
    fn sampling_with_no_candidates_is_empty() {
        let grid = grid_with(1, 2, &[(0, 0, Tier::Bucket), (0, 1, Tier::Succulent)]);
        let mut rng = SmallRng::seed_from_u64(1);

        assert!(grid.select_random_cells_of_tier(Tier::Sand, 2, &mut rng).is_empty());
    }

    #[test]
    fn sampling_with_one_candidate_returns_it() {
        let grid = grid_with(1, 2, &[(0, 0, Tier::Bucket)]);
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(
            grid.select_random_cells_of_tier(Tier::Sand, 2, &mut rng),
            [Position::new(0, 1)]
        );
    }

    #[test]
    fn sampling_returns_distinct_matching_cells() {
        let grid = grid_with(3, 3, &[(1, 1, Tier::Bucket)]);
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..100 {
            let picked = grid.select_random_cells_of_tier(Tier::Sand, 2, &mut rng);
            assert_eq!(picked.len(), 2);
            assert_ne!(picked[0], picked[1]);
            assert!(picked.iter().all(|&pos| grid.tier_at(pos) == Tier::Sand));
        }
    }

    #[test]
    fn sampling_covers_every_candidate() {
        let grid = grid_with(2, 2, &[]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut hits = [0u32; 4];

        for _ in 0..4000 {
            for pos in grid.select_random_cells_of_tier(Tier::Sand, 1, &mut rng) {
                hits[usize::from(pos.row) * 2 + usize::from(pos.col)] += 1;
            }
        }

        // each cell expects ~1000 hits
        for count in hits {
            assert!((800..1200).contains(&count), "{hits:?}");
        }
    }

    #[test]
    fn conversion_makes_rocks() {
        let mut grid = grid_with(2, 2, &[(1, 1, Tier::Bucket)]);

        grid.convert_to_lowest_tier(&[Position::new(0, 0), Position::new(1, 0)])
            .unwrap();

        assert_eq!(grid.tier_at(Position::new(0, 0)), Tier::Rock);
        assert_eq!(grid.tier_at(Position::new(1, 0)), Tier::Rock);
        assert_eq!(grid.tier_at(Position::new(0, 1)), Tier::Sand);
        assert_eq!(grid.tier_at(Position::new(1, 1)), Tier::Bucket);
    }

    #[test]
    fn win_is_never_revoked() {
        let mut grid = grid_with(1, 2, &[]);
        assert!(!grid.latch_win());

        grid.set_tier(Position::new(0, 0), Tier::Sarah).unwrap();
        assert!(grid.has_won());
        assert!(grid.latch_win());
        assert!(!grid.latch_win());

        grid.set_tier(Position::new(0, 0), Tier::Sand).unwrap();
        assert!(grid.has_won());
    }

    #[test]
    fn seeded_sarah_starts_won() {
        let mut grid = grid_with(1, 1, &[(0, 0, Tier::Sarah)]);
        assert!(grid.has_won());
        assert!(!grid.latch_win());
    }
}
