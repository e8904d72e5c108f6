use std::collections::HashSet;

use rand::Rng;

use crate::grid::{Cell, Grid};

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    /// Places food at a fixed cell.
    #[must_use]
    pub fn at(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food on a random cell not in `occupied`.
    ///
    /// On a full board the food lands on the origin cell; callers treat a
    /// full board as a finished game before this matters.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: &Grid, occupied: &HashSet<Cell>) -> Self {
        let mut food = Self::at(grid.cell_at(0, 0));
        food.respawn(rng, grid, occupied);
        food
    }

    /// Moves the food to a uniformly random free cell.
    ///
    /// Returns `false` and leaves the food in place when no cell is free.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: &Grid,
        occupied: &HashSet<Cell>,
    ) -> bool {
        match free_cell(rng, grid, occupied) {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }
}

/// Picks a random board cell that is not in `occupied`.
#[must_use]
pub fn free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    occupied: &HashSet<Cell>,
) -> Option<Cell> {
    let candidates: Vec<Cell> = grid
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::grid::{Cell, Grid};

    use super::{Food, free_cell};

    fn small_grid() -> Grid {
        Grid::new(
            GridSize {
                width: 8,
                height: 6,
            },
            20,
        )
    }

    #[test]
    fn respawn_never_lands_on_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = small_grid();
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(20, 0), Cell::new(40, 0)]
            .into_iter()
            .collect();

        let mut food = Food::at(Cell::new(0, 0));
        for _ in 0..100 {
            assert!(food.respawn(&mut rng, &grid, &occupied));
            assert!(!occupied.contains(&food.position));
            assert!(grid.in_bounds(food.position));
            assert_eq!(food.position.x % 20, 0);
            assert_eq!(food.position.y % 20, 0);
        }
    }

    #[test]
    fn respawn_picks_the_only_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = small_grid();
        let free = grid.cell_at(5, 4);
        let occupied: HashSet<Cell> = grid.cells().filter(|cell| *cell != free).collect();

        assert_eq!(free_cell(&mut rng, &grid, &occupied), Some(free));
    }

    #[test]
    fn full_board_leaves_food_in_place() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = small_grid();
        let occupied: HashSet<Cell> = grid.cells().collect();
        let mut food = Food::at(Cell::new(60, 60));

        assert!(!food.respawn(&mut rng, &grid, &occupied));
        assert_eq!(food.position, Cell::new(60, 60));
    }
}
