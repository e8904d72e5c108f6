use crate::config::{CELL_SIZE, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridSize};
use crate::input::Direction;

/// A board position in world units.
///
/// Snake segments and food always sit on aligned cells, i.e. both
/// coordinates are multiples of the grid's cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell `distance` world units away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Fixed-size board geometry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cell_size: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(
            GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            CELL_SIZE,
        )
    }
}

impl Grid {
    /// Creates a grid of `size` cells, each `cell_size` world units wide.
    #[must_use]
    pub fn new(size: GridSize, cell_size: i32) -> Self {
        debug_assert!(size.width > 0 && size.height > 0 && cell_size > 0);
        Self { size, cell_size }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// World width (columns × cell size).
    #[must_use]
    pub fn width(&self) -> i32 {
        i32::from(self.size.width) * self.cell_size
    }

    /// World height (rows × cell size).
    #[must_use]
    pub fn height(&self) -> i32 {
        i32::from(self.size.height) * self.cell_size
    }

    /// Returns true when `cell` lies inside the board.
    ///
    /// Lower bounds are inclusive, upper bounds exclusive.
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width() && cell.y < self.height()
    }

    /// Returns the aligned cell at `column`, `row`.
    #[must_use]
    pub fn cell_at(&self, column: u16, row: u16) -> Cell {
        Cell {
            x: i32::from(column) * self.cell_size,
            y: i32::from(row) * self.cell_size,
        }
    }

    /// Maps an in-bounds cell back to its (column, row) index.
    #[must_use]
    pub fn index_of(&self, cell: Cell) -> Option<(u16, u16)> {
        if !self.in_bounds(cell) {
            return None;
        }

        let column = u16::try_from(cell.x / self.cell_size).ok()?;
        let row = u16::try_from(cell.y / self.cell_size).ok()?;
        Some((column, row))
    }

    /// Iterates over every aligned cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size.height)
            .flat_map(move |row| (0..self.size.width).map(move |column| self.cell_at(column, row)))
    }

    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.size.total_cells()
    }
}
