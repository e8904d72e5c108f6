use std::collections::VecDeque;

use crate::config::INITIAL_SNAKE_LENGTH;
use crate::grid::{Cell, Grid};
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    next_direction: Direction,
}

impl Snake {
    /// Creates the starting snake: three segments on the middle row, heading right.
    #[must_use]
    pub fn spawn(grid: &Grid) -> Self {
        let row = grid.size().height / 2;
        let segments = (1..=INITIAL_SNAKE_LENGTH)
            .rev()
            .map(|column| Cell::new(column * grid.cell_size(), grid.cell_at(0, row).y))
            .collect();

        Self::from_segments(segments, Direction::Right)
    }

    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Cell, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// An empty segment list is not a valid snake and panics in debug builds.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());
        Self {
            body: VecDeque::from(segments),
            direction,
            next_direction: direction,
        }
    }

    /// Buffers `direction` for the next move unless it reverses the current one.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.direction, direction) {
            self.next_direction = direction;
        }
    }

    /// Applies the buffered direction and advances one cell.
    ///
    /// Returns the tail cell that was dropped.
    pub fn move_forward(&mut self, grid: &Grid) -> Cell {
        self.direction = self.next_direction;
        let next_head = self.head().step(self.direction, grid.cell_size());

        self.body.push_front(next_head);
        self.body.pop_back().unwrap_or(next_head)
    }

    /// Appends a copy of the tail, lengthening the body by one segment.
    ///
    /// The duplicate unfolds naturally as the snake keeps moving.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns true if the head has left the board.
    #[must_use]
    pub fn check_wall_collision(&self, grid: &Grid) -> bool {
        !grid.in_bounds(self.head())
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or(Cell::new(0, 0))
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body.back().copied().unwrap_or_else(|| self.head())
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a well-formed snake; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the last move.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction the next move will use.
    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::grid::{Cell, Grid};
    use crate::input::Direction;

    use super::Snake;

    fn grid() -> Grid {
        Grid::new(
            GridSize {
                width: 40,
                height: 20,
            },
            1,
        )
    }

    #[test]
    fn spawn_matches_default_layout() {
        let snake = Snake::spawn(&Grid::default());

        let body: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![Cell::new(60, 200), Cell::new(40, 200), Cell::new(20, 200)]
        );
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn move_returns_removed_tail_and_keeps_length() {
        let mut snake = Snake::spawn(&Grid::default());

        let removed = snake.move_forward(&Grid::default());

        assert_eq!(removed, Cell::new(20, 200));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(80, 200));
    }

    #[test]
    fn grow_adds_exactly_one_segment() {
        let grid = grid();
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.move_forward(&grid);
        snake.grow();
        assert_eq!(snake.len(), 2);

        snake.move_forward(&grid);
        assert_eq!(snake.len(), 2);
        let body: Vec<Cell> = snake.segments().copied().collect();
        assert_eq!(body, vec![Cell::new(7, 5), Cell::new(6, 5)]);
    }

    #[test]
    fn reversal_does_not_change_next_direction() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Up);

        snake.set_direction(Direction::Down);
        assert_eq!(snake.next_direction(), Direction::Up);

        snake.move_forward(&grid());
        assert_eq!(snake.head(), Cell::new(5, 4));
    }

    #[test]
    fn reversal_is_checked_against_applied_direction() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right);

        snake.set_direction(Direction::Up);
        // Still moving right: Left is rejected even though Up is pending.
        snake.set_direction(Direction::Left);
        assert_eq!(snake.next_direction(), Direction::Up);

        // Down is perpendicular to Right, so it replaces the pending Up.
        snake.set_direction(Direction::Down);
        assert_eq!(snake.next_direction(), Direction::Down);
    }

    #[test]
    fn single_segment_never_self_collides() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn head_on_body_is_self_collision() {
        let mut snake = Snake::from_segments(
            vec![
                Cell::new(2, 2),
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(2, 3),
                Cell::new(3, 3),
                Cell::new(3, 2),
            ],
            Direction::Down,
        );

        snake.move_forward(&grid());

        assert_eq!(snake.head(), Cell::new(2, 3));
        assert!(snake.check_self_collision());
    }

    #[test]
    fn wall_collision_checks_both_edges() {
        let grid = Grid::new(
            GridSize {
                width: 4,
                height: 3,
            },
            1,
        );

        assert!(!Snake::new(Cell::new(0, 0), Direction::Left).check_wall_collision(&grid));
        assert!(!Snake::new(Cell::new(3, 2), Direction::Left).check_wall_collision(&grid));
        assert!(Snake::new(Cell::new(-1, 0), Direction::Left).check_wall_collision(&grid));
        assert!(Snake::new(Cell::new(0, -1), Direction::Left).check_wall_collision(&grid));
        assert!(Snake::new(Cell::new(4, 0), Direction::Left).check_wall_collision(&grid));
        assert!(Snake::new(Cell::new(0, 3), Direction::Left).check_wall_collision(&grid));
    }
}
