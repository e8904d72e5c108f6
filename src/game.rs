use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::FOOD_POINTS;
use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::input::Direction;
use crate::level;
use crate::snake::Snake;

/// Why a run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting for the first start.
    Idle,
    Running,
    Paused,
    /// Ticks are suspended until the player acknowledges the new level.
    LevelTransition(u8),
    GameOver(DeathReason),
    Won,
}

impl GameStatus {
    /// True for states that end the session.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver(_) | Self::Won)
    }
}

/// What one call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running; nothing moved.
    Skipped,
    Moved,
    AteFood { score: u32 },
    LevelUp(u8),
    GameOver(DeathReason),
    Won,
}

/// Complete mutable game state for one session.
///
/// `status` only changes through the transition methods; snake and food are
/// public so tests and tools can stage positions directly.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub level: u8,
    pub tick_count: u64,
    status: GameStatus,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Creates an idle game with an entropy-seeded food generator.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, mut rng: StdRng) -> Self {
        let snake = Snake::spawn(&grid);
        let food = Food::spawn(&mut rng, &grid, &occupied_cells(&snake));

        Self {
            snake,
            food,
            score: 0,
            level: 1,
            tick_count: 0,
            status: GameStatus::Idle,
            grid,
            rng,
        }
    }

    /// Starts a fresh session: new snake and food, score 0, level 1, idle.
    ///
    /// The food generator keeps its stream so seeded runs stay reproducible.
    pub fn reset(&mut self) {
        self.snake = Snake::spawn(&self.grid);
        self.food = Food::spawn(&mut self.rng, &self.grid, &occupied_cells(&self.snake));
        self.score = 0;
        self.level = 1;
        self.tick_count = 0;
        self.status = GameStatus::Idle;
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn speed_multiplier(&self) -> u32 {
        level::speed_multiplier(self.level)
    }

    /// Tick interval for the current level.
    #[must_use]
    pub fn tick_interval(&self, base: Duration) -> Duration {
        level::tick_interval(base, self.level)
    }

    /// Idle → Running. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Idle {
            return false;
        }

        self.status = GameStatus::Running;
        true
    }

    /// Running ↔ Paused. Returns whether the status changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            _ => return false,
        };
        true
    }

    /// LevelTransition(n) → Running at level n.
    pub fn acknowledge(&mut self) -> bool {
        let GameStatus::LevelTransition(target) = self.status else {
            return false;
        };

        self.level = target;
        self.status = GameStatus::Running;
        true
    }

    /// Buffers a direction while running or paused; ignored otherwise.
    pub fn set_direction(&mut self, direction: Direction) {
        if matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            self.snake.set_direction(direction);
        }
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }

        self.tick_count += 1;
        self.snake.move_forward(&self.grid);

        if self.snake.check_wall_collision(&self.grid) {
            return self.finish(DeathReason::WallCollision);
        }

        if self.snake.check_self_collision() {
            return self.finish(DeathReason::SelfCollision);
        }

        if self.snake.head() != self.food.position {
            return TickOutcome::Moved;
        }

        self.snake.grow();
        let placed = self
            .food
            .respawn(&mut self.rng, &self.grid, &occupied_cells(&self.snake));
        let previous = self.score;
        self.score += FOOD_POINTS;

        let board_full = !placed || self.snake.len() >= self.grid.total_cells();
        if level::has_won(self.score) || board_full {
            self.status = GameStatus::Won;
            return TickOutcome::Won;
        }

        if let Some(target) = level::next_level(self.level, previous, self.score) {
            self.status = GameStatus::LevelTransition(target);
            return TickOutcome::LevelUp(target);
        }

        TickOutcome::AteFood { score: self.score }
    }

    fn finish(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver(reason);
        TickOutcome::GameOver(reason)
    }
}

fn occupied_cells(snake: &Snake) -> HashSet<Cell> {
    snake.segments().copied().collect()
}
