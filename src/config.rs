use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

/// Logical grid dimensions in cells.
///
/// Kept separate from [`crate::grid::Grid`] so the CLI and renderer can talk
/// about columns and rows without caring about the world-unit cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Side length of one cell in world units.
pub const CELL_SIZE: i32 = 20;

/// Number of segments the snake starts with.
pub const INITIAL_SNAKE_LENGTH: i32 = 3;

/// Tick interval at speed multiplier 1.
pub const BASE_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Points awarded for each food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Score at which level 2 begins.
pub const LEVEL_2_THRESHOLD: u32 = 50;

/// Score at which level 3 begins.
pub const LEVEL_3_THRESHOLD: u32 = 100;

/// Score that wins the game.
pub const WIN_SCORE: u32 = 150;

/// Highest reachable level.
pub const MAX_LEVEL: u8 = 3;

/// Leaderboard capacity.
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// Name used when the player never entered one.
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Maximum display width of a player name.
pub const MAX_PLAYER_NAME_WIDTH: usize = 16;

/// Frame pacing for the terminal loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Cyan snake, pink food, the arcade cabinet look.
pub const THEME_NEON: Theme = Theme {
    name: "Neon",
    snake_head: Color::Rgb(0xe0, 0xff, 0xff),
    snake_body: Color::Rgb(0x00, 0xf3, 0xff),
    food: Color::Rgb(0xff, 0x00, 0x99),
    play_bg: Color::Rgb(0x0a, 0x0a, 0x1a),
    border_fg: Color::Rgb(0x39, 0xff, 0x14),
    hud_label: Color::DarkGray,
    hud_value: Color::Rgb(0x00, 0xf3, 0xff),
    menu_title: Color::Rgb(0xff, 0x00, 0x99),
    menu_footer: Color::DarkGray,
};

/// Plain 16-color theme for terminals without truecolor.
pub const THEME_CLASSIC: Theme = Theme {
    name: "Classic",
    snake_head: Color::White,
    snake_body: Color::Green,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Terminal columns used to draw one cell, so cells look square.
pub const CELL_COLUMNS: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_FOOD: &str = "◆ ";
