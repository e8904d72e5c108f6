use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, Theme,
};
use crate::game::{GameState, GameStatus};
use crate::grid::{Cell, Grid};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{
    render_game_over_menu, render_leaderboard, render_level_menu, render_pause_menu,
    render_start_menu, render_win_menu,
};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let theme = hud_info.theme;

    let board_area = render_hud(frame, area, state, hud_info);
    let play_area = centered_board(board_area, state.grid());

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    if hud_info.show_leaderboard {
        render_leaderboard(frame, play_area, hud_info.leaderboard, theme);
        return;
    }

    match state.status() {
        GameStatus::Idle => render_start_menu(frame, play_area, hud_info.best_score, theme),
        GameStatus::Paused => render_pause_menu(frame, play_area, theme),
        GameStatus::LevelTransition(level) => render_level_menu(frame, play_area, level, theme),
        GameStatus::GameOver(reason) => render_game_over_menu(
            frame,
            play_area,
            state.score,
            hud_info.best_score,
            reason,
            theme,
        ),
        GameStatus::Won => render_win_menu(frame, play_area, state.score, theme),
        GameStatus::Running => {}
    }
}

/// Board rectangle including its border, centered in `area`.
fn centered_board(area: Rect, grid: &Grid) -> Rect {
    let size = grid.size();
    let width = size.width.saturating_mul(CELL_COLUMNS).saturating_add(2);
    let height = size.height.saturating_add(2);

    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    board
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(inner, state.grid(), state.food.position) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let buffer = frame.buffer_mut();

    // Tail first so the head is painted last when segments overlap.
    for segment in state.snake.segments().rev() {
        let Some((x, y)) = cell_to_terminal(inner, state.grid(), *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_BODY,
                Style::new().fg(theme.snake_body).bg(theme.play_bg),
            );
        }
    }
}

/// Maps a board cell to the terminal position of its left column.
fn cell_to_terminal(inner: Rect, grid: &Grid, cell: Cell) -> Option<(u16, u16)> {
    let (column, row) = grid.index_of(cell)?;

    let x = inner.x.saturating_add(column.saturating_mul(CELL_COLUMNS));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
