use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::{MAX_PLAYER_NAME_WIDTH, Theme};
use crate::game::DeathReason;
use crate::score::LeaderboardEntry;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, best_score: u32, theme: &Theme) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(popup);

    frame.render_widget(title("NEON SNAKE", theme), title_row);

    let body = vec![
        Line::from(format!("Best score: {best_score}")),
        Line::from(""),
        Line::from("Press any arrow key to start"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );

    frame.render_widget(footer("Arrows/WASD move · P pause · M mute", theme), footer_row);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    popup_lines(
        frame,
        area,
        " pause ",
        vec![
            Line::from("PAUSED"),
            Line::from(""),
            Line::from("[P] Resume"),
            Line::from("[Q] Quit"),
        ],
        theme,
    );
}

/// Draws the level-up popup.
pub fn render_level_menu(frame: &mut Frame<'_>, area: Rect, level: u8, theme: &Theme) {
    popup_lines(
        frame,
        area,
        " level up ",
        vec![
            Line::from(format!("LEVEL {level}!")),
            Line::from(""),
            Line::from(format!("Speed x{level}")),
            Line::from("[Enter] Continue"),
        ],
        theme,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    best_score: u32,
    reason: DeathReason,
    theme: &Theme,
) {
    let is_new_best = score > 0 && score >= best_score;
    popup_lines(
        frame,
        area,
        " game over ",
        vec![
            Line::from("GAME OVER!"),
            Line::from(""),
            Line::from(format!("Score: {score}")),
            Line::from(match reason {
                DeathReason::WallCollision => "Cause: hit wall",
                DeathReason::SelfCollision => "Cause: hit yourself",
            }),
            Line::from(if is_new_best { "New best score!" } else { "" }),
            Line::from(""),
            Line::from("[Enter] Play Again"),
            Line::from("[Q] Quit"),
        ],
        theme,
    );
}

/// Draws the victory popup.
pub fn render_win_menu(frame: &mut Frame<'_>, area: Rect, score: u32, theme: &Theme) {
    popup_lines(
        frame,
        area,
        " victory ",
        vec![
            Line::from("YOU WIN!"),
            Line::from(""),
            Line::from(format!("Score: {score}")),
            Line::from(""),
            Line::from("[Enter] Play Again"),
            Line::from("[Q] Quit"),
        ],
        theme,
    );
}

/// Draws the top-ten table.
pub fn render_leaderboard(
    frame: &mut Frame<'_>,
    area: Rect,
    entries: &[LeaderboardEntry],
    theme: &Theme,
) {
    let mut lines = vec![Line::from("LEADERBOARD"), Line::from("")];
    if entries.is_empty() {
        lines.push(Line::from("No scores yet!"));
    } else {
        lines.extend(
            entries
                .iter()
                .enumerate()
                .map(|(index, entry)| Line::from(leaderboard_row(index + 1, entry))),
        );
    }
    lines.push(Line::from(""));
    lines.push(Line::from("[L] Close"));

    popup_lines(frame, area, " scores ", lines, theme);
}

/// Formats one table row with the name padded by display width.
#[must_use]
pub fn leaderboard_row(rank: usize, entry: &LeaderboardEntry) -> String {
    let padding = MAX_PLAYER_NAME_WIDTH.saturating_sub(entry.name.width());
    format!(
        "{rank:>2}. {}{} {:>5}",
        entry.name,
        " ".repeat(padding),
        entry.score
    )
}

fn popup_lines(frame: &mut Frame<'_>, area: Rect, label: &str, lines: Vec<Line<'_>>, theme: &Theme) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let mut lines = lines;
    if let Some(first) = lines.first_mut() {
        *first = first.clone().style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        );
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(label.to_owned())),
        popup,
    );
}

fn title<'a>(text: &'a str, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        )
}

fn footer<'a>(text: &'a str, theme: &Theme) -> Paragraph<'a> {
    Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.menu_footer))
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
