use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;
use crate::score::LeaderboardEntry;

const HUD_MARGIN_X: u16 = 2;
const SEPARATOR: &str = " │ ";

/// Values the HUD and overlays need beyond the game state itself.
#[derive(Debug, Clone)]
pub struct HudInfo<'a> {
    pub player_name: &'a str,
    pub best_score: u32,
    pub muted: bool,
    pub theme: &'a Theme,
    pub show_leaderboard: bool,
    pub leaderboard: &'a [LeaderboardEntry],
}

/// Renders the two HUD rows and returns the remaining area above them.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, info: &HudInfo<'_>) -> Rect {
    let [play_area, stats_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let stats_area = inset_horizontal(stats_area, HUD_MARGIN_X);
    let status_area = inset_horizontal(status_area, HUD_MARGIN_X);

    frame.render_widget(
        Paragraph::new(stats_line(
            StatValues {
                length: state.snake.len(),
                level: state.level,
                score: state.score,
                best: info.best_score.max(state.score),
            },
            usize::from(stats_area.width),
            info.theme,
        ))
        .alignment(Alignment::Center),
        stats_area,
    );

    frame.render_widget(
        Paragraph::new(status_line(
            info.player_name,
            state.speed_multiplier(),
            info.muted,
            info.theme,
        ))
        .alignment(Alignment::Center),
        status_area,
    );

    play_area
}

#[derive(Debug, Clone, Copy)]
struct StatValues {
    length: usize,
    level: u8,
    score: u32,
    best: u32,
}

fn stats_line(values: StatValues, available_width: usize, theme: &Theme) -> Line<'static> {
    let labels = stat_labels(stats_width(values, false) > available_width);
    let numbers = [
        values.length.to_string(),
        values.level.to_string(),
        values.score.to_string(),
        values.best.to_string(),
    ];

    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::with_capacity(numbers.len() * 3);
    for (index, (label, number)) in labels.iter().zip(numbers).enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, label_style));
        }
        spans.push(Span::styled(format!("{label}: "), label_style));
        spans.push(Span::styled(number, value_style));
    }

    Line::from(spans)
}

fn stat_labels(compact: bool) -> [&'static str; 4] {
    if compact {
        ["L", "V", "S", "H"]
    } else {
        ["Length", "Level", "Score", "Hi"]
    }
}

fn stats_width(values: StatValues, compact: bool) -> usize {
    let labels = stat_labels(compact);
    let numbers = [
        values.length.to_string(),
        values.level.to_string(),
        values.score.to_string(),
        values.best.to_string(),
    ];

    labels
        .iter()
        .zip(numbers.iter())
        .map(|(label, number)| label.chars().count() + 2 + number.chars().count())
        .sum::<usize>()
        + SEPARATOR.chars().count() * (labels.len() - 1)
}

fn status_line<'a>(player: &'a str, speed: u32, muted: bool, theme: &Theme) -> Line<'a> {
    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default().fg(theme.hud_value);

    Line::from(vec![
        Span::styled(player, value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled("Speed: ", label_style),
        Span::styled(format!("{speed}x"), value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled(if muted { "♪ off" } else { "♪ on" }, value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled("[M] mute [L] scores [P] pause", label_style),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
