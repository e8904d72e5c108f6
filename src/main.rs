use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, ValueEnum};
use neon_snake::audio::{AudioSink, TerminalBell};
use neon_snake::config::{
    CELL_SIZE, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, FRAME_INTERVAL, GridSize, THEME_CLASSIC,
    THEME_NEON, Theme,
};
use neon_snake::error::AppError;
use neon_snake::grid::Grid;
use neon_snake::input::{GameInput, InputHandler};
use neon_snake::renderer;
use neon_snake::score::{JsonScoreStore, ScoreStore, export_leaderboard, scores_path};
use neon_snake::session::{Session, SessionConfig};
use neon_snake::settings::{Settings, sanitize_player_name};
use neon_snake::terminal_runtime::TerminalGuard;
use neon_snake::ui::hud::HudInfo;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Neon,
    Classic,
}

impl ThemeChoice {
    fn theme(self) -> &'static Theme {
        match self {
            Self::Neon => &THEME_NEON,
            Self::Classic => &THEME_CLASSIC,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Name recorded on the leaderboard; remembered for next time.
    #[arg(long)]
    player: Option<String>,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH, value_parser = clap::value_parser!(u16).range(8..=60))]
    columns: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT, value_parser = clap::value_parser!(u16).range(8..=40))]
    rows: u16,

    /// Start with sound muted.
    #[arg(long)]
    mute: bool,

    #[arg(long, value_enum, default_value_t = ThemeChoice::Neon)]
    theme: ThemeChoice,

    /// Print the leaderboard and exit.
    #[arg(long)]
    leaderboard: bool,

    /// Write the leaderboard as text to PATH and exit.
    #[arg(long, value_name = "PATH")]
    export_scores: Option<PathBuf>,

    /// Append logs to PATH (RUST_LOG sets the filter).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut settings = Settings::load().unwrap_or_else(|error| {
        eprintln!("Warning: ignoring unreadable settings: {error}");
        Settings::default()
    });
    if let Some(name) = &cli.player {
        settings.player_name = sanitize_player_name(name);
    }
    settings.muted |= cli.mute;

    let store = JsonScoreStore::open_default().unwrap_or_else(|error| {
        eprintln!("Warning: starting with an empty leaderboard: {error}");
        log::warn!("could not load leaderboard: {error}");
        JsonScoreStore::empty_at(scores_path())
    });

    if cli.leaderboard {
        if store.leaderboard().is_empty() {
            println!("No scores yet!");
        } else {
            println!("{}", store.leaderboard().to_text());
        }
        return Ok(());
    }

    if let Some(path) = &cli.export_scores {
        export_leaderboard(store.leaderboard(), path)?;
        println!("Leaderboard written to {}", path.display());
        return Ok(());
    }

    let config = SessionConfig {
        grid: Grid::new(
            GridSize {
                width: cli.columns,
                height: cli.rows,
            },
            CELL_SIZE,
        ),
        seed: cli.seed,
        player_name: settings.player_name.clone(),
        ..SessionConfig::default()
    };
    let mut session = Session::new(config, TerminalBell::stdout(settings.muted), store);

    let result = run(&mut session, cli.theme.theme());
    session.teardown();

    settings.muted = session.audio().is_muted();
    if let Err(error) = settings.save() {
        eprintln!("Failed to save settings: {error}");
    }
    result
}

/// Runs the frame loop until the player quits.
fn run(
    session: &mut Session<TerminalBell, JsonScoreStore>,
    theme: &'static Theme,
) -> Result<(), AppError> {
    let mut guard = TerminalGuard::enter()?;
    let mut input = InputHandler::new();

    loop {
        let leaderboard = session.scores().entries();
        let hud_info = HudInfo {
            player_name: session.player_name(),
            best_score: session.scores().best_score(),
            muted: session.audio().is_muted(),
            theme,
            show_leaderboard: session.is_leaderboard_open(),
            leaderboard: &leaderboard,
        };
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, session.state(), &hud_info))?;

        if let Some(game_input) = input.poll_input(FRAME_INTERVAL)? {
            let now = Instant::now();
            match game_input {
                GameInput::Quit => break,
                GameInput::Direction(direction) => session.on_direction(direction, now),
                GameInput::Pause => session.on_pause_toggle(now),
                GameInput::Confirm => session.on_confirm(now),
                GameInput::ToggleMute => {
                    session.toggle_mute();
                }
                GameInput::ToggleLeaderboard => {
                    session.toggle_leaderboard(now);
                }
            }
        }

        session.update(Instant::now());
    }

    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<(), AppError> {
    // Stderr output would tear the alternate screen, so stay quiet by default.
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))
}
