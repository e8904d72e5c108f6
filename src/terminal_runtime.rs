//! Raw-mode terminal ownership for the frame loop.
//!
//! [`TerminalGuard`] puts the terminal into game mode and also owns a panic
//! hook, so a panic anywhere in the loop leaves a usable shell behind. Both
//! are undone when the guard drops.

use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;
use std::thread;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

type PanicHook = dyn Fn(&PanicHookInfo<'_>) + Send + Sync + 'static;

pub struct TerminalGuard {
    terminal: AppTerminal,
    previous_hook: Option<Arc<PanicHook>>,
}

impl TerminalGuard {
    /// Switches stdout to the game screen and arms the restoring panic hook.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = write_game_screen(&mut stdout) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(error) => {
                leave_game_screen();
                return Err(error);
            }
        };

        Ok(Self {
            terminal,
            previous_hook: Some(arm_panic_hook()),
        })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        leave_game_screen();

        // Replacing the hook while unwinding would abort the process; the
        // armed hook has already restored the screen in that case.
        if thread::panicking() {
            return;
        }
        if let Some(previous) = self.previous_hook.take() {
            let _ = panic::take_hook();
            panic::set_hook(Box::new(move |info| previous(info)));
        }
    }
}

/// Wraps the current hook so the screen is restored before it reports.
fn arm_panic_hook() -> Arc<PanicHook> {
    let previous: Arc<PanicHook> = Arc::from(panic::take_hook());
    let chained = Arc::clone(&previous);

    panic::set_hook(Box::new(move |info| {
        leave_game_screen();
        chained(info);
    }));

    previous
}

fn leave_game_screen() {
    let _ = disable_raw_mode();
    let _ = write_shell_screen(&mut io::stdout());
}

fn write_game_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, Hide)
}

fn write_shell_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Show, LeaveAlternateScreen)
}

#[cfg(test)]
mod tests {
    use super::{write_game_screen, write_shell_screen};

    #[test]
    fn game_screen_switches_buffer_then_hides_cursor() {
        let mut out = Vec::new();
        write_game_screen(&mut out).expect("vec writer cannot fail");

        assert_eq!(out, b"\x1b[?1049h\x1b[?25l".to_vec());
    }

    #[test]
    fn shell_screen_shows_cursor_then_leaves_buffer() {
        let mut out = Vec::new();
        write_shell_screen(&mut out).expect("vec writer cannot fail");

        assert_eq!(out, b"\x1b[?25h\x1b[?1049l".to_vec());
    }
}
