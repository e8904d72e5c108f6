//! Sound notifications.
//!
//! The game only tells a sink *that* something happened; sinks decide what
//! to play. Errors are reported but the session never acts on them.

use std::io::{self, Write};

use crate::error::AudioError;

/// Fire-and-forget audio capability.
pub trait AudioSink {
    fn on_game_start(&mut self) -> Result<(), AudioError>;
    fn on_food_eaten(&mut self) -> Result<(), AudioError>;
    fn on_game_over(&mut self) -> Result<(), AudioError>;

    /// Suspends background music (pause, level popup, end of a run).
    fn pause_music(&mut self) -> Result<(), AudioError>;

    /// Resumes background music unless muted.
    fn resume_music(&mut self) -> Result<(), AudioError>;

    fn set_muted(&mut self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Sink that plays nothing; keeps only the mute flag.
#[derive(Debug, Default, Clone)]
pub struct SilentAudio {
    muted: bool,
}

impl SilentAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for SilentAudio {
    fn on_game_start(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn on_food_eaten(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn on_game_over(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn resume_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

/// Rings the terminal bell for effects. The terminal has no music channel,
/// so music calls only track whether music would be playing.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
    muted: bool,
    music_playing: bool,
}

impl TerminalBell<io::Stdout> {
    #[must_use]
    pub fn stdout(muted: bool) -> Self {
        Self::with_writer(io::stdout(), muted)
    }
}

impl<W: Write> TerminalBell<W> {
    #[must_use]
    pub fn with_writer(out: W, muted: bool) -> Self {
        Self {
            out,
            muted,
            music_playing: false,
        }
    }

    #[must_use]
    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Returns the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, times: usize) -> Result<(), AudioError> {
        if self.muted {
            return Ok(());
        }

        for _ in 0..times {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn on_game_start(&mut self) -> Result<(), AudioError> {
        self.music_playing = !self.muted;
        Ok(())
    }

    fn on_food_eaten(&mut self) -> Result<(), AudioError> {
        self.ring(1)
    }

    fn on_game_over(&mut self) -> Result<(), AudioError> {
        self.music_playing = false;
        self.ring(2)
    }

    fn pause_music(&mut self) -> Result<(), AudioError> {
        self.music_playing = false;
        Ok(())
    }

    fn resume_music(&mut self) -> Result<(), AudioError> {
        self.music_playing = !self.muted;
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.music_playing = false;
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::{AudioSink, TerminalBell};

    #[test]
    fn food_rings_once_and_game_over_twice() {
        let mut bell = TerminalBell::with_writer(Vec::new(), false);

        bell.on_food_eaten().expect("vec writer cannot fail");
        bell.on_game_over().expect("vec writer cannot fail");

        assert_eq!(bell.into_inner(), b"\x07\x07\x07".to_vec());
    }

    #[test]
    fn muted_bell_is_silent() {
        let mut bell = TerminalBell::with_writer(Vec::new(), true);

        bell.on_food_eaten().expect("vec writer cannot fail");
        bell.on_game_start().expect("vec writer cannot fail");

        assert!(!bell.music_playing());
        assert!(bell.into_inner().is_empty());
    }

    #[test]
    fn music_follows_pause_and_mute() {
        let mut bell = TerminalBell::with_writer(Vec::new(), false);

        bell.on_game_start().expect("no io");
        assert!(bell.music_playing());

        bell.pause_music().expect("no io");
        assert!(!bell.music_playing());

        bell.resume_music().expect("no io");
        assert!(bell.music_playing());

        bell.set_muted(true);
        assert!(!bell.music_playing());
        bell.resume_music().expect("no io");
        assert!(!bell.music_playing());
    }
}
