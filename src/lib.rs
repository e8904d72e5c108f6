//! Neon Snake: a terminal Snake game with levels and a leaderboard.
//!
//! The simulation ([`game`]) is pure and seedable. [`session::Session`]
//! drives it with a [`ticker::Ticker`] and forwards outcomes to an
//! [`audio::AudioSink`] and a [`score::ScoreStore`]. Everything under
//! [`renderer`] and [`ui`] only reads game state.

pub mod audio;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod level;
pub mod renderer;
pub mod score;
pub mod session;
pub mod settings;
pub mod snake;
pub mod terminal_runtime;
pub mod ticker;

pub mod ui {
    pub mod hud;
    pub mod menu;
}
