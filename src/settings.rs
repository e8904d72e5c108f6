//! Player preferences persisted between runs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::config::{DEFAULT_PLAYER_NAME, MAX_PLAYER_NAME_WIDTH};
use crate::error::StoreError;

const APP_DIR_NAME: &str = "neon-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player_name: String,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
            muted: false,
        }
    }
}

impl Settings {
    /// Loads settings from the platform data directory.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from_path(&settings_path())
    }

    /// Saves settings to the platform data directory.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to_path(&settings_path())
    }

    /// Missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, StoreError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let mut settings: Self = serde_json::from_str(&raw)?;
        settings.player_name = sanitize_player_name(&settings.player_name);
        Ok(settings)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Trims the name and cuts it to the display width the HUD can hold.
///
/// Names with nothing printable fall back to the default player name.
#[must_use]
pub fn sanitize_player_name(raw: &str) -> String {
    let mut width = 0;
    let mut name = String::new();
    for ch in raw.trim().chars().filter(|ch| !ch.is_control()) {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > MAX_PLAYER_NAME_WIDTH {
            break;
        }
        width += ch_width;
        name.push(ch);
    }

    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_PLAYER_NAME.to_owned();
    }
    name.to_owned()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{Settings, sanitize_player_name};

    #[test]
    fn blank_name_falls_back_to_default() {
        assert_eq!(sanitize_player_name("   "), "Player");
        assert_eq!(sanitize_player_name("  ada "), "ada");
    }

    #[test]
    fn control_only_name_falls_back_to_default() {
        assert_eq!(sanitize_player_name("\u{1b}\u{7}\t\u{0}"), "Player");
        assert_eq!(sanitize_player_name("\u{1b} ada"), "ada");
    }

    #[test]
    fn long_names_are_cut_by_display_width() {
        assert_eq!(
            sanitize_player_name("abcdefghijklmnopqrstuvwxyz"),
            "abcdefghijklmnop"
        );
        // Wide glyphs take two columns each.
        assert_eq!(sanitize_player_name("蛇蛇蛇蛇蛇蛇蛇蛇蛇蛇"), "蛇蛇蛇蛇蛇蛇蛇蛇");
    }

    #[test]
    fn settings_round_trip() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        let settings = Settings {
            player_name: "ada".to_owned(),
            muted: true,
        };

        settings.save_to_path(&path).expect("save should succeed");
        let loaded = Settings::load_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, settings);
    }

    #[test]
    fn mute_change_replaces_saved_flag() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        let mut settings = Settings {
            player_name: "ada".to_owned(),
            muted: false,
        };
        settings.save_to_path(&path).expect("save should succeed");

        settings.muted = true;
        settings.save_to_path(&path).expect("save should succeed");

        let loaded = Settings::load_from_path(&path).expect("load should succeed");
        assert!(loaded.muted);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().expect("temp dir should be creatable");
        let loaded =
            Settings::load_from_path(&dir.path().join("absent.json")).expect("missing is ok");

        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"muted":true}"#).expect("write should succeed");

        let loaded = Settings::load_from_path(&path).expect("load should succeed");
        assert_eq!(loaded.player_name, "Player");
        assert!(loaded.muted);
    }
}
