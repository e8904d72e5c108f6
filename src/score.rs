use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::MAX_LEADERBOARD_ENTRIES;
use crate::error::StoreError;

const APP_DIR_NAME: &str = "neon-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// One leaderboard row.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// Persistence boundary for finished runs.
pub trait ScoreStore {
    /// Adds a finished run and keeps only the best entries.
    fn record_score(&mut self, name: &str, score: u32) -> Result<(), StoreError>;

    /// Current entries, best first.
    fn entries(&self) -> Vec<LeaderboardEntry>;

    /// Best recorded score, or 0 when nothing has been recorded.
    fn best_score(&self) -> u32 {
        self.entries().first().map_or(0, |entry| entry.score)
    }
}

/// In-memory top-N table, best first, ties in arrival order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from arbitrary entries, sorting and truncating them.
    #[must_use]
    pub fn from_entries(entries: Vec<LeaderboardEntry>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Inserts a run. Returns the 1-based rank, or `None` if it fell off the table.
    pub fn insert(&mut self, name: &str, score: u32) -> Option<usize> {
        // Equal scores go after existing ones, which is what a stable
        // descending sort of the appended list would produce.
        let position = self
            .entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len());

        self.entries.insert(
            position,
            LeaderboardEntry {
                name: name.to_owned(),
                score,
            },
        );
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);

        (position < MAX_LEADERBOARD_ENTRIES).then_some(position + 1)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text export: one `"{rank}. {name}: {score}"` line per entry.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| format!("{}. {}: {}", index + 1, entry.name, entry.score))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
    }
}

impl ScoreStore for Leaderboard {
    fn record_score(&mut self, name: &str, score: u32) -> Result<(), StoreError> {
        self.insert(name, score);
        Ok(())
    }

    fn entries(&self) -> Vec<LeaderboardEntry> {
        self.entries.clone()
    }
}

/// Leaderboard persisted as JSON, rewritten after every recorded run.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
    board: Leaderboard,
}

impl JsonScoreStore {
    /// Opens the store at the platform data directory, setting aside a
    /// corrupt file.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open_or_set_aside(scores_path())
    }

    /// Opens the store at `path`. A missing file is an empty board.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let board = load_leaderboard_from_path(&path)?;
        Ok(Self { path, board })
    }

    /// Opens the store at `path`. A file that cannot be parsed is renamed to
    /// `<name>.bak` and the store starts empty, so the next save does not
    /// overwrite it.
    pub fn open_or_set_aside(path: PathBuf) -> Result<Self, StoreError> {
        match load_leaderboard_from_path(&path) {
            Ok(board) => Ok(Self { path, board }),
            Err(StoreError::Json(error)) => {
                let backup = backup_path(&path);
                fs::rename(&path, &backup)?;
                log::warn!(
                    "moved unreadable leaderboard to {}: {error}",
                    backup.display()
                );
                Ok(Self::empty_at(path))
            }
            Err(error) => Err(error),
        }
    }

    /// Empty store that will write to `path`, ignoring whatever is there now.
    #[must_use]
    pub fn empty_at(path: PathBuf) -> Self {
        Self {
            path,
            board: Leaderboard::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }
}

impl ScoreStore for JsonScoreStore {
    fn record_score(&mut self, name: &str, score: u32) -> Result<(), StoreError> {
        self.board.insert(name, score);
        save_leaderboard_to_path(&self.path, &self.board)?;
        log::info!("recorded score {score} for {name}");
        Ok(())
    }

    fn entries(&self) -> Vec<LeaderboardEntry> {
        self.board.entries()
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// `scores.json` becomes `scores.json.bak`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Writes the plain-text leaderboard to `path`.
pub fn export_leaderboard(board: &Leaderboard, path: &Path) -> Result<(), StoreError> {
    let mut text = board.to_text();
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

fn load_leaderboard_from_path(path: &Path) -> Result<Leaderboard, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Leaderboard::new()),
        Err(e) => return Err(e.into()),
    };

    let entries: Vec<LeaderboardEntry> = serde_json::from_str(&raw)?;
    Ok(Leaderboard::from_entries(entries))
}

fn save_leaderboard_to_path(path: &Path, board: &Leaderboard) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(board.as_slice())?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{
        JsonScoreStore, Leaderboard, LeaderboardEntry, ScoreStore, backup_path,
        export_leaderboard,
    };

    fn names(board: &Leaderboard) -> Vec<&str> {
        board.as_slice().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn entries_are_sorted_descending() {
        let mut board = Leaderboard::new();
        board.insert("ada", 30);
        board.insert("bob", 90);
        board.insert("cy", 60);

        assert_eq!(names(&board), vec!["bob", "cy", "ada"]);
        assert_eq!(board.best_score(), 90);
    }

    #[test]
    fn ties_keep_arrival_order() {
        let mut board = Leaderboard::new();
        board.insert("first", 50);
        board.insert("second", 50);
        board.insert("third", 50);

        assert_eq!(names(&board), vec!["first", "second", "third"]);
    }

    #[test]
    fn only_top_ten_are_kept() {
        let mut board = Leaderboard::new();
        for score in 1..=10 {
            board.insert(&format!("p{score}"), score * 10);
        }

        assert_eq!(board.insert("low", 5), None);
        assert_eq!(board.insert("high", 55), Some(6));
        assert_eq!(board.as_slice().len(), 10);
        assert_eq!(board.as_slice().last().map(|e| e.score), Some(20));
    }

    #[test]
    fn text_export_lists_ranks() {
        let mut board = Leaderboard::new();
        board.insert("ada", 120);
        board.insert("bob", 40);

        assert_eq!(board.to_text(), "1. ada: 120\n2. bob: 40");
    }

    #[test]
    fn json_store_round_trips_through_disk() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("nested").join("scores.json");

        let mut store = JsonScoreStore::open(path.clone()).expect("missing file opens empty");
        assert!(store.entries().is_empty());
        store.record_score("ada", 70).expect("record should succeed");
        store.record_score("bob", 90).expect("record should succeed");

        let reopened = JsonScoreStore::open(path).expect("reopen should succeed");
        assert_eq!(
            reopened.entries(),
            vec![
                LeaderboardEntry {
                    name: "bob".to_owned(),
                    score: 90
                },
                LeaderboardEntry {
                    name: "ada".to_owned(),
                    score: 70
                },
            ]
        );
    }

    #[test]
    fn malformed_score_file_returns_error() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("scores.json");
        fs::write(&path, "not-json").expect("test file write should succeed");

        assert!(JsonScoreStore::open(path).is_err());
    }

    #[test]
    fn malformed_score_file_is_kept_as_backup() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("scores.json");
        fs::write(&path, "not-json").expect("test file write should succeed");

        let mut store =
            JsonScoreStore::open_or_set_aside(path.clone()).expect("open should recover");
        assert!(store.entries().is_empty());
        store.record_score("ada", 40).expect("record should succeed");

        let backup = backup_path(&path);
        assert_eq!(backup, dir.path().join("scores.json.bak"));
        assert_eq!(
            fs::read_to_string(&backup).expect("backup should exist"),
            "not-json"
        );
        let reopened = JsonScoreStore::open(path).expect("new file should parse");
        assert_eq!(reopened.best_score(), 40);
    }

    #[test]
    fn unsorted_file_is_normalized_on_load() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("scores.json");
        fs::write(
            &path,
            r#"[{"name":"a","score":10},{"name":"b","score":30},{"name":"c","score":10}]"#,
        )
        .expect("test file write should succeed");

        let store = JsonScoreStore::open(path).expect("open should succeed");
        let order: Vec<String> = store.entries().into_iter().map(|e| e.name).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn export_writes_text_file() {
        let dir = tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("snake_scores.txt");
        let mut board = Leaderboard::new();
        board.insert("ada", 10);

        export_leaderboard(&board, &path).expect("export should succeed");

        assert_eq!(
            fs::read_to_string(path).expect("export should be readable"),
            "1. ada: 10\n"
        );
    }
}
