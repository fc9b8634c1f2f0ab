//! Persistent storage using SQLite (rusqlite)
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - SQLite database with schema versioning
//! - Word and game score tables with top-10 queries
//! - A single saved-session slot for resuming a game

use crate::game::SessionSnapshot;
use crate::game::SnapshotError;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Current schema version. Bump this when making schema changes.
/// Version history:
/// - v1: meta, word_scores and game_scores tables
/// - v2: Added saved_session table
const SCHEMA_VERSION: u32 = 2;

/// How many rows the leaderboard queries return.
pub const TOP_SCORES: usize = 10;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("could not determine data directory")]
    NoDataDirectory,
    #[error("database schema version {found} is newer than supported version {supported}")]
    FutureSchemaVersion { found: u32, supported: u32 },
    #[error("failed to create data directory: {0}")]
    CreateDirFailed(#[source] std::io::Error),
    #[error("database has a meta table but no schema version")]
    MissingSchemaVersion,
    #[error("migration from v{from} to v{to} failed: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },
    #[error("saved session is unreadable: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// One word play on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordScore {
    pub name: String,
    pub word: String,
    pub score: u32,
}

/// One finished game on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameScore {
    pub name: String,
    pub score: u32,
}

/// The main storage handle.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database in the OS-standard data directory:
    /// - Linux: `$XDG_DATA_HOME/scrawl/` or `~/.local/share/scrawl/`
    /// - macOS: `~/Library/Application Support/scrawl/`
    pub fn open_default() -> Result<Self, StorageError> {
        let data_dir = Self::data_dir()?;
        Self::open(&data_dir.join("scrawl.db"))
    }

    /// Open or create the database at `path`, creating parent directories.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(StorageError::CreateDirFailed)?;
        }
        let conn = Connection::open(path)?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        info!(path = %path.display(), "Storage opened");
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory.
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "scrawl")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    /// Record the score of a single word play.
    pub fn save_word_score(&self, name: &str, word: &str, score: u32) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO word_scores (name, word, score, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![name, word, score, now_millis()],
        )?;
        debug!(name, word, score, "Word score saved");
        Ok(())
    }

    /// Record a player's final total for a game.
    pub fn save_game_score(&self, name: &str, score: u32) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO game_scores (name, score, created_at) VALUES (?1, ?2, ?3)",
            params![name, score, now_millis()],
        )?;
        debug!(name, score, "Game score saved");
        Ok(())
    }

    /// The ten best word plays, highest first (earlier plays win ties).
    pub fn top10_word_scores(&self) -> Result<Vec<WordScore>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, word, score FROM word_scores ORDER BY score DESC, id ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![TOP_SCORES as i64], |row| {
            Ok(WordScore {
                name: row.get(0)?,
                word: row.get(1)?,
                score: row.get(2)?,
            })
        })?;

        let mut scores = Vec::new();
        for row in rows {
            scores.push(row?);
        }
        Ok(scores)
    }

    /// The ten best game totals, highest first (earlier games win ties).
    pub fn top10_game_scores(&self) -> Result<Vec<GameScore>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, score FROM game_scores ORDER BY score DESC, id ASC LIMIT ?1")?;
        let rows = stmt.query_map(params![TOP_SCORES as i64], |row| {
            Ok(GameScore {
                name: row.get(0)?,
                score: row.get(1)?,
            })
        })?;

        let mut scores = Vec::new();
        for row in rows {
            scores.push(row?);
        }
        Ok(scores)
    }

    /// Store the session snapshot, replacing any previous one.
    pub fn save_session(&self, snapshot: &SessionSnapshot) -> Result<(), StorageError> {
        let payload = snapshot.to_json()?;
        self.conn.execute(
            "INSERT OR REPLACE INTO saved_session (id, payload, saved_at) VALUES (1, ?1, ?2)",
            params![payload, now_millis()],
        )?;
        debug!(bytes = payload.len(), "Session saved");
        Ok(())
    }

    /// The stored session snapshot, if there is one.
    pub fn load_session(&self) -> Result<Option<SessionSnapshot>, StorageError> {
        let payload: Option<String> = self
            .conn
            .query_row("SELECT payload FROM saved_session WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match payload {
            Some(json) => Ok(Some(SessionSnapshot::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Forget the stored session.
    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM saved_session", [])?;
        Ok(())
    }

    // Private helper methods

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            // Fresh database, create schema
            self.create_schema_v1()?;
            self.migrate_schema(1)?;
        } else if current_version < SCHEMA_VERSION {
            self.migrate_schema(current_version)?;
        } else if current_version > SCHEMA_VERSION {
            // Database is from a newer version
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        self.conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or(StorageError::MissingSchemaVersion)
    }

    fn create_schema_v1(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            -- Meta table: stores schema version
            CREATE TABLE meta (
                schema_version INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- Every accepted word play
            CREATE TABLE word_scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                word TEXT NOT NULL,
                score INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- Final totals of finished games
            CREATE TABLE game_scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                score INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX idx_word_scores_score ON word_scores (score DESC);
            CREATE INDEX idx_game_scores_score ON game_scores (score DESC);
            "#,
        )?;

        self.conn.execute(
            "INSERT INTO meta (schema_version, created_at) VALUES (1, ?1)",
            params![now_millis()],
        )?;

        Ok(())
    }

    fn migrate_schema(&self, from_version: u32) -> Result<(), StorageError> {
        let mut current_version = from_version;

        // Apply migrations sequentially
        while current_version < SCHEMA_VERSION {
            match current_version {
                1 => {
                    self.migrate_v1_to_v2()?;
                    current_version = 2;
                }
                _ => {
                    return Err(StorageError::MigrationFailed {
                        from: current_version,
                        to: SCHEMA_VERSION,
                        reason: format!("no migration path from version {}", current_version),
                    });
                }
            }
        }

        self.conn.execute(
            "UPDATE meta SET schema_version = ?1",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Migrate from schema v1 to v2: add the saved session slot
    fn migrate_v1_to_v2(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            -- At most one row; id is pinned to 1
            CREATE TABLE IF NOT EXISTS saved_session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                payload TEXT NOT NULL,
                saved_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Dictionary, GameSession};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_storage_creation() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.top10_word_scores().unwrap().is_empty());
        assert!(storage.top10_game_scores().unwrap().is_empty());
    }

    #[test]
    fn test_schema_version_is_current() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_migrates_v1_database() {
        let storage = Storage {
            conn: Connection::open_in_memory().unwrap(),
        };
        storage.create_schema_v1().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), 1);

        storage.initialize_schema().unwrap();
        assert_eq!(storage.get_schema_version().unwrap(), SCHEMA_VERSION);
        assert!(storage.load_session().unwrap().is_none());
    }

    #[test]
    fn test_future_schema_rejected() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute("UPDATE meta SET schema_version = 99", [])
            .unwrap();
        assert!(matches!(
            storage.initialize_schema(),
            Err(StorageError::FutureSchemaVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_unreadable_schema_version_is_error() {
        let storage = Storage {
            conn: Connection::open_in_memory().unwrap(),
        };
        storage
            .conn
            .execute_batch("CREATE TABLE meta (created_at INTEGER NOT NULL);")
            .unwrap();
        assert!(matches!(
            storage.initialize_schema(),
            Err(StorageError::Database(_))
        ));
    }

    #[test]
    fn test_empty_meta_is_error() {
        let storage = Storage::open_in_memory().unwrap();
        storage.conn.execute("DELETE FROM meta", []).unwrap();
        assert!(matches!(
            storage.initialize_schema(),
            Err(StorageError::MissingSchemaVersion)
        ));
    }

    #[test]
    fn test_word_scores_sorted_descending() {
        let storage = Storage::open_in_memory().unwrap();
        storage.save_word_score("Alice", "cat", 10).unwrap();
        storage.save_word_score("Bob", "quiz", 44).unwrap();
        storage.save_word_score("Alice", "dog", 5).unwrap();

        let top = storage.top10_word_scores().unwrap();
        let scores: Vec<u32> = top.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![44, 10, 5]);
        assert_eq!(
            top[0],
            WordScore {
                name: "Bob".to_string(),
                word: "quiz".to_string(),
                score: 44
            }
        );
    }

    #[test]
    fn test_top10_limits_results() {
        let storage = Storage::open_in_memory().unwrap();
        for i in 0..15u32 {
            storage.save_word_score("Alice", "word", i).unwrap();
            storage.save_game_score("Alice", i * 10).unwrap();
        }

        let words = storage.top10_word_scores().unwrap();
        assert_eq!(words.len(), TOP_SCORES);
        assert_eq!(words[0].score, 14);
        assert_eq!(words[9].score, 5);

        let games = storage.top10_game_scores().unwrap();
        assert_eq!(games.len(), TOP_SCORES);
        assert_eq!(games[0].score, 140);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let storage = Storage::open_in_memory().unwrap();
        storage.save_game_score("Alice", 30).unwrap();
        storage.save_game_score("Bob", 30).unwrap();
        let names: Vec<String> = storage
            .top10_game_scores()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_session_slot() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.load_session().unwrap().is_none());

        let dictionary = Arc::new(Dictionary::from_words(["cat"]));
        let session = GameSession::new(
            dictionary,
            vec!["Alice".to_string(), "Bob".to_string()],
            7,
            StdRng::seed_from_u64(11),
        );
        let snapshot = session.snapshot();
        storage.save_session(&snapshot).unwrap();
        storage.save_session(&snapshot).unwrap();
        assert_eq!(storage.load_session().unwrap(), Some(snapshot));

        storage.clear_session().unwrap();
        assert!(storage.load_session().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_session_is_error() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute(
                "INSERT INTO saved_session (id, payload, saved_at) VALUES (1, 'nope', 0)",
                [],
            )
            .unwrap();
        assert!(matches!(
            storage.load_session(),
            Err(StorageError::Snapshot(_))
        ));
    }

    #[test]
    fn test_open_file_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scrawl.db");
        {
            let storage = Storage::open(&path).unwrap();
            storage.save_word_score("Alice", "cat", 10).unwrap();
        }
        let storage = Storage::open(&path).unwrap();
        assert_eq!(storage.top10_word_scores().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_score_writes_keep_the_turn() {
        use crate::app::{App, Field, Tone};
        use crate::game::{Bag, Rack, Tile};

        let mut session = GameSession::new(
            Arc::new(Dictionary::from_words(["cat", "act"])),
            vec!["Alice".to_string(), "Bob".to_string()],
            7,
            StdRng::seed_from_u64(4),
        );
        let tiles: Vec<Tile> = "catdogs".chars().rev().filter_map(Tile::from_char).collect();
        let mut rack = Rack::new();
        rack.draw_up_to(7, &mut Bag::from_tiles(tiles));
        let mut snapshot = session.snapshot();
        snapshot.players[0].rack = rack;
        session.restore(snapshot).unwrap();

        let storage = Storage::open_in_memory().unwrap();
        storage
            .conn
            .execute_batch("DROP TABLE word_scores; DROP TABLE game_scores;")
            .unwrap();
        let mut app = App::new(session, Some(storage), None);

        app.focus = Field::Word;
        "cat".chars().for_each(|c| app.on_char(c));
        app.next_field();
        app.on_char('8');
        app.next_field();
        app.on_char('8');
        app.on_submit();

        assert_eq!(app.tone, Tone::Good);
        assert_eq!(app.session().turn(), 1);
        assert_eq!(app.played_words().len(), 1);
        assert!(app.top_words().is_empty());

        app.on_end_game();
        assert_eq!(app.tone, Tone::Good);
        assert_eq!(app.session().turn(), 0);
        assert_eq!(app.session().board().occupied(), 0);
        assert!(app.session().players().iter().all(|p| p.score == 0));
        assert!(app.top_games().is_empty());
    }

    #[test]
    fn test_data_dir() {
        // May fail in some CI environments without a home directory
        if let Ok(dir) = Storage::data_dir() {
            assert!(dir.to_string_lossy().contains("scrawl"));
        }
    }
}
