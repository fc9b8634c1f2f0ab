//! Serializable session state for resuming a game
//!
//! A snapshot holds board occupancy, the bag in draw order, each player's
//! rack and running total, and whose turn it is. Where it is stored is up
//! to the caller.

use super::{Rack, Tile};
use serde::{Deserialize, Serialize};

/// Snapshot format version. Bump when the layout changes.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors from decoding or applying a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot version {found} is newer than supported version {supported}")]
    FutureVersion { found: u32, supported: u32 },
    #[error("snapshot board is not 15x15")]
    BoardShape,
    #[error("snapshot has {found} players, expected between 1 and {max}")]
    PlayerCount { found: usize, max: usize },
    #[error("snapshot turn {turn} is out of range for {players} players")]
    TurnOutOfRange { turn: usize, players: usize },
}

/// One player's saved state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub rack: Rack,
    pub score: u32,
}

/// Saved state of a whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    /// Rows top to bottom, `null` for empty squares
    pub board: Vec<Vec<Option<Tile>>>,
    /// Undrawn tiles; the last one is drawn next
    pub bag: Vec<Tile>,
    pub players: Vec<PlayerSnapshot>,
    pub turn: usize,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: SessionSnapshot = serde_json::from_str(json)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::FutureVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}
