//! Game logic: tiles, the bag, racks, the board, word matching and turns

pub mod bag;
pub mod board;
pub mod dictionary;
pub mod hint;
pub mod matcher;
pub mod rack;
pub mod session;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub use bag::Bag;
pub use board::{Board, Direction, PlacementError, Position};
pub use dictionary::{Dictionary, DictionaryStatus};
pub use rack::Rack;
pub use session::{GameSession, PlayRequest, PlayResult, TurnPhase};
pub use snapshot::{SessionSnapshot, SnapshotError};

/// The symbol used for wildcard tiles, both on the rack and in typed words.
pub const BLANK_SYMBOL: char = '*';

/// Default number of tiles a rack is refilled to.
pub const DEFAULT_RACK_SIZE: usize = 7;

/// Standard English tile distribution (100 tiles).
const DEFAULT_FREQUENCIES: [(char, usize); 27] = [
    ('*', 2),
    ('a', 9),
    ('b', 2),
    ('c', 2),
    ('d', 4),
    ('e', 12),
    ('f', 2),
    ('g', 3),
    ('h', 2),
    ('i', 9),
    ('j', 1),
    ('k', 1),
    ('l', 4),
    ('m', 2),
    ('n', 6),
    ('o', 8),
    ('p', 2),
    ('q', 1),
    ('r', 6),
    ('s', 4),
    ('t', 6),
    ('u', 4),
    ('v', 2),
    ('w', 2),
    ('x', 1),
    ('y', 2),
    ('z', 1),
];

/// A single tile: a lowercase letter or a blank.
///
/// Serialized as its one-character symbol so snapshots stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Tile {
    Letter(char),
    Blank,
}

/// A character that is neither a lowercase ASCII letter nor the blank symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a tile symbol")]
pub struct InvalidTile(pub char);

impl Tile {
    /// Parse a tile symbol. Only `a..=z` and `*` are accepted.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            BLANK_SYMBOL => Some(Tile::Blank),
            'a'..='z' => Some(Tile::Letter(c)),
            _ => None,
        }
    }

    /// The symbol printed on the tile.
    pub fn symbol(self) -> char {
        match self {
            Tile::Letter(c) => c,
            Tile::Blank => BLANK_SYMBOL,
        }
    }

    /// Intrinsic point value, independent of board position.
    pub fn value(self) -> u32 {
        match self {
            Tile::Blank => 0,
            Tile::Letter(c) => match c {
                'a' | 'e' | 'i' | 'l' | 'n' | 'o' | 'r' | 's' | 't' | 'u' => 1,
                'd' | 'g' => 2,
                'b' | 'c' | 'm' | 'p' => 3,
                'f' | 'h' | 'v' | 'w' | 'y' => 4,
                'k' => 5,
                'j' | 'x' => 8,
                'q' | 'z' => 10,
                _ => 0,
            },
        }
    }

    pub fn is_blank(self) -> bool {
        matches!(self, Tile::Blank)
    }
}

impl TryFrom<char> for Tile {
    type Error = InvalidTile;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Tile::from_char(c).ok_or(InvalidTile(c))
    }
}

impl From<Tile> for char {
    fn from(tile: Tile) -> char {
        tile.symbol()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A multiset of tiles: tile -> number held.
pub type TileCounts = BTreeMap<Tile, usize>;

/// Count tiles into a multiset.
pub fn count_tiles(tiles: &[Tile]) -> TileCounts {
    let mut counts = TileCounts::new();
    for tile in tiles {
        *counts.entry(*tile).or_insert(0) += 1;
    }
    counts
}

/// Tile distribution used to fill the bag: (tile, copies).
pub type FrequencyTable = Vec<(Tile, usize)>;

/// The standard 100-tile distribution with two blanks.
pub fn default_frequencies() -> FrequencyTable {
    DEFAULT_FREQUENCIES
        .iter()
        .filter_map(|(c, n)| Tile::from_char(*c).map(|tile| (tile, *n)))
        .collect()
}

/// Sum of intrinsic values of a tile sequence.
pub fn base_score(tiles: &[Tile]) -> u32 {
    tiles.iter().map(|t| t.value()).sum()
}
