#![allow(dead_code)]
//! Turn orchestration for a game session
//!
//! The session owns the board, the bag and every player's rack, and runs
//! each play through the same steps:
//! 1. build the word from the active player's rack
//! 2. check the word against the dictionary
//! 3. check the board has room for it
//! 4. place, score, swap the used tiles for fresh ones, pass the turn
//!
//! A play that fails any of steps 1-3 changes nothing.

use super::hint;
use super::matcher::{construct, missing_letters};
use super::snapshot::{PlayerSnapshot, SessionSnapshot, SnapshotError, SNAPSHOT_VERSION};
use super::{
    default_frequencies, Bag, Board, Dictionary, Direction, FrequencyTable, PlacementError,
    Position, Rack, Tile,
};
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, info};

/// Most players a session supports.
pub const MAX_PLAYERS: usize = 4;

/// A request to lay a word on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    /// Lowercase letters, `*` for a blank
    pub word: String,
    pub position: Position,
    pub direction: Direction,
}

impl PlayRequest {
    pub fn new(word: impl Into<String>, position: Position, direction: Direction) -> Self {
        Self {
            word: word.into(),
            position,
            direction,
        }
    }
}

/// Outcome of a play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayResult {
    /// Play committed
    Accepted {
        /// Index of the player who made the play
        player: usize,
        /// Points scored by this word
        score: u32,
        /// Tiles taken from the rack, in word order
        tiles: Vec<Tile>,
    },
    /// The rack cannot supply the word
    NotConstructible { missing: Vec<char> },
    /// No dictionary is loaded, so no word can be checked
    DictionaryUnavailable,
    /// Word not found in the dictionary
    NotInDictionary,
    /// The word does not fit at that position
    CannotPlace(PlacementError),
}

impl PlayResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PlayResult::Accepted { .. })
    }

    /// Returns a user-friendly message
    pub fn message(&self, word: &str) -> String {
        match self {
            PlayResult::Accepted { score, .. } => format!("{} scored {} points", word, score),
            PlayResult::NotConstructible { missing } if missing.is_empty() => {
                format!("The word {} cannot be constructed", word)
            }
            PlayResult::NotConstructible { missing } => {
                let letters: String = missing.iter().collect();
                format!("The word {} cannot be constructed (missing: {})", word, letters)
            }
            PlayResult::DictionaryUnavailable => {
                "The dictionary is unavailable; no words can be checked".to_string()
            }
            PlayResult::NotInDictionary => format!("{} is not in the dictionary", word),
            PlayResult::CannotPlace(reason) => {
                format!("The word {} cannot be played there: {}", word, reason)
            }
        }
    }
}

/// Where the current (or last) play got to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Validating,
    Placing,
    Scoring,
    Committed,
    Rejected,
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub rack: Rack,
    /// Running total for the current game
    pub score: u32,
}

/// One game: board, bag, players and turn order.
pub struct GameSession {
    dictionary: Arc<Dictionary>,
    board: Board,
    bag: Bag,
    players: Vec<Player>,
    turn: usize,
    rack_size: usize,
    frequencies: FrequencyTable,
    rng: StdRng,
    phase: TurnPhase,
}

impl GameSession {
    /// Start a session with the standard tile distribution.
    ///
    /// Racks are filled in seating order. `names` must hold between one and
    /// [`MAX_PLAYERS`] entries; extra names are ignored and an empty list
    /// gets a single default player.
    pub fn new(
        dictionary: Arc<Dictionary>,
        names: Vec<String>,
        rack_size: usize,
        rng: StdRng,
    ) -> Self {
        Self::with_frequencies(dictionary, names, rack_size, default_frequencies(), rng)
    }

    pub fn with_frequencies(
        dictionary: Arc<Dictionary>,
        mut names: Vec<String>,
        rack_size: usize,
        frequencies: FrequencyTable,
        rng: StdRng,
    ) -> Self {
        if names.is_empty() {
            names.push("Player 1".to_string());
        }
        names.truncate(MAX_PLAYERS);

        let players = names
            .into_iter()
            .map(|name| Player {
                name,
                rack: Rack::new(),
                score: 0,
            })
            .collect();

        let mut session = Self {
            dictionary,
            board: Board::new(),
            bag: Bag::default(),
            players,
            turn: 0,
            rack_size,
            frequencies,
            rng,
            phase: TurnPhase::Idle,
        };
        session.reset();
        session
    }

    /// Start over: empty board, full reshuffled bag, fresh racks, first
    /// player to move, totals zeroed.
    pub fn reset(&mut self) {
        self.board.reset();
        self.bag.initialize(&self.frequencies, &mut self.rng);
        for player in &mut self.players {
            player.rack.reset();
            player.score = 0;
        }
        for player in &mut self.players {
            player.rack.draw_up_to(self.rack_size, &mut self.bag);
        }
        self.turn = 0;
        self.phase = TurnPhase::Idle;
        info!(
            players = self.players.len(),
            bag = self.bag.remaining(),
            "Session reset"
        );
    }

    /// Attempt a play for the active player.
    pub fn play(&mut self, request: &PlayRequest) -> PlayResult {
        let word = request.word.trim().to_lowercase();
        let player_idx = self.turn;
        self.phase = TurnPhase::Validating;

        // 1. Build the word from the rack
        let available = self.players[player_idx].rack.available_tiles();
        let Some(tiles) = construct(&available, &word) else {
            let missing = missing_letters(&available, &word);
            return self.reject(&word, PlayResult::NotConstructible { missing });
        };
        let mut rack = self.players[player_idx].rack.clone();
        for tile in &tiles {
            if rack.remove(*tile).is_err() {
                return self.reject(&word, PlayResult::NotConstructible { missing: vec![] });
            }
        }

        // 2. Dictionary
        if !self.dictionary.is_loaded() {
            return self.reject(&word, PlayResult::DictionaryUnavailable);
        }
        if !self.dictionary.is_valid(&word) {
            return self.reject(&word, PlayResult::NotInDictionary);
        }

        // 3. Board
        self.phase = TurnPhase::Placing;
        if let Err(reason) = self
            .board
            .check_placement(&tiles, request.position, request.direction)
        {
            return self.reject(&word, PlayResult::CannotPlace(reason));
        }

        // 4. Commit
        self.board.place(&tiles, request.position, request.direction);
        self.phase = TurnPhase::Scoring;
        let score = self.board.score(&tiles, request.position, request.direction);

        rack.draw_up_to(self.rack_size, &mut self.bag);
        let player = &mut self.players[player_idx];
        player.rack = rack;
        player.score += score;

        self.turn = (self.turn + 1) % self.players.len();
        self.phase = TurnPhase::Committed;
        info!(
            player = %self.players[player_idx].name,
            word = %word,
            x = request.position.x,
            y = request.position.y,
            direction = request.direction.label(),
            score,
            bag = self.bag.remaining(),
            "Play committed"
        );

        PlayResult::Accepted {
            player: player_idx,
            score,
            tiles,
        }
    }

    fn reject(&mut self, word: &str, result: PlayResult) -> PlayResult {
        self.phase = TurnPhase::Rejected;
        debug!(
            player = %self.players[self.turn].name,
            word,
            reason = ?result,
            "Play rejected"
        );
        result
    }

    /// Final standings, highest first, then zero every total for the next game.
    pub fn end_game(&mut self) -> Vec<(String, u32)> {
        let standings = self.standings();
        for player in &mut self.players {
            player.score = 0;
        }
        info!(?standings, "Game ended");
        standings
    }

    /// Current totals as a sorted list (highest first, seating order on ties).
    pub fn standings(&self) -> Vec<(String, u32)> {
        let mut scores: Vec<_> = self
            .players
            .iter()
            .map(|p| (p.name.clone(), p.score))
            .collect();
        scores.sort_by(|a, b| b.1.cmp(&a.1));
        scores
    }

    /// A best-scoring word the active player could build, if any.
    pub fn hint(&mut self) -> Option<String> {
        let tiles = self.current_player().rack.available_tiles();
        hint::suggest(&self.dictionary, &tiles, &mut self.rng)
    }

    /// Every best-scoring word for the active player's rack.
    pub fn best_words(&self) -> Vec<String> {
        let tiles = self.current_player().rack.available_tiles();
        hint::best_possible_words(&self.dictionary, &tiles)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Swap in a new dictionary (e.g. after a reload).
    pub fn set_dictionary(&mut self, dictionary: Arc<Dictionary>) {
        self.dictionary = dictionary;
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn]
    }

    /// Index of the player to move.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn rack_size(&self) -> usize {
        self.rack_size
    }

    /// Capture everything needed to resume this session later.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SNAPSHOT_VERSION,
            board: self.board.snapshot(),
            bag: self.bag.tiles().to_vec(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name.clone(),
                    rack: p.rack.clone(),
                    score: p.score,
                })
                .collect(),
            turn: self.turn,
        }
    }

    /// Resume from a snapshot. Nothing changes if the snapshot is invalid.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<(), SnapshotError> {
        let players = snapshot.players.len();
        if players == 0 || players > MAX_PLAYERS {
            return Err(SnapshotError::PlayerCount {
                found: players,
                max: MAX_PLAYERS,
            });
        }
        if snapshot.turn >= players {
            return Err(SnapshotError::TurnOutOfRange {
                turn: snapshot.turn,
                players,
            });
        }
        let mut board = Board::new();
        if !board.restore(&snapshot.board) {
            return Err(SnapshotError::BoardShape);
        }

        self.board = board;
        self.bag = Bag::from_tiles(snapshot.bag);
        self.players = snapshot
            .players
            .into_iter()
            .map(|p| Player {
                name: p.name,
                rack: p.rack,
                score: p.score,
            })
            .collect();
        self.turn = snapshot.turn;
        self.phase = TurnPhase::Idle;
        info!(
            players = self.players.len(),
            turn = self.turn,
            bag = self.bag.remaining(),
            "Session restored"
        );
        Ok(())
    }
}
