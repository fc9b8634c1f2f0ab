//! Application state management

use crate::game::board::BOARD_SIZE;
use crate::game::{Dictionary, Direction, GameSession, PlayRequest, PlayResult, Position};
use crate::storage::{GameScore, Storage, WordScore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Input field that has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Word,
    Column,
    Row,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Word => Field::Column,
            Field::Column => Field::Row,
            Field::Row => Field::Word,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Word => Field::Row,
            Field::Column => Field::Word,
            Field::Row => Field::Column,
        }
    }
}

/// How the feedback line should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Bad,
}

/// A word played this session, for the word score table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedWord {
    pub player: String,
    pub word: String,
    pub score: u32,
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Word being typed
    pub word: String,
    /// Column being typed (1-15)
    pub column: String,
    /// Row being typed (1-15)
    pub row: String,
    pub direction: Direction,
    pub focus: Field,
    /// Feedback message from the last action
    pub feedback: String,
    pub tone: Tone,
    /// Last hint, if one was asked for this turn
    pub hint: Option<String>,
    session: GameSession,
    storage: Option<Storage>,
    /// Word list file, `None` for the bundled list
    dictionary_path: Option<PathBuf>,
    played: Vec<PlayedWord>,
    top_words: Vec<WordScore>,
    top_games: Vec<GameScore>,
}

impl App {
    /// Create a new application instance
    pub fn new(
        session: GameSession,
        storage: Option<Storage>,
        dictionary_path: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            should_quit: false,
            word: String::new(),
            column: String::new(),
            row: String::new(),
            direction: Direction::Across,
            focus: Field::Word,
            feedback: String::new(),
            tone: Tone::Neutral,
            hint: None,
            session,
            storage,
            dictionary_path,
            played: Vec::new(),
            top_words: Vec::new(),
            top_games: Vec::new(),
        };
        app.refresh_leaderboards();
        app
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    /// Words played since the app started, oldest first
    pub fn played_words(&self) -> &[PlayedWord] {
        &self.played
    }

    pub fn top_words(&self) -> &[WordScore] {
        &self.top_words
    }

    pub fn top_games(&self) -> &[GameScore] {
        &self.top_games
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle character input into the focused field
    pub fn on_char(&mut self, c: char) {
        match self.focus {
            Field::Word => {
                if c.is_ascii_alphabetic() || c == crate::game::BLANK_SYMBOL {
                    self.word.push(c.to_ascii_lowercase());
                }
            }
            Field::Column => push_digit(&mut self.column, c),
            Field::Row => push_digit(&mut self.row, c),
        }
    }

    /// Handle backspace in the focused field
    pub fn on_backspace(&mut self) {
        match self.focus {
            Field::Word => self.word.pop(),
            Field::Column => self.column.pop(),
            Field::Row => self.row.pop(),
        };
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggle();
    }

    /// Handle play submission (Enter key)
    pub fn on_submit(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let Some(position) = self.position() else {
            self.set_feedback(
                format!("Column and row must be between 1 and {}", BOARD_SIZE),
                Tone::Bad,
            );
            return;
        };

        let request = PlayRequest::new(self.word.clone(), position, self.direction);
        let result = self.session.play(&request);
        let message = result.message(&self.word);

        if !result.is_accepted() {
            self.set_feedback(message, Tone::Bad);
            return;
        }
        if let PlayResult::Accepted { player, score, .. } = result {
            let name = self.session.players()[player].name.clone();
            self.record_word(&name, score);
            self.set_feedback(format!("{}: {}", name, message), Tone::Good);
        }
        self.word.clear();
        self.column.clear();
        self.row.clear();
        self.focus = Field::Word;
        self.hint = None;
    }

    /// Suggest a best-scoring word for the active rack (F2)
    pub fn on_hint(&mut self) {
        if !self.session.dictionary().is_loaded() {
            self.set_feedback(PlayResult::DictionaryUnavailable.message(""), Tone::Bad);
            return;
        }
        match self.session.hint() {
            Some(word) => {
                self.set_feedback(format!("Hint: try {}", word), Tone::Neutral);
                self.hint = Some(word);
            }
            None => {
                self.set_feedback("No dictionary word fits this rack", Tone::Neutral);
                self.hint = None;
            }
        }
    }

    /// Start a fresh game, discarding the one in progress (F5)
    pub fn on_reset(&mut self) {
        self.session.reset();
        self.clear_form();
        self.set_feedback("New game started", Tone::Neutral);
    }

    /// Read the word list again (F6)
    pub fn on_reload_dictionary(&mut self) {
        let dictionary = Dictionary::load_or_bundled(self.dictionary_path.as_deref());
        let status = dictionary.status();
        let words = dictionary.len();
        self.session.set_dictionary(Arc::new(dictionary));

        let tone = if self.session.dictionary().is_loaded() {
            Tone::Good
        } else {
            Tone::Bad
        };
        self.set_feedback(
            format!("Dictionary {} ({} words)", status.label(), words),
            tone,
        );
    }

    /// Record every player's total, show the leaderboards, deal a new game (F9)
    pub fn on_end_game(&mut self) {
        let standings = self.session.end_game();
        if let Some(storage) = &self.storage {
            for (name, score) in &standings {
                if let Err(err) = storage.save_game_score(name, *score) {
                    warn!(error = %err, name = %name, "Failed to save game score");
                }
            }
        }
        self.refresh_leaderboards();

        let summary = match standings.first() {
            Some((name, score)) => format!("Game over: {} wins with {} points", name, score),
            None => "Game over".to_string(),
        };
        self.session.reset();
        self.clear_form();
        self.set_feedback(summary, Tone::Good);
    }

    /// Continue the game saved by the last run, if there is one
    pub fn resume_saved_session(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        match storage.load_session() {
            Ok(Some(snapshot)) => {
                if let Err(err) = self.session.restore(snapshot) {
                    warn!(error = %err, "Saved session ignored");
                }
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "Saved session unreadable"),
        }
    }

    /// Forget the saved game so a fresh start is not undone by a later resume
    pub fn discard_saved_session(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        match storage.clear_session() {
            Ok(()) => info!("Saved session discarded"),
            Err(err) => warn!(error = %err, "Failed to discard saved session"),
        }
    }

    /// Persist the session so the next launch resumes it (called on quit)
    pub fn save_session(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        match storage.save_session(&self.session.snapshot()) {
            Ok(()) => info!("Session saved"),
            Err(err) => warn!(error = %err, "Failed to save session"),
        }
    }

    /// Parsed column and row, if both are on the board
    fn position(&self) -> Option<Position> {
        let x: usize = self.column.parse().ok()?;
        let y: usize = self.row.parse().ok()?;
        let on_board = |v: usize| (1..=BOARD_SIZE).contains(&v);
        (on_board(x) && on_board(y)).then(|| Position::new(x, y))
    }

    fn record_word(&mut self, name: &str, score: u32) {
        self.played.push(PlayedWord {
            player: name.to_string(),
            word: self.word.clone(),
            score,
        });
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.save_word_score(name, &self.word, score) {
                warn!(error = %err, "Failed to save word score");
            }
        }
        self.refresh_leaderboards();
    }

    fn refresh_leaderboards(&mut self) {
        let Some(storage) = &self.storage else {
            return;
        };
        match storage.top10_word_scores() {
            Ok(scores) => self.top_words = scores,
            Err(err) => warn!(error = %err, "Failed to read word scores"),
        }
        match storage.top10_game_scores() {
            Ok(scores) => self.top_games = scores,
            Err(err) => warn!(error = %err, "Failed to read game scores"),
        }
    }

    fn clear_form(&mut self) {
        self.word.clear();
        self.column.clear();
        self.row.clear();
        self.direction = Direction::Across;
        self.focus = Field::Word;
        self.hint = None;
    }

    fn set_feedback(&mut self, message: impl Into<String>, tone: Tone) {
        self.feedback = message.into();
        self.tone = tone;
    }
}

/// Append a digit to a coordinate field (two digits at most)
fn push_digit(field: &mut String, c: char) {
    if c.is_ascii_digit() && field.len() < 2 {
        field.push(c);
    }
}
