#![allow(dead_code)]
//! The board grid and its premium squares
//!
//! Coordinates are 1-indexed on both axes. `x` is the column and `y` the
//! row; a word laid `Across` advances `x`, one laid `Down` advances `y`.

use super::Tile;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Board width and height.
pub const BOARD_SIZE: usize = 15;

/// Kind of premium square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplierKind {
    Letter,
    Word,
}

/// A premium square: multiplies either the letter on it or the whole word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplier {
    pub kind: MultiplierKind,
    pub factor: u32,
}

impl Multiplier {
    /// Short label such as `LSx2` or `WSx3`.
    pub fn label(&self) -> String {
        let kind = match self.kind {
            MultiplierKind::Letter => "LS",
            MultiplierKind::Word => "WS",
        };
        format!("{}x{}", kind, self.factor)
    }
}

/// Premium squares of the standard board as (x, y, kind, factor).
const STANDARD_PREMIUMS: [(usize, usize, MultiplierKind, u32); 61] = {
    use MultiplierKind::{Letter as L, Word as W};
    [
        // Letter x2
        (7, 7, L, 2),
        (9, 7, L, 2),
        (7, 9, L, 2),
        (9, 9, L, 2),
        (8, 4, L, 2),
        (7, 3, L, 2),
        (9, 3, L, 2),
        (4, 1, L, 2),
        (12, 1, L, 2),
        (8, 12, L, 2),
        (7, 13, L, 2),
        (9, 13, L, 2),
        (4, 15, L, 2),
        (12, 15, L, 2),
        (4, 8, L, 2),
        (3, 7, L, 2),
        (3, 9, L, 2),
        (1, 4, L, 2),
        (1, 12, L, 2),
        (12, 8, L, 2),
        (13, 7, L, 2),
        (13, 9, L, 2),
        (15, 4, L, 2),
        (15, 12, L, 2),
        // Letter x3
        (6, 2, L, 3),
        (10, 2, L, 3),
        (2, 6, L, 3),
        (6, 6, L, 3),
        (10, 6, L, 3),
        (14, 6, L, 3),
        (2, 10, L, 3),
        (6, 10, L, 3),
        (10, 10, L, 3),
        (14, 10, L, 3),
        (6, 14, L, 3),
        (10, 14, L, 3),
        // Word x2
        (8, 8, W, 2),
        (2, 2, W, 2),
        (3, 3, W, 2),
        (4, 4, W, 2),
        (5, 5, W, 2),
        (11, 11, W, 2),
        (12, 12, W, 2),
        (13, 13, W, 2),
        (14, 14, W, 2),
        (2, 14, W, 2),
        (3, 13, W, 2),
        (4, 12, W, 2),
        (5, 11, W, 2),
        (11, 5, W, 2),
        (12, 4, W, 2),
        (13, 3, W, 2),
        (14, 2, W, 2),
        // Word x3
        (1, 1, W, 3),
        (8, 1, W, 3),
        (15, 1, W, 3),
        (1, 8, W, 3),
        (15, 8, W, 3),
        (1, 15, W, 3),
        (8, 15, W, 3),
        (15, 15, W, 3),
    ]
};

static STANDARD_LAYOUT: Lazy<MultiplierLayout> = Lazy::new(|| {
    MultiplierLayout::new(
        STANDARD_PREMIUMS
            .iter()
            .map(|&(x, y, kind, factor)| (Position::new(x, y), Multiplier { kind, factor })),
    )
});

/// Immutable map from board position to premium square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplierLayout {
    squares: HashMap<Position, Multiplier>,
}

impl MultiplierLayout {
    pub fn new(squares: impl IntoIterator<Item = (Position, Multiplier)>) -> Self {
        Self {
            squares: squares.into_iter().collect(),
        }
    }

    /// The classic 15x15 premium layout.
    pub fn standard() -> &'static MultiplierLayout {
        &STANDARD_LAYOUT
    }

    pub fn get(&self, position: Position) -> Option<Multiplier> {
        self.squares.get(&position).copied()
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

/// A board coordinate (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The centre square.
    pub fn center() -> Self {
        let mid = BOARD_SIZE / 2 + 1;
        Self::new(mid, mid)
    }

    fn in_bounds(&self) -> bool {
        (1..=BOARD_SIZE).contains(&self.x) && (1..=BOARD_SIZE).contains(&self.y)
    }
}

/// Direction a word is laid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along x (left to right)
    Across,
    /// Along y (top to bottom)
    Down,
}

impl Direction {
    pub fn toggle(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }

    /// The position `offset` steps from `start` in this direction.
    pub fn step(self, start: Position, offset: usize) -> Position {
        match self {
            Direction::Across => Position::new(start.x + offset, start.y),
            Direction::Down => Position::new(start.x, start.y + offset),
        }
    }
}

/// Why a word cannot go where it was asked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("the word runs off the board")]
    OutOfBounds,
    #[error("square ({x}, {y}) is already taken")]
    Occupied { x: usize, y: usize },
}

/// Occupancy grid plus the premium layout it scores against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
    layout: &'static MultiplierLayout,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board with the standard layout.
    pub fn new() -> Self {
        Self::with_layout(MultiplierLayout::standard())
    }

    pub fn with_layout(layout: &'static MultiplierLayout) -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            layout,
        }
    }

    /// Clear every square. The layout is untouched.
    pub fn reset(&mut self) {
        self.cells = [[None; BOARD_SIZE]; BOARD_SIZE];
    }

    /// Tile at a position, `None` if empty or off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        let position = Position::new(x, y);
        if !position.in_bounds() {
            return None;
        }
        self.cells[y - 1][x - 1]
    }

    /// Rows top to bottom, each left to right.
    pub fn rows(&self) -> &[[Option<Tile>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn layout(&self) -> &MultiplierLayout {
        self.layout
    }

    /// Whether every square the word would cover is on the board and empty.
    pub fn can_place(&self, word: &[Tile], start: Position, direction: Direction) -> bool {
        self.check_placement(word, start, direction).is_ok()
    }

    /// Like [`Board::can_place`], with the reason for a refusal.
    pub fn check_placement(
        &self,
        word: &[Tile],
        start: Position,
        direction: Direction,
    ) -> Result<(), PlacementError> {
        for i in 0..word.len() {
            let position = direction.step(start, i);
            if !position.in_bounds() {
                return Err(PlacementError::OutOfBounds);
            }
        }
        for i in 0..word.len() {
            let position = direction.step(start, i);
            if self.cells[position.y - 1][position.x - 1].is_some() {
                return Err(PlacementError::Occupied {
                    x: position.x,
                    y: position.y,
                });
            }
        }
        Ok(())
    }

    /// Write the word onto the board.
    ///
    /// Callers must have checked the placement first; squares off the
    /// board are skipped and occupied squares are overwritten.
    pub fn place(&mut self, word: &[Tile], start: Position, direction: Direction) {
        for (i, tile) in word.iter().enumerate() {
            let position = direction.step(start, i);
            if position.in_bounds() {
                self.cells[position.y - 1][position.x - 1] = Some(*tile);
            }
        }
    }

    /// Score a word at a position: the sum of letter values (each scaled by
    /// any letter premium under it) times the product of all word premiums
    /// it covers. Premiums count every time a word covers them.
    pub fn score(&self, word: &[Tile], start: Position, direction: Direction) -> u32 {
        let mut letter_sum = 0;
        let mut word_factor = 1;

        for (i, tile) in word.iter().enumerate() {
            let position = direction.step(start, i);
            let mut letter_factor = 1;
            match self.layout.get(position) {
                Some(Multiplier {
                    kind: MultiplierKind::Letter,
                    factor,
                }) => letter_factor = factor,
                Some(Multiplier {
                    kind: MultiplierKind::Word,
                    factor,
                }) => word_factor *= factor,
                None => {}
            }
            letter_sum += tile.value() * letter_factor;
        }

        letter_sum * word_factor
    }

    /// Check, place and score in one step.
    pub fn play_at(
        &mut self,
        word: &[Tile],
        start: Position,
        direction: Direction,
    ) -> Result<u32, PlacementError> {
        self.check_placement(word, start, direction)?;
        self.place(word, start, direction);
        Ok(self.score(word, start, direction))
    }

    /// Premium label for a square (`LSx2`, `WSx3`, ...) or empty.
    pub fn label(&self, x: usize, y: usize) -> String {
        self.layout
            .get(Position::new(x, y))
            .map(|m| m.label())
            .unwrap_or_default()
    }

    /// Occupancy as rows of symbols, `None` for empty squares.
    pub fn snapshot(&self) -> Vec<Vec<Option<Tile>>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// Replace occupancy from [`Board::snapshot`] output. Returns `false`
    /// (leaving the board untouched) if the grid has the wrong shape.
    pub fn restore(&mut self, rows: &[Vec<Option<Tile>>]) -> bool {
        if rows.len() != BOARD_SIZE || rows.iter().any(|row| row.len() != BOARD_SIZE) {
            return false;
        }
        for (y, row) in rows.iter().enumerate() {
            self.cells[y].copy_from_slice(row);
        }
        true
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Vec<Tile> {
        s.chars().filter_map(Tile::from_char).collect()
    }

    #[test]
    fn test_standard_layout_counts() {
        let layout = MultiplierLayout::standard();
        assert_eq!(layout.len(), 61);
        let count = |kind, factor| {
            STANDARD_PREMIUMS
                .iter()
                .filter(|(_, _, k, f)| *k == kind && *f == factor)
                .count()
        };
        assert_eq!(count(MultiplierKind::Letter, 2), 24);
        assert_eq!(count(MultiplierKind::Letter, 3), 12);
        assert_eq!(count(MultiplierKind::Word, 2), 17);
        assert_eq!(count(MultiplierKind::Word, 3), 8);
    }

    #[test]
    fn test_score_without_premiums() {
        let board = Board::new();
        // (5,1) (5,2) (5,3) carry no premium
        assert_eq!(board.score(&word("cat"), Position::new(5, 1), Direction::Down), 5);
    }

    #[test]
    fn test_score_on_center() {
        let board = Board::new();
        assert_eq!(
            board.score(&word("cat"), Position::center(), Direction::Across),
            10
        );
    }

    #[test]
    fn test_letter_premium() {
        let board = Board::new();
        // (6,2) is LSx3 under 'c'
        assert_eq!(board.score(&word("cat"), Position::new(6, 2), Direction::Down), 3 * 3 + 1 + 1);
    }

    #[test]
    fn test_word_premiums_multiply() {
        let board = Board::new();
        // Row 1: WSx3 at x=1 and x=8, LSx2 at x=4
        // a1 b3 c3 d2*2 e1 f4 g2 h4 = 22
        assert_eq!(
            board.score(&word("abcdefgh"), Position::new(1, 1), Direction::Across),
            22 * 9
        );
    }

    #[test]
    fn test_blank_scores_zero_even_on_premium() {
        let board = Board::new();
        assert_eq!(board.score(&word("*at"), Position::center(), Direction::Across), 4);
    }

    #[test]
    fn test_premiums_reapply_on_reuse() {
        let mut board = Board::new();
        let cat = word("cat");
        let first = board.play_at(&cat, Position::center(), Direction::Across).unwrap();
        board.reset();
        let second = board.play_at(&cat, Position::center(), Direction::Across).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_place_across_and_down() {
        let mut board = Board::new();
        board.place(&word("cat"), Position::new(8, 8), Direction::Across);
        assert_eq!(board.get(8, 8), Some(Tile::Letter('c')));
        assert_eq!(board.get(9, 8), Some(Tile::Letter('a')));
        assert_eq!(board.get(10, 8), Some(Tile::Letter('t')));

        board.place(&word("og"), Position::new(8, 9), Direction::Down);
        assert_eq!(board.get(8, 9), Some(Tile::Letter('o')));
        assert_eq!(board.get(8, 10), Some(Tile::Letter('g')));
        assert_eq!(board.occupied(), 5);
    }

    #[test]
    fn test_cannot_place_over_tiles() {
        let mut board = Board::new();
        board.place(&word("cat"), Position::center(), Direction::Across);
        assert_eq!(
            board.check_placement(&word("dog"), Position::new(9, 7), Direction::Down),
            Err(PlacementError::Occupied { x: 9, y: 8 })
        );
        assert!(board.can_place(&word("dog"), Position::new(8, 9), Direction::Across));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::new();
        assert_eq!(
            board.check_placement(&word("cat"), Position::new(14, 1), Direction::Across),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            board.check_placement(&word("cat"), Position::new(1, 14), Direction::Down),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            board.check_placement(&word("a"), Position::new(0, 1), Direction::Across),
            Err(PlacementError::OutOfBounds)
        );
        assert!(board.can_place(&word("cat"), Position::new(13, 15), Direction::Across));
    }

    #[test]
    fn test_play_at_rejects_without_mutation() {
        let mut board = Board::new();
        board.place(&word("cat"), Position::center(), Direction::Across);
        let before = board.clone();
        assert!(board.play_at(&word("cats"), Position::new(7, 8), Direction::Across).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_labels() {
        let board = Board::new();
        assert_eq!(board.label(8, 8), "WSx2");
        assert_eq!(board.label(1, 1), "WSx3");
        assert_eq!(board.label(4, 1), "LSx2");
        assert_eq!(board.label(6, 6), "LSx3");
        assert_eq!(board.label(5, 1), "");
    }

    #[test]
    fn test_snapshot_restore() {
        let mut board = Board::new();
        board.place(&word("c*t"), Position::center(), Direction::Down);
        let rows = board.snapshot();

        let mut other = Board::new();
        assert!(other.restore(&rows));
        assert_eq!(other, board);
        assert_eq!(other.get(8, 9), Some(Tile::Blank));
    }

    #[test]
    fn test_restore_rejects_bad_shape() {
        let mut board = Board::new();
        assert!(!board.restore(&[vec![None; BOARD_SIZE]]));
        assert_eq!(board.occupied(), 0);
    }
}
