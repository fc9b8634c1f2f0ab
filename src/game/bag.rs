//! The bag of undrawn tiles

use super::{FrequencyTable, Tile};
use rand::seq::SliceRandom;
use rand::Rng;

/// The pool of undrawn tiles for a session.
///
/// Tiles are drawn from the end of the sequence. The bag is only ever
/// refilled by [`Bag::initialize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bag {
    tiles: Vec<Tile>,
}

impl Bag {
    /// Build and shuffle a bag from a frequency table.
    pub fn new<R: Rng + ?Sized>(frequencies: &FrequencyTable, rng: &mut R) -> Self {
        let mut bag = Self::default();
        bag.initialize(frequencies, rng);
        bag
    }

    /// Rebuild the bag from `frequencies` and shuffle it uniformly.
    pub fn initialize<R: Rng + ?Sized>(&mut self, frequencies: &FrequencyTable, rng: &mut R) {
        self.tiles = frequencies
            .iter()
            .flat_map(|(tile, count)| std::iter::repeat_n(*tile, *count))
            .collect();
        // Fisher-Yates
        self.tiles.shuffle(rng);
    }

    /// Rebuild a bag from tiles in draw order (last tile is drawn first).
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Remove up to `n` tiles. Returns fewer (possibly none) when the bag runs low.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let keep = self.tiles.len().saturating_sub(n);
        let mut drawn = self.tiles.split_off(keep);
        drawn.reverse();
        drawn
    }

    /// Number of tiles left.
    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in draw order (last tile is drawn first).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
