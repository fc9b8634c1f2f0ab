#![allow(dead_code)]
//! A player's rack of held tiles

use super::{count_tiles, Bag, Tile, TileCounts};
use serde::{Deserialize, Serialize};

/// Errors from misusing a rack.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RackError {
    #[error("tile '{0}' is not on the rack")]
    TileNotHeld(Tile),
}

/// The tiles a player currently holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw from the bag until the rack holds `capacity` tiles or the bag runs out.
    /// Returns the number of tiles drawn.
    pub fn draw_up_to(&mut self, capacity: usize, bag: &mut Bag) -> usize {
        let wanted = capacity.saturating_sub(self.tiles.len());
        let drawn = bag.draw(wanted);
        let count = drawn.len();
        self.tiles.extend(drawn);
        count
    }

    /// Letter -> count view of the rack. The returned map is a copy.
    pub fn available_tiles(&self) -> TileCounts {
        count_tiles(&self.tiles)
    }

    /// Remove exactly one instance of `tile`.
    pub fn remove(&mut self, tile: Tile) -> Result<(), RackError> {
        let pos = self
            .tiles
            .iter()
            .position(|t| *t == tile)
            .ok_or(RackError::TileNotHeld(tile))?;
        self.tiles.remove(pos);
        Ok(())
    }

    /// Empty the rack. Refilling is up to the caller.
    pub fn reset(&mut self) {
        self.tiles.clear();
    }

    /// Held tiles in draw order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Display the rack as a string of symbols.
    pub fn as_string(&self) -> String {
        self.tiles.iter().map(|t| t.symbol()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> Vec<Tile> {
        s.chars().filter_map(Tile::from_char).collect()
    }

    #[test]
    fn test_draw_up_to_capacity() {
        let mut bag = Bag::from_tiles(letters("abcdefghij"));
        let mut rack = Rack::new();
        assert_eq!(rack.draw_up_to(7, &mut bag), 7);
        assert_eq!(rack.len(), 7);
        assert_eq!(bag.remaining(), 3);

        // Already full: nothing drawn
        assert_eq!(rack.draw_up_to(7, &mut bag), 0);
        assert_eq!(bag.remaining(), 3);
    }

    #[test]
    fn test_draw_up_to_with_short_bag() {
        let mut bag = Bag::from_tiles(letters("ab"));
        let mut rack = Rack::new();
        assert_eq!(rack.draw_up_to(7, &mut bag), 2);
        assert_eq!(rack.len(), 2);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_refill_after_removal() {
        let mut bag = Bag::from_tiles(letters("xyzcat"));
        let mut rack = Rack::new();
        rack.draw_up_to(3, &mut bag);
        assert_eq!(rack.as_string(), "tac");

        rack.remove(Tile::Letter('a')).unwrap();
        assert_eq!(rack.draw_up_to(3, &mut bag), 1);
        assert_eq!(rack.as_string(), "tcz");
    }

    #[test]
    fn test_available_tiles_counts() {
        let mut bag = Bag::from_tiles(letters("a*ab"));
        let mut rack = Rack::new();
        rack.draw_up_to(4, &mut bag);
        let counts = rack.available_tiles();
        assert_eq!(counts[&Tile::Letter('a')], 2);
        assert_eq!(counts[&Tile::Letter('b')], 1);
        assert_eq!(counts[&Tile::Blank], 1);
    }

    #[test]
    fn test_remove_absent_tile_is_error() {
        let mut rack = Rack::new();
        assert_eq!(
            rack.remove(Tile::Letter('q')),
            Err(RackError::TileNotHeld(Tile::Letter('q')))
        );
    }

    #[test]
    fn test_remove_takes_one_instance() {
        let mut bag = Bag::from_tiles(letters("ee"));
        let mut rack = Rack::new();
        rack.draw_up_to(2, &mut bag);
        rack.remove(Tile::Letter('e')).unwrap();
        assert_eq!(rack.as_string(), "e");
    }

    #[test]
    fn test_reset_empties() {
        let mut bag = Bag::from_tiles(letters("abc"));
        let mut rack = Rack::new();
        rack.draw_up_to(3, &mut bag);
        rack.reset();
        assert!(rack.is_empty());
    }
}
