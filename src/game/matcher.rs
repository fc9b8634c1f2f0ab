//! Matching a word against the tiles a player holds
//!
//! Each character of the word consumes one tile:
//! - the exact letter if one is left
//! - otherwise a blank if one is left
//! - otherwise the word cannot be built
//!
//! Letters are always preferred over blanks. The caller's multiset is
//! never modified; matching works on a private copy.

use super::{Tile, TileCounts};

/// Check whether `word` can be built from `tiles`.
pub fn can_construct(tiles: &TileCounts, word: &str) -> bool {
    construct(tiles, word).is_some()
}

/// Build `word` from `tiles`, returning the tile consumed at each position
/// (in word order), or `None` if some position cannot be satisfied.
pub fn construct(tiles: &TileCounts, word: &str) -> Option<Vec<Tile>> {
    let mut available = tiles.clone();
    let mut used = Vec::with_capacity(word.len());

    for c in word.chars() {
        let wanted = Tile::from_char(c)?;
        let tile = if take(&mut available, wanted) {
            wanted
        } else if take(&mut available, Tile::Blank) {
            Tile::Blank
        } else {
            return None;
        };
        used.push(tile);
    }

    Some(used)
}

/// Letters the word needs that the tiles cannot supply, in first-seen order.
/// Empty when the word is constructible.
pub fn missing_letters(tiles: &TileCounts, word: &str) -> Vec<char> {
    let mut available = tiles.clone();
    let mut missing: Vec<char> = Vec::new();

    for c in word.chars() {
        let satisfied = match Tile::from_char(c) {
            Some(wanted) => take(&mut available, wanted) || take(&mut available, Tile::Blank),
            None => false,
        };
        if !satisfied && !missing.contains(&c) {
            missing.push(c);
        }
    }

    missing
}

fn take(available: &mut TileCounts, tile: Tile) -> bool {
    match available.get_mut(&tile) {
        Some(count) if *count > 0 => {
            *count -= 1;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::count_tiles;
    use quickcheck::quickcheck;

    fn tiles(s: &str) -> TileCounts {
        count_tiles(&s.chars().filter_map(Tile::from_char).collect::<Vec<_>>())
    }

    #[test]
    fn test_exact_letters() {
        let rack = tiles("catdogs");
        assert!(can_construct(&rack, "cat"));
        assert!(can_construct(&rack, "dogs"));
        assert!(!can_construct(&rack, "catt"));
        assert!(!can_construct(&rack, "zoo"));
    }

    #[test]
    fn test_multiplicity_respected() {
        let rack = tiles("helowrd");
        assert!(!can_construct(&rack, "hello"));
        assert_eq!(missing_letters(&rack, "hello"), vec!['l']);
    }

    #[test]
    fn test_blank_fills_missing_letter() {
        let rack = tiles("ct*");
        assert!(can_construct(&rack, "cat"));
        assert_eq!(
            construct(&rack, "cat"),
            Some(vec![Tile::Letter('c'), Tile::Blank, Tile::Letter('t')])
        );
    }

    #[test]
    fn test_letters_preferred_over_blanks() {
        let rack = tiles("*cat");
        assert_eq!(
            construct(&rack, "cat"),
            Some(vec![Tile::Letter('c'), Tile::Letter('a'), Tile::Letter('t')])
        );
    }

    #[test]
    fn test_typed_blank_consumes_blank() {
        let rack = tiles("c*t");
        assert_eq!(
            construct(&rack, "c*t"),
            Some(vec![Tile::Letter('c'), Tile::Blank, Tile::Letter('t')])
        );
        assert!(!can_construct(&tiles("cat"), "c*t"));
    }

    #[test]
    fn test_blanks_run_out() {
        let rack = tiles("**");
        assert!(can_construct(&rack, "ox"));
        assert!(!can_construct(&rack, "fox"));
    }

    #[test]
    fn test_uppercase_and_symbols_not_constructible() {
        let rack = tiles("cat***");
        assert_eq!(construct(&rack, "CAT"), None);
        assert_eq!(construct(&rack, "c-t"), None);
    }

    #[test]
    fn test_empty_word() {
        assert_eq!(construct(&tiles(""), ""), Some(vec![]));
    }

    #[test]
    fn test_caller_tiles_untouched() {
        let rack = tiles("ct*");
        let before = rack.clone();
        let _ = construct(&rack, "cat");
        let _ = can_construct(&rack, "cot");
        let _ = missing_letters(&rack, "zzz");
        assert_eq!(rack, before);
    }

    fn to_tiles(bytes: &[u8]) -> Vec<Tile> {
        bytes
            .iter()
            .map(|b| match b % 27 {
                26 => Tile::Blank,
                n => Tile::Letter((b'a' + n) as char),
            })
            .collect()
    }

    fn to_word(bytes: &[u8]) -> String {
        bytes.iter().map(|b| (b'a' + b % 26) as char).collect()
    }

    quickcheck! {
        fn prop_construct_agrees_with_can_construct(rack: Vec<u8>, word: Vec<u8>) -> bool {
            let counts = count_tiles(&to_tiles(&rack));
            let word = to_word(&word);
            construct(&counts, &word).is_some() == can_construct(&counts, &word)
        }
    }

    quickcheck! {
        fn prop_construct_respects_counts(rack: Vec<u8>, word: Vec<u8>) -> bool {
            let counts = count_tiles(&to_tiles(&rack));
            let word = to_word(&word);
            match construct(&counts, &word) {
                None => true,
                Some(used) => {
                    let used_counts = count_tiles(&used);
                    used.len() == word.chars().count()
                        && used_counts
                            .iter()
                            .all(|(tile, n)| counts.get(tile).copied().unwrap_or(0) >= *n)
                        && used
                            .iter()
                            .zip(word.chars())
                            .all(|(tile, c)| tile.is_blank() || tile.symbol() == c)
                }
            }
        }
    }

    quickcheck! {
        fn prop_missing_empty_iff_constructible(rack: Vec<u8>, word: Vec<u8>) -> bool {
            let counts = count_tiles(&to_tiles(&rack));
            let word = to_word(&word);
            missing_letters(&counts, &word).is_empty() == can_construct(&counts, &word)
        }
    }
}
