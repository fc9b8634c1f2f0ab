//! Hints: which dictionary words a rack can build, and the best of them

use super::matcher::{can_construct, construct};
use super::{base_score, Dictionary, TileCounts};
use rand::seq::IndexedRandom;
use rand::Rng;

/// Every dictionary word that can be built from `tiles` (unordered).
///
/// This is a linear scan of the dictionary, O(words x word length).
pub fn possible_words<'a>(dictionary: &'a Dictionary, tiles: &TileCounts) -> Vec<&'a str> {
    dictionary
        .words()
        .filter(|word| can_construct(tiles, word))
        .collect()
}

/// The constructible words with the highest base score. Ties are all kept,
/// in alphabetical order.
///
/// Base score counts the tiles actually consumed, so a letter covered by a
/// blank is worth nothing.
pub fn best_possible_words<'a>(dictionary: &'a Dictionary, tiles: &TileCounts) -> Vec<&'a str> {
    let mut best: Vec<&str> = Vec::new();
    let mut max = 0;

    for word in possible_words(dictionary, tiles) {
        let Some(used) = construct(tiles, word) else {
            continue;
        };
        let score = base_score(&used);
        if best.is_empty() || score > max {
            max = score;
            best = vec![word];
        } else if score == max {
            best.push(word);
        }
    }

    // Set iteration order differs between runs; sort so a seeded pick repeats
    best.sort_unstable();
    best
}

/// Pick one of the best words at random, `None` if nothing can be built.
pub fn suggest<R: Rng + ?Sized>(
    dictionary: &Dictionary,
    tiles: &TileCounts,
    rng: &mut R,
) -> Option<String> {
    best_possible_words(dictionary, tiles)
        .choose(rng)
        .map(|w| w.to_string())
}
