#![allow(dead_code)]
//! Dictionary of legal words
//!
//! Loaded once from a word-list file, or from the list built into the
//! binary. A failed load leaves the dictionary `Unavailable` and empty, so
//! every validity check fails closed until a new load attempt succeeds.

use super::BLANK_SYMBOL;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Default word list, compiled in so the game works from any directory.
static BUNDLED_WORDS: &str = include_str!("../../data/words.txt");

/// Load state of the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryStatus {
    Unloaded,
    Loaded,
    Unavailable,
}

impl DictionaryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DictionaryStatus::Unloaded => "not loaded",
            DictionaryStatus::Loaded => "loaded",
            DictionaryStatus::Unavailable => "unavailable",
        }
    }
}

/// Set of lowercase words with O(1) lookup.
#[derive(Debug, Clone)]
pub struct Dictionary {
    status: DictionaryStatus,
    words: HashSet<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self {
            status: DictionaryStatus::Unloaded,
            words: HashSet::new(),
        }
    }
}

impl Dictionary {
    /// The word list built into the binary.
    pub fn bundled() -> Self {
        let dictionary = Self::from_words(BUNDLED_WORDS.lines());
        info!(words = dictionary.len(), "Bundled dictionary loaded");
        dictionary
    }

    /// Load from `path`, or use the bundled list when no path is given.
    pub fn load_or_bundled(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path),
            None => Self::bundled(),
        }
    }

    /// Build a loaded dictionary from an in-memory word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            status: DictionaryStatus::Loaded,
            words: words
                .into_iter()
                .filter_map(|w| normalize(w.as_ref()))
                .collect(),
        }
    }

    /// Load a dictionary from `path`. Never fails: on error the result is
    /// `Unavailable` and empty.
    pub fn load(path: &Path) -> Self {
        let mut dictionary = Self::default();
        dictionary.reload(path);
        dictionary
    }

    /// Attempt to (re)load the word list from `path`.
    ///
    /// Files ending in `.json` must hold a JSON array of strings; anything
    /// else is read as one word per line, skipping blanks and `#` comments.
    pub fn reload(&mut self, path: &Path) -> DictionaryStatus {
        match read_words(path) {
            Ok(words) => {
                self.words = words;
                self.status = DictionaryStatus::Loaded;
                info!(path = %path.display(), words = self.words.len(), "Dictionary loaded");
            }
            Err(err) => {
                self.words.clear();
                self.status = DictionaryStatus::Unavailable;
                warn!(path = %path.display(), error = %err, "Dictionary unavailable");
            }
        }
        self.status
    }

    pub fn status(&self) -> DictionaryStatus {
        self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.status == DictionaryStatus::Loaded
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Check a word that may contain blanks (`*`).
    ///
    /// The first blank is replaced by each letter `a..=z` in turn and the
    /// result checked recursively; any successful path makes the word valid.
    /// Cost is 26^k for k blanks.
    pub fn is_valid(&self, word: &str) -> bool {
        match word.find(BLANK_SYMBOL) {
            None => self.contains(word),
            Some(pos) => {
                let mut candidate = word.to_string();
                ('a'..='z').any(|letter| {
                    candidate.replace_range(pos..pos + 1, letter.encode_utf8(&mut [0; 4]));
                    self.is_valid(&candidate)
                })
            }
        }
    }

    /// Iterate over all words (unordered).
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn normalize(word: &str) -> Option<String> {
    let word = word.trim();
    if word.is_empty() || word.starts_with('#') {
        return None;
    }
    Some(word.to_lowercase())
}

fn read_words(path: &Path) -> anyhow::Result<HashSet<String>> {
    let data = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let words = if is_json {
        let list: Vec<String> = serde_json::from_str(&data)?;
        list.iter().filter_map(|w| normalize(w)).collect()
    } else {
        data.lines().filter_map(normalize).collect()
    };
    Ok(words)
}
