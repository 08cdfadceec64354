// Ordered, duplicate-free character sets.

use std::collections::HashSet;

use crate::error::CharsetError;

/// A–Z, a–z, 0–9 and common punctuation, ending with a space.
pub const DEFAULT_CHARACTERS: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    ".,!?;:'\"()[]{}+-=*/\\|@#$%^&*_~`<> ",
);

/// Characters in grid order. Position in the set is the grid index.
///
/// Repeated characters are collapsed when the set is built: the first
/// occurrence keeps its position and later ones are dropped, so every cell
/// in the atlas has exactly one metadata entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    chars: Vec<char>,
    collapsed: usize,
}

impl CharacterSet {
    pub fn new(text: &str) -> Result<Self, CharsetError> {
        let set = Self::collapse(text);
        if set.chars.is_empty() {
            return Err(CharsetError::Empty);
        }
        if set.collapsed > 0 {
            log::warn!("Character set: collapsed {} repeated character(s)", set.collapsed);
        }
        Ok(set)
    }

    /// Keep the first occurrence of each character, counting the rest.
    fn collapse(text: &str) -> Self {
        let mut seen = HashSet::new();
        let mut chars = Vec::new();
        let mut collapsed = 0;
        for ch in text.chars() {
            if seen.insert(ch) {
                chars.push(ch);
            } else {
                collapsed += 1;
            }
        }
        Self { chars, collapsed }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of repeated characters dropped at construction.
    pub fn collapsed(&self) -> usize {
        self.collapsed
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl Default for CharacterSet {
    /// The built-in set; its repeated `*` is collapsed without a warning.
    fn default() -> Self {
        Self::collapse(DEFAULT_CHARACTERS)
    }
}
