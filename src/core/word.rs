//! Five-letter word representation
//!
//! A Word is a fixed-size, copyable byte array, so it can be handed to every
//! scoring task without allocation.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 5-letter lowercase word
///
/// Ordering is lexical, which the optimizer relies on for deterministic
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word([u8; 5]);

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word must be exactly 5 letters, got {0}")]
    InvalidLength(usize),
    #[error("word must contain only ASCII letters")]
    NonAscii,
    #[error("word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Create a new Word from a string
    ///
    /// Input is lowercased before validation.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly 5
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use wordle_abc::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = text.as_ref();

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        let bytes = text.as_bytes();
        let chars: [u8; 5] = bytes
            .try_into()
            .map_err(|_| WordError::InvalidLength(bytes.len()))?;

        if !chars.iter().all(u8::is_ascii_alphabetic) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self(chars.map(|c| c.to_ascii_lowercase())))
    }

    /// Build a word from bytes already known to be lowercase ASCII letters
    pub(crate) const fn from_array(chars: [u8; 5]) -> Self {
        Self(chars)
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        // Construction only admits ASCII letters
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; 5] {
        &self.0
    }

    /// Get the character at a specific position (0-4)
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub const fn char_at(&self, position: usize) -> u8 {
        self.0[position]
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }

    /// Number of times `letter` occurs in the word
    #[inline]
    #[must_use]
    pub fn count_of(&self, letter: u8) -> u8 {
        self.0.iter().filter(|&&c| c == letter).count() as u8
    }

    /// Occurrence count per letter, indexed `letter - b'a'`
    #[inline]
    #[must_use]
    pub fn letter_counts(&self) -> [u8; 26] {
        let mut counts = [0u8; 26];
        for &ch in &self.0 {
            counts[letter_index(ch)] += 1;
        }
        counts
    }
}

/// Index of a lowercase letter in a 26-entry table
#[inline]
pub(crate) const fn letter_index(letter: u8) -> usize {
    (letter - b'a') as usize
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
