//! Feedback pattern calculation and representation
//!
//! A pattern encodes the feedback from a guess using base-3 encoding:
//! - 0 = Gray (letter not in word, or no occurrences left)
//! - 1 = Yellow (letter in word, wrong position)
//! - 2 = Green (letter in correct position)
//!
//! The pattern is stored as a single u8 value (0-242), where each position
//! contributes digit × 3^position to the total.

use super::word::{Word, letter_index};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color of a single feedback tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Gray,
    Yellow,
    Green,
}

impl Tile {
    const fn digit(self) -> u8 {
        match self {
            Self::Gray => 0,
            Self::Yellow => 1,
            Self::Green => 2,
        }
    }

    const fn from_digit(digit: u8) -> Self {
        match digit {
            2 => Self::Green,
            1 => Self::Yellow,
            _ => Self::Gray,
        }
    }

    /// Operator-facing symbol: `x`, `y` or `g`
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Gray => 'x',
            Self::Yellow => 'y',
            Self::Green => 'g',
        }
    }

    fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'g' | 'G' | '🟩' => Some(Self::Green),
            'y' | 'Y' | '🟨' => Some(Self::Yellow),
            'x' | 'X' | '-' | '_' | '⬜' => Some(Self::Gray),
            _ => None,
        }
    }
}

/// Feedback pattern for a guess
///
/// Represents the colored feedback as a single byte value.
/// Value range: 0-242 (3^5 - 1 = 243 possible patterns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern(u8);

/// Error returned when a feedback string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern must have exactly 5 tiles, got {0}")]
    InvalidLength(usize),
    #[error("unknown tile symbol '{0}' (use x, y or g)")]
    InvalidSymbol(char),
}

impl Pattern {
    /// All greens (perfect match)
    pub const PERFECT: Self = Self(242); // 2 + 2×3 + 2×9 + 2×27 + 2×81

    /// Number of distinct patterns
    pub const COUNT: usize = 243;

    /// Create a new pattern from a raw value
    ///
    /// # Panics
    /// Panics in debug mode if value >= 243
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Self {
        debug_assert!(value < 243, "Pattern value must be < 243");
        Self(value)
    }

    /// Get the raw pattern value (0-242)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check if this is a perfect match (all greens)
    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.0 == Self::PERFECT.0
    }

    /// Build a pattern from five tiles
    #[must_use]
    pub fn from_tiles(tiles: [Tile; 5]) -> Self {
        let mut pattern = 0u8;
        let mut multiplier = 1u8;
        for tile in tiles {
            pattern += tile.digit() * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }
        Self(pattern)
    }

    /// Tile at a position (0-4)
    #[must_use]
    pub const fn tile(self, position: usize) -> Tile {
        let mut val = self.0;
        let mut i = 0;
        while i < position {
            val /= 3;
            i += 1;
        }
        Tile::from_digit(val % 3)
    }

    /// All five tiles in position order
    #[must_use]
    pub fn tiles(self) -> [Tile; 5] {
        std::array::from_fn(|i| self.tile(i))
    }

    /// Calculate the pattern when `guess` is guessed and `answer` is the target
    ///
    /// Duplicate letters are handled in two passes over a per-letter
    /// remaining-count table built from the answer:
    /// 1. Greens: exact position matches, each consumes one occurrence
    /// 2. Yellows: left to right, only while occurrences remain; otherwise gray
    ///
    /// The non-gray tiles for a letter therefore never outnumber that
    /// letter's occurrences in the answer.
    ///
    /// # Examples
    /// ```
    /// use wordle_abc::core::{Word, Pattern};
    ///
    /// let guess = Word::new("grant").unwrap();
    /// let answer = Word::new("crane").unwrap();
    /// assert_eq!(Pattern::calculate(&guess, &answer).to_string(), "xgggx");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        let mut result = [Tile::Gray; 5];
        let mut remaining = answer.letter_counts();
        let guess = guess.chars();
        let answer = answer.chars();

        // Allow: index needed to compare guess[i], answer[i] and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..5 {
            if guess[i] == answer[i] {
                result[i] = Tile::Green;
                remaining[letter_index(guess[i])] -= 1;
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..5 {
            if result[i] == Tile::Gray {
                let slot = &mut remaining[letter_index(guess[i])];
                if *slot > 0 {
                    result[i] = Tile::Yellow;
                    *slot -= 1;
                }
            }
        }

        Self::from_tiles(result)
    }

    /// Count the number of green feedback squares
    #[must_use]
    pub fn count_greens(self) -> u8 {
        self.tiles().iter().filter(|&&t| t == Tile::Green).count() as u8
    }

    /// Count the number of yellow feedback squares
    #[must_use]
    pub fn count_yellows(self) -> u8 {
        self.tiles().iter().filter(|&&t| t == Tile::Yellow).count() as u8
    }

    /// Parse a pattern from a string like "xygxg" or "⬜🟨🟩⬜🟩"
    ///
    /// # Errors
    /// Returns `PatternError` if the string does not hold exactly five tile
    /// symbols.
    ///
    /// # Examples
    /// ```
    /// use wordle_abc::core::Pattern;
    ///
    /// let p1 = Pattern::parse("gyxgy").unwrap();
    /// let p2 = Pattern::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(p1, p2);
    /// ```
    pub fn parse(s: &str) -> Result<Self, PatternError> {
        let count = s.chars().count();
        if count != 5 {
            return Err(PatternError::InvalidLength(count));
        }

        let mut tiles = [Tile::Gray; 5];
        for (slot, ch) in tiles.iter_mut().zip(s.chars()) {
            *slot = Tile::from_symbol(ch).ok_or(PatternError::InvalidSymbol(ch))?;
        }

        Ok(Self::from_tiles(tiles))
    }

    /// Convert pattern to emoji string
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.tiles()
            .iter()
            .map(|tile| match tile {
                Tile::Green => '🟩',
                Tile::Yellow => '🟨',
                Tile::Gray => '⬜',
            })
            .collect()
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in self.tiles() {
            write!(f, "{}", tile.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(guess: &str, answer: &str) -> Pattern {
        Pattern::calculate(&Word::new(guess).unwrap(), &Word::new(answer).unwrap())
    }

    #[test]
    fn pattern_perfect_constant() {
        assert_eq!(Pattern::PERFECT.value(), 242);
        assert!(Pattern::PERFECT.is_perfect());
        assert_eq!(Pattern::PERFECT.count_greens(), 5);
        assert_eq!(Pattern::PERFECT.count_yellows(), 0);
        assert_eq!(Pattern::PERFECT.to_string(), "ggggg");
    }

    #[test]
    fn pattern_all_gray() {
        let pattern = calc("abcde", "fghij");
        assert_eq!(pattern.value(), 0);
        assert_eq!(pattern.to_string(), "xxxxx");
    }

    #[test]
    fn pattern_self_match_is_perfect() {
        for word in ["crane", "slate", "lolly", "zzzzz", "aaaaa"] {
            assert_eq!(calc(word, word), Pattern::PERFECT);
        }
    }

    #[test]
    fn pattern_has_five_tiles() {
        for (guess, answer) in [("crane", "slate"), ("allay", "lolly"), ("speed", "erase")] {
            let pattern = calc(guess, answer);
            assert_eq!(pattern.tiles().len(), 5);
            assert_eq!(pattern.to_string().len(), 5);
            assert!(pattern.value() < 243);
        }
    }

    #[test]
    fn pattern_duplicates_in_guess_and_answer() {
        // ALLAY vs LOLLY: the middle L is green, one more L is left for a
        // yellow, Y is green, both A's are gray.
        let pattern = calc("allay", "lolly");
        assert_eq!(pattern.to_string(), "xygxg");

        // L appears three times in LOLLY; guess has two L's, both marked
        let l_marks = pattern
            .tiles()
            .iter()
            .zip(b"allay")
            .filter(|(tile, ch)| **ch == b'l' && **tile != Tile::Gray)
            .count();
        assert_eq!(l_marks, 2);
    }

    #[test]
    fn pattern_more_repeats_in_guess_than_answer() {
        // LOLLY vs ALLAY: ALLAY has two L's. The green at position 2 uses
        // one, the first L takes the other as yellow, the last L is gray.
        let pattern = calc("lolly", "allay");
        assert_eq!(pattern.to_string(), "yxgxg");
        assert_eq!(pattern.count_greens() + pattern.count_yellows(), 3);
    }

    #[test]
    fn pattern_duplicate_letters_green_takes_priority() {
        // SPEED vs ERASE: S yellow, P gray, both E's yellow, D gray
        let pattern = calc("speed", "erase");
        assert_eq!(pattern.to_string(), "yxyyx");
        assert_eq!(pattern.value(), 37);
    }

    #[test]
    fn pattern_duplicate_letters_complex() {
        // ROBOT vs FLOOR: R yellow, O yellow, B gray, O green, T gray
        let pattern = calc("robot", "floor");
        assert_eq!(pattern.to_string(), "yyxgx");
        assert_eq!(pattern.value(), 58);
    }

    #[test]
    fn pattern_grant_against_crane() {
        assert_eq!(calc("grant", "crane").to_string(), "xgggx");
    }

    #[test]
    fn pattern_parse_valid() {
        let p1 = Pattern::parse("gygxx").unwrap();
        let p2 = Pattern::parse("🟩🟨🟩⬜⬜").unwrap();
        let p3 = Pattern::parse("GYG--").unwrap();

        assert_eq!(p1, p2);
        assert_eq!(p1, p3);
        // 2 + 1×3 + 2×9 = 23
        assert_eq!(p1.value(), 23);
    }

    #[test]
    fn pattern_parse_invalid() {
        assert_eq!(Pattern::parse("gyggyx"), Err(PatternError::InvalidLength(6)));
        assert_eq!(Pattern::parse("gyg"), Err(PatternError::InvalidLength(3)));
        assert_eq!(Pattern::parse("gqggy"), Err(PatternError::InvalidSymbol('q')));
        assert_eq!(Pattern::parse(""), Err(PatternError::InvalidLength(0)));
    }

    #[test]
    fn pattern_display_round_trips_through_parse() {
        let pattern = calc("robot", "floor");
        assert_eq!(pattern.to_string().parse::<Pattern>().unwrap(), pattern);
    }

    #[test]
    fn pattern_to_emoji() {
        assert_eq!(Pattern::parse("gyxgy").unwrap().to_emoji(), "🟩🟨⬜🟩🟨");
    }
}
