//! Operator commands
//!
//! Every line typed at the prompt is parsed once into a `Command` before it
//! reaches the session.

use crate::core::{Pattern, PatternError, Word, WordError};
use std::str::FromStr;
use thiserror::Error;

/// One operator report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Feedback for the pending guess
    Pattern(Pattern),
    /// The game rejected the pending guess as not a word
    InvalidGuess,
    /// Show the remaining candidates
    ListCandidates,
    /// A different word was played, with its own feedback
    ManualOverride(Word, Pattern),
    /// Start a new game
    Restart,
}

/// Input that is not a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unrecognized input '{0}': expected a pattern like 'xygxx', or i, c, o, r")]
    Malformed(String),
    /// `o` on its own; the word and pattern have to be asked for
    #[error("override needs a word and its pattern")]
    IncompleteOverride,
    #[error("invalid override word: {0}")]
    InvalidWord(#[from] WordError),
    #[error("invalid override pattern: {0}")]
    InvalidPattern(#[from] PatternError),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Accepts a five-symbol pattern, `i`/`invalid`, `c`/`candidates`,
    /// `r`/`restart`, or `o <word> <pattern>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let malformed = || CommandError::Malformed(input.to_string());
        let mut tokens = input.split_whitespace();
        let head = tokens.next().ok_or_else(malformed)?.to_lowercase();

        match head.as_str() {
            "o" | "override" => match (tokens.next(), tokens.next(), tokens.next()) {
                (None, ..) => Err(CommandError::IncompleteOverride),
                (Some(word), Some(pattern), None) => parse_override(word, pattern),
                _ => Err(malformed()),
            },
            _ if tokens.next().is_some() => Err(malformed()),
            "i" | "invalid" => Ok(Self::InvalidGuess),
            "c" | "candidates" => Ok(Self::ListCandidates),
            "r" | "restart" => Ok(Self::Restart),
            _ => Pattern::parse(&head)
                .map(Self::Pattern)
                .map_err(|_| malformed()),
        }
    }
}

/// Build a manual override from separately entered word and pattern
///
/// # Errors
/// Returns `CommandError` if either part is invalid.
pub fn parse_override(word: &str, pattern: &str) -> Result<Command, CommandError> {
    let word = Word::new(word.trim())?;
    let pattern = Pattern::parse(pattern.trim())?;
    Ok(Command::ManualOverride(word, pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Command, CommandError> {
        s.parse()
    }

    #[test]
    fn parses_patterns() {
        assert_eq!(
            parse("xxggx"),
            Ok(Command::Pattern(Pattern::parse("xxggx").unwrap()))
        );
        assert_eq!(parse(" GGGGG \n"), Ok(Command::Pattern(Pattern::PERFECT)));
        assert_eq!(
            parse("🟩🟨⬜🟩🟨"),
            Ok(Command::Pattern(Pattern::parse("gyxgy").unwrap()))
        );
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(parse("i"), Ok(Command::InvalidGuess));
        assert_eq!(parse("Invalid"), Ok(Command::InvalidGuess));
        assert_eq!(parse("c"), Ok(Command::ListCandidates));
        assert_eq!(parse("candidates"), Ok(Command::ListCandidates));
        assert_eq!(parse("r"), Ok(Command::Restart));
        assert_eq!(parse("restart"), Ok(Command::Restart));
    }

    #[test]
    fn parses_inline_override() {
        assert_eq!(
            parse("o Grant xgggx"),
            Ok(Command::ManualOverride(
                Word::new("grant").unwrap(),
                Pattern::parse("xgggx").unwrap()
            ))
        );
    }

    #[test]
    fn bare_override_asks_for_more() {
        assert_eq!(parse("o"), Err(CommandError::IncompleteOverride));
        assert_eq!(parse("override"), Err(CommandError::IncompleteOverride));
    }

    #[test]
    fn bad_override_parts() {
        assert!(matches!(
            parse("o grnt xgggx"),
            Err(CommandError::InvalidWord(_))
        ));
        assert!(matches!(
            parse("o grant xgqgx"),
            Err(CommandError::InvalidPattern(_))
        ));
        assert!(matches!(parse("o grant"), Err(CommandError::Malformed(_))));
        assert!(matches!(
            parse("o grant xgggx extra"),
            Err(CommandError::Malformed(_))
        ));
    }

    #[test]
    fn everything_else_is_malformed() {
        for input in ["", "   ", "xxgg", "xxggxx", "hello", "qqqqq", "c now", "i i"] {
            assert!(
                matches!(parse(input), Err(CommandError::Malformed(_))),
                "{input:?} should be malformed"
            );
        }
    }

    #[test]
    fn separate_override_parts() {
        assert_eq!(
            parse_override(" crane ", "ggggg"),
            Ok(Command::ManualOverride(
                Word::new("crane").unwrap(),
                Pattern::PERFECT
            ))
        );
        assert!(parse_override("crane", "gg").is_err());
    }
}
