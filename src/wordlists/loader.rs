//! Word list loading utilities
//!
//! Flat word lists (one word per line) and `word,count` frequency tables.

use crate::core::Word;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to read a word list or frequency table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("{path}:{line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Load words from a file
///
/// Lines are trimmed and lowercased; anything that is not a five-letter
/// word is skipped. Duplicates are dropped, first occurrence wins.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use wordle_abc::wordlists::loader::load_words;
///
/// let words = load_words("vocab.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_words<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, LoadError> {
    Ok(parse_words(&read(path.as_ref())?))
}

/// Load a `word,count` frequency table with a header row
///
/// Rows whose word is not five letters are skipped.
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or a row has a malformed
/// count.
pub fn load_frequencies<P: AsRef<Path>>(path: P) -> Result<FxHashMap<Word, u64>, LoadError> {
    let path = path.as_ref();
    parse_frequencies(&read(path)?).map_err(|(line, reason)| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    })
}

/// Words from text, one per line
#[must_use]
pub fn parse_words(text: &str) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Word::new(trimmed).ok()
            }
        })
        .filter(|word| seen.insert(*word))
        .collect()
}

/// Frequency table from CSV text; errors carry the 1-based line number
fn parse_frequencies(text: &str) -> Result<FxHashMap<Word, u64>, (usize, String)> {
    let mut counts = FxHashMap::default();

    for (index, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let line_no = index + 1;

        let Some((word, count)) = line.split_once(',') else {
            return Err((line_no, format!("expected 'word,count', got '{line}'")));
        };
        let Ok(word) = Word::new(word.trim()) else {
            continue;
        };
        let count: u64 = count
            .trim()
            .parse()
            .map_err(|e| (line_no, format!("invalid count '{}': {e}", count.trim())))?;

        let total = counts.entry(word).or_insert(0_u64);
        *total = total
            .checked_add(count)
            .ok_or_else(|| (line_no, format!("count for '{word}' overflows")))?;
    }

    Ok(counts)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn parse_words_skips_invalid() {
        let words = parse_words("crane\ntoolong\nabc\n  Slate \n\nir4te\n");

        // Only "crane" and "slate" are valid 5-letter words
        assert_eq!(words, [word("crane"), word("slate")]);
    }

    #[test]
    fn parse_words_deduplicates_in_order() {
        let words = parse_words("slate\ncrane\nSLATE\nirate\ncrane\n");
        assert_eq!(words, [word("slate"), word("crane"), word("irate")]);
    }

    #[test]
    fn parse_words_empty() {
        assert!(parse_words("").is_empty());
    }

    #[test]
    fn frequencies_skip_header_and_short_words() {
        let counts = parse_frequencies("word,count\nthe,23135851162\ncrane,1200\nslate, 300\n\n")
            .unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&word("crane")], 1200);
        assert_eq!(counts[&word("slate")], 300);
    }

    #[test]
    fn frequencies_report_bad_rows() {
        assert_eq!(
            parse_frequencies("word,count\ncrane,12\nslate,lots\n").unwrap_err().0,
            3
        );
        assert_eq!(
            parse_frequencies("word,count\ncrane 12\n").unwrap_err().0,
            2
        );
    }

    #[test]
    fn repeated_words_accumulate() {
        let counts = parse_frequencies("word,count\ncrane,12\nslate,3\ncrane,30\n").unwrap();
        assert_eq!(counts[&word("crane")], 42);
        assert_eq!(counts[&word("slate")], 3);
    }

    #[test]
    fn overflowing_total_is_a_bad_row() {
        let (line, reason) =
            parse_frequencies("word,count\ncrane,18446744073709551615\ncrane,1\n").unwrap_err();
        assert_eq!(line, 3);
        assert!(reason.contains("overflows"));
    }

    #[test]
    fn load_from_disk() {
        let dir = std::env::temp_dir();
        let words_path = dir.join(format!("wordle_abc_words_{}.txt", std::process::id()));
        let freq_path = dir.join(format!("wordle_abc_freq_{}.csv", std::process::id()));
        fs::write(&words_path, "crane\nslate\n").unwrap();
        fs::write(&freq_path, "word,count\ncrane,4\nslate,x\n").unwrap();

        let words = load_words(&words_path).unwrap();
        let freqs = load_frequencies(&freq_path);
        fs::remove_file(&words_path).unwrap();
        fs::remove_file(&freq_path).unwrap();

        assert_eq!(words.len(), 2);
        assert!(matches!(freqs, Err(LoadError::Parse { line: 3, .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_words("/definitely/not/here.txt"),
            Err(LoadError::Io { .. })
        ));
    }
}
