//! Sequential wordlist scan
//!
//! Reads a line-oriented wordlist and compares each line verbatim to the
//! target, feeding the same shared state the combinatorial search uses. I/O
//! failures surface as [`WordlistError`], never as a silent miss.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

use crate::error::{Result, WordlistError};
use crate::monitor::SearchState;

/// Result of scanning a wordlist to the end or to the first hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordlistOutcome {
    /// 1-based line number of the first match, if any
    pub position: Option<u64>,
    /// Lines examined before stopping
    pub lines_examined: u64,
}

/// Scan `path` for an exact match of `target`, counting every examined line
/// against the shared tested counter
pub fn scan(path: impl AsRef<Path>, target: &str, state: &SearchState) -> Result<WordlistOutcome> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| WordlistError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut position = 0u64;
    for line in reader.lines() {
        let line = line.map_err(|source| WordlistError::Read { source })?;
        position += 1;
        state.record_tested(1);

        if line.trim_end() == target {
            state.mark_found(line.trim_end().as_bytes());
            info!(position, "target found in wordlist");
            return Ok(WordlistOutcome {
                position: Some(position),
                lines_examined: position,
            });
        }
    }

    Ok(WordlistOutcome {
        position: None,
        lines_examined: position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecoveryError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn wordlist_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_hit_reports_position() {
        let file = wordlist_file("alpha\nbeta\ngamma\n");
        let state = SearchState::new();
        let outcome = scan(file.path(), "gamma", &state).unwrap();
        assert_eq!(outcome.position, Some(3));
        assert_eq!(outcome.lines_examined, 3);
        assert_eq!(state.tested(), 3);
        assert!(state.is_found());
        assert_eq!(state.found_value(), Some("gamma"));
    }

    #[test]
    fn test_miss_examines_every_line() {
        let file = wordlist_file("alpha\nbeta\ngamma\n");
        let state = SearchState::new();
        let outcome = scan(file.path(), "delta", &state).unwrap();
        assert_eq!(outcome.position, None);
        assert_eq!(outcome.lines_examined, 3);
        assert_eq!(state.tested(), 3);
        assert!(!state.is_found());
    }

    #[test]
    fn test_first_match_wins() {
        let file = wordlist_file("beta\nbeta\nbeta\n");
        let state = SearchState::new();
        let outcome = scan(file.path(), "beta", &state).unwrap();
        assert_eq!(outcome.position, Some(1));
        assert_eq!(state.tested(), 1);
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let file = wordlist_file("alpha  \r\nbeta\t\n");
        let state = SearchState::new();
        let outcome = scan(file.path(), "beta", &state).unwrap();
        assert_eq!(outcome.position, Some(2));
    }

    #[test]
    fn test_missing_file_is_distinct_error() {
        let state = SearchState::new();
        let result = scan("/nonexistent/wordlist.txt", "alpha", &state);
        match result {
            Err(RecoveryError::Wordlist(WordlistError::Open { path, .. })) => {
                assert_eq!(path, Path::new("/nonexistent/wordlist.txt"));
            }
            other => panic!("expected open error, got {:?}", other),
        }
        assert_eq!(state.tested(), 0);
    }

    #[test]
    fn test_no_final_newline() {
        let file = wordlist_file("alpha\nbeta");
        let state = SearchState::new();
        let outcome = scan(file.path(), "beta", &state).unwrap();
        assert_eq!(outcome.position, Some(2));
    }
}
