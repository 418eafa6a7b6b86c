//! Best-score persistence
//!
//! The best score is a single decimal integer stored under one key. Reading
//! is lenient and never fails: anything unusable counts as 0. Writes are
//! fire-and-forget; a backend that cannot write logs and carries on.

/// Storage key (LocalStorage on web)
pub const STORAGE_KEY: &str = "highScore";

/// Persistence collaborator for the best score
pub trait HighScoreStore {
    /// Stored best score, or 0 when missing or unreadable
    fn load_high_score(&self) -> u32;

    /// Persist a new best score
    fn save_high_score(&mut self, score: u32);
}

/// Parse a stored best score the way `parseInt` would, minus NaN
///
/// Leading whitespace and a `+` are skipped and leading digits are read;
/// trailing junk is ignored. Negative, empty, non-numeric or overflowing
/// input gives 0.
pub fn parse_high_score(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().unwrap_or(0)
}

/// Format a best score for storage
pub fn format_high_score(score: u32) -> String {
    score.to_string()
}

/// In-memory store (tests and sessions without storage)
#[derive(Debug, Default)]
pub struct MemoryHighScores {
    raw: Option<String>,
    writes: u32,
}

impl MemoryHighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored string, as if read from disk
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            writes: 0,
        }
    }

    /// Number of saves so far
    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load_high_score(&self) -> u32 {
        self.raw.as_deref().map(parse_high_score).unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u32) {
        self.raw = Some(format_high_score(score));
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_lenient() {
        assert_eq!(parse_high_score("42"), 42);
        assert_eq!(parse_high_score("  7"), 7);
        assert_eq!(parse_high_score("+12"), 12);
        assert_eq!(parse_high_score("12abc"), 12);
        assert_eq!(parse_high_score("3.9"), 3);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_high_score(""), 0);
        assert_eq!(parse_high_score("abc"), 0);
        assert_eq!(parse_high_score("-5"), 0);
        assert_eq!(parse_high_score("null"), 0);
        assert_eq!(parse_high_score("99999999999999999999"), 0);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScores::new();
        assert_eq!(store.load_high_score(), 0);

        store.save_high_score(17);
        assert_eq!(store.load_high_score(), 17);
        assert_eq!(store.raw(), Some("17"));
        assert_eq!(store.writes(), 1);

        let corrupt = MemoryHighScores::with_raw("oops");
        assert_eq!(corrupt.load_high_score(), 0);
    }
}
