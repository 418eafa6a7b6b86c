//! Best-score storage backends
//!
//! Web builds use LocalStorage; native builds keep the same plain-integer
//! format in a text file. Both are lenient on read and silent-but-logged on
//! write failure.

use crate::highscores::{HighScoreStore, format_high_score, parse_high_score};

/// Browser LocalStorage, if the page is allowed to use it
#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Best score under `highScore` in LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageHighScores;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScores {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScores {
    fn load_high_score(&self) -> u32 {
        let Some(storage) = local_storage() else {
            log::warn!("LocalStorage unavailable, best score starts at 0");
            return 0;
        };
        match storage.get_item(crate::highscores::STORAGE_KEY) {
            Ok(Some(raw)) => parse_high_score(&raw),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Failed to read best score: {:?}", e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        let Some(storage) = local_storage() else {
            return;
        };
        if let Err(e) = storage.set_item(crate::highscores::STORAGE_KEY, &format_high_score(score))
        {
            log::warn!("Failed to save best score: {:?}", e);
        } else {
            log::info!("Best score saved: {}", score);
        }
    }
}

/// Best score in a text file (headless runner)
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileHighScores {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileHighScores {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl HighScoreStore for FileHighScores {
    fn load_high_score(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => parse_high_score(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Failed to read best score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        match std::fs::write(&self.path, format_high_score(score)) {
            Ok(()) => log::info!("Best score {} saved to {}", score, self.path.display()),
            Err(e) => log::warn!("Failed to save best score to {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gapwing-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = FileHighScores::new(temp_path("missing"));
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn test_file_round_trip_and_corruption() {
        let path = temp_path("roundtrip");
        let mut store = FileHighScores::new(&path);
        store.save_high_score(23);
        assert_eq!(store.load_high_score(), 23);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "23");

        std::fs::write(&path, "not a number").unwrap();
        assert_eq!(store.load_high_score(), 0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unwritable_path_is_not_fatal() {
        let mut store = FileHighScores::new(temp_path("no-such-dir").join("best.txt"));
        store.save_high_score(5);
        assert_eq!(store.load_high_score(), 0);
    }
}
