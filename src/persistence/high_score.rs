use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name used when no path is given on the command line
pub const DEFAULT_HIGH_SCORE_FILE: &str = "snake_highscore.txt";

/// Somewhere to keep the best score between runs.
///
/// Both operations are best-effort: a store that cannot be read reports 0,
/// and a failed save is dropped.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

/// High score kept as a decimal integer in a plain text file
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u32> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        parse_score(&raw).with_context(|| format!("Malformed high score in {:?}", self.path))
    }

    fn write(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))
    }
}

impl Default for FileHighScore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        if !self.path.exists() {
            return 0;
        }
        match self.read() {
            Ok(score) => score,
            Err(e) => {
                debug!(error = %e, "high score unreadable, using 0");
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        if let Err(e) = self.write(score) {
            warn!(error = %e, score, "high score not saved");
        }
    }
}

/// Empty or whitespace-only content counts as 0
fn parse_score(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u32>()
        .with_context(|| format!("not a score: {trimmed:?}"))
}

/// In-memory store, remembering the last value saved
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    initial: u32,
    saved: Option<u32>,
}

impl MemoryHighScore {
    pub fn new(initial: u32) -> Self {
        Self {
            initial,
            saved: None,
        }
    }

    /// Last value passed to `save`, if any
    pub fn saved(&self) -> Option<u32> {
        self.saved
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.saved.unwrap_or(self.initial)
    }

    fn save(&mut self, score: u32) {
        self.saved = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHighScore::new(temp_dir.path().join("missing.txt"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high.txt");

        let mut store = FileHighScore::new(&path);
        store.save(120);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "120");
        assert_eq!(FileHighScore::new(&path).load(), 120);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("high.txt");

        let mut store = FileHighScore::new(&path);
        store.save(30);
        assert_eq!(store.load(), 30);
    }

    #[test]
    fn test_garbage_loads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high.txt");

        for content in ["abc", "-5", "12.5", "99999999999999999999"] {
            std::fs::write(&path, content).unwrap();
            assert_eq!(FileHighScore::new(&path).load(), 0, "content {content:?}");
        }
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high.txt");

        std::fs::write(&path, "  250\n").unwrap();
        assert_eq!(FileHighScore::new(&path).load(), 250);

        std::fs::write(&path, "\n").unwrap();
        assert_eq!(FileHighScore::new(&path).load(), 0);
    }

    #[test]
    fn test_unwritable_path_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = temp_dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();

        let mut store = FileHighScore::new(&path);
        store.save(10);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScore::new(40);
        assert_eq!(store.load(), 40);
        assert_eq!(store.saved(), None);

        store.save(50);
        assert_eq!(store.load(), 50);
        assert_eq!(store.saved(), Some(50));
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("7").unwrap(), 7);
        assert_eq!(parse_score("").unwrap(), 0);
        assert!(parse_score("x").is_err());
    }
}
