//! Score persistence
//!
//! Features:
//! - Append-only text file, one `timestamp,name,score` line per finished game
//! - Names sanitised so they can never introduce extra fields or lines
//! - Malformed lines skipped individually on load

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_PLAYER_NAME;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Unix timestamp (ms) when the game ended
    pub timestamp_ms: u64,
    pub name: String,
    pub score: u64,
}

impl ScoreRecord {
    pub fn new(timestamp_ms: u64, name: &str, score: u64) -> Self {
        Self {
            timestamp_ms,
            name: sanitize_name(name),
            score,
        }
    }

    pub fn to_line(&self) -> String {
        format!("{},{},{}", self.timestamp_ms, self.name, self.score)
    }

    /// Parse one stored line; `None` for anything malformed
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split(',');
        let timestamp_ms = fields.next()?.trim().parse().ok()?;
        let name = fields.next()?.to_string();
        let score = fields.next()?.trim().parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(Self {
            timestamp_ms,
            name,
            score,
        })
    }
}

/// Strip field and line separators from a player name
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c == ',' || c.is_control() { ' ' } else { c })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Where finished games are recorded
pub trait ScoreSink {
    fn append(&mut self, record: &ScoreRecord) -> Result<(), PersistenceError>;
    fn load(&self) -> Result<Vec<ScoreRecord>, PersistenceError>;
}

/// Score file on disk
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreSink for ScoreFile {
    fn append(&mut self, record: &ScoreRecord) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.to_line())?;
        log::info!("Score saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Vec<ScoreRecord>, PersistenceError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let records = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let record = ScoreRecord::parse_line(line);
                if record.is_none() {
                    log::debug!("Skipping malformed score line: {:?}", line);
                }
                record
            })
            .collect();
        Ok(records)
    }
}

/// In-memory sink for hosts without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryScores {
    pub records: Vec<ScoreRecord>,
}

impl ScoreSink for MemoryScores {
    fn append(&mut self, record: &ScoreRecord) -> Result<(), PersistenceError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn load(&self) -> Result<Vec<ScoreRecord>, PersistenceError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snake_{}_{}.csv", name, std::process::id()))
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("Ada, Lovelace"), "Ada  Lovelace");
        assert_eq!(sanitize_name("evil\nline"), "evil line");
        assert_eq!(sanitize_name("  "), "Player");
    }

    #[test]
    fn test_line_format() {
        let record = ScoreRecord::new(1700000000000, "Bo,b", 85);
        assert_eq!(record.to_line(), "1700000000000,Bo b,85");
        assert_eq!(ScoreRecord::parse_line(&record.to_line()), Some(record));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(ScoreRecord::parse_line("1,name").is_none());
        assert!(ScoreRecord::parse_line("1,name,abc").is_none());
        assert!(ScoreRecord::parse_line("x,name,10").is_none());
        assert!(ScoreRecord::parse_line("1,a,b,10").is_none());
    }

    #[test]
    fn test_file_append_and_load() {
        let path = temp_path("append");
        let _ = fs::remove_file(&path);
        let mut file = ScoreFile::new(&path);

        file.append(&ScoreRecord::new(1, "Ann", 30)).unwrap();
        file.append(&ScoreRecord::new(2, "Ben", 75)).unwrap();
        fs::OpenOptions::new()
            .append(true)
            .open(&path)
            .and_then(|mut f| writeln!(f, "garbage line\n3,Cy,notanumber"))
            .unwrap();
        file.append(&ScoreRecord::new(4, "Dee", 10)).unwrap();

        let records = file.load().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].name, "Ben");
        assert_eq!(records[2].score, 10);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let file = ScoreFile::new(temp_path("missing_never_written"));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_path_errors() {
        let mut file = ScoreFile::new("/proc/snake-arcade/scores.csv");
        assert!(matches!(
            file.append(&ScoreRecord::new(1, "x", 1)),
            Err(PersistenceError::Io(_))
        ));
    }
}
