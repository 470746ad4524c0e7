//! Game settings and preferences
//!
//! Persisted separately from the score file as a small JSON document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PLAYER_NAME;
use crate::persistence::PersistenceError;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to the nominal tick rate (>1 is faster)
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.9,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.15,
        }
    }

    /// Extra obstacles seeded at start
    pub fn obstacle_delta(&self) -> i32 {
        match self {
            Difficulty::Easy => -2,
            Difficulty::Medium => 0,
            Difficulty::Hard => 4,
        }
    }
}

/// Snake body color. Rendering only, never read by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SnakeColor {
    #[default]
    Green,
    Red,
    Blue,
    White,
    Orange,
}

impl SnakeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnakeColor::Green => "Green",
            SnakeColor::Red => "Red",
            SnakeColor::Blue => "Blue",
            SnakeColor::White => "White",
            SnakeColor::Orange => "Orange",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "green" => Some(SnakeColor::Green),
            "red" => Some(SnakeColor::Red),
            "blue" => Some(SnakeColor::Blue),
            "white" => Some(SnakeColor::White),
            "orange" => Some(SnakeColor::Orange),
            _ => None,
        }
    }
}

/// Player selections consumed when a session initializes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub snake_color: SnakeColor,
    /// Name written to the scoreboard
    pub player_name: String,
    /// Score file location
    pub scores_path: PathBuf,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            snake_color: SnakeColor::Green,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            scores_path: PathBuf::from("scores.csv"),
            seed: None,
        }
    }
}

impl Settings {
    /// Apply raw dialog results, keeping defaults for anything missing or unknown
    pub fn apply_selections(
        &mut self,
        difficulty: Option<&str>,
        color: Option<&str>,
        name: Option<&str>,
    ) {
        self.difficulty = difficulty.and_then(Difficulty::from_str).unwrap_or_default();
        self.snake_color = color.and_then(SnakeColor::from_str).unwrap_or_default();
        self.player_name = effective_name(name);
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings as JSON
    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// Name to record, defaulting when empty or absent
pub fn effective_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => DEFAULT_PLAYER_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str(" easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_selection_fallbacks() {
        let mut settings = Settings::default();
        settings.apply_selections(Some("bogus"), None, Some("   "));
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert_eq!(settings.snake_color, SnakeColor::Green);
        assert_eq!(settings.player_name, "Player");

        settings.apply_selections(Some("Easy"), Some("orange"), Some(" Ada "));
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.snake_color, SnakeColor::Orange);
        assert_eq!(settings.player_name, "Ada");
    }

    #[test]
    fn test_settings_roundtrip_file() {
        let path = std::env::temp_dir().join(format!("snake_settings_{}.json", std::process::id()));
        let settings = Settings {
            difficulty: Difficulty::Hard,
            seed: Some(7),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.difficulty, Difficulty::Hard);
        assert_eq!(loaded.seed, Some(7));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_settings_file() {
        let loaded = Settings::load_from(Path::new("/nonexistent/snake/settings.json"));
        assert_eq!(loaded.difficulty, Difficulty::Medium);
    }
}
