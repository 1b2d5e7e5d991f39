//! Game configuration and the named scenario presets that seed it

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::bureaucrat::BureaucratCapture;
use crate::fen::STANDARD_FEN;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown scenario preset '{0}'")]
    UnknownPreset(String),
}

/// Everything that varies between games. Built once per game start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Start position text that replaces the preset's, when non-blank.
    pub position_override: Option<String>,
    pub bureaucrat_enabled: bool,
    pub bureaucrat_capture: BureaucratCapture,
    pub white_moves_per_turn: u8,
    pub black_moves_per_turn: u8,
    /// 0 keeps the base position's width.
    pub board_width: u8,
    /// 0 keeps the base position's height.
    pub board_height: u8,
    pub fill_expanded_files: bool,
    pub chess960: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            position_override: None,
            bureaucrat_enabled: false,
            bureaucrat_capture: BureaucratCapture::Defect,
            white_moves_per_turn: 1,
            black_moves_per_turn: 1,
            board_width: 0,
            board_height: 0,
            fill_expanded_files: false,
            chess960: false,
        }
    }
}

impl Configuration {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Configuration = toml::from_str(text)?;
        Ok(cfg.clamped())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Per-turn move counts of zero are raised to one.
    pub fn clamped(self) -> Self {
        Self {
            white_moves_per_turn: self.white_moves_per_turn.max(1),
            black_moves_per_turn: self.black_moves_per_turn.max(1),
            ..self
        }
    }

    /// The override text, if it is set and not blank.
    pub fn override_text(&self) -> Option<&str> {
        self.position_override
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn resize_requested(&self) -> bool {
        self.board_width != 0 || self.board_height != 0
    }
}

/// Named bundle of defaults for a Configuration. Has no behaviour of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    pub name: String,
    pub default_fen: String,
    pub bureaucrat: bool,
    pub white_moves_per_turn: u8,
    pub black_moves_per_turn: u8,
}

impl ScenarioPreset {
    fn new(name: &str, fen: &str, bureaucrat: bool, white: u8, black: u8) -> Self {
        Self {
            name: name.to_string(),
            default_fen: fen.to_string(),
            bureaucrat,
            white_moves_per_turn: white,
            black_moves_per_turn: black,
        }
    }

    /// A Configuration seeded from this preset.
    pub fn configuration(&self) -> Configuration {
        Configuration {
            bureaucrat_enabled: self.bureaucrat,
            white_moves_per_turn: self.white_moves_per_turn,
            black_moves_per_turn: self.black_moves_per_turn,
            ..Configuration::default()
        }
    }
}

pub const BUREAUCRAT_FEN: &str = "rnbqkbnr/pppppppp/3c4/8/8/4C3/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub fn presets() -> Vec<ScenarioPreset> {
    vec![
        ScenarioPreset::new("Standard", STANDARD_FEN, false, 1, 1),
        ScenarioPreset::new("Double move x2", STANDARD_FEN, false, 2, 2),
        ScenarioPreset::new("Bureaucrat", BUREAUCRAT_FEN, true, 1, 1),
        ScenarioPreset::new("Bureaucrat + DM x2", BUREAUCRAT_FEN, true, 2, 2),
    ]
}

/// Look a preset up by name, ignoring case.
pub fn preset(name: &str) -> Result<ScenarioPreset, ConfigError> {
    presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
