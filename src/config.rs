//! Runtime configuration for the terminal binary.
//!
//! Everything comes from `BLOCKFALL_*` environment variables; unset or
//! unparsable values fall back to defaults.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_COLS` | 10 | Board width |
//! | `BLOCKFALL_ROWS` | 20 | Board height |
//! | `BLOCKFALL_SEED` | random | Piece generator seed |
//! | `BLOCKFALL_SCORING` | `tiered` | `tiered` (100/300/500/800) or `flat` (10 per line) |
//! | `BLOCKFALL_LEVELS` | on | Score-driven speedup |
//! | `BLOCKFALL_SOUND` | on | Terminal bell cues |
//! | `BLOCKFALL_HIGHSCORE_PATH` | data dir | High score file |
//! | `BLOCKFALL_LOG_PATH` | unset | Log file; logging is off when unset |
//! | `BLOCKFALL_LOG_LEVEL` | `info` | Log threshold |

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::bail;

use log::LevelFilter;

use crate::core::{GameConfig, LevelProgression, ScoreTable};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Tiered,
    Flat,
}

impl FromStr for ScoringMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiered" | "classic" => Ok(ScoringMode::Tiered),
            "flat" | "simple" => Ok(ScoringMode::Flat),
            other => bail!("unknown scoring mode {:?}", other),
        }
    }
}

impl ScoringMode {
    pub fn table(self) -> ScoreTable {
        match self {
            ScoringMode::Tiered => ScoreTable::tiered(),
            ScoringMode::Flat => ScoreTable::flat(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub cols: u8,
    pub rows: u8,
    pub seed: Option<u64>,
    pub scoring: ScoringMode,
    pub levels: bool,
    pub sound: bool,
    pub highscore_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cols: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            seed: None,
            scoring: ScoringMode::Tiered,
            levels: true,
            sound: true,
            highscore_path: None,
            log_path: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let cols = get("BLOCKFALL_COLS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cols);
        let rows = get("BLOCKFALL_ROWS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.rows);
        let seed = get("BLOCKFALL_SEED").and_then(|s| s.parse().ok());
        let scoring = get("BLOCKFALL_SCORING")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.scoring);
        let levels = get("BLOCKFALL_LEVELS")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.levels);
        let sound = get("BLOCKFALL_SOUND")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.sound);
        let highscore_path = get("BLOCKFALL_HIGHSCORE_PATH").map(PathBuf::from);
        let log_path = get("BLOCKFALL_LOG_PATH").map(PathBuf::from);
        let log_level = get("BLOCKFALL_LOG_LEVEL")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);

        Self {
            cols,
            rows,
            seed,
            scoring,
            levels,
            sound,
            highscore_path,
            log_path,
            log_level,
        }
    }

    /// Game rules for these settings (dimensions clamped by the core).
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            score_table: self.scoring.table(),
            progression: self.levels.then(LevelProgression::default),
            ..GameConfig::classic()
        }
        .with_board_size(self.cols, self.rows)
        .validated()
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
