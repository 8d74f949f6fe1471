//! High score persistence.
//!
//! The best score lives in a small JSON document, `{"highScore": N}`, under
//! the user's data directory. A missing file is an empty store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

pub use blockfall_engine::HighScoreStore;

/// Directory name under the platform data directory.
pub const APP_DIR: &str = "blockfall";
pub const FILE_NAME: &str = "highscore.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(rename = "highScore", default)]
    high_score: u32,
}

/// JSON file backed [`HighScoreStore`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/blockfall/highscore.json`.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Default high score file path for this platform.
pub fn default_path() -> Result<PathBuf> {
    let data_dir =
        dirs_next::data_dir().ok_or_else(|| anyhow!("no data directory for this platform"))?;
    Ok(data_dir.join(APP_DIR).join(FILE_NAME))
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no high score file at {}", self.path.display());
                return Ok(0);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading {}", self.path.display()));
            }
        };

        let file: HighScoreFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(file.high_score)
    }

    fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string(&HighScoreFile { high_score: score })?;
        fs::write(&self.path, json).with_context(|| format!("writing {}", self.path.display()))?;
        debug!("saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}
