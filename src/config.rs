//! External configuration loader.
//!
//! Reads `stacktris.toml` from the executable's directory, then the current
//! directory. A missing file or missing keys fall back to defaults; a file that
//! exists but does not parse is an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::GameSettings;
use crate::types::DEFAULT_TICK_MS;

pub const CONFIG_FILE: &str = "stacktris.toml";

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Milliseconds per engine frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
    /// Fixed randomizer seed; a fresh one per run when absent
    #[serde(default)]
    pub seed: Option<u32>,
    #[serde(default = "default_random_rotation")]
    pub random_rotation: bool,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log file; logging is off without one
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Defaults ──

fn default_tick_ms() -> u32 { DEFAULT_TICK_MS }
fn default_random_rotation() -> bool { true }
fn default_log_level() -> String { "info".into() }

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tick_ms: default_tick_ms(),
            seed: None,
            random_rotation: default_random_rotation(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: None,
            level: default_log_level(),
        }
    }
}

// ── Loading ──

impl Config {
    /// Load from the first `stacktris.toml` found in the candidate directories.
    pub fn load() -> Result<Self> {
        for dir in candidate_dirs() {
            let path = dir.join(CONFIG_FILE);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text)?;
        anyhow::ensure!(cfg.game.tick_ms > 0, "game.tick_ms must be positive");
        Ok(cfg)
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings {
            random_rotation: self.game.random_rotation,
        }
    }
}

/// Candidate directories to search: exe dir, then CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    dirs
}
