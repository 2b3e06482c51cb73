//! Shared tool settings (PBS directory, schema directory, write options).
//!
//! The settings file is always `~/.config/pbs-tools/settings.toml` so every
//! front end resolves directories the same way.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CompileError;

/// Canonical path to the shared settings file: `~/.config/pbs-tools/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("pbs-tools").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub project: ProjectSettings,
    pub write: WriteSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Directory holding the `.txt` PBS files.
    pub pbs_dir: Option<PathBuf>,
    /// Directory holding the `.toml` schema files.
    pub schema_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriteSettings {
    /// Keep a `.backup` copy while a file is rewritten.
    pub backup: bool,
}

impl Default for WriteSettings {
    fn default() -> Self {
        Self { backup: true }
    }
}

impl Settings {
    /// Load the shared settings file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let path = settings_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, CompileError> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|source| CompileError::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve the PBS directory using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `project.pbs_dir` in `settings.toml`
    /// 3. `PBS/` under the current working directory
    pub fn resolve_pbs_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.project.pbs_dir.clone())
            .unwrap_or_else(|| current_dir().join("PBS"))
    }

    /// Same chain as [`resolve_pbs_dir`](Self::resolve_pbs_dir), defaulting to `schemas/`.
    pub fn resolve_schema_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.project.schema_dir.clone())
            .unwrap_or_else(|| current_dir().join("schemas"))
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
