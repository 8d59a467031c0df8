use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::coverage::RateCardRoster;

/// Directory holding the board file and project config.
pub const PROJECT_DIR: &str = ".fieldboard";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub rate_cards: RateCardConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Let a drop over a ticket in the same column reorder the column.
    #[serde(default)]
    pub allow_reorder: bool,
}

/// Client roster and the clients with an uploaded rate card.
///
/// An empty `clients` list means "use the clients found on the board".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateCardConfig {
    #[serde(default)]
    pub clients: Vec<String>,
    #[serde(default)]
    pub covered: Vec<String>,
}

impl RateCardConfig {
    #[must_use]
    pub fn roster(&self) -> RateCardRoster {
        self.covered.iter().cloned().collect()
    }
}

/// Per-user preferences.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Preferred output mode: `pretty`, `text`, or `json`.
    #[serde(default)]
    pub output: Option<String>,
}

#[must_use]
pub fn project_dir(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR)
}

#[must_use]
pub fn board_path(project_root: &Path) -> PathBuf {
    project_dir(project_root).join("board.json")
}

#[must_use]
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_dir(project_root).join("config.toml")
}

/// Load `.fieldboard/config.toml`, falling back to defaults when absent.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_config_path(project_root);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `<config_dir>/fieldboard/config.toml`, falling back to defaults.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("fieldboard/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Template written by `fb init`.
pub const DEFAULT_CONFIG_TOML: &str = "[board]\n\
    allow_reorder = false\n\
    \n\
    [rate_cards]\n\
    # Leave `clients` empty to check the clients found on the board.\n\
    clients = []\n\
    covered = []\n";
