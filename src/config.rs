use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub anilist: AniListConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Drop empty entries left by stray commas instead of sending them as genres
    #[serde(default)]
    pub drop_empty_genres: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AniListConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Colors accept `#rrggbb` or a named terminal color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_secondary")]
    pub secondary: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_paper")]
    pub paper: String,
    #[serde(default = "default_text_primary")]
    pub text_primary: String,
    #[serde(default = "default_text_secondary")]
    pub text_secondary: String,
    #[serde(default = "default_error")]
    pub error: String,
}

pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    50 // AniList caps perPage at 50
}

pub(crate) fn default_primary() -> String {
    "#9c27b0".to_string() // purple
}

pub(crate) fn default_secondary() -> String {
    "#2196f3".to_string() // blue
}

pub(crate) fn default_background() -> String {
    "#303030".to_string()
}

pub(crate) fn default_paper() -> String {
    "#424242".to_string()
}

pub(crate) fn default_text_primary() -> String {
    "#ffffff".to_string()
}

pub(crate) fn default_text_secondary() -> String {
    "#b0bec5".to_string()
}

pub(crate) fn default_error() -> String {
    "red".to_string()
}

impl Default for AniListConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
            background: default_background(),
            paper: default_paper(),
            text_primary: default_text_primary(),
            text_secondary: default_text_secondary(),
            error: default_error(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "anirec").ok_or(Error::NoConfigDir)
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

pub fn data_dir() -> Result<PathBuf> {
    let dirs = project_dirs().map_err(|_| Error::NoDataDir)?;
    Ok(dirs.data_dir().to_path_buf())
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Reads the config at `path`, writing out defaults if it does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
