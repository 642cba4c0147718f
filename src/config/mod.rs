use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::raster::DEFAULT_RESOLUTION;

/// Upper bound on grid resolution unless a config file raises it
pub const DEFAULT_MAX_RESOLUTION: usize = 500;

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}
fn default_max_resolution() -> usize {
    DEFAULT_MAX_RESOLUTION
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default = "default_max_resolution")]
    pub max_resolution: usize,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            max_resolution: default_max_resolution(),
            verbose: default_verbose(),
            output: None,
            store: StoreConfig::default(),
        }
    }
}

fn default_token_env() -> String {
    "PARCELGRID_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Where parcel polygons are loaded from and saved to
///
/// `api_url` takes precedence over `dir` when both are set.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub api_url: Option<String>,
    /// Environment variable holding the bearer token for `api_url`
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: None,
            api_url: None,
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl StoreConfig {
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env).ok().filter(|t| !t.is_empty())
    }
}

impl FileConfig {
    /// First parseable config file on the search path, if any
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::debug!("using config file {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly named config file
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Resolution to rasterize at: the CLI value if given, else the file's,
    /// checked against `max_resolution`
    pub fn resolve_resolution(&self, cli: Option<usize>) -> Result<usize> {
        validate_resolution(cli.unwrap_or(self.resolution), self.max_resolution)
    }
}

pub fn validate_resolution(resolution: usize, max_resolution: usize) -> Result<usize> {
    if resolution == 0 {
        bail!("Resolution must be at least 1");
    }
    if resolution > max_resolution {
        bail!(
            "Resolution {} exceeds the maximum of {} (raise max_resolution in the config file)",
            resolution,
            max_resolution
        );
    }
    Ok(resolution)
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("parcelgrid.toml"));
    paths.push(PathBuf::from(".parcelgrid.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("parcelgrid").join("config.toml"));
        paths.push(config_dir.join("parcelgrid.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".parcelgrid.toml"));
        paths.push(home.join(".config").join("parcelgrid").join("config.toml"));
    }

    paths
}
