use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub concurrent_downloads: usize,
    pub user_agent: String,
    pub timeout: u64,
    pub retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            concurrent_downloads: 1,
            user_agent: format!("collab-dl/{}", env!("CARGO_PKG_VERSION")),
            timeout: 30,
            retries: 3,
        }
    }
}

impl Config {
    /// Load `collab-dl.toml` from the working directory, falling back to the
    /// defaults when it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("collab-dl.toml"))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
