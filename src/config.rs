use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_yaml::Deserializer;

const APP_NAME: &str = "frontpage";
const CONFIG_FILE: &str = "config.yaml";

const TEMPLATE: &str = r#"# frontpage config (YAML)
# All keys are required unless marked optional.

# Directory holding news-data-YYYY-MM-DD-HH-MM-SS.json archive snapshots
snapshot_dir: "/srv/frontpage/public/archive"

# Directory image `src` paths are relative to
asset_dir: "/srv/frontpage/public"

# The latest snapshot, shown on the front page
current_snapshot: "/srv/frontpage/public/news-data.json"

# Optional URL prefix when the site is not served from the domain root
base_path: ""
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub snapshot_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub current_snapshot: PathBuf,
    pub base_path: Option<String>,
}

pub struct EnsureOutcome {
    pub path: PathBuf,
    pub created: bool,
}

impl Config {
    /// Finds the config file, writing the template on first run. An explicit
    /// path is never created.
    pub fn ensure_user_config(explicit: Option<&Path>) -> Result<EnsureOutcome> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(anyhow!("Config file {} does not exist", path.display()));
            }
            return Ok(EnsureOutcome {
                path: path.to_path_buf(),
                created: false,
            });
        }

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_NAME);

        if let Some(path) = xdg_dirs.find_config_file(CONFIG_FILE) {
            return Ok(EnsureOutcome {
                path,
                created: false,
            });
        }

        let config_path = xdg_dirs
            .place_config_file(CONFIG_FILE)
            .context("Cannot create configuration directory")?;
        let mut config_file = File::create(&config_path)
            .with_context(|| format!("Failed to create {}", config_path.display()))?;
        config_file.write_all(TEMPLATE.as_bytes())?;

        Ok(EnsureOutcome {
            path: config_path,
            created: true,
        })
    }

    pub fn load(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&raw).map_err(|e| anyhow!("Invalid YAML in {}: {}", path.display(), e))
    }

    pub fn from_yaml(raw: &str) -> Result<Config> {
        let deserialized = Deserializer::from_str(raw);
        serde_path_to_error::deserialize(deserialized)
            .map_err(|e| anyhow!("at `{}`: {}", e.path(), e.inner()))
    }
}
