use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use frostbite_world::LevelConfig;

const SUPPORTED_CONFIG_VERSION: u32 = 1;
const DEFAULT_SAVE_DIR: &str = "saves";

/// Settings resolved from the optional TOML configuration file.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CliConfig {
    /// Rules applied to every level.
    pub(crate) level: LevelConfig,
    /// Directory holding saved games.
    pub(crate) save_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            level: LevelConfig::default(),
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

impl CliConfig {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        parse_config(&contents)
            .with_context(|| format!("invalid config at {}", path.display()))
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    #[serde(default)]
    level: LevelConfig,
    save_dir: Option<PathBuf>,
}

fn parse_config(contents: &str) -> Result<CliConfig> {
    let file: ConfigFile =
        toml::from_str(contents).context("failed to parse config toml contents")?;
    if file.version != SUPPORTED_CONFIG_VERSION {
        bail!(
            "unsupported config version {}; expected {}",
            file.version,
            SUPPORTED_CONFIG_VERSION
        );
    }
    if file.level.tick_millis == 0 {
        bail!("level.tick_millis must be positive");
    }

    Ok(CliConfig {
        level: file.level,
        save_dir: file
            .save_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR)),
    })
}
