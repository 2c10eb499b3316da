use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::portfolio::{DateMode, Grouping};

/// Defaults for the `worth` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorthConfig {
    /// Grouping used when `--how` is not given.
    pub default_grouping: Grouping,

    /// Date selection used when `--mode` is not given.
    pub default_mode: DateMode,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to data directory. If relative, resolved from config file location.
    /// If not specified, defaults to the config file's directory.
    pub data_dir: Option<PathBuf>,

    pub worth: WorthConfig,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn resolve_data_dir(&self, config_dir: &Path) -> PathBuf {
        match &self.data_dir {
            Some(data_dir) if data_dir.is_absolute() => data_dir.clone(),
            Some(data_dir) => config_dir.join(data_dir),
            None => config_dir.to_path_buf(),
        }
    }
}

/// Loaded configuration with resolved paths.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub worth: WorthConfig,
}

/// Returns the default config file path.
///
/// `./worthbook.toml` when it exists, otherwise
/// `<XDG data dir>/worthbook/worthbook.toml`.
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("worthbook.toml");
    if local_config.exists() {
        return local_config;
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join("worthbook").join("worthbook.toml"),
        None => local_config,
    }
}

impl ResolvedConfig {
    /// Load and resolve config from a file path.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_path = config_path
            .canonicalize()
            .with_context(|| format!("Config file not found: {}", config_path.display()))?;

        let config_dir = config_path
            .parent()
            .context("Config file has no parent directory")?;

        let config = Config::load(&config_path)?;
        Ok(Self {
            data_dir: config.resolve_data_dir(config_dir),
            worth: config.worth,
        })
    }

    /// Load config, falling back to defaults with the config file's intended
    /// directory as data directory.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load(config_path);
        }

        let config_path = if config_path.is_relative() {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(config_path)
        } else {
            config_path.to_path_buf()
        };

        let config_dir = config_path
            .parent()
            .context("Config path has no parent directory")?;

        Ok(Self {
            data_dir: config_dir.to_path_buf(),
            worth: WorthConfig::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_data_dir_is_config_dir() {
        let config = Config::default();
        let config_dir = Path::new("/home/user/worth");
        assert_eq!(config.resolve_data_dir(config_dir), PathBuf::from("/home/user/worth"));
    }

    #[test]
    fn test_relative_and_absolute_data_dir() {
        let config_dir = Path::new("/home/user/worth");

        let relative = Config {
            data_dir: Some(PathBuf::from("ledger")),
            ..Default::default()
        };
        assert_eq!(
            relative.resolve_data_dir(config_dir),
            PathBuf::from("/home/user/worth/ledger")
        );

        let absolute = Config {
            data_dir: Some(PathBuf::from("/var/worthbook")),
            ..Default::default()
        };
        assert_eq!(
            absolute.resolve_data_dir(config_dir),
            PathBuf::from("/var/worthbook")
        );
    }

    #[test]
    fn test_default_worth_settings() {
        let config = Config::default();
        assert_eq!(config.worth.default_grouping, Grouping::Commodity);
        assert_eq!(config.worth.default_mode, DateMode::Uniform);
    }

    #[test]
    fn test_load_worth_config() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("worthbook.toml");

        let mut file = std::fs::File::create(&config_path)?;
        writeln!(file, "data_dir = \"./ledger\"")?;
        writeln!(file, "[worth]")?;
        writeln!(file, "default_grouping = \"own_act\"")?;
        writeln!(file, "default_mode = \"latest\"")?;

        let config = Config::load(&config_path)?;
        assert_eq!(config.data_dir, Some(PathBuf::from("./ledger")));
        assert_eq!(config.worth.default_grouping, Grouping::OwnerAccount);
        assert_eq!(config.worth.default_mode, DateMode::Latest);

        Ok(())
    }

    #[test]
    fn test_load_rejects_unknown_grouping() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("worthbook.toml");

        let mut file = std::fs::File::create(&config_path)?;
        writeln!(file, "[worth]")?;
        writeln!(file, "default_grouping = \"portfolio\"")?;

        assert!(Config::load(&config_path).is_err());

        Ok(())
    }

    #[test]
    fn test_load_empty_config() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("worthbook.toml");
        std::fs::File::create(&config_path)?;

        let config = Config::load(&config_path)?;
        assert_eq!(config.data_dir, None);
        assert_eq!(config.worth, WorthConfig::default());

        Ok(())
    }

    #[test]
    fn test_resolved_config_load_or_default_missing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("worthbook.toml");

        let resolved = ResolvedConfig::load_or_default(&config_path)?;
        assert_eq!(resolved.data_dir, dir.path());
        assert_eq!(resolved.worth.default_mode, DateMode::Uniform);

        Ok(())
    }

    #[test]
    fn test_resolved_config_resolves_relative_data_dir() -> Result<()> {
        let dir = TempDir::new()?;
        let config_path = dir.path().join("worthbook.toml");

        let mut file = std::fs::File::create(&config_path)?;
        writeln!(file, "data_dir = \"./data\"")?;

        let resolved = ResolvedConfig::load(&config_path)?;
        assert_eq!(resolved.data_dir, dir.path().canonicalize()?.join("data"));

        Ok(())
    }
}
