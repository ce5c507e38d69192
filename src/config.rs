use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::policy::{DEFAULT_MAX_WORD_LEN, DEFAULT_WORD_PATTERN, WordPolicy};

const DEFAULT_SOURCE: &str = "spreadthewordlist.dict";
const DEFAULT_DESTINATION: &str = "words.txt";

#[derive(Debug, Clone)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub max_word_len: usize,
    pub word_pattern: String,
    config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct FileConfig {
    source: Option<PathBuf>,
    destination: Option<PathBuf>,
    max_word_len: Option<usize>,
    word_pattern: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub max_word_len: Option<usize>,
    pub word_pattern: Option<String>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> Result<Self> {
        let file_config = load_file_config(config_path.as_ref())?;
        Self::resolve(file_config, overrides, config_path)
    }

    fn resolve(
        file_config: FileConfig,
        overrides: ConfigOverrides,
        config_path: Option<PathBuf>,
    ) -> Result<Self> {
        let source = overrides
            .source
            .or(file_config.source)
            .or_else(|| env::var_os("WORDLIST_SOURCE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));

        let destination = overrides
            .destination
            .or(file_config.destination)
            .or_else(|| env::var_os("WORDLIST_DEST").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION));

        let max_word_len = match overrides.max_word_len.or(file_config.max_word_len) {
            Some(len) => len,
            None => match env::var("WORDLIST_MAX_LEN") {
                Ok(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("WORDLIST_MAX_LEN is not a number: {raw:?}"))?,
                Err(_) => DEFAULT_MAX_WORD_LEN,
            },
        };

        let word_pattern = overrides
            .word_pattern
            .or(file_config.word_pattern)
            .or_else(|| env::var("WORDLIST_PATTERN").ok())
            .unwrap_or_else(|| DEFAULT_WORD_PATTERN.to_string());

        // Determine which config path to use for saving
        let config_path = config_path.or_else(default_config_path);

        Ok(Self {
            source,
            destination,
            max_word_len,
            word_pattern,
            config_path,
        })
    }

    pub fn policy(&self) -> Result<WordPolicy> {
        WordPolicy::new(self.max_word_len, &self.word_pattern)
            .context("invalid word policy in configuration")
    }

    /// Write the effective settings to the config file so later runs pick them up.
    pub fn save(&self, force: bool) -> Result<PathBuf> {
        let config_path = self
            .config_path
            .clone()
            .context("could not determine config file path")?;

        if config_path.exists() && !force {
            anyhow::bail!(
                "config file {} already exists; pass --force to overwrite",
                config_path.display()
            );
        }

        let file_config = FileConfig {
            source: Some(self.source.clone()),
            destination: Some(self.destination.clone()),
            max_word_len: Some(self.max_word_len),
            word_pattern: Some(self.word_pattern.clone()),
        };

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create config directory at {}", parent.display())
                })?;
            }
        }

        let toml_string =
            toml::to_string_pretty(&file_config).context("failed to serialize config to TOML")?;
        fs::write(&config_path, toml_string)
            .with_context(|| format!("failed to write config file to {}", config_path.display()))?;

        tracing::debug!("Saved config to {}", config_path.display());
        Ok(config_path)
    }
}

fn load_file_config(path: Option<&PathBuf>) -> Result<FileConfig> {
    if let Some(path) = path {
        if path.exists() {
            return read_config_from_path(path);
        }
        anyhow::bail!("config path {:?} does not exist", path);
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            return read_config_from_path(&default_path);
        }
    }

    Ok(FileConfig::default())
}

fn read_config_from_path(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "wordlist", "wordlist-builder")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn overrides_win_over_file_values() {
        let file_config = FileConfig {
            source: Some(PathBuf::from("file.dict")),
            destination: Some(PathBuf::from("file.txt")),
            max_word_len: Some(12),
            word_pattern: Some("^[a-z']+$".to_string()),
        };
        let overrides = ConfigOverrides {
            source: Some(PathBuf::from("cli.dict")),
            max_word_len: Some(8),
            ..Default::default()
        };

        let config = Config::resolve(file_config, overrides, None).unwrap();
        assert_eq!(config.source, PathBuf::from("cli.dict"));
        assert_eq!(config.destination, PathBuf::from("file.txt"));
        assert_eq!(config.max_word_len, 8);
        assert_eq!(config.word_pattern, "^[a-z']+$");
    }

    #[test]
    fn explicit_values_skip_environment_and_defaults() {
        let overrides = ConfigOverrides {
            source: Some(PathBuf::from("a.dict")),
            destination: Some(PathBuf::from("b.txt")),
            max_word_len: Some(DEFAULT_MAX_WORD_LEN),
            word_pattern: Some(DEFAULT_WORD_PATTERN.to_string()),
        };

        let config = Config::resolve(FileConfig::default(), overrides, None).unwrap();
        let policy = config.policy().unwrap();
        assert_eq!(policy.max_len(), 24);
        assert_eq!(policy.pattern(), "^[a-z]+$");
    }

    #[test]
    fn invalid_pattern_surfaces_as_error() {
        let overrides = ConfigOverrides {
            max_word_len: Some(24),
            word_pattern: Some("(".to_string()),
            ..Default::default()
        };

        let config = Config::resolve(FileConfig::default(), overrides, None).unwrap();
        assert!(config.policy().is_err());
    }

    #[test]
    fn reads_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "source = \"dict/source.dict\"\nmax_word_len = 15\n",
        )
        .unwrap();

        let file_config = read_config_from_path(&path).unwrap();
        assert_eq!(file_config.source, Some(PathBuf::from("dict/source.dict")));
        assert_eq!(file_config.max_word_len, Some(15));
        assert_eq!(file_config.destination, None);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(Config::load(Some(missing), ConfigOverrides::default()).is_err());
    }

    #[test]
    fn save_round_trips_and_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let overrides = ConfigOverrides {
            source: Some(PathBuf::from("in.dict")),
            destination: Some(PathBuf::from("out.txt")),
            max_word_len: Some(10),
            word_pattern: Some("^[a-z]+$".to_string()),
        };

        let config = Config::resolve(FileConfig::default(), overrides, Some(path.clone())).unwrap();
        assert_eq!(config.save(false).unwrap(), path);
        assert!(config.save(false).is_err());
        assert!(config.save(true).is_ok());

        let reloaded = Config::load(Some(path), ConfigOverrides::default()).unwrap();
        assert_eq!(reloaded.source, PathBuf::from("in.dict"));
        assert_eq!(reloaded.destination, PathBuf::from("out.txt"));
        assert_eq!(reloaded.max_word_len, 10);
    }
}
