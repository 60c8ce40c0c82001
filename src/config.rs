use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::{Error, Result};

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";
pub const DATABASE_ENV: &str = "SHORTS_DATABASE";

const DEFAULT_DATABASE: &str = "youtube_shorts.db";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Optional settings read from `shorts.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerConfig {
    pub database: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings, created once at startup and passed to the
/// store and the API client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PathBuf,
    pub api_key: String,
    pub timeout: Duration,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("shorts.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TrackerConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TrackerConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

impl Settings {
    /// Merge the config file, environment and command-line flag.
    ///
    /// Precedence: `--database` flag, then environment, then file, then defaults.
    /// A missing API key is a configuration error.
    pub fn resolve(
        config: Option<TrackerConfig>,
        database_flag: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config = config.unwrap_or_default();
        let non_blank = |v: String| if v.trim().is_empty() { None } else { Some(v) };

        let api_key = env(API_KEY_ENV)
            .and_then(non_blank)
            .or_else(|| config.api_key.clone().and_then(non_blank))
            .ok_or_else(|| {
                Error::Config(format!(
                    "YouTube API key is not set. Put {}=... in .env or the environment, or api_key in shorts.toml",
                    API_KEY_ENV
                ))
            })?;

        let database = database_flag
            .or_else(|| env(DATABASE_ENV).and_then(non_blank).map(PathBuf::from))
            .or_else(|| config.database.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1));

        Ok(Self { database, api_key, timeout })
    }

    /// Resolve against the process environment
    pub fn from_env(config: Option<TrackerConfig>, database_flag: Option<PathBuf>) -> Result<Self> {
        Self::resolve(config, database_flag, |key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = Settings::resolve(None, None, env_of(&[])).unwrap_err();
        assert!(err.is_fatal());

        let err = Settings::resolve(None, None, env_of(&[(API_KEY_ENV, "  ")])).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(None, None, env_of(&[(API_KEY_ENV, "k")])).unwrap();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.database, PathBuf::from("youtube_shorts.db"));
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_precedence() {
        let config = TrackerConfig {
            database: Some("file.db".to_string()),
            api_key: Some("file-key".to_string()),
            timeout_secs: Some(5),
        };

        let from_file = Settings::resolve(Some(config.clone()), None, env_of(&[])).unwrap();
        assert_eq!(from_file.api_key, "file-key");
        assert_eq!(from_file.database, PathBuf::from("file.db"));
        assert_eq!(from_file.timeout, Duration::from_secs(5));

        let env = env_of(&[(API_KEY_ENV, "env-key"), (DATABASE_ENV, "env.db")]);
        let from_env = Settings::resolve(Some(config.clone()), None, env).unwrap();
        assert_eq!(from_env.api_key, "env-key");
        assert_eq!(from_env.database, PathBuf::from("env.db"));

        let env = env_of(&[(DATABASE_ENV, "env.db")]);
        let from_flag = Settings::resolve(Some(config), Some(PathBuf::from("flag.db")), env).unwrap();
        assert_eq!(from_flag.database, PathBuf::from("flag.db"));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shorts.toml");
        std::fs::write(&path, "database = \"data/shorts.db\"\ntimeout_secs = 10\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database.as_deref(), Some("data/shorts.db"));
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout_secs, Some(10));

        assert!(load_config(Some(&dir.path().join("missing.toml"))).unwrap().is_none());
    }
}
