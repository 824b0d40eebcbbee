use crate::cli::Settings;
use crate::logging::LogLevel;
use crate::search::query::API_BASE_URL;
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "PROPERTY_FINDER_";
const USER_AGENT: &str = concat!("property-finder/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search endpoint, query parameters are appended to it
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub log_level: LogLevel,
    /// Where the results view saves the listings as JSON
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            output: PathBuf::from("search_results.json"),
        }
    }
}

impl Config {
    fn figment(config_path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match config_path {
            Some(path) => figment.merge(Yaml::file(path)),
            None => figment,
        };
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Defaults, then the YAML file if any, then `PROPERTY_FINDER_*` variables
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::figment(config_path)
            .extract()
            .context("Failed to load configuration")
    }

    /// Like [`Config::load`] with command line settings applied last
    pub fn from_cli(settings: &Settings) -> Result<Self> {
        Self::figment(settings.config_path.as_deref())
            .merge(Serialized::defaults(settings))
            .extract()
            .context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_point_at_live_api() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "https://api.nestoria.co.uk/api");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let file = yaml_file("timeout_secs: 5\nlog_level: debug\n");
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api_base_url, API_BASE_URL);
    }

    #[test]
    fn cli_settings_win_over_file() {
        let file = yaml_file("output: from_file.json\ntimeout_secs: 9\n");
        let settings = Settings {
            config_path: Some(file.path().to_path_buf()),
            log_level: Some(LogLevel::Warn),
            output: Some(PathBuf::from("from_cli.json")),
            api_base_url: None,
        };

        let config = Config::from_cli(&settings).unwrap();
        assert_eq!(config.output, PathBuf::from("from_cli.json"));
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.timeout_secs, 9);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = yaml_file("timeout_secs: soon\n");
        assert!(Config::load(Some(file.path())).is_err());
    }
}
