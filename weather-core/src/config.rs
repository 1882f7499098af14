use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::provider::OpenWeatherProvider;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// # endpoint = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Override for the current-conditions endpoint.
    pub endpoint: Option<String>,
}

impl Config {
    /// Config from the platform config dir; defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;

        Self::from_toml(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Write to the platform config dir and return the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
        }

        let text = toml::to_string_pretty(self).context("Cannot encode config as TOML")?;
        fs::write(path, text).with_context(|| format!("Cannot write {}", path.display()))?;

        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// `<config dir>/weather/config.toml`.
    pub fn config_file_path() -> Result<PathBuf> {
        ProjectDirs::from("dev", "city-weather", "weather")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| anyhow!("No platform config directory available"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// API key from `WEATHER_API_KEY`, falling back to the config file.
    pub fn api_key(&self) -> Result<String> {
        self.api_key_with(env::var(API_KEY_ENV).ok())
    }

    fn api_key_with(&self, from_env: Option<String>) -> Result<String> {
        from_env
            .into_iter()
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: set {API_KEY_ENV} or run `weather configure` and enter your OpenWeather API key."
                )
            })
    }

    /// Build the provider this configuration describes.
    pub fn provider(&self) -> Result<OpenWeatherProvider> {
        let api_key = self.api_key()?;
        Ok(self.provider_with_key(api_key))
    }

    fn provider_with_key(&self, api_key: String) -> OpenWeatherProvider {
        match &self.endpoint {
            Some(endpoint) => OpenWeatherProvider::with_endpoint(api_key, endpoint.clone()),
            None => OpenWeatherProvider::new(api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::openweather::DEFAULT_ENDPOINT;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key_with(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("WEATHER_API_KEY"));
        assert!(msg.contains("Hint: set"));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        assert_eq!(cfg.api_key_with(Some("ENV_KEY".into())).unwrap(), "ENV_KEY");
        assert_eq!(cfg.api_key_with(None).unwrap(), "FILE_KEY");
    }

    #[test]
    fn blank_env_key_falls_back_to_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("  FILE_KEY \n".into());

        assert_eq!(cfg.api_key, Some("FILE_KEY".into()));
        assert_eq!(cfg.api_key_with(Some("   ".into())).unwrap(), "FILE_KEY");
    }

    #[test]
    fn parses_toml_with_endpoint_override() {
        let cfg = Config::from_toml(
            r#"
            api_key = "KEY"
            endpoint = "http://localhost:9000/weather"
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));

        let provider = cfg.provider_with_key("KEY".into());
        assert_eq!(provider.endpoint(), "http://localhost:9000/weather");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::default().provider_with_key("K".into()).endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn config_path_ends_with_config_toml() {
        if let Ok(path) = Config::config_file_path() {
            assert!(path.ends_with("config.toml"));
        }
    }

    #[test]
    fn save_then_load_from_nested_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            api_key: Some("KEY".into()),
            endpoint: Some("http://localhost:9000/weather".into()),
        };

        cfg.save_to(&path).expect("save should create parent dirs");

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn invalid_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();

        assert!(err.to_string().contains("Invalid config in"));
        assert!(err.to_string().contains("config.toml"));
    }
}
