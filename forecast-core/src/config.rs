use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    condition::ConditionThresholds, presentation::TransformSettings, provider::SourceId,
    series::SeriesProfile, units::DisplayUnit,
};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_GEOCODING_URL: &str = "https://addressvalidation.googleapis.com";

/// Where the forecast backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Optional request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_secs: None,
        }
    }
}

/// Credentials for the address validation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub api_key: String,

    #[serde(default = "default_geocoding_url")]
    pub base_url: String,
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Optional default source id, "backend" or "simulated".
    pub default_source: Option<String>,

    /// Optional default unit, e.g. "fahrenheit".
    pub default_unit: Option<String>,

    /// Named threshold set; takes precedence over `[thresholds]` when present.
    pub threshold_preset: Option<String>,

    #[serde(default)]
    pub backend: BackendConfig,

    /// Example TOML:
    /// [geocoding]
    /// api_key = "..."
    pub geocoding: Option<GeocodingConfig>,

    #[serde(default)]
    pub thresholds: ConditionThresholds,

    /// Overrides the curve shape used for backend-seeded hourly strips.
    pub series: Option<SeriesProfile>,
}

impl Config {
    /// Return the default source as a strongly-typed SourceId.
    pub fn default_source_id(&self) -> Result<SourceId> {
        let s = self.default_source.as_ref().ok_or_else(|| {
            anyhow!(
                "No default forecast source configured.\n\
                 Hint: run `forecast configure` or pass `--source backend|simulated`."
            )
        })?;

        SourceId::try_from(s.as_str())
    }

    pub fn set_default_source(&mut self, id: SourceId) {
        self.default_source = Some(id.as_str().to_string());
    }

    /// Unknown unit names silently fall back to Celsius.
    pub fn display_unit(&self) -> DisplayUnit {
        self.default_unit
            .as_deref()
            .map(DisplayUnit::parse_lenient)
            .unwrap_or_default()
    }

    pub fn set_default_unit(&mut self, unit: DisplayUnit) {
        self.default_unit = Some(unit.as_str().to_string());
    }

    /// Resolve classification cutoffs from the preset name or explicit values.
    pub fn condition_thresholds(&self) -> Result<ConditionThresholds> {
        match &self.threshold_preset {
            Some(name) => ConditionThresholds::preset(name),
            None => Ok(self.thresholds),
        }
    }

    /// Settings for presenting a backend reading.
    pub fn backend_settings(&self) -> Result<TransformSettings> {
        let profile = self.series.unwrap_or(SeriesProfile::BACKEND_SEEDED);
        Ok(TransformSettings::new(self.condition_thresholds()?).with_series(profile))
    }

    pub fn geocoding_api_key(&self) -> Option<&str> {
        self.geocoding.as_ref().map(|g| g.api_key.as_str())
    }

    /// Set/replace the geocoding key, keeping a custom base URL if one exists.
    pub fn upsert_geocoding_api_key(&mut self, api_key: String) {
        match &mut self.geocoding {
            Some(g) => g.api_key = api_key,
            None => {
                self.geocoding = Some(GeocodingConfig {
                    api_key,
                    base_url: default_geocoding_url(),
                })
            }
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-widget", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_id_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.default_source_id().unwrap_err();

        assert!(err.to_string().contains("No default forecast source configured"));
    }

    #[test]
    fn set_default_source_roundtrips() {
        let mut cfg = Config::default();
        cfg.set_default_source(SourceId::Simulated);

        assert_eq!(cfg.default_source_id().expect("set"), SourceId::Simulated);
    }

    #[test]
    fn unknown_default_unit_falls_back_to_celsius() {
        let mut cfg = Config::default();
        assert_eq!(cfg.display_unit(), DisplayUnit::Celsius);

        cfg.default_unit = Some("réaumur".into());
        assert_eq!(cfg.display_unit(), DisplayUnit::Celsius);

        cfg.set_default_unit(DisplayUnit::Kelvin);
        assert_eq!(cfg.display_unit(), DisplayUnit::Kelvin);
    }

    #[test]
    fn preset_wins_over_explicit_thresholds() {
        let mut cfg = Config::default();
        cfg.thresholds.hot = 40.0;
        assert_eq!(cfg.condition_thresholds().expect("explicit").hot, 40.0);

        cfg.threshold_preset = Some("full-stack".into());
        assert_eq!(
            cfg.condition_thresholds().expect("preset"),
            ConditionThresholds::full_stack()
        );

        cfg.threshold_preset = Some("nope".into());
        assert!(cfg.condition_thresholds().is_err());
    }

    #[test]
    fn backend_settings_default_to_seeded_series() {
        let cfg = Config::default();
        let settings = cfg.backend_settings().expect("valid");
        assert_eq!(settings.series, Some(SeriesProfile::BACKEND_SEEDED));
    }

    #[test]
    fn upsert_geocoding_key_keeps_custom_url() {
        let mut cfg = Config::default();
        assert_eq!(cfg.geocoding_api_key(), None);

        cfg.upsert_geocoding_api_key("KEY1".into());
        assert_eq!(cfg.geocoding_api_key(), Some("KEY1"));

        if let Some(g) = cfg.geocoding.as_mut() {
            g.base_url = "http://localhost:9999".into();
        }
        cfg.upsert_geocoding_api_key("KEY2".into());

        let g = cfg.geocoding.as_ref().expect("configured");
        assert_eq!(g.api_key, "KEY2");
        assert_eq!(g.base_url, "http://localhost:9999");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");

        assert!(cfg.default_source.is_none());
        assert_eq!(cfg.backend, BackendConfig::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_default_source(SourceId::Backend);
        cfg.set_default_unit(DisplayUnit::Fahrenheit);
        cfg.upsert_geocoding_api_key("SECRET".into());
        cfg.threshold_preset = Some("backend".into());
        cfg.save_to(&path).expect("saved");

        let loaded = Config::load_from(&path).expect("loaded");
        assert_eq!(loaded.default_source_id().expect("set"), SourceId::Backend);
        assert_eq!(loaded.display_unit(), DisplayUnit::Fahrenheit);
        assert_eq!(loaded.geocoding_api_key(), Some("SECRET"));
        assert_eq!(
            loaded.condition_thresholds().expect("preset"),
            ConditionThresholds::backend()
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_source = \"backend\"\n\n\
             [backend]\nbase_url = \"http://forecast.local\"\n\n\
             [thresholds]\nrain_stormy = 90.0\n",
        )
        .expect("written");

        let cfg = Config::load_from(&path).expect("parsed");
        assert_eq!(cfg.backend.base_url, "http://forecast.local");
        assert_eq!(cfg.backend.timeout_secs, None);
        assert_eq!(cfg.thresholds.rain_stormy, 90.0);
        assert_eq!(cfg.thresholds.hot, ConditionThresholds::default().hot);
    }
}
