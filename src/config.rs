//! Configuration management for the CV extraction tool

use crate::error::{CvExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub ai: AiConfig,
    pub ledger: LedgerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// How to normalize a range whose end is a bare year with no month.
    pub end_year_policy: EndYearPolicy,
    /// Gap tolerated between two periods before they count as disjoint.
    pub grace_months: u32,
}

/// Normalization rule for "Mon YYYY - YYYY" ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndYearPolicy {
    /// Reuse the start month with the stated end year.
    StartMonth,
    /// Clamp the end to December of the stated year.
    December,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub enabled: bool,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gpt-4".to_string(),
            temperature: 0.2,
            max_tokens: 512,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let ledger_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cv-extract")
            .join("candidates.csv");

        Self {
            extraction: ExtractionConfig {
                end_year_policy: EndYearPolicy::StartMonth,
                grace_months: 1,
            },
            ai: AiConfig::default(),
            ledger: LedgerConfig { path: ledger_path },
            output: OutputConfig {
                default_format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CvExtractError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CvExtractError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cv-extract")
            .join("config.toml")
    }

    /// The config file in effect for a run, honoring a CLI override.
    pub fn resolve_path(custom: Option<&Path>) -> PathBuf {
        custom
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.extraction.end_year_policy, EndYearPolicy::StartMonth);
        assert_eq!(config.extraction.grace_months, 1);
        assert!(config.ai.enabled);
        assert_eq!(config.ai.model, "gpt-4");
        assert_eq!(config.ai.temperature, 0.2);
        assert_eq!(config.ai.max_tokens, 512);
        assert_eq!(config.output.default_format, OutputFormat::Console);
        assert!(config.ledger.path.ends_with("candidates.csv"));
    }

    #[test]
    fn policies_serialize_as_kebab_case() {
        let mut config = Config::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("end_year_policy = \"start-month\""));
        assert!(rendered.contains("default_format = \"console\""));

        config.extraction.end_year_policy = EndYearPolicy::December;
        config.output.default_format = OutputFormat::Json;
        let rendered = toml::to_string_pretty(&config).unwrap();
        assert!(rendered.contains("end_year_policy = \"december\""));
        assert!(rendered.contains("default_format = \"json\""));
    }

    #[test]
    fn toml_round_trip_preserves_settings() {
        let mut config = Config::default();
        config.extraction.end_year_policy = EndYearPolicy::December;
        config.extraction.grace_months = 3;
        config.ai.model = "gpt-4o-mini".to_string();
        config.output.default_format = OutputFormat::Json;

        let rendered = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&rendered).unwrap();

        assert_eq!(loaded.extraction.end_year_policy, EndYearPolicy::December);
        assert_eq!(loaded.extraction.grace_months, 3);
        assert_eq!(loaded.ai.model, "gpt-4o-mini");
        assert_eq!(loaded.output.default_format, OutputFormat::Json);
    }

    #[test]
    fn load_from_reads_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, toml::to_string_pretty(&Config::default()).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ai.model, "gpt-4");
        assert_eq!(loaded.extraction.grace_months, 1);
    }

    #[test]
    fn malformed_toml_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, CvExtractError::Configuration(_)));
    }

    #[test]
    fn resolve_path_honors_an_explicit_override() {
        let custom = Path::new("/tmp/alt-config.toml");
        assert_eq!(Config::resolve_path(Some(custom)), custom);
        assert_eq!(Config::resolve_path(None), Config::config_path());
    }
}
