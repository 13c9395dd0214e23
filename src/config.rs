use crate::context::DEFAULT_API_URL;
use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "version-tagger.toml";
pub const DEFAULT_TAG_FORMAT: &str = "{version}";

/// Represents the complete configuration for version-tagger.
///
/// Everything here can come from a TOML file; command-line flags and CI inputs
/// are layered on top with [Config::apply_overrides].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub source_file: Option<PathBuf>,

    #[serde(default)]
    pub version_pattern: Option<String>,

    #[serde(default = "default_tag_format")]
    pub tag_format: String,

    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

fn default_tag_format() -> String {
    DEFAULT_TAG_FORMAT.to_string()
}

fn default_prefix_tag_message() -> bool {
    true
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Configuration for the created tag and release
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_prefix_tag_message")]
    pub prefix_tag_message: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            prefix_tag_message: default_prefix_tag_message(),
        }
    }
}

/// Configuration for the hosting API endpoint
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            url: default_api_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_file: None,
            version_pattern: None,
            tag_format: default_tag_format(),
            release: ReleaseConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Values supplied on the command line or through CI inputs.
///
/// Blank strings count as absent, since CI runners export unset inputs as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub source_file: Option<PathBuf>,
    pub version_pattern: Option<String>,
    pub tag_format: Option<String>,
    pub prefix_tag_message: Option<bool>,
    pub api_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validated inputs for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub api_token: String,
    pub source_file: PathBuf,
    pub version_pattern: String,
    pub tag_format: String,
    pub prefix_tag_message: bool,
}

impl Config {
    /// Layer command-line values over the file configuration
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(path) = overrides
            .source_file
            .filter(|p| !p.as_os_str().is_empty())
        {
            self.source_file = Some(path);
        }
        if let Some(pattern) = non_blank(overrides.version_pattern) {
            self.version_pattern = Some(pattern);
        }
        if let Some(format) = non_blank(overrides.tag_format) {
            self.tag_format = format;
        }
        if let Some(prefix) = overrides.prefix_tag_message {
            self.release.prefix_tag_message = prefix;
        }
        if let Some(url) = non_blank(overrides.api_url) {
            self.api.url = url;
        }
    }

    /// Check required values and produce run inputs
    ///
    /// # Errors
    /// `Config` when the token, source file or version pattern is missing
    pub fn to_inputs(&self, api_token: Option<String>) -> Result<Inputs> {
        let api_token = non_blank(api_token)
            .ok_or_else(|| TaggerError::config("api_token is required"))?;
        let source_file = self
            .source_file
            .clone()
            .ok_or_else(|| TaggerError::config("source_file is required"))?;
        let version_pattern = self
            .version_pattern
            .clone()
            .ok_or_else(|| TaggerError::config("version_pattern is required"))?;

        Ok(Inputs {
            api_token,
            source_file,
            version_pattern,
            tag_format: self.tag_format.clone(),
            prefix_tag_message: self.release.prefix_tag_message,
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `version-tagger.toml` in current directory
/// 3. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or a custom path is missing
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        if !path.exists() {
            return Err(TaggerError::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        fs::read_to_string(path)?
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        fs::read_to_string(DEFAULT_CONFIG_FILE)?
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| TaggerError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tag_format, "{version}");
        assert!(config.release.prefix_tag_message);
        assert_eq!(config.api.url, "https://api.github.com");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("source_file = \"Cargo.toml\"\n").unwrap();
        assert_eq!(config.source_file, Some(PathBuf::from("Cargo.toml")));
        assert_eq!(config.tag_format, "{version}");
        assert!(config.release.prefix_tag_message);
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let mut config = Config {
            tag_format: "v{version}".to_string(),
            ..Config::default()
        };
        config.apply_overrides(ConfigOverrides {
            tag_format: Some("".to_string()),
            version_pattern: Some("(?<version>.*)".to_string()),
            prefix_tag_message: Some(false),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.tag_format, "v{version}");
        assert_eq!(config.version_pattern.as_deref(), Some("(?<version>.*)"));
        assert!(!config.release.prefix_tag_message);
    }

    #[test]
    fn test_to_inputs_requires_values() {
        let config = Config::default();
        assert!(config.to_inputs(Some("token".to_string())).is_err());

        let config = Config {
            source_file: Some(PathBuf::from("package.json")),
            version_pattern: Some("(?<version>.*)".to_string()),
            ..Config::default()
        };
        assert!(config.to_inputs(None).is_err());
        assert!(config.to_inputs(Some(" ".to_string())).is_err());

        let inputs = config.to_inputs(Some("token".to_string())).unwrap();
        assert_eq!(inputs.source_file, PathBuf::from("package.json"));
        assert_eq!(inputs.tag_format, "{version}");
    }
}
