//! Configuration file support
//!
//! Loads settings from ~/.hotspot.toml (or %USERPROFILE%\.hotspot.toml
//! on Windows).
//!
//! Example:
//! ```text
//! # hotspot configuration
//! enabled = true
//! exclude-name-pattern = "^ "
//! exclude-modes = ["fundamental", "dired"]
//! ```

use std::fs;
use std::path::PathBuf;

use regex::Regex;

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether activation is enabled at all
    pub enabled: bool,
    /// Documents whose name matches this pattern are never activated
    pub exclude_name_pattern: Option<String>,
    /// Mode names for which activation is skipped
    pub exclude_modes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            // Internal documents are hidden behind a leading space
            exclude_name_pattern: Some("^ ".to_string()),
            exclude_modes: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".hotspot.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".hotspot.toml"))
        }
    }

    /// Load configuration from file, falling back to defaults
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                return Self::parse(&contents);
            }
        }
        Config::default()
    }

    /// Parse TOML config contents; unknown or malformed keys keep defaults
    pub fn parse(contents: &str) -> Self {
        let mut config = Config::default();

        let value: toml::Value = match contents.parse() {
            Ok(value) => value,
            Err(_) => return config,
        };

        if let Some(enabled) = value.get("enabled").and_then(|v| v.as_bool()) {
            config.enabled = enabled;
        }

        if let Some(pattern) = value.get("exclude-name-pattern").and_then(|v| v.as_str()) {
            config.exclude_name_pattern = if pattern.is_empty() {
                None
            } else {
                Some(pattern.to_string())
            };
        }

        if let Some(modes) = value.get("exclude-modes").and_then(|v| v.as_array()) {
            config.exclude_modes = modes
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect();
        }

        config
    }

    /// Check whether a document should be skipped at activation
    pub fn is_excluded(&self, doc_name: &str, mode_name: &str) -> bool {
        if !self.enabled {
            return true;
        }
        if self.exclude_modes.iter().any(|m| m == mode_name) {
            return true;
        }
        if let Some(pattern) = &self.exclude_name_pattern {
            if let Ok(regex) = Regex::new(pattern) {
                if regex.is_match(doc_name) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.enabled);
        assert!(config.exclude_modes.is_empty());
        assert!(config.is_excluded(" *internal*", "text"));
        assert!(!config.is_excluded("notes.org", "text"));
    }

    #[test]
    fn test_parse_config() {
        let contents = r#"
# hotspot configuration
enabled = true
exclude-name-pattern = "^\\*scratch\\*$"
exclude-modes = ["dired", "fundamental"]
        "#;

        let config = Config::parse(contents);
        assert!(config.enabled);
        assert_eq!(
            config.exclude_name_pattern.as_deref(),
            Some(r"^\*scratch\*$")
        );
        assert_eq!(config.exclude_modes, vec!["dired", "fundamental"]);
        assert!(config.is_excluded("*scratch*", "text"));
        assert!(config.is_excluded("notes.org", "dired"));
        assert!(!config.is_excluded("notes.org", "text"));
    }

    #[test]
    fn test_parse_malformed_falls_back() {
        let config = Config::parse("not [valid toml");
        assert!(config.enabled);
        assert_eq!(config.exclude_name_pattern.as_deref(), Some("^ "));
    }

    #[test]
    fn test_disabled_excludes_everything() {
        let config = Config::parse("enabled = false");
        assert!(config.is_excluded("notes.org", "text"));
    }

    #[test]
    fn test_empty_pattern_clears_exclusion() {
        let config = Config::parse(r#"exclude-name-pattern = """#);
        assert!(!config.is_excluded(" *internal*", "text"));
    }
}
