use std::path::Path;

use crate::error::ConfigError;
use crate::game::{target_len, GameConfig};
use crate::ui::UiConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!(
                "Warning: config file '{}' not found, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.capacity == 0 {
            return Err(ConfigError::Validation("game.capacity must be > 0".into()));
        }
        if self.game.time_budget_secs == 0 {
            return Err(ConfigError::Validation(
                "game.time_budget_secs must be > 0".into(),
            ));
        }
        if self.game.max_level == 0 {
            return Err(ConfigError::Validation("game.max_level must be > 0".into()));
        }
        if self.game.value_range.min > self.game.value_range.max {
            return Err(ConfigError::Validation(
                "game.value_range.min must be <= game.value_range.max".into(),
            ));
        }
        let longest_target = target_len(self.game.max_level);
        if self.game.capacity < longest_target {
            return Err(ConfigError::Validation(format!(
                "game.capacity must be >= {longest_target} to fit the longest target pattern"
            )));
        }
        if self.ui.search_step_ms == 0 {
            return Err(ConfigError::Validation(
                "ui.search_step_ms must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
capacity = 12
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.capacity, 12);
        // Other fields should be defaults
        assert_eq!(config.game.time_budget_secs, 300);
        assert_eq!(config.ui.search_step_ms, 500);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.game.capacity, 8);
        assert_eq!(config.game.max_level, 3);
        assert_eq!(config.game.value_range.min, 0);
        assert_eq!(config.game.value_range.max, 9);
        assert_eq!(config.ui.match_hold_ms, 2000);
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let mut config = AppConfig::default();
        config.game.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_time_budget() {
        let mut config = AppConfig::default();
        config.game.time_budget_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_max_level() {
        let mut config = AppConfig::default();
        config.game.max_level = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_inverted_value_range() {
        let mut config = AppConfig::default();
        config.game.value_range.min = 7;
        config.game.value_range.max = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_capacity_below_longest_target() {
        let mut config = AppConfig::default();
        config.game.capacity = 3;
        assert!(config.validate().is_err());
        config.game.capacity = 4;
        config.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_zero_search_step() {
        let mut config = AppConfig::default();
        config.ui.search_step_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.capacity, 8);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
time_budget_secs = 120

[ui]
search_step_ms = 250
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.time_budget_secs, 120);
        assert_eq!(config.ui.search_step_ms, 250);
        // Others are defaults
        assert_eq!(config.game.capacity, 8);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
capacity = 0
"#
        )
        .unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config
            .validate()
            .expect("roundtripped config should be valid");
    }
}
