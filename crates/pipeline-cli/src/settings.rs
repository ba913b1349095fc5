//! Runner settings

use config::{Config, ConfigError, Environment, File};
use feature_engine::FeatureConfig;
use preprocessing::PreprocessConfig;
use sensor_table::Schema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `SENSOR_FEATURES__FEATURES__WINDOW_SIZE=40`
pub const ENV_PREFIX: &str = "SENSOR_FEATURES";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Maximum level (`trace`, `debug`, `info`, `warn`, `error`)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete runner configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Structural column names
    pub schema: Schema,
    /// Preprocessing stages
    pub preprocess: PreprocessConfig,
    /// Feature stages
    pub features: FeatureConfig,
    /// Explicit channel selection (default: every numeric column)
    pub channels: Option<Vec<String>>,
    /// Logging
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load defaults, then the optional config file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("channels"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Run `f` with the given variables set; env-reading tests are serialized
    pub(crate) fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let result = f();
        for (key, _) in vars {
            std::env::remove_var(key);
        }
        result
    }

    pub(crate) fn write_toml(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("settings.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.schema.time_column, "Time");
        assert!(settings.preprocess.clean);
        assert_eq!(settings.features.window_size, 20);
        assert!(settings.channels.is_none());
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = Config::builder()
            .add_source(File::from_str(
                r#"
                channels = ["torque", "speed"]

                [features]
                window_size = 40
                include_frequency = true

                [preprocess]
                normalize = false
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.features.window_size, 40);
        assert!(settings.features.include_frequency);
        assert!(settings.features.include_rolling);
        assert!(!settings.preprocess.normalize);
        assert!(settings.preprocess.clean);
        assert_eq!(settings.channels, Some(vec!["torque".to_string(), "speed".to_string()]));
        assert_eq!(settings.schema, Schema::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(
            dir.path(),
            r#"
            [schema]
            time_column = "Timestamp"

            [preprocess]
            iqr_multiplier = 3.0

            [logging]
            json = true
            "#,
        );

        let settings = with_env(&[], || Settings::load(Some(path.as_path()))).unwrap();

        assert_eq!(settings.schema.time_column, "Timestamp");
        assert_eq!(settings.schema.label_column, "label");
        assert_eq!(settings.preprocess.iqr_multiplier, 3.0);
        assert!(settings.logging.json);
        assert_eq!(settings.features, FeatureConfig::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_toml(
            dir.path(),
            r#"
            channels = ["pressure"]

            [features]
            window_size = 30
            include_frequency = true

            [preprocess]
            normalize = true
            "#,
        );

        let vars = [
            ("SENSOR_FEATURES__FEATURES__WINDOW_SIZE", "40"),
            ("SENSOR_FEATURES__CHANNELS", "torque,speed"),
            ("SENSOR_FEATURES__PREPROCESS__NORMALIZE", "false"),
        ];
        let settings = with_env(&vars, || Settings::load(Some(path.as_path()))).unwrap();

        assert_eq!(settings.features.window_size, 40);
        assert_eq!(
            settings.channels,
            Some(vec!["torque".to_string(), "speed".to_string()])
        );
        assert!(!settings.preprocess.normalize);
        // file values the environment does not touch
        assert!(settings.features.include_frequency);
        assert!(settings.preprocess.clean);
    }

    #[test]
    fn test_env_without_file() {
        let vars = [("SENSOR_FEATURES__LOGGING__LEVEL", "debug")];
        let settings = with_env(&vars, || Settings::load(None)).unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.features.window_size, 20);
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(with_env(&[], || Settings::load(Some(path.as_path()))).is_err());
    }
}
