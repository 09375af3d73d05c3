use crate::label::labels;
use crate::picker::PickerOptions;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ViewConfig {
    /// Turn the arc so the active label faces the top.
    #[serde(default = "default_follow_active")]
    pub follow_active: bool,
    #[serde(default = "default_window_size")]
    pub width: i32,
    #[serde(default = "default_window_size")]
    pub height: i32,
}

fn default_follow_active() -> bool {
    true
}

fn default_window_size() -> i32 {
    480
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            follow_active: default_follow_active(),
            width: default_window_size(),
            height: default_window_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub picker: PickerOptions,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Config {
    /// Used until the user writes a config file of their own.
    pub fn sample() -> Self {
        Self {
            picker: PickerOptions::with_items(labels([
                "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun",
            ])),
            view: ViewConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcpick", "arcpick").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("ARCPICK")
        .prefix_separator("_")
        .separator("__")
}

/// Reads `path` (or the default location) layered under `ARCPICK_*` environment overrides, e.g.
/// `ARCPICK_PICKER__FONT_SIZE=3`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::from(get_config_path()?).required(false),
    };
    load_layered(file, environment())
}

fn load_layered<S>(file: S, env: config::Environment) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let s = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

/// A config without items borrows the sample list and keeps everything else.
fn with_sample_items(mut config: Config) -> Config {
    if config.picker.items.is_empty() {
        log::debug!("Config has no picker items, using the sample list");
        config.picker.items = Config::sample().picker.items;
    }
    config
}

/// Loads the default config location, which may not exist yet. Environment overrides apply
/// either way.
pub fn load_or_sample() -> Config {
    match load_config(None) {
        Ok(c) => with_sample_items(c),
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            Config::sample()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StartOffset;
    use crate::label::Label;

    fn from_toml(s: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(s, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_parses_to_sample() {
        assert_eq!(from_toml(DEFAULT_CONFIG), Config::sample());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = from_toml("[picker]\nitems = [\"A\", \"B\"]\n");
        assert_eq!(config.picker.items, vec![Label::from("A"), Label::from("B")]);
        assert_eq!(config.picker.font_size, 2.0);
        assert_eq!(config.picker.start_offset, StartOffset::Length(0.0));
        assert_eq!(config.picker.default_active, 0);
        assert!(config.view.follow_active);
    }

    #[test]
    fn test_start_offset_variants() {
        let cases = vec![
            ("\"0\"", StartOffset::Length(0.0)),
            ("\"7.5\"", StartOffset::Length(7.5)),
            ("\"10%\"", StartOffset::Percent(10.0)),
        ];

        for (value, expected) in cases {
            let config = from_toml(&format!(
                "[picker]\nitems = [\"A\"]\nstart_offset = {value}\n"
            ));
            assert_eq!(config.picker.start_offset, expected);
        }
    }

    fn missing_file() -> impl config::Source + Send + Sync + 'static {
        config::File::from(PathBuf::from("/nonexistent/arcpick/config.toml")).required(false)
    }

    fn env_with(vars: &[(&str, &str)]) -> config::Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_env_overrides_apply_without_file() {
        let config = load_layered(
            missing_file(),
            env_with(&[("ARCPICK_PICKER__FONT_SIZE", "3")]),
        )
        .unwrap();
        assert_eq!(config.picker.font_size, 3.0);

        let config = with_sample_items(config);
        assert_eq!(config.picker.items, Config::sample().picker.items);
        assert_eq!(config.picker.font_size, 3.0);
    }

    #[test]
    fn test_missing_file_without_env_is_sample() {
        let config = with_sample_items(load_layered(missing_file(), env_with(&[])).unwrap());
        assert_eq!(config, Config::sample());
    }

    #[test]
    fn test_items_from_config_are_kept() {
        let config = with_sample_items(from_toml("[picker]\nitems = [\"A\"]\n"));
        assert_eq!(config.picker.items, vec![Label::from("A")]);
    }

    #[test]
    fn test_options_from_json() {
        let options: PickerOptions = serde_json::from_str(
            r#"{"items": ["x", "y", "z"], "font_size": 3.5, "start_offset": "25%", "default_active": 2}"#,
        )
        .unwrap();
        assert_eq!(options.items.len(), 3);
        assert_eq!(options.font_size, 3.5);
        assert_eq!(options.start_offset, StartOffset::Percent(25.0));
        assert_eq!(options.default_active, 2);
    }
}
