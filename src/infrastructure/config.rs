use std::path::{Path, PathBuf};

use config::ConfigError;
use serde::Deserialize;

use crate::{
    infrastructure::rewards::DEFAULT_REWARDS_BASE_URL, presentation::config::keybindings,
    utils,
};

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: keybindings::KeyBindings,
    /// Chat user the client connects as.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_rewards_base_url")]
    pub rewards_base_url: String,
    #[serde(default)]
    pub experimental: ExperimentalConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            keybindings: keybindings::KeyBindings::default(),
            user_id: None,
            rewards_base_url: default_rewards_base_url(),
            experimental: ExperimentalConfig::default(),
        }
    }
}

fn default_rewards_base_url() -> String {
    DEFAULT_REWARDS_BASE_URL.to_string()
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExperimentalConfig {
    /// Seed two demo livestream channels when none exist.
    #[serde(default = "enabled")]
    pub mock_channels: bool,
}

fn enabled() -> bool {
    true
}

impl Default for ExperimentalConfig {
    fn default() -> Self {
        Self {
            mock_channels: true,
        }
    }
}

impl Config {
    /// The configuration embedded in the binary.
    pub fn default_config() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }

    /// Loads the user configuration on top of the embedded one.
    ///
    /// A missing configuration file is not an error; the embedded defaults
    /// are used as-is.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(&utils::get_config_dir(), &utils::get_data_dir())
    }

    pub fn load_from(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        let default_config = Self::default_config()?;
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let path = config_dir.join(file);
            if path.exists() {
                found_config = true;
            }
            builder = builder.add_source(config::File::from(path).format(*format).required(false));
        }
        if !found_config {
            log::info!(
                "No configuration file in {}, using defaults",
                config_dir.display()
            );
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // User bindings win, defaults fill the remaining keys.
        for (key, action) in default_config.keybindings.iter() {
            cfg.keybindings.entry(*key).or_insert(*action);
        }

        if cfg.user_id.is_none() {
            cfg.user_id.clone_from(&default_config.user_id);
        }

        if cfg.rewards_base_url.is_empty() {
            return Err(ConfigError::NotFound(String::from("rewards_base_url")));
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::presentation::config::Action;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default_config().unwrap();

        assert_eq!(cfg.user_id.as_deref(), Some("viewer"));
        assert_eq!(cfg.rewards_base_url, DEFAULT_REWARDS_BASE_URL);
        assert!(cfg.experimental.mock_channels);
        assert_eq!(cfg.keybindings.action_for(&key('g')), Some(Action::GoLive));
        assert_eq!(
            cfg.keybindings
                .action_for(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::NavigateUp)
        );
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(dir.path(), &dir.path().join("data")).unwrap();

        assert_eq!(cfg.config._config_dir, dir.path());
        assert_eq!(cfg.config._data_dir, dir.path().join("data"));
        assert_eq!(cfg.keybindings.action_for(&key('q')), Some(Action::Quit));
        assert_eq!(cfg.user_id.as_deref(), Some("viewer"));
    }

    #[test]
    fn test_user_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json5"),
            r#"{
                "keybindings": { "<x>": "Quit", "<q>": "GoLive" },
                "user_id": "alice",
                "experimental": { "mock_channels": false },
            }"#,
        )
        .unwrap();

        let cfg = Config::load_from(dir.path(), dir.path()).unwrap();

        assert_eq!(cfg.user_id.as_deref(), Some("alice"));
        assert!(!cfg.experimental.mock_channels);
        assert_eq!(cfg.keybindings.action_for(&key('x')), Some(Action::Quit));
        assert_eq!(cfg.keybindings.action_for(&key('q')), Some(Action::GoLive));
        // Unbound keys keep their defaults.
        assert_eq!(cfg.keybindings.action_for(&key('w')), Some(Action::WatchLivestream));
    }
}
