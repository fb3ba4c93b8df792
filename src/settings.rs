use deepdown_engine::{MovementSettings, PhysicsConfig};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoSettings {
    /// Frames simulated by the headless demo.
    pub frames: u32,
    pub frame_rate: f32,
    pub max_steps_per_frame: u32,
    /// Size of the region of interest (the camera view) around the player.
    pub view_width: f32,
    pub view_height: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_rate: 60.0,
            max_steps_per_frame: 5,
            view_width: 320.0,
            view_height: 180.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsConfig,
    pub movement: MovementSettings,
    pub demo: DemoSettings,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deserialization Error: {0}")]
    Serde(#[from] toml::de::Error),

    #[error("Serialization Error: {0}")]
    SerdeSer(#[from] toml::ser::Error),

    #[error("Configuration Directory Not Found")]
    ConfigDirNotFound,
}

impl Settings {
    fn settings_dir() -> Result<PathBuf, SettingsError> {
        let config_dir = config_dir().ok_or(SettingsError::ConfigDirNotFound)?;
        Ok(config_dir.join("deepdown").join("settings"))
    }

    fn user_settings_path() -> Result<PathBuf, SettingsError> {
        Ok(Settings::settings_dir()?.join("user_settings.toml"))
    }

    fn default_settings_path() -> Result<PathBuf, SettingsError> {
        Ok(Settings::settings_dir()?.join("default_settings.toml"))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Writes the settings, creating parent directories as needed.
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// User settings, falling back to the defaults file and then to built-in defaults.
    /// Never fails: any error is logged and the built-in defaults are used.
    pub fn load_user_settings() -> Settings {
        match Settings::initialize_settings() {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Error initializing settings: {}", e);
                Settings::default()
            }
        }
    }

    fn initialize_settings() -> Result<Self, SettingsError> {
        let user_settings_path = Settings::user_settings_path()?;
        let default_settings_path = Settings::default_settings_path()?;

        if user_settings_path.exists() {
            match Settings::load_from_file(&user_settings_path) {
                Ok(settings) => Ok(settings),
                Err(e) => {
                    log::warn!(
                        "Failed to load user settings: {}. Attempting to load defaults.",
                        e
                    );
                    Settings::load_defaults(&user_settings_path, &default_settings_path)
                }
            }
        } else {
            log::info!("User settings not found. Loading default settings.");
            Settings::load_defaults(&user_settings_path, &default_settings_path)
        }
    }

    fn load_defaults(user_path: &Path, default_path: &Path) -> Result<Self, SettingsError> {
        if default_path.exists() {
            let settings = Settings::load_from_file(default_path)?;
            settings.save_to_file(user_path)?;
            log::info!("Default settings loaded and saved as user settings.");
            Ok(settings)
        } else {
            log::warn!("Default settings file not found. Using built-in defaults.");
            let settings = Settings::default();
            settings.save_to_file(default_path)?;
            settings.save_to_file(user_path)?;
            Ok(settings)
        }
    }
}
