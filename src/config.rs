use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::settings::Settings;

pub const CONFIG_FILE: &str = "blockyard.toml";

/// Startup configuration, read once from `blockyard.toml` in the working
/// directory. A missing file means defaults; a file that fails to parse is
/// a startup error rather than something to silently paper over.
#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub video: VideoConfig,
    pub controls: ControlsConfig,
    pub audio: AudioConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "blockyard".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub fov: f32,
    pub fps_cap: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        let defaults = Settings::default();
        Self {
            fov: defaults.fov_degrees,
            fps_cap: defaults.fps_cap,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub mouse_sensitivity: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: Settings::default().mouse_sensitivity,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music: bool,
    pub music_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music: true,
            music_volume: 0.3,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("no {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config =
            toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Initial slider values, forced into the slider ranges.
    pub fn initial_settings(&self) -> Settings {
        Settings {
            fov_degrees: self.video.fov,
            mouse_sensitivity: self.controls.mouse_sensitivity,
            fps_cap: self.video.fps_cap,
        }
        .clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.window.title, "blockyard");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.video.fov, 80.0);
        assert_eq!(config.video.fps_cap, 60);
        assert_eq!(config.controls.mouse_sensitivity, 50.0);
        assert!(config.audio.music);
        assert_eq!(config.audio.music_volume, 0.3);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [video]
            fov = 100.0

            [window]
            title = "test window"
            "#,
        )
        .unwrap();
        assert_eq!(config.window.title, "test window");
        assert_eq!(config.window.height, 720);
        assert_eq!(config.video.fov, 100.0);
        assert_eq!(config.video.fps_cap, 60);
    }

    #[test]
    fn test_initial_settings_are_clamped() {
        let config: Config = toml::from_str(
            r#"
            [video]
            fov = 200.0
            fps_cap = 5

            [controls]
            mouse_sensitivity = 9000.0
            "#,
        )
        .unwrap();
        let settings = config.initial_settings();
        assert_eq!(settings.fov_degrees, 120.0);
        assert_eq!(settings.fps_cap, 30);
        assert_eq!(settings.mouse_sensitivity, 100.0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(toml::from_str::<Config>("video = \"not a table\"").is_err());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let config = Config::load_from(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.window.width, 1280);
    }
}
