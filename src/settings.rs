use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming an alternative settings file.
pub const SETTINGS_ENV: &str = "SNAKE3D_SETTINGS";
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// PNG atlas of 16 x 16 ASCII cells; the builtin font is used when unset.
    pub font_path: Option<PathBuf>,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub show_fps: bool,
    pub food_count: usize,
    /// Milliseconds between two simulation ticks.
    pub tick_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Snake 3D".to_string(),
            font_path: None,
            fov: 70.0,
            show_fps: true,
            food_count: 8,
            tick_millis: 16,
        }
    }
}

impl Settings {
    /// Reads `$SNAKE3D_SETTINGS`, falling back to `settings.json`.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        Self::load(&path)
    }

    /// A missing file gives the defaults, a malformed one is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::info!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_the_other_defaults() {
        let settings = Settings::parse(r#"{ "width": 1024, "show_fps": false }"#).unwrap();
        assert_eq!(settings.width, 1024);
        assert!(!settings.show_fps);
        assert_eq!(settings.height, 800);
        assert_eq!(settings.food_count, 8);
        assert_eq!(settings.font_path, None);
    }

    #[test]
    fn font_path_is_read_as_a_path() {
        let settings = Settings::parse(r#"{ "font_path": "res/font/ascii.png" }"#).unwrap();
        assert_eq!(settings.font_path, Some(PathBuf::from("res/font/ascii.png")));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Settings::parse("{ width: ").is_err());
        assert!(Settings::parse(r#"{ "width": "wide" }"#).is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
