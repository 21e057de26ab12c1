//! Game configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "spincube.toml";

pub const DEFAULT_TEXTURE_URL: &str =
    "https://threejsfundamentals.org/threejs/resources/images/star.png";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level game settings. Every field has a default, so a partial file
/// only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    /// Image mapped onto the spinning cube.
    pub texture_url: String,
    /// UI font candidates, first loadable file wins.
    pub font_paths: Vec<PathBuf>,
    /// `env_logger` filter; `RUST_LOG` applies when unset.
    pub log_filter: Option<String>,
    /// Background as `0xRRGGBB`.
    pub clear_color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial logical size.
    pub width: f64,
    pub height: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "spincube".to_string(), width: 800.0, height: 600.0 }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            texture_url: DEFAULT_TEXTURE_URL.to_string(),
            font_paths: [
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/noto/NotoSans-Regular.ttf",
                "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
                "/System/Library/Fonts/Helvetica.ttc",
                "C:\\Windows\\Fonts\\arial.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            log_filter: None,
            clear_color: 0x000000,
        }
    }
}

impl GameConfig {
    pub fn from_toml(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io { path: path.to_path_buf(), source }),
        }
    }

    /// Config path from the first CLI argument, else [`DEFAULT_CONFIG_FILE`].
    pub fn path_from_args(mut args: impl Iterator<Item = String>) -> PathBuf {
        args.nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let config = GameConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = GameConfig::from_toml(Path::new("mem.toml"), &text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let text = "texture_url = \"file:///tmp/star.png\"\n[window]\nwidth = 1024.0\n";
        let config = GameConfig::from_toml(Path::new("mem.toml"), text).unwrap();

        assert_eq!(config.texture_url, "file:///tmp/star.png");
        assert_eq!(config.window.width, 1024.0);
        assert_eq!(config.window.height, 600.0);
        assert_eq!(config.clear_color, 0x000000);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = GameConfig::load(Path::new("/definitely/not/here/spincube.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let err = GameConfig::from_toml(Path::new("bad.toml"), "window = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn first_argument_selects_config_path() {
        let args = ["spincube", "custom.toml"].into_iter().map(String::from);
        assert_eq!(GameConfig::path_from_args(args), PathBuf::from("custom.toml"));

        let args = ["spincube"].into_iter().map(String::from);
        assert_eq!(GameConfig::path_from_args(args), PathBuf::from(DEFAULT_CONFIG_FILE));
    }
}
