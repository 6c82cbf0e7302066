use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::editor::DEFAULT_HIT_TOLERANCE;
use crate::pdf::DEFAULT_CACHE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid colour {0:?}, expected six hex digits like \"FF0000\"")]
    InvalidColor(String),
}

/// RGB colour written as six hex digits, with or without a leading `#`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    pub const RED: Self = Self([0xFF, 0x00, 0x00]);

    pub fn parse(value: &str) -> Result<Self, SettingsError> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SettingsError::InvalidColor(value.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| SettingsError::InvalidColor(value.to_string()))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for HexColor {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Distance in view pixels within which a press grabs a rectangle edge
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: i32,

    #[serde(default = "default_overlay_color")]
    pub overlay_color: HexColor,

    #[serde(default = "default_background_color")]
    pub background_color: HexColor,

    /// Directory the file picker opens in; the home directory when unset
    #[serde(default)]
    pub start_dir: Option<PathBuf>,

    #[serde(default = "default_page_cache_size")]
    pub page_cache_size: usize,

    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

fn default_hit_tolerance() -> i32 {
    DEFAULT_HIT_TOLERANCE
}

fn default_overlay_color() -> HexColor {
    HexColor::RED
}

fn default_background_color() -> HexColor {
    HexColor([0x20, 0x20, 0x20])
}

fn default_page_cache_size() -> usize {
    DEFAULT_CACHE_SIZE
}

fn default_notification_secs() -> u64 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hit_tolerance: default_hit_tolerance(),
            overlay_color: default_overlay_color(),
            background_color: default_background_color(),
            start_dir: None,
            page_cache_size: default_page_cache_size(),
            notification_secs: default_notification_secs(),
        }
    }
}

impl Settings {
    /// Read settings from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&content).map_err(|source| SettingsError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded settings from {path:?}");
        debug!("{settings:?}");
        Ok(settings)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserialises to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Directory the file picker opens in
    pub fn picker_root(&self) -> PathBuf {
        self.start_dir
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_keys_take_defaults() {
        let settings = Settings::from_yaml("hit_tolerance: 5\n").unwrap();
        assert_eq!(settings.hit_tolerance, 5);
        assert_eq!(settings.overlay_color, HexColor::RED);
        assert_eq!(settings.page_cache_size, DEFAULT_CACHE_SIZE);
        assert_eq!(settings.start_dir, None);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let settings = Settings::from_yaml("  \n").unwrap();
        assert_eq!(settings.hit_tolerance, DEFAULT_HIT_TOLERANCE);
        assert_eq!(settings.notification_secs, 5);
    }

    #[test]
    fn colours_accept_optional_hash() {
        let settings =
            Settings::from_yaml("overlay_color: \"#00ff80\"\nbackground_color: \"000000\"\n")
                .unwrap();
        assert_eq!(settings.overlay_color, HexColor([0x00, 0xFF, 0x80]));
        assert_eq!(settings.background_color, HexColor([0, 0, 0]));
    }

    #[test]
    fn malformed_colour_is_rejected() {
        assert!(Settings::from_yaml("overlay_color: \"red\"\n").is_err());
        assert!(HexColor::parse("FF00").is_err());
        assert!(HexColor::parse("GG0000").is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings = Settings::from_yaml("theme: dark\nhit_tolerance: 2\n").unwrap();
        assert_eq!(settings.hit_tolerance, 2);
    }

    #[test]
    fn load_reads_file_and_reports_path_on_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "start_dir: /tmp/papers").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.picker_root(), PathBuf::from("/tmp/papers"));

        let missing = file.path().with_extension("missing");
        match Settings::load(&missing) {
            Err(SettingsError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
