use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

#[cfg(windows)]
pub const DEFAULT_PORT: &str = "COM6";
#[cfg(not(windows))]
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

pub const DEFAULT_BAUD: u32 = 115200;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 200;

const SETTINGS_FILE: &str = "dac_panel_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub port_name: String,
    pub baud_rate: u32,
    /// Only bounds implicit I/O waits; the panel never reads.
    pub read_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl Settings {
    /// Built-in defaults, overridden by the JSON file next to the executable if present.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => {
                info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    fn config_path() -> PathBuf {
        let mut path = std::env::current_exe().unwrap_or_default();
        path.pop();
        path.push(SETTINGS_FILE);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.port_name, DEFAULT_PORT);
        assert_eq!(settings.baud_rate, 115200);
        assert_eq!(settings.read_timeout(), Duration::from_millis(200));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join(SETTINGS_FILE));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "port_name": "/dev/ttyUSB3" }"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.port_name, "/dev/ttyUSB3");
        assert_eq!(settings.baud_rate, DEFAULT_BAUD);
        assert_eq!(settings.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
