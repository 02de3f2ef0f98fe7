use std::env;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::summary::{DailyHours, reference_week};

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_TICK_MS: u64 = 1000;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    TomlDecode(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {err}"),
            ConfigError::TomlDecode(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tick_ms: u64,
    pub reference_week: Vec<DailyHours>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            reference_week: reference_week(),
        }
    }
}

impl AppConfig {
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Loads the config at `path`, falling back to defaults when the file does
/// not exist.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(err) => return Err(ConfigError::Io(err)),
    };

    if raw.trim().is_empty() {
        return Ok(AppConfig::default());
    }

    toml::from_str(&raw).map_err(ConfigError::TomlDecode)
}

pub fn resolve_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        return path;
    }

    if let Some(path) = env::var_os("PUNCHBOARD_CONFIG") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    config_dir().join(CONFIG_FILE)
}

fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(path) = env::var_os("APPDATA") {
            return PathBuf::from(path).join("punchboard");
        }
    }

    if let Some(path) = env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("punchboard");
    }

    if let Some(path) = env::var_os("HOME") {
        return PathBuf::from(path).join(".config").join("punchboard");
    }

    PathBuf::from(".punchboard")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{AppConfig, load_config};

    #[test]
    fn missing_file_yields_defaults() {
        let path = PathBuf::from("/nonexistent/punchboard/config.toml");
        let config = load_config(&path).expect("missing file should fall back");
        assert_eq!(config.tick_ms, 1000);
        assert_eq!(config.reference_week.len(), 7);
    }

    #[test]
    fn parses_overrides_and_keeps_defaults_for_the_rest() {
        let path = temp_file("punchboard_config_overrides.toml");
        fs::write(
            &path,
            "tick_ms = 250\n\n[[reference_week]]\nday = \"M\"\nhours = 4.5\n",
        )
        .expect("write should succeed");

        let config = load_config(&path).expect("load should succeed");
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.reference_week.len(), 1);
        assert_eq!(config.reference_week[0].hours, 4.5);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_malformed_toml() {
        let path = temp_file("punchboard_config_malformed.toml");
        fs::write(&path, "tick_ms = \"soon\"").expect("write should succeed");
        assert!(load_config(&path).is_err());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn tick_period_never_zero() {
        let config = AppConfig {
            tick_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.tick_period(), std::time::Duration::from_millis(1));
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("{}_{}", name, std::process::id()));
        path
    }
}
