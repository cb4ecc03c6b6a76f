use std::{
    env,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_DIR: &str = "mpris-controller";

/// Utility struct for managing configuration and state paths
///
/// Follows the XDG Base Directory layout
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application
    ///
    /// - First checks `XDG_CONFIG_HOME`
    /// - Falls back to `$HOME/.config`
    /// - Appends "mpris-controller" to the base config directory
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` environment variables are set
    pub fn config_dir() -> Result<PathBuf, Error> {
        Self::xdg_dir("XDG_CONFIG_HOME", ".config")
    }

    /// Returns the path to the main configuration file
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be determined
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the daemon's log directory
    ///
    /// Lives under `XDG_STATE_HOME` (falling back to `$HOME/.local/state`).
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if the directory cannot be determined or created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = Self::xdg_dir("XDG_STATE_HOME", ".local/state")?.join("logs");

        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir)?;
        }

        Ok(log_dir)
    }

    fn xdg_dir(variable: &str, home_fallback: &str) -> Result<PathBuf, Error> {
        let base = env::var(variable)
            .ok()
            .filter(|value| !value.is_empty())
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| format!("{home}/{home_fallback}"))
            })
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::NotFound,
                    format!("Neither {variable} nor HOME environment variable found"),
                )
            })?;

        Ok(PathBuf::from(base).join(APP_DIR))
    }
}
