//! Configuration schema definitions and loading.
//!
//! The configuration file is optional; every field has a default, so a
//! missing file and an empty file behave the same.

mod general;
mod loading;
mod paths;
mod players;

pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use players::PlayersConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the controller.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Which players the controller manages.
    #[serde(default)]
    pub players: PlayersConfig,
}

#[cfg(test)]
mod tests;
