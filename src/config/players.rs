use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ControllerError, Result};

/// Player selection settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct PlayersConfig {
    /// Regular expressions matched against the player's well-known bus name
    /// (e.g. `org.mpris.MediaPlayer2.chromium.instance42`). Matching players
    /// are never controlled.
    #[serde(default)]
    pub ignored: Vec<String>,
}

impl PlayersConfig {
    /// Compile the ignore patterns.
    ///
    /// # Errors
    /// Returns `ControllerError::ConfigValidation` naming the first pattern
    /// that is not a valid regular expression
    pub fn ignore_patterns(&self) -> Result<Vec<Regex>> {
        self.ignored
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ControllerError::ConfigValidation {
                    component: "players.ignored".to_string(),
                    details: format!("invalid pattern '{pattern}': {e}"),
                })
            })
            .collect()
    }
}
