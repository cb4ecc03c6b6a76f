//! Formatting utilities for CLI output.
//!
//! Query results are printed as JSON so they can be piped into status bars
//! and scripts; errors get terminal colors.

use serde::Serialize;

use crate::services::mpris::{PlaybackState, TrackMetadata};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Formats a playback status as a JSON string, or `null` when absent.
///
/// ```
/// use mpris_controller::{cli::formatting::format_status, services::mpris::PlaybackState};
///
/// assert_eq!(format_status(Some(PlaybackState::Paused)), "\"Paused\"");
/// assert_eq!(format_status(None), "null");
/// ```
pub fn format_status(status: Option<PlaybackState>) -> String {
    to_json(&status, false)
}

/// Formats track metadata as pretty JSON, or `null` when absent.
pub fn format_metadata(metadata: Option<&TrackMetadata>) -> String {
    to_json(&metadata, true)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    json.unwrap_or_else(|_| "null".to_string())
}
