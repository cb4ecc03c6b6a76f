//! Command-line interface.
//!
//! Every command except `daemon` and `config-schema` is a thin client: it
//! calls the running daemon over the session bus, starting one first when
//! none is up.

mod client;
pub mod formatting;
mod service;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use client::{AUTOSTART_WAITS, DaemonClient};
pub use service::CliService;

/// Arguments accepted by the `mpris-controller` binary.
#[derive(Parser, Debug)]
#[command(name = "mpris-controller", version)]
#[command(about = "Route media keys to the MPRIS player that should receive them")]
pub struct Cli {
    /// Log at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Fail instead of starting a daemon when none is running
    #[arg(long, global = true)]
    pub no_autostart: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands of the `mpris-controller` binary.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    /// Run the controller daemon in the foreground
    Daemon,

    /// Commands run by a short-lived client process
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands handled by a short-lived client process.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    /// Pause everything playing, or resume the most recently stopped player
    PlayPause,
    /// Skip to the next track
    Next,
    /// Skip to the previous track
    Previous,
    /// Print the playback status of the current player as JSON
    Status,
    /// Print the track metadata of the current player as JSON
    Metadata,
    /// Stop the running daemon
    Quit,
    /// Print the JSON schema of the configuration file
    ConfigSchema,
}

#[cfg(test)]
mod tests;
