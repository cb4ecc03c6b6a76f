//! MPRIS controller - send media keys to the player that should get them.
//!
//! A small daemon on the session bus keeps track of which MPRIS players are
//! playing and which were most recently stopped, and routes play/pause,
//! next and previous accordingly:
//!
//! - play/pause pauses everything playing, or resumes the player that
//!   stopped last
//! - next/previous act on the only playing player, or the last stopped one
//!   when nothing plays, and do nothing when several players are playing
//! - status and metadata report on that same player
//!
//! The binary doubles as a client that calls the daemon, starting it on
//! demand.

/// Command-line interface and daemon client.
pub mod cli;

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Player tracking and command routing.
pub mod services;

/// Logging setup for the daemon and the client.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{ControllerError, Result};
