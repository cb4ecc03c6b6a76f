use std::fmt;

use serde::Serialize;

use super::TrackMetadata;

/// Prefix shared by every MPRIS player's well-known bus name.
pub const MPRIS_NAME_PREFIX: &str = "org.mpris.MediaPlayer2";

/// Object path every MPRIS player exports its interfaces on.
pub const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";

/// Interface carrying playback controls and playback properties.
pub const MPRIS_PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Whether a well-known bus name belongs to an MPRIS player.
pub fn is_mpris_player(name: &str) -> bool {
    name.starts_with(MPRIS_NAME_PREFIX)
}

/// Current bus ownership identity of a media player.
///
/// Wraps the unique connection name (e.g. `:1.42`) that owns the player's
/// well-known name. The owner may change while the logical player lives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a PlayerId from a D-Bus bus name
    pub fn from_bus_name(bus_name: &str) -> Self {
        Self(bus_name.to_string())
    }

    /// Get the D-Bus bus name
    pub fn bus_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current playback state of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackState {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player is stopped
    Stopped,
}

impl PlaybackState {
    /// Whether this state puts a player in the playing set.
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

impl From<&str> for PlaybackState {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

impl From<PlaybackState> for &'static str {
    fn from(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Stopped => "Stopped",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).into())
    }
}

/// Control methods that can be invoked on a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerMethod {
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Skip to next track
    Next,
    /// Skip to previous track
    Previous,
}

impl fmt::Display for PlayerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
            Self::Next => "Next",
            Self::Previous => "Previous",
        };
        f.write_str(name)
    }
}

/// Player properties the controller reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerProperty {
    /// `PlaybackStatus`
    PlaybackStatus,
    /// `Metadata`
    Metadata,
}

impl fmt::Display for PlayerProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlaybackStatus => f.write_str("PlaybackStatus"),
            Self::Metadata => f.write_str("Metadata"),
        }
    }
}

/// Value returned from a property read.
#[derive(Debug, PartialEq)]
pub enum PropertyValue {
    /// Value of `PlaybackStatus`
    PlaybackStatus(PlaybackState),
    /// Value of `Metadata`
    Metadata(TrackMetadata),
}

/// Bus signals the controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// `org.freedesktop.DBus.Properties.PropertiesChanged` on the MPRIS path
    PropertiesChanged,
    /// `org.freedesktop.DBus.NameOwnerChanged` from the bus daemon
    OwnerChanged,
}

/// Notification delivered by the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum BusEvent {
    /// A player reported changed properties.
    PropertiesChanged {
        /// Unique name of the emitting connection
        sender: PlayerId,
        /// Interface whose properties changed
        interface: String,
        /// New `PlaybackStatus`, when the change carried one
        playback_status: Option<PlaybackState>,
    },

    /// Ownership of a bus name changed.
    OwnerChanged {
        /// The name whose owner changed
        name: String,
        /// Previous owner, if any
        old_owner: Option<PlayerId>,
        /// New owner, if any
        new_owner: Option<PlayerId>,
    },
}
