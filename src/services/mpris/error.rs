use zbus::fdo;

use super::PlayerId;

/// Errors that can occur while talking to media players
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    /// The player's bus identity no longer exists
    #[error("Player {0} is no longer on the bus")]
    RemoteUnavailable(PlayerId),

    /// Any other failure while calling the player
    #[error("D-Bus call to {player} failed: {source}")]
    RemoteError {
        /// Player the call was addressed to
        player: PlayerId,
        /// Underlying transport error
        #[source]
        source: zbus::Error,
    },

    /// D-Bus communication error not tied to a player
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Failed to initialize the controller
    #[error("Failed to initialize controller: {0}")]
    InitializationFailed(String),
}

impl MediaError {
    /// Sort a transport error raised while addressing `player`.
    ///
    /// `ServiceUnknown` and `NameHasNoOwner` mean the player is gone; every
    /// other failure is a plain remote error.
    pub fn from_player_call(player: &PlayerId, source: zbus::Error) -> Self {
        if is_unavailable(&source) {
            Self::RemoteUnavailable(player.clone())
        } else {
            Self::RemoteError {
                player: player.clone(),
                source,
            }
        }
    }

    /// Whether this error means the player has left the bus.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_))
    }
}

const UNAVAILABLE_ERROR_NAMES: [&str; 2] = [
    "org.freedesktop.DBus.Error.ServiceUnknown",
    "org.freedesktop.DBus.Error.NameHasNoOwner",
];

fn is_unavailable(error: &zbus::Error) -> bool {
    match error {
        zbus::Error::MethodError(name, _, _) => UNAVAILABLE_ERROR_NAMES.contains(&name.as_str()),
        zbus::Error::FDO(error) => matches!(
            **error,
            fdo::Error::ServiceUnknown(_) | fdo::Error::NameHasNoOwner(_)
        ),
        _ => false,
    }
}
