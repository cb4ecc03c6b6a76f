use std::fmt;

use tokio::sync::{mpsc, oneshot};

use super::{BusEvent, MediaError, PlaybackState, PlayerId, PlayerMethod, TrackMetadata};

/// Sending half of the controller's event channel.
pub type EventSender = mpsc::Sender<ControllerEvent>;

/// Receiving half of the controller's event channel.
pub type EventReceiver = mpsc::Receiver<ControllerEvent>;

/// Queue depth of the controller's event channel.
pub const EVENT_QUEUE_DEPTH: usize = 64;

/// Create the controller's event channel.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::channel(EVENT_QUEUE_DEPTH)
}

/// Everything the controller loop reacts to, one at a time.
#[derive(Debug)]
pub enum ControllerEvent {
    /// A notification from the message bus
    Bus(BusEvent),

    /// A fire-and-forget invocation failed after it was dispatched
    InvocationFailed {
        /// Player the call was addressed to
        player: PlayerId,
        /// Method that failed
        method: PlayerMethod,
        /// Reason reported by the bus
        error: MediaError,
    },

    /// A command from the control interface
    Request(ControlRequest),
}

/// Commands accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pause everything playing, or resume the most recently stopped player
    PlayPause,
    /// Skip forward on the current player
    Next,
    /// Skip back on the current player
    Previous,
    /// Read the current player's playback status
    Status,
    /// Read the current player's track metadata
    Metadata,
    /// Stop the controller
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlayPause => "PlayPause",
            Self::Next => "Next",
            Self::Previous => "Previous",
            Self::Status => "Status",
            Self::Metadata => "Metadata",
            Self::Quit => "Quit",
        };
        f.write_str(name)
    }
}

/// Answer to a [`Command`].
#[derive(Debug, PartialEq)]
pub enum CommandReply {
    /// The command was dispatched
    Done,
    /// Playback status of the head player, if there is one
    Status(Option<PlaybackState>),
    /// Track metadata of the head player, if there is one
    Metadata(Option<TrackMetadata>),
}

/// A command paired with the channel its reply goes back on.
#[derive(Debug)]
pub struct ControlRequest {
    /// Command to run
    pub command: Command,
    /// Where to send the answer
    pub reply: oneshot::Sender<CommandReply>,
}

impl ControlRequest {
    /// Build a request and the receiver its reply will arrive on.
    pub fn new(command: Command) -> (Self, oneshot::Receiver<CommandReply>) {
        let (reply, receiver) = oneshot::channel();
        (Self { command, reply }, receiver)
    }
}
