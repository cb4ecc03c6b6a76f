use std::collections::HashMap;

use zbus::{
    fdo, interface, proxy,
    zvariant::{OwnedValue, Value},
};

use super::{Command, CommandReply, ControlRequest, ControllerEvent, EventSender};

/// Well-known bus name the daemon owns.
pub const DAEMON_BUS_NAME: &str = "org.mpriscontroller.Daemon";

/// Object path the control interface is served at.
pub const DAEMON_PATH: &str = "/org/mpriscontroller/Daemon";

/// D-Bus object exposing the controller's commands.
///
/// Each method turns into a [`ControlRequest`] on the controller's event
/// channel and waits for the answer.
pub struct ControlInterface {
    events: EventSender,
}

impl ControlInterface {
    /// Serve requests into `events`.
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }

    async fn request(&self, command: Command) -> fdo::Result<CommandReply> {
        let (request, reply) = ControlRequest::new(command);

        self.events
            .send(ControllerEvent::Request(request))
            .await
            .map_err(|_| fdo::Error::Failed("Controller is not running".to_string()))?;

        reply
            .await
            .map_err(|_| fdo::Error::Failed(format!("Controller dropped {command}")))
    }
}

#[interface(name = "org.mpriscontroller.Daemon")]
impl ControlInterface {
    /// Pause everything playing, or resume the most recently stopped player
    async fn play_pause(&self) -> fdo::Result<()> {
        self.request(Command::PlayPause).await.map(drop)
    }

    /// Skip forward on the only playing player
    async fn next(&self) -> fdo::Result<()> {
        self.request(Command::Next).await.map(drop)
    }

    /// Skip back on the only playing player
    async fn previous(&self) -> fdo::Result<()> {
        self.request(Command::Previous).await.map(drop)
    }

    /// Playback status of the current player, empty when there is none
    async fn status(&self) -> fdo::Result<String> {
        match self.request(Command::Status).await? {
            CommandReply::Status(Some(state)) => Ok(state.to_string()),
            _ => Ok(String::new()),
        }
    }

    /// Track metadata of the current player, empty when there is none
    async fn metadata(&self) -> fdo::Result<HashMap<String, Value<'static>>> {
        match self.request(Command::Metadata).await? {
            CommandReply::Metadata(Some(metadata)) => Ok(metadata.to_mpris_map()),
            _ => Ok(HashMap::new()),
        }
    }

    /// Stop the daemon
    async fn quit(&self) -> fdo::Result<()> {
        self.request(Command::Quit).await.map(drop)
    }
}

/// Client side of [`ControlInterface`].
#[proxy(
    interface = "org.mpriscontroller.Daemon",
    default_service = "org.mpriscontroller.Daemon",
    default_path = "/org/mpriscontroller/Daemon"
)]
pub trait ControlDaemon {
    /// Pause everything playing, or resume the most recently stopped player
    fn play_pause(&self) -> zbus::Result<()>;

    /// Skip forward on the only playing player
    fn next(&self) -> zbus::Result<()>;

    /// Skip back on the only playing player
    fn previous(&self) -> zbus::Result<()>;

    /// Playback status of the current player, empty when there is none
    fn status(&self) -> zbus::Result<String>;

    /// Track metadata of the current player, empty when there is none
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;

    /// Stop the daemon
    fn quit(&self) -> zbus::Result<()>;
}
