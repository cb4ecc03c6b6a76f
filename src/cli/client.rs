use std::{
    collections::HashMap,
    env,
    os::unix::process::CommandExt,
    process::{Command, Stdio},
    time::Duration,
};

use tracing::{debug, info, instrument};
use zbus::{
    Connection, fdo,
    names::{BusName, WellKnownName},
    zvariant::OwnedValue,
};

use crate::{
    ControllerError, Result,
    services::mpris::{ControlDaemonProxy, DAEMON_BUS_NAME, PlaybackState, TrackMetadata},
};

/// Pauses between checks for a freshly spawned daemon.
pub const AUTOSTART_WAITS: [Duration; 6] = [
    Duration::from_millis(200),
    Duration::from_millis(300),
    Duration::from_millis(400),
    Duration::from_millis(400),
    Duration::from_millis(1200),
    Duration::from_millis(2300),
];

/// Session bus client for the controller daemon.
pub struct DaemonClient {
    connection: Connection,
    autostart: bool,
}

impl DaemonClient {
    /// Connect to the session bus.
    ///
    /// With `autostart` set, the first call that finds no daemon spawns one.
    ///
    /// # Errors
    /// Returns error if the session bus cannot be reached
    pub async fn connect(autostart: bool) -> Result<Self> {
        let connection = Connection::session().await?;

        Ok(Self {
            connection,
            autostart,
        })
    }

    /// Toggle playback.
    ///
    /// # Errors
    /// Returns error if no daemon is reachable or the call fails
    pub async fn play_pause(&self) -> Result<()> {
        Ok(self.proxy().await?.play_pause().await?)
    }

    /// Skip forward.
    ///
    /// # Errors
    /// Returns error if no daemon is reachable or the call fails
    pub async fn next(&self) -> Result<()> {
        Ok(self.proxy().await?.next().await?)
    }

    /// Skip back.
    ///
    /// # Errors
    /// Returns error if no daemon is reachable or the call fails
    pub async fn previous(&self) -> Result<()> {
        Ok(self.proxy().await?.previous().await?)
    }

    /// Playback status of the current player, `None` when there is none.
    ///
    /// # Errors
    /// Returns error if no daemon is reachable or the call fails
    pub async fn status(&self) -> Result<Option<PlaybackState>> {
        let status = self.proxy().await?.status().await?;

        Ok((!status.is_empty()).then(|| PlaybackState::from(status.as_str())))
    }

    /// Track metadata of the current player, `None` when there is none.
    ///
    /// # Errors
    /// Returns error if no daemon is reachable or the call fails
    pub async fn metadata(&self) -> Result<Option<TrackMetadata>> {
        let metadata: HashMap<String, OwnedValue> = self.proxy().await?.metadata().await?;

        Ok((!metadata.is_empty()).then(|| TrackMetadata::from(metadata)))
    }

    /// Ask the daemon to exit. Does nothing when no daemon is running.
    ///
    /// # Errors
    /// Returns error if the call fails
    pub async fn quit(&self) -> Result<()> {
        if !self.daemon_up().await? {
            debug!("No daemon running");
            return Ok(());
        }

        let proxy = ControlDaemonProxy::new(&self.connection).await?;
        Ok(proxy.quit().await?)
    }

    async fn proxy(&self) -> Result<ControlDaemonProxy<'static>> {
        self.ensure_daemon().await?;

        Ok(ControlDaemonProxy::new(&self.connection).await?)
    }

    #[instrument(skip(self))]
    async fn ensure_daemon(&self) -> Result<()> {
        if self.daemon_up().await? {
            return Ok(());
        }

        if !self.autostart {
            return Err(ControllerError::DaemonUnavailable(format!(
                "{DAEMON_BUS_NAME} is not running"
            )));
        }

        spawn_daemon()?;

        for wait in AUTOSTART_WAITS {
            tokio::time::sleep(wait).await;

            if self.daemon_up().await? {
                info!("Daemon started");
                return Ok(());
            }
        }

        Err(ControllerError::DaemonUnavailable(format!(
            "{DAEMON_BUS_NAME} did not appear after starting the daemon"
        )))
    }

    async fn daemon_up(&self) -> Result<bool> {
        let dbus = fdo::DBusProxy::new(&self.connection).await?;
        let name = BusName::from(WellKnownName::from_static_str_unchecked(DAEMON_BUS_NAME));

        dbus.name_has_owner(name)
            .await
            .map_err(|e| ControllerError::DaemonCall(e.into()))
    }
}

fn spawn_daemon() -> Result<()> {
    let exe = env::current_exe()?;
    debug!("Starting daemon from {}", exe.display());

    Command::new(exe)
        .arg("daemon")
        .current_dir("/")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()?;

    Ok(())
}
