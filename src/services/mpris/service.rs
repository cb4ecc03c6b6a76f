use std::{sync::Arc, time::Duration};

use regex::Regex;
use tracing::{info, instrument};
use zbus::connection;

use super::{
    ControlInterface, Controller, DAEMON_BUS_NAME, DAEMON_PATH, MediaError, ZbusBus,
    event_channel,
};

/// Time given to the bus to flush the reply to `Quit` before the process exits.
const QUIT_FLUSH_DELAY: Duration = Duration::from_millis(100);

/// Configuration for the controller service
#[derive(Default)]
pub struct Config {
    /// Patterns matched against well-known names of players to leave alone
    pub ignored_players: Vec<Regex>,
}

/// The controller daemon on the session bus.
pub struct ControllerService;

impl ControllerService {
    /// Claim the daemon's bus name, serve the control interface and run the
    /// controller until it is asked to quit.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InitializationFailed` if the session bus cannot be
    /// reached or the bus name is already owned
    #[instrument(skip(config))]
    pub async fn run(config: Config) -> Result<(), MediaError> {
        info!("Starting MPRIS controller");

        let (events_tx, events_rx) = event_channel();

        let connection = connection::Builder::session()
            .and_then(|builder| builder.name(DAEMON_BUS_NAME))
            .and_then(|builder| builder.serve_at(DAEMON_PATH, ControlInterface::new(events_tx.clone())))
            .map_err(|e| MediaError::InitializationFailed(format!("D-Bus connection failed: {e}")))?
            .build()
            .await
            .map_err(|e| {
                MediaError::InitializationFailed(format!("Failed to claim {DAEMON_BUS_NAME}: {e}"))
            })?;

        let bus = ZbusBus::new(connection.clone()).await?;
        let controller = Controller::new(Arc::new(bus), events_tx, config.ignored_players);

        controller.run(events_rx).await?;

        tokio::time::sleep(QUIT_FLUSH_DELAY).await;
        Ok(())
    }
}
