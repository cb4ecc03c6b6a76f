use tracing::instrument;

use super::{
    ClientCommand, DaemonClient,
    formatting::{format_metadata, format_status},
};
use crate::{Result, config::Config};

/// Runs client commands.
///
/// Commands that change playback print nothing; queries print JSON. The
/// session bus is only touched by commands that call the daemon.
pub struct CliService {
    autostart: bool,
}

impl CliService {
    /// Create a service; with `autostart` set a missing daemon is started.
    pub fn new(autostart: bool) -> Self {
        CliService { autostart }
    }

    /// Execute a single command and return what should be printed.
    ///
    /// # Errors
    /// Returns `ControllerError::DaemonUnavailable` if no daemon can be
    /// reached, or the underlying bus error if the call fails
    #[instrument(skip(self))]
    pub async fn execute(&self, command: ClientCommand) -> Result<String> {
        let output = match command {
            ClientCommand::PlayPause => {
                self.client().await?.play_pause().await?;
                String::new()
            }
            ClientCommand::Next => {
                self.client().await?.next().await?;
                String::new()
            }
            ClientCommand::Previous => {
                self.client().await?.previous().await?;
                String::new()
            }
            ClientCommand::Quit => {
                self.client().await?.quit().await?;
                String::new()
            }
            ClientCommand::Status => format_status(self.client().await?.status().await?),
            ClientCommand::Metadata => {
                format_metadata(self.client().await?.metadata().await?.as_ref())
            }
            ClientCommand::ConfigSchema => Config::json_schema()?,
        };

        Ok(output)
    }

    async fn client(&self) -> Result<DaemonClient> {
        DaemonClient::connect(self.autostart).await
    }
}
