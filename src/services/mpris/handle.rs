use tracing::{debug, warn};

use super::{
    ControllerEvent, EventSender, MediaError, MessageBus, PlayerId, PlayerMethod,
    PlayerProperty, PropertyValue,
};

/// Capability wrapper around one player, built for a single operation.
pub struct PlayerHandle<'a, B: MessageBus> {
    bus: &'a B,
    events: &'a EventSender,
    player: PlayerId,
}

impl<'a, B: MessageBus> PlayerHandle<'a, B> {
    /// Wrap `player`, routing asynchronous failures to `events`.
    pub fn new(bus: &'a B, events: &'a EventSender, player: PlayerId) -> Self {
        Self {
            bus,
            events,
            player,
        }
    }

    /// The wrapped player.
    pub fn id(&self) -> &PlayerId {
        &self.player
    }

    /// Read a property, waiting for the reply.
    ///
    /// # Errors
    /// Returns `MediaError::RemoteUnavailable` if the player is gone,
    /// `MediaError::RemoteError` for other bus failures
    pub async fn get(&self, property: PlayerProperty) -> Result<PropertyValue, MediaError> {
        self.bus.get(&self.player, property).await
    }

    /// Dispatch a control method without waiting for the player to act.
    ///
    /// The reply is awaited on its own task. A failed reply comes back to the
    /// controller as [`ControllerEvent::InvocationFailed`].
    ///
    /// # Errors
    /// Returns `MediaError::RemoteUnavailable` if the call could not be
    /// dispatched because the player is already gone
    pub async fn invoke(&self, method: PlayerMethod) -> Result<(), MediaError> {
        let pending = self.bus.invoke(&self.player, method).await?;
        debug!(player = %self.player, %method, "Dispatched");

        let player = self.player.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let Err(error) = pending.await else {
                return;
            };

            let event = ControllerEvent::InvocationFailed {
                player,
                method,
                error,
            };
            if events.send(event).await.is_err() {
                warn!("Controller stopped before a failed {method} could be reported");
            }
        });

        Ok(())
    }
}
