use std::{collections::HashSet, ops::ControlFlow, sync::Arc};

use regex::Regex;
use tokio_stream::StreamExt;
use tracing::{debug, info, instrument, warn};

use super::{
    BusEvent, Command, CommandReply, ControlRequest, ControllerEvent, EventReceiver, EventSender,
    MPRIS_PLAYER_INTERFACE, MediaError, MessageBus, PlaybackState, PlayerHandle, PlayerId,
    PlayerMethod, PlayerProperty, PlayerRegistry, PropertyValue, SignalKind, TrackMetadata,
    is_mpris_player,
};

/// Routes control commands to the right player.
///
/// Owns the [`PlayerRegistry`] and is the only thing that mutates it. All
/// bus notifications, late invocation failures and command requests arrive on
/// a single channel and are handled in order by [`Controller::run`].
pub struct Controller<B: MessageBus> {
    bus: Arc<B>,
    events: EventSender,
    registry: PlayerRegistry,
    ignored_patterns: Vec<Regex>,
    ignored_owners: HashSet<PlayerId>,
}

impl<B: MessageBus> Controller<B> {
    /// Create a controller with an empty registry.
    ///
    /// `events` must be the sending half of the channel later passed to
    /// [`Controller::run`]. Players whose well-known name matches one of
    /// `ignored_patterns` are never classified.
    pub fn new(bus: Arc<B>, events: EventSender, ignored_patterns: Vec<Regex>) -> Self {
        Self {
            bus,
            events,
            registry: PlayerRegistry::new(),
            ignored_patterns,
            ignored_owners: HashSet::new(),
        }
    }

    /// Current classification of known players.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Subscribe to bus notifications, populate the registry, then process
    /// events until a quit request arrives.
    ///
    /// # Errors
    /// Returns error if the bus subscriptions cannot be set up
    #[instrument(skip_all)]
    pub async fn run(mut self, mut events: EventReceiver) -> Result<(), MediaError> {
        self.subscribe().await?;
        self.populate().await;
        info!(players = self.registry.len(), "Controller ready");

        while let Some(event) = events.recv().await {
            if self.handle_event(event).await.is_break() {
                break;
            }
        }

        info!("Controller stopped");
        Ok(())
    }

    /// Forward ownership and property notifications into the event channel.
    ///
    /// # Errors
    /// Returns error if either subscription fails
    pub async fn subscribe(&self) -> Result<(), MediaError> {
        let properties = self.bus.subscribe(SignalKind::PropertiesChanged).await?;
        let owners = self.bus.subscribe(SignalKind::OwnerChanged).await?;
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut notifications = properties.merge(owners);
            while let Some(notification) = notifications.next().await {
                if events.send(ControllerEvent::Bus(notification)).await.is_err() {
                    break;
                }
            }
        });

        Ok(())
    }

    /// Classify every MPRIS player already on the bus.
    ///
    /// Players whose status cannot be read are treated as not playing.
    #[instrument(skip(self))]
    pub async fn populate(&mut self) {
        info!("Detecting players already on bus");

        let names = match self.bus.list_registered_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!("Failed to list bus names: {e}");
                return;
            }
        };

        for name in names.iter().filter(|name| is_mpris_player(name)) {
            match self.bus.resolve_owner(name).await {
                Ok(owner) => self.adopt(name, owner).await,
                Err(e) => warn!("Failed to resolve owner of {name}: {e}"),
            }
        }
    }

    /// Apply one event.
    ///
    /// Returns [`ControlFlow::Break`] once a quit request has been answered.
    pub async fn handle_event(&mut self, event: ControllerEvent) -> ControlFlow<()> {
        match event {
            ControllerEvent::Bus(event) => self.handle_bus_event(event).await,
            ControllerEvent::InvocationFailed {
                player,
                method,
                error,
            } => self.handle_invocation_failed(player, method, error),
            ControllerEvent::Request(request) => return self.handle_request(request).await,
        }

        ControlFlow::Continue(())
    }

    /// Pause every playing player, or resume the most recently stopped one.
    pub async fn play_pause(&mut self) {
        if self.registry.playing_count() > 0 {
            self.broadcast_to_playing(PlayerMethod::Pause).await;
        } else {
            self.invoke_on_not_playing_head(PlayerMethod::Play).await;
        }
    }

    /// Skip to the next track on the current player.
    pub async fn next(&mut self) {
        self.skip(PlayerMethod::Next).await;
    }

    /// Skip to the previous track on the current player.
    pub async fn previous(&mut self) {
        self.skip(PlayerMethod::Previous).await;
    }

    /// Playback status of the head player.
    pub async fn status(&mut self) -> Option<PlaybackState> {
        match self.query(PlayerProperty::PlaybackStatus).await {
            Some(PropertyValue::PlaybackStatus(state)) => Some(state),
            _ => None,
        }
    }

    /// Track metadata of the head player.
    pub async fn metadata(&mut self) -> Option<TrackMetadata> {
        match self.query(PlayerProperty::Metadata).await {
            Some(PropertyValue::Metadata(metadata)) => Some(metadata),
            _ => None,
        }
    }

    /// Read `property` from the head player.
    ///
    /// A head that has left the bus is removed and the read moves on to the
    /// next head. Returns `None` when no player is left or the read fails
    /// for another reason.
    pub async fn query(&mut self, property: PlayerProperty) -> Option<PropertyValue> {
        while let Some(player) = self.registry.head().cloned() {
            let result = self.handle(player.clone()).get(property).await;

            match result {
                Ok(value) => return Some(value),
                Err(error) if error.is_unavailable() => {
                    info!(player = %player, "Player vanished during {property} read");
                    self.registry.remove(&player);
                }
                Err(error) => {
                    warn!("Failed to read {property}: {error}");
                    return None;
                }
            }
        }

        None
    }

    fn handle(&self, player: PlayerId) -> PlayerHandle<'_, B> {
        PlayerHandle::new(&*self.bus, &self.events, player)
    }

    async fn skip(&mut self, method: PlayerMethod) {
        match self.registry.playing_count() {
            0 => self.invoke_on_not_playing_head(method).await,
            1 => self.invoke_on_sole_playing(method).await,
            count => debug!(count, "Several players playing, ignoring {method}"),
        }
    }

    async fn broadcast_to_playing(&mut self, method: PlayerMethod) {
        let mut vanished = Vec::new();

        for player in self.registry.playing() {
            let handle = PlayerHandle::new(&*self.bus, &self.events, player.clone());
            match handle.invoke(method).await {
                Ok(()) => {}
                Err(error) if error.is_unavailable() => vanished.push(player.clone()),
                Err(error) => warn!("Failed to send {method}: {error}"),
            }
        }

        for player in &vanished {
            info!(player = %player, "Player vanished during {method} broadcast");
            self.registry.remove(player);
        }
    }

    async fn invoke_on_sole_playing(&mut self, method: PlayerMethod) {
        let Some(player) = self.registry.playing().next().cloned() else {
            return;
        };

        let result = self.handle(player.clone()).invoke(method).await;

        match result {
            Ok(()) => {}
            Err(error) if error.is_unavailable() => {
                info!(player = %player, "Player vanished before {method}");
                self.registry.remove(&player);
            }
            Err(error) => warn!("Failed to send {method}: {error}"),
        }
    }

    async fn invoke_on_not_playing_head(&mut self, method: PlayerMethod) {
        while let Some(player) = self.registry.not_playing_head().cloned() {
            let result = self.handle(player.clone()).invoke(method).await;

            match result {
                Ok(()) => return,
                Err(error) if error.is_unavailable() => {
                    info!(player = %player, "Player vanished before {method}, trying next");
                    self.registry.remove(&player);
                }
                Err(error) => {
                    warn!("Failed to send {method}: {error}");
                    return;
                }
            }
        }

        debug!("No player to receive {method}");
    }

    async fn handle_bus_event(&mut self, event: BusEvent) {
        match event {
            BusEvent::PropertiesChanged {
                sender,
                interface,
                playback_status,
            } => {
                if interface != MPRIS_PLAYER_INTERFACE || self.ignored_owners.contains(&sender) {
                    return;
                }

                if let Some(state) = playback_status {
                    info!(player = %sender, %state, "PlaybackStatus changed");
                    self.registry.classify(sender, state);
                }
            }

            BusEvent::OwnerChanged {
                name,
                old_owner,
                new_owner,
            } => {
                // Only MPRIS names and the connection's own unique name track a player.
                let player_name = is_mpris_player(&name);

                match (old_owner, new_owner) {
                    (Some(old), None) if player_name || old.bus_name() == name => {
                        self.forget(&name, &old);
                    }
                    (Some(old), Some(new)) if player_name => self.rename(&old, new),
                    (None, Some(new)) if player_name => self.adopt(&name, new).await,
                    _ => {}
                }
            }
        }
    }

    fn handle_invocation_failed(&mut self, player: PlayerId, method: PlayerMethod, error: MediaError) {
        if error.is_unavailable() {
            info!(player = %player, "Player vanished while handling {method}");
            self.registry.remove(&player);
        } else {
            warn!("{method} failed: {error}");
        }
    }

    async fn handle_request(&mut self, request: ControlRequest) -> ControlFlow<()> {
        let ControlRequest { command, reply } = request;
        info!(%command, "Command received");

        let answer = match command {
            Command::PlayPause => {
                self.play_pause().await;
                CommandReply::Done
            }
            Command::Next => {
                self.next().await;
                CommandReply::Done
            }
            Command::Previous => {
                self.previous().await;
                CommandReply::Done
            }
            Command::Status => CommandReply::Status(self.status().await),
            Command::Metadata => CommandReply::Metadata(self.metadata().await),
            Command::Quit => CommandReply::Done,
        };

        if reply.send(answer).is_err() {
            debug!("Caller went away before the {command} reply");
        }

        if command == Command::Quit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    async fn adopt(&mut self, name: &str, owner: PlayerId) {
        if self.ignored_patterns.iter().any(|pattern| pattern.is_match(name)) {
            info!(player = %owner, "Ignoring {name}");
            self.ignored_owners.insert(owner);
            return;
        }

        if self.registry.contains(&owner) {
            return;
        }

        let state = match self.handle(owner.clone()).get(PlayerProperty::PlaybackStatus).await {
            Ok(PropertyValue::PlaybackStatus(state)) => state,
            Ok(_) => PlaybackState::Stopped,
            Err(e) => {
                debug!("Status of {name} unknown, treating as not playing: {e}");
                PlaybackState::Stopped
            }
        };

        info!(player = %owner, %state, "Found {name}");
        self.registry.classify(owner, state);
    }

    fn forget(&mut self, name: &str, owner: &PlayerId) {
        self.ignored_owners.remove(owner);

        if self.registry.remove(owner) {
            info!(player = %owner, "Owner of {name} lost");
        }
    }

    fn rename(&mut self, old: &PlayerId, new: PlayerId) {
        if self.ignored_owners.remove(old) {
            self.ignored_owners.insert(new);
            return;
        }

        self.registry.rename(old, new);
    }
}
