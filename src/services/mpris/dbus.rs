use std::collections::HashMap;

use async_stream::stream;
use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use tracing::{debug, instrument};
use zbus::{
    Connection, MatchRule, Message, MessageStream, fdo,
    message::Type as MessageType,
    names::{BusName, UniqueName},
    proxy::CacheProperties,
    zvariant::OwnedValue,
};

use super::{
    BusEvent, MPRIS_PATH, MediaError, MediaPlayer2PlayerProxy, MessageBus, PendingInvocation,
    PlaybackState, PlayerId, PlayerMethod, PlayerProperty, PropertyValue, SignalKind,
    TrackMetadata,
};

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// [`MessageBus`] backed by a zbus connection.
pub struct ZbusBus {
    connection: Connection,
    dbus: fdo::DBusProxy<'static>,
}

impl ZbusBus {
    /// Wrap an established connection.
    ///
    /// # Errors
    /// Returns `MediaError::InitializationFailed` if the bus daemon proxy
    /// cannot be created
    pub async fn new(connection: Connection) -> Result<Self, MediaError> {
        let dbus = fdo::DBusProxy::new(&connection)
            .await
            .map_err(|e| MediaError::InitializationFailed(format!("DBus proxy failed: {e}")))?;

        Ok(Self { connection, dbus })
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    async fn player_proxy(
        &self,
        player: &PlayerId,
    ) -> Result<MediaPlayer2PlayerProxy<'static>, MediaError> {
        MediaPlayer2PlayerProxy::builder(&self.connection)
            .destination(player.bus_name().to_string())
            .map_err(|e| MediaError::from_player_call(player, e))?
            .cache_properties(CacheProperties::No)
            .build()
            .await
            .map_err(|e| MediaError::from_player_call(player, e))
    }

    async fn subscribe_properties_changed(
        &self,
    ) -> Result<BoxStream<'static, BusEvent>, MediaError> {
        let rule = MatchRule::builder()
            .msg_type(MessageType::Signal)
            .interface(PROPERTIES_INTERFACE)?
            .member("PropertiesChanged")?
            .path(MPRIS_PATH)?
            .build();

        let mut messages = MessageStream::for_match_rule(rule, &self.connection, None)
            .await
            .map_err(|e| {
                MediaError::InitializationFailed(format!("Signal subscription failed: {e}"))
            })?;

        let events = stream! {
            while let Some(message) = messages.next().await {
                let Ok(message) = message else {
                    continue;
                };

                if let Some(event) = properties_changed(&message) {
                    yield event;
                }
            }
        };

        Ok(events.boxed())
    }

    async fn subscribe_owner_changed(&self) -> Result<BoxStream<'static, BusEvent>, MediaError> {
        let signals = self.dbus.receive_name_owner_changed().await.map_err(|e| {
            MediaError::InitializationFailed(format!("Signal subscription failed: {e}"))
        })?;

        let events = signals.filter_map(|signal| async move {
            let args = signal.args().ok()?;

            Some(BusEvent::OwnerChanged {
                name: args.name().to_string(),
                old_owner: owner_id(args.old_owner()),
                new_owner: owner_id(args.new_owner()),
            })
        });

        Ok(events.boxed())
    }
}

#[async_trait]
impl MessageBus for ZbusBus {
    async fn list_registered_names(&self) -> Result<Vec<String>, MediaError> {
        let names = self
            .dbus
            .list_names()
            .await
            .map_err(|e| MediaError::DbusError(e.into()))?;

        Ok(names.into_iter().map(|name| name.to_string()).collect())
    }

    async fn resolve_owner(&self, name: &str) -> Result<PlayerId, MediaError> {
        let bus_name = BusName::try_from(name).map_err(|e| MediaError::DbusError(e.into()))?;
        let owner = self
            .dbus
            .get_name_owner(bus_name)
            .await
            .map_err(|e| MediaError::DbusError(e.into()))?;

        Ok(PlayerId::from_bus_name(owner.as_str()))
    }

    async fn subscribe(&self, kind: SignalKind) -> Result<BoxStream<'static, BusEvent>, MediaError> {
        match kind {
            SignalKind::PropertiesChanged => self.subscribe_properties_changed().await,
            SignalKind::OwnerChanged => self.subscribe_owner_changed().await,
        }
    }

    #[instrument(skip(self), fields(player = %player))]
    async fn get(
        &self,
        player: &PlayerId,
        property: PlayerProperty,
    ) -> Result<PropertyValue, MediaError> {
        let proxy = self.player_proxy(player).await?;

        let value = match property {
            PlayerProperty::PlaybackStatus => proxy
                .playback_status()
                .await
                .map(|status| PropertyValue::PlaybackStatus(PlaybackState::from(status.as_str()))),
            PlayerProperty::Metadata => proxy
                .metadata()
                .await
                .map(|metadata| PropertyValue::Metadata(TrackMetadata::from(metadata))),
        };

        value.map_err(|e| MediaError::from_player_call(player, e))
    }

    #[instrument(skip(self), fields(player = %player))]
    async fn invoke(
        &self,
        player: &PlayerId,
        method: PlayerMethod,
    ) -> Result<PendingInvocation, MediaError> {
        let bus_name = BusName::try_from(player.bus_name())
            .map_err(|e| MediaError::from_player_call(player, e.into()))?;
        let present = self
            .dbus
            .name_has_owner(bus_name)
            .await
            .map_err(|e| MediaError::from_player_call(player, e.into()))?;

        if !present {
            debug!("Player vanished before dispatch");
            return Err(MediaError::RemoteUnavailable(player.clone()));
        }

        let proxy = self.player_proxy(player).await?;
        let player = player.clone();

        Ok(Box::pin(async move {
            let reply = match method {
                PlayerMethod::Play => proxy.play().await,
                PlayerMethod::Pause => proxy.pause().await,
                PlayerMethod::Next => proxy.next().await,
                PlayerMethod::Previous => proxy.previous().await,
            };

            reply.map_err(|e| MediaError::from_player_call(&player, e))
        }))
    }
}

fn properties_changed(message: &Message) -> Option<BusEvent> {
    let header = message.header();
    let sender = header.sender()?;

    let (interface, changed, _invalidated): (String, HashMap<String, OwnedValue>, Vec<String>) =
        message.body().deserialize().ok()?;

    let playback_status = changed
        .get("PlaybackStatus")
        .and_then(|status| <&str>::try_from(status).ok())
        .map(PlaybackState::from);

    Some(BusEvent::PropertiesChanged {
        sender: PlayerId::from_bus_name(sender.as_str()),
        interface,
        playback_status,
    })
}

fn owner_id(owner: &Option<UniqueName<'_>>) -> Option<PlayerId> {
    owner
        .as_ref()
        .map(|owner| PlayerId::from_bus_name(owner.as_str()))
}
