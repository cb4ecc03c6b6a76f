use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::BoxStream;

use super::{BusEvent, MediaError, PlayerId, PlayerMethod, PlayerProperty, PropertyValue, SignalKind};

/// Reply half of a dispatched method call.
///
/// Resolves once the remote side answers. Nothing waits on it inline; the
/// player handle drives it on its own task.
pub type PendingInvocation = BoxFuture<'static, Result<(), MediaError>>;

/// Message bus operations the controller depends on.
///
/// The production implementation is [`ZbusBus`](super::ZbusBus); tests
/// substitute an in-memory bus.
#[async_trait]
pub trait MessageBus: Send + Sync + 'static {
    /// List every name currently registered on the bus.
    ///
    /// # Errors
    /// Returns error if the bus daemon cannot be queried
    async fn list_registered_names(&self) -> Result<Vec<String>, MediaError>;

    /// Resolve a well-known name to the unique name owning it.
    ///
    /// # Errors
    /// Returns error if the name has no owner or the query fails
    async fn resolve_owner(&self, name: &str) -> Result<PlayerId, MediaError>;

    /// Subscribe to one kind of bus notification.
    ///
    /// # Errors
    /// Returns error if the match rule cannot be installed
    async fn subscribe(&self, kind: SignalKind) -> Result<BoxStream<'static, BusEvent>, MediaError>;

    /// Read a property from a player's control interface.
    ///
    /// # Errors
    /// Returns `MediaError::RemoteUnavailable` if the player is gone,
    /// `MediaError::RemoteError` for any other failure
    async fn get(
        &self,
        player: &PlayerId,
        property: PlayerProperty,
    ) -> Result<PropertyValue, MediaError>;

    /// Dispatch a control method without waiting for its reply.
    ///
    /// # Errors
    /// Returns `MediaError::RemoteUnavailable` if the player is already gone
    /// when the call is dispatched
    async fn invoke(
        &self,
        player: &PlayerId,
        method: PlayerMethod,
    ) -> Result<PendingInvocation, MediaError>;
}
