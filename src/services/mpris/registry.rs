use std::collections::HashSet;

use tracing::debug;

use super::{PlaybackState, PlayerId};

/// Classification of every known player into playing and not playing.
///
/// The playing set is unordered. The not-playing sequence keeps players in the
/// order they stopped playing; its tail (the most recently paused or stopped
/// player) is the head used for dispatch. A player is in at most one of the
/// two collections, and the sequence never holds duplicates.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    playing: HashSet<PlayerId>,
    not_playing: Vec<PlayerId>,
}

impl PlayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a player from a reported playback state.
    pub fn classify(&mut self, player: PlayerId, state: PlaybackState) {
        if state.is_playing() {
            self.mark_playing(player);
        } else {
            self.mark_not_playing(player);
        }
    }

    /// Move a player into the playing set.
    ///
    /// Returns `true` if the player was not already playing.
    pub fn mark_playing(&mut self, player: PlayerId) -> bool {
        self.not_playing.retain(|known| *known != player);

        if self.playing.contains(&player) {
            return false;
        }

        debug!(player = %player, "Marked as playing");
        self.playing.insert(player);
        true
    }

    /// Move a player to the tail of the not-playing sequence.
    ///
    /// A player already in the sequence keeps its position. Returns `true` if
    /// the player was appended.
    pub fn mark_not_playing(&mut self, player: PlayerId) -> bool {
        self.playing.remove(&player);

        if self.not_playing.contains(&player) {
            return false;
        }

        debug!(player = %player, "Marked as not playing");
        self.not_playing.push(player);
        true
    }

    /// Forget a player entirely.
    ///
    /// Returns `true` if the player was known.
    pub fn remove(&mut self, player: &PlayerId) -> bool {
        let was_playing = self.playing.remove(player);

        let before = self.not_playing.len();
        self.not_playing.retain(|known| known != player);
        let was_not_playing = self.not_playing.len() != before;

        if was_playing || was_not_playing {
            debug!(player = %player, "Removed");
        }

        was_playing || was_not_playing
    }

    /// Carry a player's classification over to its new owner.
    ///
    /// In the not-playing sequence the new owner takes the old one's index. If
    /// the new owner is already known the old entry is simply dropped.
    /// Returns `true` if the old owner was known.
    pub fn rename(&mut self, old: &PlayerId, new: PlayerId) -> bool {
        if old == &new {
            return self.contains(old);
        }

        if self.contains(&new) {
            return self.remove(old);
        }

        if let Some(slot) = self.not_playing.iter_mut().find(|known| *known == old) {
            debug!(old = %old, new = %new, "Renamed in place");
            *slot = new;
            return true;
        }

        if self.playing.remove(old) {
            debug!(old = %old, new = %new, "Renamed");
            self.playing.insert(new);
            return true;
        }

        false
    }

    /// Whether the player is in either collection.
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.playing.contains(player) || self.not_playing.contains(player)
    }

    /// Whether the player is currently classified as playing.
    pub fn is_playing(&self, player: &PlayerId) -> bool {
        self.playing.contains(player)
    }

    /// Players currently playing, in no particular order.
    pub fn playing(&self) -> impl Iterator<Item = &PlayerId> {
        self.playing.iter()
    }

    /// Number of players currently playing.
    pub fn playing_count(&self) -> usize {
        self.playing.len()
    }

    /// Players not playing, oldest transition first.
    pub fn not_playing(&self) -> &[PlayerId] {
        &self.not_playing
    }

    /// Most recently paused or stopped player.
    pub fn not_playing_head(&self) -> Option<&PlayerId> {
        self.not_playing.last()
    }

    /// Player that answers queries: any playing one, else the not-playing head.
    pub fn head(&self) -> Option<&PlayerId> {
        self.playing.iter().next().or_else(|| self.not_playing_head())
    }

    /// Total number of known players.
    pub fn len(&self) -> usize {
        self.playing.len() + self.not_playing.len()
    }

    /// Whether no player is known.
    pub fn is_empty(&self) -> bool {
        self.playing.is_empty() && self.not_playing.is_empty()
    }
}
