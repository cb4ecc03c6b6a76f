//! Unit tests for the player registry and MPRIS value conversions.
//!
//! Pure state machine checks; no bus connection involved.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};

use zbus::zvariant::{OwnedValue, Value};

use crate::services::mpris::{PlaybackState, PlayerId, PlayerRegistry, TrackMetadata};

fn id(name: &str) -> PlayerId {
    PlayerId::from_bus_name(name)
}

fn ids(names: &[&str]) -> Vec<PlayerId> {
    names.iter().map(|name| id(name)).collect()
}

fn assert_disjoint(registry: &PlayerRegistry) {
    let not_playing: HashSet<&PlayerId> = registry.not_playing().iter().collect();
    assert_eq!(
        not_playing.len(),
        registry.not_playing().len(),
        "not-playing sequence holds duplicates"
    );
    for player in registry.playing() {
        assert!(!not_playing.contains(player), "{player} is in both collections");
    }
}

mod classification {
    use super::*;

    #[test]
    fn playing_report_moves_player_out_of_not_playing() {
        let mut registry = PlayerRegistry::new();
        registry.mark_not_playing(id(":1.1"));

        registry.classify(id(":1.1"), PlaybackState::Playing);

        assert!(registry.is_playing(&id(":1.1")));
        assert!(registry.not_playing().is_empty());
        assert_disjoint(&registry);
    }

    #[test]
    fn reporting_playing_twice_is_idempotent() {
        let mut registry = PlayerRegistry::new();

        assert!(registry.mark_playing(id(":1.1")));
        assert!(!registry.mark_playing(id(":1.1")));

        assert_eq!(registry.playing_count(), 1);
        assert!(registry.is_playing(&id(":1.1")));
    }

    #[test]
    fn paused_and_stopped_both_count_as_not_playing() {
        let mut registry = PlayerRegistry::new();
        registry.mark_playing(id(":1.1"));
        registry.mark_playing(id(":1.2"));

        registry.classify(id(":1.1"), PlaybackState::Paused);
        registry.classify(id(":1.2"), PlaybackState::Stopped);

        assert_eq!(registry.playing_count(), 0);
        assert_eq!(registry.not_playing(), ids(&[":1.1", ":1.2"]).as_slice());
    }

    #[test]
    fn tail_is_most_recent_not_playing_transition() {
        let mut registry = PlayerRegistry::new();
        for name in [":1.1", ":1.2", ":1.3"] {
            registry.classify(id(name), PlaybackState::Paused);
        }

        assert_eq!(registry.not_playing_head(), Some(&id(":1.3")));
    }

    #[test]
    fn repeated_not_playing_report_keeps_position() {
        let mut registry = PlayerRegistry::new();
        for name in [":1.1", ":1.2", ":1.3"] {
            registry.mark_not_playing(id(name));
        }

        assert!(!registry.mark_not_playing(id(":1.1")));

        assert_eq!(registry.not_playing(), ids(&[":1.1", ":1.2", ":1.3"]).as_slice());
    }

    #[test]
    fn pausing_again_after_playing_moves_to_tail() {
        let mut registry = PlayerRegistry::new();
        for name in [":1.1", ":1.2", ":1.3"] {
            registry.mark_not_playing(id(name));
        }

        registry.mark_playing(id(":1.1"));
        registry.mark_not_playing(id(":1.1"));

        assert_eq!(registry.not_playing(), ids(&[":1.2", ":1.3", ":1.1"]).as_slice());
        assert_disjoint(&registry);
    }

    #[test]
    fn collections_stay_disjoint_through_mixed_transitions() {
        let mut registry = PlayerRegistry::new();
        let steps = [
            (":1.1", PlaybackState::Playing),
            (":1.2", PlaybackState::Paused),
            (":1.1", PlaybackState::Stopped),
            (":1.3", PlaybackState::Playing),
            (":1.2", PlaybackState::Playing),
            (":1.2", PlaybackState::Paused),
            (":1.3", PlaybackState::Playing),
        ];

        for (name, state) in steps {
            registry.classify(id(name), state);
            assert_disjoint(&registry);
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.not_playing(), ids(&[":1.1", ":1.2"]).as_slice());
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn remove_clears_player_from_either_collection() {
        let mut registry = PlayerRegistry::new();
        registry.mark_playing(id(":1.1"));
        registry.mark_not_playing(id(":1.2"));

        assert!(registry.remove(&id(":1.1")));
        assert!(registry.remove(&id(":1.2")));

        assert!(registry.is_empty());
    }

    #[test]
    fn removing_unknown_player_is_a_no_op() {
        let mut registry = PlayerRegistry::new();
        registry.mark_not_playing(id(":1.1"));

        assert!(!registry.remove(&id(":1.9")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn rename_preserves_not_playing_position() {
        let mut registry = PlayerRegistry::new();
        for name in [":1.1", ":1.2", ":1.3"] {
            registry.mark_not_playing(id(name));
        }

        assert!(registry.rename(&id(":1.2"), id(":1.20")));

        assert_eq!(registry.not_playing(), ids(&[":1.1", ":1.20", ":1.3"]).as_slice());
    }

    #[test]
    fn rename_moves_playing_membership() {
        let mut registry = PlayerRegistry::new();
        registry.mark_playing(id(":1.1"));

        assert!(registry.rename(&id(":1.1"), id(":1.10")));

        assert!(registry.is_playing(&id(":1.10")));
        assert!(!registry.contains(&id(":1.1")));
    }

    #[test]
    fn rename_onto_known_owner_drops_old_entry() {
        let mut registry = PlayerRegistry::new();
        registry.mark_not_playing(id(":1.1"));
        registry.mark_not_playing(id(":1.2"));

        assert!(registry.rename(&id(":1.1"), id(":1.2")));

        assert_eq!(registry.not_playing(), ids(&[":1.2"]).as_slice());
        assert_disjoint(&registry);
    }

    #[test]
    fn rename_of_unknown_owner_changes_nothing() {
        let mut registry = PlayerRegistry::new();
        registry.mark_not_playing(id(":1.1"));

        assert!(!registry.rename(&id(":1.5"), id(":1.6")));

        assert_eq!(registry.not_playing(), ids(&[":1.1"]).as_slice());
    }
}

mod head {
    use super::*;

    #[test]
    fn empty_registry_has_no_head() {
        let registry = PlayerRegistry::new();

        assert_eq!(registry.head(), None);
        assert_eq!(registry.not_playing_head(), None);
    }

    #[test]
    fn playing_player_wins_over_not_playing() {
        let mut registry = PlayerRegistry::new();
        registry.mark_not_playing(id(":1.1"));
        registry.mark_playing(id(":1.2"));

        assert_eq!(registry.head(), Some(&id(":1.2")));
    }

    #[test]
    fn head_falls_back_to_not_playing_tail() {
        let mut registry = PlayerRegistry::new();
        registry.mark_not_playing(id(":1.1"));
        registry.mark_not_playing(id(":1.2"));

        assert_eq!(registry.head(), Some(&id(":1.2")));
    }

    #[test]
    fn head_with_several_playing_is_one_of_them() {
        let mut registry = PlayerRegistry::new();
        registry.mark_playing(id(":1.1"));
        registry.mark_playing(id(":1.2"));
        registry.mark_not_playing(id(":1.3"));

        let head = registry.head().cloned();
        assert!(head == Some(id(":1.1")) || head == Some(id(":1.2")));
    }
}

mod values {
    use super::*;

    fn owned(value: &str) -> OwnedValue {
        OwnedValue::try_from(Value::from(value.to_string())).unwrap()
    }

    #[test]
    fn playback_state_parses_known_statuses() {
        assert_eq!(PlaybackState::from("Playing"), PlaybackState::Playing);
        assert_eq!(PlaybackState::from("Paused"), PlaybackState::Paused);
        assert_eq!(PlaybackState::from("Stopped"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from("Buffering"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::Paused.to_string(), "Paused");
    }

    #[test]
    fn metadata_reads_string_fields_and_single_artist() {
        let mut map = HashMap::new();
        map.insert("xesam:title".to_string(), owned("Blue in Green"));
        map.insert("xesam:album".to_string(), owned("Kind of Blue"));
        map.insert("xesam:artist".to_string(), owned("Miles Davis"));

        let metadata = TrackMetadata::from(map);

        assert_eq!(metadata.title.as_deref(), Some("Blue in Green"));
        assert_eq!(metadata.album.as_deref(), Some("Kind of Blue"));
        assert_eq!(metadata.artists, vec!["Miles Davis".to_string()]);
        assert_eq!(metadata.length, None);
        assert!(!metadata.is_empty());
    }

    #[test]
    fn empty_metadata_map_is_empty() {
        let metadata = TrackMetadata::from(HashMap::<String, OwnedValue>::new());

        assert!(metadata.is_empty());
        assert!(metadata.to_mpris_map().is_empty());
    }

    #[test]
    fn metadata_map_only_carries_present_fields() {
        let metadata = TrackMetadata {
            title: Some("So What".to_string()),
            artists: vec!["Miles Davis".to_string()],
            length: Some(562_000_000),
            ..TrackMetadata::default()
        };

        let map = metadata.to_mpris_map();

        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["mpris:length", "xesam:artist", "xesam:title"]);
    }

    #[test]
    fn unknown_keys_pass_through_to_map() {
        let mut map = HashMap::new();
        map.insert("xesam:title".to_string(), owned("All Blues"));
        map.insert("xesam:genre".to_string(), owned("Jazz"));

        let encoded = TrackMetadata::from(map).to_mpris_map();

        let genre = encoded.get("xesam:genre").unwrap();
        assert_eq!(<&str>::try_from(genre).unwrap(), "Jazz");
        assert!(encoded.contains_key("xesam:title"));
    }

    #[test]
    fn metadata_with_only_unknown_keys_is_present() {
        let mut map = HashMap::new();
        map.insert("xesam:comment".to_string(), owned("live"));

        let metadata = TrackMetadata::from(map);

        assert_eq!(metadata.title, None);
        assert!(!metadata.is_empty());
        assert_eq!(metadata.to_mpris_map().len(), 1);
    }
}
