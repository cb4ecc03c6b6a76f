use std::collections::HashMap;

use serde::Serialize;
use zbus::zvariant::{Array, OwnedValue, Value};

const TITLE: &str = "xesam:title";
const ARTIST: &str = "xesam:artist";
const ALBUM: &str = "xesam:album";
const ART_URL: &str = "mpris:artUrl";
const LENGTH: &str = "mpris:length";
const TRACK_ID: &str = "mpris:trackid";
const URL: &str = "xesam:url";

/// Metadata information for the track a player has loaded
///
/// Only the commonly used MPRIS keys are kept. Every field is optional since
/// players are free to omit any of them.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct TrackMetadata {
    /// Track title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Track artists
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artists: Vec<String>,

    /// Album name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// URL to album artwork image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub art_url: Option<String>,

    /// Track duration in microseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,

    /// MPRIS track identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,

    /// Location of the media
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Every entry the player reported, known keys included
    #[serde(skip)]
    pub raw: HashMap<String, OwnedValue>,
}

impl TrackMetadata {
    /// Whether the player reported no metadata at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Encode back into an MPRIS `a{sv}` metadata dictionary.
    ///
    /// Entries outside the known keys are passed through from [`Self::raw`].
    pub fn to_mpris_map(&self) -> HashMap<String, Value<'static>> {
        let mut map: HashMap<String, Value<'static>> = self
            .raw
            .iter()
            .filter_map(|(key, value)| {
                let value = value.try_clone().ok()?;
                Some((key.clone(), Value::from(value)))
            })
            .collect();

        let strings = [
            (TITLE, &self.title),
            (ALBUM, &self.album),
            (ART_URL, &self.art_url),
            (TRACK_ID, &self.track_id),
            (URL, &self.url),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::from(value.clone()));
            }
        }

        if !self.artists.is_empty() {
            map.insert(
                ARTIST.to_string(),
                Value::Array(Array::from(self.artists.clone())),
            );
        }

        if let Some(length) = self.length {
            map.insert(LENGTH.to_string(), Value::from(length));
        }

        map
    }
}

impl From<HashMap<String, OwnedValue>> for TrackMetadata {
    fn from(metadata: HashMap<String, OwnedValue>) -> Self {
        let string = |key: &str| {
            metadata
                .get(key)
                .and_then(|value| <&str>::try_from(value).ok())
                .map(str::to_string)
        };

        let known = Self {
            title: string(TITLE),
            artists: metadata.get(ARTIST).map(artists).unwrap_or_default(),
            album: string(ALBUM),
            art_url: string(ART_URL),
            length: metadata.get(LENGTH).and_then(length),
            track_id: metadata
                .get(TRACK_ID)
                .and_then(|value| {
                    <&zbus::zvariant::ObjectPath<'_>>::try_from(value)
                        .map(|path| path.as_str())
                        .or_else(|_| <&str>::try_from(value))
                        .ok()
                })
                .map(str::to_string),
            url: string(URL),
            raw: HashMap::new(),
        };

        Self { raw: metadata, ..known }
    }
}

// Some players send a single string instead of a string array.
fn artists(value: &OwnedValue) -> Vec<String> {
    if let Ok(array) = <&Array<'_>>::try_from(value) {
        return array
            .iter()
            .filter_map(|artist| <&str>::try_from(artist).ok())
            .map(str::to_string)
            .collect();
    }

    <&str>::try_from(value)
        .map(|artist| vec![artist.to_string()])
        .unwrap_or_default()
}

fn length(value: &OwnedValue) -> Option<i64> {
    i64::try_from(value)
        .ok()
        .or_else(|| u64::try_from(value).ok().and_then(|v| i64::try_from(v).ok()))
        .filter(|micros| *micros > 0)
}
