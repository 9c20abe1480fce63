/// Playable track derived from a verse and a reciter
use super::VerseKey;
use serde::{Deserialize, Serialize};

/// A playable unit of recitation audio
///
/// Immutable value owned by the navigation host. It is recomputed whenever
/// the current verse or the reciter changes and handed to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier (the verse key)
    pub id: String,

    /// Display title
    pub title: String,

    /// Reciter name
    pub artist: String,

    /// Cover image URL
    pub cover_url: String,

    /// Advertised duration in seconds (0 when unknown until metadata loads)
    pub duration_sec: f64,

    /// Audio source URL
    pub src: String,
}

impl Track {
    /// Build the track for a verse recited by `reciter`
    pub fn for_verse(
        key: VerseKey,
        reciter: impl Into<String>,
        cover_url: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            id: key.to_string(),
            title: format!("Surah {}, Ayah {}", key.surah(), key.ayah()),
            artist: reciter.into(),
            cover_url: cover_url.into(),
            duration_sec: 0.0,
            src: src.into(),
        }
    }

    /// Set the advertised duration
    pub fn with_duration(mut self, duration_sec: f64) -> Self {
        self.duration_sec = duration_sec;
        self
    }

    /// Verse key this track recites, if the id is one
    pub fn verse_key(&self) -> Option<VerseKey> {
        self.id.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_for_verse() {
        let key = VerseKey::new(112, 3).unwrap();
        let track = Track::for_verse(key, "Mishary Alafasy", "", "https://cdn/112003.mp3")
            .with_duration(4.5);

        assert_eq!(track.id, "112:3");
        assert_eq!(track.title, "Surah 112, Ayah 3");
        assert_eq!(track.artist, "Mishary Alafasy");
        assert_eq!(track.duration_sec, 4.5);
        assert_eq!(track.verse_key(), Some(key));
    }
}
