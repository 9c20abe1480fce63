/// Verse type as returned by the verse API
use super::VerseKey;
use serde::{Deserialize, Serialize};

/// A single verse with its text
///
/// Fetched by the navigation host and held in the verse cache; the
/// playback controller only sees the `Track` derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    /// Global verse id (1..=6236)
    pub id: u32,

    /// `surah:ayah` address
    pub verse_key: VerseKey,

    /// Ayah number within the surah
    pub verse_number: u32,

    /// Verse text (Uthmani script)
    #[serde(default, alias = "text_uthmani")]
    pub text: String,

    /// Recitation URL, when the API already resolved one
    #[serde(default)]
    pub audio_url: Option<String>,
}

impl Verse {
    /// Surah this verse belongs to
    pub fn surah(&self) -> u32 {
        self.verse_key.surah()
    }
}
