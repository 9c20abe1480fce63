/// Verse key (`surah:ayah`) addressing
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of surahs in the Quran
pub const SURAH_COUNT: u32 = 114;

/// A verse address of the form `S:A`
///
/// Serialized as its string form (`"2:255"`), which is also the form the
/// verse API and the audio CDN use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerseKey {
    surah: u32,
    ayah: u32,
}

impl VerseKey {
    /// Create a verse key, validating both numbers
    pub fn new(surah: u32, ayah: u32) -> Result<Self> {
        if surah == 0 || surah > SURAH_COUNT {
            return Err(CoreError::SurahOutOfRange(surah));
        }
        if ayah == 0 {
            return Err(CoreError::AyahOutOfRange(ayah));
        }
        Ok(Self { surah, ayah })
    }

    /// Surah number (1-based)
    pub fn surah(&self) -> u32 {
        self.surah
    }

    /// Ayah number within the surah (1-based)
    pub fn ayah(&self) -> u32 {
        self.ayah
    }

    /// Key of the following ayah in the same surah
    pub fn next_ayah(&self) -> Self {
        Self {
            surah: self.surah,
            ayah: self.ayah + 1,
        }
    }

    /// Key of the preceding ayah in the same surah, if any
    pub fn prev_ayah(&self) -> Option<Self> {
        (self.ayah > 1).then(|| Self {
            surah: self.surah,
            ayah: self.ayah - 1,
        })
    }

    /// Zero-padded `SSSAAA` stem used for audio file names
    pub fn padded_stem(&self) -> String {
        format!("{:03}{:03}", self.surah, self.ayah)
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayah)
    }
}

impl FromStr for VerseKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let (surah, ayah) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| CoreError::invalid_verse_key(s))?;

        let surah = surah
            .parse::<u32>()
            .map_err(|_| CoreError::invalid_verse_key(s))?;
        let ayah = ayah
            .parse::<u32>()
            .map_err(|_| CoreError::invalid_verse_key(s))?;

        Self::new(surah, ayah)
    }
}

impl TryFrom<String> for VerseKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<VerseKey> for String {
    fn from(key: VerseKey) -> Self {
        key.to_string()
    }
}
