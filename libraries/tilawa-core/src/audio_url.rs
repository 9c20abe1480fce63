//! Recitation audio URL construction
//!
//! Audio files are addressed as `{base}/{reciter}/{SSS}{AAA}.mp3` with the
//! surah and ayah zero-padded to three digits.

use crate::error::{CoreError, Result};
use crate::types::VerseKey;

/// Default CDN serving per-ayah recitations
pub const DEFAULT_AUDIO_CDN: &str = "https://everyayah.com/data";

/// Build the audio URL for `verse_key` using the default CDN
pub fn audio_url(verse_key: &str, reciter_path: &str) -> Result<String> {
    audio_url_with_base(DEFAULT_AUDIO_CDN, verse_key, reciter_path)
}

/// Build the audio URL for `verse_key` against an explicit CDN base
///
/// A reciter path that is already an absolute `http(s)` URL is used as the
/// base as-is and the CDN is ignored.
pub fn audio_url_with_base(cdn_base: &str, verse_key: &str, reciter_path: &str) -> Result<String> {
    let key: VerseKey = verse_key.parse()?;
    let reciter = reciter_path.trim().trim_end_matches('/');
    if reciter.is_empty() {
        return Err(CoreError::EmptyReciterPath);
    }

    let file = format!("{}.mp3", key.padded_stem());

    if is_absolute_url(reciter) {
        return Ok(format!("{}/{}", reciter, file));
    }

    let base = cdn_base.trim_end_matches('/');
    let reciter = reciter.trim_start_matches('/');
    Ok(format!("{}/{}/{}", base, reciter, file))
}

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}
