//! Domain types for Tilawa Player

mod surah;
mod track;
mod verse;
mod verse_key;

pub use surah::{verse_count, TOTAL_VERSES};
pub use track::Track;
pub use verse::Verse;
pub use verse_key::{VerseKey, SURAH_COUNT};
