//! Tilawa Player Core
//!
//! Platform-agnostic core types and error handling shared by the verse
//! cache, the playback controller and the application drivers.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `VerseKey`, `Verse`, `Track`
//! - **Audio Sources**: recitation URL construction from a verse key and a reciter path
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tilawa_core::{audio_url, VerseKey};
//!
//! let key: VerseKey = "2:255".parse().unwrap();
//! assert_eq!(key.surah(), 2);
//! assert_eq!(key.ayah(), 255);
//!
//! let url = audio_url("2:255", "Alafasy_128kbps").unwrap();
//! assert_eq!(url, "https://everyayah.com/data/Alafasy_128kbps/002255.mp3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audio_url;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use audio_url::{audio_url, audio_url_with_base, DEFAULT_AUDIO_CDN};
pub use error::{CoreError, Result};
pub use types::{verse_count, Track, Verse, VerseKey, SURAH_COUNT, TOTAL_VERSES};
