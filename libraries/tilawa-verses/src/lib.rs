//! Tilawa Player - Verses
//!
//! Fetches verse objects from the verse API and keeps recently seen verses
//! in a bounded, keyed cache so that sequential reading and repeat
//! navigation resolve verses without redundant network calls.
//!
//! # Example
//!
//! ```rust
//! use tilawa_verses::{CacheKey, VerseCache};
//!
//! let cache: VerseCache<String> = VerseCache::with_capacity(2);
//! cache.insert(CacheKey::new(1, 1, "en"), "first".to_string());
//! cache.insert(CacheKey::new(2, 1, "en"), "second".to_string());
//! cache.insert(CacheKey::new(3, 1, "en"), "third".to_string());
//!
//! // The first-inserted verse was evicted
//! assert!(cache.get(CacheKey::new(1, 1, "en")).is_none());
//! assert_eq!(cache.len(), 2);
//! ```

mod cache;
mod client;
mod error;

pub use cache::{CacheKey, VerseCache, VERSE_CACHE_CAPACITY};
pub use client::{VerseClient, DEFAULT_API_BASE};
pub use error::{Result, VersesError};
