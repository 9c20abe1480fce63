//! HTTP client for the verse API.

use crate::cache::{CacheKey, VerseCache};
use crate::error::{Result, VersesError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tilawa_core::{Verse, VerseKey};
use tracing::{debug, warn};
use url::Url;

/// Default public verse API
pub const DEFAULT_API_BASE: &str = "https://api.quran.com/api/v4";

#[derive(Debug, Deserialize)]
struct VerseResponse {
    verse: Verse,
}

/// Client fetching single verses by key.
///
/// Navigation hosts usually go through [`VerseClient::fetch_verse_cached`]
/// so that moving back and forth across recently read verses does not hit
/// the network again.
#[derive(Debug, Clone)]
pub struct VerseClient {
    http: Client,
    base: Url,
}

impl VerseClient {
    /// Create a new client against the given API base URL.
    pub fn new(api_base: &str) -> Result<Self> {
        let trimmed = api_base.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(VersesError::InvalidUrl("URL cannot be empty".into()));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(VersesError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // Trailing slash so that `join` appends instead of replacing the last segment
        let base = Url::parse(&format!("{}/", trimmed))
            .map_err(|e| VersesError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("TilawaPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base })
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Fetch a verse from the API.
    pub async fn fetch_verse(&self, key: VerseKey, lang: &str) -> Result<Verse> {
        let mut url = self
            .base
            .join(&format!("verses/by_key/{}", key))
            .map_err(|e| VersesError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("language", lang)
            .append_pair("fields", "text_uthmani");

        debug!(url = %url, verse_key = %key, "Fetching verse");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), verse_key = %key, "Verse API returned error");
            return Err(VersesError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: VerseResponse = response
            .json()
            .await
            .map_err(|e| VersesError::Parse(format!("Failed to parse verse {}: {}", key, e)))?;

        Ok(body.verse)
    }

    /// Fetch a verse through `cache`, keyed by verse, surah and language.
    pub async fn fetch_verse_cached(
        &self,
        cache: &VerseCache<Verse>,
        key: VerseKey,
        lang: &str,
    ) -> Result<Verse> {
        cache
            .get_or_fetch(CacheKey::for_verse(key, lang), || self.fetch_verse(key, lang))
            .await
    }
}
