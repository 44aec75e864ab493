//! Main play-history service client.

use crate::error::{HistoryClientError, Result};
use crate::types::{
    ClearHistoryResponse, ClientConfig, PlayHistoryRequest, PlayHistoryResponse,
    RecordPlayRequest, RecordPlayResponse, ResetSessionRequest, StatisticsResponse,
};
use async_trait::async_trait;
use lumen_core::{
    HistorySnapshot, PlayHistoryStore, PlayStatistics, SessionId, TrackHistory, UserId,
};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

/// HTTP adapter to the hosted play-history service.
///
/// Implements [`PlayHistoryStore`], so a `ShuffleController` can be wired
/// straight to the service. Request timeouts live here: the engine treats
/// any failed call uniformly as "store unavailable".
///
/// # Example
///
/// ```ignore
/// use lumen_history_client::{ClientConfig, HistoryClient};
///
/// let client = HistoryClient::new(ClientConfig::new("https://history.example.com"))?;
/// let count = client.record_play("user-1", "/a.mp3", "Track A", "session-1-x").await?;
/// println!("play count is now {count}");
/// ```
pub struct HistoryClient {
    http: Client,
    config: ClientConfig,
}

impl HistoryClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.is_empty() {
            return Err(HistoryClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(HistoryClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("LumenPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HistoryClientError::Request)?;

        Ok(Self {
            http,
            config: ClientConfig {
                base_url,
                bearer_token: config.bearer_token,
            },
        })
    }

    /// Base URL of the service.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response> {
        self.authed(builder).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                HistoryClientError::ServerUnreachable(e.to_string())
            } else {
                HistoryClientError::Request(e)
            }
        })
    }

    async fn error_for_status(response: reqwest::Response) -> HistoryClientError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        HistoryClientError::ServerError { status, message }
    }

    /// Record one play: bump the count and flag the track for `session_id`.
    ///
    /// Returns the play count after the increment.
    pub async fn record_play(
        &self,
        user_id: &str,
        track_url: &str,
        track_name: &str,
        session_id: &str,
    ) -> Result<u64> {
        let url = format!("{}/api/history/play", self.config.base_url);
        debug!(url = %url, track_url = %track_url, "Recording play");

        let body = RecordPlayRequest {
            user_id: user_id.to_string(),
            track_url: track_url.to_string(),
            track_name: track_name.to_string(),
            session_id: session_id.to_string(),
        };

        let response = self.send(self.http.post(&url).json(&body)).await?;

        if response.status().is_success() {
            let parsed: RecordPlayResponse = response.json().await.map_err(|e| {
                HistoryClientError::ParseError(format!("Failed to parse play response: {}", e))
            })?;

            debug!(play_count = parsed.play_count, "Play recorded");
            Ok(parsed.play_count)
        } else {
            Err(Self::error_for_status(response).await)
        }
    }

    /// Fetch history for exactly the given URLs.
    ///
    /// The service omits URLs it has no record for.
    pub async fn get_play_history(
        &self,
        user_id: &str,
        track_urls: &[String],
    ) -> Result<PlayHistoryResponse> {
        let url = format!("{}/api/history/query", self.config.base_url);
        debug!(url = %url, tracks = track_urls.len(), "Fetching play history");

        let body = PlayHistoryRequest {
            user_id: user_id.to_string(),
            track_urls: track_urls.to_vec(),
        };

        let response = self.send(self.http.post(&url).json(&body)).await?;

        if response.status().is_success() {
            let parsed: PlayHistoryResponse = response.json().await.map_err(|e| {
                HistoryClientError::ParseError(format!("Failed to parse history response: {}", e))
            })?;

            debug!(entries = parsed.len(), "Fetched play history");
            Ok(parsed)
        } else {
            Err(Self::error_for_status(response).await)
        }
    }

    /// Begin a new session, invalidating flags recorded under prior ids.
    pub async fn reset_session(&self, user_id: &str, session_id: &str) -> Result<()> {
        let url = format!("{}/api/history/session/reset", self.config.base_url);
        debug!(url = %url, session_id = %session_id, "Resetting session");

        let body = ResetSessionRequest {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
        };

        let response = self.send(self.http.post(&url).json(&body)).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for_status(response).await)
        }
    }

    /// Aggregate play statistics for the user.
    pub async fn get_statistics(&self, user_id: &str) -> Result<StatisticsResponse> {
        let url = format!(
            "{}/api/history/stats?userId={}",
            self.config.base_url,
            urlencoding::encode(user_id)
        );
        debug!(url = %url, "Fetching statistics");

        let response = self.send(self.http.get(&url)).await?;

        if response.status().is_success() {
            response.json().await.map_err(|e| {
                HistoryClientError::ParseError(format!("Failed to parse stats response: {}", e))
            })
        } else {
            Err(Self::error_for_status(response).await)
        }
    }

    /// Delete all history records for the user.
    ///
    /// Returns the number of deleted records.
    pub async fn clear_history(&self, user_id: &str) -> Result<u64> {
        let url = format!(
            "{}/api/history?userId={}",
            self.config.base_url,
            urlencoding::encode(user_id)
        );
        debug!(url = %url, "Clearing play history");

        let response = self.send(self.http.delete(&url)).await?;

        if response.status().is_success() {
            let parsed: ClearHistoryResponse = response.json().await.map_err(|e| {
                HistoryClientError::ParseError(format!("Failed to parse clear response: {}", e))
            })?;

            debug!(deleted = parsed.deleted_count, "History cleared");
            Ok(parsed.deleted_count)
        } else {
            Err(Self::error_for_status(response).await)
        }
    }
}

// The engine consumes the client through the store contract; adapter errors
// map onto the shared taxonomy.
#[async_trait]
impl PlayHistoryStore for HistoryClient {
    async fn record_play(
        &self,
        user_id: &UserId,
        track_url: &str,
        track_name: &str,
        session_id: &SessionId,
    ) -> lumen_core::Result<u64> {
        Ok(self
            .record_play(user_id.as_str(), track_url, track_name, session_id.as_str())
            .await?)
    }

    async fn get_play_history(
        &self,
        user_id: &UserId,
        track_urls: &[String],
    ) -> lumen_core::Result<HistorySnapshot> {
        let response = self.get_play_history(user_id.as_str(), track_urls).await?;

        Ok(response
            .into_iter()
            .map(|(url, payload)| {
                (
                    url,
                    TrackHistory::new(payload.play_count, payload.played_in_current_session),
                )
            })
            .collect())
    }

    async fn reset_session(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
    ) -> lumen_core::Result<()> {
        Ok(self
            .reset_session(user_id.as_str(), session_id.as_str())
            .await?)
    }

    async fn get_statistics(&self, user_id: &UserId) -> lumen_core::Result<PlayStatistics> {
        let stats = self.get_statistics(user_id.as_str()).await?;

        Ok(PlayStatistics {
            total_tracks: stats.total_tracks,
            total_plays: stats.total_plays,
            avg_plays_per_track: stats.avg_plays_per_track,
            max_plays: stats.max_plays,
            min_plays: stats.min_plays,
            tracks_played_in_session: stats.tracks_played_in_session,
        })
    }

    async fn clear_history(&self, user_id: &UserId) -> lumen_core::Result<u64> {
        Ok(self.clear_history(user_id.as_str()).await?)
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
