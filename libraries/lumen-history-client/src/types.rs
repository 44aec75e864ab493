//! Types for the play-history service API requests and responses.
//!
//! Field names on the wire are part of the compatibility contract with the
//! hosted service, which speaks camelCase JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for connecting to a play-history service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service (e.g., "https://history.example.com")
    pub base_url: String,
    /// Bearer token, if the deployment requires one
    pub bearer_token: Option<String>,
}

impl ClientConfig {
    /// Create a config with just the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
        }
    }

    /// Create a config with a bearer token.
    pub fn with_token(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: Some(bearer_token.into()),
        }
    }
}

// =============================================================================
// Request Types
// =============================================================================

/// Request body for recording a play.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPlayRequest {
    pub user_id: String,
    pub track_url: String,
    pub track_name: String,
    pub session_id: String,
}

/// Request body for a history snapshot fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayHistoryRequest {
    pub user_id: String,
    pub track_urls: Vec<String>,
}

/// Request body for a session reset, carrying the *new* session id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetSessionRequest {
    pub user_id: String,
    pub session_id: String,
}

// =============================================================================
// Response Types
// =============================================================================

/// Response from a successful play record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPlayResponse {
    pub play_count: u64,
}

/// One track's history as returned by the service.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackHistoryPayload {
    pub play_count: u64,
    pub played_in_current_session: bool,
}

/// History snapshot response: `trackUrl → history` for exactly the
/// requested URLs. Absent entries imply zero plays, not in session.
pub type PlayHistoryResponse = HashMap<String, TrackHistoryPayload>;

/// Aggregate play statistics as returned by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub total_tracks: u64,
    pub total_plays: u64,
    pub avg_plays_per_track: f64,
    pub max_plays: u64,
    pub min_plays: u64,
    pub tracks_played_in_session: u64,
}

/// Response from a history clear.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearHistoryResponse {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_play_request_serializes_camel_case() {
        let request = RecordPlayRequest {
            user_id: "user-1".to_string(),
            track_url: "/a.mp3".to_string(),
            track_name: "Track A".to_string(),
            session_id: "session-1-x".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["trackUrl"], "/a.mp3");
        assert_eq!(json["trackName"], "Track A");
        assert_eq!(json["sessionId"], "session-1-x");
    }

    #[test]
    fn history_payload_deserializes_camel_case() {
        let payload: TrackHistoryPayload =
            serde_json::from_str(r#"{"playCount": 7, "playedInCurrentSession": true}"#).unwrap();

        assert_eq!(payload.play_count, 7);
        assert!(payload.played_in_current_session);
    }

    #[test]
    fn statistics_response_deserializes_camel_case() {
        let stats: StatisticsResponse = serde_json::from_str(
            r#"{
                "totalTracks": 10,
                "totalPlays": 42,
                "avgPlaysPerTrack": 4.2,
                "maxPlays": 9,
                "minPlays": 1,
                "tracksPlayedInSession": 3
            }"#,
        )
        .unwrap();

        assert_eq!(stats.total_tracks, 10);
        assert_eq!(stats.total_plays, 42);
        assert!((stats.avg_plays_per_track - 4.2).abs() < 1e-12);
        assert_eq!(stats.tracks_played_in_session, 3);
    }
}
